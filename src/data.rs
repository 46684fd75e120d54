use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

/// A single schedulable time unit, e.g. "Mon 9-10".
pub type Slot = String;

/// Identifier for courses, teachers and rooms.
///
/// Clients send either numbers or strings, so both are accepted and echoed
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl Id {
    /// Key used for booking lookups. `1` and `"1"` name the same entity.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

/// A course that needs `hours` slot-units.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Id,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teacher_id: Option<Id>,
    #[serde(default)]
    pub hours: Option<u32>,
}

impl Course {
    /// Number of slot-units to place. Absent or zero hours count as one.
    pub fn required_slots(&self) -> u32 {
        match self.hours {
            Some(h) if h > 0 => h,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Teacher {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

/// A physical room. Capacity is carried through but not used for placement.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
}

/// The complete, validated input for one scheduling run.
#[derive(Debug, Clone)]
pub struct TimetableInput {
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    pub slots: Vec<Slot>,
}

/// Request body of the generate endpoint; every collection may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub courses: Option<Vec<Course>>,
    pub teachers: Option<Vec<Teacher>>,
    pub rooms: Option<Vec<Room>>,
    pub slots: Option<Vec<Slot>>,
}

impl GenerateRequest {
    pub fn into_input(self) -> Result<TimetableInput, InputError> {
        let missing: Vec<&'static str> = [
            ("courses", self.courses.is_none()),
            ("teachers", self.teachers.is_none()),
            ("rooms", self.rooms.is_none()),
            ("slots", self.slots.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (self.courses, self.teachers, self.rooms, self.slots) {
            (Some(courses), Some(teachers), Some(rooms), Some(slots)) => Ok(TimetableInput {
                courses,
                teachers,
                rooms,
                slots,
            }),
            _ => Err(InputError::MissingCollections(missing)),
        }
    }
}

/// One slot-unit of a course placed in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub course_id: Id,
    pub course_code: String,
    pub course_name: String,
    pub teacher_id: Option<Id>,
    pub slot: Slot,
    pub room_id: Id,
    pub room_name: String,
}

impl AssignmentRecord {
    pub fn new(course: &Course, slot: &str, room: &Room) -> Self {
        Self {
            course_id: course.id.clone(),
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            teacher_id: course.teacher_id.clone(),
            slot: slot.to_string(),
            room_id: room.id.clone(),
            room_name: room.name.clone(),
        }
    }
}

/// The part of a course the greedy pass could not place.
///
/// `slot`, `room_id` and `room_name` are always `None`; they are kept so the
/// record has the same shape as an [`AssignmentRecord`] on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedRecord {
    pub course_id: Id,
    pub course_code: String,
    pub course_name: String,
    pub teacher_id: Option<Id>,
    pub slot: Option<Slot>,
    pub room_id: Option<Id>,
    pub room_name: Option<String>,
    pub remaining_count: u32,
    pub note: String,
}

impl UnassignedRecord {
    pub fn new(course: &Course, remaining_count: u32) -> Self {
        Self {
            course_id: course.id.clone(),
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            teacher_id: course.teacher_id.clone(),
            slot: None,
            room_id: None,
            room_name: None,
            remaining_count,
            note: format!("Unassigned {} slot(s)", remaining_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScheduleEntry {
    Assigned(AssignmentRecord),
    Unassigned(UnassignedRecord),
}

impl ScheduleEntry {
    pub fn as_assigned(&self) -> Option<&AssignmentRecord> {
        match self {
            ScheduleEntry::Assigned(a) => Some(a),
            ScheduleEntry::Unassigned(_) => None,
        }
    }

    pub fn as_unassigned(&self) -> Option<&UnassignedRecord> {
        match self {
            ScheduleEntry::Assigned(_) => None,
            ScheduleEntry::Unassigned(u) => Some(u),
        }
    }
}
