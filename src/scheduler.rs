//! Greedy timetable generation.
//!
//! Courses are taken in ascending `code` order, ignoring case first. Each course walks the slot
//! list once and claims a slot whenever its teacher is free there and some
//! room is free there (the first such room in input order). Nothing is ever
//! revisited, so an early course can starve a later one.

use crate::data::{AssignmentRecord, ScheduleEntry, TimetableInput, UnassignedRecord};
use itertools::Itertools;
use log::{debug, info, trace};
use std::collections::{HashMap, HashSet};

/// Builds the timetable for `input`.
///
/// The output holds one [`AssignmentRecord`] per placed slot-unit, in slot
/// order, and for a course that could not be fully placed a single
/// [`UnassignedRecord`] right after its last assignment. Never fails.
pub fn generate(input: &TimetableInput) -> Vec<ScheduleEntry> {
    info!(
        "Generating timetable for {} courses, {} teachers, {} rooms and {} slots...",
        input.courses.len(),
        input.teachers.len(),
        input.rooms.len(),
        input.slots.len()
    );

    // busy sets keyed by `Id::key`; a course without a teacher is tracked under `None`
    let mut teacher_busy: HashMap<Option<String>, HashSet<&str>> = input
        .teachers
        .iter()
        .map(|t| (Some(t.id.key()), HashSet::new()))
        .collect();
    let mut room_busy: HashMap<String, HashSet<&str>> = input
        .rooms
        .iter()
        .map(|r| (r.id.key(), HashSet::new()))
        .collect();
    let room_keys: Vec<String> = input.rooms.iter().map(|r| r.id.key()).collect();

    let mut schedule = Vec::new();

    // stable, so equal codes keep input order
    let ordered = input
        .courses
        .iter()
        .sorted_by_cached_key(|c| (c.code.to_lowercase(), c.code.clone()));

    for course in ordered {
        let mut remaining = course.required_slots();
        let teacher_slots = teacher_busy
            .entry(course.teacher_id.as_ref().map(|id| id.key()))
            .or_default();

        for slot in &input.slots {
            if remaining == 0 {
                break;
            }
            if teacher_slots.contains(slot.as_str()) {
                trace!("{}: teacher busy at {}", course.code, slot);
                continue;
            }
            let Some((room, room_key)) = input.rooms.iter().zip(&room_keys).find(|(_, key)| {
                !room_busy
                    .get(key.as_str())
                    .is_some_and(|busy| busy.contains(slot.as_str()))
            }) else {
                trace!("{}: no free room at {}", course.code, slot);
                continue;
            };

            teacher_slots.insert(slot.as_str());
            room_busy
                .entry(room_key.clone())
                .or_default()
                .insert(slot.as_str());
            debug!("{} -> {} in room {}", course.code, slot, room.id);
            schedule.push(ScheduleEntry::Assigned(AssignmentRecord::new(course, slot, room)));
            remaining -= 1;
        }

        if remaining > 0 {
            debug!("{}: {} slot(s) left unassigned", course.code, remaining);
            schedule.push(ScheduleEntry::Unassigned(UnassignedRecord::new(course, remaining)));
        }
    }

    info!(
        "Timetable built with {} assignments; {} course(s) incomplete",
        schedule.iter().filter_map(ScheduleEntry::as_assigned).count(),
        schedule.iter().filter_map(ScheduleEntry::as_unassigned).count()
    );
    schedule
}
