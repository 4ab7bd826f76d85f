use crate::models::{Exercise, ExerciseType, Intensity};
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt;

/// One line of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub duration_label: String,
    pub intensity: Intensity,
    pub intensity_tone: &'static str,
    pub date_label: String,
    pub notes: Option<String>,
}

pub fn history_rows(exercises: &[Exercise]) -> Vec<HistoryRow> {
    history_rows_in(exercises, &Local)
}

/// Newest entry first; the stored list itself stays oldest first.
pub fn history_rows_in<Tz>(exercises: &[Exercise], zone: &Tz) -> Vec<HistoryRow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    exercises
        .iter()
        .rev()
        .map(|exercise| HistoryRow {
            id: exercise.id.clone(),
            name: exercise.name.clone(),
            exercise_type: exercise.exercise_type,
            duration_label: format!("{} min", exercise.duration),
            intensity: exercise.intensity,
            intensity_tone: intensity_tone(exercise.intensity),
            date_label: exercise
                .date
                .with_timezone(zone)
                .format("%b %-d, %Y")
                .to_string(),
            notes: exercise.notes.clone(),
        })
        .collect()
}

fn intensity_tone(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Low => "low",
        Intensity::Medium => "medium",
        Intensity::High => "high",
    }
}
