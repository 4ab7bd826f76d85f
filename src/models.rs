use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseType {
    Cardio,
    Strength,
    Flexibility,
    Balance,
    Sports,
    Other,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::Cardio,
        ExerciseType::Strength,
        ExerciseType::Flexibility,
        ExerciseType::Balance,
        ExerciseType::Sports,
        ExerciseType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseType::Cardio => "Cardio",
            ExerciseType::Strength => "Strength",
            ExerciseType::Flexibility => "Flexibility",
            ExerciseType::Balance => "Balance",
            ExerciseType::Sports => "Sports",
            ExerciseType::Other => "Other",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| value.to_string())
    }
}

/// One logged workout.
///
/// `id` and `created_at` are fixed when the record is built and never change
/// afterwards; `date` is the user-chosen time of the workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    /// Minutes, always positive.
    pub duration: u32,
    #[serde(default)]
    pub intensity: Intensity,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Sparse overwrite of an exercise's editable fields.
///
/// `notes` is doubly optional: `None` leaves the notes alone, `Some(None)`
/// clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub exercise_type: Option<ExerciseType>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

impl ExercisePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, exercise: &Exercise) -> Exercise {
        let mut updated = exercise.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(kind) = self.exercise_type {
            updated.exercise_type = kind;
        }
        if let Some(duration) = self.duration {
            updated.duration = duration;
        }
        if let Some(intensity) = self.intensity {
            updated.intensity = intensity;
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(notes) = &self.notes {
            updated.notes = notes.clone();
        }
        updated
    }
}

// A field that is present in the payload (even as `null`) becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Envelope written to the storage slot: `{"state": {"exercises": [...]}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState<'a> {
    pub state: PersistedExercises<'a>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedExercises<'a> {
    #[serde(default)]
    pub exercises: Cow<'a, [Exercise]>,
}

impl<'a> PersistedState<'a> {
    pub fn borrowed(exercises: &'a [Exercise]) -> Self {
        Self {
            state: PersistedExercises {
                exercises: Cow::Borrowed(exercises),
            },
        }
    }

    pub fn into_exercises(self) -> Vec<Exercise> {
        self.state.exercises.into_owned()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn exercise(id: &str, duration: u32, date: DateTime<Utc>) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: format!("Workout {id}"),
            exercise_type: ExerciseType::Cardio,
            duration,
            intensity: Intensity::Medium,
            date,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 7, 30, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::exercise;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn exercise_serializes_with_camel_case_and_type_key() {
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 18, 45, 12).unwrap();
        let value = serde_json::to_value(exercise("1", 30, date)).unwrap();

        assert_eq!(value["type"], "Cardio");
        assert_eq!(value["intensity"], "Medium");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn missing_intensity_defaults_to_medium() {
        let json = r#"{
            "id": "42",
            "name": "Yoga",
            "type": "Flexibility",
            "duration": 25,
            "date": "2026-10-18T08:00:00Z",
            "createdAt": "2026-10-18T08:30:00Z"
        }"#;
        let parsed: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.intensity, Intensity::Medium);
        assert_eq!(parsed.exercise_type, ExerciseType::Flexibility);
    }

    #[test]
    fn enum_parsing_ignores_case_and_whitespace() {
        assert_eq!(" strength ".parse::<ExerciseType>(), Ok(ExerciseType::Strength));
        assert_eq!("HIGH".parse::<Intensity>(), Ok(Intensity::High));
        assert_eq!("Pilates".parse::<ExerciseType>(), Err("Pilates".to_string()));
    }

    #[test]
    fn patch_distinguishes_absent_and_null_notes() {
        let absent: ExercisePatch = serde_json::from_str(r#"{"duration": 45}"#).unwrap();
        assert_eq!(absent.notes, None);
        assert_eq!(absent.duration, Some(45));

        let cleared: ExercisePatch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(cleared.notes, Some(None));
    }

    #[test]
    fn patch_apply_only_touches_supplied_fields() {
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 18, 45, 12).unwrap();
        let mut original = exercise("1", 30, date);
        original.notes = Some("felt good".to_string());

        let patch = ExercisePatch {
            duration: Some(45),
            ..ExercisePatch::default()
        };
        let updated = patch.apply(&original);

        assert_eq!(updated.duration, 45);
        assert_eq!(
            Exercise {
                duration: original.duration,
                ..updated
            },
            original
        );
    }
}
