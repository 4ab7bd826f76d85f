use crate::models::{Exercise, ExercisePatch, ExerciseType, Intensity};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("duration must be a whole number of minutes above zero, got '{0}'")]
    InvalidDuration(String),
    #[error("unknown exercise type '{0}'")]
    UnknownType(String),
    #[error("unknown intensity '{0}'")]
    UnknownIntensity(String),
    #[error("could not read date '{0}'")]
    InvalidDate(String),
    #[error("name cannot be blank")]
    BlankName,
}

/// Raw add-exercise fields, as text, exactly as the form submits them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub exercise_type: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub duration: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ExerciseForm {
    /// Validates the fields and builds a new exercise with a fresh id and
    /// `created_at = now`. Picked calendar dates are read in local time.
    pub fn into_exercise(self, now: DateTime<Utc>) -> Result<Exercise, ValidationError> {
        self.into_exercise_in(&now.with_timezone(&Local))
    }

    /// Same as [`ExerciseForm::into_exercise`], with picked calendar dates
    /// read in `now`'s time zone.
    pub fn into_exercise_in<Tz: TimeZone>(
        self,
        now: &DateTime<Tz>,
    ) -> Result<Exercise, ValidationError> {
        let name = filled(self.name);
        let exercise_type = filled(self.exercise_type);
        let duration = filled(self.duration);

        let missing: Vec<&'static str> = [
            ("name", name.is_none()),
            ("type", exercise_type.is_none()),
            ("duration", duration.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (Some(name), Some(exercise_type), Some(duration)) = (name, exercise_type, duration)
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        let exercise_type = exercise_type
            .parse::<ExerciseType>()
            .map_err(ValidationError::UnknownType)?;
        let duration = parse_duration(&duration)?;
        let intensity = match filled(self.intensity) {
            Some(text) => text
                .parse::<Intensity>()
                .map_err(ValidationError::UnknownIntensity)?,
            None => Intensity::default(),
        };
        let created_at = now.with_timezone(&Utc);
        let date = match filled(self.date) {
            Some(text) => parse_date(&text, now)?,
            None => created_at,
        };

        Ok(Exercise {
            id: new_exercise_id(),
            name,
            exercise_type,
            duration,
            intensity,
            date,
            notes: filled(self.notes),
            created_at,
        })
    }
}

impl ExercisePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::BlankName);
        }
        if self.duration == Some(0) {
            return Err(ValidationError::InvalidDuration("0".to_string()));
        }
        Ok(())
    }
}

pub fn new_exercise_id() -> String {
    Uuid::new_v4().to_string()
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_duration(text: &str) -> Result<u32, ValidationError> {
    match text.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ValidationError::InvalidDuration(text.to_string())),
    }
}

// Accepts a full RFC 3339 timestamp, or a bare `YYYY-MM-DD` from a date
// picker. The picked day is a calendar day in `now`'s zone and keeps `now`'s
// wall-clock time.
fn parse_date<Tz: TimeZone>(
    text: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))?;

    let zone = now.timezone();
    // A wall-clock time skipped by a DST jump falls back to noon that day.
    zone.from_local_datetime(&day.and_time(now.time()))
        .earliest()
        .or_else(|| {
            day.and_hms_opt(12, 0, 0)
                .and_then(|noon| zone.from_local_datetime(&noon).earliest())
        })
        .map(|picked| picked.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::history_rows_in;
    use crate::progress::{aggregate_at, TimeRange};
    use chrono::FixedOffset;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 34, 56).unwrap()
    }

    fn form(name: &str, kind: &str, duration: &str) -> ExerciseForm {
        ExerciseForm {
            name: Some(name.to_string()),
            exercise_type: Some(kind.to_string()),
            duration: Some(duration.to_string()),
            ..ExerciseForm::default()
        }
    }

    #[test]
    fn complete_form_builds_exercise_with_defaults() {
        let exercise = form("Morning run", "Cardio", "30").into_exercise(now()).unwrap();

        assert_eq!(exercise.name, "Morning run");
        assert_eq!(exercise.exercise_type, ExerciseType::Cardio);
        assert_eq!(exercise.duration, 30);
        assert_eq!(exercise.intensity, Intensity::Medium);
        assert_eq!(exercise.date, now());
        assert_eq!(exercise.created_at, now());
        assert_eq!(exercise.notes, None);
        assert!(Uuid::parse_str(&exercise.id).is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = ExerciseForm {
            name: Some("   ".to_string()),
            notes: Some("no type".to_string()),
            ..ExerciseForm::default()
        }
        .into_exercise(now())
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["name", "type", "duration"])
        );
        assert!(err.to_string().starts_with("Please fill in all required fields"));
    }

    #[test]
    fn non_positive_or_non_numeric_durations_are_rejected() {
        for bad in ["0", "-5", "half an hour", "2.5"] {
            let err = form("Row", "Cardio", bad).into_exercise(now()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidDuration(bad.to_string()));
        }
    }

    #[test]
    fn unknown_enumerations_are_rejected() {
        let err = form("Row", "Rowing", "20").into_exercise(now()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownType("Rowing".to_string()));

        let mut extreme = form("Row", "Cardio", "20");
        extreme.intensity = Some("Extreme".to_string());
        assert_eq!(
            extreme.into_exercise(now()).unwrap_err(),
            ValidationError::UnknownIntensity("Extreme".to_string())
        );
    }

    #[test]
    fn picked_dates_are_accepted() {
        let mut picked = form("Swim", "Sports", "45");
        picked.date = Some("2026-10-12".to_string());
        let exercise = picked.into_exercise_in(&now()).unwrap();
        assert_eq!(
            exercise.date,
            Utc.with_ymd_and_hms(2026, 10, 12, 12, 34, 56).unwrap()
        );

        let mut exact = form("Swim", "Sports", "45");
        exact.date = Some("2026-10-12T06:15:00+02:00".to_string());
        let exercise = exact.into_exercise(now()).unwrap();
        assert_eq!(
            exercise.date,
            Utc.with_ymd_and_hms(2026, 10, 12, 4, 15, 0).unwrap()
        );

        let mut garbled = form("Swim", "Sports", "45");
        garbled.date = Some("last tuesday".to_string());
        assert!(matches!(
            garbled.into_exercise(now()),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn picked_dates_stay_on_the_same_local_day() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = zone.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap();

        let mut picked = form("Late run", "Cardio", "30");
        picked.date = Some("2026-10-19".to_string());
        let exercise = picked.into_exercise_in(&evening).unwrap();

        assert_eq!(
            exercise.date,
            Utc.with_ymd_and_hms(2026, 10, 20, 1, 0, 0).unwrap()
        );
        assert_eq!(exercise.created_at, evening.with_timezone(&Utc));

        let rows = history_rows_in(std::slice::from_ref(&exercise), &zone);
        assert_eq!(rows[0].date_label, "Oct 19, 2026");

        let report = aggregate_at(&[exercise], TimeRange::Week, &evening);
        let labels: Vec<&str> = report.series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Oct 19"]);
    }

    #[test]
    fn duration_may_arrive_as_a_json_number() {
        let parsed: ExerciseForm =
            serde_json::from_str(r#"{"name":"Bike","type":"cardio","duration":25}"#).unwrap();
        assert_eq!(parsed.duration.as_deref(), Some("25"));
        assert_eq!(parsed.into_exercise(now()).unwrap().duration, 25);
    }

    #[test]
    fn ids_differ_between_rapid_submissions() {
        let first = form("Plank", "Strength", "5").into_exercise(now()).unwrap();
        let second = form("Plank", "Strength", "5").into_exercise(now()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn patch_validation() {
        let ok = ExercisePatch {
            duration: Some(45),
            ..ExercisePatch::default()
        };
        assert_eq!(ok.validate(), Ok(()));

        let blank = ExercisePatch {
            name: Some(" ".to_string()),
            ..ExercisePatch::default()
        };
        assert_eq!(blank.validate(), Err(ValidationError::BlankName));

        let zero = ExercisePatch {
            duration: Some(0),
            ..ExercisePatch::default()
        };
        assert!(zero.validate().is_err());
    }
}
