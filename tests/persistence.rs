use chrono::{Duration, TimeZone, Utc};
use exercise_tracker::form::ExerciseForm;
use exercise_tracker::models::{Exercise, ExercisePatch, ExerciseType, Intensity};
use exercise_tracker::storage::{SlotStorage, STORAGE_KEY};
use exercise_tracker::{ExerciseStore, FileStorage};
use std::fs;

fn sample(id: &str, duration: u32) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: "Evening run".to_string(),
        exercise_type: ExerciseType::Cardio,
        duration,
        intensity: Intensity::High,
        date: Utc.with_ymd_and_hms(2026, 10, 18, 19, 12, 44).unwrap() + Duration::microseconds(421_337),
        notes: Some("hill repeats".to_string()),
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 20, 3, 9).unwrap() + Duration::nanoseconds(7),
    }
}

#[test]
fn file_slot_round_trips_exact_timestamps() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = ExerciseStore::open(FileStorage::new(dir.path()));
    store.add_exercise(sample("1", 40));
    store.add_exercise(sample("2", 25));

    let reopened = ExerciseStore::open(FileStorage::new(dir.path()));
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert_eq!(reopened.get("1").unwrap().date, sample("1", 40).date);
    assert_eq!(reopened.get("2").unwrap().created_at, sample("2", 25).created_at);
}

#[test]
fn every_mutation_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let mut store = ExerciseStore::open(storage.clone());

    store.add_exercise(sample("1", 40));
    store.update_exercise(
        "1",
        &ExercisePatch {
            notes: Some(None),
            ..ExercisePatch::default()
        },
    );
    assert_eq!(ExerciseStore::open(storage.clone()).get("1").unwrap().notes, None);

    store.remove_exercise("1");
    let payload = storage.read(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["state"]["exercises"], serde_json::json!([]));
}

#[test]
fn corrupt_slot_starts_empty_and_recovers_on_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    fs::write(storage.slot_path(STORAGE_KEY), "][").unwrap();

    let mut store = ExerciseStore::open(storage.clone());
    assert!(store.is_empty());

    let exercise = ExerciseForm {
        name: Some("Stretch".to_string()),
        exercise_type: Some("Flexibility".to_string()),
        duration: Some("10".to_string()),
        ..ExerciseForm::default()
    }
    .into_exercise(Utc::now())
    .unwrap();
    store.add_exercise(exercise.clone());

    let reopened = ExerciseStore::open(storage);
    assert_eq!(reopened.snapshot().to_vec(), vec![exercise]);
}

#[test]
fn missing_data_dir_is_created_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("slots");

    let mut store = ExerciseStore::open(FileStorage::new(&nested));
    store.add_exercise(sample("1", 15));

    assert!(nested.join(format!("{STORAGE_KEY}.json")).exists());
}
