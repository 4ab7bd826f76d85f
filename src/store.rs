//! The exercise list and its persistence.
//!
//! [`ExerciseStore`] is the only thing allowed to change the list. Every
//! mutation swaps in a freshly built sequence, writes it to the storage slot
//! and then hands the new [`Snapshot`] to each subscriber.

use crate::models::{Exercise, ExercisePatch};
use crate::storage::{load_exercises, persist_exercises, MemoryStorage, SlotStorage};
use std::{fmt, sync::Arc};
use tracing::error;

/// Immutable view of the list at one point in time.
pub type Snapshot = Arc<[Exercise]>;

type Listener = Box<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct ExerciseStore {
    exercises: Snapshot,
    storage: Box<dyn SlotStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ExerciseStore {
    /// Builds the store over `storage`, rehydrating whatever the slot holds.
    pub fn open(storage: impl SlotStorage + 'static) -> Self {
        let exercises = load_exercises(&storage);
        Self {
            exercises: exercises.into(),
            storage: Box::new(storage),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.exercises)
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Appends `exercise` as the newest entry. Ids are not checked for
    /// uniqueness here.
    pub fn add_exercise(&mut self, exercise: Exercise) {
        let mut next = Vec::with_capacity(self.exercises.len() + 1);
        next.extend_from_slice(&self.exercises);
        next.push(exercise);
        self.commit(next);
    }

    /// Drops the exercise with `id`; unknown ids leave the store untouched.
    pub fn remove_exercise(&mut self, id: &str) {
        if self.get(id).is_none() {
            return;
        }
        let next = self
            .exercises
            .iter()
            .filter(|exercise| exercise.id != id)
            .cloned()
            .collect();
        self.commit(next);
    }

    /// Overwrites the fields supplied in `patch` on the exercise with `id`.
    pub fn update_exercise(&mut self, id: &str, patch: &ExercisePatch) {
        if self.get(id).is_none() {
            return;
        }
        let next = self
            .exercises
            .iter()
            .map(|exercise| {
                if exercise.id == id {
                    patch.apply(exercise)
                } else {
                    exercise.clone()
                }
            })
            .collect();
        self.commit(next);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: Vec<Exercise>) {
        self.exercises = next.into();

        // The in-memory list stays authoritative when the slot can't be written.
        if let Err(err) = persist_exercises(self.storage.as_ref(), &self.exercises) {
            error!("failed to persist exercises: {err}");
        }

        for (_, listener) in &self.listeners {
            listener(&self.exercises);
        }
    }
}

impl fmt::Debug for ExerciseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseStore")
            .field("exercises", &self.exercises.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
