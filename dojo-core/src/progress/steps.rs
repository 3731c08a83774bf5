use std::collections::BTreeSet;

use crate::progress::store::ProgressStore;

/// Prefix of every lesson step-progress key.
pub const STEP_KEY_PREFIX: &str = "kiri-lesson-";

/// Completed steps of one lesson's step-by-step guide.
///
/// Every toggle is written through immediately. Without a lesson key the tracker is
/// read-only and toggles are ignored.
#[derive(Debug)]
pub struct StepTracker {
    store: ProgressStore,
    key: Option<String>,
    completed: BTreeSet<u32>,
}

impl StepTracker {
    /// Load saved progress for `lesson_key`, if any.
    pub fn restore(store: ProgressStore, lesson_key: Option<&str>) -> Self {
        let key = lesson_key
            .filter(|k| !k.is_empty())
            .map(|k| format!("{STEP_KEY_PREFIX}{k}"));
        let completed = key
            .as_deref()
            .and_then(|k| store.load::<Vec<u32>>(k))
            .map(|steps| steps.into_iter().collect())
            .unwrap_or_default();
        Self {
            store,
            key,
            completed,
        }
    }

    /// Key the progress is stored under.
    pub fn storage_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// `true` when toggles are persisted.
    pub fn is_interactive(&self) -> bool {
        self.key.is_some()
    }

    /// Whether step `number` is marked done.
    pub fn is_completed(&self, number: u32) -> bool {
        self.completed.contains(&number)
    }

    /// Completed step numbers, ascending.
    pub fn completed(&self) -> Vec<u32> {
        self.completed.iter().copied().collect()
    }

    /// Flip step `number` and persist. Returns its new state.
    pub fn toggle(&mut self, number: u32) -> bool {
        let Some(key) = self.key.as_deref() else {
            return self.is_completed(number);
        };
        let now_completed = if self.completed.remove(&number) {
            false
        } else {
            self.completed.insert(number);
            true
        };
        self.store.save(key, &self.completed());
        now_completed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/steps.rs"]
mod tests;
