//! Optimistic updates over a versioned clip view.
//!
//! Pure functions only: [`begin`] applies a mutation to the current view
//! and keeps the snapshot it started from, [`settle`] decides what the view
//! becomes once the store has answered. The cache in [`crate::cache`]
//! wires these to the store and the subscribers.

use std::sync::Arc;

use cliptrim_clip_model::{ClipId, ClipRecord};

/// Immutable snapshot of the clip list.
///
/// Every change produces a view with a higher version, which is what lets
/// the cache recognise a refresh that started before the change.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipView {
    version: u64,
    clips: Arc<Vec<ClipRecord>>,
}

impl ClipView {
    pub fn empty() -> Self {
        Self {
            version: 0,
            clips: Arc::new(Vec::new()),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn clips(&self) -> &[ClipRecord] {
        &self.clips
    }

    pub fn get(&self, id: &ClipId) -> Option<&ClipRecord> {
        self.clips.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: &ClipId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Successor view holding `clips`.
    pub fn next(&self, clips: Vec<ClipRecord>) -> Self {
        Self {
            version: self.version + 1,
            clips: Arc::new(clips),
        }
    }

    /// Successor view sharing the clip list of `earlier`.
    fn restored(&self, earlier: &ClipView) -> Self {
        Self {
            version: self.version + 1,
            clips: Arc::clone(&earlier.clips),
        }
    }
}

impl Default for ClipView {
    fn default() -> Self {
        Self::empty()
    }
}

/// A change to the clip list.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Drop the record with this id.
    Remove(ClipId),
    /// Replace the record with the same id, or append it.
    Upsert(ClipRecord),
}

impl Mutation {
    /// Id of the record this mutation touches.
    pub fn key(&self) -> &ClipId {
        match self {
            Mutation::Remove(id) => id,
            Mutation::Upsert(record) => record.id(),
        }
    }

    pub fn apply(&self, clips: &[ClipRecord]) -> Vec<ClipRecord> {
        match self {
            Mutation::Remove(id) => clips.iter().filter(|c| c.id() != id).cloned().collect(),
            Mutation::Upsert(record) => {
                let mut next = clips.to_vec();
                match next.iter_mut().find(|c| c.id() == record.id()) {
                    Some(existing) => *existing = record.clone(),
                    None => next.push(record.clone()),
                }
                next
            }
        }
    }
}

/// An applied but unconfirmed mutation.
#[derive(Debug, Clone)]
pub struct Speculation {
    /// The view before the mutation.
    pub snapshot: ClipView,
    /// The view with the mutation applied.
    pub view: ClipView,
    pub mutation: Mutation,
}

/// How a speculation ended.
#[derive(Debug)]
pub enum Settled<E> {
    /// The store accepted the change; the current view stands.
    Committed,
    /// The store rejected the change. `view` is the snapshot under a new
    /// version. If other ids changed since, only the touched record is put
    /// back and the rest keep their current state.
    RolledBack { view: ClipView, error: E },
}

/// Apply `mutation` to `current`.
pub fn begin(current: &ClipView, mutation: Mutation) -> Speculation {
    let view = current.next(mutation.apply(current.clips()));
    Speculation {
        snapshot: current.clone(),
        view,
        mutation,
    }
}

/// Resolve a speculation against the view as it is now.
pub fn settle<E>(current: &ClipView, speculation: Speculation, outcome: Result<(), E>) -> Settled<E> {
    match outcome {
        Ok(()) => Settled::Committed,
        Err(error) => {
            let view = if current.clips == speculation.view.clips {
                current.restored(&speculation.snapshot)
            } else {
                current.next(restore_key(current, &speculation))
            };
            Settled::RolledBack { view, error }
        }
    }
}

fn restore_key(current: &ClipView, speculation: &Speculation) -> Vec<ClipRecord> {
    let key = speculation.mutation.key();
    let mut clips: Vec<ClipRecord> = current
        .clips()
        .iter()
        .filter(|c| c.id() != key)
        .cloned()
        .collect();
    let original = speculation
        .snapshot
        .clips()
        .iter()
        .position(|c| c.id() == key);
    if let Some(index) = original {
        let record = speculation.snapshot.clips()[index].clone();
        clips.insert(index.min(clips.len()), record);
    }
    clips
}
