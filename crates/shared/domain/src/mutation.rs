//! Optimistic table edits.
//!
//! The client sends the row it currently shows plus the requested change. The change is
//! applied to a copy, the mutation is issued, and [`Optimistic::settle`] either keeps the
//! reconciled row or hands back the untouched snapshot.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Request body of an optimistic edit: the displayed row and the change to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRequest<S, C> {
    pub row: S,
    #[serde(flatten)]
    pub change: C,
}

/// A row with a change applied tentatively, remembering where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimistic<S> {
    snapshot: S,
    tentative: S,
}

/// A failed mutation: the snapshot to restore and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reverted<S> {
    pub row: S,
    pub message: String,
}

impl<S: Clone> Optimistic<S> {
    pub fn apply(snapshot: S, change: impl FnOnce(&mut S)) -> Self {
        let mut tentative = snapshot.clone();
        change(&mut tentative);
        Self { snapshot, tentative }
    }

    #[must_use]
    pub const fn tentative(&self) -> &S {
        &self.tentative
    }

    #[must_use]
    pub const fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// Reconciles with the mutation result.
    ///
    /// On success the server copy wins when one was returned, else the tentative row.
    /// On failure the snapshot is restored.
    pub fn settle<E: Display>(self, result: Result<Option<S>, E>) -> Result<S, Reverted<S>> {
        match result {
            Ok(server) => Ok(server.unwrap_or(self.tentative)),
            Err(err) => Err(Reverted { row: self.snapshot, message: err.to_string() }),
        }
    }
}
