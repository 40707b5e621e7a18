#![allow(dead_code)]
//! Per-tick outputs from a poser.
//!
//! Outputs carry the raw-value writes for this tick, keyed by value key,
//! and a separate list of semantic events. Hosts apply changes to their
//! render state and transport events.

use serde::{Deserialize, Serialize};

use posekit_api_core::RawValue;

use crate::ids::TransitionId;

/// One value written this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub key: String,
    pub value: RawValue,
}

/// Discrete semantic signals emitted while driving transitions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum PoseEvent {
    /// Every per-value and per-child completion of the invocation
    /// resolved.
    TransitionCompleted { transition: TransitionId },
    /// The invocation failed terminally; carries the first failure.
    TransitionFailed {
        transition: TransitionId,
        message: String,
    },
}

/// Outputs accumulated since the previous driver tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<PoseEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: PoseEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
