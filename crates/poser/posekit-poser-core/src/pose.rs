#![allow(dead_code)]
//! Canonical pose data model.
//!
//! A pose is resolved at authoring time into an ordered set of
//! target-value entries plus explicit timing metadata; reserved timing
//! keys never appear among the targets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use posekit_api_core::RawValue;

use crate::transition::{TransitionCtx, TransitionDecision};

/// Pose library keyed by pose name. Immutable once a poser is built; the
/// derived flip variant is computed fresh per invocation, never stored.
pub type PoseMap = hashbrown::HashMap<String, Pose>;

/// Resolver closure attached to a pose. `None` falls back to the
/// process-wide default transition. Returning `Err` is fatal for that
/// value's animation.
pub type TransitionFn = Arc<dyn Fn(&TransitionCtx) -> Result<TransitionDecision, String>>;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaggerDirection {
    #[default]
    Forward,
    Reverse,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Target raw values in authoring order.
    pub targets: Vec<(String, RawValue)>,
    /// Delay before each of this pose's value animations starts (ms).
    /// A nonzero invocation-level delay takes precedence.
    #[serde(default)]
    pub delay: f32,
    /// Base delay applied to every cascaded child invocation (ms).
    #[serde(default)]
    pub delay_children: f32,
    /// Extra delay between consecutive children (ms).
    #[serde(default)]
    pub stagger_children: f32,
    #[serde(default)]
    pub stagger_direction: StaggerDirection,
    /// Derived pose: recomputed from measured geometry at set-time.
    #[serde(default)]
    pub flip: bool,
    #[serde(skip)]
    pub transition: Option<TransitionFn>,
}

impl std::fmt::Debug for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pose")
            .field("targets", &self.targets)
            .field("delay", &self.delay)
            .field("delay_children", &self.delay_children)
            .field("stagger_children", &self.stagger_children)
            .field("stagger_direction", &self.stagger_direction)
            .field("flip", &self.flip)
            .field("transition", &self.transition.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Pose {
    pub fn target(&self, key: &str) -> Option<&RawValue> {
        self.targets
            .iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|(k, _)| k.as_str())
    }

    /// Builder: append a target-value entry.
    pub fn with_target(mut self, key: &str, target: RawValue) -> Self {
        self.targets.push((key.to_string(), target));
        self
    }

    /// Builder: attach a transition resolver.
    pub fn with_transition<F>(mut self, f: F) -> Self
    where
        F: Fn(&TransitionCtx) -> Result<TransitionDecision, String> + 'static,
    {
        self.transition = Some(Arc::new(f));
        self
    }

    /// Validate basic invariants (finite non-negative delays, unique
    /// target keys).
    pub fn validate_basic(&self) -> Result<(), String> {
        for (name, v) in [
            ("delay", self.delay),
            ("delayChildren", self.delay_children),
            ("staggerChildren", self.stagger_children),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("pose timing '{name}' must be finite and >= 0"));
            }
        }
        for (i, (key, _)) in self.targets.iter().enumerate() {
            if self.targets[..i].iter().any(|(k, _)| k == key) {
                return Err(format!("duplicate target key '{key}'"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_target_keys_rejected() {
        let pose = Pose::default()
            .with_target("x", RawValue::n(1.0))
            .with_target("x", RawValue::n(2.0));
        assert!(pose.validate_basic().is_err());
    }

    #[test]
    fn negative_delay_rejected() {
        let pose = Pose {
            delay: -10.0,
            ..Default::default()
        };
        assert!(pose.validate_basic().is_err());
    }

    #[test]
    fn target_lookup_preserves_authoring_order() {
        let pose = Pose::default()
            .with_target("x", RawValue::n(1.0))
            .with_target("opacity", RawValue::n(0.5));
        assert_eq!(pose.keys().collect::<Vec<_>>(), vec!["x", "opacity"]);
        assert_eq!(pose.target("opacity"), Some(&RawValue::n(0.5)));
        assert_eq!(pose.target("nope"), None);
    }
}
