#![allow(dead_code)]
//! Derived ("flip") poses computed from measured geometry at set-time.

use crate::pose::Pose;

/// Reserved pose name that is always treated as derived.
pub const FLIP_POSE: &str = "flip";

/// Host-side collaborator that rewrites a pose from the current measured
/// state. Pure from the poser's point of view: no poser state is read or
/// written through it.
pub trait FlipResolver {
    fn flip_pose(&mut self, name: &str, pose: &Pose) -> Pose;
}

/// A pose participates in flip derivation when flagged or when it uses
/// the reserved name.
pub fn is_flip_pose(name: &str, pose: &Pose) -> bool {
    pose.flip || name == FLIP_POSE
}
