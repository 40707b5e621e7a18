#![allow(dead_code)]
//! Drag boundary clamping for spatial axis keys.
//!
//! Clamps apply to an action's emitted output stream only; target
//! resolution is never altered.

use serde::{Deserialize, Serialize};

/// Pose names that mark a drag-initiated transition.
pub const DRAG_POSES: [&str; 2] = ["dragging", "dragEnd"];

pub fn is_drag_pose(name: &str) -> bool {
    DRAG_POSES.contains(&name)
}

/// Per-axis numeric bounds enforced while dragging. Any bound may be
/// absent independently.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DragBounds {
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub right: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
    #[serde(default)]
    pub bottom: Option<f32>,
    #[serde(default)]
    pub far: Option<f32>,
    #[serde(default)]
    pub near: Option<f32>,
}

/// Lower/upper bound pair for one spatial axis key, or `None` when the key
/// is not a recognized axis.
fn axis_bounds(bounds: &DragBounds, key: &str) -> Option<(Option<f32>, Option<f32>)> {
    match key {
        "x" => Some((bounds.left, bounds.right)),
        "y" => Some((bounds.top, bounds.bottom)),
        "z" => Some((bounds.far, bounds.near)),
        _ => None,
    }
}

/// A single clamp composed onto an action's output stream.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Clamp {
    /// Enforce a lower bound (max with the bound).
    Min(f32),
    /// Enforce an upper bound (min with the bound).
    Max(f32),
}

impl Clamp {
    #[inline]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            Clamp::Min(b) => v.max(b),
            Clamp::Max(b) => v.min(b),
        }
    }
}

/// Clamps for `key` under `bounds`. At most two entries; empty when the
/// key maps to no axis or no bound is configured for it.
pub fn clamps_for(bounds: &DragBounds, key: &str) -> Vec<Clamp> {
    let mut clamps = Vec::new();
    if let Some((min, max)) = axis_bounds(bounds, key) {
        if let Some(b) = min {
            clamps.push(Clamp::Min(b));
        }
        if let Some(b) = max {
            clamps.push(Clamp::Max(b));
        }
    }
    clamps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_sides() {
        let bounds = DragBounds {
            left: Some(0.0),
            right: Some(100.0),
            ..Default::default()
        };
        let clamps = clamps_for(&bounds, "x");
        assert_eq!(clamps.len(), 2);
        let pipe = |v: f32| clamps.iter().fold(v, |v, c| c.apply(v));
        assert_eq!(pipe(-10.0), 0.0);
        assert_eq!(pipe(50.0), 50.0);
        assert_eq!(pipe(250.0), 100.0);
    }

    #[test]
    fn one_sided_bound_leaves_other_side_open() {
        let bounds = DragBounds {
            left: Some(0.0),
            ..Default::default()
        };
        let clamps = clamps_for(&bounds, "x");
        assert_eq!(clamps, vec![Clamp::Min(0.0)]);
        assert_eq!(clamps[0].apply(1e6), 1e6);
    }

    #[test]
    fn axis_table_covers_xyz_only() {
        let bounds = DragBounds {
            top: Some(1.0),
            bottom: Some(2.0),
            far: Some(3.0),
            near: Some(4.0),
            ..Default::default()
        };
        assert_eq!(clamps_for(&bounds, "y"), vec![Clamp::Min(1.0), Clamp::Max(2.0)]);
        assert_eq!(clamps_for(&bounds, "z"), vec![Clamp::Min(3.0), Clamp::Max(4.0)]);
        assert!(clamps_for(&bounds, "opacity").is_empty());
    }

    #[test]
    fn drag_pose_set_membership() {
        assert!(is_drag_pose("dragging"));
        assert!(is_drag_pose("dragEnd"));
        assert!(!is_drag_pose("open"));
    }
}
