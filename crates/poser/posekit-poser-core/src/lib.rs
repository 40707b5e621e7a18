#![allow(dead_code)]
//! Posekit Poser Core (engine-agnostic)
//!
//! Pose-transition orchestration: resolving a named pose into per-value
//! actions, cancelling superseded animations, composing delay/boundary/
//! transition behavior, staggering child cascades, and aggregating every
//! resulting completion into one observable signal. Playback is driven by
//! the host's per-frame tick through [`Poser::advance`].

pub mod action;
pub mod bounds;
pub mod config;
pub mod error;
pub mod flip;
pub mod ids;
pub mod outputs;
pub mod pose;
pub mod poser;
pub mod slot;
pub mod stagger;
pub mod stored_pose;
pub mod transition;

// Re-exports for consumers (adapters)
pub use action::{ActionKind, ActionSpec, ActiveAction, Easing, StepOutcome};
pub use bounds::{clamps_for, is_drag_pose, Clamp, DragBounds, DRAG_POSES};
pub use config::PoserConfig;
pub use error::PoseError;
pub use flip::{is_flip_pose, FlipResolver, FLIP_POSE};
pub use ids::{ChildId, IdAllocator, TransitionId};
pub use outputs::{Change, Outputs, PoseEvent};
pub use pose::{Pose, PoseMap, StaggerDirection, TransitionFn};
pub use poser::{Poser, PoserProps, SetOptions, TransitionStatus};
pub use slot::ValueSlot;
pub use stagger::stagger_delay;
pub use stored_pose::parse_pose_map_json;
pub use transition::{default_transition, TransitionCtx, TransitionDecision};
pub use posekit_api_core::{RawValue, RawValueKind, UnitType, ValueType};
