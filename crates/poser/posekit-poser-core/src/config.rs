#![allow(dead_code)]
//! Poser configuration.

use serde::{Deserialize, Serialize};

use crate::action::Easing;

/// Defaults used when a pose carries no transition resolver of its own.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PoserConfig {
    /// Default tween length in milliseconds.
    pub default_duration_ms: f32,
    pub default_ease: Easing,
}

impl Default for PoserConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 300.0,
            default_ease: Easing::EaseOut,
        }
    }
}
