#![allow(dead_code)]
//! Live value slots: raw state plus rate-of-change tracking.

use posekit_api_core::RawValue;

/// Mutable observable state for one value key. At most one animation
/// drives a slot at any instant; the poser enforces that.
#[derive(Clone, Debug)]
pub struct ValueSlot {
    current: RawValue,
    velocity: f32,
}

impl ValueSlot {
    pub fn new(initial: RawValue) -> Self {
        Self {
            current: initial,
            velocity: 0.0,
        }
    }

    pub fn get(&self) -> &RawValue {
        &self.current
    }

    /// Units per second; 0.0 when unknown.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Driver write: track velocity from the previous state over `dt`
    /// seconds. Non-numeric transitions reset the tracked rate.
    pub fn update(&mut self, raw: RawValue, dt: f32) {
        if dt > 0.0 {
            match (self.current.as_number(), raw.as_number()) {
                (Some(prev), Some(next)) => self.velocity = (next - prev) / dt,
                _ => self.velocity = 0.0,
            }
        }
        self.current = raw;
    }

    /// Instant write; discards any tracked rate of change.
    pub fn set(&mut self, raw: RawValue) {
        self.current = raw;
        self.velocity = 0.0;
    }
}
