#![allow(dead_code)]
//! Declarative action specs and the per-tick stepping the driver runs.
//!
//! An [`ActionSpec`] is pure data: what to play, how long, behind what
//! delay, through which output clamps. [`ActiveAction`] is the live state
//! of one started spec; the poser holds at most one per value key.

use posekit_api_core::RawValue;
use serde::{Deserialize, Serialize};

use crate::bounds::Clamp;
use crate::ids::TransitionId;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseIn,
    EaseInOut,
}

impl Easing {
    /// Map normalized progress [0,1] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseIn => t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Time-based behavior for one value key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ActionKind {
    /// Eased interpolation between two parsed numeric endpoints.
    Tween {
        from: f32,
        to: f32,
        duration_ms: f32,
        ease: Easing,
    },
    /// Single write of the unparsed target.
    Instant { target: RawValue },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    /// Pure time-delay stage ahead of the behavior, in milliseconds; no
    /// update is emitted before it elapses.
    #[serde(default)]
    pub pre_delay_ms: f32,
    /// Output clamps composed onto every emitted numeric value, in order.
    #[serde(default)]
    pub clamps: Vec<Clamp>,
}

impl ActionSpec {
    pub fn tween(from: f32, to: f32, duration_ms: f32, ease: Easing) -> Self {
        Self {
            kind: ActionKind::Tween {
                from,
                to,
                duration_ms,
                ease,
            },
            pre_delay_ms: 0.0,
            clamps: Vec::new(),
        }
    }

    pub fn instant(target: RawValue) -> Self {
        Self {
            kind: ActionKind::Instant { target },
            pre_delay_ms: 0.0,
            clamps: Vec::new(),
        }
    }

    fn pipe(&self, v: f32) -> f32 {
        self.clamps.iter().fold(v, |v, c| c.apply(v))
    }

    /// True when starting this spec writes its target and completes with
    /// no driver tick at all.
    pub fn completes_synchronously(&self) -> bool {
        self.pre_delay_ms <= 0.0 && matches!(self.kind, ActionKind::Instant { .. })
    }

    /// Terminal value of an instant spec, clamps applied to numeric
    /// targets. `None` for tweens.
    pub fn instant_value(&self) -> Option<RawValue> {
        match &self.kind {
            ActionKind::Instant { target } => Some(match target.as_number() {
                Some(n) => RawValue::Number(self.pipe(n)),
                None => target.clone(),
            }),
            ActionKind::Tween { .. } => None,
        }
    }
}

/// Live state of one started action.
#[derive(Clone, Debug)]
pub struct ActiveAction {
    /// The invocation whose aggregate awaits this action.
    pub transition: TransitionId,
    pub spec: ActionSpec,
    pub elapsed_ms: f32,
}

/// What one driver step produced.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Still inside the pre-delay gate; nothing emitted.
    Waiting,
    /// Emitted a value this tick; more to come.
    Update(RawValue),
    /// Emitted its terminal value; the action is finished.
    Complete(RawValue),
}

impl ActiveAction {
    pub fn new(transition: TransitionId, spec: ActionSpec) -> Self {
        Self {
            transition,
            spec,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt` seconds and report what to write into the slot.
    /// The terminal tween write is the exact clamped endpoint.
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        self.elapsed_ms += dt * 1000.0;
        let local = self.elapsed_ms - self.spec.pre_delay_ms;
        if local < 0.0 {
            return StepOutcome::Waiting;
        }
        match &self.spec.kind {
            ActionKind::Instant { target } => {
                let out = match target.as_number() {
                    Some(n) => RawValue::Number(self.spec.pipe(n)),
                    None => target.clone(),
                };
                StepOutcome::Complete(out)
            }
            ActionKind::Tween {
                from,
                to,
                duration_ms,
                ease,
            } => {
                let p = if *duration_ms <= 0.0 {
                    1.0
                } else {
                    (local / duration_ms).min(1.0)
                };
                if p >= 1.0 {
                    StepOutcome::Complete(RawValue::Number(self.spec.pipe(*to)))
                } else {
                    let v = from + (to - from) * ease.apply(p);
                    StepOutcome::Update(RawValue::Number(self.spec.pipe(v)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_steps_to_exact_endpoint() {
        let mut action = ActiveAction::new(
            TransitionId(0),
            ActionSpec::tween(0.0, 50.0, 100.0, Easing::Linear),
        );
        match action.step(0.05) {
            StepOutcome::Update(RawValue::Number(v)) => assert!((v - 25.0).abs() < 1e-4),
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(
            action.step(0.05),
            StepOutcome::Complete(RawValue::Number(50.0))
        );
    }

    #[test]
    fn pre_delay_gates_all_output() {
        let mut spec = ActionSpec::tween(0.0, 10.0, 100.0, Easing::Linear);
        spec.pre_delay_ms = 100.0;
        let mut action = ActiveAction::new(TransitionId(0), spec);
        assert_eq!(action.step(0.05), StepOutcome::Waiting);
        // Crossing the gate starts the tween from its beginning.
        match action.step(0.05) {
            StepOutcome::Update(RawValue::Number(v)) => assert!(v.abs() < 1e-4),
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn clamps_apply_to_emitted_stream() {
        let mut spec = ActionSpec::tween(-50.0, 150.0, 100.0, Easing::Linear);
        spec.clamps = vec![Clamp::Min(0.0), Clamp::Max(100.0)];
        let mut action = ActiveAction::new(TransitionId(0), spec);
        match action.step(0.01) {
            StepOutcome::Update(RawValue::Number(v)) => assert_eq!(v, 0.0),
            other => panic!("expected clamped update, got {other:?}"),
        }
        let mut last = 0.0;
        loop {
            match action.step(0.01) {
                StepOutcome::Update(RawValue::Number(v)) => {
                    assert!((0.0..=100.0).contains(&v));
                    last = v;
                }
                StepOutcome::Complete(RawValue::Number(v)) => {
                    last = v;
                    break;
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn delayed_instant_completes_after_gate() {
        let mut spec = ActionSpec::instant(RawValue::text("hidden"));
        spec.pre_delay_ms = 50.0;
        assert!(!spec.completes_synchronously());
        let mut action = ActiveAction::new(TransitionId(0), spec);
        assert_eq!(action.step(0.02), StepOutcome::Waiting);
        assert_eq!(
            action.step(0.03),
            StepOutcome::Complete(RawValue::text("hidden"))
        );
    }
}
