#![allow(dead_code)]
//! Transition resolution: decide what time-based behavior runs for one
//! value key under one pose.

use posekit_api_core::RawValue;

use crate::action::ActionSpec;
use crate::config::PoserConfig;
use crate::poser::SetOptions;

/// Everything a transition resolver may inspect for one value key.
#[derive(Clone, Debug)]
pub struct TransitionCtx {
    pub key: String,
    /// Current state, parsed through the key's type descriptor when one
    /// is registered.
    pub from: RawValue,
    /// Current rate of change; 0.0 when unavailable.
    pub velocity: f32,
    /// Target state, parsed the same way as `from`.
    pub to: RawValue,
    /// Pose that last started an animation for this key.
    pub prev_pose_key: Option<String>,
    /// The invocation's options, passed through untouched.
    pub options: SetOptions,
}

/// Outcome of resolving a transition.
#[derive(Clone, Debug)]
pub enum TransitionDecision {
    /// Run this behavior against the value's live state.
    Interpolate(ActionSpec),
    /// No transition: the poser writes the pose's unparsed target
    /// instantly, with no interpolation.
    Jump,
}

/// Process-wide fallback used when a pose carries no `transition`
/// resolver. Equal or non-numeric endpoints jump; numeric endpoints tween
/// with the config defaults.
pub fn default_transition(
    ctx: &TransitionCtx,
    cfg: &PoserConfig,
) -> Result<TransitionDecision, String> {
    let (Some(from), Some(to)) = (ctx.from.as_number(), ctx.to.as_number()) else {
        return Ok(TransitionDecision::Jump);
    };
    if (from - to).abs() <= f32::EPSILON {
        return Ok(TransitionDecision::Jump);
    }
    Ok(TransitionDecision::Interpolate(ActionSpec::tween(
        from,
        to,
        cfg.default_duration_ms,
        cfg.default_ease,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;

    fn ctx(from: RawValue, to: RawValue) -> TransitionCtx {
        TransitionCtx {
            key: "x".to_string(),
            from,
            velocity: 0.0,
            to,
            prev_pose_key: None,
            options: SetOptions::default(),
        }
    }

    #[test]
    fn numeric_endpoints_tween_with_config_defaults() {
        let cfg = PoserConfig::default();
        let decision = default_transition(&ctx(RawValue::n(0.0), RawValue::n(50.0)), &cfg)
            .expect("default transition never fails");
        match decision {
            TransitionDecision::Interpolate(spec) => match spec.kind {
                ActionKind::Tween {
                    from,
                    to,
                    duration_ms,
                    ease,
                } => {
                    assert_eq!((from, to), (0.0, 50.0));
                    assert_eq!(duration_ms, cfg.default_duration_ms);
                    assert_eq!(ease, cfg.default_ease);
                }
                other => panic!("expected tween, got {other:?}"),
            },
            TransitionDecision::Jump => panic!("expected interpolation"),
        }
    }

    #[test]
    fn equal_endpoints_jump() {
        let cfg = PoserConfig::default();
        let decision = default_transition(&ctx(RawValue::n(50.0), RawValue::n(50.0)), &cfg)
            .expect("default transition never fails");
        assert!(matches!(decision, TransitionDecision::Jump));
    }

    #[test]
    fn non_numeric_endpoints_jump() {
        let cfg = PoserConfig::default();
        let decision = default_transition(&ctx(RawValue::n(0.0), RawValue::text("hidden")), &cfg)
            .expect("default transition never fails");
        assert!(matches!(decision, TransitionDecision::Jump));
    }
}
