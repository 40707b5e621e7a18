use serde_json::Value as JsonValue;

use posekit_api_core::json::parse_raw_value;

use crate::pose::{Pose, PoseMap, StaggerDirection};

/// Reserved timing/metadata keys of the stored pose notation. Every other
/// key of a pose object is a target-value entry.
pub const RESERVED_KEYS: [&str; 5] = [
    "delay",
    "delayChildren",
    "staggerChildren",
    "staggerDirection",
    "flip",
];

/// Public API: parse a stored pose map — the open-record notation
/// `{"open": {"x": 100, "delayChildren": 200}}` — into the canonical
/// [`PoseMap`].
///
/// Notes:
/// - All timing fields are milliseconds and kept as milliseconds.
/// - `staggerDirection` is authored as `1` (forward) or `-1` (reverse).
/// - The reserved-key split happens once here; a parsed [`Pose`] never
///   carries timing keys among its targets.
pub fn parse_pose_map_json(s: &str) -> Result<PoseMap, String> {
    let root: serde_json::Map<String, JsonValue> =
        serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;

    let mut poses = PoseMap::default();
    for (name, body) in root {
        let pose = parse_pose(&name, body)?;
        pose.validate_basic()
            .map_err(|e| format!("pose '{name}': {e}"))?;
        poses.insert(name, pose);
    }
    Ok(poses)
}

fn parse_pose(name: &str, body: JsonValue) -> Result<Pose, String> {
    let JsonValue::Object(obj) = body else {
        return Err(format!("pose '{name}' must be an object"));
    };

    let mut pose = Pose::default();
    for (key, val) in obj {
        match key.as_str() {
            "delay" => pose.delay = timing_field(name, &key, &val)?,
            "delayChildren" => pose.delay_children = timing_field(name, &key, &val)?,
            "staggerChildren" => pose.stagger_children = timing_field(name, &key, &val)?,
            "staggerDirection" => {
                pose.stagger_direction = match val.as_i64() {
                    Some(1) => StaggerDirection::Forward,
                    Some(-1) => StaggerDirection::Reverse,
                    _ => {
                        return Err(format!(
                            "pose '{name}': staggerDirection must be 1 or -1, got {val}"
                        ))
                    }
                }
            }
            "flip" => {
                pose.flip = val
                    .as_bool()
                    .ok_or_else(|| format!("pose '{name}': flip must be a boolean"))?
            }
            "transition" => {
                // Resolvers are code, not data; stored maps cannot carry them.
                log::warn!("pose '{name}': 'transition' is not representable in JSON, ignoring");
            }
            _ => {
                let raw = parse_raw_value(&val)
                    .map_err(|e| format!("pose '{name}' target '{key}': {e}"))?;
                pose.targets.push((key, raw));
            }
        }
    }
    Ok(pose)
}

fn timing_field(pose: &str, key: &str, val: &JsonValue) -> Result<f32, String> {
    val.as_f64()
        .map(|f| f as f32)
        .ok_or_else(|| format!("pose '{pose}': '{key}' must be a number, got {val}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use posekit_api_core::RawValue;

    #[test]
    fn reserved_keys_split_from_targets() {
        let poses = parse_pose_map_json(
            r#"{
                "open": {
                    "x": 100,
                    "opacity": 1,
                    "delay": 50,
                    "delayChildren": 200,
                    "staggerChildren": 100,
                    "staggerDirection": -1
                }
            }"#,
        )
        .expect("valid pose map");
        let open = poses.get("open").expect("pose present");
        assert_eq!(open.targets.len(), 2);
        assert_eq!(open.target("x"), Some(&RawValue::n(100.0)));
        assert_eq!(open.delay, 50.0);
        assert_eq!(open.delay_children, 200.0);
        assert_eq!(open.stagger_children, 100.0);
        assert_eq!(open.stagger_direction, StaggerDirection::Reverse);
        assert!(RESERVED_KEYS.iter().all(|k| open.target(k).is_none()));
    }

    #[test]
    fn text_targets_pass_through() {
        let poses = parse_pose_map_json(r#"{"closed": {"x": "-100px"}}"#).expect("valid");
        assert_eq!(
            poses.get("closed").and_then(|p| p.target("x")),
            Some(&RawValue::text("-100px"))
        );
    }

    #[test]
    fn flip_flag_parses() {
        let poses = parse_pose_map_json(r#"{"reorder": {"flip": true}}"#).expect("valid");
        assert!(poses.get("reorder").expect("pose present").flip);
    }

    #[test]
    fn malformed_shapes_error() {
        assert!(parse_pose_map_json(r#"{"open": 5}"#).is_err());
        assert!(parse_pose_map_json(r#"{"open": {"staggerDirection": 2}}"#).is_err());
        assert!(parse_pose_map_json(r#"{"open": {"delay": "soon"}}"#).is_err());
        assert!(parse_pose_map_json(r#"{"open": {"x": [1, 2]}}"#).is_err());
        assert!(parse_pose_map_json(r#"{"open": {"delay": -5}}"#).is_err());
    }
}
