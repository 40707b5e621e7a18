//! RawValue: the raw state a poser reads and writes.
//! All numeric state uses f32.

use serde::{Deserialize, Serialize};

/// Lightweight kind enum for pattern-matching and quick dispatch without
/// touching the payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RawValueKind {
    Number,
    Text,
}

/// A raw value as authored in a pose or held by a live value slot. Text
/// values carry unit suffixes ("50px") or other host notation; a value-type
/// descriptor turns them into numbers when interpolation needs one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    /// Plain numeric state
    Number(f32),

    /// Host-notation state; opaque to interpolation without a descriptor
    Text(String),
}

impl RawValue {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> RawValueKind {
        match self {
            RawValue::Number(_) => RawValueKind::Number,
            RawValue::Text(_) => RawValueKind::Text,
        }
    }

    /// Numeric payload, if this is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(_) => None,
        }
    }

    /// Convenience constructors
    pub fn n(v: f32) -> Self {
        RawValue::Number(v)
    }

    pub fn text(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}
