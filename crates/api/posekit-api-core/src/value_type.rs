//! Value-type descriptors: parse a raw state or target into its internal
//! numeric representation. A key with no descriptor passes raw values
//! through untouched.

use crate::value::RawValue;

/// Per-key semantic type. Implemented by hosts for notation the stock
/// descriptors do not cover.
pub trait ValueType {
    /// Internal numeric representation of `raw`, or `None` when the raw
    /// value does not parse under this type.
    fn parse(&self, raw: &RawValue) -> Option<f32>;
}

/// Unit-suffixed numeric descriptor ("50px", "45deg", "80%"). Plain
/// numbers always parse; text must carry the expected suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitType {
    suffix: &'static str,
}

impl UnitType {
    pub const fn new(suffix: &'static str) -> Self {
        Self { suffix }
    }

    pub const fn px() -> Self {
        Self::new("px")
    }

    pub const fn degrees() -> Self {
        Self::new("deg")
    }

    pub const fn percent() -> Self {
        Self::new("%")
    }
}

impl ValueType for UnitType {
    fn parse(&self, raw: &RawValue) -> Option<f32> {
        match raw {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s
                .trim()
                .strip_suffix(self.suffix)
                .and_then(|t| t.trim().parse::<f32>().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_parses_suffixed_text() {
        let px = UnitType::px();
        assert_eq!(px.parse(&RawValue::text("50px")), Some(50.0));
        assert_eq!(px.parse(&RawValue::text(" -12.5px ")), Some(-12.5));
        assert_eq!(px.parse(&RawValue::n(3.0)), Some(3.0));
        assert_eq!(px.parse(&RawValue::text("50deg")), None);
        assert_eq!(UnitType::percent().parse(&RawValue::text("80%")), Some(80.0));
    }
}
