//! posekit-api-core: raw value model shared by posekit adapters (core, engine-agnostic)

pub mod json;
pub mod value;
pub mod value_type;

pub use json::{parse_raw_value, raw_value_to_json, JsonError};
pub use value::{RawValue, RawValueKind};
pub use value_type::{UnitType, ValueType};
