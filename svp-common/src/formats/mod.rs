//! SVP binary model and palette formats
//!
//! Both formats are big-endian and headerless apart from the model's face
//! count. There is no magic number, version or checksum: the format is
//! determined by context (file extension or which codec is called).
//!
//! The model and face headers implement the [`BinarySerializable`] trait for
//! consistent serialization/deserialization.

pub mod model;
pub mod palette;
mod serialization;

pub use model::*;
pub use palette::*;
pub use serialization::BinarySerializable;

/// File extension for SVP model files
pub const SVP_MODEL_EXT: &str = "svp";

/// File extension for SVP palette files
pub const SVP_PALETTE_EXT: &str = "pal";
