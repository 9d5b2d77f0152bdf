//! Binary codecs for SEGA Virtua Processor models and palettes
//!
//! This crate provides the pure data transforms shared between:
//! - `svp-host` (import/export glue for a mesh-editing host)
//! - anything else that needs to read or write `.svp` / `.pal` files
//!
//! # Modules
//!
//! - [`packing`] - 8.8 fixed point and 12-bit color packing helpers
//! - [`formats`] - SVP model and palette binary formats
//! - [`error`] - Codec error type
//!
//! Both codecs are stateless and operate on in-memory byte buffers only.

pub mod error;
pub mod formats;
pub mod packing;

pub use error::SvpError;

// Re-export commonly used packing items
pub use packing::{
    FIXED88_MAX, FIXED88_MIN, f32_to_fixed88_checked, f32_to_fixed88_wrapping, file_to_mesh_axes,
    fixed88_to_f32, mesh_to_file_axes, pack_md_color, unpack_md_color,
};

// Re-export commonly used format items
pub use formats::{
    // Model types
    BinarySerializable,
    DecodedModel,
    EncodeOptions,
    FLAG_CULL,
    FLAG_DITHER,
    FLAG_TRIANGLE,
    FLAG_ZSORT_MASK,
    Face,
    FaceHeader,
    MAX_FACES,
    Model,
    OverflowPolicy,
    // Palette types
    PALETTE_FILE_SIZE,
    PALETTE_SLOTS,
    Palette,
    // Constants
    SVP_MODEL_EXT,
    SVP_PALETTE_EXT,
    SvpModelHeader,
    // Codec entry points
    decode_model,
    decode_model_with_len,
    decode_palette,
    encode_model,
    encode_model_with,
    encode_palette,
    encoded_len,
};
