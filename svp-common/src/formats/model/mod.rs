//! SVP model binary format (.svp)
//!
//! Fixed-function polygon model for the SEGA Virtua Processor. Every face owns
//! its vertices; there is no shared vertex table and no index buffer.
//!
//! # Layout
//! ```text
//! Header (2 bytes):
//! 0x00: face_count_minus_one u16 BE   - 0 means one face, 0xFFFF means 65536
//!
//! Face records (repeated face_count times, 20 or 26 bytes each):
//! +0: color_byte u8   - high nibble = color index 1, low nibble = color index 2
//! +1: flags u8        - bit 4 set = triangle, clear = quad
//!                       bit 5 = dither, bit 6 = cull, bits 0-3 = z-sort hint
//! +2: i16 BE × 9      - 3 vertices, each X, Z, Y in 8.8 fixed point
//! +20: i16 BE × 3     - 4th vertex (quads only)
//! ```
//!
//! Positions are exposed in X, Y, Z order; the Y and Z axes are swapped on
//! both decode and encode.
//!
//! The z-sort bits are decoded but never written back: encoding always emits
//! zero in bits 0-3, matching the tools that produced the existing file corpus.

mod decode;
mod encode;
mod header;
mod types;


// Re-export public API
pub use decode::{decode_model, decode_model_with_len};
pub use encode::{EncodeOptions, OverflowPolicy, encode_model, encode_model_with, encoded_len};
pub use header::{
    DEFAULT_COLOR_BYTE, FLAG_CULL, FLAG_DITHER, FLAG_TRIANGLE, FLAG_ZSORT_MASK, FaceHeader,
    MAX_FACES, QUAD_FACE_SIZE, SvpModelHeader, TRIANGLE_FACE_SIZE, VERTEX_SIZE,
};
pub use types::{DecodedModel, Face, Model};
