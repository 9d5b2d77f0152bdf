//! Coordinate and color packing utilities
//!
//! Provides the scalar conversions used by the SVP formats:
//! - f32 ↔ 8.8 signed fixed point (i16, scale 1/256)
//! - mesh axis order (X, Y, Z) ↔ file axis order (X, Z, Y)
//! - normalized RGB ↔ 12-bit Mega Drive style color word
//!
//! Used by both the model/palette codecs and `svp-host`.

use glam::Vec3;

// ============================================================================
// Fixed Point (8.8)
// ============================================================================

/// Scale between a coordinate and its 8.8 fixed point representation
pub const FIXED88_SCALE: f32 = 256.0;

/// Smallest coordinate representable in 8.8 fixed point
pub const FIXED88_MIN: f32 = i16::MIN as f32 / FIXED88_SCALE;

/// Largest coordinate representable in 8.8 fixed point
pub const FIXED88_MAX: f32 = i16::MAX as f32 / FIXED88_SCALE;

/// Convert an 8.8 fixed point value to f32
#[inline]
pub fn fixed88_to_f32(value: i16) -> f32 {
    value as f32 / FIXED88_SCALE
}

/// Convert f32 to 8.8 fixed point, truncating toward zero and wrapping
///
/// Existing SVP files were written this way: the scaled value is truncated
/// (not rounded) and only its low 16 bits are kept. Values outside
/// [`FIXED88_MIN`]..=[`FIXED88_MAX`] wrap around silently.
#[inline]
pub fn f32_to_fixed88_wrapping(value: f32) -> i16 {
    // f64 holds every finite f32 times 256 exactly, so the modulo sees the
    // true integer. NaN and infinities end up as 0.
    let scaled = (value as f64 * FIXED88_SCALE as f64).trunc();
    scaled.rem_euclid(65536.0) as u16 as i16
}

/// Convert f32 to 8.8 fixed point, truncating toward zero
///
/// Returns `None` if the truncated value does not fit in an i16.
#[inline]
pub fn f32_to_fixed88_checked(value: f32) -> Option<i16> {
    let scaled = (value * FIXED88_SCALE).trunc();
    if scaled.is_nan() || scaled < i16::MIN as f32 || scaled > i16::MAX as f32 {
        return None;
    }
    Some(scaled as i16)
}

// ============================================================================
// Axis Order
// ============================================================================

/// Reorder a vertex read from a file (X, Z, Y) into mesh order (X, Y, Z)
#[inline]
pub fn file_to_mesh_axes(file: [f32; 3]) -> Vec3 {
    Vec3::new(file[0], file[2], file[1])
}

/// Reorder a mesh vertex (X, Y, Z) into file order (X, Z, Y)
#[inline]
pub fn mesh_to_file_axes(position: Vec3) -> [f32; 3] {
    [position.x, position.z, position.y]
}

// ============================================================================
// Color Packing
// ============================================================================

/// Bits of each color nibble the hardware actually uses
const MD_CHANNEL_MASK: u16 = 0xE;

/// Channel divisor: the largest stored channel value
const MD_CHANNEL_MAX: f32 = 14.0;

/// Unpack a 12-bit color word to normalized RGB
///
/// Layout: `0000 BBB0 GGG0 RRR0`. Each channel keeps its top three bits,
/// giving the values 0, 2, .. 14, which map to 0.0..=1.0.
#[inline]
pub fn unpack_md_color(word: u16) -> Vec3 {
    let r = word & MD_CHANNEL_MASK;
    let g = (word & (MD_CHANNEL_MASK << 4)) >> 4;
    let b = (word & (MD_CHANNEL_MASK << 8)) >> 8;
    Vec3::new(
        r as f32 / MD_CHANNEL_MAX,
        g as f32 / MD_CHANNEL_MAX,
        b as f32 / MD_CHANNEL_MAX,
    )
}

/// Pack normalized RGB into a 12-bit color word
///
/// Inverse of [`unpack_md_color`] for colors on the 8-level grid. Channels are
/// clamped to 0.0..=1.0, scaled by 14 and rounded, then the low bit is
/// dropped.
#[inline]
pub fn pack_md_color(color: Vec3) -> u16 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * MD_CHANNEL_MAX).round() as u16 & MD_CHANNEL_MASK;
    channel(color.x) | (channel(color.y) << 4) | (channel(color.z) << 8)
}
