//! SVP palette binary format (.pal)
//!
//! Sixteen 12-bit color words, big-endian, no header.
//!
//! # Layout
//! ```text
//! 0x00: color[0]  u16 BE   - 0000 BBB0 GGG0 RRR0
//! 0x02: color[1]  u16 BE
//! ...
//! 0x1E: color[15] u16 BE
//! ```
//!
//! Loading is lenient: a short file fills as many slots as it has complete
//! words for and leaves the rest untouched. Existing palette files shorter
//! than 32 bytes load this way, so a short read is not an error.

use glam::Vec3;

use crate::packing::{pack_md_color, unpack_md_color};

/// Number of palette slots
pub const PALETTE_SLOTS: usize = 16;

/// Size of a complete palette file
pub const PALETTE_FILE_SIZE: usize = PALETTE_SLOTS * 2;

/// 16-color palette, one normalized RGB color per slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Palette {
    pub colors: [Vec3; PALETTE_SLOTS],
}

impl Palette {
    pub fn new(colors: [Vec3; PALETTE_SLOTS]) -> Self {
        Self { colors }
    }

    /// Color in `slot`, or `None` past the last slot
    pub fn get(&self, slot: usize) -> Option<Vec3> {
        self.colors.get(slot).copied()
    }

    /// Overwrite slots from palette file bytes
    ///
    /// Slots are written in order for every complete 16-bit word, up to 16.
    /// Slots without a word keep their current color. Returns the number of
    /// slots written.
    pub fn load(&mut self, data: &[u8]) -> usize {
        let mut loaded = 0;
        for (slot, word) in self.colors.iter_mut().zip(data.chunks_exact(2)) {
            *slot = unpack_md_color(u16::from_be_bytes([word[0], word[1]]));
            loaded += 1;
        }

        if loaded < PALETTE_SLOTS {
            tracing::warn!(
                loaded,
                bytes = data.len(),
                "Short palette data, remaining slots left unchanged"
            );
        }
        loaded
    }
}

/// Decode a palette file into a fresh palette
///
/// Slots missing from a short file stay black.
pub fn decode_palette(data: &[u8]) -> Palette {
    let mut palette = Palette::default();
    palette.load(data);
    palette
}

/// Encode a palette to file bytes
///
/// Channels are packed with [`pack_md_color`](crate::packing::pack_md_color).
pub fn encode_palette(palette: &Palette) -> [u8; PALETTE_FILE_SIZE] {
    let mut bytes = [0u8; PALETTE_FILE_SIZE];
    for (chunk, color) in bytes.chunks_exact_mut(2).zip(palette.colors.iter()) {
        chunk.copy_from_slice(&pack_md_color(*color).to_be_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_blue_slot() {
        let palette = decode_palette(&[0x0E, 0x00]);
        assert_eq!(palette.colors[0], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_decode_full_palette_in_order() {
        let mut data = Vec::new();
        for i in 0..16u16 {
            // Walk the red channel through its levels, mark green on odd slots
            let word = ((i % 8) * 2) | if i % 2 == 1 { 0x00E0 } else { 0 };
            data.extend_from_slice(&word.to_be_bytes());
        }
        let palette = decode_palette(&data);

        for (i, color) in palette.colors.iter().enumerate() {
            assert_eq!(color.x, ((i % 8) * 2) as f32 / 14.0, "slot {i}");
            assert_eq!(color.y, if i % 2 == 1 { 1.0 } else { 0.0 }, "slot {i}");
            assert_eq!(color.z, 0.0);
        }
    }

    #[test]
    fn test_short_data_keeps_prior_slots() {
        let mut palette = Palette::new([Vec3::ONE; PALETTE_SLOTS]);
        // Two full words and a dangling byte
        let loaded = palette.load(&[0x00, 0x00, 0x0E, 0x00, 0x0E]);

        assert_eq!(loaded, 2);
        assert_eq!(palette.colors[0], Vec3::ZERO);
        assert_eq!(palette.colors[1], Vec3::new(0.0, 0.0, 1.0));
        assert!(palette.colors[2..].iter().all(|c| *c == Vec3::ONE));
    }

    #[test]
    fn test_empty_data_loads_nothing() {
        let mut palette = Palette::new([Vec3::ONE; PALETTE_SLOTS]);
        assert_eq!(palette.load(&[]), 0);
        assert_eq!(palette, Palette::new([Vec3::ONE; PALETTE_SLOTS]));
        assert_eq!(decode_palette(&[]), Palette::default());
    }

    #[test]
    fn test_extra_data_ignored() {
        let mut data = vec![0u8; PALETTE_FILE_SIZE];
        data.extend_from_slice(&[0x0E, 0xEE]);
        let mut palette = Palette::default();
        assert_eq!(palette.load(&data), PALETTE_SLOTS);
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut data = Vec::new();
        for i in 0..16u16 {
            let word = (i * 0x0246) & 0x0EEE;
            data.extend_from_slice(&word.to_be_bytes());
        }
        let palette = decode_palette(&data);
        assert_eq!(encode_palette(&palette).to_vec(), data);
    }

    #[test]
    fn test_encode_drops_unused_bits() {
        let palette = decode_palette(&[0xFF, 0xFF]);
        assert_eq!(palette.colors[0], Vec3::ONE);
        assert_eq!(encode_palette(&palette)[0..2], [0x0E, 0xEE]);
    }

    #[test]
    fn test_get_slot() {
        let palette = decode_palette(&[0x00, 0x0E]);
        assert_eq!(palette.get(0), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(palette.get(15), Some(Vec3::ZERO));
        assert_eq!(palette.get(16), None);
    }
}
