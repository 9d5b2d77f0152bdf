//! Fixed-size header encoding shared by the SVP model codec.
//!
//! `SvpModelHeader` (the face count) and `FaceHeader` (color byte + flags)
//! are both two bytes. The decoder reads both through
//! `BinarySerializable::deserialize`; the encoder writes the fixed-size
//! arrays from the inherent `to_bytes()`.

/// A header with a fixed on-disk size.
///
/// `serialize` returns a `Vec<u8>` since `[u8; Self::SIZE]` cannot be named
/// in a trait signature on stable Rust.
///
/// # Example
///
/// ```
/// use svp_common::formats::{BinarySerializable, SvpModelHeader};
///
/// let header = SvpModelHeader::for_face_count(256).unwrap();
/// let bytes = header.serialize();
/// assert_eq!(bytes, [0x00, 0xFF]);
/// assert_eq!(SvpModelHeader::deserialize(&bytes).unwrap().face_count(), 256);
/// ```
pub trait BinarySerializable: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    fn serialize(&self) -> Vec<u8>;

    /// `None` if `bytes` is shorter than [`Self::SIZE`]
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::SvpModelHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::FaceHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
