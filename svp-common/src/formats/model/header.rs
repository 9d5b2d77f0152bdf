//! Model and face header structures

use crate::error::SvpError;

use super::Face;

/// Flag bits 0-3: z-sort hint (decode only)
pub const FLAG_ZSORT_MASK: u8 = 0x0F;
/// Flag bit 4: face is a triangle (clear = quad with a 4th vertex)
pub const FLAG_TRIANGLE: u8 = 0x10;
/// Flag bit 5: dither between the two palette colors
pub const FLAG_DITHER: u8 = 0x20;
/// Flag bit 6: backface culling enabled
pub const FLAG_CULL: u8 = 0x40;

/// Maximum faces in one model (16-bit count minus one)
pub const MAX_FACES: usize = u16::MAX as usize + 1;

/// Bytes per vertex (3 × i16)
pub const VERTEX_SIZE: usize = 6;
/// Bytes per triangle face record
pub const TRIANGLE_FACE_SIZE: usize = FaceHeader::SIZE + 3 * VERTEX_SIZE;
/// Bytes per quad face record
pub const QUAD_FACE_SIZE: usize = FaceHeader::SIZE + 4 * VERTEX_SIZE;

/// Color byte given to faces that never had one assigned (color 1 on color 1)
pub const DEFAULT_COLOR_BYTE: u8 = 0x11;

/// SVP model header (2 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvpModelHeader {
    /// Face count minus one, as stored on disk
    pub face_count_minus_one: u16,
}

impl SvpModelHeader {
    pub const SIZE: usize = 2;

    /// Header for a model with `face_count` faces
    ///
    /// Zero faces cannot be stored (0 on disk already means one face), and
    /// neither can more than [`MAX_FACES`].
    pub fn for_face_count(face_count: usize) -> Result<Self, SvpError> {
        if face_count == 0 {
            return Err(SvpError::EmptyModel);
        }
        let face_count_minus_one =
            u16::try_from(face_count - 1).map_err(|_| SvpError::TooManyFaces(face_count))?;
        Ok(Self {
            face_count_minus_one,
        })
    }

    /// Number of face records that follow the header
    pub fn face_count(&self) -> usize {
        self.face_count_minus_one as usize + 1
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.face_count_minus_one.to_be_bytes()
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            face_count_minus_one: u16::from_be_bytes([bytes[0], bytes[1]]),
        })
    }
}

/// Per-face header: color byte and flag byte (2 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceHeader {
    pub color_byte: u8,
    pub flags: u8,
}

impl FaceHeader {
    pub const SIZE: usize = 2;

    /// Header the encoder writes for `face`
    ///
    /// The z-sort bits are left clear.
    pub fn for_face(face: &Face) -> Self {
        let mut flags = 0;
        if face.dither {
            flags |= FLAG_DITHER;
        }
        if face.cull {
            flags |= FLAG_CULL;
        }
        if face.is_triangle() {
            flags |= FLAG_TRIANGLE;
        }
        Self {
            color_byte: face.color_byte,
            flags,
        }
    }

    /// Quad faces carry a 4th vertex
    #[inline]
    pub fn is_quad(&self) -> bool {
        self.flags & FLAG_TRIANGLE == 0
    }

    #[inline]
    pub fn dither(&self) -> bool {
        self.flags & FLAG_DITHER != 0
    }

    #[inline]
    pub fn cull(&self) -> bool {
        self.flags & FLAG_CULL != 0
    }

    #[inline]
    pub fn zsort(&self) -> u8 {
        self.flags & FLAG_ZSORT_MASK
    }

    /// Vertices that follow this header
    #[inline]
    pub fn vertex_count(&self) -> usize {
        if self.is_quad() { 4 } else { 3 }
    }

    /// Size of the whole face record, header included
    #[inline]
    pub fn record_size(&self) -> usize {
        if self.is_quad() {
            QUAD_FACE_SIZE
        } else {
            TRIANGLE_FACE_SIZE
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [self.color_byte, self.flags]
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            color_byte: bytes[0],
            flags: bytes[1],
        })
    }
}
