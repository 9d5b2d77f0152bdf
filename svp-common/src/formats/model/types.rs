//! Model data structures

use glam::Vec3;
use smallvec::SmallVec;

use super::{DEFAULT_COLOR_BYTE, QUAD_FACE_SIZE, TRIANGLE_FACE_SIZE};

/// One polygon of an SVP model
///
/// Decoded faces always have 3 or 4 positions. Faces built by hand may hold
/// any number; the encoder rejects those with
/// [`SvpError::UnsupportedTopology`](crate::SvpError::UnsupportedTopology).
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertex positions in X, Y, Z order
    pub positions: SmallVec<[Vec3; 4]>,
    /// High nibble = color index 1, low nibble = color index 2
    pub color_byte: u8,
    /// Dither between the two colors
    pub dither: bool,
    /// Backface culling
    pub cull: bool,
    /// Z-sort hint (4 bits). Read on decode, not written on encode.
    pub zsort: u8,
}

impl Face {
    /// Face with the given positions and default attributes
    pub fn new(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            color_byte: DEFAULT_COLOR_BYTE,
            dither: false,
            cull: false,
            zsort: 0,
        }
    }

    pub fn triangle(positions: [Vec3; 3]) -> Self {
        Self::new(positions)
    }

    pub fn quad(positions: [Vec3; 4]) -> Self {
        Self::new(positions)
    }

    /// Set both palette indices (each 0-15)
    pub fn with_colors(mut self, color1: u8, color2: u8) -> Self {
        self.color_byte = ((color1 & 0xF) << 4) | (color2 & 0xF);
        self
    }

    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    pub fn with_cull(mut self, cull: bool) -> Self {
        self.cull = cull;
        self
    }

    pub fn with_zsort(mut self, zsort: u8) -> Self {
        self.zsort = zsort & 0xF;
        self
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.positions.len() == 3
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        self.positions.len() == 4
    }

    /// First palette index (high nibble of the color byte)
    #[inline]
    pub fn color1(&self) -> u8 {
        self.color_byte >> 4
    }

    /// Second palette index (low nibble of the color byte)
    #[inline]
    pub fn color2(&self) -> u8 {
        self.color_byte & 0xF
    }

    /// Encoded size of this face, or `None` if it is not a triangle or quad
    pub fn encoded_size(&self) -> Option<usize> {
        match self.positions.len() {
            3 => Some(TRIANGLE_FACE_SIZE),
            4 => Some(QUAD_FACE_SIZE),
            _ => None,
        }
    }
}

/// An SVP model: an ordered list of faces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    faces: Vec<Face>,
}

impl Model {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Total vertices across all faces (no sharing between faces)
    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(Face::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_triangle()).count()
    }

    pub fn quad_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_quad()).count()
    }
}

impl FromIterator<Face> for Model {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A decoded model together with the number of bytes it occupied
///
/// Lets callers walk several models stored back to back in one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedModel {
    pub model: Model,
    pub consumed: usize,
}
