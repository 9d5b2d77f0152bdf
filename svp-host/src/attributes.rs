//! Per-face attribute layers
//!
//! A host mesh carries SVP face data as four named integer layers. The
//! import path creates all four; the export path reads them, falling back to
//! each layer's default when a mesh never had one.

use svp_common::formats::DEFAULT_COLOR_BYTE;

/// One of the four per-face integer layers SVP data lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceAttribute {
    /// Packed color byte (color 1 in the high nibble, color 2 in the low)
    PaletteIds,
    /// Dither flag (0 or 1)
    DitherIds,
    /// Backface culling flag (0 or 1)
    CullIds,
    /// Z-sort hint (0-15)
    FlagIds,
}

impl FaceAttribute {
    pub const ALL: [FaceAttribute; 4] = [
        FaceAttribute::PaletteIds,
        FaceAttribute::DitherIds,
        FaceAttribute::CullIds,
        FaceAttribute::FlagIds,
    ];

    /// Layer name used by the host
    pub fn layer_name(self) -> &'static str {
        match self {
            FaceAttribute::PaletteIds => "palette_ids",
            FaceAttribute::DitherIds => "dither_ids",
            FaceAttribute::CullIds => "cull_ids",
            FaceAttribute::FlagIds => "flag_ids",
        }
    }

    pub fn from_layer_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.layer_name() == name)
    }

    /// Value a newly created layer is filled with
    pub fn default_value(self) -> i32 {
        match self {
            FaceAttribute::PaletteIds => DEFAULT_COLOR_BYTE as i32,
            FaceAttribute::DitherIds | FaceAttribute::CullIds | FaceAttribute::FlagIds => 0,
        }
    }
}

/// Per-face attribute access a host mesh exposes to the SVP glue
pub trait MeshAttributeStore {
    fn face_count(&self) -> usize;

    fn has_layer(&self, attribute: FaceAttribute) -> bool;

    /// Create `attribute`'s layer filled with its default value
    ///
    /// Returns `true` if the layer was created, `false` if it already existed.
    fn ensure_layer(&mut self, attribute: FaceAttribute) -> bool;

    /// Raw layer value, or `None` if the layer is missing or `face` is out of range
    fn face_attribute(&self, face: usize, attribute: FaceAttribute) -> Option<i32>;

    /// Write a layer value, creating the layer first if needed
    ///
    /// Out of range faces are ignored.
    fn set_face_attribute(&mut self, face: usize, attribute: FaceAttribute, value: i32);

    fn is_face_selected(&self, face: usize) -> bool;

    /// Layer value with the layer default standing in for a missing layer
    fn face_attribute_or_default(&self, face: usize, attribute: FaceAttribute) -> i32 {
        self.face_attribute(face, attribute)
            .unwrap_or_else(|| attribute.default_value())
    }
}
