//! CPU-side viewport preview data
//!
//! Flattens mesh faces into a non-indexed triangle list carrying both face
//! colors and the dither flag, so a renderer can draw SVP faces the way the
//! hardware shows them. Nothing here touches a GPU.

use glam::Vec3;
use svp_common::{PALETTE_SLOTS, Palette};

use crate::attributes::{FaceAttribute, MeshAttributeStore};
use crate::mesh::HostMesh;
use crate::scene::Scene;

/// Corner order for a triangle face
const TRIANGLE_CORNERS: [usize; 3] = [0, 1, 2];

/// Corner order for a quad face, split into (0, 1, 2) and (2, 3, 0)
const QUAD_CORNERS: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Side of one dither cell in pixels
const DITHER_CELL: f32 = 3.0;

/// Per-vertex preview data
///
/// Layout matches a vertex buffer with four attributes: position (location 0),
/// color 1 (1), color 2 (2), dither (3).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PreviewVertex {
    pub position: [f32; 3],
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    /// 0.0 for solid faces, 1.0 for checkerboard dithered faces
    pub dither: f32,
}

/// Preview triangles of one mesh node
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewBatch {
    pub name: String,
    pub vertices: Vec<PreviewVertex>,
}

impl PreviewBatch {
    /// Vertex data ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        preview_bytes(&self.vertices)
    }
}

/// Palette as RGBA, with slot 0 fully transparent
pub fn palette_rgba(palette: &Palette) -> [[f32; 4]; PALETTE_SLOTS] {
    let mut rgba = [[0.0; 4]; PALETTE_SLOTS];
    for (slot, (out, color)) in rgba.iter_mut().zip(palette.colors).enumerate() {
        let alpha = if slot == 0 { 0.0 } else { 1.0 };
        *out = color.extend(alpha).to_array();
    }
    rgba
}

/// Build the preview triangle list of one mesh
///
/// Faces that are not triangles or quads are skipped. Missing attribute
/// layers read as their defaults.
pub fn build_preview(mesh: &HostMesh, palette: &Palette) -> Vec<PreviewVertex> {
    let rgba = palette_rgba(palette);
    let mut vertices = Vec::with_capacity(mesh.face_count() * QUAD_CORNERS.len());
    let mut skipped = 0;

    for face in 0..mesh.face_count() {
        let corners: Vec<Vec3> = mesh.face_positions(face).collect();
        let order: &[usize] = match corners.len() {
            3 => &TRIANGLE_CORNERS,
            4 => &QUAD_CORNERS,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let color = mesh.face_attribute_or_default(face, FaceAttribute::PaletteIds);
        let color1 = rgba[((color >> 4) & 0xF) as usize];
        let color2 = rgba[(color & 0xF) as usize];
        let dither = mesh.face_attribute_or_default(face, FaceAttribute::DitherIds) as f32;

        vertices.extend(order.iter().map(|&corner| PreviewVertex {
            position: corners[corner].to_array(),
            color1,
            color2,
            dither,
        }));
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} faces with unsupported vertex counts in preview", skipped);
    }
    vertices
}

/// Build preview batches for every mesh node, in scene order
pub fn build_scene_preview(scene: &Scene, palette: &Palette) -> Vec<PreviewBatch> {
    scene
        .mesh_nodes()
        .map(|(name, mesh)| PreviewBatch {
            name: name.to_string(),
            vertices: build_preview(mesh, palette),
        })
        .collect()
}

/// Reinterpret preview vertices as raw bytes
pub fn preview_bytes(vertices: &[PreviewVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Which face color a fragment shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherPick {
    Color1,
    Color2,
}

/// Color choice for the fragment at window position (`x`, `y`)
///
/// The window is split into 3x3 pixel cells. Solid faces alternate by
/// column, dithered faces form a checkerboard.
pub fn dither_pick(x: f32, y: f32, dither: f32) -> DitherPick {
    // GLSL sign(): zero stays zero
    let sign = if dither > 0.0 {
        1.0
    } else if dither < 0.0 {
        -1.0
    } else {
        0.0
    };
    let cell = (x / DITHER_CELL).floor() + (y / DITHER_CELL).floor() * sign;
    if cell.rem_euclid(2.0) == 0.0 {
        DitherPick::Color1
    } else {
        DitherPick::Color2
    }
}
