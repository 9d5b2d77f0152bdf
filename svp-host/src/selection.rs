//! Selection-averaged face properties
//!
//! Editing panels show one value for "the selected faces": the value every
//! selected face (across every mesh in the scene) agrees on, or nothing when
//! they differ. Setting a value writes it to every selected face.

use crate::attributes::{FaceAttribute, MeshAttributeStore};
use crate::error::HostError;
use crate::scene::Scene;

/// Editable face property, possibly a bit field of one attribute layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    /// High nibble of `palette_ids`
    Color1,
    /// Low nibble of `palette_ids`
    Color2,
    Dither,
    Cull,
    /// Z-sort hint in `flag_ids`
    ZSort,
}

impl SelectionField {
    pub fn name(self) -> &'static str {
        match self {
            SelectionField::Color1 => "color1",
            SelectionField::Color2 => "color2",
            SelectionField::Dither => "dither",
            SelectionField::Cull => "cull",
            SelectionField::ZSort => "zsort",
        }
    }

    pub fn attribute(self) -> FaceAttribute {
        match self {
            SelectionField::Color1 | SelectionField::Color2 => FaceAttribute::PaletteIds,
            SelectionField::Dither => FaceAttribute::DitherIds,
            SelectionField::Cull => FaceAttribute::CullIds,
            SelectionField::ZSort => FaceAttribute::FlagIds,
        }
    }

    /// Largest value the field accepts
    pub fn max(self) -> i32 {
        match self {
            SelectionField::Color1 | SelectionField::Color2 | SelectionField::ZSort => 15,
            SelectionField::Dither | SelectionField::Cull => 1,
        }
    }

    /// Field value within a raw layer value
    fn extract(self, raw: i32) -> i32 {
        match self {
            SelectionField::Color1 => (raw >> 4) & 0xF,
            SelectionField::Color2 => raw & 0xF,
            SelectionField::Dither | SelectionField::Cull | SelectionField::ZSort => raw,
        }
    }

    /// Raw layer value with the field replaced
    fn merge(self, raw: i32, value: i32) -> i32 {
        match self {
            SelectionField::Color1 => (raw & 0x0F) | (value << 4),
            SelectionField::Color2 => (raw & 0xF0) | value,
            SelectionField::Dither | SelectionField::Cull | SelectionField::ZSort => value,
        }
    }
}

/// Value shared by every selected face, across all meshes
///
/// Returns `None` when nothing is selected or selected faces disagree.
/// Meshes without the layer read as the layer default.
pub fn selected_value(scene: &Scene, field: SelectionField) -> Option<i32> {
    let attribute = field.attribute();
    let mut values = scene.mesh_nodes().flat_map(|(_, mesh)| {
        mesh.selected_faces()
            .map(move |face| field.extract(mesh.face_attribute_or_default(face, attribute)))
    });

    let first = values.next()?;
    values.all(|v| v == first).then_some(first)
}

/// Write `value` into every selected face, across all meshes
///
/// Missing layers are created with their default first. For colors only the
/// targeted nibble changes. Returns the number of faces written.
pub fn set_selected_value(
    scene: &mut Scene,
    field: SelectionField,
    value: i32,
) -> Result<usize, HostError> {
    if !(0..=field.max()).contains(&value) {
        return Err(HostError::ValueOutOfRange {
            field: field.name(),
            value,
            max: field.max(),
        });
    }

    let attribute = field.attribute();
    let mut written = 0;
    for (_, mesh) in scene.mesh_nodes_mut() {
        mesh.ensure_layer(attribute);
        let selected: Vec<usize> = mesh.selected_faces().collect();
        for face in selected {
            let raw = mesh.face_attribute_or_default(face, attribute);
            mesh.set_face_attribute(face, attribute, field.merge(raw, value));
            written += 1;
        }
    }

    tracing::debug!(field = field.name(), value, written, "Updated selected faces");
    Ok(written)
}

/// Shared boolean flag of the selection (`Dither` or `Cull`)
pub fn selected_flag(scene: &Scene, field: SelectionField) -> Option<bool> {
    selected_value(scene, field).map(|v| v != 0)
}

pub fn set_selected_flag(
    scene: &mut Scene,
    field: SelectionField,
    enabled: bool,
) -> Result<usize, HostError> {
    set_selected_value(scene, field, enabled as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::HostMesh;
    use crate::scene::{NodeData, SceneNode};
    use glam::Vec3;
    use svp_common::{Face, Model};

    fn tri(colors: (u8, u8)) -> Face {
        Face::triangle([Vec3::ZERO, Vec3::X, Vec3::Y]).with_colors(colors.0, colors.1)
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let a = HostMesh::from_model(&Model::new(vec![tri((1, 2)), tri((1, 3)), tri((4, 2))]));
        let b = HostMesh::from_model(&Model::new(vec![tri((1, 2)).with_dither(true)]));
        scene.add(SceneNode::mesh("A", a));
        scene.add(SceneNode::new("Lamp", NodeData::Light));
        scene.add(SceneNode::mesh("B", b));
        scene
    }

    fn select(scene: &mut Scene, name: &str, faces: &[usize]) {
        let mesh = scene.find_mut(name).and_then(SceneNode::as_mesh_mut).unwrap();
        for &face in faces {
            mesh.select_face(face, true);
        }
    }

    #[test]
    fn test_nothing_selected() {
        let scene = scene();
        assert_eq!(selected_value(&scene, SelectionField::Color1), None);
    }

    #[test]
    fn test_shared_value_across_meshes() {
        let mut scene = scene();
        select(&mut scene, "A", &[0, 1]);
        select(&mut scene, "B", &[0]);

        // All selected faces use color 1 = 1, color 2 differs
        assert_eq!(selected_value(&scene, SelectionField::Color1), Some(1));
        assert_eq!(selected_value(&scene, SelectionField::Color2), None);
        // Dither differs between A and B
        assert_eq!(selected_flag(&scene, SelectionField::Dither), None);
        assert_eq!(selected_flag(&scene, SelectionField::Cull), Some(false));
    }

    #[test]
    fn test_set_color_keeps_other_nibble() {
        let mut scene = scene();
        select(&mut scene, "A", &[1, 2]);

        let written = set_selected_value(&mut scene, SelectionField::Color2, 9).unwrap();
        assert_eq!(written, 2);

        let mesh = scene.find("A").and_then(SceneNode::as_mesh).unwrap();
        assert_eq!(mesh.face_attribute(0, FaceAttribute::PaletteIds), Some(0x12));
        assert_eq!(mesh.face_attribute(1, FaceAttribute::PaletteIds), Some(0x19));
        assert_eq!(mesh.face_attribute(2, FaceAttribute::PaletteIds), Some(0x49));
        assert_eq!(selected_value(&scene, SelectionField::Color2), Some(9));
    }

    #[test]
    fn test_set_flag_creates_missing_layer() {
        let mut scene = Scene::new();
        let mut mesh = HostMesh::new();
        for p in [Vec3::ZERO, Vec3::X, Vec3::Y] {
            mesh.add_vertex(p);
        }
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[2, 1, 0]).unwrap();
        mesh.select_face(1, true);
        scene.add(SceneNode::mesh("Plain", mesh));

        set_selected_flag(&mut scene, SelectionField::Cull, true).unwrap();

        let mesh = scene.find("Plain").and_then(SceneNode::as_mesh).unwrap();
        assert!(mesh.has_layer(FaceAttribute::CullIds));
        assert_eq!(mesh.face_attribute(0, FaceAttribute::CullIds), Some(0));
        assert_eq!(mesh.face_attribute(1, FaceAttribute::CullIds), Some(1));
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut scene = scene();
        select(&mut scene, "A", &[0]);
        assert_eq!(
            set_selected_value(&mut scene, SelectionField::ZSort, 16),
            Err(HostError::ValueOutOfRange {
                field: "zsort",
                value: 16,
                max: 15
            })
        );
        assert!(set_selected_value(&mut scene, SelectionField::Dither, -1).is_err());
    }
}
