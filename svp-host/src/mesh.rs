//! In-memory host mesh with SVP face attribute layers

use glam::Vec3;
use hashbrown::HashMap;
use svp_common::{Face, Model, SvpError};

use crate::attributes::{FaceAttribute, MeshAttributeStore};
use crate::error::HostError;

/// Polygon mesh as the host sees it: a shared vertex table, faces as index
/// lists, optional per-face attribute layers and a face selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMesh {
    positions: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
    layers: HashMap<FaceAttribute, Vec<i32>>,
    selected: Vec<bool>,
}

impl HostMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from an SVP model
    ///
    /// Every face gets its own vertices, in file order, and all four
    /// attribute layers are populated.
    pub fn from_model(model: &Model) -> Self {
        let mut mesh = Self::new();
        let mut palette_ids = Vec::with_capacity(model.len());
        let mut dither_ids = Vec::with_capacity(model.len());
        let mut cull_ids = Vec::with_capacity(model.len());
        let mut flag_ids = Vec::with_capacity(model.len());

        for face in model.faces() {
            let base = mesh.positions.len() as u32;
            mesh.positions.extend_from_slice(&face.positions);
            mesh.faces
                .push((base..base + face.vertex_count() as u32).collect());
            mesh.selected.push(false);

            palette_ids.push(face.color_byte as i32);
            dither_ids.push(face.dither as i32);
            cull_ids.push(face.cull as i32);
            flag_ids.push(face.zsort as i32);
        }

        mesh.layers.insert(FaceAttribute::PaletteIds, palette_ids);
        mesh.layers.insert(FaceAttribute::DitherIds, dither_ids);
        mesh.layers.insert(FaceAttribute::CullIds, cull_ids);
        mesh.layers.insert(FaceAttribute::FlagIds, flag_ids);
        mesh
    }

    /// Build an SVP model from this mesh's faces and attribute layers
    ///
    /// Missing layers read as their defaults. Layer values are masked to the
    /// bits the format stores: 8 for the color byte, 1 for dither and cull,
    /// 4 for the z-sort hint.
    ///
    /// # Errors
    /// [`SvpError::UnsupportedTopology`] for the first face that is not a
    /// triangle or quad.
    pub fn to_model(&self) -> Result<Model, SvpError> {
        self.faces
            .iter()
            .enumerate()
            .map(|(index, indices)| {
                if !(3..=4).contains(&indices.len()) {
                    return Err(SvpError::UnsupportedTopology {
                        face: index,
                        vertex_count: indices.len(),
                    });
                }

                let attr = |a| self.face_attribute_or_default(index, a);
                let mut face = Face::new(indices.iter().map(|&i| self.positions[i as usize]));
                face.color_byte = (attr(FaceAttribute::PaletteIds) & 0xFF) as u8;
                face.dither = attr(FaceAttribute::DitherIds) & 1 != 0;
                face.cull = attr(FaceAttribute::CullIds) & 1 != 0;
                face.zsort = (attr(FaceAttribute::FlagIds) & 0xF) as u8;
                Ok(face)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Model::new)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions of one face's vertices, in winding order
    pub fn face_positions(&self, face: usize) -> impl Iterator<Item = Vec3> + '_ {
        self.faces
            .get(face)
            .into_iter()
            .flatten()
            .map(|&i| self.positions[i as usize])
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Append a face and return its index
    ///
    /// Existing attribute layers grow with their default value.
    pub fn add_face(&mut self, indices: &[u32]) -> Result<usize, HostError> {
        let face = self.faces.len();
        if let Some(&index) = indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(HostError::VertexOutOfRange {
                face,
                index,
                vertex_count: self.positions.len(),
            });
        }

        self.faces.push(indices.to_vec());
        self.selected.push(false);
        for (attribute, layer) in self.layers.iter_mut() {
            layer.push(attribute.default_value());
        }
        Ok(face)
    }

    pub fn select_face(&mut self, face: usize, selected: bool) {
        if let Some(s) = self.selected.get_mut(face) {
            *s = selected;
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        self.selected.fill(selected);
    }

    pub fn selected_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
    }

    /// Merge vertices that fall in the same `epsilon`-sized grid cell
    ///
    /// Faces are remapped to the surviving vertex. Returns the number of
    /// vertices removed.
    pub fn weld_vertices(&mut self, epsilon: f32) -> usize {
        let epsilon = epsilon.max(f32::EPSILON);
        let mut cells: HashMap<[i64; 3], u32> = HashMap::with_capacity(self.positions.len());
        let mut remap = Vec::with_capacity(self.positions.len());
        let mut welded = Vec::with_capacity(self.positions.len());

        for position in &self.positions {
            let cell = (*position / epsilon).round().as_i64vec3().to_array();
            let index = *cells.entry(cell).or_insert_with(|| {
                welded.push(*position);
                (welded.len() - 1) as u32
            });
            remap.push(index);
        }

        for face in &mut self.faces {
            for index in face.iter_mut() {
                *index = remap[*index as usize];
            }
        }

        let removed = self.positions.len() - welded.len();
        self.positions = welded;
        removed
    }
}

impl MeshAttributeStore for HostMesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn has_layer(&self, attribute: FaceAttribute) -> bool {
        self.layers.contains_key(&attribute)
    }

    fn ensure_layer(&mut self, attribute: FaceAttribute) -> bool {
        if self.layers.contains_key(&attribute) {
            return false;
        }
        self.layers.insert(
            attribute,
            vec![attribute.default_value(); self.faces.len()],
        );
        true
    }

    fn face_attribute(&self, face: usize, attribute: FaceAttribute) -> Option<i32> {
        self.layers.get(&attribute)?.get(face).copied()
    }

    fn set_face_attribute(&mut self, face: usize, attribute: FaceAttribute, value: i32) {
        self.ensure_layer(attribute);
        if let Some(slot) = self
            .layers
            .get_mut(&attribute)
            .and_then(|layer| layer.get_mut(face))
        {
            *slot = value;
        }
    }

    fn is_face_selected(&self, face: usize) -> bool {
        self.selected.get(face).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_face_model() -> Model {
        Model::new(vec![
            Face::triangle([Vec3::ZERO, Vec3::X, Vec3::Y])
                .with_colors(2, 3)
                .with_cull(true)
                .with_zsort(5),
            Face::quad([Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Z]).with_dither(true),
        ])
    }

    #[test]
    fn test_from_model_owns_vertices_per_face() {
        let mesh = HostMesh::from_model(&two_face_model());
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.faces(), &[vec![0, 1, 2], vec![3, 4, 5, 6]]);
        assert_eq!(mesh.positions()[3], Vec3::ZERO);
    }

    #[test]
    fn test_from_model_populates_all_layers() {
        let mesh = HostMesh::from_model(&two_face_model());
        for attribute in FaceAttribute::ALL {
            assert!(mesh.has_layer(attribute), "{}", attribute.layer_name());
        }
        assert_eq!(mesh.face_attribute(0, FaceAttribute::PaletteIds), Some(0x23));
        assert_eq!(mesh.face_attribute(0, FaceAttribute::CullIds), Some(1));
        assert_eq!(mesh.face_attribute(0, FaceAttribute::FlagIds), Some(5));
        assert_eq!(mesh.face_attribute(1, FaceAttribute::DitherIds), Some(1));
        assert_eq!(mesh.face_attribute(1, FaceAttribute::PaletteIds), Some(0x11));
    }

    #[test]
    fn test_to_model_roundtrip() {
        let model = two_face_model();
        assert_eq!(HostMesh::from_model(&model).to_model().unwrap(), model);
    }

    #[test]
    fn test_to_model_defaults_for_missing_layers() {
        let mut mesh = HostMesh::new();
        for p in [Vec3::ZERO, Vec3::X, Vec3::Y] {
            mesh.add_vertex(p);
        }
        mesh.add_face(&[0, 1, 2]).unwrap();

        let model = mesh.to_model().unwrap();
        let face = &model.faces()[0];
        assert_eq!(face.color_byte, 0x11);
        assert!(!face.dither);
        assert!(!face.cull);
        assert_eq!(face.zsort, 0);
    }

    #[test]
    fn test_to_model_masks_layer_values() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        mesh.set_face_attribute(0, FaceAttribute::PaletteIds, 0x1AB);
        mesh.set_face_attribute(0, FaceAttribute::DitherIds, 2);
        mesh.set_face_attribute(0, FaceAttribute::FlagIds, 0x13);

        let model = mesh.to_model().unwrap();
        let face = &model.faces()[0];
        assert_eq!(face.color_byte, 0xAB);
        assert!(!face.dither);
        assert_eq!(face.zsort, 3);
    }

    #[test]
    fn test_to_model_rejects_ngon() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        let base = mesh.vertex_count() as u32;
        for i in 0..5 {
            mesh.add_vertex(Vec3::splat(i as f32));
        }
        mesh.add_face(&[base, base + 1, base + 2, base + 3, base + 4])
            .unwrap();

        assert_eq!(
            mesh.to_model(),
            Err(SvpError::UnsupportedTopology {
                face: 2,
                vertex_count: 5
            })
        );
    }

    #[test]
    fn test_add_face_validates_indices() {
        let mut mesh = HostMesh::new();
        mesh.add_vertex(Vec3::ZERO);
        assert_eq!(
            mesh.add_face(&[0, 1, 2]),
            Err(HostError::VertexOutOfRange {
                face: 0,
                index: 1,
                vertex_count: 1
            })
        );
    }

    #[test]
    fn test_add_face_extends_layers_with_defaults() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        let a = mesh.add_vertex(Vec3::ZERO);
        let face = mesh.add_face(&[a, a, a]).unwrap();
        assert_eq!(mesh.face_attribute(face, FaceAttribute::PaletteIds), Some(0x11));
        assert_eq!(mesh.face_attribute(face, FaceAttribute::FlagIds), Some(0));
    }

    #[test]
    fn test_ensure_layer_only_creates_once() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        assert!(!mesh.ensure_layer(FaceAttribute::PaletteIds));

        let mut empty = HostMesh::new();
        assert!(empty.ensure_layer(FaceAttribute::CullIds));
        assert!(!empty.ensure_layer(FaceAttribute::CullIds));
    }

    #[test]
    fn test_weld_vertices_merges_shared_corners() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        let removed = mesh.weld_vertices(1.0 / 256.0);

        // ZERO and X appear in both faces
        assert_eq!(removed, 2);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.faces()[1][0], mesh.faces()[0][0]);
        assert_eq!(mesh.faces()[1][1], mesh.faces()[0][1]);

        // Geometry is unchanged
        let before = two_face_model();
        assert_eq!(mesh.to_model().unwrap(), before);
    }

    #[test]
    fn test_selection() {
        let mut mesh = HostMesh::from_model(&two_face_model());
        assert_eq!(mesh.selected_faces().count(), 0);
        mesh.select_face(1, true);
        mesh.select_face(9, true);
        assert_eq!(mesh.selected_faces().collect::<Vec<_>>(), vec![1]);
        assert!(mesh.is_face_selected(1));
        assert!(!mesh.is_face_selected(9));
        mesh.select_all(true);
        assert_eq!(mesh.selected_faces().count(), 2);
    }
}
