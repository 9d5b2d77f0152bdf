//! Scene collection
//!
//! Nodes are tagged by what data they carry. Only [`NodeData::Mesh`] nodes
//! take part in SVP export, selection editing and preview.

use crate::mesh::HostMesh;

/// Data attached to a scene node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Polygon mesh
    Mesh(HostMesh),
    /// Transform-only node
    Empty,
    Camera,
    Light,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub data: NodeData,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, data: NodeData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: HostMesh) -> Self {
        Self::new(name, NodeData::Mesh(mesh))
    }

    pub fn as_mesh(&self) -> Option<&HostMesh> {
        match &self.data {
            NodeData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut HostMesh> {
        match &mut self.data {
            NodeData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Ordered collection of scene nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index
    pub fn add(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// Mesh nodes in scene order, as (name, mesh)
    pub fn mesh_nodes(&self) -> impl Iterator<Item = (&str, &HostMesh)> {
        self.nodes
            .iter()
            .filter_map(|n| n.as_mesh().map(|m| (n.name.as_str(), m)))
    }

    pub fn mesh_nodes_mut(&mut self) -> impl Iterator<Item = (&str, &mut HostMesh)> {
        self.nodes.iter_mut().filter_map(|n| match &mut n.data {
            NodeData::Mesh(mesh) => Some((n.name.as_str(), mesh)),
            _ => None,
        })
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_nodes().count()
    }
}
