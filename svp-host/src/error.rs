//! Host integration error types

/// Errors raised by the host-side glue
///
/// Codec failures surface as [`svp_common::SvpError`]; file and context
/// errors are reported through `anyhow` by the import/export functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// Export found nothing with polygon data
    #[error("scene contains no mesh objects to export")]
    NoMeshes,

    /// A selection setter was given a value its field cannot hold
    #[error("{field} value {value} out of range (0-{max})")]
    ValueOutOfRange {
        field: &'static str,
        value: i32,
        max: i32,
    },

    /// A face references a vertex the mesh does not have
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}
