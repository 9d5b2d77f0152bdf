//! SVP codec error types

/// Errors produced by the model codec.
///
/// The palette codec never fails; short palette files are loaded partially.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SvpError {
    /// The buffer ran out in the middle of a read.
    ///
    /// `face` is `None` when the 2-byte header itself is missing.
    #[error("{}", truncated_message(.offset, .needed, .face))]
    TruncatedInput {
        /// Byte offset of the read that failed
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Face being decoded when the buffer ran out
        face: Option<usize>,
    },

    /// A face has a vertex count other than 3 or 4
    #[error("face {face} has {vertex_count} vertices (SVP faces must have 3 or 4)")]
    UnsupportedTopology { face: usize, vertex_count: usize },

    /// The on-disk count-minus-one header cannot represent zero faces
    #[error("cannot encode a model with no faces")]
    EmptyModel,

    /// More faces than a 16-bit count-minus-one header can describe
    #[error("too many faces: {0} (max {max})", max = crate::formats::MAX_FACES)]
    TooManyFaces(usize),

    /// A coordinate does not fit in 8.8 fixed point
    #[error(
        "face {face} vertex {vertex} axis {axis}: {value} is outside the 8.8 fixed point range"
    )]
    CoordinateOverflow {
        face: usize,
        vertex: usize,
        axis: usize,
        value: f32,
    },
}

fn truncated_message(offset: &usize, needed: &usize, face: &Option<usize>) -> String {
    match face {
        Some(face) => format!(
            "unexpected end of data in face {face}: needed {needed} byte(s) at offset {offset}"
        ),
        None => format!(
            "unexpected end of data in header: needed {needed} byte(s) at offset {offset}"
        ),
    }
}
