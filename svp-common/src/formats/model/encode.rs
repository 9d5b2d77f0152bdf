//! Model encoding

use serde::{Deserialize, Serialize};

use crate::error::SvpError;
use crate::packing::{f32_to_fixed88_checked, f32_to_fixed88_wrapping, mesh_to_file_axes};

use super::{FaceHeader, Model, SvpModelHeader};

/// Mesh axis (0 = X, 1 = Y, 2 = Z) for each file axis slot (X, Z, Y)
const FILE_SLOT_TO_MESH_AXIS: [usize; 3] = [0, 2, 1];

/// What to do with a coordinate outside the 8.8 fixed point range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep the low 16 bits, byte-compatible with existing tools
    #[default]
    Wrap,
    /// Fail with [`SvpError::CoordinateOverflow`]
    Error,
}

/// Encoder options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub overflow: OverflowPolicy,
}

impl EncodeOptions {
    /// Options that reject out-of-range coordinates instead of wrapping them
    pub fn strict() -> Self {
        Self {
            overflow: OverflowPolicy::Error,
        }
    }
}

/// Exact encoded size of `model` in bytes
///
/// # Errors
/// Fails the same way [`encode_model`] would on face count or topology.
pub fn encoded_len(model: &Model) -> Result<usize, SvpError> {
    SvpModelHeader::for_face_count(model.len())?;
    model
        .faces()
        .iter()
        .enumerate()
        .try_fold(SvpModelHeader::SIZE, |total, (index, face)| {
            face.encoded_size()
                .map(|size| total + size)
                .ok_or(SvpError::UnsupportedTopology {
                    face: index,
                    vertex_count: face.vertex_count(),
                })
        })
}

/// Encode an SVP model with default options (wrap on overflow)
pub fn encode_model(model: &Model) -> Result<Vec<u8>, SvpError> {
    encode_model_with(model, &EncodeOptions::default())
}

/// Encode an SVP model
///
/// Coordinates are multiplied by 256 and truncated toward zero. Z-sort bits
/// are not written.
///
/// # Errors
/// - [`SvpError::EmptyModel`] / [`SvpError::TooManyFaces`] if the face count is
///   outside 1..=65536
/// - [`SvpError::UnsupportedTopology`] for the first face that is not a
///   triangle or quad
/// - [`SvpError::CoordinateOverflow`] with [`OverflowPolicy::Error`]
pub fn encode_model_with(model: &Model, options: &EncodeOptions) -> Result<Vec<u8>, SvpError> {
    // Validates face count and topology before anything is written
    let len = encoded_len(model)?;
    let header = SvpModelHeader::for_face_count(model.len())?;

    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&header.to_bytes());

    for (index, face) in model.faces().iter().enumerate() {
        out.extend_from_slice(&FaceHeader::for_face(face).to_bytes());

        for (vertex, position) in face.positions.iter().enumerate() {
            for (slot, value) in mesh_to_file_axes(*position).into_iter().enumerate() {
                let fixed = match f32_to_fixed88_checked(value) {
                    Some(fixed) => fixed,
                    None => {
                        let axis = FILE_SLOT_TO_MESH_AXIS[slot];
                        if options.overflow == OverflowPolicy::Error {
                            return Err(SvpError::CoordinateOverflow {
                                face: index,
                                vertex,
                                axis,
                                value,
                            });
                        }
                        tracing::warn!(
                            face = index,
                            vertex,
                            axis,
                            value,
                            "Coordinate outside 8.8 fixed point range, wrapping"
                        );
                        f32_to_fixed88_wrapping(value)
                    }
                };
                out.extend_from_slice(&fixed.to_be_bytes());
            }
        }
    }

    debug_assert_eq!(out.len(), len);
    tracing::debug!(face_count = model.len(), bytes = out.len(), "Encoded SVP model");
    Ok(out)
}
