//! Model decoding

use smallvec::SmallVec;

use crate::error::SvpError;
use crate::formats::BinarySerializable;
use crate::packing::{file_to_mesh_axes, fixed88_to_f32};

use super::{DecodedModel, Face, FaceHeader, Model, SvpModelHeader};

/// Bounds-checked big-endian reader over a model buffer
///
/// Tracks the face being read so truncation errors can name it.
struct ModelReader<'a> {
    data: &'a [u8],
    offset: usize,
    face: Option<usize>,
}

impl<'a> ModelReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            face: None,
        }
    }

    fn truncated(&self, needed: usize) -> SvpError {
        SvpError::TruncatedInput {
            offset: self.offset,
            needed,
            face: self.face,
        }
    }

    fn take_slice(&mut self, len: usize) -> Result<&'a [u8], SvpError> {
        let data = self.data;
        let bytes = data
            .get(self.offset..self.offset + len)
            .ok_or_else(|| self.truncated(len))?;
        self.offset += len;
        Ok(bytes)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], SvpError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_slice(N)?);
        Ok(out)
    }

    /// Read a fixed-size header record
    fn read_header<H: BinarySerializable>(&mut self) -> Result<H, SvpError> {
        let start = self.offset;
        let bytes = self.take_slice(H::SIZE)?;
        H::deserialize(bytes).ok_or(SvpError::TruncatedInput {
            offset: start,
            needed: H::SIZE,
            face: self.face,
        })
    }

    fn read_i16(&mut self) -> Result<i16, SvpError> {
        self.take::<2>().map(i16::from_be_bytes)
    }

    /// Read one X, Z, Y vertex and return it in X, Y, Z order
    fn read_vertex(&mut self) -> Result<glam::Vec3, SvpError> {
        let x = fixed88_to_f32(self.read_i16()?);
        let z = fixed88_to_f32(self.read_i16()?);
        let y = fixed88_to_f32(self.read_i16()?);
        Ok(file_to_mesh_axes([x, z, y]))
    }

    fn read_face(&mut self) -> Result<Face, SvpError> {
        let header: FaceHeader = self.read_header()?;

        let mut positions = SmallVec::new();
        for _ in 0..header.vertex_count() {
            positions.push(self.read_vertex()?);
        }

        Ok(Face {
            positions,
            color_byte: header.color_byte,
            dither: header.dither(),
            cull: header.cull(),
            zsort: header.zsort(),
        })
    }
}

/// Decode an SVP model
///
/// Reads the face count header and then every face record in order. The
/// format carries no magic or checksum, so any buffer that is long enough
/// decodes successfully. Bytes after the last face are ignored.
///
/// # Errors
/// Returns [`SvpError::TruncatedInput`] if the buffer ends before the header
/// or any face record is complete.
pub fn decode_model(data: &[u8]) -> Result<Model, SvpError> {
    decode_model_with_len(data).map(|decoded| decoded.model)
}

/// Decode an SVP model and report how many bytes it occupied
///
/// Useful for buffers holding several models back to back.
pub fn decode_model_with_len(data: &[u8]) -> Result<DecodedModel, SvpError> {
    let mut reader = ModelReader::new(data);
    let header: SvpModelHeader = reader.read_header()?;
    let face_count = header.face_count();

    let mut faces = Vec::with_capacity(face_count);
    for index in 0..face_count {
        reader.face = Some(index);
        faces.push(reader.read_face()?);
    }

    tracing::debug!(
        face_count,
        consumed = reader.offset,
        trailing = data.len() - reader.offset,
        "Decoded SVP model"
    );

    Ok(DecodedModel {
        model: Model::new(faces),
        consumed: reader.offset,
    })
}
