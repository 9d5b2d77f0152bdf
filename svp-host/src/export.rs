//! SVP file export

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use svp_common::{EncodeOptions, encode_model_with};

use crate::error::HostError;
use crate::scene::Scene;
use crate::settings::ExportSettings;

/// Encode every mesh node of `scene`, in scene order, into one byte stream
///
/// Each mesh becomes a complete SVP model (header + faces) and the models
/// are written back to back.
pub fn export_scene_to_bytes(scene: &Scene, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut meshes = 0;

    for (name, mesh) in scene.mesh_nodes() {
        let model = mesh
            .to_model()
            .with_context(|| format!("Failed to convert mesh '{}'", name))?;
        let bytes = encode_model_with(&model, options)
            .with_context(|| format!("Failed to encode mesh '{}'", name))?;

        tracing::debug!("Encoded mesh '{}': {} faces, {} bytes", name, model.len(), bytes.len());
        out.extend_from_slice(&bytes);
        meshes += 1;
    }

    if meshes == 0 {
        return Err(HostError::NoMeshes.into());
    }
    Ok(out)
}

/// Export `scene` to an `.svp` file
///
/// The file is only created once every mesh has encoded successfully.
pub fn export_scene(scene: &Scene, path: &Path, settings: &ExportSettings) -> Result<()> {
    let data = export_scene_to_bytes(scene, &settings.encode_options())?;

    let file = File::create(path).with_context(|| format!("Failed to create output: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&data)
        .with_context(|| format!("Failed to write output: {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", path))?;

    tracing::info!(
        "Exported {} meshes to {:?}: {} bytes",
        scene.mesh_count(),
        path,
        data.len()
    );
    Ok(())
}
