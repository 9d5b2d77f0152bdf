//! SVP file import

use anyhow::{Context, Result};
use std::path::Path;
use svp_common::{Palette, decode_model_with_len};

use crate::mesh::HostMesh;
use crate::scene::SceneNode;
use crate::settings::{ImportSettings, SvpSettings};

/// Import an `.svp` file as a mesh node named after the file stem
///
/// Only the first model in the file is read; trailing bytes are ignored.
pub fn import_model(path: &Path, settings: &ImportSettings) -> Result<SceneNode> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read model: {:?}", path))?;
    let decoded =
        decode_model_with_len(&data).with_context(|| format!("Failed to decode model: {:?}", path))?;

    if decoded.consumed < data.len() {
        tracing::debug!(
            "Ignoring {} trailing bytes in {:?}",
            data.len() - decoded.consumed,
            path
        );
    }

    let mut mesh = HostMesh::from_model(&decoded.model);
    if settings.weld_vertices {
        let removed = mesh.weld_vertices(settings.weld_epsilon);
        tracing::debug!("Welded {} vertices", removed);
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svp_model".to_string());

    tracing::info!(
        "Imported model '{}': {} faces ({} triangles, {} quads), {} vertices",
        name,
        decoded.model.len(),
        decoded.model.triangle_count(),
        decoded.model.quad_count(),
        mesh.vertex_count()
    );

    Ok(SceneNode::mesh(name, mesh))
}

/// Load a `.pal` file into `palette`
///
/// Slots the file does not cover keep their current color. Returns the
/// number of slots written.
pub fn load_palette(path: &Path, palette: &mut Palette) -> Result<usize> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read palette: {:?}", path))?;
    let loaded = palette.load(&data);
    tracing::info!("Loaded palette {:?}: {} slots", path, loaded);
    Ok(loaded)
}

/// Load the palette named by `[palette] path`, if any
///
/// Relative paths resolve against `base_dir`. Returns `None` when no palette
/// is configured, otherwise the number of slots written.
pub fn load_configured_palette(
    settings: &SvpSettings,
    base_dir: &Path,
    palette: &mut Palette,
) -> Result<Option<usize>> {
    let Some(path) = settings.palette.path.as_deref() else {
        return Ok(None);
    };
    let resolved = base_dir.join(path);
    load_palette(&resolved, palette).map(Some)
}

/// Import a model with the full settings file applied
///
/// Runs [`import_model`] with the `[import]` section, then loads the
/// configured palette relative to the model's directory.
pub fn import_with_settings(
    path: &Path,
    settings: &SvpSettings,
    palette: &mut Palette,
) -> Result<SceneNode> {
    let node = import_model(path, &settings.import)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    load_configured_palette(settings, base_dir, palette)?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PaletteSettings;
    use glam::Vec3;
    use std::path::PathBuf;
    use svp_common::{Face, Model, encode_model};
    use tempfile::tempdir;

    fn settings_with_palette(path: Option<&str>) -> SvpSettings {
        SvpSettings {
            palette: PaletteSettings {
                path: path.map(PathBuf::from),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_palette_configured() {
        let dir = tempdir().unwrap();
        let mut palette = Palette::new([Vec3::ONE; 16]);
        let loaded = load_configured_palette(&settings_with_palette(None), dir.path(), &mut palette)
            .unwrap();
        assert_eq!(loaded, None);
        assert_eq!(palette, Palette::new([Vec3::ONE; 16]));
    }

    #[test]
    fn test_relative_palette_resolves_against_base_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ship.pal"), [0x0E, 0x00]).unwrap();

        let mut palette = Palette::default();
        let loaded =
            load_configured_palette(&settings_with_palette(Some("ship.pal")), dir.path(), &mut palette)
                .unwrap();
        assert_eq!(loaded, Some(1));
        assert_eq!(palette.colors[0], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_missing_configured_palette_is_error() {
        let dir = tempdir().unwrap();
        let mut palette = Palette::default();
        let err =
            load_configured_palette(&settings_with_palette(Some("gone.pal")), dir.path(), &mut palette)
                .unwrap_err();
        assert!(format!("{:#}", err).contains("gone.pal"));
    }

    #[test]
    fn test_import_with_settings_loads_palette() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("rock.svp");
        let model = Model::new(vec![Face::triangle([Vec3::ZERO, Vec3::X, Vec3::Y])]);
        std::fs::write(&model_path, encode_model(&model).unwrap()).unwrap();
        std::fs::write(dir.path().join("rock.pal"), [0x00, 0x0E, 0x00, 0xE0]).unwrap();

        let mut palette = Palette::default();
        let node =
            import_with_settings(&model_path, &settings_with_palette(Some("rock.pal")), &mut palette)
                .unwrap();

        assert_eq!(node.name, "rock");
        assert_eq!(palette.colors[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(palette.colors[1], Vec3::new(0.0, 1.0, 0.0));
    }
}
