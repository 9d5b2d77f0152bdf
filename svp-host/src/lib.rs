//! svp-host library
//!
//! Glue between the SVP codecs in `svp-common` and a mesh-editing host:
//! per-face attribute layers, a scene of tagged nodes, selection editing,
//! file import/export and viewport preview data.

pub mod attributes;
pub mod error;
pub mod export;
pub mod import;
pub mod mesh;
pub mod preview;
pub mod scene;
pub mod selection;
pub mod settings;

pub use attributes::{FaceAttribute, MeshAttributeStore};
pub use error::HostError;
pub use mesh::HostMesh;
pub use scene::{NodeData, Scene, SceneNode};

// Re-export file entry points
pub use export::{export_scene, export_scene_to_bytes};
pub use import::{import_model, import_with_settings, load_configured_palette, load_palette};
pub use settings::{
    ExportSettings, ImportSettings, PaletteSettings, SETTINGS_FILE_NAME, SvpSettings,
    load_settings,
};

// Re-export selection editing
pub use selection::{
    SelectionField, selected_flag, selected_value, set_selected_flag, set_selected_value,
};

// Re-export preview types
pub use preview::{
    DitherPick, PreviewBatch, PreviewVertex, build_preview, build_scene_preview, dither_pick,
    palette_rgba, preview_bytes,
};
