#![forbid(unsafe_code)]

//! Deterministic completion-certificate rendering.
//!
//! One render awaits its asset batch, runs a single sequential compositor
//! pass over a CPU raster surface, and yields an immutable [`Artifact`]
//! that can be exported as PNG bytes or a print-ready HTML document.

pub mod assets;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod recipient;
pub mod render;
pub mod shapes;
pub mod surface;
pub mod typography;

pub use assets::{AssetRef, DecodedAsset, LoadedAssets, load_assets};
pub use config::{CANVAS_HEIGHT, CANVAS_WIDTH, Geometry, Palette, Rgba8, TemplateConfig};
pub use error::{LaureaError, LaureaResult};
pub use export::{DOWNLOAD_FILENAME, encode_png, png_data_url, print_document, save_png};
pub use recipient::RecipientProfile;
pub use render::{Artifact, Renderer, render_certificate, render_with_assets};
pub use surface::{CpuSurface, FontSpec, Paint, Surface};
