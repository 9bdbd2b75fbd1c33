//! Exporter: idempotent encodings of a finished [`Artifact`].
//!
//! Every operation here only reads the artifact, so repeated and
//! concurrent exports of the same render are safe.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;
use base64::Engine as _;

use crate::{
    error::{LaureaError, LaureaResult},
    render::Artifact,
};

/// Fixed filename for the downloadable raster export.
pub const DOWNLOAD_FILENAME: &str = "certificate.png";

/// Encode the artifact as PNG bytes (straight alpha).
pub fn encode_png(artifact: &Artifact) -> LaureaResult<Vec<u8>> {
    let expected = artifact.width as usize * artifact.height as usize * 4;
    if artifact.rgba8_premul.len() != expected {
        return Err(LaureaError::export("artifact byte length mismatch"));
    }

    let mut rgba = artifact.rgba8_premul.clone();
    unpremultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(artifact.width, artifact.height, rgba)
        .ok_or_else(|| LaureaError::export("artifact does not form an image buffer"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode certificate png")?;
    Ok(out)
}

/// Encode the artifact as a `data:image/png;base64,` URL.
pub fn png_data_url(artifact: &Artifact) -> LaureaResult<String> {
    let png = encode_png(artifact)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{b64}"))
}

/// Write the PNG export into `dir` under the fixed [`DOWNLOAD_FILENAME`].
pub fn save_png(artifact: &Artifact, dir: &Path) -> LaureaResult<PathBuf> {
    let png = encode_png(artifact)?;
    let path = dir.join(DOWNLOAD_FILENAME);
    std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote certificate png");
    Ok(path)
}

/// Build the standalone print document: a passive HTML wrapper embedding
/// the PNG as a data URL, with exactly two controls (print and close) and
/// a print-media rule that hides the toolbar, strips the decorative
/// framing and scales the image to full page width.
pub fn print_document(artifact: &Artifact, title: &str) -> LaureaResult<String> {
    let data_url = png_data_url(artifact)?;
    let title = escape_html(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{
    margin: 0;
    padding: 24px;
    background: #525659;
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 16px;
  }}
  .toolbar {{ display: flex; gap: 8px; }}
  .toolbar button {{ padding: 8px 20px; font-size: 14px; cursor: pointer; }}
  img.certificate {{ max-width: 100%; box-shadow: 0 4px 18px rgba(0, 0, 0, 0.5); }}
  @media print {{
    body {{ margin: 0; padding: 0; background: none; }}
    .toolbar {{ display: none; }}
    img.certificate {{ width: 100%; max-width: none; box-shadow: none; }}
  }}
</style>
</head>
<body>
<div class="toolbar">
  <button onclick="window.print()">Print</button>
  <button onclick="window.close()">Close</button>
</div>
<img class="certificate" src="{data_url}" alt="{title}">
</body>
</html>
"#
    ))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u32 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u32 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u32 * 255 + a / 2) / a).min(255) as u8;
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_artifact() -> Artifact {
        Artifact {
            width: 2,
            height: 1,
            rgba8_premul: vec![255, 0, 0, 255, 0, 64, 0, 128],
        }
    }

    #[test]
    fn encode_png_roundtrips_dimensions() {
        let png = encode_png(&tiny_artifact()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
    }

    #[test]
    fn encode_png_rejects_truncated_buffer() {
        let mut artifact = tiny_artifact();
        artifact.rgba8_premul.pop();
        assert!(encode_png(&artifact).is_err());
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = png_data_url(&tiny_artifact()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn save_png_uses_fixed_filename() {
        let dir = std::env::temp_dir().join(format!("laurea_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = save_png(&tiny_artifact(), &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "certificate.png");
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn print_document_is_a_passive_wrapper() {
        let doc = print_document(&tiny_artifact(), "Certificate — Test").unwrap();

        assert_eq!(doc.matches("<img").count(), 1);
        assert!(doc.contains("data:image/png;base64,"));
        assert_eq!(doc.matches("<button").count(), 2);
        assert!(doc.contains("window.print()"));
        assert!(doc.contains("window.close()"));

        // The print-media rule hides the controls and fills the page.
        let media = doc.split("@media print").nth(1).expect("print media rule");
        assert!(media.contains(".toolbar { display: none; }"));
        assert!(media.contains("width: 100%"));

        // No scripts beyond the two inline control handlers.
        assert!(!doc.contains("<script"));
    }

    #[test]
    fn print_document_escapes_title() {
        let doc = print_document(&tiny_artifact(), "<Org> & Co").unwrap();
        assert!(doc.contains("&lt;Org&gt; &amp; Co"));
        assert!(!doc.contains("<Org>"));
    }
}
