use kurbo::Point;

use crate::{
    assets::AssetRef,
    error::{LaureaError, LaureaResult},
};

/// Logical canvas width of every rendered certificate, in pixels.
pub const CANVAS_WIDTH: u32 = 1400;
/// Logical canvas height of every rendered certificate, in pixels.
pub const CANVAS_HEIGHT: u32 = 990;

/// Straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Blend towards white by `t` in 0..=1, keeping alpha.
    pub fn lighten(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lift = |c: u8| -> u8 {
            let cf = c as f32;
            (cf + (255.0 - cf) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: lift(self.r),
            g: lift(self.g),
            b: lift(self.b),
            a: self.a,
        }
    }
}

/// Fixed color palette for one certificate template.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub primary: Rgba8,
    pub primary_dark: Rgba8,
    pub accent: Rgba8,
    pub accent_dark: Rgba8,
}

/// Immutable certificate template: strings, palette and asset references.
///
/// Constructed once and shared read-only by every render; the renderer
/// never mutates it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TemplateConfig {
    pub organization: String,
    pub course: String,
    pub signatory_name: String,
    pub signatory_title: String,
    pub palette: Palette,
    pub logo: AssetRef,
    pub stamp: AssetRef,
    pub signature: AssetRef,
}

impl TemplateConfig {
    /// The single build-time template.
    pub fn builtin() -> Self {
        Self {
            organization: "Open Learning Institute".to_string(),
            course: "Applied Software Engineering".to_string(),
            signatory_name: "Dr. Miriam Keller".to_string(),
            signatory_title: "Director of Studies".to_string(),
            palette: Palette {
                primary: Rgba8::rgb(31, 59, 99),
                primary_dark: Rgba8::rgb(19, 39, 67),
                accent: Rgba8::rgb(201, 162, 39),
                accent_dark: Rgba8::rgb(140, 109, 31),
            },
            logo: AssetRef::None,
            stamp: AssetRef::None,
            signature: AssetRef::None,
        }
    }

    pub fn validate(&self) -> LaureaResult<()> {
        if self.organization.trim().is_empty() {
            return Err(LaureaError::validation("organization must be non-empty"));
        }
        if self.course.trim().is_empty() {
            return Err(LaureaError::validation("course must be non-empty"));
        }
        if self.signatory_name.trim().is_empty() {
            return Err(LaureaError::validation("signatory_name must be non-empty"));
        }
        if self.signatory_title.trim().is_empty() {
            return Err(LaureaError::validation("signatory_title must be non-empty"));
        }
        Ok(())
    }
}

/// Layout constants derived from the fixed canvas size.
///
/// Every value is a fraction of width or height so the design reproduces
/// exactly at the one supported aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    /// Nominal x of the panel/body seam, before the S-curve swing.
    pub panel_width: f64,
    /// Horizontal amplitude of the panel S-curve.
    pub panel_swing: f64,
    /// Left edge of the text band.
    pub content_left: f64,
    /// Width of the text band.
    pub content_width: f64,
    /// Horizontal center of the text band.
    pub content_center: f64,
    /// Inset of the thick outer border stroke.
    pub border_outer_inset: f64,
    /// Inset of the thin translucent inner border stroke.
    pub border_inner_inset: f64,
    /// Medallion anchor (center of the seal).
    pub seal_center: Point,
    /// Radius of the medallion's outer ring and rosette.
    pub seal_radius: f64,
}

impl Geometry {
    pub fn new(width: u32, height: u32) -> Self {
        let w = width as f64;
        let h = height as f64;
        let panel_width = (w * 0.27).round();
        let panel_swing = (w * 0.05).round();
        let content_left = panel_width + (w * 0.09).round();
        let content_width = w - content_left - (w * 0.06).round();
        Self {
            width: w,
            height: h,
            panel_width,
            panel_swing,
            content_left,
            content_width,
            content_center: content_left + content_width / 2.0,
            border_outer_inset: (w * 0.013).round(),
            border_inner_inset: (w * 0.021).round(),
            seal_center: Point::new((w * 0.135).round(), (h * 0.68).round()),
            seal_radius: (w * 0.066).round(),
        }
    }
}
