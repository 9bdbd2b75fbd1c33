//! The compositor: one sequential pass over the drawing surface in a
//! fixed z-order. No stage branches back; image stages are skipped when
//! their asset is absent, except the signature stage which substitutes a
//! generated stroke.

use kurbo::{BezPath, Point, Rect, Shape};

use crate::{
    assets::LoadedAssets,
    config::{Geometry, Rgba8, TemplateConfig},
    error::LaureaResult,
    shapes,
    surface::{FontSpec, Paint, Surface},
    typography,
};

const BACKGROUND: Rgba8 = Rgba8::rgb(251, 249, 244);
const INK: Rgba8 = Rgba8::rgb(43, 43, 43);
const INK_MUTED: Rgba8 = Rgba8::rgb(96, 96, 96);

const HEADING_SIZE: f32 = 64.0;
const SUBTITLE_SIZE: f32 = 28.0;
const SUBTITLE_LETTER_SPACING: f64 = 6.0;
const PREAMBLE_SIZE: f32 = 26.0;
const BODY_SIZE: f32 = 24.0;
const BODY_LINE_HEIGHT: f64 = 34.0;
const SIGNATORY_NAME_SIZE: f32 = 26.0;
const SIGNATORY_TITLE_SIZE: f32 = 18.0;

/// Horizontal padding subtracted from the content width when fitting the
/// recipient name.
const NAME_FIT_PADDING: f64 = 80.0;
const NAME_SHADOW_OFFSET: f64 = 2.0;
const UNDERLINE_MARGIN: f64 = 40.0;

const HEADING_TEXT: &str = "Certificate";
const SUBTITLE_TEXT: &str = "OF COMPLETION";
const PREAMBLE_TEXT: &str = "This certificate is proudly presented to";

pub struct Compositor<'a, S: Surface> {
    surface: &'a mut S,
    cfg: &'a TemplateConfig,
    geo: &'a Geometry,
    assets: &'a LoadedAssets,
    recipient_name: &'a str,
}

impl<'a, S: Surface> Compositor<'a, S> {
    pub fn new(
        surface: &'a mut S,
        cfg: &'a TemplateConfig,
        geo: &'a Geometry,
        assets: &'a LoadedAssets,
        recipient_name: &'a str,
    ) -> Self {
        Self {
            surface,
            cfg,
            geo,
            assets,
            recipient_name,
        }
    }

    /// Execute every stage in the fixed z-order.
    pub fn run(&mut self) -> LaureaResult<()> {
        self.draw_background();
        self.draw_panel();
        self.draw_accent_stripe();
        self.draw_swooshes();
        self.draw_borders();
        self.draw_medallion();
        self.draw_heading();
        self.draw_subtitle();
        self.draw_divider();
        self.draw_preamble();
        self.draw_recipient_name();
        self.draw_body();
        self.draw_signature_block()?;
        self.draw_stamp()?;
        self.draw_logo()?;
        Ok(())
    }

    fn draw_background(&mut self) {
        let full = Rect::new(0.0, 0.0, self.geo.width, self.geo.height).to_path(1e-3);
        self.surface.fill_path(&full, &Paint::Solid(BACKGROUND));
    }

    fn draw_panel(&mut self) {
        let path = shapes::panel_path(self.geo);
        let paint = shapes::panel_paint(self.geo, &self.cfg.palette);
        self.surface.fill_path(&path, &paint);
    }

    fn draw_accent_stripe(&mut self) {
        let path = shapes::accent_stripe_path(self.geo);
        let paint = shapes::accent_stripe_paint(self.geo, &self.cfg.palette);
        self.surface.fill_path(&path, &paint);
    }

    fn draw_swooshes(&mut self) {
        let paint = shapes::swoosh_paint(&self.cfg.palette);
        for path in shapes::swoosh_paths(self.geo) {
            self.surface.fill_path(&path, &paint);
        }
    }

    fn draw_borders(&mut self) {
        let outer = inset_rect(self.geo, self.geo.border_outer_inset).to_path(1e-3);
        self.surface.stroke_path(
            &outer,
            &Paint::Solid(self.cfg.palette.accent_dark),
            6.0,
        );

        let inner = inset_rect(self.geo, self.geo.border_inner_inset).to_path(1e-3);
        self.surface.stroke_path(
            &inner,
            &Paint::Solid(self.cfg.palette.accent.with_alpha(120)),
            2.0,
        );
    }

    // Ribbons, outer ring, rosette, inner disc, star: strictly inside-out
    // z-order around one anchor.
    fn draw_medallion(&mut self) {
        let center = self.geo.seal_center;
        let radius = self.geo.seal_radius;
        let palette = &self.cfg.palette;

        let ribbon_paint = shapes::ribbon_paint(center, radius, palette);
        for ribbon in shapes::ribbon_paths(center, radius) {
            self.surface.fill_path(&ribbon, &ribbon_paint);
        }

        self.surface.fill_path(
            &shapes::ring_path(center, radius),
            &shapes::ring_paint(center, radius, palette),
        );

        self.surface.fill_path(
            &shapes::rosette_path(center, radius, shapes::ROSETTE_TEETH),
            &shapes::rosette_paint(palette),
        );

        let disc_radius = radius - shapes::DISC_INSET;
        self.surface.fill_path(
            &shapes::disc_path(center, disc_radius),
            &shapes::disc_paint(center, disc_radius, palette),
        );
        self.surface.stroke_path(
            &shapes::disc_path(center, disc_radius),
            &Paint::Solid(palette.accent_dark),
            2.0,
        );

        let star_radius = disc_radius - shapes::STAR_INSET;
        self.surface.fill_path(
            &shapes::star_path(center, star_radius, shapes::STAR_SPIKES),
            &shapes::star_paint(center, star_radius),
        );
    }

    fn draw_heading(&mut self) {
        let spec = FontSpec::serif(HEADING_SIZE).bold();
        let width = self.surface.measure_text(HEADING_TEXT, &spec);
        let x = self.geo.content_center - width / 2.0;
        let baseline = self.geo.height * 0.205;
        self.surface
            .fill_text(HEADING_TEXT, x, baseline, &spec, self.cfg.palette.primary_dark);
    }

    // Letter-by-letter with manual advance accumulation: every character
    // is centered in its own slot of (glyph width + spacing).
    fn draw_subtitle(&mut self) {
        let spec = FontSpec::serif(SUBTITLE_SIZE);
        let surface = &mut *self.surface;
        let (slots, total) = typography::letter_slots(
            |s| surface.measure_text(s, &spec),
            SUBTITLE_TEXT,
            SUBTITLE_LETTER_SPACING,
        );

        let baseline = self.geo.height * 0.27;
        let mut x = self.geo.content_center - total / 2.0;
        for slot in &slots {
            self.surface.fill_text(
                &slot.ch,
                x + SUBTITLE_LETTER_SPACING / 2.0,
                baseline,
                &spec,
                self.cfg.palette.accent_dark,
            );
            x += slot.width + SUBTITLE_LETTER_SPACING;
        }
    }

    fn draw_divider(&mut self) {
        let y = self.geo.height * 0.315;
        let cx = self.geo.content_center;
        let paint = Paint::Solid(self.cfg.palette.accent_dark);

        self.surface
            .stroke_path(&line_path((cx - 160.0, y), (cx - 14.0, y)), &paint, 2.0);
        self.surface
            .stroke_path(&line_path((cx + 14.0, y), (cx + 160.0, y)), &paint, 2.0);
        self.surface
            .fill_path(&shapes::rotated_square_path(Point::new(cx, y), 8.0), &paint);
    }

    fn draw_preamble(&mut self) {
        let spec = FontSpec::serif(PREAMBLE_SIZE).italic();
        let width = self.surface.measure_text(PREAMBLE_TEXT, &spec);
        let x = self.geo.content_center - width / 2.0;
        let baseline = self.geo.height * 0.385;
        self.surface
            .fill_text(PREAMBLE_TEXT, x, baseline, &spec, INK_MUTED);
    }

    fn draw_recipient_name(&mut self) {
        let base_spec = FontSpec::script(typography::NAME_MAX_SIZE);
        let max_width = self.geo.content_width - NAME_FIT_PADDING;

        let surface = &mut *self.surface;
        let size = typography::fit_size(
            |text, size| surface.measure_text(text, &base_spec.with_size(size)),
            self.recipient_name,
            max_width,
        );

        let spec = base_spec.with_size(size);
        let width = self.surface.measure_text(self.recipient_name, &spec);
        let x = self.geo.content_center - width / 2.0;
        let baseline = self.geo.height * 0.49;

        // Dark pass offset under the accent pass makes the drop shadow.
        self.surface.fill_text(
            self.recipient_name,
            x + NAME_SHADOW_OFFSET,
            baseline + NAME_SHADOW_OFFSET,
            &spec,
            self.cfg.palette.primary_dark,
        );
        self.surface.fill_text(
            self.recipient_name,
            x,
            baseline,
            &spec,
            self.cfg.palette.accent_dark,
        );

        let underline_width =
            (width + UNDERLINE_MARGIN).min(self.geo.content_width - UNDERLINE_MARGIN);
        let underline_y = baseline + 26.0;
        self.surface.stroke_path(
            &line_path(
                (self.geo.content_center - underline_width / 2.0, underline_y),
                (self.geo.content_center + underline_width / 2.0, underline_y),
            ),
            &Paint::Solid(self.cfg.palette.accent),
            3.0,
        );
    }

    fn draw_body(&mut self) {
        let spec = FontSpec::serif(BODY_SIZE);
        let text = format!(
            "for successfully completing the course {} as offered by {}",
            self.cfg.course, self.cfg.organization
        );
        let max_width = self.geo.content_width - 60.0;

        let surface = &mut *self.surface;
        let lines = typography::wrap_greedy(|t| surface.measure_text(t, &spec), &text, max_width);

        let mut baseline = self.geo.height * 0.58;
        for line in &lines {
            let width = self.surface.measure_text(line, &spec);
            let x = self.geo.content_center - width / 2.0;
            self.surface.fill_text(line, x, baseline, &spec, INK);
            baseline += BODY_LINE_HEIGHT;
        }
    }

    fn draw_signature_block(&mut self) -> LaureaResult<()> {
        let cx = self.geo.content_center;
        let line_y = self.geo.height * 0.845;
        let line_width = 280.0;

        match &self.assets.signature {
            Some(signature) => {
                let height = 70.0;
                let width = (height * signature.aspect()).min(line_width);
                self.surface.draw_image(
                    signature,
                    cx - width / 2.0,
                    line_y - height - 8.0,
                    width,
                    height,
                    1.0,
                )?;
            }
            None => {
                // Generated fallback so the block never shows a gap.
                let scrawl = shapes::signature_stroke_path(cx, line_y - 18.0, 240.0);
                self.surface.stroke_path(&scrawl, &Paint::Solid(INK), 2.2);
            }
        }

        self.surface.stroke_path(
            &line_path((cx - line_width / 2.0, line_y), (cx + line_width / 2.0, line_y)),
            &Paint::Solid(INK_MUTED),
            1.5,
        );

        let name_spec = FontSpec::serif(SIGNATORY_NAME_SIZE);
        let name_width = self.surface.measure_text(&self.cfg.signatory_name, &name_spec);
        self.surface.fill_text(
            &self.cfg.signatory_name,
            cx - name_width / 2.0,
            line_y + 32.0,
            &name_spec,
            INK,
        );

        let title_spec = FontSpec::serif(SIGNATORY_TITLE_SIZE);
        let title_width = self
            .surface
            .measure_text(&self.cfg.signatory_title, &title_spec);
        self.surface.fill_text(
            &self.cfg.signatory_title,
            cx - title_width / 2.0,
            line_y + 60.0,
            &title_spec,
            INK_MUTED,
        );
        Ok(())
    }

    fn draw_stamp(&mut self) -> LaureaResult<()> {
        let Some(stamp) = &self.assets.stamp else {
            return Ok(());
        };
        let size = 170.0;
        let x = self.geo.width - size - 110.0;
        let y = self.geo.height - size - 130.0;
        self.surface.draw_image(stamp, x, y, size, size, 0.55)
    }

    fn draw_logo(&mut self) -> LaureaResult<()> {
        let Some(logo) = &self.assets.logo else {
            return Ok(());
        };
        let height = 90.0;
        let width = (height * logo.aspect()).min(260.0);
        let x = self.geo.width - width - 56.0;
        self.surface.draw_image(logo, x, 48.0, width, height, 0.95)
    }
}

fn inset_rect(geo: &Geometry, inset: f64) -> Rect {
    Rect::new(inset, inset, geo.width - inset, geo.height - inset)
}

fn line_path(from: (f64, f64), to: (f64, f64)) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}
