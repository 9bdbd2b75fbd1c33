use std::{borrow::Cow, collections::HashMap};

use kurbo::{BezPath, PathEl, Point};

use crate::{
    assets::DecodedAsset,
    config::Rgba8,
    error::{LaureaError, LaureaResult},
    render::Artifact,
};

/// Fill/stroke style for path drawing.
#[derive(Clone, Debug)]
pub enum Paint {
    Solid(Rgba8),
    /// Linear gradient between two points in canvas coordinates.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<(f32, Rgba8)>,
    },
    /// Radial gradient around a center in canvas coordinates.
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<(f32, Rgba8)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    Script,
    SansSerif,
}

impl FontFamily {
    fn stack(self) -> &'static str {
        match self {
            FontFamily::Serif => "Georgia, Times New Roman, serif",
            FontFamily::Script => "Segoe Script, Brush Script MT, cursive",
            FontFamily::SansSerif => "Helvetica, Arial, sans-serif",
        }
    }
}

/// Font selection for one measurement or draw call.
///
/// Widths returned by measurement are only meaningful for the exact
/// font they were measured with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn serif(size: f32) -> Self {
        Self {
            family: FontFamily::Serif,
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn script(size: f32) -> Self {
        Self {
            family: FontFamily::Script,
            ..Self::serif(size)
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn italic(self) -> Self {
        Self { italic: true, ..self }
    }

    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }
}

/// A mutable 2D raster target owned by exactly one in-flight render.
///
/// The compositor drives this strictly sequentially; implementations are
/// not required to be thread-safe.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn fill_path(&mut self, path: &BezPath, paint: &Paint);

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint, width: f64);

    /// Advance width of `text` under `font`, in canvas units.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64;

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font: &FontSpec, color: Rgba8);

    /// Blit a decoded bitmap scaled into the given rectangle.
    fn draw_image(
        &mut self,
        asset: &DecodedAsset,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        opacity: f32,
    ) -> LaureaResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Parley shaping state shared by all measurements and draws of one surface.
struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl TextShaper {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn layout(&mut self, text: &str, font: &FontSpec, brush: TextBrush) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Borrowed(font.family.stack())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if font.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if font.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        // Single logical line; wrapping is the typography engine's job.
        layout.break_all_lines(None);
        layout
    }
}

/// CPU raster surface over `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    shaper: TextShaper,
    font_cache: HashMap<u64, vello_cpu::peniko::FontData>,
    image_cache: HashMap<usize, vello_cpu::Image>,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> LaureaResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| LaureaError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| LaureaError::render("surface height exceeds u16"))?;

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            shaper: TextShaper::new(),
            font_cache: HashMap::new(),
            image_cache: HashMap::new(),
        })
    }

    /// Rasterize everything drawn so far into an immutable artifact.
    pub fn into_artifact(mut self) -> Artifact {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Artifact {
            width: u32::from(self.width),
            height: u32::from(self.height),
            rgba8_premul: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    fn apply_paint(&mut self, paint: &Paint) {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match paint {
            Paint::Solid(c) => self.ctx.set_paint(color_to_cpu(*c)),
            Paint::Linear { start, end, stops } => {
                let gradient =
                    vello_cpu::peniko::Gradient::new_linear(point_to_cpu(*start), point_to_cpu(*end))
                        .with_stops(stops_to_cpu(stops).as_slice());
                self.ctx.set_paint(gradient);
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let gradient =
                    vello_cpu::peniko::Gradient::new_radial(point_to_cpu(*center), *radius as f32)
                        .with_stops(stops_to_cpu(stops).as_slice());
                self.ctx.set_paint(gradient);
            }
        }
    }

    // parley and vello_cpu may pin different peniko versions, so font data
    // crosses the boundary as raw bytes (keyed by the source blob id).
    fn font_for_blob(&mut self, blob_id: u64, bytes: &[u8], index: u32) -> vello_cpu::peniko::FontData {
        if let Some(cached) = self.font_cache.get(&blob_id) {
            return cached.clone();
        }
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), index);
        self.font_cache.insert(blob_id, data.clone());
        data
    }

    fn image_paint_for(&mut self, asset: &DecodedAsset) -> LaureaResult<vello_cpu::Image> {
        let key = std::sync::Arc::as_ptr(&asset.rgba8_premul) as usize;
        if let Some(cached) = self.image_cache.get(&key) {
            return Ok(cached.clone());
        }

        let pixmap =
            premul_bytes_to_pixmap(asset.rgba8_premul.as_slice(), asset.width, asset.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(key, paint.clone());
        Ok(paint)
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        self.apply_paint(paint);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint, width: f64) {
        self.apply_paint(paint);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let layout = self.shaper.layout(text, font, TextBrush::default());
        let mut width = 0.0f64;
        for line in layout.lines() {
            width = width.max(f64::from(line.metrics().advance));
        }
        width
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font: &FontSpec, color: Rgba8) {
        if text.is_empty() {
            return;
        }
        let layout = self.shaper.layout(text, font, TextBrush::from(color));
        let Some(first_line) = layout.lines().next() else {
            return;
        };
        let offset_y = baseline - f64::from(first_line.metrics().baseline);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, offset_y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let font = run.run().font();
                let font_data = self.font_for_blob(font.data.id(), font.data.as_ref(), font.index);
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn draw_image(
        &mut self,
        asset: &DecodedAsset,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        opacity: f32,
    ) -> LaureaResult<()> {
        let paint = self.image_paint_for(asset)?;
        let iw = f64::from(asset.width.max(1));
        let ih = f64::from(asset.height.max(1));

        self.ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((x, y))
                * vello_cpu::kurbo::Affine::scale_non_uniform(width / iw, height / ih),
        );
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);

        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn stops_to_cpu(stops: &[(f32, Rgba8)]) -> Vec<(f32, vello_cpu::peniko::Color)> {
    stops
        .iter()
        .map(|&(offset, c)| (offset, color_to_cpu(c)))
        .collect()
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> LaureaResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LaureaError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LaureaError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(LaureaError::render("decoded image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
