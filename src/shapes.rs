//! Pure path constructors for the certificate's decorative vector work.
//!
//! Everything here is a deterministic function of [`Geometry`] and the
//! palette; no drawing state is touched. All angular generation starts at
//! `-PI/2` (pointing up) and every filled shape closes explicitly.

use std::f64::consts::PI;

use kurbo::{BezPath, Circle, Point, Shape};

use crate::{
    config::{Geometry, Palette, Rgba8},
    surface::Paint,
};

/// Number of teeth on the serrated rosette ring.
pub const ROSETTE_TEETH: u32 = 32;
/// Radial depth of each rosette serration, in canvas units.
pub const ROSETTE_SERRATION: f64 = 14.0;
/// Inset of the medallion's inner disc from the rosette radius.
pub const DISC_INSET: f64 = 26.0;
/// Inset of the star's outer radius from the inner disc radius.
pub const STAR_INSET: f64 = 10.0;
/// Ratio of the star's inner radius to its outer radius.
pub const STAR_INNER_RATIO: f64 = 0.42;
/// Number of star spikes (twice as many vertices).
pub const STAR_SPIKES: u32 = 5;
/// Horizontal thickness of the accent stripe hugging the panel curve.
pub const STRIPE_OFFSET: f64 = 18.0;

const START_ANGLE: f64 = -PI / 2.0;

/// Closed region of the colored side panel: left edge through a cubic
/// S-curve whose control points sit at 0.25H and 0.75H.
pub fn panel_path(geo: &Geometry) -> BezPath {
    let top = Point::new(geo.panel_width + geo.panel_swing, 0.0);
    let bottom = Point::new(geo.panel_width - geo.panel_swing, geo.height);
    let c1 = Point::new(geo.panel_width + 2.0 * geo.panel_swing, geo.height * 0.25);
    let c2 = Point::new(geo.panel_width - 2.0 * geo.panel_swing, geo.height * 0.75);

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to(top);
    path.curve_to(c1, c2, bottom);
    path.line_to((0.0, geo.height));
    path.close_path();
    path
}

pub fn panel_paint(geo: &Geometry, palette: &Palette) -> Paint {
    Paint::Linear {
        start: Point::new(0.0, 0.0),
        end: Point::new(geo.panel_width + geo.panel_swing, 0.0),
        stops: vec![(0.0, palette.primary), (1.0, palette.primary_dark)],
    }
}

/// Thin beveled stripe on the panel curve's inner edge: the S-curve drawn
/// forward, then a parallel curve back at a fixed horizontal offset.
pub fn accent_stripe_path(geo: &Geometry) -> BezPath {
    let top = Point::new(geo.panel_width + geo.panel_swing, 0.0);
    let bottom = Point::new(geo.panel_width - geo.panel_swing, geo.height);
    let c1 = Point::new(geo.panel_width + 2.0 * geo.panel_swing, geo.height * 0.25);
    let c2 = Point::new(geo.panel_width - 2.0 * geo.panel_swing, geo.height * 0.75);

    let mut path = BezPath::new();
    path.move_to(top);
    path.curve_to(c1, c2, bottom);
    path.line_to((bottom.x + STRIPE_OFFSET, geo.height));
    path.curve_to(
        (c2.x + STRIPE_OFFSET, geo.height * 0.75),
        (c1.x + STRIPE_OFFSET, geo.height * 0.25),
        (top.x + STRIPE_OFFSET, 0.0),
    );
    path.close_path();
    path
}

pub fn accent_stripe_paint(geo: &Geometry, palette: &Palette) -> Paint {
    Paint::Linear {
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, geo.height),
        stops: vec![
            (0.0, palette.accent),
            (0.5, palette.accent.lighten(0.45)),
            (1.0, palette.accent_dark),
        ],
    }
}

/// Two large, very-low-opacity curved regions in the body area.
pub fn swoosh_paths(geo: &Geometry) -> [BezPath; 2] {
    let (w, h) = (geo.width, geo.height);

    let mut upper = BezPath::new();
    upper.move_to((w * 0.45, 0.0));
    upper.curve_to((w * 0.60, h * 0.24), (w * 0.76, h * 0.10), (w, h * 0.22));
    upper.line_to((w, 0.0));
    upper.close_path();

    let mut lower = BezPath::new();
    lower.move_to((w, h * 0.62));
    lower.curve_to((w * 0.74, h * 0.76), (w * 0.58, h * 0.94), (w * 0.42, h));
    lower.line_to((w, h));
    lower.close_path();

    [upper, lower]
}

pub fn swoosh_paint(palette: &Palette) -> Paint {
    Paint::Solid(palette.primary.with_alpha(12))
}

/// The two ribbon tails hanging below the medallion anchor, as irregular
/// quadrilaterals.
pub fn ribbon_paths(center: Point, radius: f64) -> [BezPath; 2] {
    let quad = |sign: f64| -> BezPath {
        let mut path = BezPath::new();
        path.move_to((center.x + sign * 0.42 * radius, center.y + 0.35 * radius));
        path.line_to((center.x + sign * 0.72 * radius, center.y + 1.35 * radius));
        path.line_to((center.x + sign * 0.38 * radius, center.y + 1.12 * radius));
        path.line_to((center.x + sign * 0.12 * radius, center.y + 0.75 * radius));
        path.close_path();
        path
    };
    [quad(-1.0), quad(1.0)]
}

pub fn ribbon_paint(center: Point, radius: f64, palette: &Palette) -> Paint {
    Paint::Linear {
        start: Point::new(center.x, center.y),
        end: Point::new(center.x, center.y + 1.4 * radius),
        stops: vec![(0.0, palette.accent), (1.0, palette.accent_dark)],
    }
}

/// Outer ring of the medallion: a plain filled circle.
pub fn ring_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(1e-3)
}

pub fn ring_paint(center: Point, radius: f64, palette: &Palette) -> Paint {
    Paint::Radial {
        center,
        radius,
        stops: vec![
            (0.0, Rgba8::rgb(253, 248, 228)),
            (0.75, palette.accent),
            (1.0, palette.accent_dark),
        ],
    }
}

/// Serrated rosette boundary: `2 * teeth` vertices walked around the
/// center, alternating between `radius` and `radius - ROSETTE_SERRATION`,
/// joined into one closed polygon.
pub fn rosette_path(center: Point, radius: f64, teeth: u32) -> BezPath {
    alternating_polygon(
        center,
        radius,
        radius - ROSETTE_SERRATION,
        2 * teeth as usize,
    )
}

pub fn rosette_paint(palette: &Palette) -> Paint {
    Paint::Solid(palette.accent_dark)
}

/// Inner disc of the medallion.
pub fn disc_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(1e-3)
}

pub fn disc_paint(center: Point, radius: f64, palette: &Palette) -> Paint {
    Paint::Radial {
        center,
        radius,
        stops: vec![
            (0.0, Rgba8::rgb(255, 252, 240)),
            (1.0, palette.accent.lighten(0.25)),
        ],
    }
}

/// Multi-point star: `2 * spikes` vertices alternating between
/// `outer_radius` and `STAR_INNER_RATIO * outer_radius`.
pub fn star_path(center: Point, outer_radius: f64, spikes: u32) -> BezPath {
    alternating_polygon(
        center,
        outer_radius,
        STAR_INNER_RATIO * outer_radius,
        2 * spikes as usize,
    )
}

pub fn star_paint(center: Point, outer_radius: f64) -> Paint {
    Paint::Linear {
        start: Point::new(center.x, center.y - outer_radius),
        end: Point::new(center.x, center.y + outer_radius),
        stops: vec![(0.0, Rgba8::rgb(255, 255, 255)), (1.0, Rgba8::rgb(236, 214, 150))],
    }
}

fn alternating_polygon(center: Point, outer: f64, inner: f64, vertices: usize) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..vertices {
        let angle = START_ANGLE + (i as f64) * (2.0 * PI / vertices as f64);
        let r = if i % 2 == 0 { outer } else { inner };
        let p = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

/// Open cubic scrawl approximating a handwritten signature; stroked, not
/// filled. Used when the signature asset is absent so the block never
/// shows an empty gap.
pub fn signature_stroke_path(center_x: f64, baseline_y: f64, width: f64) -> BezPath {
    let left = center_x - width / 2.0;
    let right = center_x + width / 2.0;

    let mut path = BezPath::new();
    path.move_to((left, baseline_y - 4.0));
    path.curve_to(
        (left + width * 0.18, baseline_y - 34.0),
        (left + width * 0.30, baseline_y + 16.0),
        (left + width * 0.46, baseline_y - 10.0),
    );
    path.curve_to(
        (left + width * 0.60, baseline_y - 32.0),
        (left + width * 0.72, baseline_y + 12.0),
        (left + width * 0.86, baseline_y - 16.0),
    );
    path.curve_to(
        (left + width * 0.92, baseline_y - 26.0),
        (right - width * 0.02, baseline_y - 2.0),
        (right, baseline_y - 12.0),
    );
    path
}

/// Filled square rotated 45 degrees, used at the seam of the divider.
pub fn rotated_square_path(center: Point, half_diagonal: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((center.x, center.y - half_diagonal));
    path.line_to((center.x + half_diagonal, center.y));
    path.line_to((center.x, center.y + half_diagonal));
    path.line_to((center.x - half_diagonal, center.y));
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;
    use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

    fn vertices(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn is_closed(path: &BezPath) -> bool {
        matches!(path.elements().last(), Some(PathEl::ClosePath))
    }

    #[test]
    fn rosette_has_64_alternating_vertices() {
        let center = Point::new(100.0, 100.0);
        let path = rosette_path(center, 92.0, ROSETTE_TEETH);
        let verts = vertices(&path);
        assert_eq!(verts.len(), 64);
        assert!(is_closed(&path));

        for (i, v) in verts.iter().enumerate() {
            let r = center.distance(*v);
            let expect = if i % 2 == 0 { 92.0 } else { 92.0 - ROSETTE_SERRATION };
            assert!((r - expect).abs() < 1e-9, "vertex {i}: r={r}, expected {expect}");
        }
    }

    #[test]
    fn star_has_10_vertices_with_042_ratio() {
        let center = Point::new(0.0, 0.0);
        let path = star_path(center, 50.0, STAR_SPIKES);
        let verts = vertices(&path);
        assert_eq!(verts.len(), 10);
        assert!(is_closed(&path));

        for (i, v) in verts.iter().enumerate() {
            let r = center.distance(*v);
            let expect = if i % 2 == 0 { 50.0 } else { 0.42 * 50.0 };
            assert!((r - expect).abs() < 1e-9);
        }
    }

    #[test]
    fn angular_shapes_start_pointing_up() {
        let center = Point::new(10.0, 10.0);
        let star = vertices(&star_path(center, 50.0, STAR_SPIKES));
        assert!((star[0].x - 10.0).abs() < 1e-9);
        assert!((star[0].y - (10.0 - 50.0)).abs() < 1e-9);

        let rosette = vertices(&rosette_path(center, 80.0, ROSETTE_TEETH));
        assert!((rosette[0].x - 10.0).abs() < 1e-9);
        assert!((rosette[0].y - (10.0 - 80.0)).abs() < 1e-9);
    }

    #[test]
    fn panel_and_stripe_are_closed_regions() {
        let geo = Geometry::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        assert!(is_closed(&panel_path(&geo)));
        assert!(is_closed(&accent_stripe_path(&geo)));
        for swoosh in swoosh_paths(&geo) {
            assert!(is_closed(&swoosh));
        }
    }

    #[test]
    fn ribbons_are_closed_quadrilaterals_below_anchor() {
        let center = Point::new(200.0, 700.0);
        for ribbon in ribbon_paths(center, 92.0) {
            assert!(is_closed(&ribbon));
            let verts = vertices(&ribbon);
            assert_eq!(verts.len(), 4);
            assert!(verts.iter().all(|v| v.y > center.y));
        }
    }

    #[test]
    fn signature_fallback_is_an_open_stroke() {
        let path = signature_stroke_path(700.0, 800.0, 260.0);
        assert!(!is_closed(&path));
        assert!(path.elements().len() > 1);
    }

    #[test]
    fn rotated_square_vertices_sit_on_diagonals() {
        let path = rotated_square_path(Point::new(0.0, 0.0), 7.0);
        let verts = vertices(&path);
        assert_eq!(verts.len(), 4);
        for v in verts {
            assert!((v.x.abs() + v.y.abs() - 7.0).abs() < 1e-9);
        }
    }
}
