//! The 2D drawing capability used by the composer.
//!
//! Angles follow the HTML canvas convention: radians, measured from the
//! positive x axis, increasing clockwise on screen (y grows downwards).

use std::f32::consts::{FRAC_PI_2, TAU};

use image::{Rgba, RgbaImage};
use palette::Srgb;
use resvg::tiny_skia::{
    Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};
use resvg::usvg::Tree;

use crate::error::ExportError;

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A circular arc swept clockwise from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point,
    pub radius: f32,
    pub start: f32,
    pub end: f32,
}

impl CircularArc {
    pub const fn new(center: Point, radius: f32, start: f32, end: f32) -> Self {
        Self {
            center,
            radius,
            start,
            end,
        }
    }

    /// Clockwise sweep in radians, in `(0, 2π]`. Zero for a degenerate arc.
    pub fn sweep(&self) -> f32 {
        let mut sweep = self.end - self.start;
        if sweep.abs() >= TAU {
            return TAU;
        }
        if sweep < 0.0 {
            sweep += TAU;
        }
        sweep
    }

    pub fn point_at(&self, angle: f32) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

// ============================================================================
// DrawingSurface
// ============================================================================

/// A square-pixel raster target with canvas-like primitives.
pub trait DrawingSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Srgb<u8>);

    /// Fills the region enclosed by the arc and its chord.
    fn fill_arc(&mut self, arc: CircularArc, color: Srgb<u8>);

    fn stroke_arc(&mut self, arc: CircularArc, line_width: f32, color: Srgb<u8>);

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32, color: Srgb<u8>);

    /// Fills `rect` (in local coordinates) after rotating it by `degrees`
    /// about the local origin, which is placed at `origin`.
    fn fill_rotated_rect(&mut self, origin: Point, degrees: f32, rect: LocalRect, color: Srgb<u8>);
}

/// A rectangle in a surface-local coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LocalRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// PixmapSurface
// ============================================================================

/// A [`DrawingSurface`] rasterized with tiny-skia.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, ExportError> {
        let pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fills the whole surface with an opaque colour.
    pub fn fill(&mut self, color: Srgb<u8>) {
        self.pixmap
            .fill(Color::from_rgba8(color.red, color.green, color.blue, 255));
    }

    /// Renders a parsed SVG tree over the current pixels.
    pub fn draw_tree(&mut self, tree: &Tree, transform: Transform) {
        resvg::render(tree, transform, &mut self.pixmap.as_mut());
    }

    /// Straight-alpha copy of the current pixels.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}

fn paint(color: Srgb<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, 255);
    paint.anti_alias = true;
    paint
}

/// Approximates the arc with cubic Béziers, one per quarter turn at most.
fn arc_path(arc: &CircularArc, close: bool) -> Option<Path> {
    let sweep = arc.sweep();
    if sweep <= 0.0 || arc.radius <= 0.0 {
        return None;
    }

    let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * arc.radius;

    let mut pb = PathBuilder::new();
    let first = arc.point_at(arc.start);
    pb.move_to(first.x, first.y);

    for i in 0..segments {
        let a0 = arc.start + step * i as f32;
        let a1 = a0 + step;
        let p0 = arc.point_at(a0);
        let p3 = arc.point_at(a1);
        pb.cubic_to(
            p0.x - k * a0.sin(),
            p0.y + k * a0.cos(),
            p3.x + k * a1.sin(),
            p3.y - k * a1.cos(),
            p3.x,
            p3.y,
        );
    }

    if close {
        pb.close();
    }
    pb.finish()
}

impl DrawingSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Srgb<u8>) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_arc(&mut self, arc: CircularArc, color: Srgb<u8>) {
        if let Some(path) = arc_path(&arc, true) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_arc(&mut self, arc: CircularArc, line_width: f32, color: Srgb<u8>) {
        if let Some(path) = arc_path(&arc, false) {
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32, color: Srgb<u8>) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }

    fn fill_rotated_rect(&mut self, origin: Point, degrees: f32, rect: LocalRect, color: Srgb<u8>) {
        let Some(r) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let transform = Transform::from_rotate(degrees).post_translate(origin.x, origin.y);
        self.pixmap.fill_rect(r, &paint(color), transform, None);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);
    const RED: Srgb<u8> = Srgb::new(255, 0, 0);

    fn alpha_at(surface: &PixmapSurface, x: u32, y: u32) -> u8 {
        surface.to_rgba_image().get_pixel(x, y)[3]
    }

    #[test]
    fn sweep_normalization() {
        let c = Point::new(0.0, 0.0);
        assert!((CircularArc::new(c, 1.0, PI, 0.0).sweep() - PI).abs() < 1e-6);
        assert!((CircularArc::new(c, 1.0, 0.0, PI).sweep() - PI).abs() < 1e-6);
        assert!((CircularArc::new(c, 1.0, 0.0, TAU).sweep() - TAU).abs() < 1e-6);
        assert_eq!(CircularArc::new(c, 1.0, 1.0, 1.0).sweep(), 0.0);
    }

    #[test]
    fn translucent_pixels_are_demultiplied() {
        let mut s = PixmapSurface::new(2, 2).unwrap();
        s.pixmap.fill(Color::from_rgba8(255, 0, 0, 51));
        let px = s.to_rgba_image().get_pixel(1, 1).0;
        assert_eq!(px[3], 51);
        assert!(px[0] >= 250);
        assert_eq!(px[1], 0);
    }

    #[test]
    fn tree_is_drawn_with_transform() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#0000ff"/></svg>"##;
        let tree = Tree::from_str(svg, &resvg::usvg::Options::default()).unwrap();
        let mut s = PixmapSurface::new(40, 40).unwrap();
        s.draw_tree(&tree, Transform::from_scale(2.0, 2.0).post_translate(20.0, 20.0));
        let img = s.to_rgba_image();
        assert_eq!(img.get_pixel(30, 30).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(10, 10)[3], 0);
    }

    #[test]
    fn clear_makes_transparent() {
        let mut s = PixmapSurface::new(8, 8).unwrap();
        s.fill(RED);
        assert_eq!(alpha_at(&s, 4, 4), 255);
        s.clear();
        assert_eq!(alpha_at(&s, 4, 4), 0);
    }

    #[test]
    fn filled_circle_covers_center_only() {
        let mut s = PixmapSurface::new(40, 40).unwrap();
        s.fill_circle(Point::new(20.0, 20.0), 10.0, RED);
        let img = s.to_rgba_image();
        assert_eq!(img.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 2)[3], 0);
    }

    #[test]
    fn lower_half_disc() {
        let mut s = PixmapSurface::new(40, 40).unwrap();
        s.fill_arc(CircularArc::new(Point::new(20.0, 20.0), 15.0, 0.0, PI), BLACK);
        assert_eq!(alpha_at(&s, 20, 30), 255);
        assert_eq!(alpha_at(&s, 20, 10), 0);
    }

    #[test]
    fn upper_arc_stroke() {
        let mut s = PixmapSurface::new(40, 40).unwrap();
        s.stroke_arc(
            CircularArc::new(Point::new(20.0, 20.0), 10.0, PI, 0.0),
            3.0,
            BLACK,
        );
        // Top of the arc is inked, bottom of the circle is not.
        assert!(alpha_at(&s, 20, 10) > 0);
        assert_eq!(alpha_at(&s, 20, 30), 0);
    }

    #[test]
    fn rotated_rect_lands_at_origin() {
        let mut s = PixmapSurface::new(40, 40).unwrap();
        s.fill_rotated_rect(
            Point::new(20.0, 20.0),
            45.0,
            LocalRect::new(-6.0, -2.0, 12.0, 4.0),
            BLACK,
        );
        assert_eq!(alpha_at(&s, 20, 20), 255);
        assert_eq!(alpha_at(&s, 2, 2), 0);
    }
}
