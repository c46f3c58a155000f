//! Software raster surface, painting into `tiny_skia` pixmaps.
//!
//! Layers are sized in physical pixels and draw with a device-pixel-ratio transform, so callers
//! keep working in logical pixels.

use crate::overlay::{LogicalSize, Surface};
use inkboard_core::canvas::{Canvas, Path, PathEl};
use inkboard_core::Rgb;

/// One paintable layer of the surface.
pub struct Layer {
    pixmap: tiny_skia::Pixmap,
    transform: tiny_skia::Transform,
}
impl Layer {
    /// A transparent layer covering `size` logical pixels at the given pixel ratio.
    #[must_use]
    pub fn new(size: LogicalSize, device_pixel_ratio: f32) -> Self {
        let [width, height] = size.physical(device_pixel_ratio);
        // Zero sized pixmaps aren't allowed, but a 1x1 one always is.
        let pixmap = tiny_skia::Pixmap::new(width.max(1), height.max(1))
            .or_else(|| tiny_skia::Pixmap::new(1, 1));
        let Some(pixmap) = pixmap else {
            unreachable!("1x1 pixmap allocation failed")
        };
        Self {
            pixmap,
            transform: tiny_skia::Transform::from_scale(device_pixel_ratio, device_pixel_ratio),
        }
    }
    #[must_use]
    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }
    fn paint(color: Rgb) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, u8::MAX);
        paint.anti_alias = true;
        paint
    }
}
impl Canvas for Layer {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }
    fn fill(&mut self, path: &Path, color: Rgb) {
        let Some(path) = to_skia(path) else {
            log::trace!("skipped degenerate fill");
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            tiny_skia::FillRule::Winding,
            self.transform,
            None,
        );
    }
    fn stroke(&mut self, path: &Path, color: Rgb, width: f32) {
        let Some(path) = to_skia(path) else {
            log::trace!("skipped degenerate stroke");
            return;
        };
        let stroke = tiny_skia::Stroke {
            width,
            line_cap: tiny_skia::LineCap::Round,
            line_join: tiny_skia::LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &Self::paint(color), &stroke, self.transform, None);
    }
}

/// `None` for paths tiny-skia can't represent, such as empty ones.
fn to_skia(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x, p.y),
            PathEl::LineTo(p) => builder.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x, c.y, p.x, p.y),
            PathEl::CubicTo(c0, c1, p) => builder.cubic_to(c0.x, c0.y, c1.x, c1.y, p.x, p.y),
            PathEl::Close => builder.close(),
        }
    }
    builder.finish()
}

/// The overlay's two layers: finished ink, and the live calligraphy guide above it.
pub struct RasterSurface {
    main: Layer,
    guide: Layer,
    size: LogicalSize,
    device_pixel_ratio: f32,
}
impl RasterSurface {
    #[must_use]
    pub fn new(size: LogicalSize, device_pixel_ratio: f32) -> Self {
        Self {
            main: Layer::new(size, device_pixel_ratio),
            guide: Layer::new(size, device_pixel_ratio),
            size,
            device_pixel_ratio,
        }
    }
    #[must_use]
    pub fn size(&self) -> LogicalSize {
        self.size
    }
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }
    #[must_use]
    pub fn main(&self) -> &Layer {
        &self.main
    }
    #[must_use]
    pub fn guide(&self) -> &Layer {
        &self.guide
    }
    /// Blend both layers over `target` at `opacity`. `target` is expected to be the same
    /// physical size, anything outside of it is cut off.
    pub fn composite_onto(&self, target: &mut tiny_skia::PixmapMut<'_>, opacity: f32) {
        let paint = tiny_skia::PixmapPaint {
            opacity: opacity.clamp(0.0, 1.0),
            ..tiny_skia::PixmapPaint::default()
        };
        for layer in [&self.main, &self.guide] {
            target.draw_pixmap(
                0,
                0,
                layer.pixmap.as_ref(),
                &paint,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }
    /// A new image of the layers over a solid background. `None` background leaves it transparent.
    #[must_use]
    pub fn composite(&self, background: Option<Rgb>, opacity: f32) -> tiny_skia::Pixmap {
        let mut target = self.main.pixmap.clone();
        match background {
            Some(color) => target.fill(tiny_skia::Color::from_rgba8(
                color.r,
                color.g,
                color.b,
                u8::MAX,
            )),
            None => target.fill(tiny_skia::Color::TRANSPARENT),
        }
        self.composite_onto(&mut target.as_mut(), opacity);
        target
    }
}
impl Surface for RasterSurface {
    type Layer = Layer;
    fn resize(&mut self, size: LogicalSize, device_pixel_ratio: f32) {
        *self = Self::new(size, device_pixel_ratio);
    }
    fn layers(&mut self) -> (&mut Layer, &mut Layer) {
        (&mut self.main, &mut self.guide)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use inkboard_core::math::Vec2;

    fn alpha(layer: &Layer, x: u32, y: u32) -> u8 {
        layer.pixmap().pixel(x, y).unwrap().alpha()
    }
    fn square(min: f32, max: f32) -> Path {
        Path::polygon(&[
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ])
    }

    #[test]
    fn scaled_by_pixel_ratio() {
        let mut layer = Layer::new(LogicalSize::new(20.0, 20.0), 2.0);
        assert_eq!(layer.pixmap().width(), 40);
        layer.fill(&square(0.0, 10.0), Rgb::BLACK);
        // Logical (5, 5) lands on physical (10, 10).
        assert_eq!(alpha(&layer, 10, 10), u8::MAX);
        assert_eq!(alpha(&layer, 25, 25), 0);
        layer.clear();
        assert_eq!(alpha(&layer, 10, 10), 0);
    }
    #[test]
    fn round_stroke() {
        let mut layer = Layer::new(LogicalSize::new(20.0, 20.0), 1.0);
        let mut path = Path::new();
        path.move_to(Vec2::new(2.0, 10.0)).line_to(Vec2::new(18.0, 10.0));
        layer.stroke(&path, Rgb::WHITE, 4.0);
        assert!(alpha(&layer, 10, 10) > 0);
        assert_eq!(alpha(&layer, 10, 2), 0);
    }
    #[test]
    fn empty_paths_are_skipped() {
        let mut layer = Layer::new(LogicalSize::new(4.0, 4.0), 1.0);
        layer.fill(&Path::new(), Rgb::BLACK);
        layer.stroke(&Path::new(), Rgb::BLACK, 1.0);
        assert!(layer.pixmap().pixels().iter().all(|p| p.alpha() == 0));
    }
    #[test]
    fn zero_size_still_allocates() {
        let surface = RasterSurface::new(LogicalSize::new(0.0, 0.0), 1.0);
        assert_eq!(surface.main().pixmap().width(), 1);
    }
    #[test]
    fn composite_applies_opacity() {
        let mut surface = RasterSurface::new(LogicalSize::new(10.0, 10.0), 1.0);
        let (main, _) = surface.layers();
        main.fill(&square(0.0, 10.0), Rgb::BLACK);
        let image = surface.composite(None, 0.5);
        let a = f32::from(image.pixel(5, 5).unwrap().alpha()) / 255.0;
        assert_abs_diff_eq!(a, 0.5, epsilon = 0.01);
        let image = surface.composite(Some(Rgb::WHITE), 1.0);
        let p = image.pixel(5, 5).unwrap();
        assert_eq!((p.red(), p.alpha()), (0, u8::MAX));
    }
}
