//! Raster infrastructure shared by the glyph renderer and the composer.
//!
//! Drawing goes through the [`DrawingSurface`] trait; the native
//! implementation is [`PixmapSurface`], backed by tiny-skia. Finished
//! surfaces are converted to straight-alpha `image::RgbaImage`s for export.

pub mod surface;

pub use surface::{CircularArc, DrawingSurface, PixmapSurface, Point};
