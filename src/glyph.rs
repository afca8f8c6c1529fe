//! Rasterizes a single emoji character for download.
//!
//! The glyph is laid out on a square white surface in a box 80% of its side,
//! pushed down by 5% of the side because emoji fonts put the visual centre
//! above the em-box middle. Hosts supply the text layout through
//! [`GlyphSource`]; [`GlyphRenderer`] is the native one, using Twemoji
//! artwork (feature `twemoji`) or font text through usvg.
//!
//! A render that leaves the surface white is an error rather than a blank
//! download.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use palette::Srgb;
use resvg::tiny_skia::Transform;
use resvg::usvg::{Options, Tree, fontdb};

use crate::error::ExportError;
use crate::raster::PixmapSurface;

/// Fraction of the surface side taken by the glyph.
pub const GLYPH_SCALE: f32 = 0.8;

/// Downward correction applied to the glyph centre, as a fraction of size.
pub const BASELINE_CORRECTION: f32 = 0.05;

const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// Something that can draw an emoji onto a white square.
pub trait GlyphSource {
    /// Side of the output square, in pixels.
    fn size(&self) -> u32;

    fn render(&self, emoji: &str) -> Result<RgbaImage, ExportError>;
}

/// `(x, y, side)` of the glyph box on a surface of the given size.
pub fn glyph_box(size: u32) -> (f32, f32, f32) {
    let size = size as f32;
    let side = size * GLYPH_SCALE;
    let x = (size - side) / 2.0;
    (x, x + size * BASELINE_CORRECTION, side)
}

/// Rejects an image in which every pixel is still white.
pub(crate) fn ensure_inked(img: RgbaImage, emoji: &str) -> Result<RgbaImage, ExportError> {
    let white = Rgba([WHITE.red, WHITE.green, WHITE.blue, 255]);
    if img.pixels().all(|p| *p == white) {
        log::warn!("nothing drawn for {emoji:?}");
        return Err(ExportError::BlankGlyph(emoji.to_string()));
    }
    Ok(img)
}

/// Looks up SVG artwork for an emoji.
pub type ArtLookup = fn(&str) -> Option<&'static str>;

#[cfg(feature = "twemoji")]
fn twemoji_art(emoji: &str) -> Option<&'static str> {
    use twemoji_assets::svg::SvgTwemojiAsset;

    SvgTwemojiAsset::from_emoji(emoji).map(|asset| asset.as_ref())
}

#[cfg(not(feature = "twemoji"))]
fn twemoji_art(_emoji: &str) -> Option<&'static str> {
    None
}

pub struct GlyphRenderer {
    size: u32,
    options: Options<'static>,
    art: ArtLookup,
}

impl GlyphRenderer {
    /// Creates a renderer using the fonts installed on the system.
    pub fn new(size: u32) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("glyph renderer loaded {} font faces", db.len());
        Self::with_fonts(size, db)
    }

    /// Creates a renderer with an explicit font database.
    pub fn with_fonts(size: u32, db: fontdb::Database) -> Self {
        let mut options = Options::default();
        options.fontdb = Arc::new(db);
        Self {
            size,
            options,
            art: twemoji_art,
        }
    }

    /// Replaces the artwork lookup tried before font text.
    pub fn with_art(mut self, art: ArtLookup) -> Self {
        self.art = art;
        self
    }

    fn parse(&self, svg: &str, emoji: &str) -> Result<Tree, ExportError> {
        Tree::from_str(svg, &self.options).map_err(|err| ExportError::Glyph {
            emoji: emoji.to_string(),
            reason: err.to_string(),
        })
    }

    /// Scales artwork to fit the glyph box, centred inside it.
    fn art_transform(&self, tree: &Tree) -> Transform {
        let (x, y, side) = glyph_box(self.size);
        let art = tree.size();
        let scale = side / art.width().max(art.height());
        let dx = x + (side - art.width() * scale) / 2.0;
        let dy = y + (side - art.height() * scale) / 2.0;
        Transform::from_scale(scale, scale).post_translate(dx, dy)
    }

    /// SVG equivalent of a canvas `fillText` centred on the surface.
    fn text_document(&self, emoji: &str) -> String {
        let size = self.size as f32;
        let font_size = size * GLYPH_SCALE;
        let x = size / 2.0;
        let y = size / 2.0 + size * BASELINE_CORRECTION;
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><text x="{x}" y="{y}" font-family="serif" font-size="{font_size}" text-anchor="middle" dominant-baseline="central">{}</text></svg>"#,
            escape_text(emoji)
        )
    }
}

impl GlyphSource for GlyphRenderer {
    fn size(&self) -> u32 {
        self.size
    }

    fn render(&self, emoji: &str) -> Result<RgbaImage, ExportError> {
        let mut surface = PixmapSurface::new(self.size, self.size)?;
        surface.fill(WHITE);

        match (self.art)(emoji) {
            Some(svg) => {
                let tree = self.parse(svg, emoji)?;
                surface.draw_tree(&tree, self.art_transform(&tree));
            }
            None => {
                let tree = self.parse(&self.text_document(emoji), emoji)?;
                surface.draw_tree(&tree, Transform::identity());
            }
        }

        ensure_inked(surface.to_rgba_image(), emoji)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
