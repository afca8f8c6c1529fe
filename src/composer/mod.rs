//! The custom emoji composer.
//!
//! A face is composited back to front onto a square surface:
//!
//! ```text
//! ┌──────────────┐
//! │  Face disc   │ ◄── selected colour, radius 100 units, surface centre
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │     Eyes     │ ◄── drawn around (cx, cy - 10 units)
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Mouth     │ ◄── drawn around (cx, cy + 10 units)
//! └──────────────┘
//! ```
//!
//! Geometry is expressed in a 240-unit design space and multiplied by
//! `surface_width / 240`, so any surface size gives the same picture.
//!
//! # Example
//!
//! ```
//! use emoticon_studio::{Composer, EyeStyle, MouthStyle};
//!
//! let mut composer = Composer::new(240).unwrap();
//! composer.select_eyes(EyeStyle::Starry);
//! composer.select_mouth(MouthStyle::Tongue);
//! let png = composer.png().unwrap();
//! assert!(!png.is_empty());
//! ```

pub mod eyes;
pub mod mouth;

pub use eyes::EyeStyle;
pub use mouth::MouthStyle;

use std::future::Future;

use palette::Srgb;
use serde::Serialize;

use crate::clipboard::{Clipboard, CopyOutcome, CopyStaging, run_fallback};
use crate::config::StudioConfig;
use crate::error::ExportError;
use crate::export::{CUSTOM_EMOJI_FILENAME, FileSaver, PNG_MIME, encode_png, png_data_uri};
use crate::raster::{DrawingSurface, PixmapSurface, Point};
use crate::toast::ToastSink;

/// Width of the design space all composer geometry is written in.
pub const DESIGN_WIDTH: f32 = 240.0;

/// Face radius in design units.
pub const FACE_RADIUS: f32 = 100.0;

/// Vertical shift of the eye and mouth anchors from the face centre.
pub const FEATURE_SHIFT: f32 = 10.0;

/// Colour of eyes and mouths.
pub const INK: Srgb<u8> = Srgb::new(0, 0, 0);

// ============================================================================
// StyleOption
// ============================================================================

/// A selectable eye or mouth variant: identifier, display glyph and drawing.
pub trait StyleOption: Copy + PartialEq + Sized + 'static {
    /// Every variant, in picker order. The first one is the default.
    const ALL: &'static [Self];

    fn id(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Draws the feature around `center`, with design units multiplied by
    /// `scale`.
    fn draw<S: DrawingSurface + ?Sized>(self, surface: &mut S, center: Point, scale: f32);

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }
}

// ============================================================================
// Face colours
// ============================================================================

/// One entry of the fixed face colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceColor {
    hex: &'static str,
    rgb: Srgb<u8>,
}

impl FaceColor {
    const fn new(hex: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            hex,
            rgb: Srgb::new(r, g, b),
        }
    }

    /// `#RRGGBB`, upper case.
    pub fn hex(&self) -> &'static str {
        self.hex
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.rgb
    }

    /// Looks a colour up in the palette (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        FACE_COLORS
            .iter()
            .copied()
            .find(|c| c.hex.eq_ignore_ascii_case(hex.trim()))
    }
}

impl Default for FaceColor {
    fn default() -> Self {
        FACE_COLORS[0]
    }
}

pub const FACE_COLORS: [FaceColor; 7] = [
    FaceColor::new("#FFD966", 0xFF, 0xD9, 0x66),
    FaceColor::new("#F4B400", 0xF4, 0xB4, 0x00),
    FaceColor::new("#FFAB91", 0xFF, 0xAB, 0x91),
    FaceColor::new("#AED581", 0xAE, 0xD5, 0x81),
    FaceColor::new("#81D4FA", 0x81, 0xD4, 0xFA),
    FaceColor::new("#CE93D8", 0xCE, 0x93, 0xD8),
    FaceColor::new("#FFF59D", 0xFF, 0xF5, 0x9D),
];

// ============================================================================
// State and drawing
// ============================================================================

/// The current colour, eyes and mouth. Always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposerState {
    pub color: FaceColor,
    pub eyes: EyeStyle,
    pub mouth: MouthStyle,
}

/// Scale factor for a surface of the given width.
pub fn scale_for(width: u32) -> f32 {
    width as f32 / DESIGN_WIDTH
}

/// Clears `surface` and draws the face described by `state`.
pub fn draw_face<S: DrawingSurface + ?Sized>(surface: &mut S, state: &ComposerState) {
    let cx = surface.width() as f32 / 2.0;
    let cy = surface.height() as f32 / 2.0;
    let scale = scale_for(surface.width());

    surface.clear();
    surface.fill_circle(Point::new(cx, cy), FACE_RADIUS * scale, state.color.rgb());
    state
        .eyes
        .draw(surface, Point::new(cx, cy - FEATURE_SHIFT * scale), scale);
    state
        .mouth
        .draw(surface, Point::new(cx, cy + FEATURE_SHIFT * scale), scale);
}

// ============================================================================
// Picker view model
// ============================================================================

/// One clickable swatch or glyph in a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionControl {
    pub id: String,
    /// Text content; empty for colour swatches.
    pub label: String,
    pub aria_label: String,
    /// Background colour for swatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatch: Option<String>,
    pub selected: bool,
}

/// The three independent pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorOptions {
    pub colors: Vec<OptionControl>,
    pub eyes: Vec<OptionControl>,
    pub mouths: Vec<OptionControl>,
}

fn style_controls<O: StyleOption>(selected: O, prefix: &str) -> Vec<OptionControl> {
    O::ALL
        .iter()
        .map(|option| OptionControl {
            id: option.id().to_string(),
            label: option.label().to_string(),
            aria_label: format!("{prefix}: {}", option.id()),
            swatch: None,
            selected: *option == selected,
        })
        .collect()
}

// ============================================================================
// Composer
// ============================================================================

/// Owns the composer state and its surface.
///
/// Every selection change redraws the whole face.
pub struct Composer {
    state: ComposerState,
    surface: PixmapSurface,
    copied_message: String,
}

impl Composer {
    /// Creates a composer with a square surface and the default state.
    pub fn new(size: u32) -> Result<Self, ExportError> {
        let mut composer = Self {
            state: ComposerState::default(),
            surface: PixmapSurface::new(size, size)?,
            copied_message: StudioConfig::default().custom_copied_message,
        };
        composer.draw_custom_emoji();
        Ok(composer)
    }

    pub fn from_config(config: &StudioConfig) -> Result<Self, ExportError> {
        let mut composer = Self::new(config.composer_size)?;
        composer.copied_message = config.custom_copied_message.clone();
        Ok(composer)
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn surface(&self) -> &PixmapSurface {
        &self.surface
    }

    /// Replaces the whole state and redraws.
    pub fn set_state(&mut self, state: ComposerState) {
        self.state = state;
        self.draw_custom_emoji();
    }

    pub fn select_color(&mut self, color: FaceColor) {
        self.state.color = color;
        self.draw_custom_emoji();
    }

    pub fn select_eyes(&mut self, eyes: EyeStyle) {
        self.state.eyes = eyes;
        self.draw_custom_emoji();
    }

    pub fn select_mouth(&mut self, mouth: MouthStyle) {
        self.state.mouth = mouth;
        self.draw_custom_emoji();
    }

    /// Picker controls with the current selection marked.
    pub fn render_creator_options(&self) -> CreatorOptions {
        let colors = FACE_COLORS
            .iter()
            .map(|color| OptionControl {
                id: color.hex().to_string(),
                label: String::new(),
                aria_label: format!("Face colour {}", color.hex()),
                swatch: Some(color.hex().to_string()),
                selected: *color == self.state.color,
            })
            .collect();

        CreatorOptions {
            colors,
            eyes: style_controls(self.state.eyes, "Eyes"),
            mouths: style_controls(self.state.mouth, "Mouth"),
        }
    }

    /// Redraws the face from the current state.
    pub fn draw_custom_emoji(&mut self) {
        log::debug!(
            "drawing face {} / {} / {}",
            self.state.color.hex(),
            self.state.eyes.id(),
            self.state.mouth.id()
        );
        draw_face(&mut self.surface, &self.state);
    }

    /// PNG bytes of the current surface.
    pub fn png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(&self.surface.to_rgba_image())
    }

    /// Saves the face as `custom-emoji.png`.
    pub fn download_custom_emoji<F: FileSaver>(&self, saver: &mut F) -> Result<(), ExportError> {
        let png = self.png()?;
        saver.save(&png, CUSTOM_EMOJI_FILENAME)
    }

    /// Copies the face to the clipboard as an image.
    ///
    /// When the image write is unavailable or fails, the PNG data URI is
    /// copied as text through the staging fallback. That fallback does not
    /// announce itself with a toast.
    ///
    /// The returned future owns the encoded image and does not borrow the
    /// composer.
    pub fn copy_custom_emoji<'a, C, S, T>(
        &self,
        clipboard: &'a C,
        staging: &'a mut S,
        toasts: &'a T,
    ) -> impl Future<Output = CopyOutcome> + use<'a, C, S, T>
    where
        C: Clipboard,
        S: CopyStaging,
        T: ToastSink,
    {
        let png = self.png();
        let message = self.copied_message.clone();

        async move {
            let png = match png {
                Ok(png) => png,
                Err(err) => {
                    log::warn!("cannot encode custom emoji: {err}");
                    return CopyOutcome::Failed;
                }
            };

            if clipboard.supports_image() {
                match clipboard.write_image(&png, PNG_MIME).await {
                    Ok(()) => {
                        toasts.show_toast(&message);
                        return CopyOutcome::Clipboard;
                    }
                    Err(err) => log::debug!("image clipboard write failed: {err}"),
                }
            }

            run_fallback(staging, &png_data_uri(&png))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
