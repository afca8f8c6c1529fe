//! emoticon-studio: emoji library browser and custom face composer
//!
//! This crate provides the state and rendering behind an emoji web page: a
//! categorized, searchable emoji catalog with a single selection, copy and
//! download of the selected emoji, and a composer that draws a round face
//! from a colour, an eye style and a mouth style.
//!
//! # Example
//!
//! ```
//! use emoticon_studio::{Catalog, LibraryBrowser};
//!
//! let mut browser = LibraryBrowser::new(Catalog::builtin());
//!
//! // Search spans every category
//! let grid = browser.set_search_query("dog");
//! let names: Vec<_> = grid.iter().map(|item| item.title.as_str()).collect();
//! assert_eq!(names, ["Dog Face", "Hot Dog"]);
//!
//! // Clearing the query brings back the current category
//! let grid = browser.set_search_query("");
//! assert_eq!(grid[0].title, "Grinning Face");
//! ```
//!
//! # Composing a Face
//!
//! ```
//! use emoticon_studio::{Composer, EyeStyle, FaceColor, MouthStyle};
//!
//! let mut composer = Composer::new(240).unwrap();
//! composer.select_color(FaceColor::from_hex("#AED581").unwrap());
//! composer.select_eyes(EyeStyle::Happy);
//! composer.select_mouth(MouthStyle::Open);
//!
//! // The face disc fills the centre of the surface
//! let img = composer.surface().to_rgba_image();
//! assert_eq!(img.get_pixel(120, 200).0, [0xAE, 0xD5, 0x81, 255]);
//! ```
//!
//! # Host Capabilities
//!
//! Clipboard access, the copy fallback, file saving and toast display are
//! traits ([`Clipboard`], [`CopyStaging`], [`FileSaver`], [`ToastSink`]).
//! The `web` feature implements them for the browser and exposes
//! `StudioApp` through `wasm-bindgen`.

mod browser;
mod catalog;
mod clipboard;
mod composer;
mod config;
mod error;
mod export;
mod glyph;
mod profile;
mod raster;
mod toast;

#[cfg(feature = "web")]
mod web;

pub use browser::{
    BrowserView, CategoryControl, GridItem, LibraryBrowser, Preview, SelectionState,
};
pub use catalog::{Catalog, Category, EmojiRecord};
pub use clipboard::{
    Clipboard, CopyOutcome, CopyStaging, NoClipboard, copy_text, fallback_copy_text,
};
pub use composer::{
    Composer, ComposerState, CreatorOptions, EyeStyle, FACE_COLORS, FaceColor, MouthStyle,
    OptionControl, StyleOption, draw_face,
};
pub use config::StudioConfig;
pub use error::{CatalogError, ClipboardError, ExportError, ProfileError};
pub use export::{CUSTOM_EMOJI_FILENAME, FileSaver, PNG_MIME, emoji_filename, encode_png, png_data_uri};
pub use glyph::{ArtLookup, BASELINE_CORRECTION, GLYPH_SCALE, GlyphRenderer, GlyphSource, glyph_box};
pub use profile::{ComposerProfile, Configurable};
pub use raster::{CircularArc, DrawingSurface, PixmapSurface, Point};
pub use raster::surface::LocalRect;
pub use toast::{Toast, ToastPhase, ToastSink, Toaster};

#[cfg(feature = "web")]
pub use web::{CanvasGlyphs, StudioApp, WebClipboard, WebFileSaver, WebStaging};
