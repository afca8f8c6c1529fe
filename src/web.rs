//! Browser binding.
//!
//! [`StudioApp`] exposes the library browser, the composer and the toast slot
//! to JavaScript. The DOM capabilities the core is generic over are
//! implemented here on top of `web-sys`:
//!
//! - [`WebClipboard`]: `navigator.clipboard` text and `ClipboardItem` writes
//! - [`WebStaging`]: off-screen `<textarea>` plus `document.execCommand("copy")`
//! - [`WebFileSaver`]: `Blob` object URL and a synthetic anchor click
//! - [`CanvasGlyphs`]: emoji text laid out by the page's own canvas fonts
//!
//! # Feature Flag
//!
//! Only compiled with the `web` feature:
//!
//! ```toml
//! [dependencies]
//! emoticon-studio = { version = "0.1", features = ["web"] }
//! ```
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { StudioApp } from 'emoticon-studio';
//!
//! await init();
//! const app = new StudioApp();
//!
//! const view = app.clickCategory('animals');
//! if (await app.copySelected()) {
//!   paintToast(app.toast());
//! }
//!
//! app.selectEyes('wink');
//! app.renderCustomToCanvas(document.getElementById('custom-canvas'));
//! ```

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use image::RgbaImage;
use js_sys::{Array, Object, Promise, Reflect, Uint8Array};
use serde::Serialize;
use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, ClipboardItem, Document, HtmlAnchorElement,
    HtmlCanvasElement, HtmlDocument, HtmlTextAreaElement, ImageData, Url,
};
use web_time::Instant;

use crate::browser::LibraryBrowser;
use crate::catalog::Catalog;
use crate::clipboard::{Clipboard, CopyStaging};
use crate::composer::{Composer, EyeStyle, FaceColor, MouthStyle, StyleOption};
use crate::config::StudioConfig;
use crate::error::{ClipboardError, ExportError};
use crate::export::FileSaver;
use crate::glyph::{BASELINE_CORRECTION, GLYPH_SCALE, GlyphSource, ensure_inked};
use crate::profile::{ComposerProfile, Configurable};
use crate::toast::{ToastPhase, Toaster};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
}

fn js_error(err: impl Display) -> JsError {
    JsError::new(&err.to_string())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn png_blob(data: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(data));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

// ============================================================================
// WebClipboard
// ============================================================================

/// `navigator.clipboard`, when the page has one.
pub struct WebClipboard {
    clipboard: Option<web_sys::Clipboard>,
    has_clipboard_item: bool,
}

impl WebClipboard {
    pub fn new() -> Self {
        let Some(window) = web_sys::window() else {
            return Self {
                clipboard: None,
                has_clipboard_item: false,
            };
        };

        let navigator = window.navigator();
        let clipboard = Reflect::has(&navigator, &JsValue::from_str("clipboard"))
            .unwrap_or(false)
            .then(|| navigator.clipboard());
        let has_clipboard_item =
            Reflect::has(&window, &JsValue::from_str("ClipboardItem")).unwrap_or(false);

        Self {
            clipboard,
            has_clipboard_item,
        }
    }
}

impl Default for WebClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for WebClipboard {
    fn supports_text(&self) -> bool {
        self.clipboard.is_some()
    }

    fn supports_image(&self) -> bool {
        self.clipboard.is_some() && self.has_clipboard_item
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .clipboard
            .as_ref()
            .ok_or(ClipboardError::Unsupported("write-text"))?;
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(drop)
            .map_err(|e| ClipboardError::Rejected(describe(&e)))
    }

    async fn write_image(&self, data: &[u8], mime: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .clipboard
            .as_ref()
            .ok_or(ClipboardError::Unsupported("write-image"))?;

        let rejected = |e: JsValue| ClipboardError::Rejected(describe(&e));
        let record = Object::new();
        Reflect::set(&record, &JsValue::from_str(mime), &png_blob(data, mime).map_err(rejected)?)
            .map_err(rejected)?;
        let item = ClipboardItem::new_with_record_from_str_to_blob_promise(&record)
            .map_err(rejected)?;

        JsFuture::from(clipboard.write(&Array::of1(&item)))
            .await
            .map(drop)
            .map_err(rejected)
    }
}

// ============================================================================
// WebStaging
// ============================================================================

/// Off-screen `<textarea>` staging for `execCommand("copy")`.
pub struct WebStaging {
    document: Option<Document>,
}

impl WebStaging {
    pub fn new() -> Self {
        Self {
            document: document(),
        }
    }
}

impl Default for WebStaging {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyStaging for WebStaging {
    type Field = HtmlTextAreaElement;

    fn stage(&mut self, text: &str) -> Result<HtmlTextAreaElement, ClipboardError> {
        let failed = |e: JsValue| ClipboardError::CopyCommand(describe(&e));
        let document = self
            .document
            .as_ref()
            .ok_or(ClipboardError::Unsupported("document"))?;
        let body = document.body().ok_or(ClipboardError::Unsupported("body"))?;

        let field: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(failed)?
            .dyn_into()
            .map_err(|_| ClipboardError::CopyCommand("not a textarea".into()))?;
        field.set_value(text);
        let style = field.style();
        style.set_property("position", "fixed").map_err(failed)?;
        style.set_property("left", "-9999px").map_err(failed)?;

        body.append_child(&field).map_err(failed)?;
        Ok(field)
    }

    fn select(&mut self, field: &HtmlTextAreaElement) {
        field.select();
    }

    fn exec_copy(&mut self) -> Result<(), ClipboardError> {
        let document = self
            .document
            .as_ref()
            .and_then(|d| d.dyn_ref::<HtmlDocument>())
            .ok_or(ClipboardError::Unsupported("execCommand"))?;
        match document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::CopyCommand("copy command refused".into())),
            Err(e) => Err(ClipboardError::CopyCommand(describe(&e))),
        }
    }

    fn remove(&mut self, field: HtmlTextAreaElement) {
        field.remove();
    }
}

// ============================================================================
// WebFileSaver
// ============================================================================

/// Saves bytes through a temporary object URL and anchor click.
pub struct WebFileSaver {
    mime: &'static str,
}

impl WebFileSaver {
    pub fn png() -> Self {
        Self {
            mime: crate::export::PNG_MIME,
        }
    }
}

impl FileSaver for WebFileSaver {
    fn save(&mut self, data: &[u8], filename: &str) -> Result<(), ExportError> {
        let failed = |reason: String| ExportError::Save {
            filename: filename.to_string(),
            reason,
        };
        let document = document().ok_or_else(|| failed("no document".into()))?;
        let body = document.body().ok_or_else(|| failed("no body".into()))?;

        let blob = png_blob(data, self.mime).map_err(|e| failed(describe(&e)))?;
        let url = Url::create_object_url_with_blob(&blob).map_err(|e| failed(describe(&e)))?;

        let link: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| failed(describe(&e)))?
            .dyn_into()
            .map_err(|_| failed("not an anchor".into()))?;
        link.set_href(&url);
        link.set_download(filename);

        let appended = body.append_child(&link).map(|_| link.click());
        link.remove();
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("could not revoke {url}: {}", describe(&e));
        }
        appended.map_err(|e| failed(describe(&e)))
    }
}

// ============================================================================
// CanvasGlyphs
// ============================================================================

/// Draws download glyphs with an offscreen `<canvas>` and the browser's fonts.
pub struct CanvasGlyphs {
    size: u32,
}

impl CanvasGlyphs {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl GlyphSource for CanvasGlyphs {
    fn size(&self) -> u32 {
        self.size
    }

    fn render(&self, emoji: &str) -> Result<RgbaImage, ExportError> {
        let failed = |reason: String| ExportError::Glyph {
            emoji: emoji.to_string(),
            reason,
        };
        let document = document().ok_or_else(|| failed("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| failed(describe(&e)))?
            .dyn_into()
            .map_err(|_| failed("not a canvas".into()))?;
        canvas.set_width(self.size);
        canvas.set_height(self.size);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| failed(describe(&e)))?
            .ok_or_else(|| failed("Canvas 2d context is null".into()))?
            .dyn_into()
            .map_err(|_| failed("Failed to cast to CanvasRenderingContext2d".into()))?;

        let size = self.size as f32;
        let side = f64::from(size);
        ctx.set_fill_style_str("white");
        ctx.fill_rect(0.0, 0.0, side, side);
        ctx.set_fill_style_str("black");
        ctx.set_font(&format!("{}px serif", size * GLYPH_SCALE));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(
            emoji,
            f64::from(size / 2.0),
            f64::from(size / 2.0 + size * BASELINE_CORRECTION),
        )
        .map_err(|e| failed(describe(&e)))?;

        let pixels = ctx
            .get_image_data(0.0, 0.0, side, side)
            .map_err(|e| failed(describe(&e)))?
            .data();
        let img = RgbaImage::from_raw(self.size, self.size, pixels.0)
            .ok_or_else(|| failed("short pixel buffer".into()))?;
        ensure_inked(img, emoji)
    }
}

// ============================================================================
// StudioApp
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToastView<'a> {
    id: u64,
    message: &'a str,
    /// `true` while the `show` class should be applied.
    visible: bool,
    fading: bool,
}

/// The whole page state, exposed to JavaScript.
#[wasm_bindgen]
pub struct StudioApp {
    browser: Rc<RefCell<LibraryBrowser>>,
    composer: Rc<RefCell<Composer>>,
    toasts: Rc<RefCell<Toaster>>,
    glyphs: CanvasGlyphs,
}

#[wasm_bindgen]
impl StudioApp {
    /// Creates the app with the built-in catalog.
    ///
    /// `config_json` optionally overrides [`StudioConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<StudioApp, JsError> {
        let config = match config_json {
            Some(json) => StudioConfig::from_json(&json).map_err(js_error)?,
            None => StudioConfig::default(),
        };

        Ok(Self {
            browser: Rc::new(RefCell::new(LibraryBrowser::from_config(
                Catalog::builtin(),
                &config,
            ))),
            composer: Rc::new(RefCell::new(Composer::from_config(&config).map_err(js_error)?)),
            toasts: Rc::new(RefCell::new(Toaster::from_config(&config))),
            glyphs: CanvasGlyphs::new(config.download_size),
        })
    }

    // ---- Library browser ----

    /// Full browser view: `{ categories, grid, preview }`.
    pub fn view(&self) -> Result<JsValue, JsError> {
        let view = self.browser.borrow_mut().render();
        serde_wasm_bindgen::to_value(&view).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "clickCategory")]
    pub fn click_category(&self, id: &str) -> Result<JsValue, JsError> {
        let view = self.browser.borrow_mut().click_category(id);
        serde_wasm_bindgen::to_value(&view).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "setSearchQuery")]
    pub fn set_search_query(&self, query: &str) -> Result<JsValue, JsError> {
        let grid = self.browser.borrow_mut().set_search_query(query);
        serde_wasm_bindgen::to_value(&grid).map_err(js_error)
    }

    /// Selects a grid cell and returns the new preview (or `undefined`).
    #[wasm_bindgen(js_name = "selectGridItem")]
    pub fn select_grid_item(&self, index: usize) -> Result<JsValue, JsError> {
        let preview = self.browser.borrow_mut().select_grid_item(index);
        serde_wasm_bindgen::to_value(&preview).map_err(js_error)
    }

    /// Resolves to `true` when the selected character was copied.
    #[wasm_bindgen(js_name = "copySelected")]
    pub fn copy_selected(&self) -> Promise {
        let browser = Rc::clone(&self.browser);
        let toasts = Rc::clone(&self.toasts);

        future_to_promise(async move {
            let clipboard = WebClipboard::new();
            let mut staging = WebStaging::new();
            let copy = browser
                .borrow()
                .copy_selected_emoji(&clipboard, &mut staging, &*toasts);
            Ok(JsValue::from_bool(copy.await.is_copied()))
        })
    }

    #[wasm_bindgen(js_name = "downloadSelected")]
    pub fn download_selected(&self) -> Result<(), JsError> {
        self.browser
            .borrow()
            .download_selected_emoji(&self.glyphs, &mut WebFileSaver::png())
            .map_err(js_error)
    }

    // ---- Composer ----

    /// `{ colors, eyes, mouths }` picker controls.
    #[wasm_bindgen(js_name = "creatorOptions")]
    pub fn creator_options(&self) -> Result<JsValue, JsError> {
        let options = self.composer.borrow().render_creator_options();
        serde_wasm_bindgen::to_value(&options).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "selectColor")]
    pub fn select_color(&self, hex: &str) -> Result<(), JsError> {
        let color = FaceColor::from_hex(hex)
            .ok_or_else(|| JsError::new(&format!("unknown face colour `{hex}`")))?;
        self.composer.borrow_mut().select_color(color);
        Ok(())
    }

    #[wasm_bindgen(js_name = "selectEyes")]
    pub fn select_eyes(&self, id: &str) -> Result<(), JsError> {
        let eyes = EyeStyle::from_id(id)
            .ok_or_else(|| JsError::new(&format!("unknown eye style `{id}`")))?;
        self.composer.borrow_mut().select_eyes(eyes);
        Ok(())
    }

    #[wasm_bindgen(js_name = "selectMouth")]
    pub fn select_mouth(&self, id: &str) -> Result<(), JsError> {
        let mouth = MouthStyle::from_id(id)
            .ok_or_else(|| JsError::new(&format!("unknown mouth style `{id}`")))?;
        self.composer.borrow_mut().select_mouth(mouth);
        Ok(())
    }

    /// Copies the composer surface onto `canvas`, resizing it to match.
    #[wasm_bindgen(js_name = "renderCustomToCanvas")]
    pub fn render_custom_to_canvas(&self, canvas: &HtmlCanvasElement) -> Result<(), JsError> {
        let rendered = self.composer.borrow().surface().to_rgba_image();
        let (width, height) = rendered.dimensions();
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| JsError::new("Failed to get 2d context"))?
            .ok_or_else(|| JsError::new("Canvas 2d context is null"))?
            .dyn_into()
            .map_err(|_| JsError::new("Failed to cast to CanvasRenderingContext2d"))?;

        let raw_pixels: Vec<u8> = rendered.into_raw();
        let image_data =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(&raw_pixels), width, height)
                .map_err(|_| JsError::new("Failed to create ImageData"))?;

        ctx.put_image_data(&image_data, 0.0, 0.0)
            .map_err(|_| JsError::new("Failed to put image data"))
    }

    #[wasm_bindgen(js_name = "downloadCustom")]
    pub fn download_custom(&self) -> Result<(), JsError> {
        self.composer
            .borrow()
            .download_custom_emoji(&mut WebFileSaver::png())
            .map_err(js_error)
    }

    /// Resolves to `true` when the image or its data URI was copied.
    #[wasm_bindgen(js_name = "copyCustom")]
    pub fn copy_custom(&self) -> Promise {
        let composer = Rc::clone(&self.composer);
        let toasts = Rc::clone(&self.toasts);

        future_to_promise(async move {
            let clipboard = WebClipboard::new();
            let mut staging = WebStaging::new();
            let copy = composer
                .borrow()
                .copy_custom_emoji(&clipboard, &mut staging, &*toasts);
            Ok(JsValue::from_bool(copy.await.is_copied()))
        })
    }

    #[wasm_bindgen(js_name = "exportProfile")]
    pub fn export_profile(&self) -> Result<String, JsError> {
        self.composer
            .borrow()
            .export_profile()
            .to_json()
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = "applyProfile")]
    pub fn apply_profile(&self, json: &str) -> Result<(), JsError> {
        let profile = ComposerProfile::from_json(json).map_err(js_error)?;
        self.composer
            .borrow_mut()
            .apply_profile(&profile)
            .map_err(js_error)
    }

    // ---- Toast ----

    /// The current toast (`{ id, message, visible, fading }`) or `null`.
    pub fn toast(&self) -> Result<JsValue, JsError> {
        let toasts = self.toasts.borrow();
        let view = toasts.current().map(|t| ToastView {
            id: t.id,
            message: &t.message,
            visible: t.phase == ToastPhase::Visible,
            fading: t.phase == ToastPhase::Fading,
        });
        serde_wasm_bindgen::to_value(&view).map_err(js_error)
    }

    /// Advances the toast timeline to now; call from a timer or animation
    /// frame.
    pub fn tick(&self) -> Result<JsValue, JsError> {
        self.toasts.borrow_mut().advance(Instant::now());
        self.toast()
    }

    /// Reports the end of a toast's fade transition. Returns `true` if the
    /// toast was removed.
    #[wasm_bindgen(js_name = "toastTransitionEnd")]
    pub fn toast_transition_end(&self, id: u64) -> bool {
        self.toasts.borrow_mut().transition_ended(id)
    }
}
