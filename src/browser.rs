//! The emoji library browser.
//!
//! Tracks the current category, the search query and the single selected
//! emoji, and produces view models for the category tabs, the grid and the
//! preview panel. Every render rebuilds the full view; there is no diffing.
//!
//! # Selection
//!
//! ```text
//! startup ──────────────► has-selection (first record of first category)
//! category click ───┐
//! search input ─────┴───► recompute display set ──► repair selection
//! grid click ───────────► has-selection (clicked record)
//! ```
//!
//! Repair keeps the selection if its character is in the display set and
//! otherwise moves it to the first displayed item. An empty display set
//! leaves the selection untouched.
//!
//! # Example
//!
//! ```
//! use emoticon_studio::{Catalog, LibraryBrowser};
//!
//! let mut browser = LibraryBrowser::new(Catalog::builtin());
//! assert_eq!(browser.preview().unwrap().name, "Grinning Face");
//!
//! browser.click_category("animals");
//! assert_eq!(browser.preview().unwrap().name, "Dog Face");
//! ```

use std::future::Future;

use serde::Serialize;

use crate::catalog::{Catalog, EmojiRecord, fold_query};
use crate::clipboard::{Clipboard, CopyOutcome, CopyStaging, copy_text};
use crate::config::StudioConfig;
use crate::error::ExportError;
use crate::export::{FileSaver, emoji_filename, encode_png};
use crate::glyph::GlyphSource;
use crate::toast::ToastSink;

// ============================================================================
// View models
// ============================================================================

/// A category tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryControl {
    pub id: String,
    /// `"{icon} {label}"`.
    pub text: String,
    pub active: bool,
}

/// One cell of the emoji grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    /// Element handle, the position in the grid.
    pub index: usize,
    pub char: String,
    /// Tooltip: the record name.
    pub title: String,
    pub active: bool,
}

/// Contents of the preview panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub char: String,
    pub name: String,
    pub id: String,
}

impl From<&EmojiRecord> for Preview {
    fn from(record: &EmojiRecord) -> Self {
        Self {
            char: record.char.clone(),
            name: record.name.clone(),
            id: record.id.clone(),
        }
    }
}

/// Everything needed to paint the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserView {
    pub categories: Vec<CategoryControl>,
    pub grid: Vec<GridItem>,
    pub preview: Option<Preview>,
}

// ============================================================================
// Selection state
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub current_category_id: String,
    pub selected_emoji: Option<EmojiRecord>,
    /// Grid index of the item marked active, if it is displayed.
    pub active_item: Option<usize>,
}

// ============================================================================
// LibraryBrowser
// ============================================================================

pub struct LibraryBrowser {
    catalog: Catalog,
    selection: SelectionState,
    search_query: String,
    display: Vec<EmojiRecord>,
    copied_message: String,
}

impl LibraryBrowser {
    /// Starts on the first category with its first record selected.
    pub fn new(catalog: Catalog) -> Self {
        let selection = SelectionState {
            current_category_id: catalog
                .categories()
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            selected_emoji: catalog.first_record().cloned(),
            active_item: None,
        };

        let mut browser = Self {
            catalog,
            selection,
            search_query: String::new(),
            display: Vec::new(),
            copied_message: StudioConfig::default().emoji_copied_message,
        };
        browser.populate_grid();
        browser
    }

    pub fn from_config(catalog: Catalog, config: &StudioConfig) -> Self {
        let mut browser = Self::new(catalog);
        browser.copied_message = config.emoji_copied_message.clone();
        browser
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_emoji(&self) -> Option<&EmojiRecord> {
        self.selection.selected_emoji.as_ref()
    }

    // ---- Rendering ----

    /// Category tabs with the current one marked.
    pub fn render_categories(&self) -> Vec<CategoryControl> {
        self.catalog
            .categories()
            .iter()
            .map(|cat| CategoryControl {
                id: cat.id.clone(),
                text: format!("{} {}", cat.icon, cat.label),
                active: cat.id == self.selection.current_category_id,
            })
            .collect()
    }

    /// Recomputes the display set, repairs the selection and returns the grid.
    pub fn populate_grid(&mut self) -> Vec<GridItem> {
        let query = fold_query(&self.search_query);
        self.display = if query.is_empty() {
            self.catalog
                .category(&self.selection.current_category_id)
                .map(|c| c.emojis.clone())
                .unwrap_or_default()
        } else {
            self.catalog.search(&query).into_iter().cloned().collect()
        };

        self.selection.active_item = self
            .selection
            .selected_emoji
            .as_ref()
            .and_then(|sel| self.display.iter().position(|r| r.char == sel.char));

        if self.selection.active_item.is_none() {
            if let Some(first) = self.display.first().cloned() {
                log::debug!("selection repaired to {}", first.id);
                self.select_emoji(first, 0);
            }
        }

        self.grid_items()
    }

    /// The grid as last populated.
    pub fn grid_items(&self) -> Vec<GridItem> {
        self.display
            .iter()
            .enumerate()
            .map(|(index, record)| GridItem {
                index,
                char: record.char.clone(),
                title: record.name.clone(),
                active: self.selection.active_item == Some(index),
            })
            .collect()
    }

    pub fn preview(&self) -> Option<Preview> {
        self.selection.selected_emoji.as_ref().map(Preview::from)
    }

    /// Full re-render of tabs, grid and preview.
    pub fn render(&mut self) -> BrowserView {
        let categories = self.render_categories();
        let grid = self.populate_grid();
        BrowserView {
            categories,
            grid,
            preview: self.preview(),
        }
    }

    // ---- Interaction ----

    /// Switches category and clears the search query.
    pub fn click_category(&mut self, id: &str) -> BrowserView {
        log::debug!("category {id}");
        self.selection.current_category_id = id.to_string();
        self.search_query.clear();
        self.render()
    }

    /// Stores the raw search input and re-populates the grid.
    pub fn set_search_query(&mut self, query: &str) -> Vec<GridItem> {
        self.search_query = query.to_string();
        self.populate_grid()
    }

    /// Marks `record` as selected and moves the active mark to grid `index`.
    pub(crate) fn select_emoji(&mut self, record: EmojiRecord, index: usize) {
        self.selection.active_item = (index < self.display.len()).then_some(index);
        self.selection.selected_emoji = Some(record);
    }

    /// Selects the record shown at grid `index`.
    pub fn select_grid_item(&mut self, index: usize) -> Option<Preview> {
        let record = self.display.get(index)?.clone();
        self.select_emoji(record, index);
        self.preview()
    }

    // ---- Actions ----

    /// Copies the selected character.
    ///
    /// Resolves to [`CopyOutcome::Skipped`] when nothing is selected. A
    /// success toast is shown for either copy path. The returned future
    /// does not borrow the browser.
    pub fn copy_selected_emoji<'a, C, S, T>(
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
        let text = self
            .selection
            .selected_emoji
            .as_ref()
            .map(|r| r.char.clone())
            .filter(|c| !c.is_empty());
        let message = self.copied_message.clone();

        async move {
            let Some(text) = text else {
                return CopyOutcome::Skipped;
            };
            let outcome = copy_text(clipboard, staging, &text).await;
            if outcome.is_copied() {
                toasts.show_toast(&message);
            }
            outcome
        }
    }

    /// Saves the selected emoji as `<id>.png`. Does nothing without a
    /// selection.
    pub fn download_selected_emoji<G, F>(&self, glyphs: &G, saver: &mut F) -> Result<(), ExportError>
    where
        G: GlyphSource + ?Sized,
        F: FileSaver,
    {
        let Some(record) = self.selection.selected_emoji.as_ref() else {
            return Ok(());
        };
        let png = encode_png(&glyphs.render(&record.char)?)?;
        saver.save(&png, &emoji_filename(&record.id))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use resvg::usvg::fontdb;

    use super::*;
    use crate::catalog::Category;
    use crate::glyph::GlyphRenderer;
    use crate::clipboard::testing::{MockClipboard, MockStaging};
    use crate::export::testing::MockSaver;
    use crate::toast::Toaster;

    fn browser() -> LibraryBrowser {
        LibraryBrowser::new(Catalog::builtin())
    }

    fn active_items(grid: &[GridItem]) -> Vec<usize> {
        grid.iter().filter(|g| g.active).map(|g| g.index).collect()
    }

    const DOT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="36" height="36"><circle cx="18" cy="18" r="18" fill="#dd2e44"/></svg>"##;

    fn glyphs() -> GlyphRenderer {
        GlyphRenderer::with_fonts(32, fontdb::Database::new()).with_art(|_| Some(DOT))
    }

    #[test]
    fn startup_defaults() {
        let mut b = browser();
        let view = b.render();
        assert_eq!(view.categories.len(), 7);
        assert_eq!(view.categories[0].text, "😃 Smileys");
        assert!(view.categories[0].active);
        assert!(view.categories[1..].iter().all(|c| !c.active));
        assert_eq!(active_items(&view.grid), vec![0]);
        assert_eq!(view.preview.unwrap().id, "grinning-face");
    }

    #[test]
    fn every_category_shows_all_its_emojis() {
        let mut b = browser();
        let categories = b.catalog().categories().to_vec();
        for cat in categories {
            let view = b.click_category(&cat.id);
            assert_eq!(view.grid.len(), cat.emojis.len());
            let chars: Vec<_> = view.grid.iter().map(|g| g.char.clone()).collect();
            let expected: Vec<_> = cat.emojis.iter().map(|e| e.char.clone()).collect();
            assert_eq!(chars, expected);
        }
    }

    #[test]
    fn switching_category_repairs_selection() {
        let mut b = browser();
        assert_eq!(b.selected_emoji().unwrap().name, "Grinning Face");
        let view = b.click_category("animals");
        assert_eq!(b.selected_emoji().unwrap().name, "Dog Face");
        assert_eq!(active_items(&view.grid), vec![0]);
        assert_eq!(view.preview.unwrap().name, "Dog Face");
    }

    #[test]
    fn grid_click_selects() {
        let mut b = browser();
        b.click_category("food");
        let preview = b.select_grid_item(5).unwrap();
        assert_eq!(preview.id, "pizza");
        assert_eq!(active_items(&b.grid_items()), vec![5]);
        assert_eq!(b.grid_items()[5].char, preview.char);

        // Out of range leaves the selection where it was.
        assert!(b.select_grid_item(99).is_none());
        assert_eq!(b.preview().unwrap().id, "pizza");
        assert_eq!(active_items(&b.grid_items()), vec![5]);
    }

    #[test]
    fn search_spans_all_categories() {
        let mut b = browser();
        let grid = b.set_search_query("heart");
        let titles: Vec<_> = grid.iter().map(|g| g.title.as_str()).collect();
        assert!(titles.contains(&"Smiling Face with Heart-Eyes"));
        assert!(titles.contains(&"Red Heart"));
        assert!(titles.iter().all(|t| t.to_lowercase().contains("heart")));
        // The current tab is still marked even while searching.
        assert!(b.render_categories()[0].active);
    }

    #[test]
    fn search_keeps_selection_when_present() {
        let mut b = browser();
        b.click_category("animals");
        let grid = b.set_search_query("dog");
        assert_eq!(b.selected_emoji().unwrap().id, "dog-face");
        assert_eq!(active_items(&grid), vec![0]);
    }

    #[test]
    fn empty_result_keeps_previous_selection() {
        let mut b = browser();
        b.click_category("travel");
        b.select_grid_item(5);
        let grid = b.set_search_query("no such emoji");
        assert!(grid.is_empty());
        assert_eq!(b.selected_emoji().unwrap().id, "rocket");
        assert_eq!(b.selection().active_item, None);
    }

    #[test]
    fn clearing_search_restores_category() {
        let mut b = browser();
        b.click_category("food");
        b.set_search_query("dog");
        // Select the hot dog from the cross-category results.
        let hot_dog = b.grid_items().iter().position(|g| g.title == "Hot Dog").unwrap();
        b.select_grid_item(hot_dog);

        let grid = b.set_search_query("");
        let expected: Vec<_> = b
            .catalog()
            .category("food")
            .unwrap()
            .emojis
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(grid.len(), expected.len());
        assert_eq!(grid[8].title, "Hot Dog");
        assert_eq!(active_items(&grid), vec![8]);
    }

    #[test]
    fn clearing_search_resets_foreign_selection() {
        let mut b = browser();
        b.click_category("food");
        b.set_search_query("dog face");
        assert_eq!(b.selected_emoji().unwrap().id, "dog-face");
        b.set_search_query("   ");
        assert_eq!(b.selected_emoji().unwrap().id, "red-apple");
    }

    #[test]
    fn category_click_clears_search() {
        let mut b = browser();
        b.set_search_query("star");
        let view = b.click_category("objects");
        assert_eq!(b.search_query(), "");
        assert_eq!(view.grid.len(), 9);
    }

    #[test]
    fn unknown_category_shows_empty_grid() {
        let mut b = browser();
        let view = b.click_category("missing");
        assert!(view.grid.is_empty());
        assert!(view.categories.iter().all(|c| !c.active));
        assert_eq!(b.selected_emoji().unwrap().id, "grinning-face");
    }

    #[test]
    fn reselecting_through_another_element() {
        let twins = Category {
            id: "twins".into(),
            label: "Twins".into(),
            icon: "👯".into(),
            emojis: vec![
                EmojiRecord::new("😀", "Grin", "grin-a"),
                EmojiRecord::new("😀", "Grin", "grin-b"),
            ],
        };
        let mut b = LibraryBrowser::new(Catalog::new(vec![twins]).unwrap());
        assert_eq!(active_items(&b.grid_items()), vec![0]);

        let record = b.selected_emoji().unwrap().clone();
        b.select_emoji(record.clone(), 1);

        assert_eq!(active_items(&b.grid_items()), vec![1]);
        assert_eq!(b.preview().unwrap(), Preview::from(&record));
    }

    #[test]
    fn copy_uses_clipboard_and_toasts() {
        let b = browser();
        let clipboard = MockClipboard::working();
        let mut staging = MockStaging::default();
        let toasts = RefCell::new(Toaster::default());

        let outcome = pollster::block_on(b.copy_selected_emoji(&clipboard, &mut staging, &toasts));

        assert_eq!(outcome, CopyOutcome::Clipboard);
        assert_eq!(*clipboard.texts.borrow(), vec!["😀"]);
        assert_eq!(
            toasts.borrow().current().unwrap().message,
            "Emoji copied to clipboard"
        );
    }

    #[test]
    fn copy_fallback_still_toasts() {
        let b = browser();
        let clipboard = MockClipboard::failing();
        let mut staging = MockStaging::default();
        let toasts = RefCell::new(Toaster::default());

        let outcome = pollster::block_on(b.copy_selected_emoji(&clipboard, &mut staging, &toasts));

        assert_eq!(outcome, CopyOutcome::Fallback);
        assert_eq!(staging.copied, vec!["😀"]);
        assert!(toasts.borrow().current().is_some());
    }

    #[test]
    fn copy_failure_is_silent() {
        let b = browser();
        let clipboard = MockClipboard::failing();
        let mut staging = MockStaging {
            fail_copy: true,
            ..MockStaging::default()
        };
        let toasts = RefCell::new(Toaster::default());

        let outcome = pollster::block_on(b.copy_selected_emoji(&clipboard, &mut staging, &toasts));

        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(toasts.borrow().current().is_none());
        assert!(staging.live.is_empty());
    }

    #[test]
    fn download_names_file_after_id() {
        let mut b = browser();
        b.click_category("symbols");
        let mut saver = MockSaver::default();
        b.download_selected_emoji(&glyphs(), &mut saver).unwrap();

        assert_eq!(saver.saved.len(), 1);
        assert_eq!(saver.saved[0].0, "red-heart.png");
        let img = image::load_from_memory(&saver.saved[0].1).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        // Centre of the 80% box, lowered by 5%.
        assert_eq!(img.get_pixel(16, 17).0, [0xdd, 0x2e, 0x44, 255]);
    }

    #[test]
    fn blank_glyph_is_not_saved() {
        let b = browser();
        let blank = GlyphRenderer::with_fonts(32, fontdb::Database::new()).with_art(|_| None);
        let mut saver = MockSaver::default();
        assert!(matches!(
            b.download_selected_emoji(&blank, &mut saver),
            Err(ExportError::BlankGlyph(_))
        ));
        assert!(saver.saved.is_empty());
    }

    #[test]
    fn rejected_save_is_reported() {
        let b = browser();
        let mut saver = MockSaver {
            reject: true,
            ..MockSaver::default()
        };
        assert!(matches!(
            b.download_selected_emoji(&glyphs(), &mut saver),
            Err(ExportError::Save { .. })
        ));
    }

    #[test]
    fn no_selection_is_a_no_op() {
        let mut b = LibraryBrowser::new(Catalog::empty());
        let view = b.render();
        assert!(view.grid.is_empty());
        assert!(view.preview.is_none());

        let clipboard = MockClipboard::working();
        let mut staging = MockStaging::default();
        let toasts = RefCell::new(Toaster::default());
        let outcome = pollster::block_on(b.copy_selected_emoji(&clipboard, &mut staging, &toasts));
        assert_eq!(outcome, CopyOutcome::Skipped);
        assert_eq!(clipboard.calls.get(), 0);
        assert!(staging.staged.is_empty());

        let mut saver = MockSaver::default();
        b.download_selected_emoji(&glyphs(), &mut saver).unwrap();
        assert!(saver.saved.is_empty());
    }
}
