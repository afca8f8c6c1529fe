//! The emoji catalog: categories of records plus a flattened search list.
//!
//! The catalog is built once and never mutated. Categories keep their
//! display order; the flattened list keeps catalog order so search results
//! are stable.
//!
//! # Example
//!
//! ```
//! use emoticon_studio::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let hits = catalog.search("heart");
//! assert!(hits.iter().all(|r| r.name.to_lowercase().contains("heart")));
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ============================================================================
// Records
// ============================================================================

/// One emoji: its character, display name and a filename-safe identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// The grapheme (may be several code points, e.g. `"✈️"`).
    pub char: String,
    /// Human readable name, shown as the grid item title.
    pub name: String,
    /// Slug used for download file names. Unique within a catalog.
    pub id: String,
}

impl EmojiRecord {
    pub fn new(char: impl Into<String>, name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            char: char.into(),
            name: name.into(),
            id: id.into(),
        }
    }

    /// Case-insensitive match on the name, substring match on the character.
    ///
    /// `folded_query` must already be trimmed and lower-cased.
    pub fn matches(&self, folded_query: &str) -> bool {
        self.name.to_lowercase().contains(folded_query) || self.char.contains(folded_query)
    }
}

/// A named, ordered group of records with its own icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub emojis: Vec<EmojiRecord>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Read-only emoji table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    #[serde(skip)]
    all: Vec<EmojiRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate category or record ids.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        let mut record_ids = HashSet::new();

        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
            for record in &category.emojis {
                if !record_ids.insert(record.id.as_str()) {
                    return Err(CatalogError::DuplicateRecord(record.id.clone()));
                }
            }
        }

        let all = categories
            .iter()
            .flat_map(|c| c.emojis.iter().cloned())
            .collect();

        Ok(Self { categories, all })
    }

    /// Parses a JSON array of categories.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    /// An empty catalog. Only useful for exercising the no-selection paths.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            all: Vec::new(),
        }
    }

    /// The curated library shipped with the site.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, label, icon, emojis)| Category {
                id: (*id).to_string(),
                label: (*label).to_string(),
                icon: (*icon).to_string(),
                emojis: emojis
                    .iter()
                    .map(|(c, name, id)| EmojiRecord::new(*c, *name, *id))
                    .collect(),
            })
            .collect();

        // The static table is known to have unique ids (see tests).
        match Self::new(categories) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("built-in catalog rejected: {err}");
                Self::empty()
            }
        }
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Every record, in catalog order.
    pub fn all_records(&self) -> &[EmojiRecord] {
        &self.all
    }

    /// The first record of the first category, the startup selection.
    pub fn first_record(&self) -> Option<&EmojiRecord> {
        self.categories.first().and_then(|c| c.emojis.first())
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Full-text search across all categories.
    ///
    /// The query is trimmed and lower-cased. A blank query yields nothing;
    /// callers fall back to the current category in that case.
    pub fn search(&self, query: &str) -> Vec<&EmojiRecord> {
        let folded = fold_query(query);
        if folded.is_empty() {
            return Vec::new();
        }
        self.all.iter().filter(|r| r.matches(&folded)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalizes a raw search input.
pub(crate) fn fold_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// ============================================================================
// Built-in data
// ============================================================================

type RawRecord = (&'static str, &'static str, &'static str);
type RawCategory = (&'static str, &'static str, &'static str, &'static [RawRecord]);

const BUILTIN: &[RawCategory] = &[
    (
        "smileys",
        "Smileys",
        "😃",
        &[
            ("😀", "Grinning Face", "grinning-face"),
            ("😃", "Smiling Face with Big Eyes", "smiling-face-big-eyes"),
            ("😄", "Smiling Face with Smiling Eyes", "smiling-face-with-smiling-eyes"),
            ("😁", "Beaming Face with Smiling Eyes", "beaming-face-with-smiling-eyes"),
            ("😆", "Grinning Squinting Face", "grinning-squinting-face"),
            ("😅", "Grinning Face with Sweat", "grinning-face-with-sweat"),
            ("😂", "Face with Tears of Joy", "face-with-tears-of-joy"),
            ("🤣", "Rolling on the Floor Laughing", "rolling-on-the-floor-laughing"),
            ("😊", "Smiling Face with Smiling Eyes", "smiling-face-with-smiling-eyes-alt"),
            ("😇", "Smiling Face with Halo", "smiling-face-with-halo"),
            ("🙂", "Slightly Smiling Face", "slightly-smiling-face"),
            ("🙃", "Upside-Down Face", "upside-down-face"),
            ("😉", "Winking Face", "winking-face"),
            ("😍", "Smiling Face with Heart-Eyes", "smiling-face-with-heart-eyes"),
            ("😘", "Face Blowing a Kiss", "face-blowing-a-kiss"),
            ("😜", "Winking Face with Tongue", "winking-face-with-tongue"),
            ("🤪", "Zany Face", "zany-face"),
        ],
    ),
    (
        "animals",
        "Animals",
        "🐶",
        &[
            ("🐶", "Dog Face", "dog-face"),
            ("🐱", "Cat Face", "cat-face"),
            ("🐭", "Mouse Face", "mouse-face"),
            ("🐰", "Rabbit Face", "rabbit-face"),
            ("🦊", "Fox Face", "fox-face"),
            ("🐻", "Bear Face", "bear-face"),
            ("🐼", "Panda Face", "panda-face"),
            ("🐨", "Koala", "koala"),
            ("🐸", "Frog", "frog"),
            ("🦁", "Lion Face", "lion-face"),
            ("🐵", "Monkey Face", "monkey-face"),
        ],
    ),
    (
        "food",
        "Food",
        "🍎",
        &[
            ("🍎", "Red Apple", "red-apple"),
            ("🍇", "Grapes", "grapes"),
            ("🍉", "Watermelon", "watermelon"),
            ("🍌", "Banana", "banana"),
            ("🍒", "Cherries", "cherries"),
            ("🍕", "Pizza", "pizza"),
            ("🍔", "Hamburger", "hamburger"),
            ("🍟", "French Fries", "french-fries"),
            ("🌭", "Hot Dog", "hot-dog"),
            ("🍿", "Popcorn", "popcorn"),
            ("🍩", "Doughnut", "doughnut"),
        ],
    ),
    (
        "activities",
        "Activities",
        "⚽",
        &[
            ("⚽", "Soccer Ball", "soccer-ball"),
            ("🏀", "Basketball", "basketball"),
            ("🏈", "American Football", "american-football"),
            ("⚾", "Baseball", "baseball"),
            ("🎾", "Tennis", "tennis"),
            ("🏐", "Volleyball", "volleyball"),
            ("🎳", "Bowling", "bowling"),
            ("⛳", "Flag in Hole", "flag-in-hole"),
            ("🏓", "Ping Pong", "ping-pong"),
            ("🎮", "Video Game", "video-game"),
        ],
    ),
    (
        "travel",
        "Travel",
        "✈️",
        &[
            ("✈️", "Airplane", "airplane"),
            ("🚗", "Car", "car"),
            ("🚕", "Taxi", "taxi"),
            ("🚲", "Bicycle", "bicycle"),
            ("🚆", "Train", "train"),
            ("🚀", "Rocket", "rocket"),
            ("🚤", "Speedboat", "speedboat"),
            ("🚁", "Helicopter", "helicopter"),
            ("🗽", "Statue of Liberty", "statue-of-liberty"),
        ],
    ),
    (
        "objects",
        "Objects",
        "💡",
        &[
            ("💡", "Light Bulb", "light-bulb"),
            ("📱", "Mobile Phone", "mobile-phone"),
            ("💻", "Laptop Computer", "laptop-computer"),
            ("⌚", "Watch", "watch"),
            ("📷", "Camera", "camera"),
            ("🎧", "Headphone", "headphone"),
            ("⌨️", "Keyboard", "keyboard"),
            ("📦", "Package", "package"),
            ("🎁", "Gift", "gift"),
        ],
    ),
    (
        "symbols",
        "Symbols",
        "❤️",
        &[
            ("❤️", "Red Heart", "red-heart"),
            ("💛", "Yellow Heart", "yellow-heart"),
            ("💚", "Green Heart", "green-heart"),
            ("💙", "Blue Heart", "blue-heart"),
            ("💜", "Purple Heart", "purple-heart"),
            ("🧡", "Orange Heart", "orange-heart"),
            ("💔", "Broken Heart", "broken-heart"),
            ("❗", "Exclamation Mark", "exclamation-mark"),
            ("⭐", "Star", "star"),
            ("✨", "Sparkles", "sparkles"),
        ],
    ),
];

// ============================================================================
// Tests
// ============================================================================
