//! Serializable composer settings.
//!
//! A [`ComposerProfile`] captures the composer selection as plain strings so
//! a host page can snapshot it to JSON and restore it later in the session.
//!
//! # Example
//!
//! ```
//! use emoticon_studio::{Composer, ComposerProfile, Configurable};
//!
//! let mut composer = Composer::new(120).unwrap();
//! let profile = ComposerProfile::new("#81D4FA", "wink", "tongue");
//! composer.apply_profile(&profile).unwrap();
//!
//! let json = composer.export_profile().to_json().unwrap();
//! let restored = ComposerProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::composer::{Composer, ComposerState, EyeStyle, FaceColor, MouthStyle, StyleOption};
use crate::error::ProfileError;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Types whose settings can be exported to and restored from a profile.
pub trait Configurable {
    /// Applies a profile. Nothing changes when any field is unknown.
    fn apply_profile(&mut self, profile: &ComposerProfile) -> Result<(), ProfileError>;

    /// Exports the current settings.
    fn export_profile(&self) -> ComposerProfile;
}

// ============================================================================
// ComposerProfile
// ============================================================================

/// Composer selection by identifier.
///
/// ```json
/// { "color": "#FFD966", "eyes": "normal", "mouth": "smile" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerProfile {
    /// Face colour as `#RRGGBB`.
    pub color: String,
    /// Eye style identifier.
    pub eyes: String,
    /// Mouth style identifier.
    pub mouth: String,
}

impl ComposerProfile {
    pub fn new(
        color: impl Into<String>,
        eyes: impl Into<String>,
        mouth: impl Into<String>,
    ) -> Self {
        Self {
            color: color.into(),
            eyes: eyes.into(),
            mouth: mouth.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the identifiers against the palette and style lists.
    pub fn to_state(&self) -> Result<ComposerState, ProfileError> {
        let color = FaceColor::from_hex(&self.color)
            .ok_or_else(|| ProfileError::UnknownColor(self.color.clone()))?;
        let eyes = EyeStyle::from_id(&self.eyes)
            .ok_or_else(|| ProfileError::UnknownEyes(self.eyes.clone()))?;
        let mouth = MouthStyle::from_id(&self.mouth)
            .ok_or_else(|| ProfileError::UnknownMouth(self.mouth.clone()))?;
        Ok(ComposerState { color, eyes, mouth })
    }
}

impl Default for ComposerProfile {
    fn default() -> Self {
        Self::from(&ComposerState::default())
    }
}

impl From<&ComposerState> for ComposerProfile {
    fn from(state: &ComposerState) -> Self {
        Self::new(state.color.hex(), state.eyes.id(), state.mouth.id())
    }
}

impl Configurable for Composer {
    fn apply_profile(&mut self, profile: &ComposerProfile) -> Result<(), ProfileError> {
        let state = profile.to_state()?;
        self.set_state(state);
        Ok(())
    }

    fn export_profile(&self) -> ComposerProfile {
        ComposerProfile::from(self.state())
    }
}
