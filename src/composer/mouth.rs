//! Mouth styles.

use std::f32::consts::PI;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use super::{INK, StyleOption};
use crate::raster::{CircularArc, DrawingSurface, Point};

/// Accent colour of the tongue (`#E57373`).
pub const TONGUE: Srgb<u8> = Srgb::new(0xE5, 0x73, 0x73);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MouthStyle {
    #[default]
    Smile,
    Sad,
    Open,
    Tongue,
}

impl StyleOption for MouthStyle {
    const ALL: &'static [Self] = &[Self::Smile, Self::Sad, Self::Open, Self::Tongue];

    fn id(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Sad => "sad",
            Self::Open => "open",
            Self::Tongue => "tongue",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Smile => "◡",
            Self::Sad => "︵",
            Self::Open => "○",
            Self::Tongue => "👅",
        }
    }

    fn draw<S: DrawingSurface + ?Sized>(self, surface: &mut S, center: Point, scale: f32) {
        let below = |dy: f32| Point::new(center.x, center.y + dy * scale);

        match self {
            Self::Smile => {
                let arc = CircularArc::new(below(30.0), 40.0 * scale, 0.0, PI);
                surface.stroke_arc(arc, 4.0 * scale, INK);
            }
            Self::Sad => {
                let arc = CircularArc::new(below(60.0), 35.0 * scale, PI, 0.0);
                surface.stroke_arc(arc, 4.0 * scale, INK);
            }
            Self::Open => {
                surface.fill_circle(below(40.0), 20.0 * scale, INK);
            }
            Self::Tongue => {
                surface.fill_circle(below(40.0), 20.0 * scale, INK);
                let tongue = CircularArc::new(below(48.0), 12.0 * scale, 0.0, PI);
                surface.fill_arc(tongue, TONGUE);
            }
        }
    }
}
