//! Eye styles.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{INK, StyleOption};
use crate::raster::surface::LocalRect;
use crate::raster::{CircularArc, DrawingSurface, Point};

/// Horizontal distance of each eye from the feature centre, in design units.
const EYE_SPREAD: f32 = 30.0;
/// Vertical lift of the eyes above the feature centre, in design units.
const EYE_LIFT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyeStyle {
    #[default]
    Normal,
    Happy,
    Wink,
    Starry,
}

impl EyeStyle {
    /// Centres of the left and right eye for a feature centre and scale.
    pub fn eye_centers(center: Point, scale: f32) -> (Point, Point) {
        let dx = EYE_SPREAD * scale;
        let y = center.y - EYE_LIFT * scale;
        (Point::new(center.x - dx, y), Point::new(center.x + dx, y))
    }
}

impl StyleOption for EyeStyle {
    const ALL: &'static [Self] = &[Self::Normal, Self::Happy, Self::Wink, Self::Starry];

    fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Happy => "happy",
            Self::Wink => "wink",
            Self::Starry => "starry",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "◉◉",
            Self::Happy => "^ ^",
            Self::Wink => "😉",
            Self::Starry => "✧✧",
        }
    }

    fn draw<S: DrawingSurface + ?Sized>(self, surface: &mut S, center: Point, scale: f32) {
        let (left, right) = Self::eye_centers(center, scale);
        let r = 10.0 * scale;

        match self {
            Self::Normal => {
                surface.fill_circle(left, r, INK);
                surface.fill_circle(right, r, INK);
            }
            Self::Happy => {
                for eye in [left, right] {
                    surface.stroke_arc(CircularArc::new(eye, r, PI, 0.0), 3.0 * scale, INK);
                }
            }
            Self::Wink => {
                surface.fill_circle(left, r, INK);
                let half = 8.0 * scale;
                surface.stroke_line(
                    Point::new(right.x - half, right.y),
                    Point::new(right.x + half, right.y),
                    3.0 * scale,
                    INK,
                );
            }
            Self::Starry => {
                // A four-point star: one bar rotated 45°, the other 135°.
                let r = 12.0 * scale;
                let bar = LocalRect::new(-r / 2.0, -r / 6.0, r, r / 3.0);
                for eye in [left, right] {
                    surface.fill_rotated_rect(eye, 45.0, bar, INK);
                    surface.fill_rotated_rect(eye, 135.0, bar, INK);
                }
            }
        }
    }
}
