//! Text the renderer puts in the frame corner. Drawing itself lives elsewhere.

use crate::FrameCount;

pub type Rgb = (u8, u8, u8);

const WHITE: Rgb = (255, 255, 255);
const BLACK: Rgb = (0, 0, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    pub current: String,
    pub total: String,
}

impl From<&FrameCount> for OverlayText {
    fn from(count: &FrameCount) -> Self {
        Self {
            current: format!("Current: {}", count.current_count),
            total: format!("Total: {}", count.total_count),
        }
    }
}

impl OverlayText {
    #[inline]
    pub fn lines(&self) -> [&str; 2] {
        [self.current.as_str(), self.total.as_str()]
    }
}

/// Relative luminance in [0, 1], ITU-R BT.601 weights.
#[inline]
pub fn luminance((r, g, b): Rgb) -> f32 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// White text on dark backgrounds, black on light ones.
#[inline]
pub fn contrast_color(background: Rgb) -> Rgb {
    if luminance(background) < 0.5 {
        WHITE
    } else {
        BLACK
    }
}
