use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};
use crate::error::Error;
use crate::math::Centroid;

/// One detector-reported box, valid for a single frame.
/// Corners are `(x1,y1)` top-left and `(x2,y2)` bottom-right, in pixels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32, class: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class,
        }
    }

    /// Builds a detection from a center-size box, the layout YOLO heads emit.
    pub fn from_xywh(cx: f32, cy: f32, w: f32, h: f32, confidence: f32, class: i32) -> Self {
        let b = BBox::xywh(cx, cy, w, h).as_ltrb();

        Self::new(b.left(), b.top(), b.right(), b.bottom(), confidence, class)
    }

    #[inline(always)]
    pub fn bbox(&self) -> BBox<Ltrb> {
        BBox::ltrb(self.x1, self.y1, self.x2, self.y2)
    }

    #[inline(always)]
    pub fn centroid(&self) -> Centroid {
        self.bbox().centroid()
    }

    /// Checks the box geometry and returns its centroid.
    pub fn validate(&self) -> Result<Centroid, Error> {
        let bbox = self.bbox();

        if !bbox.is_finite() {
            return Err(Error::MalformedDetection(format!(
                "non-finite coordinates {:?}",
                bbox.as_slice()
            )));
        }

        if !bbox.is_ordered() {
            return Err(Error::MalformedDetection(format!(
                "inverted corners {:?}",
                bbox.as_slice()
            )));
        }

        let centroid = bbox.centroid();
        if !(centroid.x.is_finite() && centroid.y.is_finite()) {
            return Err(Error::MalformedDetection(format!(
                "non-finite centroid for {:?}",
                bbox.as_slice()
            )));
        }

        Ok(centroid)
    }
}
