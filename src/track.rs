use serde_derive::Serialize;

use crate::math::Centroid;
use crate::Detection;

pub type TrackId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Track {
    pub track_id: TrackId,

    // last observed, never smoothed
    pub centroid: Centroid,

    pub class: i32,
    pub confidence: f32,

    // number of detections attributed to this track, including the first
    pub hits: u32,

    // frame indexes as counted by the owning counter
    pub first_seen: u64,
    pub last_seen: u64,
}

impl Track {
    pub fn new(track_id: TrackId, frame: u64, centroid: Centroid, det: &Detection) -> Self {
        Self {
            track_id,
            centroid,
            class: det.class,
            confidence: det.confidence,
            hits: 1,
            first_seen: frame,
            last_seen: frame,
        }
    }

    pub fn observe(&mut self, frame: u64, centroid: Centroid, det: &Detection) {
        self.centroid = centroid;
        self.class = det.class;
        self.confidence = det.confidence;
        self.hits += 1;
        self.last_seen = frame;
    }

    #[inline]
    pub fn idle_frames(&self, frame: u64) -> u64 {
        frame.saturating_sub(self.last_seen)
    }
}
