use serde_derive::{Deserialize, Serialize};
use std::borrow::Borrow;
use tracing::{debug, info, warn};

use crate::config::{CounterConfig, MatchPolicy};
use crate::math::Centroid;
use crate::registry::{self, Registry};
use crate::track::TrackId;
use crate::{Detection, Frame};

/// Per-frame result handed to whoever draws the overlay.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCount {
    /// Counter-local frame number, starting at 0.
    pub frame: u64,

    /// Detections classified as new objects in this frame.
    pub current_count: u32,

    /// Objects registered since the counter was created.
    pub total_count: u64,

    /// Malformed detections dropped before matching.
    pub skipped: u32,

    /// Detections below `min_confidence`.
    pub ignored: u32,
}

/// Centroid-proximity tracker that counts distinct objects over a stream.
///
/// Each detection is matched against the registry in ascending track id
/// order; the first track whose centroid is strictly closer than the match
/// radius takes the detection and its centroid is overwritten. Detections
/// with no such track open a new track and count as new.
///
/// A counter owns its registry exclusively and `&mut self` serializes frames.
/// To feed it from another thread use [`crate::pipeline`].
#[derive(Debug, Clone, Default)]
pub struct CentroidCounter {
    config: CounterConfig,
    registry: Registry,
    frames: u64,
}

impl CentroidCounter {
    pub fn new(config: CounterConfig) -> Self {
        info!(
            match_radius = config.match_radius,
            policy = ?config.policy,
            max_idle_frames = ?config.max_idle_frames,
            "centroid counter created"
        );

        Self {
            config,
            registry: Registry::new(),
            frames: 0,
        }
    }

    pub fn with_radius(match_radius: f32) -> Self {
        Self::new(CounterConfig::new(match_radius))
    }

    #[inline]
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn total_count(&self) -> u64 {
        self.registry.total_count()
    }

    #[inline]
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Associates one frame's detections using the configured radius.
    pub fn count<I>(&mut self, detections: I) -> FrameCount
    where
        I: IntoIterator,
        I::Item: Borrow<Detection>,
    {
        let radius = self.config.match_radius;
        self.associate(detections, radius)
    }

    /// Associates one frame's detections with an explicit radius and returns
    /// the number of detections counted as new.
    pub fn process_frame<I>(&mut self, detections: I, match_radius: f32) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<Detection>,
    {
        self.associate(detections, match_radius).current_count as usize
    }

    #[inline]
    pub fn update(&mut self, frame: &Frame) -> FrameCount {
        self.count(frame.iter())
    }

    fn associate<I>(&mut self, detections: I, match_radius: f32) -> FrameCount
    where
        I: IntoIterator,
        I::Item: Borrow<Detection>,
    {
        let frame = self.frames;
        self.frames += 1;

        let snapshot: Option<Vec<(TrackId, Centroid)>> = match self.config.policy {
            MatchPolicy::Snapshot => Some(self.registry.centroids().collect()),
            MatchPolicy::MutateAsYouGo => None,
        };

        let mut result = FrameCount {
            frame,
            ..Default::default()
        };

        for (index, det) in detections.into_iter().enumerate() {
            let det = det.borrow();

            let centroid = match det.validate() {
                Ok(centroid) => centroid,
                Err(err) => {
                    warn!(frame, index, "skipping detection: {}", err);
                    result.skipped += 1;
                    continue;
                }
            };

            if let Some(min) = self.config.min_confidence {
                // NaN confidence fails this too
                if !(det.confidence >= min) {
                    result.ignored += 1;
                    continue;
                }
            }

            let matched = match &snapshot {
                Some(tracks) => {
                    registry::first_within(tracks.iter().copied(), &centroid, match_radius)
                }
                None => self.registry.first_within(&centroid, match_radius),
            };

            match matched {
                Some(id) => {
                    self.registry.observe(id, frame, centroid, det);
                    debug!(frame, track_id = id, x = centroid.x, y = centroid.y, "track updated");
                }
                None => {
                    let id = self.registry.insert(frame, centroid, det);
                    result.current_count += 1;
                    debug!(frame, track_id = id, x = centroid.x, y = centroid.y, "new track");
                }
            }
        }

        if let Some(max_idle) = self.config.max_idle_frames {
            let evicted = self.registry.evict_idle(frame, max_idle);
            if evicted > 0 {
                info!(frame, evicted, remaining = self.registry.len(), "evicted idle tracks");
            }
        }

        result.total_count = self.registry.total_count();
        result
    }
}
