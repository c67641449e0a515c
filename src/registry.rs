//! Identity registry: track id to last known centroid.
//!
//! Ids are handed out from `total_count`, so they start at 0, grow by one per
//! created track and are never reused, even after eviction. Iteration is in
//! ascending id order, which is also the order matching is resolved in.

use std::collections::BTreeMap;

use crate::math::{self, Centroid};
use crate::track::{Track, TrackId};
use crate::Detection;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    tracks: BTreeMap<TrackId, Track>,
    total_count: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks ever created, including evicted ones.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    #[inline]
    pub fn centroid(&self, id: TrackId) -> Option<Centroid> {
        self.tracks.get(&id).map(|t| t.centroid)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    #[inline]
    pub fn centroids(&self) -> impl Iterator<Item = (TrackId, Centroid)> + '_ {
        self.tracks.iter().map(|(&id, t)| (id, t.centroid))
    }

    /// First track in ascending id order whose centroid lies strictly within
    /// `radius`. Not the nearest one.
    pub fn first_within(&self, centroid: &Centroid, radius: f32) -> Option<TrackId> {
        first_within(self.centroids(), centroid, radius)
    }

    pub fn insert(&mut self, frame: u64, centroid: Centroid, det: &Detection) -> TrackId {
        let id = self.total_count;
        self.tracks.insert(id, Track::new(id, frame, centroid, det));
        self.total_count += 1;

        id
    }

    /// Overwrites the stored centroid of `id`. Returns `false` for unknown ids.
    pub fn observe(&mut self, id: TrackId, frame: u64, centroid: Centroid, det: &Detection) -> bool {
        match self.tracks.get_mut(&id) {
            Some(track) => {
                track.observe(frame, centroid, det);
                true
            }
            None => false,
        }
    }

    /// Drops tracks not observed for more than `max_idle` frames.
    pub fn evict_idle(&mut self, frame: u64, max_idle: u64) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|_, t| t.idle_frames(frame) <= max_idle);

        before - self.tracks.len()
    }
}

pub(crate) fn first_within<I>(candidates: I, centroid: &Centroid, radius: f32) -> Option<TrackId>
where
    I: IntoIterator<Item = (TrackId, Centroid)>,
{
    candidates
        .into_iter()
        .find(|(_, c)| math::within_radius(centroid, c, radius))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det() -> Detection {
        Detection::new(0.0, 0.0, 0.0, 0.0, 1.0, 0)
    }

    #[test]
    fn ids_follow_total_count() {
        let mut reg = Registry::new();
        assert_eq!(reg.insert(0, Centroid::new(0.0, 0.0), &det()), 0);
        assert_eq!(reg.insert(0, Centroid::new(500.0, 0.0), &det()), 1);
        assert_eq!(reg.total_count(), 2);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn first_within_prefers_lowest_id_over_nearest() {
        let mut reg = Registry::new();
        reg.insert(0, Centroid::new(0.0, 0.0), &det());
        reg.insert(0, Centroid::new(40.0, 0.0), &det());

        // closer to track 1, but track 0 is also in range
        assert_eq!(reg.first_within(&Centroid::new(35.0, 0.0), 50.0), Some(0));
        assert_eq!(reg.first_within(&Centroid::new(85.0, 0.0), 50.0), Some(1));
        assert_eq!(reg.first_within(&Centroid::new(200.0, 0.0), 50.0), None);
    }

    #[test]
    fn observe_overwrites_centroid() {
        let mut reg = Registry::new();
        let id = reg.insert(0, Centroid::new(100.0, 100.0), &det());
        assert!(reg.observe(id, 1, Centroid::new(110.0, 105.0), &det()));
        assert!(!reg.observe(42, 1, Centroid::new(0.0, 0.0), &det()));

        let track = reg.get(id).unwrap();
        assert_eq!(track.centroid, Centroid::new(110.0, 105.0));
        assert_eq!(track.hits, 2);
        assert_eq!(track.last_seen, 1);
    }

    #[test]
    fn eviction_keeps_total_and_never_reuses_ids() {
        let mut reg = Registry::new();
        reg.insert(0, Centroid::new(0.0, 0.0), &det());
        reg.insert(5, Centroid::new(500.0, 0.0), &det());

        assert_eq!(reg.evict_idle(7, 3), 1);
        assert_eq!(reg.len(), 1);
        assert!(reg.get(0).is_none());
        assert_eq!(reg.total_count(), 2);

        assert_eq!(reg.insert(7, Centroid::new(0.0, 0.0), &det()), 2);
    }
}
