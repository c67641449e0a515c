pub mod bbox;
pub mod config;
pub mod counter;
pub mod detection;
pub mod error;
pub mod frame;
pub mod math;
pub mod overlay;
pub mod pipeline;
pub mod registry;

mod track;

pub use config::{CounterConfig, MatchPolicy};
pub use counter::{CentroidCounter, FrameCount};
pub use detection::Detection;
pub use frame::Frame;
pub use registry::Registry;
pub use track::{Track, TrackId};

use std::collections::HashMap;
use std::rc::Rc;

/// Counting over several named video sources. Sources never share tracks.
pub trait Counting {
    fn update(&mut self, frame: &Frame, src: &str) -> FrameCount;
    fn total_count(&self, src: &str) -> u64;
    fn tracks(&self, src: &str) -> Rc<[Track]>;
}

pub struct MultiSourceCounter {
    config: CounterConfig,
    counters: HashMap<String, CentroidCounter>,
}

impl MultiSourceCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            counters: HashMap::new(),
        }
    }

    #[inline]
    pub fn counter(&self, src: &str) -> Option<&CentroidCounter> {
        self.counters.get(src)
    }

    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }

    pub fn remove(&mut self, src: &str) -> Option<CentroidCounter> {
        self.counters.remove(src)
    }
}

impl Default for MultiSourceCounter {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}

impl crate::Counting for MultiSourceCounter {
    fn update(&mut self, frame: &Frame, src: &str) -> FrameCount {
        let counter = match self.counters.get_mut(src) {
            Some(counter) => counter,
            None => self
                .counters
                .entry(src.to_string())
                .or_insert_with(|| CentroidCounter::new(self.config.clone())),
        };

        counter.update(frame)
    }

    #[inline]
    fn total_count(&self, src: &str) -> u64 {
        self.counters.get(src).map_or(0, CentroidCounter::total_count)
    }

    #[inline]
    fn tracks(&self, src: &str) -> Rc<[Track]> {
        if let Some(counter) = self.counters.get(src) {
            return counter.registry().iter().copied().collect();
        }

        Rc::new([])
    }
}
