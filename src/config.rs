use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

pub const DEFAULT_MATCH_RADIUS: f32 = 50.0;

/// Which registry state later detections of a frame are matched against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every detection sees the tracks created or moved by earlier detections
    /// of the same frame.
    #[default]
    MutateAsYouGo,

    /// Every detection is matched against the registry as it was when the
    /// frame started. Tracks created within the frame are not candidates.
    Snapshot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    /// Strict upper bound on centroid distance for a detection to continue a
    /// track. Zero or negative makes every detection new.
    pub match_radius: f32,
    pub policy: MatchPolicy,

    /// Drop tracks not matched for more than this many frames.
    /// `None` keeps every track for the lifetime of the counter.
    pub max_idle_frames: Option<u64>,

    /// Ignore detections below this confidence.
    pub min_confidence: Option<f32>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            match_radius: DEFAULT_MATCH_RADIUS,
            policy: MatchPolicy::default(),
            max_idle_frames: None,
            min_confidence: None,
        }
    }
}

impl CounterConfig {
    pub fn new(match_radius: f32) -> Self {
        Self {
            match_radius,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_idle_frames(mut self, frames: u64) -> Self {
        self.max_idle_frames = Some(frames);
        self
    }

    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = Some(confidence);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.match_radius.is_nan() {
            return Err(Error::InvalidConfig("match_radius is NaN".into()));
        }

        if let Some(conf) = self.min_confidence {
            if !(0.0..=1.0).contains(&conf) {
                return Err(Error::InvalidConfig(format!(
                    "min_confidence {} is outside [0, 1]",
                    conf
                )));
            }
        }

        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;

        Self::from_json_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CounterConfig::default();
        assert_eq!(config.match_radius, 50.0);
        assert_eq!(config.policy, MatchPolicy::MutateAsYouGo);
        assert!(config.max_idle_frames.is_none());
        assert!(config.min_confidence.is_none());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = CounterConfig::from_json_str(r#"{"policy":"snapshot"}"#).unwrap();
        assert_eq!(config.policy, MatchPolicy::Snapshot);
        assert_eq!(config.match_radius, DEFAULT_MATCH_RADIUS);

        let config =
            CounterConfig::from_json_str(r#"{"match_radius":12.5,"max_idle_frames":30}"#).unwrap();
        assert_eq!(config, CounterConfig::new(12.5).with_max_idle_frames(30));
    }

    #[test]
    fn non_positive_radius_is_accepted() {
        assert!(CounterConfig::new(0.0).validate().is_ok());
        assert!(CounterConfig::new(-3.0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let res = CounterConfig::from_json_str(r#"{"min_confidence":1.5}"#);
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_unknown_policy() {
        let res = CounterConfig::from_json_str(r#"{"policy":"nearest"}"#);
        assert!(matches!(res, Err(Error::JsonError(_))));
    }
}
