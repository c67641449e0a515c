use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::error::Error;

/// One frame's worth of detector output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub timestamp: f32, // in seconds
    pub detections: Vec<Detection>,
}

impl Frame {
    pub fn new(index: u64, timestamp: f32, detections: Vec<Detection>) -> Self {
        Self {
            index,
            timestamp,
            detections,
        }
    }

    /// Parses one line of a detections dump: `<millis>:<json array of detections>`.
    pub fn parse_dump_line(index: u64, line: &str) -> Result<Self, Error> {
        let (ts, vector) = line
            .split_once(':')
            .ok_or_else(|| Error::DumpFormat("expected `:`".into()))?;

        let ts_ms: u64 = ts
            .trim()
            .parse()
            .map_err(|_| Error::DumpFormat(format!("parse timestamp failed: {:?}", ts)))?;

        let detections = serde_json::from_str(vector)?;

        Ok(Self::new(index, ts_ms as f32 / 1000.0, detections))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
