//! Runs a counter on its own thread so capture and counting can overlap.
//!
//! Frames go in through a bounded channel and are consumed by a single worker
//! that owns the counter, so at most one frame is associated at a time and in
//! submission order. Results come back on an unbounded channel, one
//! [`FrameCount`] per submitted frame.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use crate::error::Error;
use crate::{CentroidCounter, Frame, FrameCount};

pub struct CounterHandle {
    frames: Sender<Frame>,
    counts: Receiver<FrameCount>,
    worker: JoinHandle<CentroidCounter>,
}

pub fn spawn(mut counter: CentroidCounter, capacity: usize) -> Result<CounterHandle, Error> {
    let (frames_tx, frames_rx) = bounded::<Frame>(capacity);
    let (counts_tx, counts_rx) = unbounded();

    let worker = thread::Builder::new()
        .name("ccount-worker".into())
        .spawn(move || {
            for frame in frames_rx {
                let count = counter.update(&frame);
                debug!(
                    source_index = frame.index,
                    current = count.current_count,
                    total = count.total_count,
                    "frame counted"
                );

                if counts_tx.send(count).is_err() {
                    break;
                }
            }

            info!(
                frames = counter.frames_processed(),
                total = counter.total_count(),
                "counter worker finished"
            );

            counter
        })?;

    Ok(CounterHandle {
        frames: frames_tx,
        counts: counts_rx,
        worker,
    })
}

impl CounterHandle {
    /// Blocks while the frame queue is full.
    pub fn submit(&self, frame: Frame) -> Result<(), Error> {
        self.frames.send(frame).map_err(|_| Error::PipelineClosed)
    }

    pub fn recv(&self) -> Result<FrameCount, Error> {
        self.counts.recv().map_err(|_| Error::PipelineClosed)
    }

    #[inline]
    pub fn try_recv(&self) -> Option<FrameCount> {
        self.counts.try_recv().ok()
    }

    #[inline]
    pub fn counts(&self) -> &Receiver<FrameCount> {
        &self.counts
    }

    /// Closes the input, waits for queued frames to be counted and returns the
    /// counter with every result not yet received.
    pub fn finish(self) -> Result<(CentroidCounter, Vec<FrameCount>), Error> {
        let CounterHandle {
            frames,
            counts,
            worker,
        } = self;

        drop(frames);

        let counter = worker.join().map_err(|_| Error::WorkerPanicked)?;
        let pending = counts.try_iter().collect();

        Ok((counter, pending))
    }
}
