//! Fixed-size pool of frames.

use std::num::NonZeroUsize;

use crate::clock::Clock;
use crate::error::{Result, SimError};
use crate::frame::{Frame, FrameId, PageId};

/// Occupancy of one frame as seen by reporting code.
pub type FrameStatus = Option<PageId>;

/// The physical memory: a fixed number of frames, never resized.
///
/// The pool is the only place frames are mutated. Lookups go in index
/// order, so the lowest index wins whenever several frames qualify.
#[derive(Debug, Clone)]
pub struct FramePool {
    frames: Vec<Frame>,
}

impl FramePool {
    /// Creates a pool of `size` empty frames.
    pub fn new(size: NonZeroUsize) -> Self {
        Self {
            frames: vec![Frame::new(); size.get()],
        }
    }

    /// Creates a pool from a raw frame count, rejecting zero.
    pub fn with_frames(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self::new)
            .ok_or(SimError::InvalidFrameCount)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.index())
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, frame)| (FrameId::new(idx), frame))
    }

    /// Returns the lowest-indexed empty frame.
    pub fn find_free(&self) -> Option<FrameId> {
        self.frames
            .iter()
            .position(|frame| !frame.is_occupied())
            .map(FrameId::new)
    }

    /// Returns the frame holding `page`, if it is resident.
    pub fn locate(&self, page: PageId) -> Option<FrameId> {
        self.frames
            .iter()
            .position(|frame| frame.resident_page() == Some(page))
            .map(FrameId::new)
    }

    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|f| f.is_occupied()).count()
    }

    pub fn is_full(&self) -> bool {
        self.frames.iter().all(Frame::is_occupied)
    }

    pub fn describe(&self) -> Vec<FrameStatus> {
        self.frames.iter().map(Frame::resident_page).collect()
    }

    /// Loads `page` into the given frame. Panics if `id` is out of range.
    pub fn load(&mut self, id: FrameId, page: PageId, clock: &Clock) {
        debug_assert!(
            self.locate(page).map_or(true, |held| held == id),
            "page {page} already resident elsewhere"
        );
        self.frames[id.index()].load(page, clock);
    }

    /// Marks an access to the given frame. Panics if `id` is out of range.
    pub fn mark_access(&mut self, id: FrameId, clock: &Clock) {
        self.frames[id.index()].mark_access(clock);
    }
}
