//! Physical memory frames.

use std::fmt;

use crate::clock::{Clock, Tick};

/// Page number as it appears in the reference string.
pub type PageId = u32;

/// Index of a frame within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(usize);

impl FrameId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for FrameId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resident {
    page: PageId,
    loaded_at: Tick,
    last_accessed_at: Tick,
    accesses: u64,
}

/// One physical memory slot.
///
/// A frame starts out empty. Loading a page stamps it with the current tick,
/// every access bumps the access count and the last access tick. Accessors
/// return `None` while the frame is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    resident: Option<Resident>,
}

impl Frame {
    pub fn new() -> Self {
        Self { resident: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.resident.is_some()
    }

    pub fn resident_page(&self) -> Option<PageId> {
        self.resident.map(|r| r.page)
    }

    pub fn loaded_at(&self) -> Option<Tick> {
        self.resident.map(|r| r.loaded_at)
    }

    /// Tick of the most recent access, or the load tick if never accessed.
    pub fn last_accessed_at(&self) -> Option<Tick> {
        self.resident.map(|r| r.last_accessed_at)
    }

    pub fn access_count(&self) -> Option<u64> {
        self.resident.map(|r| r.accesses)
    }

    /// Loads `page`, replacing whatever the frame held before.
    pub fn load(&mut self, page: PageId, clock: &Clock) {
        let now = clock.current_tick();
        self.resident = Some(Resident {
            page,
            loaded_at: now,
            last_accessed_at: now,
            accesses: 0,
        });
    }

    /// Records an access to the resident page.
    ///
    /// Callers must only access occupied frames.
    pub fn mark_access(&mut self, clock: &Clock) {
        debug_assert!(self.is_occupied(), "access to an empty frame");
        if let Some(resident) = self.resident.as_mut() {
            resident.accesses += 1;
            resident.last_accessed_at = clock.current_tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_empty() {
        let frame = Frame::new();
        assert!(!frame.is_occupied());
        assert_eq!(frame.resident_page(), None);
        assert_eq!(frame.loaded_at(), None);
        assert_eq!(frame.last_accessed_at(), None);
        assert_eq!(frame.access_count(), None);
    }

    #[test]
    fn test_load_stamps_current_tick() {
        let mut clock = Clock::new();
        clock.advance();
        clock.advance();

        let mut frame = Frame::new();
        frame.load(9, &clock);

        assert!(frame.is_occupied());
        assert_eq!(frame.resident_page(), Some(9));
        assert_eq!(frame.loaded_at(), Some(2));
        assert_eq!(frame.last_accessed_at(), Some(2));
        assert_eq!(frame.access_count(), Some(0));
    }

    #[test]
    fn test_repeated_access() {
        let mut clock = Clock::new();
        clock.advance();
        let mut frame = Frame::new();
        frame.load(4, &clock);

        for _ in 0..3 {
            clock.advance();
            frame.mark_access(&clock);
        }

        assert_eq!(frame.access_count(), Some(3));
        assert_eq!(frame.last_accessed_at(), Some(4));
        assert_eq!(frame.loaded_at(), Some(1));
    }

    #[test]
    fn test_reload_resets_bookkeeping() {
        let mut clock = Clock::new();
        clock.advance();
        let mut frame = Frame::new();
        frame.load(1, &clock);
        clock.advance();
        frame.mark_access(&clock);
        frame.mark_access(&clock);

        clock.advance();
        frame.load(2, &clock);

        assert_eq!(frame.resident_page(), Some(2));
        assert_eq!(frame.access_count(), Some(0));
        assert_eq!(frame.loaded_at(), Some(3));
        assert_eq!(frame.last_accessed_at(), Some(3));
    }

    #[test]
    fn test_access_count_passes_u32_range() {
        let clock = Clock::new();
        let mut frame = Frame {
            resident: Some(Resident {
                page: 1,
                loaded_at: 0,
                last_accessed_at: 0,
                accesses: u64::from(u32::MAX),
            }),
        };
        frame.mark_access(&clock);
        assert_eq!(frame.access_count(), Some(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_frame_id_display() {
        assert_eq!(FrameId::new(3).to_string(), "frame 3");
        assert_eq!(FrameId::from(5).index(), 5);
    }
}
