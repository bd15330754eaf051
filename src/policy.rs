//! Page replacement policies.
//!
//! A policy is consulted only when a fault occurs and every frame is taken.
//! It sees the pool read-only plus a [`Lookahead`] over the reference string
//! and answers with the id of the frame to evict. The driver does the actual
//! load, so all mutation stays on its side.

use std::collections::BTreeSet;
use std::fmt;

use clap::{builder::PossibleValue, ValueEnum};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::frame::{Frame, FrameId, PageId};
use crate::pool::FramePool;
use crate::reference::Lookahead;

/// Chooses which resident page to evict.
pub trait EvictionPolicy: fmt::Debug {
    /// Short name used in reports and errors.
    fn name(&self) -> &'static str;

    /// Picks one occupied frame of `pool` to make room for `page`.
    ///
    /// Only called when `pool` is full. Returns `None` only if the pool holds
    /// nothing to evict.
    fn select_victim(
        &self,
        pool: &FramePool,
        page: PageId,
        lookahead: Lookahead<'_>,
    ) -> Option<FrameId>;
}

/// Belady's optimal replacement: evict the page whose next use lies furthest
/// ahead, or that is never used again.
///
/// Needs the future of the reference string, so it only works offline. It is
/// the baseline the other policies are measured against.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimalBelady;

impl EvictionPolicy for OptimalBelady {
    fn name(&self) -> &'static str {
        "OPT"
    }

    fn select_victim(
        &self,
        pool: &FramePool,
        page: PageId,
        mut lookahead: Lookahead<'_>,
    ) -> Option<FrameId> {
        let mut candidates: BTreeSet<PageId> =
            pool.frames().iter().filter_map(Frame::resident_page).collect();
        debug_assert_eq!(
            candidates.len(),
            pool.occupied(),
            "a page is resident in more than one frame"
        );

        // Strike out pages in the order they are needed again; the last one
        // standing is needed latest.
        while candidates.len() > 1 {
            let Some(next) = lookahead.next() else {
                break;
            };
            candidates.remove(&next);
        }

        if candidates.len() > 1 {
            debug!(
                page,
                remaining = candidates.len(),
                "reference string too short to single out a victim, taking lowest page"
            );
        }

        let victim = *candidates.first()?;
        pool.locate(victim)
    }
}

/// First in, first out: evict the page loaded earliest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fifo;

impl EvictionPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select_victim(
        &self,
        pool: &FramePool,
        _page: PageId,
        _lookahead: Lookahead<'_>,
    ) -> Option<FrameId> {
        // min_by_key keeps the first minimum, i.e. the lowest index
        pool.iter()
            .filter_map(|(id, frame)| frame.loaded_at().map(|tick| (id, tick)))
            .min_by_key(|&(_, tick)| tick)
            .map(|(id, _)| id)
    }
}

/// Least recently used: evict the page whose last access is oldest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lru;

impl EvictionPolicy for Lru {
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn select_victim(
        &self,
        pool: &FramePool,
        _page: PageId,
        _lookahead: Lookahead<'_>,
    ) -> Option<FrameId> {
        pool.iter()
            .filter_map(|(id, frame)| frame.last_accessed_at().map(|tick| (id, tick)))
            .min_by_key(|&(_, tick)| tick)
            .map(|(id, _)| id)
    }
}

/// The registered policies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    #[default]
    Optimal,
    Fifo,
    Lru,
}

impl PolicyKind {
    /// Looks up a policy by name, ignoring case. Accepts the short names
    /// (`OPT`, `FIFO`, `LRU`) and their aliases.
    pub fn from_name(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true).map_err(|_| SimError::UnknownPolicy {
            name: name.to_string(),
        })
    }

    pub fn build(self) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Optimal => Box::new(OptimalBelady),
            PolicyKind::Fifo => Box::new(Fifo),
            PolicyKind::Lru => Box::new(Lru),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyKind::Optimal => "OPT",
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
        };
        write!(f, "{}", s)
    }
}

// Spelled out by hand so the canonical names stay upper case on the CLI
impl ValueEnum for PolicyKind {
    fn value_variants<'a>() -> &'a [Self] {
        static VARIANTS: [PolicyKind; 3] = [PolicyKind::Optimal, PolicyKind::Fifo, PolicyKind::Lru];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            PolicyKind::Optimal => PossibleValue::new("OPT")
                .aliases(["optimal", "belady", "OptimalBelady"])
                .help("Belady's clairvoyant optimum"),
            PolicyKind::Fifo => PossibleValue::new("FIFO").help("Evict the oldest load"),
            PolicyKind::Lru => PossibleValue::new("LRU").help("Evict the least recently used page"),
        })
    }
}
