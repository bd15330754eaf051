//! The simulation driver.
//!
//! One [`Simulation`] makes one pass over a reference string. For every
//! reference it first settles where the page goes: the frame already holding
//! it, a free frame, or a victim picked by the eviction policy. Only then is
//! the reference consumed, the clock advanced and the page loaded. The
//! accessed frame is always marked afterwards.

use tracing::{debug, info, trace};

use crate::clock::{Clock, Tick};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::frame::{FrameId, PageId};
use crate::policy::EvictionPolicy;
use crate::pool::{FramePool, FrameStatus};
use crate::reference::ReferenceString;

/// What happened to a single reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The page was already resident.
    Hit { frame: FrameId },
    /// Fault served by an empty frame.
    Loaded { frame: FrameId },
    /// Fault served by evicting `evicted`.
    Replaced { frame: FrameId, evicted: PageId },
}

impl Outcome {
    pub fn frame(&self) -> FrameId {
        match *self {
            Outcome::Hit { frame } | Outcome::Loaded { frame } | Outcome::Replaced { frame, .. } => {
                frame
            }
        }
    }

    pub fn is_fault(&self) -> bool {
        !matches!(self, Outcome::Hit { .. })
    }
}

/// Record of one processed reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub tick: Tick,
    pub page: PageId,
    pub outcome: Outcome,
    /// Frame occupancy before this reference was applied.
    pub before: Vec<FrameStatus>,
}

/// Totals for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub policy: &'static str,
    pub references: usize,
    pub hits: usize,
    pub faults: usize,
    pub free_loads: usize,
    pub replacements: usize,
    /// Frame occupancy after the last reference.
    pub frames: Vec<FrameStatus>,
}

impl Summary {
    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            return 0.0;
        }
        self.faults as f64 / self.references as f64
    }

    pub fn hit_rate(&self) -> f64 {
        if self.references == 0 {
            return 0.0;
        }
        self.hits as f64 / self.references as f64
    }
}

/// A single run of a policy over a reference string.
#[derive(Debug)]
pub struct Simulation {
    clock: Clock,
    pool: FramePool,
    references: ReferenceString,
    policy: Box<dyn EvictionPolicy>,
    hits: usize,
    free_loads: usize,
    replacements: usize,
}

impl Simulation {
    pub fn new(config: &SimConfig, references: ReferenceString) -> Self {
        Self::with_policy(
            FramePool::new(config.frames),
            references,
            config.policy.build(),
        )
    }

    /// Builds a simulation around a caller-supplied policy.
    pub fn with_policy(
        pool: FramePool,
        references: ReferenceString,
        policy: Box<dyn EvictionPolicy>,
    ) -> Self {
        Self {
            clock: Clock::new(),
            pool,
            references,
            policy,
            hits: 0,
            free_loads: 0,
            replacements: 0,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    pub fn references(&self) -> &ReferenceString {
        &self.references
    }

    pub fn policy(&self) -> &dyn EvictionPolicy {
        self.policy.as_ref()
    }

    pub fn faults(&self) -> usize {
        self.free_loads + self.replacements
    }

    pub fn is_finished(&self) -> bool {
        !self.references.has_next()
    }

    /// Processes the next reference. Returns `None` once the reference
    /// string is used up.
    ///
    /// The victim is chosen and checked before anything is committed, so a
    /// failing policy leaves cursor, clock and frames untouched.
    pub fn step(&mut self) -> Result<Option<StepRecord>> {
        let Some(page) = self.references.peek() else {
            return Ok(None);
        };
        let before = self.pool.describe();

        let outcome = if let Some(frame) = self.pool.locate(page) {
            Outcome::Hit { frame }
        } else if let Some(frame) = self.pool.find_free() {
            Outcome::Loaded { frame }
        } else {
            let (frame, evicted) = self.select_victim(page)?;
            Outcome::Replaced { frame, evicted }
        };

        self.references.next_reference()?;
        let tick = self.clock.advance();

        match outcome {
            Outcome::Hit { frame } => {
                trace!(tick, page, %frame, "hit");
                self.hits += 1;
            }
            Outcome::Loaded { frame } => {
                debug!(tick, page, %frame, "page fault, free frame");
                self.pool.load(frame, page, &self.clock);
                self.free_loads += 1;
            }
            Outcome::Replaced { frame, evicted } => {
                debug!(tick, page, %frame, evicted, "page fault, replacing");
                self.pool.load(frame, page, &self.clock);
                self.replacements += 1;
            }
        }
        self.pool.mark_access(outcome.frame(), &self.clock);

        Ok(Some(StepRecord {
            tick,
            page,
            outcome,
            before,
        }))
    }

    pub fn run(&mut self) -> Result<Summary> {
        while self.step()?.is_some() {}
        let summary = self.summary();
        info!(
            policy = summary.policy,
            frames = self.pool.len(),
            references = summary.references,
            faults = summary.faults,
            "simulation finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            policy: self.policy.name(),
            references: self.references.consumed(),
            hits: self.hits,
            faults: self.faults(),
            free_loads: self.free_loads,
            replacements: self.replacements,
            frames: self.pool.describe(),
        }
    }

    /// Asks the policy for a victim for the pending reference and checks
    /// that it may be evicted.
    fn select_victim(&self, page: PageId) -> Result<(FrameId, PageId)> {
        let policy = self.policy.name();
        let frame = self
            .policy
            .select_victim(&self.pool, page, self.references.lookahead_past_next())
            .ok_or(SimError::NoVictim { policy })?;

        let evicted = self
            .pool
            .frame(frame)
            .ok_or(SimError::InvalidPolicyOutcome {
                policy,
                frame,
                reason: "out of range",
            })?
            .resident_page()
            .ok_or(SimError::InvalidPolicyOutcome {
                policy,
                frame,
                reason: "not occupied",
            })?;

        Ok((frame, evicted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use crate::reference::Lookahead;

    fn simulation(frames: usize, policy: PolicyKind, refs: &str) -> Simulation {
        let config = SimConfig::new(frames, policy).unwrap();
        Simulation::new(&config, refs.parse().unwrap())
    }

    #[test]
    fn test_step_outcomes() {
        let mut sim = simulation(2, PolicyKind::Optimal, "1 2 1 3");

        let step = sim.step().unwrap().unwrap();
        assert_eq!(step.tick, 1);
        assert_eq!(step.outcome, Outcome::Loaded { frame: FrameId::new(0) });
        assert_eq!(step.before, vec![None, None]);

        let step = sim.step().unwrap().unwrap();
        assert_eq!(step.outcome, Outcome::Loaded { frame: FrameId::new(1) });

        let step = sim.step().unwrap().unwrap();
        assert_eq!(step.outcome, Outcome::Hit { frame: FrameId::new(0) });
        assert_eq!(step.before, vec![Some(1), Some(2)]);

        let step = sim.step().unwrap().unwrap();
        assert_eq!(
            step.outcome,
            Outcome::Replaced {
                frame: FrameId::new(0),
                evicted: 1
            }
        );
        assert_eq!(step.tick, 4);

        assert!(sim.step().unwrap().is_none());
        assert_eq!(sim.faults(), 3);
    }

    #[test]
    fn test_hit_updates_frame() {
        let mut sim = simulation(1, PolicyKind::Fifo, "5 5 5");
        sim.run().unwrap();

        let frame = sim.pool().frame(FrameId::new(0)).unwrap();
        assert_eq!(frame.loaded_at(), Some(1));
        assert_eq!(frame.last_accessed_at(), Some(3));
        assert_eq!(frame.access_count(), Some(3));
        assert_eq!(sim.clock().current_tick(), 3);
    }

    #[test]
    fn test_summary() {
        let mut sim = simulation(3, PolicyKind::Optimal, "7 0 1 2 0 3 0 4 2 3 0 3 2");
        let summary = sim.run().unwrap();

        assert_eq!(summary.policy, "OPT");
        assert_eq!(summary.references, 13);
        assert_eq!(summary.faults, 7);
        assert_eq!(summary.free_loads, 3);
        assert_eq!(summary.replacements, 4);
        assert_eq!(summary.hits, 6);
        assert_eq!(summary.frames, vec![Some(3), Some(0), Some(2)]);
        assert_eq!(summary.hit_rate(), 6.0 / 13.0);
    }

    #[test]
    fn test_empty_reference_string() {
        let mut sim = simulation(2, PolicyKind::Lru, "");
        let summary = sim.run().unwrap();
        assert_eq!(summary.references, 0);
        assert_eq!(summary.fault_rate(), 0.0);
        assert_eq!(sim.clock().current_tick(), 0);
    }

    #[derive(Debug)]
    struct OutOfRange;

    impl EvictionPolicy for OutOfRange {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn select_victim(&self, pool: &FramePool, _: PageId, _: Lookahead<'_>) -> Option<FrameId> {
            Some(FrameId::new(pool.len()))
        }
    }

    #[derive(Debug)]
    struct Nothing;

    impl EvictionPolicy for Nothing {
        fn name(&self) -> &'static str {
            "nothing"
        }

        fn select_victim(&self, _: &FramePool, _: PageId, _: Lookahead<'_>) -> Option<FrameId> {
            None
        }
    }

    #[test]
    fn test_rejects_out_of_range_victim() {
        let pool = FramePool::with_frames(1).unwrap();
        let mut sim = Simulation::with_policy(pool, "1 2".parse().unwrap(), Box::new(OutOfRange));

        let err = sim.run().unwrap_err();
        assert!(err.is_contract_violation());
        assert!(matches!(
            err,
            SimError::InvalidPolicyOutcome {
                reason: "out of range",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_missing_victim() {
        let pool = FramePool::with_frames(1).unwrap();
        let mut sim = Simulation::with_policy(pool, "1 2".parse().unwrap(), Box::new(Nothing));
        assert!(matches!(sim.run(), Err(SimError::NoVictim { policy: "nothing" })));
    }

    #[test]
    fn test_failed_step_commits_nothing() {
        let pool = FramePool::with_frames(1).unwrap();
        let mut sim = Simulation::with_policy(pool, "1 2 3".parse().unwrap(), Box::new(OutOfRange));
        sim.step().unwrap();

        assert!(sim.step().is_err());
        assert_eq!(sim.policy().name(), "broken");
        assert_eq!(sim.references().consumed(), 1);
        assert_eq!(sim.clock().current_tick(), 1);
        assert_eq!(sim.pool().describe(), vec![Some(1)]);
        assert_eq!(sim.faults(), 1);

        // retrying hits the same broken choice again
        assert!(sim.step().is_err());
        assert_eq!(sim.references().consumed(), 1);
    }
}
