//! Page replacement simulator.
//!
//! Replays a reference string against a fixed number of frames and counts
//! page faults under a chosen eviction policy, with Belady's optimal
//! algorithm as the baseline.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod policy;
pub mod pool;
pub mod reference;
pub mod sim;

pub use clock::{Clock, Tick};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use frame::{Frame, FrameId, PageId};
pub use policy::{EvictionPolicy, Fifo, Lru, OptimalBelady, PolicyKind};
pub use pool::{FramePool, FrameStatus};
pub use reference::{Lookahead, ReferenceString};
pub use sim::{Outcome, Simulation, StepRecord, Summary};
