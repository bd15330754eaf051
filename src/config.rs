use std::num::NonZeroUsize;

use crate::error::{Result, SimError};
use crate::policy::PolicyKind;

/// Frame count used when none is given.
pub const DEFAULT_FRAMES: usize = 3;

/// Settings for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub frames: NonZeroUsize,
    pub policy: PolicyKind,
}

impl SimConfig {
    pub fn new(frames: usize, policy: PolicyKind) -> Result<Self> {
        let frames = NonZeroUsize::new(frames).ok_or(SimError::InvalidFrameCount)?;
        Ok(Self { frames, policy })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: NonZeroUsize::new(DEFAULT_FRAMES).unwrap_or(NonZeroUsize::MIN),
            policy: PolicyKind::default(),
        }
    }
}
