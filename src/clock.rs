/// A point in logical time.
pub type Tick = u64;

/// Logical clock counting processed references.
///
/// Every simulation owns its own clock, so independent simulations in the
/// same process never share time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    ticks: Tick,
}

impl Clock {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    pub fn current_tick(&self) -> Tick {
        self.ticks
    }

    // returns the new tick
    pub fn advance(&mut self) -> Tick {
        self.ticks += 1;
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Clock::new().current_tick(), 0);
    }

    #[test]
    fn test_advance() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.current_tick(), 2);
    }

    #[test]
    fn test_clocks_are_independent() {
        let mut a = Clock::new();
        let b = Clock::new();
        a.advance();
        assert_eq!(a.current_tick(), 1);
        assert_eq!(b.current_tick(), 0);
    }
}
