//=========================================================================
// Monotonic Tick Source
//
// Millisecond ticks from a `std::time::Instant` origin. Monotonic by
// construction, immune to wall-clock adjustments.
//
//=========================================================================

use std::time::Instant;

use super::TickSource;

/// A [`TickSource`] counting milliseconds since its creation.
#[derive(Debug)]
pub struct InstantTickSource {
    origin: Instant,
}

impl InstantTickSource {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for InstantTickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for InstantTickSource {
    fn ticks(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn frequency(&self) -> u64 {
        1000
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_start_near_zero_and_never_decrease() {
        let source = InstantTickSource::new();
        let first = source.ticks();
        assert!(first < 1000, "fresh source reported {} ms", first);

        let mut previous = first;
        for _ in 0..100 {
            let now = source.ticks();
            assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn frequency_is_milliseconds() {
        assert_eq!(InstantTickSource::new().frequency(), 1000);
    }
}
