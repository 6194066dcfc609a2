//! Sequence trait for the key builder's randomness source.
//!
//! Defines the interface the key builder draws from while shuffling the
//! code pool. Implementations must be deterministic for a given initial
//! state so that peers sharing a seed derive the same key.

/// Source of uniformly distributed values in `[0, 1)`.
///
/// [`KeyMatrixBuilder`](crate::key_builder::KeyMatrixBuilder) only ever
/// calls [`next_int`](Self::next_int), but the default implementation of
/// that method is defined in terms of [`next`](Self::next) and must not be
/// overridden with a different rounding rule: the resulting shuffle would no
/// longer match keys built by other peers.
pub trait Sequence {
    /// Advances the state and returns the next value in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// Returns an integer in the half-open range `[min, max)`.
    ///
    /// Computed as `floor(next() * (max - min)) + min`.
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (self.next() * (max - min) as f64).floor() as i64 + min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of values, cycling.
    struct Replay {
        values: Vec<f64>,
        pos: usize,
    }

    impl Sequence for Replay {
        fn next(&mut self) -> f64 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }
    }

    #[test]
    fn test_next_int_floors_toward_min() {
        let mut seq = Replay {
            values: vec![0.0, 0.999_999, 0.5],
            pos: 0,
        };
        assert_eq!(seq.next_int(0, 10), 0);
        assert_eq!(seq.next_int(0, 10), 9);
        assert_eq!(seq.next_int(5, 7), 6);
    }

    #[test]
    fn test_next_int_single_value_range() {
        let mut seq = Replay {
            values: vec![0.73],
            pos: 0,
        };
        for _ in 0..5 {
            assert_eq!(seq.next_int(3, 4), 3);
        }
    }
}
