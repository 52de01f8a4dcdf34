use rand::Rng;

/// Bounded integer noise added to feedback growth.
#[derive(Clone, Debug)]
pub struct Jitter<R> {
    rng: R,
    max: i32,
}

impl<R> Jitter<R>
where
    R: Rng,
{
    pub fn new(rng: R, max: i32) -> Self {
        Jitter { rng, max }
    }

    /// A value in `[-max, max)`; always `0` when `max` is not positive.
    pub fn sample(&mut self) -> i32 {
        if self.max <= 0 {
            return 0;
        }
        self.rng.gen_range(-self.max..self.max)
    }
}

#[cfg(test)]
use rand::rngs::mock::StepRng;
#[cfg(test)]
use rand::rngs::SmallRng;
#[cfg(test)]
use rand::SeedableRng;

#[test]
fn test_jitter_bounds() {
    for max in [1, 2, 5, 17] {
        let mut jitter = Jitter::new(SmallRng::seed_from_u64(max as u64), max);
        let samples: Vec<i32> = (0..2000).map(|_| jitter.sample()).collect();

        assert!(samples.iter().all(|s| (-max..max).contains(s)));
        assert!(samples.contains(&-max));
        assert!(samples.contains(&(max - 1)));
    }
}

#[test]
fn test_zero_jitter_never_touches_rng() {
    let mut jitter = Jitter::new(StepRng::new(u64::MAX, 0), 0);
    assert!((0..100).all(|_| jitter.sample() == 0));
}

#[test]
fn test_jitter_is_reproducible() {
    let mut a = Jitter::new(SmallRng::seed_from_u64(42), 3);
    let mut b = Jitter::new(SmallRng::seed_from_u64(42), 3);
    let left: Vec<i32> = (0..64).map(|_| a.sample()).collect();
    let right: Vec<i32> = (0..64).map(|_| b.sample()).collect();
    assert_eq!(left, right);
}
