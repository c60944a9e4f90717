use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    #[error("draw pool exhausted")]
    PoolExhausted,
}

/// The numbers `1..=capacity` that have not been drawn yet.
///
/// Shrinks by exactly one element per successful draw; a drawn number never
/// comes back. Capacity 0 is a valid pool that is exhausted from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawPool {
    remaining: Vec<u32>,
    capacity: u32,
}

impl DrawPool {
    pub fn new(capacity: u32) -> Self {
        Self {
            remaining: (1..=capacity).collect(),
            capacity,
        }
    }

    /// A pool with nothing in it, used until a roster arrives (or forever,
    /// when loading failed).
    pub fn unloaded() -> Self {
        Self::new(0)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.remaining.contains(&value)
    }

    /// Removes and returns one of the remaining numbers, uniformly at random.
    ///
    /// Callers supply the generator, so the widget can draw from OS entropy
    /// while tests seed their own.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Result<u32, DrawError> {
        if self.remaining.is_empty() {
            return Err(DrawError::PoolExhausted);
        }
        let index = rng.random_range(0..self.remaining.len());
        Ok(self.remaining.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::BTreeSet;

    #[test]
    fn draw_removes_a_member() {
        let mut pool = DrawPool::new(3);
        let mut rng = SmallRng::seed_from_u64(7);

        let value = pool.draw(&mut rng).unwrap();
        assert!((1..=3).contains(&value));
        assert!(!pool.contains(value));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn draining_yields_a_permutation() {
        for seed in 0..20 {
            let mut pool = DrawPool::new(50);
            let mut rng = SmallRng::seed_from_u64(seed);

            let mut drawn = BTreeSet::new();
            while !pool.is_empty() {
                assert!(drawn.insert(pool.draw(&mut rng).unwrap()));
            }
            assert_eq!(drawn, (1..=50).collect());
        }
    }

    #[test]
    fn exhausted_pool_refuses_to_draw() {
        let mut pool = DrawPool::new(2);
        let mut rng = SmallRng::seed_from_u64(1);

        pool.draw(&mut rng).unwrap();
        pool.draw(&mut rng).unwrap();
        assert_eq!(pool.draw(&mut rng), Err(DrawError::PoolExhausted));
    }

    #[test]
    fn zero_capacity_is_exhausted_from_the_start() {
        let mut pool = DrawPool::unloaded();
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(pool.capacity(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), Err(DrawError::PoolExhausted));
    }

    #[test]
    fn every_value_can_come_up_first() {
        // Not a uniformity proof, just a guard against a draw that ignores
        // part of the pool.
        let mut seen = BTreeSet::new();
        for seed in 0..200 {
            let mut pool = DrawPool::new(5);
            let mut rng = SmallRng::seed_from_u64(seed);
            seen.insert(pool.draw(&mut rng).unwrap());
        }
        assert_eq!(seen, (1..=5).collect());
    }
}
