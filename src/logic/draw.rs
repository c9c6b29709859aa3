//! Draw without replacement: a shuffled pool of indices handed out one at a time.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// A random permutation of `0..count`, consumed front to back.
#[derive(Clone, Debug)]
pub struct RandomDraw {
    pool: VecDeque<usize>,
}

impl RandomDraw {
    /// Shuffle with the thread-local RNG.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut rand::thread_rng())
    }

    /// Shuffle with the given RNG (seed it for reproducible draws).
    pub fn with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut pool: Vec<usize> = (0..count).collect();
        pool.shuffle(rng);
        Self { pool: pool.into() }
    }

    /// Next unused index, or None once all have been handed out.
    pub fn draw(&mut self) -> Option<usize> {
        self.pool.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty()
    }
}

impl Iterator for RandomDraw {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.draw()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pool.len(), Some(self.pool.len()))
    }
}

impl ExactSizeIterator for RandomDraw {}
