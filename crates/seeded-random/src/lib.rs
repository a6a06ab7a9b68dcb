//! Reproducible random source seeded from small integer tuples.
//!
//! Sectors, systems and individual bodies each seed their own [`Random`] from a
//! tuple such as `(x, y, z, universe_seed)`. The tuple is folded into a 64-bit
//! seed with Bob Jenkins' lookup3 word hash and drives a ChaCha stream, so the
//! same tuple yields the same draws on every platform. Callers consume draws
//! positionally: the order of calls is part of every generator's contract.

pub mod hash;
pub mod random;

#[cfg(test)]
mod hash_test;

pub use hash::hash_seeds;
pub use random::Random;
