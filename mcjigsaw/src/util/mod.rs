//! Various utilities.

mod rand;

pub use rand::{JavaRandom, pos_seed};
