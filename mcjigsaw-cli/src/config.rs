//! The configuration of the planner, given from environment variables and lazy
//! initialized when needed.

use std::num::NonZeroUsize;
use std::env;

use once_cell::race::{OnceBool, OnceNonZeroUsize};
use once_cell::sync::OnceCell;


/// Return the base seed of all planned structures, each structure offsets it by its
/// index.
///
/// To change it, set `MCJIGSAW_SEED=<i64>`, default to 0.
pub fn seed() -> i64 {
    static ENV: OnceCell<i64> = OnceCell::new();
    *ENV.get_or_init(|| parse_var("MCJIGSAW_SEED").unwrap_or(0))
}

/// Return the number of structures to plan.
///
/// To change it, set `MCJIGSAW_COUNT=<n>`, default to 4.
pub fn count() -> usize {
    static ENV: OnceNonZeroUsize = OnceNonZeroUsize::new();
    ENV.get_or_init(|| non_zero_var("MCJIGSAW_COUNT", 4)).get()
}

/// Return the number of planner worker threads.
///
/// To change it, set `MCJIGSAW_WORKERS=<n>`, default to the available parallelism.
pub fn workers() -> usize {
    static ENV: OnceNonZeroUsize = OnceNonZeroUsize::new();
    ENV.get_or_init(|| {
        let default = std::thread::available_parallelism().map_or(2, NonZeroUsize::get);
        non_zero_var("MCJIGSAW_WORKERS", default)
    }).get()
}

/// Return the maximum depth of planned structures.
///
/// To change it, set `MCJIGSAW_MAX_DEPTH=<n>`, default to 6.
pub fn max_depth() -> u32 {
    static ENV: OnceCell<u32> = OnceCell::new();
    *ENV.get_or_init(|| parse_var("MCJIGSAW_MAX_DEPTH").unwrap_or(6))
}

/// Return true if small pieces should reserve vertical space for their children.
///
/// To enable this feature, set `MCJIGSAW_EXPANSION_HACK=1`.
pub fn expansion_hack() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("MCJIGSAW_EXPANSION_HACK")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}


fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn non_zero_var(name: &str, default: usize) -> NonZeroUsize {
    parse_var::<NonZeroUsize>(name)
        .or(NonZeroUsize::new(default))
        .unwrap_or(NonZeroUsize::MIN)
}
