//! Terrain height queries, the planner never computes terrain itself and only asks an
//! oracle for the surface height at some columns.

use std::collections::HashMap;


/// The kind of height map to query, each kind ignores different blocks when looking
/// for the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightmapKind {
    /// Highest non-air block, as known during world generation.
    WorldSurfaceWg,
    WorldSurface,
    /// Highest block blocking motion, fluids excluded, during world generation.
    OceanFloorWg,
    OceanFloor,
    MotionBlocking,
    MotionBlockingNoLeaves,
}


/// The terrain height oracle. Implementations must be deterministic: the same column
/// must always give the same height for a plan to be reproducible.
pub trait HeightOracle {

    /// Return the Y coordinate of the first free block above the surface of the given
    /// column, for the given height map.
    fn first_free_height(&self, x: i32, z: i32, kind: HeightmapKind) -> i32;

    /// The lowest buildable Y coordinate.
    fn min_y(&self) -> i32;

    /// The highest buildable Y coordinate, inclusive.
    fn max_y(&self) -> i32;

}

impl<H: HeightOracle + ?Sized> HeightOracle for &H {

    #[inline]
    fn first_free_height(&self, x: i32, z: i32, kind: HeightmapKind) -> i32 {
        (**self).first_free_height(x, z, kind)
    }

    #[inline]
    fn min_y(&self) -> i32 {
        (**self).min_y()
    }

    #[inline]
    fn max_y(&self) -> i32 {
        (**self).max_y()
    }

}


/// An oracle for a flat world, where every column has the same surface.
#[derive(Debug, Clone, Copy)]
pub struct FlatHeight {
    /// First free Y above the surface.
    pub surface: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl FlatHeight {

    #[inline]
    pub fn new(surface: i32) -> Self {
        Self { surface, min_y: -64, max_y: 319 }
    }

}

impl HeightOracle for FlatHeight {

    fn first_free_height(&self, _x: i32, _z: i32, _kind: HeightmapKind) -> i32 {
        self.surface
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn max_y(&self) -> i32 {
        self.max_y
    }

}


/// A memoization of oracle queries by column, it is meant to be short-lived and
/// cleared between each expansion step.
#[derive(Debug, Default)]
pub struct HeightCache {
    heights: HashMap<(i32, i32, HeightmapKind), i32>,
}

impl HeightCache {

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the height of the given column, only querying the oracle on first access.
    pub fn get<H: HeightOracle>(&mut self, oracle: &H, x: i32, z: i32, kind: HeightmapKind) -> i32 {
        *self.heights.entry((x, z, kind))
            .or_insert_with(|| oracle.first_free_height(x, z, kind))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.heights.clear();
    }

}


#[cfg(test)]
mod tests {

    use std::cell::Cell;

    use super::*;

    /// An oracle counting how many times it has been queried.
    struct CountingHeight {
        queries: Cell<usize>,
    }

    impl HeightOracle for CountingHeight {

        fn first_free_height(&self, x: i32, z: i32, _kind: HeightmapKind) -> i32 {
            self.queries.set(self.queries.get() + 1);
            x + z
        }

        fn min_y(&self) -> i32 {
            0
        }

        fn max_y(&self) -> i32 {
            255
        }

    }

    #[test]
    fn cache() {

        let oracle = CountingHeight { queries: Cell::new(0) };
        let mut cache = HeightCache::new();

        assert_eq!(cache.get(&oracle, 3, 4, HeightmapKind::WorldSurfaceWg), 7);
        assert_eq!(cache.get(&oracle, 3, 4, HeightmapKind::WorldSurfaceWg), 7);
        assert_eq!(oracle.queries.get(), 1);

        assert_eq!(cache.get(&oracle, 3, 4, HeightmapKind::OceanFloorWg), 7);
        assert_eq!(cache.get(&oracle, 4, 4, HeightmapKind::WorldSurfaceWg), 8);
        assert_eq!(oracle.queries.get(), 3);

        cache.clear();
        cache.get(&oracle, 3, 4, HeightmapKind::WorldSurfaceWg);
        assert_eq!(oracle.queries.get(), 4);

    }

}
