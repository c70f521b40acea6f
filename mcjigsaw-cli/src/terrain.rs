//! An analytic terrain for the demonstration, gentle hills around a base level.

use mcjigsaw::height::{HeightOracle, HeightmapKind};


/// Rolling hills, the surface is a sum of two waves along each horizontal axis.
#[derive(Debug, Clone, Copy)]
pub struct RollingHills {
    /// Mean first free height.
    pub base: i32,
}

impl RollingHills {

    #[inline]
    pub fn new(base: i32) -> Self {
        Self { base }
    }

}

impl HeightOracle for RollingHills {

    fn first_free_height(&self, x: i32, z: i32, _kind: HeightmapKind) -> i32 {
        let (x, z) = (x as f64, z as f64);
        let wave = (x / 19.0).sin() * 3.0 + (z / 23.0).cos() * 2.0;
        self.base + wave.floor() as i32
    }

    fn min_y(&self) -> i32 {
        -64
    }

    fn max_y(&self) -> i32 {
        319
    }

}
