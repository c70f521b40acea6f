//! Configuration of a single structure planning.

use glam::IVec3;
use thiserror::Error;

use crate::pool::PoolAliasLookup;
use crate::height::HeightmapKind;
use crate::world::LiquidSettings;
use crate::ident::Ident;


/// Maximum depth of a structure.
pub const MAX_DEPTH: u32 = 20;
/// Maximum horizontal and vertical distance of pieces from the structure center.
pub const MAX_DISTANCE_FROM_CENTER: i32 = 128;


/// Vertical space kept free at the bottom and top of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionPadding {
    pub top: i32,
    pub bottom: i32,
}

impl DimensionPadding {

    pub const ZERO: Self = Self { top: 0, bottom: 0 };

    #[inline]
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

}


/// Parameters of one structure planning.
#[derive(Debug, Clone)]
pub struct JigsawConfig {
    /// The pool the root element is drawn from.
    pub start_pool: Ident,
    /// If present, the root is moved so that its connector with this name is on the
    /// requested position.
    pub start_jigsaw_name: Option<Ident>,
    /// Maximum depth of pieces, the root is at depth 0.
    pub max_depth: u32,
    /// Requested position of the structure.
    pub pos: IVec3,
    /// Reserve vertical space for the children of small pieces.
    pub use_expansion_hack: bool,
    /// If present, the requested Y position is relative to this height map.
    pub project_start_to_heightmap: Option<HeightmapKind>,
    pub max_distance_from_center: i32,
    pub dimension_padding: DimensionPadding,
    pub liquid_settings: LiquidSettings,
    pub alias_lookup: PoolAliasLookup,
    /// Seed of the random source used for the whole planning.
    pub seed: i64,
}

impl JigsawConfig {

    /// A configuration with default parameters for the given start pool and position.
    pub fn new(start_pool: Ident, pos: IVec3) -> Self {
        Self {
            start_pool,
            start_jigsaw_name: None,
            max_depth: 7,
            pos,
            use_expansion_hack: false,
            project_start_to_heightmap: None,
            max_distance_from_center: 80,
            dimension_padding: DimensionPadding::ZERO,
            liquid_settings: LiquidSettings::default(),
            alias_lookup: PoolAliasLookup::identity(),
            seed: 0,
        }
    }

    #[inline]
    pub fn with_start_jigsaw_name(mut self, name: Ident) -> Self {
        self.start_jigsaw_name = Some(name);
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn with_expansion_hack(mut self, enabled: bool) -> Self {
        self.use_expansion_hack = enabled;
        self
    }

    #[inline]
    pub fn with_heightmap_projection(mut self, kind: HeightmapKind) -> Self {
        self.project_start_to_heightmap = Some(kind);
        self
    }

    #[inline]
    pub fn with_max_distance_from_center(mut self, distance: i32) -> Self {
        self.max_distance_from_center = distance;
        self
    }

    #[inline]
    pub fn with_dimension_padding(mut self, padding: DimensionPadding) -> Self {
        self.dimension_padding = padding;
        self
    }

    #[inline]
    pub fn with_liquid_settings(mut self, liquid: LiquidSettings) -> Self {
        self.liquid_settings = liquid;
        self
    }

    #[inline]
    pub fn with_alias_lookup(mut self, lookup: PoolAliasLookup) -> Self {
        self.alias_lookup = lookup;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that all parameters are in their valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_DEPTH {
            Err(ConfigError::IllegalMaxDepth(self.max_depth))
        } else if !(1..=MAX_DISTANCE_FROM_CENTER).contains(&self.max_distance_from_center) {
            Err(ConfigError::IllegalMaxDistance(self.max_distance_from_center))
        } else if self.dimension_padding.top < 0 || self.dimension_padding.bottom < 0 {
            Err(ConfigError::IllegalPadding(self.dimension_padding.top, self.dimension_padding.bottom))
        } else {
            Ok(())
        }
    }

}


/// Errors of an invalid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max depth {0} is out of range 0..=20")]
    IllegalMaxDepth(u32),
    #[error("max distance from center {0} is out of range 1..=128")]
    IllegalMaxDistance(i32),
    #[error("dimension padding must be positive, got top {0} and bottom {1}")]
    IllegalPadding(i32, i32),
}
