//! Jigsaw structure planning. A structure grows from a root element drawn in a start
//! pool, each connector of a placed piece is then used to attach a child element drawn
//! in the pool targeted by the connector, as long as the child fits in the free space
//! and the depth budget is not exhausted. Matching is greedy: the first child that fits
//! is accepted and never reconsidered.

use std::sync::Arc;

use glam::IVec3;
use thiserror::Error;
use tracing::{debug, error, instrument, trace, warn};

use crate::pool::{PoolCatalog, Projection, TemplatePool};
use crate::geom::{BlockBox, BoundingBox, Rotation};
use crate::height::{HeightCache, HeightOracle, HeightmapKind};
use crate::world::{LiquidSettings, StructureWorld};
use crate::shape::CollisionVolume;
use crate::connector::Connector;
use crate::util::JavaRandom;
use crate::ident::Ident;

pub mod config;
pub mod frontier;
pub mod piece;


pub use config::{JigsawConfig, DimensionPadding, ConfigError};
pub use frontier::PlacementFrontier;
pub use piece::{PlacedPiece, Junction};


/// Tolerance removed from each side of a candidate box before testing it against the
/// free space, so that pieces can touch each other.
const FIT_TOLERANCE: f64 = 0.25;
/// Pieces with a greater vertical span never reserve space for their children.
const EXPANSION_MAX_SPAN: i32 = 16;


/// The structure planner, it only reads the catalog and the height oracle so it can be
/// used for many structures, even concurrently.
pub struct JigsawPlacer<'a, H> {
    catalog: &'a PoolCatalog,
    oracle: &'a H,
}

impl<'a, H: HeightOracle> JigsawPlacer<'a, H> {

    #[inline]
    pub fn new(catalog: &'a PoolCatalog, oracle: &'a H) -> Self {
        Self { catalog, oracle }
    }

    /// Plan a structure, nothing is placed in any world at this point. This returns
    /// none if the start pool gave the empty element, or if the named start connector
    /// cannot be found.
    #[instrument(skip_all)]
    pub fn plan(&self, config: &JigsawConfig) -> Result<Option<PlannedStructure>, JigsawError> {

        config.validate()?;

        let mut rand = JavaRandom::new(config.seed);
        let rotation = Rotation::random(&mut rand);

        // Aliases targeting an unknown pool fall back to the requested pool.
        let start_pool = self.catalog.get(&config.alias_lookup.lookup(&config.start_pool))
            .or_else(|| self.catalog.get(&config.start_pool))
            .ok_or_else(|| JigsawError::UnknownStartPool(config.start_pool.clone()))?;

        let Some(element) = start_pool.random_element(&mut rand) else {
            warn!("empty start pool: {}", config.start_pool);
            return Ok(None);
        };

        if element.is_empty() {
            debug!("empty start element drawn from {}", config.start_pool);
            return Ok(None);
        }

        let element = Arc::clone(element);

        let offset = match &config.start_jigsaw_name {
            Some(name) => {
                let connectors = element.shuffled_connectors(config.pos, rotation, &mut rand);
                match connectors.iter().find(|connector| &connector.name == name) {
                    Some(connector) => connector.pos,
                    None => {
                        error!("no starting jigsaw {name} found in start pool {}", config.start_pool);
                        return Ok(None);
                    }
                }
            }
            None => config.pos,
        };

        let delta = offset - config.pos;
        let anchor = config.pos - delta;

        let mut root = PlacedPiece::new(
            Arc::clone(&element),
            anchor,
            rotation,
            element.ground_level_delta(),
            element.bounding_box(anchor, rotation),
            0);

        let IVec3 { x: cx, z: cz, .. } = root.bounds.center();
        let y = match config.project_start_to_heightmap {
            Some(kind) => config.pos.y + self.oracle.first_free_height(cx, cz, kind),
            None => anchor.y,
        };

        root.move_y(y - (root.bounds.min.y + root.ground_level_delta));
        let center = IVec3::new(cx, y + delta.y, cz);

        debug!("start {element} at {}, rotation {rotation:?}, center {center}", root.position);

        let mut expansion = Expansion {
            catalog: self.catalog,
            oracle: self.oracle,
            config,
            rand,
            pieces: vec![root],
            cells: Vec::new(),
            frontier: PlacementFrontier::new(),
            heights: HeightCache::new(),
        };

        if config.max_depth > 0 {

            let radius = config.max_distance_from_center;
            let min_y = (center.y - radius).max(self.oracle.min_y() + config.dimension_padding.bottom);
            let max_y = (center.y + radius + 1).min(self.oracle.max_y() + 1 - config.dimension_padding.top);

            let mut free = CollisionVolume::from_box(BoundingBox::new(
                (cx - radius) as f64, min_y as f64, (cz - radius) as f64,
                (cx + radius + 1) as f64, max_y as f64, (cz + radius + 1) as f64));
            free.subtract(expansion.pieces[0].bounds.to_bounding_box());
            expansion.cells.push(free);

            expansion.expand(0, 0, 0);
            while let Some(entry) = expansion.frontier.next() {
                expansion.expand(entry.piece, entry.cell, entry.depth);
            }

        }

        debug!("planned {} pieces", expansion.pieces.len());

        Ok(Some(PlannedStructure {
            center,
            liquid: config.liquid_settings,
            pieces: expansion.pieces,
        }))

    }

}


/// A piece waiting in the frontier, both are indices in the expansion arenas.
#[derive(Debug)]
struct FrontierEntry {
    piece: usize,
    cell: usize,
    depth: u32,
}

/// State of the expansion of one structure. Free space cells are kept in an arena so
/// that a cell can be shared by all the pieces placed into it, a piece's children
/// either go in its own box (for connectors pointing inward) or in the cell it has
/// been placed into.
struct Expansion<'a, H> {
    catalog: &'a PoolCatalog,
    oracle: &'a H,
    config: &'a JigsawConfig,
    rand: JavaRandom,
    pieces: Vec<PlacedPiece>,
    cells: Vec<CollisionVolume>,
    frontier: PlacementFrontier<FrontierEntry>,
    heights: HeightCache,
}

impl<'a, H: HeightOracle> Expansion<'a, H> {

    /// Try attaching a child to every connector of the given piece. Pieces at the
    /// maximum depth still close their connectors with elements of the fallback pools,
    /// these terminal children are recorded at the maximum depth and never expanded.
    fn expand(&mut self, index: usize, outer_cell: usize, depth: u32) {

        let piece = &self.pieces[index];
        let element = Arc::clone(&piece.element);
        let position = piece.position;
        let rotation = piece.rotation;
        let bounds = piece.bounds;
        let parent_delta = piece.ground_level_delta;

        let rigid = element.projection() == Projection::Rigid;
        let min_y = bounds.min.y;
        let child_depth = (depth + 1).min(self.config.max_depth);
        let mut inner_cell = None;

        self.heights.clear();

        'connectors: for connector in element.shuffled_connectors(position, rotation, &mut self.rand) {

            let target = connector.target_pos();
            let rel_y = connector.pos.y - min_y;

            let Some((pool, fallback)) = self.resolve_pool(&connector.pool) else {
                continue;
            };

            let cell = if bounds.contains(target) {
                *inner_cell.get_or_insert_with(|| {
                    self.cells.push(CollisionVolume::from_box(bounds.to_bounding_box()));
                    self.cells.len() - 1
                })
            } else {
                outer_cell
            };

            let mut candidates = Vec::new();
            if depth != self.config.max_depth {
                candidates.extend(pool.shuffled_elements(&mut self.rand));
            }
            candidates.extend(fallback.shuffled_elements(&mut self.rand));

            for candidate in candidates {

                if candidate.is_empty() {
                    break;
                }

                let child_rigid = candidate.projection() == Projection::Rigid;

                for child_rotation in Rotation::shuffled(&mut self.rand) {

                    let child_connectors = candidate.shuffled_connectors(IVec3::ZERO, child_rotation, &mut self.rand);
                    let local_bounds = candidate.bounding_box(IVec3::ZERO, child_rotation);

                    let expansion = if self.config.use_expansion_hack && local_bounds.y_span() <= EXPANSION_MAX_SPAN {
                        self.expansion_height(&child_connectors, local_bounds)
                    } else {
                        0
                    };

                    for child_connector in &child_connectors {

                        if !connector.can_attach(child_connector) {
                            continue;
                        }

                        let child_offset = target - child_connector.pos;
                        let child_bounds = candidate.bounding_box(child_offset, child_rotation);
                        let child_rel_y = child_connector.pos.y;
                        let y_diff = rel_y - child_rel_y + connector.front.delta().y;

                        let child_min_y = if rigid && child_rigid {
                            min_y + y_diff
                        } else {
                            self.surface_height(&connector) - child_rel_y
                        };

                        let dy = IVec3::new(0, child_min_y - child_bounds.min.y, 0);
                        let mut child_bounds = child_bounds.moved(dy);
                        let child_pos = child_offset + dy;

                        if expansion > 0 {
                            let height = (expansion + 1).max(child_bounds.max.y - child_bounds.min.y);
                            child_bounds.encapsulate(IVec3::new(child_bounds.min.x, child_bounds.min.y + height, child_bounds.min.z));
                        }

                        let footprint = child_bounds.to_bounding_box();
                        if !self.cells[cell].contains(footprint.deflate(FIT_TOLERANCE)) {
                            continue;
                        }

                        self.cells[cell].subtract(footprint);

                        let child_delta = if child_rigid {
                            parent_delta - y_diff
                        } else {
                            candidate.ground_level_delta()
                        };

                        let junction_y = if rigid {
                            min_y + rel_y
                        } else if child_rigid {
                            child_min_y + child_rel_y
                        } else {
                            self.surface_height(&connector) + y_diff / 2
                        };

                        self.pieces[index].junctions.push(Junction {
                            source_x: target.x,
                            source_ground_y: junction_y - rel_y + parent_delta,
                            source_z: target.z,
                            delta_y: y_diff,
                            dest_projection: candidate.projection(),
                        });

                        let mut child = PlacedPiece::new(Arc::clone(&candidate), child_pos, child_rotation, child_delta, child_bounds, child_depth);
                        child.junctions.push(Junction {
                            source_x: connector.pos.x,
                            source_ground_y: junction_y - child_rel_y + child_delta,
                            source_z: connector.pos.z,
                            delta_y: -y_diff,
                            dest_projection: element.projection(),
                        });

                        trace!("attached {candidate} at {child_pos}, rotation {child_rotation:?}, depth {child_depth}");

                        self.pieces.push(child);
                        if depth < self.config.max_depth {
                            self.frontier.push(FrontierEntry {
                                piece: self.pieces.len() - 1,
                                cell,
                                depth: child_depth,
                            }, connector.placement_priority);
                        }

                        continue 'connectors;

                    }

                }

            }

        }

    }

    /// Resolve the pool targeted by a connector and its fallback, none is returned if
    /// any of them is missing or unexpectedly empty.
    fn resolve_pool(&self, key: &Ident) -> Option<(&'a TemplatePool, &'a TemplatePool)> {

        let catalog = self.catalog;
        let resolved = self.config.alias_lookup.lookup(key);

        let pool = match catalog.get(&resolved) {
            Some(pool) if !pool.is_empty() || resolved == Ident::EMPTY_POOL => pool,
            _ => {
                warn!("empty or non-existent pool: {resolved} (requested {key})");
                return None;
            }
        };

        match catalog.get(pool.fallback()) {
            Some(fallback) if !fallback.is_empty() || pool.fallback() == &Ident::EMPTY_POOL => Some((pool, fallback)),
            _ => {
                warn!("empty or non-existent fallback pool: {}", pool.fallback());
                None
            }
        }

    }

    /// Height to reserve above a candidate, this is the greatest size of the pools
    /// targeted by its connectors pointing inside of it.
    fn expansion_height(&self, connectors: &[Connector], local_bounds: BlockBox) -> i32 {
        connectors.iter()
            .filter(|connector| local_bounds.contains(connector.target_pos()))
            .map(|connector| {
                let pool = self.catalog.get(&self.config.alias_lookup.lookup(&connector.pool));
                let size = pool.map_or(0, TemplatePool::max_size);
                let fallback_size = pool
                    .and_then(|pool| self.catalog.get(pool.fallback()))
                    .map_or(0, TemplatePool::max_size);
                size.max(fallback_size)
            })
            .max()
            .unwrap_or(0)
    }

    /// Terrain surface at the column of the given connector.
    fn surface_height(&mut self, connector: &Connector) -> i32 {
        self.heights.get(self.oracle, connector.pos.x, connector.pos.z, HeightmapKind::WorldSurfaceWg)
    }

}


/// A planned structure, its pieces are not yet placed in any world.
#[derive(Debug, Clone)]
pub struct PlannedStructure {
    center: IVec3,
    liquid: LiquidSettings,
    pieces: Vec<PlacedPiece>,
}

impl PlannedStructure {

    /// The center of the structure, horizontally at the center of the root piece.
    #[inline]
    pub fn center(&self) -> IVec3 {
        self.center
    }

    /// All pieces in acceptance order, the root first.
    #[inline]
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    #[inline]
    pub fn root(&self) -> &PlacedPiece {
        &self.pieces[0]
    }

    /// The box enclosing all pieces.
    pub fn bounds(&self) -> BlockBox {
        self.pieces.iter()
            .map(|piece| piece.bounds)
            .reduce(|a, b| a | b)
            .unwrap_or(BlockBox::single(self.center))
    }

    /// Place every piece in the world in acceptance order, the first failure stops the
    /// commit and pieces already placed are not removed.
    #[instrument(skip_all)]
    pub fn commit<W: StructureWorld>(&self, world: &mut W, rand: &mut JavaRandom, keep_jigsaws: bool) -> Result<(), JigsawError> {
        for (index, piece) in self.pieces.iter().enumerate() {
            if !piece.element.place(world, piece.position, piece.rotation, piece.bounds, rand, self.liquid, keep_jigsaws) {
                warn!("failed to place piece #{index}: {}", piece.element);
                return Err(JigsawError::PlaceFailed { index });
            }
        }
        Ok(())
    }

}


/// Errors of structure planning and committing.
#[derive(Debug, Error)]
pub enum JigsawError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown start pool {0}")]
    UnknownStartPool(Ident),
    #[error("placement of piece #{index} failed")]
    PlaceFailed {
        index: usize,
    },
}
