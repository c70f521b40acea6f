//! Plan a batch of village structures on worker threads, commit them on a canvas and
//! print the canvas of each one.

use std::process::ExitCode;
use std::sync::Arc;
use std::io;

use glam::IVec3;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mcjigsaw::jigsaw::{JigsawConfig, JigsawError};
use mcjigsaw::pool::{CatalogError, PoolAliasLookup, PoolError};
use mcjigsaw::planner::{PlannerPool, PlanResult};
use mcjigsaw::height::HeightmapKind;
use mcjigsaw::template::TemplateError;
use mcjigsaw::ident::{Ident, IdentError};
use mcjigsaw::util::JavaRandom;

pub mod config;
pub mod catalog;
pub mod canvas;
pub mod terrain;

use canvas::Canvas;
use terrain::RollingHills;


/// Horizontal distance between two requested structures.
const SPACING: i32 = 256;
/// Structures requested on each row.
const ROW_LEN: i32 = 4;


pub fn main() -> ExitCode {

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }

}

fn run() -> Result<(), DemoError> {

    let catalog = Arc::new(catalog::build()?);
    let terrain = Arc::new(RollingHills::new(64));
    let aliases = catalog::aliases()?;
    let start_pool = Ident::parse(catalog::START_POOL)?;

    let count = config::count();
    let workers = config::workers();
    info!("planning {count} structures on {workers} workers, seed {}", config::seed());

    let planner = PlannerPool::new(Arc::clone(&catalog), Arc::clone(&terrain), workers)
        .map_err(DemoError::Planner)?;

    let mut seeds = Vec::with_capacity(count);
    let mut pending = 0;
    let mut results = Vec::with_capacity(count);

    for index in 0..count {

        let i = index as i32;
        let pos = IVec3::new((i % ROW_LEN) * SPACING, 0, (i / ROW_LEN) * SPACING);
        let seed = config::seed().wrapping_add(index as i64);
        seeds.push(seed);

        let config = JigsawConfig::new(start_pool.clone(), pos)
            .with_max_depth(config::max_depth())
            .with_expansion_hack(config::expansion_hack())
            .with_heightmap_projection(HeightmapKind::WorldSurfaceWg)
            .with_alias_lookup(PoolAliasLookup::from_bindings(&aliases, pos, seed)?)
            .with_seed(seed);

        // When the request queue is full, make room by waiting for a result.
        while !planner.request(index, config.clone()) {
            results.push(planner.recv());
            pending -= 1;
        }

        pending += 1;

    }

    for _ in 0..pending {
        results.push(planner.recv());
    }

    results.sort_by_key(|result| result.tag);

    for PlanResult { tag, result } in results {

        let Some(structure) = result? else {
            warn!("structure #{tag}: nothing planned");
            continue;
        };

        let mut canvas = Canvas::new();
        structure.commit(&mut canvas, &mut JavaRandom::new(seeds[tag]), false)?;

        let max_depth = structure.pieces().iter().map(|piece| piece.depth).max().unwrap_or(0);
        info!("structure #{tag}: {} pieces, max depth {max_depth}, center {}, bounds {}",
            structure.pieces().len(), structure.center(), structure.bounds());

        println!("{}", canvas.render());

    }

    Ok(())

}


/// Errors of the demonstration.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("identifier: {0}")]
    Ident(#[from] IdentError),
    #[error("template: {0}")]
    Template(#[from] TemplateError),
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("jigsaw: {0}")]
    Jigsaw(#[from] JigsawError),
    #[error("failed to start planner: {0}")]
    Planner(io::Error),
}
