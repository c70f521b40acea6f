//! Jigsaw structure assembly, modular pieces attached through their connectors are
//! recursively assembled into multi-piece structures.

pub mod util;

pub mod geom;
pub mod ident;
pub mod connector;
pub mod template;
pub mod shape;
pub mod height;
pub mod world;

pub mod pool;
pub mod jigsaw;
pub mod planner;
