//! Pieces accepted in a planned structure.

use std::sync::Arc;

use glam::IVec3;

use crate::pool::{PoolElement, Projection};
use crate::geom::{BlockBox, Rotation};


/// A record of a connection between two pieces, stored on both sides. Terrain
/// adaptation uses junctions to smooth the terrain around the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
    /// X coordinate of the connector of the other piece.
    pub source_x: i32,
    /// Ground level of the other piece at the connection.
    pub source_ground_y: i32,
    pub source_z: i32,
    /// Vertical offset of the other piece relative to this one.
    pub delta_y: i32,
    /// Projection of the other piece.
    pub dest_projection: Projection,
}


/// A piece of a planned structure, an element placed at a position and rotation.
#[derive(Debug, Clone)]
pub struct PlacedPiece {
    pub element: Arc<PoolElement>,
    /// The anchor of the element.
    pub position: IVec3,
    pub rotation: Rotation,
    pub ground_level_delta: i32,
    /// The box reserved by this piece, this may be larger than the element box when
    /// space has been reserved above it.
    pub bounds: BlockBox,
    /// Number of connections from the root to this piece, except for the pieces
    /// closing the connectors of the deepest pieces, which share their depth.
    pub depth: u32,
    pub junctions: Vec<Junction>,
}

impl PlacedPiece {

    pub(super) fn new(element: Arc<PoolElement>, position: IVec3, rotation: Rotation, ground_level_delta: i32, bounds: BlockBox, depth: u32) -> Self {
        Self {
            element,
            position,
            rotation,
            ground_level_delta,
            bounds,
            depth,
            junctions: Vec::new(),
        }
    }

    /// Move this piece vertically.
    pub(super) fn move_y(&mut self, dy: i32) {
        let delta = IVec3::new(0, dy, 0);
        self.position += delta;
        self.bounds = self.bounds.moved(delta);
    }

}
