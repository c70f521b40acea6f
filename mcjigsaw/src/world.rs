//! The world mutation service that receives placed structure pieces. The planner does
//! not know how blocks are stored, it only asks the world to paint templates and run
//! features, and this only happens once a structure is committed.

use glam::IVec3;

use crate::geom::{BlockBox, Rotation};
use crate::template::Template;
use crate::util::JavaRandom;
use crate::ident::Ident;


/// How fluids already present in the world interact with placed blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiquidSettings {
    /// Placed blocks that can be waterlogged are waterlogged when placed in water.
    #[default]
    ApplyWaterlogging,
    /// Placed blocks are never waterlogged.
    IgnoreWaterlogging,
}


/// The blocks of a template that are skipped when painting it, this is the only part of
/// the processing pipeline that depends on the element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredBlocks {
    /// Structure blocks are skipped.
    StructureBlocks,
    /// Structure blocks and air blocks are skipped, for legacy elements.
    StructureBlocksAndAir,
}


/// All the parameters describing how a template must be painted in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePlacement {
    /// The position of the template origin after rotation.
    pub anchor: IVec3,
    pub rotation: Rotation,
    /// Blocks outside of this box must not be modified.
    pub bounds: BlockBox,
    pub liquid: LiquidSettings,
    pub ignored: IgnoredBlocks,
    /// Processor list to apply, the world service knows what it refers to.
    pub processors: Option<Ident>,
    /// Keep jigsaw blocks instead of replacing them with their final state.
    pub keep_jigsaws: bool,
}


/// A world service that can paint structure pieces, each method returns false if the
/// placement failed, in which case the whole structure is failed.
pub trait StructureWorld {

    /// Paint the given template.
    fn place_template(&mut self, template: &Template, placement: &TemplatePlacement) -> bool;

    /// Run the given placed feature at the given position.
    fn place_feature(&mut self, feature: &Ident, pos: IVec3, rand: &mut JavaRandom) -> bool;

}
