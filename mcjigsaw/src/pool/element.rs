//! Pool elements, the alternatives a pool can draw from.

use std::sync::Arc;
use std::fmt;

use glam::IVec3;

use crate::world::{IgnoredBlocks, LiquidSettings, StructureWorld, TemplatePlacement};
use crate::connector::{self, Connector, JointType};
use crate::geom::{BlockBox, Face, Rotation};
use crate::template::Template;
use crate::util::JavaRandom;
use crate::ident::Ident;

use super::PoolError;


/// How the vertical position of an element is resolved when attached to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    /// The element keeps a fixed vertical offset relative to its parent.
    #[default]
    Rigid,
    /// The element follows the terrain surface.
    TerrainMatching,
}


/// The different kind of elements and their geometry payload.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// An element that places nothing and terminates a branch.
    Empty,
    /// A template with the current processing.
    Single(SingleElement),
    /// A template with the legacy processing, only ignored blocks differ.
    LegacySingle(SingleElement),
    /// Many elements placed at the same anchor, the first one gives the connectors.
    List(Vec<PoolElement>),
    /// A feature run at the anchor, with a single downward connector.
    Feature(Ident),
}

/// Payload of single and legacy single elements.
#[derive(Debug, Clone)]
pub struct SingleElement {
    pub template: Arc<Template>,
    /// Processor list passed to the world service.
    pub processors: Option<Ident>,
    /// Liquid settings replacing the structure's ones when placing this element.
    pub liquid_override: Option<LiquidSettings>,
}


/// An element of a pool, this is a tagged variant with fields common to every kind.
/// Elements are immutable once built into a pool and are shared by all the pieces that
/// use them.
#[derive(Debug, Clone)]
pub struct PoolElement {
    kind: ElementKind,
    projection: Projection,
    ground_level_delta: i32,
}

impl PoolElement {

    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            projection: Projection::Rigid,
            ground_level_delta: 1,
        }
    }

    /// The empty element.
    #[inline]
    pub fn empty() -> Self {
        Self::new(ElementKind::Empty)
    }

    #[inline]
    pub fn single(template: Arc<Template>) -> Self {
        Self::new(ElementKind::Single(SingleElement { template, processors: None, liquid_override: None }))
    }

    #[inline]
    pub fn legacy_single(template: Arc<Template>) -> Self {
        Self::new(ElementKind::LegacySingle(SingleElement { template, processors: None, liquid_override: None }))
    }

    /// A list element, there must be at least one element in the list.
    pub fn list(elements: Vec<PoolElement>) -> Result<Self, PoolError> {
        if elements.is_empty() {
            return Err(PoolError::EmptyList);
        }
        Ok(Self::new(ElementKind::List(elements)))
    }

    #[inline]
    pub fn feature(feature: Ident) -> Self {
        Self::new(ElementKind::Feature(feature))
    }

    /// Change the projection of this element, list elements propagate it to their
    /// members.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.set_projection(projection);
        self
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        if let ElementKind::List(elements) = &mut self.kind {
            for element in elements {
                element.set_projection(projection);
            }
        }
    }

    #[inline]
    pub fn with_ground_level_delta(mut self, delta: i32) -> Self {
        self.ground_level_delta = delta;
        self
    }

    /// Set the processor list, only relevant to single elements.
    pub fn with_processors(mut self, processors: Ident) -> Self {
        if let ElementKind::Single(single) | ElementKind::LegacySingle(single) = &mut self.kind {
            single.processors = Some(processors);
        }
        self
    }

    /// Set the liquid settings override, only relevant to single elements.
    pub fn with_liquid_override(mut self, liquid: LiquidSettings) -> Self {
        if let ElementKind::Single(single) | ElementKind::LegacySingle(single) = &mut self.kind {
            single.liquid_override = Some(liquid);
        }
        self
    }

    #[inline]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ElementKind::Empty)
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn ground_level_delta(&self) -> i32 {
        self.ground_level_delta
    }

    /// Size of this element once rotated.
    pub fn size(&self, rotation: Rotation) -> IVec3 {
        match &self.kind {
            ElementKind::Empty |
            ElementKind::Feature(_) => IVec3::ZERO,
            ElementKind::Single(single) |
            ElementKind::LegacySingle(single) => single.template.size(rotation),
            ElementKind::List(elements) => elements.iter()
                .map(|element| element.size(rotation))
                .fold(IVec3::ZERO, IVec3::max),
        }
    }

    /// The box of blocks covered by this element at the given anchor and rotation.
    /// Empty and feature elements cover the single block at their anchor, empty members
    /// of a list are ignored.
    pub fn bounding_box(&self, anchor: IVec3, rotation: Rotation) -> BlockBox {
        match &self.kind {
            ElementKind::Empty |
            ElementKind::Feature(_) => BlockBox::single(anchor),
            ElementKind::Single(single) |
            ElementKind::LegacySingle(single) => single.template.bounding_box(anchor, rotation),
            ElementKind::List(elements) => elements.iter()
                .filter(|element| !element.is_empty())
                .map(|element| element.bounding_box(anchor, rotation))
                .reduce(|a, b| a | b)
                .unwrap_or(BlockBox::single(anchor)),
        }
    }

    /// Return the connectors of this element at the given anchor and rotation, in the
    /// order they must be expanded.
    pub fn shuffled_connectors(&self, anchor: IVec3, rotation: Rotation, rand: &mut JavaRandom) -> Vec<Connector> {
        match &self.kind {
            ElementKind::Empty => Vec::new(),
            ElementKind::Single(single) |
            ElementKind::LegacySingle(single) =>
                connector::scan_connectors(single.template.connectors(), anchor, rotation, rand),
            ElementKind::List(elements) => elements.first()
                .map(|element| element.shuffled_connectors(anchor, rotation, rand))
                .unwrap_or_default(),
            ElementKind::Feature(_) => vec![feature_connector(anchor)],
        }
    }

    /// Paint this element into the world, this is the only method with side effects.
    #[allow(clippy::too_many_arguments)]
    pub fn place<W: StructureWorld>(&self,
        world: &mut W,
        anchor: IVec3,
        rotation: Rotation,
        bounds: BlockBox,
        rand: &mut JavaRandom,
        liquid: LiquidSettings,
        keep_jigsaws: bool,
    ) -> bool {
        match &self.kind {
            ElementKind::Empty => true,
            ElementKind::Single(single) =>
                place_single(world, single, IgnoredBlocks::StructureBlocks, anchor, rotation, bounds, liquid, keep_jigsaws),
            ElementKind::LegacySingle(single) =>
                place_single(world, single, IgnoredBlocks::StructureBlocksAndAir, anchor, rotation, bounds, liquid, keep_jigsaws),
            ElementKind::List(elements) => elements.iter()
                .all(|element| element.place(world, anchor, rotation, bounds, rand, liquid, keep_jigsaws)),
            ElementKind::Feature(feature) => world.place_feature(feature, anchor, rand),
        }
    }

}

impl fmt::Display for PoolElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ElementKind::Empty => write!(f, "Empty"),
            ElementKind::Single(single) => write!(f, "Single[{}]", single.template.id()),
            ElementKind::LegacySingle(single) => write!(f, "LegacySingle[{}]", single.template.id()),
            ElementKind::List(elements) => {
                write!(f, "List[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            ElementKind::Feature(feature) => write!(f, "Feature[{feature}]"),
        }
    }
}


#[allow(clippy::too_many_arguments)]
fn place_single<W: StructureWorld>(
    world: &mut W,
    single: &SingleElement,
    ignored: IgnoredBlocks,
    anchor: IVec3,
    rotation: Rotation,
    bounds: BlockBox,
    liquid: LiquidSettings,
    keep_jigsaws: bool,
) -> bool {
    world.place_template(&single.template, &TemplatePlacement {
        anchor,
        rotation,
        bounds,
        liquid: single.liquid_override.unwrap_or(liquid),
        ignored,
        processors: single.processors.clone(),
        keep_jigsaws,
    })
}

/// The connector of feature elements, it is never rotated.
fn feature_connector(anchor: IVec3) -> Connector {
    Connector {
        pos: anchor,
        front: Face::NegY,
        top: Face::PosZ,
        name: Ident::BOTTOM,
        target: Ident::BOTTOM,
        pool: Ident::EMPTY_POOL,
        final_state: arcstr::literal!("minecraft:air"),
        joint: JointType::Rollable,
        placement_priority: 0,
        selection_priority: 0,
    }
}
