//! Structure templates, the blueprints referenced by single pool elements.

use arcstr::ArcStr;
use glam::IVec3;
use thiserror::Error;

use crate::connector::{Connector, JointType};
use crate::geom::{BlockBox, Face, Rotation};
use crate::ident::{Ident, IdentError};


/// Raw metadata of a jigsaw marker as stored in a template, identifiers are not yet
/// parsed. This is the form given to [`Template::new`].
#[derive(Debug, Clone)]
pub struct JigsawMarker {
    /// Position local to the template.
    pub pos: IVec3,
    pub front: Face,
    pub top: Face,
    pub name: String,
    pub target: String,
    pub pool: String,
    pub final_state: String,
    /// Joint type, the default depends on the front face if absent.
    pub joint: Option<JointType>,
    pub placement_priority: i32,
    pub selection_priority: i32,
}

impl JigsawMarker {

    /// A marker with no name, no target and default priorities, its pool is the empty
    /// pool. Fields are expected to be changed afterward.
    pub fn new(pos: IVec3, front: Face) -> Self {
        Self {
            pos,
            front,
            top: if front.is_y() { Face::PosZ } else { Face::PosY },
            name: "empty".to_string(),
            target: "empty".to_string(),
            pool: "empty".to_string(),
            final_state: "minecraft:air".to_string(),
            joint: None,
            placement_priority: 0,
            selection_priority: 0,
        }
    }

}


/// A structure template, only the geometry and connectors are known here, the actual
/// blocks of the template are painted by the world service.
#[derive(Debug)]
pub struct Template {
    id: Ident,
    /// The unrotated size of the template, each component is strictly positive.
    size: IVec3,
    /// Connectors, in local coordinates and sorted in their definition order.
    connectors: Vec<Connector>,
}

impl Template {

    /// Create a new template, checking that the size is not empty and that every jigsaw
    /// marker is well formed. A template with malformed markers cannot be used because
    /// its data is corrupted.
    pub fn new(id: Ident, size: IVec3, markers: Vec<JigsawMarker>) -> Result<Self, TemplateError> {

        if size.cmple(IVec3::ZERO).any() {
            return Err(TemplateError::IllegalSize(id, size));
        }

        let bounds = BlockBox::from_corners(IVec3::ZERO, size - IVec3::ONE);
        let mut connectors = Vec::with_capacity(markers.len());

        for marker in markers {

            if !bounds.contains(marker.pos) {
                return Err(TemplateError::MarkerOutside(id, marker.pos));
            }

            // Horizontal connectors point up, vertical ones have a horizontal top.
            let top_valid = if marker.front.is_y() { !marker.top.is_y() } else { marker.top == Face::PosY };
            if !top_valid {
                return Err(TemplateError::IllegalOrientation(id, marker.pos));
            }

            let parse = |s: &str| Ident::parse(s)
                .map_err(|e| TemplateError::IllegalMarker(id.clone(), marker.pos, e));

            connectors.push(Connector {
                pos: marker.pos,
                front: marker.front,
                top: marker.top,
                name: parse(&marker.name)?,
                target: parse(&marker.target)?,
                pool: parse(&marker.pool)?,
                final_state: ArcStr::from(marker.final_state),
                joint: marker.joint.unwrap_or(JointType::default_for(marker.front)),
                placement_priority: marker.placement_priority,
                selection_priority: marker.selection_priority,
            });

        }

        Ok(Self {
            id,
            size,
            connectors,
        })

    }

    #[inline]
    pub fn id(&self) -> &Ident {
        &self.id
    }

    /// Size of the template after the given rotation.
    #[inline]
    pub fn size(&self, rotation: Rotation) -> IVec3 {
        rotation.rotate_size(self.size)
    }

    /// The box of blocks covered by this template when placed at the given anchor and
    /// rotation. The rotation is around the anchor, so the box may extend in negative
    /// directions from the anchor.
    pub fn bounding_box(&self, anchor: IVec3, rotation: Rotation) -> BlockBox {
        let corner = rotation.rotate_pos(self.size - IVec3::ONE);
        BlockBox::from_corners(IVec3::ZERO, corner).moved(anchor)
    }

    /// Connectors of this template, in template-local coordinates.
    #[inline]
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

}


/// Error when building a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template {0} has an empty size {1}")]
    IllegalSize(Ident, IVec3),
    #[error("template {0} has a jigsaw marker outside of its bounds at {1}")]
    MarkerOutside(Ident, IVec3),
    #[error("template {0} has a jigsaw marker with an illegal orientation at {1}")]
    IllegalOrientation(Ident, IVec3),
    #[error("template {0} has a malformed jigsaw marker at {1}: {2}")]
    IllegalMarker(Ident, IVec3, #[source] IdentError),
}


#[cfg(test)]
mod tests {

    use super::*;

    fn id() -> Ident {
        Ident::parse("test:house").unwrap()
    }

    #[test]
    fn bounding_box_rotation() {

        let template = Template::new(id(), IVec3::new(5, 2, 3), vec![]).unwrap();
        let anchor = IVec3::new(10, 64, 10);

        assert_eq!(template.bounding_box(anchor, Rotation::None), BlockBox::from_corners(IVec3::new(10, 64, 10), IVec3::new(14, 65, 12)));
        assert_eq!(template.bounding_box(anchor, Rotation::Clockwise90), BlockBox::from_corners(IVec3::new(8, 64, 10), IVec3::new(10, 65, 14)));
        assert_eq!(template.bounding_box(anchor, Rotation::Clockwise180), BlockBox::from_corners(IVec3::new(6, 64, 8), IVec3::new(10, 65, 10)));
        assert_eq!(template.bounding_box(anchor, Rotation::CounterClockwise90), BlockBox::from_corners(IVec3::new(10, 64, 6), IVec3::new(12, 65, 10)));

        for rotation in Rotation::ALL {
            assert_eq!(template.bounding_box(anchor, rotation).span(), template.size(rotation));
        }

    }

    #[test]
    fn malformed_markers() {

        assert!(matches!(Template::new(id(), IVec3::new(0, 1, 1), vec![]), Err(TemplateError::IllegalSize(..))));

        let outside = JigsawMarker::new(IVec3::new(3, 0, 0), Face::PosX);
        assert!(matches!(Template::new(id(), IVec3::new(3, 1, 1), vec![outside]), Err(TemplateError::MarkerOutside(..))));

        let mut bad_pool = JigsawMarker::new(IVec3::ZERO, Face::NegZ);
        bad_pool.pool = "Not A Pool".to_string();
        assert!(matches!(Template::new(id(), IVec3::ONE, vec![bad_pool]), Err(TemplateError::IllegalMarker(..))));

        let mut bad_top = JigsawMarker::new(IVec3::ZERO, Face::NegZ);
        bad_top.top = Face::PosZ;
        assert!(matches!(Template::new(id(), IVec3::ONE, vec![bad_top]), Err(TemplateError::IllegalOrientation(..))));

        let mut vertical = JigsawMarker::new(IVec3::ZERO, Face::PosY);
        vertical.top = Face::NegY;
        assert!(matches!(Template::new(id(), IVec3::ONE, vec![vertical]), Err(TemplateError::IllegalOrientation(..))));

    }

    #[test]
    fn default_joint() {

        let markers = vec![
            JigsawMarker::new(IVec3::ZERO, Face::NegY),
            JigsawMarker::new(IVec3::ZERO, Face::NegX),
        ];

        let template = Template::new(id(), IVec3::ONE, markers).unwrap();
        assert_eq!(template.connectors()[0].joint, JointType::Rollable);
        assert_eq!(template.connectors()[1].joint, JointType::Aligned);
        assert_eq!(template.connectors()[1].pool, Ident::EMPTY_POOL);

    }

}
