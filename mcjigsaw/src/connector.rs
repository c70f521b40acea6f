//! Jigsaw connectors, the attachment points between structure pieces.

use arcstr::ArcStr;
use glam::IVec3;

use crate::geom::{Face, Rotation};
use crate::util::JavaRandom;
use crate::ident::Ident;


/// How a connector can be rolled around its front axis when attaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    /// The top faces of both connectors must be equal.
    Aligned,
    /// Any top face is accepted.
    Rollable,
}

impl JointType {

    /// The joint type of a connector without explicit joint, vertical connectors can be
    /// rolled while horizontal ones are aligned.
    #[inline]
    pub fn default_for(front: Face) -> Self {
        if front.is_y() {
            JointType::Rollable
        } else {
            JointType::Aligned
        }
    }

}


/// A jigsaw connector, position and orientation are either local to a template or
/// absolute, depending on where it has been obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    /// Position of the connector block.
    pub pos: IVec3,
    /// The face the connector is looking to, other pieces attach on that side.
    pub front: Face,
    /// The face pointing to the top of the connector, horizontal for vertical fronts.
    pub top: Face,
    /// Name of this connector, matched by the target of other connectors.
    pub name: Ident,
    /// Name of the connectors this one can attach to.
    pub target: Ident,
    /// The pool to draw children elements from.
    pub pool: Ident,
    /// The block replacing the connector once the structure is placed.
    pub final_state: ArcStr,
    pub joint: JointType,
    /// Frontier priority of the pieces attached through this connector.
    pub placement_priority: i32,
    /// Connectors with higher selection priority are expanded first.
    pub selection_priority: i32,
}

impl Connector {

    /// The block in front of this connector, where the attached connector must be.
    #[inline]
    pub fn target_pos(&self) -> IVec3 {
        self.pos + self.front.delta()
    }

    /// Return this connector rotated around the origin and then moved to the anchor.
    pub fn transformed(&self, anchor: IVec3, rotation: Rotation) -> Self {
        Self {
            pos: anchor + rotation.rotate_pos(self.pos),
            front: rotation.rotate_face(self.front),
            top: rotation.rotate_face(self.top),
            ..self.clone()
        }
    }

    /// Return true if the given connector, placed on a child piece, can attach to this
    /// one: they must face each other, be rolled the same unless this one is rollable,
    /// and this connector's target must be the other connector's name.
    pub fn can_attach(&self, other: &Connector) -> bool {
        self.front == other.front.opposite()
            && (self.joint == JointType::Rollable || self.top == other.top)
            && self.target == other.name
    }

}


/// Transform connectors of an element to the given anchor and rotation, then order them
/// in the order they must be tried: randomly shuffled and then stably sorted by
/// decreasing selection priority.
pub fn scan_connectors<'a, I>(connectors: I, anchor: IVec3, rotation: Rotation, rand: &mut JavaRandom) -> Vec<Connector>
where
    I: IntoIterator<Item = &'a Connector>,
{
    let mut connectors = connectors.into_iter()
        .map(|connector| connector.transformed(anchor, rotation))
        .collect::<Vec<_>>();
    rand.shuffle(&mut connectors);
    connectors.sort_by(|a, b| b.selection_priority.cmp(&a.selection_priority));
    connectors
}


#[cfg(test)]
mod tests {

    use super::*;

    /// A connector with the given position and front, named and targeting "link".
    fn connector(pos: IVec3, front: Face, pool: &str) -> Connector {
        Connector {
            pos,
            front,
            top: if front.is_y() { Face::PosZ } else { Face::PosY },
            name: Ident::parse("link").unwrap(),
            target: Ident::parse("link").unwrap(),
            pool: Ident::parse(pool).unwrap(),
            final_state: arcstr::literal!("minecraft:air"),
            joint: JointType::default_for(front),
            placement_priority: 0,
            selection_priority: 0,
        }
    }

    #[test]
    fn attach() {

        let south = connector(IVec3::ZERO, Face::PosZ, "empty");
        let north = connector(IVec3::ZERO, Face::NegZ, "empty");
        let east = connector(IVec3::ZERO, Face::PosX, "empty");

        assert!(south.can_attach(&north));
        assert!(north.can_attach(&south));
        assert!(!south.can_attach(&east));
        assert!(!south.can_attach(&south));

        let mut other_name = north.clone();
        other_name.name = Ident::parse("other").unwrap();
        assert!(!south.can_attach(&other_name));

        // Aligned joints need the same top face.
        let mut rolled = north.clone();
        rolled.top = Face::PosX;
        assert!(!south.can_attach(&rolled));

        let down = connector(IVec3::ZERO, Face::NegY, "empty");
        let mut up = connector(IVec3::ZERO, Face::PosY, "empty");
        up.top = Face::NegX;
        assert_eq!(down.joint, JointType::Rollable);
        assert!(down.can_attach(&up));

    }

    #[test]
    fn transform() {

        let conn = connector(IVec3::new(1, 2, 0), Face::NegZ, "empty");
        let moved = conn.transformed(IVec3::new(10, 0, 10), Rotation::Clockwise90);
        assert_eq!(moved.pos, IVec3::new(10, 2, 11));
        assert_eq!(moved.front, Face::PosX);
        assert_eq!(moved.top, Face::PosY);
        assert_eq!(moved.target_pos(), IVec3::new(11, 2, 11));

    }

    #[test]
    fn scan_order() {

        let mut high = connector(IVec3::new(0, 0, 0), Face::NegZ, "empty");
        high.selection_priority = 5;
        let low = connector(IVec3::new(1, 0, 0), Face::NegZ, "empty");
        let mut mid = connector(IVec3::new(2, 0, 0), Face::NegZ, "empty");
        mid.selection_priority = 2;

        for seed in 0..8 {
            let scanned = scan_connectors([&low, &mid, &high], IVec3::ZERO, Rotation::None, &mut JavaRandom::new(seed));
            let priorities = scanned.iter().map(|c| c.selection_priority).collect::<Vec<_>>();
            assert_eq!(priorities, [5, 2, 0]);
        }

    }

}
