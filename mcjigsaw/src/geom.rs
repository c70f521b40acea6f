//! Various geometry utilities that completes the `glam` math crate.

use std::ops::BitOr;
use std::fmt;

use glam::{DVec3, IVec3};

use crate::util::JavaRandom;


/// An axis-aligned bounding box with real coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {

    /// Construct a new bounding box from the minimum and maximum points.
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        }
    }

    /// Return true if this box has no volume.
    pub fn is_empty(self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y || self.max.z <= self.min.z
    }

    /// Expand this bounding box in all direction by the given delta.
    pub fn inflate(self, delta: DVec3) -> Self {
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    /// Shrink this bounding box in all direction by the given amount.
    pub fn deflate(self, amount: f64) -> Self {
        self.inflate(DVec3::splat(-amount))
    }

    /// Return true if this bounding box intersects with the given one.
    pub fn intersects(self, other: Self) -> bool {
        other.max.x > self.min.x && other.min.x < self.max.x &&
        other.max.y > self.min.y && other.min.y < self.max.y &&
        other.max.z > self.min.z && other.min.z < self.max.z
    }

}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}


/// A box of blocks, both minimum and maximum corners are inclusive, so a box where
/// `min == max` contains exactly one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl BlockBox {

    /// Construct a box from any two opposite corners.
    pub fn from_corners(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Construct a box containing the single given block.
    #[inline]
    pub fn single(pos: IVec3) -> Self {
        Self { min: pos, max: pos }
    }

    /// Return the number of blocks along each axis.
    #[inline]
    pub fn span(self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    #[inline]
    pub fn y_span(self) -> i32 {
        self.span().y
    }

    /// Center of the box, rounded toward zero just like integer division.
    #[inline]
    pub fn center(self) -> IVec3 {
        (self.min + self.max) / 2
    }

    /// Return this box moved by the given delta.
    #[inline]
    pub fn moved(self, delta: IVec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Grow this box just enough to include the given block.
    pub fn encapsulate(&mut self, pos: IVec3) {
        self.min = self.min.min(pos);
        self.max = self.max.max(pos);
    }

    /// Return true if the block is inside this box.
    #[inline]
    pub fn contains(self, pos: IVec3) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    /// Convert this block box to the real bounding box covering all of its blocks.
    pub fn to_bounding_box(self) -> BoundingBox {
        BoundingBox {
            min: self.min.as_dvec3(),
            max: (self.max + IVec3::ONE).as_dvec3(),
        }
    }

}

// The bit or operator can be used to make a union of two block boxes.
impl BitOr<BlockBox> for BlockBox {
    type Output = BlockBox;
    #[inline]
    fn bitor(self, rhs: BlockBox) -> Self::Output {
        BlockBox {
            min: self.min.min(rhs.min),
            max: self.max.max(rhs.max),
        }
    }
}

impl fmt::Display for BlockBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}


/// Represent a cube facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {

    /// Array containing all 6 faces.
    pub const ALL: [Self; 6] = [Self::NegY, Self::PosY, Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    #[inline]
    pub fn is_y(self) -> bool {
        matches!(self, Face::NegY | Face::PosY)
    }

    /// Get the opposite face.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Face::NegY => Face::PosY,
            Face::PosY => Face::NegY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
        }
    }

    /// Opposite face for horizontal faces, vertical faces are unchanged.
    #[inline]
    fn opposite_horizontal(self) -> Self {
        if self.is_y() { self } else { self.opposite() }
    }

    /// Rotate this face horizontally to right, Y faces don't change.
    #[inline]
    pub fn rotate_right(self) -> Self {
        match self {
            Face::NegZ => Face::PosX,
            Face::PosX => Face::PosZ,
            Face::PosZ => Face::NegX,
            Face::NegX => Face::NegZ,
            _ => self
        }
    }

    /// Rotate this face horizontally to left, Y faces don't change.
    #[inline]
    pub fn rotate_left(self) -> Self {
        match self {
            Face::NegZ => Face::NegX,
            Face::NegX => Face::PosZ,
            Face::PosZ => Face::PosX,
            Face::PosX => Face::NegZ,
            _ => self
        }
    }

    /// Get the delta vector for this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
        }
    }

}


/// A horizontal rotation of a structure piece around its anchor, rotations are given
/// clockwise when looking down from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    CounterClockwise90,
}

impl Rotation {

    /// All rotations, in the order used for random draws.
    pub const ALL: [Self; 4] = [Self::None, Self::Clockwise90, Self::Clockwise180, Self::CounterClockwise90];

    /// Draw a random rotation.
    #[inline]
    pub fn random(rand: &mut JavaRandom) -> Self {
        rand.next_choice(&Self::ALL)
    }

    /// Return all four rotations in a random order.
    pub fn shuffled(rand: &mut JavaRandom) -> [Self; 4] {
        let mut all = Self::ALL;
        rand.shuffle(&mut all);
        all
    }

    /// Rotate a face, vertical faces are unchanged.
    pub fn rotate_face(self, face: Face) -> Face {
        match self {
            Rotation::None => face,
            Rotation::Clockwise90 => face.rotate_right(),
            Rotation::Clockwise180 => face.opposite_horizontal(),
            Rotation::CounterClockwise90 => face.rotate_left(),
        }
    }

    /// Rotate a position relative to the rotation origin.
    pub fn rotate_pos(self, pos: IVec3) -> IVec3 {
        match self {
            Rotation::None => pos,
            Rotation::Clockwise90 => IVec3::new(-pos.z, pos.y, pos.x),
            Rotation::Clockwise180 => IVec3::new(-pos.x, pos.y, -pos.z),
            Rotation::CounterClockwise90 => IVec3::new(pos.z, pos.y, -pos.x),
        }
    }

    /// Rotate a size, which only swaps the horizontal components on quarter turns.
    pub fn rotate_size(self, size: IVec3) -> IVec3 {
        match self {
            Rotation::None | Rotation::Clockwise180 => size,
            Rotation::Clockwise90 | Rotation::CounterClockwise90 => IVec3::new(size.z, size.y, size.x),
        }
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn rotate_pos_matches_faces() {
        // Rotating a face delta must give the delta of the rotated face.
        for rotation in Rotation::ALL {
            for face in Face::ALL {
                assert_eq!(rotation.rotate_pos(face.delta()), rotation.rotate_face(face).delta(), "{rotation:?} {face:?}");
            }
        }
    }

    #[test]
    fn block_box() {

        let bb = BlockBox::from_corners(IVec3::new(2, 0, -1), IVec3::new(0, 3, 1));
        assert_eq!(bb.min, IVec3::new(0, 0, -1));
        assert_eq!(bb.max, IVec3::new(2, 3, 1));
        assert_eq!(bb.span(), IVec3::new(3, 4, 3));
        assert!(bb.contains(IVec3::new(2, 3, 1)));
        assert!(!bb.contains(IVec3::new(3, 3, 1)));
        assert_eq!(bb.to_bounding_box(), BoundingBox::new(0.0, 0.0, -1.0, 3.0, 4.0, 2.0));

        let mut single = BlockBox::single(IVec3::ZERO);
        assert_eq!(single.y_span(), 1);
        single.encapsulate(IVec3::new(0, 5, 0));
        assert_eq!(single.y_span(), 6);

        assert_eq!(BlockBox::from_corners(IVec3::new(-3, 0, -3), IVec3::new(0, 0, 0)).center(), IVec3::new(-1, 0, -1));

    }

    #[test]
    fn bounding_box_deflate() {
        let bb = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).deflate(0.25);
        assert_eq!(bb, BoundingBox::new(0.25, 0.25, 0.25, 0.75, 0.75, 0.75));
        assert!(!bb.is_empty());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).intersects(bb));
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.5, 0.5, 0.5).deflate(0.25).is_empty());
    }

}
