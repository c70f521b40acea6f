//! Boolean algebra on volumes made of axis-aligned boxes, used to track the free space
//! remaining while a structure grows.

use std::fmt;

use crate::geom::BoundingBox;


/// A volume made of pairwise-disjoint axis-aligned boxes. Operations are exact, there
/// is no rasterization, so this can be used with fractional coordinates such as boxes
/// deflated by a fraction of a block.
#[derive(Clone, Default, PartialEq)]
pub struct CollisionVolume {
    boxes: Vec<BoundingBox>,
}

impl CollisionVolume {

    /// An empty volume.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A volume made of a single box.
    pub fn from_box(bb: BoundingBox) -> Self {
        let mut volume = Self::new();
        volume.union(bb);
        volume
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The disjoint boxes this volume is made of, in no particular order.
    #[inline]
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Add the given box to this volume.
    pub fn union(&mut self, bb: BoundingBox) {
        if bb.is_empty() {
            return;
        }
        // Keep boxes disjoint by removing the overlapping parts first.
        self.subtract(bb);
        self.boxes.push(bb);
    }

    /// Remove the given box from this volume.
    pub fn subtract(&mut self, bb: BoundingBox) {

        if bb.is_empty() || !self.boxes.iter().any(|&other| other.intersects(bb)) {
            return;
        }

        let mut boxes = Vec::with_capacity(self.boxes.len() + 6);
        for &other in &self.boxes {
            if other.intersects(bb) {
                split_outside(other, bb, &mut boxes);
            } else {
                boxes.push(other);
            }
        }

        self.boxes = boxes;

    }

    /// Return true if the given box overlaps this volume, touching faces don't count.
    pub fn intersects(&self, bb: BoundingBox) -> bool {
        !bb.is_empty() && self.boxes.iter().any(|&other| other.intersects(bb))
    }

    /// Return true if the given box is entirely inside this volume.
    pub fn contains(&self, bb: BoundingBox) -> bool {

        if bb.is_empty() {
            return true;
        }

        // Carve the volume's boxes out of the tested box, what remains is outside.
        let mut remaining = vec![bb];
        let mut next = Vec::new();

        for &other in &self.boxes {

            for &part in &remaining {
                if part.intersects(other) {
                    split_outside(part, other, &mut next);
                } else {
                    next.push(part);
                }
            }

            std::mem::swap(&mut remaining, &mut next);
            next.clear();

            if remaining.is_empty() {
                return true;
            }

        }

        false

    }

}

impl fmt::Debug for CollisionVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.boxes.iter().map(|bb| format!("{bb}"))).finish()
    }
}


/// Push into the output the parts of `bb` that are outside of `cut`, the two boxes must
/// intersect. At most 6 disjoint boxes are produced: two slabs on the X axis, then two on
/// the Y axis within the remaining X range, then two on the Z axis.
fn split_outside(mut bb: BoundingBox, cut: BoundingBox, out: &mut Vec<BoundingBox>) {
    for axis in 0..3 {

        if bb.min[axis] < cut.min[axis] {
            let mut part = bb;
            part.max[axis] = cut.min[axis];
            out.push(part);
            bb.min[axis] = cut.min[axis];
        }

        if bb.max[axis] > cut.max[axis] {
            let mut part = bb;
            part.min[axis] = cut.max[axis];
            out.push(part);
            bb.max[axis] = cut.max[axis];
        }

    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn cube(min: f64, max: f64) -> BoundingBox {
        BoundingBox::new(min, min, min, max, max, max)
    }

    #[test]
    fn subtract_and_contains() {

        let mut volume = CollisionVolume::from_box(cube(0.0, 10.0));
        assert!(volume.contains(cube(0.0, 10.0)));
        assert!(volume.contains(cube(2.0, 3.0)));
        assert!(!volume.contains(cube(9.0, 11.0)));

        volume.subtract(cube(4.0, 6.0));
        assert!(!volume.contains(cube(3.0, 5.0)));
        assert!(!volume.contains(cube(4.25, 5.75)));
        assert!(volume.contains(cube(0.0, 4.0)));
        assert!(volume.contains(BoundingBox::new(0.0, 0.0, 0.0, 10.0, 10.0, 4.0)));
        assert!(volume.intersects(cube(3.0, 5.0)));
        assert!(!volume.intersects(cube(4.25, 5.75)));

        // A box spanning many of the split parts is still contained.
        assert!(volume.contains(BoundingBox::new(0.0, 0.0, 0.0, 10.0, 4.0, 10.0)));

        // The boxes must remain disjoint.
        let boxes = volume.boxes();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.intersects(*b), "{a} intersects {b}");
            }
        }

    }

    #[test]
    fn touching_faces() {

        let mut volume = CollisionVolume::from_box(cube(0.0, 4.0));
        volume.subtract(BoundingBox::new(0.0, 0.0, 0.0, 1.0, 4.0, 4.0));

        // A deflated box next to the removed slab fits, a deflated box over it doesn't.
        assert!(volume.contains(BoundingBox::new(1.0, 0.0, 0.0, 2.0, 1.0, 1.0).deflate(0.25)));
        assert!(!volume.contains(BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).deflate(0.25)));
        assert!(!volume.intersects(BoundingBox::new(-1.0, 0.0, 0.0, 1.0, 4.0, 4.0)));

    }

    #[test]
    fn union() {

        let mut volume = CollisionVolume::new();
        assert!(volume.is_empty());
        assert!(!volume.contains(cube(0.0, 1.0)));

        volume.union(cube(0.0, 2.0));
        volume.union(cube(1.0, 3.0));
        assert_eq!(volume.boxes().len(), 4);
        assert!(volume.contains(cube(0.0, 2.0)));
        assert!(volume.contains(cube(1.0, 3.0)));
        assert!(!volume.contains(cube(0.0, 3.0)));

        volume.subtract(cube(-1.0, 4.0));
        assert!(volume.is_empty());

    }

}
