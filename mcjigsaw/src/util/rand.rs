//! Pseudo-random number generator with the same sequence as `java.util.Random`.

use std::num::Wrapping;

use glam::IVec3;


const MULTIPLIER: Wrapping<i64> = Wrapping(0x5DEECE66D);
const ADDEND: Wrapping<i64> = Wrapping(0xB);
const MASK: Wrapping<i64> = Wrapping((1 << 48) - 1);


#[inline]
fn initial_scramble(seed: i64) -> Wrapping<i64> {
    (Wrapping(seed) ^ MULTIPLIER) & MASK
}

/// Hash a block position into a seed, used to derive positional random sources.
pub fn pos_seed(pos: IVec3) -> i64 {
    let mut l = (pos.x.wrapping_mul(3129871) as i64) ^ (pos.z as i64).wrapping_mul(116129781) ^ pos.y as i64;
    l = l.wrapping_mul(l).wrapping_mul(42317861).wrapping_add(l.wrapping_mul(11));
    l >> 16
}


/// A linear congruential generator, every random draw of structure planning goes
/// through one of these, which makes a plan fully reproducible from its seed.
#[derive(Debug, Clone)]
pub struct JavaRandom {
    seed: Wrapping<i64>
}

impl JavaRandom {

    #[inline]
    pub fn new(seed: i64) -> JavaRandom {
        JavaRandom { seed: initial_scramble(seed) }
    }

    /// Create a random source for the given position, derived from a world seed.
    #[inline]
    pub fn new_positional(seed: i64, pos: IVec3) -> JavaRandom {
        Self::new(pos_seed(pos) ^ seed)
    }

    #[inline]
    pub fn get_seed(&self) -> i64 {
        self.seed.0
    }

    pub fn next_blank(&mut self) {
        self.seed = (self.seed * MULTIPLIER + ADDEND) & MASK;
    }

    #[inline]
    fn next(&mut self, bits: u8) -> i32 {
        self.next_blank();
        (self.seed.0 as u64 >> (48 - bits)) as i32
    }

    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Get the next integer in `0..bound`, the bound must be strictly positive.
    pub fn next_int_bounded(&mut self, bound: i32) -> i32 {

        debug_assert!(bound > 0, "bound must be positive");

        if (bound & -bound) == bound {
            (((bound as i64).wrapping_mul(self.next(31) as i64)) >> 31) as i32
        } else {

            let mut bits;
            let mut val;

            loop {
                bits = self.next(31);
                val = bits.rem_euclid(bound);
                if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                    break;
                }
            }

            val

        }

    }

    pub fn next_long(&mut self) -> i64 {
        ((self.next(32) as i64) << 32).wrapping_add(self.next(32) as i64)
    }

    /// Randomly pick an item in the given slice.
    /// **This is not part of the standard Java class.**
    #[inline]
    pub fn next_choice<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_int_bounded(items.len() as i32) as usize]
    }

    /// Randomly pick an item in a weighted list, a single draw is made in the total
    /// weight. Nothing is drawn and none is returned if the total weight is zero or does
    /// not fit in a positive `i32`.
    /// **This is not part of the standard Java class.**
    pub fn next_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {

        let total = items.iter()
            .try_fold(0i32, |total, &(_, weight)| i32::try_from(weight).ok().and_then(|weight| total.checked_add(weight)))
            .filter(|&total| total > 0)?;

        let mut index = self.next_int_bounded(total);

        for (item, weight) in items {
            index -= *weight as i32;
            if index < 0 {
                return Some(item);
            }
        }

        None

    }

    /// Shuffle the given slice in place, with the same swap sequence as Java's
    /// collection shuffling: from the last index down to the second one, each item is
    /// swapped with a random index lower or equal.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (2..=items.len()).rev() {
            let j = self.next_int_bounded(i as i32) as usize;
            items.swap(i - 1, j);
        }
    }

}
