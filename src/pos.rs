use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    ops::{Add, Sub},
};

/// A coordinate on the lattice, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
    #[inline]
    pub fn one() -> Self {
        Self { x: 1, y: 1 }
    }

    /// Clamps both axes into the inclusive box `lo..=hi`
    #[inline]
    pub fn clamp(self, lo: Pos2, hi: Pos2) -> Self {
        Self {
            x: self.x.clamp(lo.x, hi.x),
            y: self.y.clamp(lo.y, hi.y),
        }
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major, same order the grid stores cells in
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Sub for Pos2 {
    type Output = Pos2;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Pos2::new(3, 1), Pos2::new(0, 2), Pos2::new(1, 1)];
        cells.sort();

        assert_eq!(cells, vec![Pos2::new(1, 1), Pos2::new(3, 1), Pos2::new(0, 2)]);
    }

    #[test]
    fn clamp_keeps_inside_box() {
        let lo = Pos2::new(1, 1);
        let hi = Pos2::new(8, 8);

        assert_eq!(Pos2::new(-4, 5).clamp(lo, hi), Pos2::new(1, 5));
        assert_eq!(Pos2::new(9, 12).clamp(lo, hi), Pos2::new(8, 8));
        assert_eq!(Pos2::new(3, 4).clamp(lo, hi), Pos2::new(3, 4));
    }
}
