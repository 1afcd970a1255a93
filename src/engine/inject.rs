//! Periodic entropy sources: corner gliders and the random garden patch.

use crate::{Grid, Pos2};
use rand::Rng;

/// The down-right glider relative to its anchor cell
///
/// ```text
/// . o .
/// . . o
/// o o o
/// ```
const GLIDER: [Pos2; 5] = [
    Pos2::new(0, -1),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

/// The diagonal a glider travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl Heading {
    pub const ALL: [Heading; 4] = [
        Heading::DownRight,
        Heading::DownLeft,
        Heading::UpRight,
        Heading::UpLeft,
    ];

    /// One lattice step along the heading
    pub fn direction(self) -> Pos2 {
        match self {
            Heading::DownRight => Pos2::new(1, 1),
            Heading::DownLeft => Pos2::new(-1, 1),
            Heading::UpRight => Pos2::new(1, -1),
            Heading::UpLeft => Pos2::new(-1, -1),
        }
    }

    /// The glider cells for this heading around `anchor`
    pub fn cells(self, anchor: Pos2) -> impl Iterator<Item = Pos2> {
        let dir = self.direction();
        GLIDER.into_iter().map(move |p| {
            anchor
                + Pos2 {
                    x: p.x * dir.x,
                    y: p.y * dir.y,
                }
        })
    }
}

pub fn stamp_glider(grid: &mut Grid, anchor: Pos2, heading: Heading) {
    for pos in heading.cells(anchor) {
        grid.set(pos, true);
    }
}

/// The four corner anchors `inset` cells in from the edge, each with the
/// heading that points it at the center of the field
pub fn corner_gliders(size: i32, inset: i32) -> [(Pos2, Heading); 4] {
    let far = size - inset;
    [
        (Pos2::new(inset, inset), Heading::DownRight),
        (Pos2::new(far, inset), Heading::DownLeft),
        (Pos2::new(inset, far), Heading::UpRight),
        (Pos2::new(far, far), Heading::UpLeft),
    ]
}

pub fn stamp_corner_gliders(grid: &mut Grid, inset: i32) {
    for (anchor, heading) in corner_gliders(grid.width(), inset) {
        stamp_glider(grid, anchor, heading);
    }
}

/// Cells of the square garden of side `size` centered on `center`
pub fn garden_cells(center: Pos2, size: i32) -> impl Iterator<Item = Pos2> {
    let half = size / 2;
    let (x0, y0) = (center.x - half, center.y - half);
    (y0..y0 + size).flat_map(move |y| (x0..x0 + size).map(move |x| Pos2 { x, y }))
}

/// Flips a fair coin for every cell of the garden
pub fn randomize_garden<R: Rng + ?Sized>(grid: &mut Grid, center: Pos2, size: i32, rng: &mut R) {
    for pos in garden_cells(center, size) {
        grid.set(pos, rng.random_bool(0.5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn glider_has_five_distinct_cells() {
        for heading in Heading::ALL {
            let mut cells: Vec<_> = heading.cells(Pos2::new(5, 5)).collect();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), 5);
        }
    }

    #[test]
    fn corner_gliders_point_at_center() {
        let size = 40;
        let center = Pos2::new(size / 2, size / 2);

        for (anchor, heading) in corner_gliders(size, 4) {
            let dir = heading.direction();
            let to_center = center - anchor;
            assert_eq!(to_center.x.signum(), dir.x, "{heading:?}");
            assert_eq!(to_center.y.signum(), dir.y, "{heading:?}");
        }
    }

    #[test]
    fn corner_stamp_adds_twenty_cells() {
        let mut grid = Grid::new(40, 40);
        stamp_corner_gliders(&mut grid, 4);

        assert_eq!(grid.alive_count(), 20);
        assert!(grid.alive().all(|p| grid.in_interior(p)));
    }

    #[test]
    fn garden_only_touches_its_square() {
        let mut grid = Grid::new(40, 40);
        let mut rng = StdRng::seed_from_u64(3);
        let center = Pos2::new(20, 20);
        randomize_garden(&mut grid, center, 10, &mut rng);

        let inside: Vec<_> = garden_cells(center, 10).collect();
        assert_eq!(inside.len(), 100);
        assert!(grid.alive().all(|p| inside.contains(&p)));
        assert!(grid.alive_count() > 0);
    }
}
