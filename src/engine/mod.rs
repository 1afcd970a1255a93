mod index;
pub mod inject;

use crate::{Grid, Pos2};
use rayon::prelude::*;

/// The outcome of one automaton step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Next state of every cell
    pub cells: Grid,
    /// Cells that went from alive to dead during this step
    pub burst: Grid,
}

impl Generation {
    /// Positions that died this step, row-major
    pub fn deaths(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.burst.alive()
    }
}

/// Computes the next generation of `cells` on a single thread
///
/// Every interior cell reads the same prior snapshot. The border ring is
/// never iterated, so it is carried over unchanged and no lookup ever falls
/// outside the lattice.
pub fn next_generation(cells: &Grid) -> Generation {
    let width = cells.width() as usize;
    let mut next = cells.clone();
    let mut burst = Grid::new(cells.width(), cells.height());

    for (y, (row, burst_row)) in next
        .raw_mut()
        .chunks_mut(width)
        .zip(burst.raw_mut().chunks_mut(width))
        .enumerate()
    {
        step_row(cells, y as i32, row, burst_row);
    }

    Generation { cells: next, burst }
}

/// Same as [`next_generation`], with rows split across the rayon pool
///
/// Rows only read from the shared snapshot and write to their own slice, so
/// the result is identical to the serial step.
pub fn next_generation_parallel(cells: &Grid) -> Generation {
    let width = cells.width() as usize;
    let mut next = cells.clone();
    let mut burst = Grid::new(cells.width(), cells.height());

    next.raw_mut()
        .par_chunks_mut(width)
        .zip(burst.raw_mut().par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (row, burst_row))| step_row(cells, y as i32, row, burst_row));

    Generation { cells: next, burst }
}

fn step_row(cells: &Grid, y: i32, row: &mut [bool], burst_row: &mut [bool]) {
    let (lo, hi) = (cells.interior_min(), cells.interior_max());
    if y < lo.y || y > hi.y {
        return;
    }

    for x in lo.x..=hi.x {
        let pos = Pos2 { x, y };
        let was_alive = cells.get(pos);
        let alive = index::next_state(cells.window(pos));
        row[x as usize] = alive;
        burst_row[x as usize] = was_alive && !alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn alive(grid: &Grid) -> Vec<Pos2> {
        grid.alive().collect()
    }

    fn shifted(cells: &[Pos2], by: Pos2) -> Vec<Pos2> {
        let mut out: Vec<_> = cells.iter().map(|&p| p + by).collect();
        out.sort();
        out
    }

    #[test]
    fn block_is_still_life() {
        let block = [(5, 5), (6, 5), (5, 6), (6, 6)].map(|(x, y)| Pos2::new(x, y));
        let grid = Grid::from_alive(12, block);

        let next = next_generation(&grid);

        assert_eq!(next.cells, grid);
        assert_eq!(next.burst.alive_count(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let vertical = Grid::from_alive(12, [Pos2::new(6, 5), Pos2::new(6, 6), Pos2::new(6, 7)]);
        let horizontal =
            Grid::from_alive(12, [Pos2::new(5, 6), Pos2::new(6, 6), Pos2::new(7, 6)]);

        let once = next_generation(&vertical);
        assert_eq!(once.cells, horizontal);
        assert_eq!(alive(&once.burst), vec![Pos2::new(6, 5), Pos2::new(6, 7)]);

        let twice = next_generation(&once.cells);
        assert_eq!(twice.cells, vertical);
    }

    #[test]
    fn lonely_and_crowded_cells_die() {
        // a plus shape: the center has 4 neighbors, the tips have 1
        let plus = [(5, 4), (4, 5), (5, 5), (6, 5), (5, 6)].map(|(x, y)| Pos2::new(x, y));
        let grid = Grid::from_alive(12, plus);

        let next = next_generation(&grid);

        assert!(!next.cells.get(Pos2::new(5, 5)));
        assert!(next.burst.get(Pos2::new(5, 5)));
        // tips have 3 neighbors counting the center plus two diagonal tips
        assert!(next.cells.get(Pos2::new(5, 4)));
    }

    #[test]
    fn border_ring_is_never_updated() {
        // three in a row along the top edge would be a blinker anywhere else
        let edge = [Pos2::new(3, 0), Pos2::new(4, 0), Pos2::new(5, 0)];
        let grid = Grid::from_alive(10, edge);

        let next = next_generation(&grid);

        assert!(edge.iter().all(|&p| next.cells.get(p)));
        assert!(next.cells.get(Pos2::new(4, 1)), "interior still sees the border");
        assert_eq!(next.burst.alive_count(), 0);
    }

    #[test]
    fn every_cell_follows_the_rule() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(16, 16);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, rng.random_bool(0.4));
        }

        let next = next_generation(&grid);

        for pos in grid.positions().filter(|&p| grid.in_interior(p)) {
            let n = grid.live_neighbors(pos);
            let expected = if grid.get(pos) { n == 2 || n == 3 } else { n == 3 };
            assert_eq!(next.cells.get(pos), expected, "{pos:?} with {n} neighbors");
            assert_eq!(next.burst.get(pos), grid.get(pos) && !expected);
        }
    }

    #[test]
    fn glider_translates_after_four_steps() {
        let mut grid = Grid::new(20, 20);
        inject::stamp_glider(&mut grid, Pos2::new(5, 5), inject::Heading::DownRight);
        let start = alive(&grid);

        for _ in 0..4 {
            grid = next_generation(&grid).cells;
        }

        assert_eq!(alive(&grid), shifted(&start, Pos2::new(1, 1)));
    }

    #[test]
    fn every_heading_travels_its_diagonal() {
        for heading in inject::Heading::ALL {
            let mut grid = Grid::new(20, 20);
            inject::stamp_glider(&mut grid, Pos2::new(10, 10), heading);
            let start = alive(&grid);

            for _ in 0..4 {
                grid = next_generation(&grid).cells;
            }

            assert_eq!(alive(&grid), shifted(&start, heading.direction()), "{heading:?}");
        }
    }

    #[test]
    fn parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(64, 48);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, rng.random_bool(0.5));
        }

        for _ in 0..5 {
            let serial = next_generation(&grid);
            let parallel = next_generation_parallel(&grid);
            assert_eq!(serial, parallel);
            grid = serial.cells;
        }
    }
}
