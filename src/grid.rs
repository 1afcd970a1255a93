use crate::Pos2;

/// Number of bits in a 3x3 neighborhood window
pub const WINDOW_BITS: u32 = 9;

/// Bit of the center cell within a window
pub const WINDOW_CENTER: u16 = 0b000_010_000;

/// A fixed-size boolean lattice stored row-major
///
/// Every coordinate in `0..width` x `0..height` has exactly one entry for the
/// lifetime of the grid. Lookups outside the lattice are a bug and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");
        Self {
            width,
            height,
            cells: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Creates a square grid with the given cells set alive
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(size: i32, alive: I) -> Self {
        let mut grid = Self::new(size, size);
        for pos in alive {
            grid.set(pos, true);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Whether `pos` sits on the outer ring of the lattice
    #[inline]
    pub fn is_border(&self, pos: Pos2) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// Top-left corner of the interior, the region the automaton iterates
    #[inline]
    pub fn interior_min(&self) -> Pos2 {
        Pos2::one()
    }
    /// Bottom-right corner (inclusive) of the interior
    #[inline]
    pub fn interior_max(&self) -> Pos2 {
        Pos2::new(self.width - 2, self.height - 2)
    }

    #[inline]
    pub fn in_interior(&self, pos: Pos2) -> bool {
        let (lo, hi) = (self.interior_min(), self.interior_max());
        (lo.x..=hi.x).contains(&pos.x) && (lo.y..=hi.y).contains(&pos.y)
    }

    #[inline]
    fn index(&self, pos: Pos2) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} is outside the lattice");
        (pos.y as usize) * (self.width as usize) + pos.x as usize
    }

    #[inline]
    pub fn get(&self, pos: Pos2) -> bool {
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos2, alive: bool) {
        let i = self.index(pos);
        self.cells[i] = alive;
    }

    /// Resets every cell to dead
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos2> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos2 { x, y }))
    }

    /// Positions of live cells in row-major order
    pub fn alive(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.positions().filter(|&p| self.get(p))
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Packs the 3x3 neighborhood around `center` into 9 bits
    ///
    /// Bit `(dy + 1) * 3 + (dx + 1)` holds the cell at `center + (dx, dy)`,
    /// so the center itself is [`WINDOW_CENTER`]. Cells beyond the lattice
    /// read as dead; the automaton never asks for them since it only
    /// iterates the interior.
    pub fn window(&self, center: Pos2) -> u16 {
        let mut bits = 0u16;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let pos = center + Pos2 { x: dx, y: dy };
                if self.contains(pos) && self.get(pos) {
                    bits |= 1u16 << ((dy + 1) * 3 + (dx + 1));
                }
            }
        }
        bits
    }

    /// Number of live cells among the 8 neighbors of `pos`
    pub fn live_neighbors(&self, pos: Pos2) -> u32 {
        (self.window(pos) & !WINDOW_CENTER).count_ones()
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}
