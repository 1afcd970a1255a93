use crate::grid::{WINDOW_BITS, WINDOW_CENTER};
use std::sync::OnceLock;

/// The number of arrangements of a 3x3 window
const PERMUTATIONS: usize = 1 << WINDOW_BITS;
type RuleTable = [bool; PERMUTATIONS];

/// Returns a Singleton lookup table for the birth/survival rule
///
/// Equivalent to calling [`generate_rule_table`] once and storing the result
pub(super) fn rule_table() -> &'static RuleTable {
    static CELL: OnceLock<RuleTable> = OnceLock::new();
    CELL.get_or_init(generate_rule_table)
}

/// Whether the center of `window` is alive next generation
#[inline]
pub(super) fn next_state(window: u16) -> bool {
    rule_table()[window as usize]
}

/// Creates a lookup table for the B3/S23 ruleset
///
/// The table is indexed by a window packed by [`Grid::window`], the center
/// cell being [`WINDOW_CENTER`].
///
/// [`Grid::window`]: crate::Grid::window
pub(super) fn generate_rule_table() -> RuleTable {
    let center = WINDOW_CENTER as usize;

    let mut table = [false; PERMUTATIONS];
    for (window, next) in table.iter_mut().enumerate() {
        let neighbors = (window & !center).count_ones();
        let alive = window & center != 0;
        // survive on 2 or 3, born on exactly 3
        *next = matches!((alive, neighbors), (true, 2) | (_, 3));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(alive: bool, neighbors: usize) -> u16 {
        const NEIGHBOR_BITS: [u16; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let mut value = if alive { WINDOW_CENTER } else { 0 };
        for bit in NEIGHBOR_BITS.iter().take(neighbors) {
            value |= bit;
        }
        value
    }

    #[test]
    fn live_cells_survive_only_on_two_or_three() {
        for n in 0..=8 {
            assert_eq!(next_state(window(true, n)), n == 2 || n == 3, "{n} neighbors");
        }
    }

    #[test]
    fn dead_cells_are_born_only_on_three() {
        for n in 0..=8 {
            assert_eq!(next_state(window(false, n)), n == 3, "{n} neighbors");
        }
    }
}
