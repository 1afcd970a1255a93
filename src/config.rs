use crate::{Pos2, engine::inject, error::ConfigError};

/// Smallest field that still has room for the corner gliders
pub const MIN_FIELD_SIZE: i32 = 8;

/// Largest field whose cell coordinates still fit a terminal position
pub const MAX_FIELD_SIZE: i32 = 1024;

/// Something that happens every `every` ticks, on the tick where
/// `tick % every == phase`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub every: u64,
    pub phase: u64,
}

impl Cadence {
    pub const fn new(every: u64, phase: u64) -> Self {
        Self { every, phase }
    }

    /// Whether this cadence fires on `tick`
    #[inline]
    pub fn fires(&self, tick: u64) -> bool {
        self.every != 0 && tick % self.every == self.phase
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.every == 0 {
            return Err(ConfigError::ZeroCadence { name });
        }
        if self.phase >= self.every {
            return Err(ConfigError::PhaseOutOfRange {
                name,
                every: self.every,
                phase: self.phase,
            });
        }
        Ok(())
    }
}

/// Field geometry, timing and player setup for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Cells per side of the square lattice, border ring included
    pub field_size: i32,
    /// Side of the square garden that gets re-randomized
    pub garden_size: i32,
    /// Candidate per-axis shifts of the garden from the field center
    pub garden_offsets: Vec<i32>,
    /// Distance of the corner glider anchors from the edge
    pub glider_inset: i32,
    pub glider_cadence: Cadence,
    pub garden_cadence: Cadence,
    /// Survival bonus for players standing on their tracked cell
    pub bonus_cadence: Cadence,
    /// Number of players, 1 or 2
    pub players: usize,
    pub lives: u8,
    /// Start position of player 1 and player 2
    pub start_positions: [Pos2; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: 40,
            garden_size: 10,
            garden_offsets: vec![-11, 0, 11],
            glider_inset: 4,
            glider_cadence: Cadence::new(50, 10),
            garden_cadence: Cadence::new(10, 5),
            bonus_cadence: Cadence::new(10, 0),
            players: 2,
            lives: 3,
            start_positions: [Pos2::new(10, 10), Pos2::new(30, 30)],
        }
    }
}

impl GameConfig {
    /// The default field with the given number of players
    pub fn new(players: usize) -> Self {
        Self {
            players,
            ..Default::default()
        }
    }

    /// Center of the field, where the garden is anchored
    #[inline]
    pub fn center(&self) -> Pos2 {
        Pos2::new(self.field_size / 2, self.field_size / 2)
    }

    /// Checks every value up front, so nothing can go wrong at tick time
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.glider_cadence.validate("glider")?;
        self.garden_cadence.validate("garden")?;
        self.bonus_cadence.validate("bonus")?;

        if self.field_size < MIN_FIELD_SIZE {
            return Err(ConfigError::FieldTooSmall(self.field_size));
        }
        if self.field_size > MAX_FIELD_SIZE {
            return Err(ConfigError::FieldTooLarge(self.field_size));
        }
        if !(1..=2).contains(&self.players) {
            return Err(ConfigError::PlayerCount(self.players));
        }
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }

        let interior = 1..=self.field_size - 2;
        let in_interior = |p: Pos2| interior.contains(&p.x) && interior.contains(&p.y);

        // an empty list still means the initial, unshifted garden
        let offsets = self.garden_offsets.iter().copied().chain([0]);
        for offset in offsets {
            let center = self.center() + Pos2::new(offset, offset);
            let top_left = center - Pos2::new(self.garden_size / 2, self.garden_size / 2);
            let corners = [
                top_left,
                top_left + Pos2::new(self.garden_size - 1, self.garden_size - 1),
            ];
            if self.garden_size <= 0 || !corners.into_iter().all(in_interior) {
                return Err(ConfigError::GardenOutOfBounds {
                    size: self.garden_size,
                    offset,
                });
            }
        }

        let gliders = inject::corner_gliders(self.field_size, self.glider_inset);
        if !gliders
            .iter()
            .flat_map(|&(anchor, heading)| heading.cells(anchor))
            .all(in_interior)
        {
            return Err(ConfigError::GliderOutOfBounds(self.glider_inset));
        }

        for &start in &self.start_positions[..self.players] {
            if !in_interior(start) {
                return Err(ConfigError::StartOutOfBounds {
                    x: start.x,
                    y: start.y,
                });
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default().validate().expect("default is valid");

        assert_eq!(config.field_size, 40);
        assert_eq!(config.players, 2);
        assert_eq!(config.center(), Pos2::new(20, 20));
    }

    #[test]
    fn cadence_fires_on_phase() {
        let cadence = Cadence::new(10, 5);
        let fired: Vec<_> = (0..30).filter(|&t| cadence.fires(t)).collect();

        assert_eq!(fired, vec![5, 15, 25]);
    }

    #[test]
    fn zero_cadence_fails_fast() {
        let config = GameConfig {
            garden_cadence: Cadence::new(0, 0),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCadence { name: "garden" })
        );
    }

    #[test]
    fn phase_must_be_below_period() {
        let config = GameConfig {
            glider_cadence: Cadence::new(5, 5),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::PhaseOutOfRange { name: "glider", .. })
        ));
    }

    #[test]
    fn garden_must_fit_interior() {
        let config = GameConfig {
            garden_offsets: vec![-15, 0, 15],
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::GardenOutOfBounds {
                size: 10,
                offset: -15
            })
        );
    }

    #[test]
    fn rejects_bad_player_setup() {
        assert_eq!(
            GameConfig::new(3).validate(),
            Err(ConfigError::PlayerCount(3))
        );

        let config = GameConfig {
            start_positions: [Pos2::new(0, 10), Pos2::new(30, 30)],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 0, y: 10 })
        );

        let config = GameConfig {
            lives: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoLives));
    }

    #[test]
    fn single_player_ignores_second_start() {
        let config = GameConfig {
            start_positions: [Pos2::new(10, 10), Pos2::new(-5, -5)],
            ..GameConfig::new(1)
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn tiny_field_is_rejected() {
        let config = GameConfig {
            field_size: 6,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::FieldTooSmall(6)));
    }

    #[test]
    fn huge_field_is_rejected() {
        let config = GameConfig {
            field_size: 40_000,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::FieldTooLarge(40_000)));
    }
}
