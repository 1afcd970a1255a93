use crate::Pos2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat of a player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Position of this seat in the player list
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn color(self) -> Color {
        match self {
            PlayerId::One => Color::Blue,
            PlayerId::Two => Color::Orange,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Orange,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Blue => "Blue",
            Color::Orange => "Orange",
        })
    }
}

/// Remaining lives, shown as tally marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives(u8);

impl Lives {
    #[inline]
    pub fn new(count: u8) -> Self {
        Self(count)
    }
    #[inline]
    pub fn remaining(self) -> u8 {
        self.0
    }
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    #[inline]
    fn lose_one(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Lives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("I")?;
        }
        Ok(())
    }
}

/// What a player chose to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Decision {
    /// Stand still
    #[default]
    Stay,
    Up,
    Down,
    Left,
    Right,
}

impl Decision {
    /// All decisions, in the order decision weights are laid out
    pub const ALL: [Decision; 5] = [
        Decision::Stay,
        Decision::Up,
        Decision::Down,
        Decision::Left,
        Decision::Right,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Decision::Stay => 0,
            Decision::Up => 1,
            Decision::Down => 2,
            Decision::Left => 3,
            Decision::Right => 4,
        }
    }

    /// One lattice step in screen orientation
    pub fn delta(self) -> Pos2 {
        match self {
            Decision::Stay => Pos2::new(0, 0),
            Decision::Up => Pos2::new(0, -1),
            Decision::Down => Pos2::new(0, 1),
            Decision::Left => Pos2::new(-1, 0),
            Decision::Right => Pos2::new(1, 0),
        }
    }
}

/// A player as it stands for one tick
///
/// The record is a plain value; every change goes through a transition that
/// returns the next record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Pos2,
    pub alive: bool,
    pub lives: Lives,
    pub score: i32,
    pub decision: Decision,
}

impl Player {
    pub fn new(id: PlayerId, pos: Pos2, lives: u8) -> Self {
        Self {
            id,
            pos,
            alive: true,
            lives: Lives::new(lives),
            score: 0,
            decision: Decision::Stay,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.id.color()
    }

    /// The cell under the player died
    ///
    /// One life is lost. With lives left the player pays a point, without
    /// any the player is out for the rest of the game.
    #[must_use]
    pub fn hit(self) -> Self {
        if !self.alive {
            return self;
        }
        let lives = self.lives.lose_one();
        if lives.is_empty() {
            Self {
                lives,
                alive: false,
                ..self
            }
        } else {
            Self {
                lives,
                score: self.score - 1,
                ..self
            }
        }
    }

    #[must_use]
    pub fn scored(self) -> Self {
        Self {
            score: self.score + 1,
            ..self
        }
    }

    /// Takes one step, staying inside the `lo..=hi` box
    #[must_use]
    pub fn moved(self, decision: Decision, lo: Pos2, hi: Pos2) -> Self {
        Self {
            pos: (self.pos + decision.delta()).clamp(lo, hi),
            decision,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId::One, Pos2::new(5, 5), 3)
    }

    #[test]
    fn lives_render_as_tally() {
        assert_eq!(Lives::new(3).to_string(), "III");
        assert_eq!(Lives::new(0).to_string(), "");
    }

    #[test]
    fn hit_costs_a_life_and_a_point() {
        let hurt = player().hit();

        assert_eq!(hurt.lives.to_string(), "II");
        assert_eq!(hurt.score, -1);
        assert!(hurt.alive);
    }

    #[test]
    fn third_hit_is_fatal() {
        let p = player().hit().hit();
        assert!(p.alive);

        let p = p.hit();
        assert!(!p.alive);
        assert!(p.lives.is_empty());
        assert_eq!(p.score, -2);

        // already out, nothing more to lose
        assert_eq!(p.hit(), p);
    }

    #[test]
    fn movement_is_clamped() {
        let lo = Pos2::new(1, 1);
        let hi = Pos2::new(8, 8);
        let mut p = Player::new(PlayerId::Two, Pos2::new(2, 7), 3);

        for _ in 0..5 {
            p = p.moved(Decision::Left, lo, hi).moved(Decision::Down, lo, hi);
        }

        assert_eq!(p.pos, Pos2::new(1, 8));
        assert_eq!(p.decision, Decision::Down);
    }

    #[test]
    fn stay_keeps_position() {
        let p = player().moved(Decision::Stay, Pos2::new(1, 1), Pos2::new(8, 8));

        assert_eq!(p.pos, Pos2::new(5, 5));
    }

    #[test]
    fn ids_map_to_colors() {
        assert_eq!(PlayerId::One.color(), Color::Blue);
        assert_eq!(PlayerId::Two.color(), Color::Orange);
        assert_eq!(PlayerId::Two.to_string(), "2");
    }
}
