//! One game: the automaton, the players standing on it, and the rules that
//! tie them together.

use crate::{
    Decision, GameConfig, Grid, Player, PlayerId, Pos2,
    engine::{self, Generation, inject},
    error::{ConfigError, Result},
    policy::DecisionPolicy,
};
use log::{debug, info};
use rand::{
    distr::{Distribution, weighted::WeightedIndex},
    rngs::StdRng,
    seq::IndexedRandom,
};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerId),
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(Outcome),
}

/// Feedback raised during a tick, for the front-end to play back once
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    /// A player lost a life
    pub damage: bool,
    /// A player gained a point
    pub scored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub status: Status,
    pub signals: Signals,
    /// Live cells after the tick
    pub alive: usize,
    /// Cells that died in this tick's step
    pub deaths: usize,
}

/// How a lattice cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Player(PlayerId),
    /// Just died, or part of the border
    Alert,
    Alive,
    Dead,
}

pub struct Game {
    config: GameConfig,
    cells: Grid,
    burst: Grid,
    border: Grid,
    occupied: Grid,
    players: Vec<Player>,
    policies: Vec<Box<dyn DecisionPolicy>>,
    tick: u64,
    rng: StdRng,
    parallel: bool,
}

impl Game {
    /// Sets up the field, seeds the garden and places the players
    ///
    /// `policies` holds one policy per player, in seat order.
    pub fn new(
        config: GameConfig,
        policies: Vec<Box<dyn DecisionPolicy>>,
        mut rng: StdRng,
    ) -> Result<Self> {
        let config = config.validate()?;
        if policies.len() != config.players {
            return Err(ConfigError::PolicyCount {
                players: config.players,
                policies: policies.len(),
            }
            .into());
        }

        let size = config.field_size;
        let mut cells = Grid::new(size, size);
        inject::randomize_garden(&mut cells, config.center(), config.garden_size, &mut rng);

        let mut border = Grid::new(size, size);
        for pos in border.positions() {
            border.set(pos, border.is_border(pos));
        }

        let players: Vec<_> = PlayerId::ALL
            .into_iter()
            .take(config.players)
            .map(|id| Player::new(id, config.start_positions[id.index()], config.lives))
            .collect();
        let mut occupied = Grid::new(size, size);
        for player in &players {
            occupied.set(player.pos, true);
        }

        info!(
            "new game: {} player(s) on a {size}x{size} field, {} alive",
            players.len(),
            cells.alive_count()
        );

        Ok(Self {
            burst: Grid::new(size, size),
            config,
            cells,
            border,
            occupied,
            players,
            policies,
            tick: 0,
            rng,
            parallel: false,
        })
    }

    /// Splits each automaton step across the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
    #[inline]
    pub fn cells(&self) -> &Grid {
        &self.cells
    }
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Whether the occupancy marker is set on `pos`
    #[inline]
    pub fn is_occupied(&self, pos: Pos2) -> bool {
        self.occupied.get(pos)
    }

    /// Centers `pattern` on the field, dropping cells that land outside the
    /// interior. Returns how many cells were set.
    pub fn stamp_pattern(&mut self, pattern: &[Pos2]) -> usize {
        let Some(min) = pattern
            .iter()
            .copied()
            .reduce(|a, b| Pos2::new(a.x.min(b.x), a.y.min(b.y)))
        else {
            return 0;
        };
        let max = pattern
            .iter()
            .copied()
            .fold(min, |a, b| Pos2::new(a.x.max(b.x), a.y.max(b.y)));
        let half = Pos2::new((max.x - min.x) / 2, (max.y - min.y) / 2);
        let shift = self.config.center() - half - min;

        let mut stamped = 0;
        for &cell in pattern {
            let pos = cell + shift;
            if self.cells.in_interior(pos) {
                self.cells.set(pos, true);
                stamped += 1;
            }
        }
        stamped
    }

    /// Advances the game by one tick
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut signals = Signals::default();

        if self.config.bonus_cadence.fires(self.tick) {
            self.survival_bonus(&mut signals);
        }

        let generation = if self.parallel {
            engine::next_generation_parallel(&self.cells)
        } else {
            engine::next_generation(&self.cells)
        };
        self.resolve_deaths(&generation, &mut signals);
        let deaths = generation.burst.alive_count();
        self.cells = generation.cells;
        self.burst = generation.burst;

        self.inject();

        for id in PlayerId::ALL.into_iter().take(self.players.len()) {
            let player = self.players[id.index()];
            let weights = self.policies[id.index()].weights(self.cells.window(player.pos));
            let decision = WeightedIndex::new(&weights)
                .map(|dist| Decision::ALL[dist.sample(&mut self.rng)])
                .unwrap_or_default();
            self.move_player(id, decision);
        }

        self.score_live_cells(&mut signals);

        let report = TickReport {
            tick: self.tick,
            status: self.status(),
            signals,
            alive: self.cells.alive_count(),
            deaths,
        };
        debug!(
            "tick {}: alive {}, died {}, {:?}",
            report.tick, report.alive, report.deaths, report.status
        );
        if let Status::Over(outcome) = report.status {
            info!("game over after {} ticks: {outcome:?}", self.tick);
        }
        report
    }

    fn survival_bonus(&mut self, signals: &mut Signals) {
        for player in self.players.iter_mut() {
            if player.alive && self.occupied.get(player.pos) {
                *player = player.scored();
                signals.scored = true;
            }
        }
    }

    /// Every occupied cell that died takes a life from the live players on it
    ///
    /// The marker is only cleared where someone was hit, so a dead player's
    /// cell stays occupied.
    fn resolve_deaths(&mut self, generation: &Generation, signals: &mut Signals) {
        for pos in generation.deaths() {
            if !self.occupied.get(pos) {
                continue;
            }
            let mut hit = false;
            for (player, policy) in self.players.iter_mut().zip(self.policies.iter_mut()) {
                if !player.alive || player.pos != pos {
                    continue;
                }
                policy.feedback(self.cells.window(pos), player.decision, -1);
                *player = player.hit();
                hit = true;
                info!(
                    "player {} | {} with score {}",
                    player.id, player.lives, player.score
                );
            }
            if hit {
                self.occupied.set(pos, false);
                signals.damage = true;
            }
        }
    }

    fn inject(&mut self) {
        if self.config.glider_cadence.fires(self.tick) {
            inject::stamp_corner_gliders(&mut self.cells, self.config.glider_inset);
            debug!("tick {}: gliders injected", self.tick);
        }
        if self.config.garden_cadence.fires(self.tick) {
            let dx = self.config.garden_offsets.choose(&mut self.rng).copied().unwrap_or(0);
            let dy = self.config.garden_offsets.choose(&mut self.rng).copied().unwrap_or(0);
            let center = self.config.center() + Pos2::new(dx, dy);
            inject::randomize_garden(&mut self.cells, center, self.config.garden_size, &mut self.rng);
            debug!("tick {}: garden reseeded around {center:?}", self.tick);
        }
    }

    fn score_live_cells(&mut self, signals: &mut Signals) {
        for (player, policy) in self.players.iter_mut().zip(self.policies.iter_mut()) {
            if player.alive && self.occupied.get(player.pos) && self.cells.get(player.pos) {
                *player = player.scored();
                signals.scored = true;
                policy.feedback(self.cells.window(player.pos), player.decision, 1);
            }
        }
    }

    /// Moves a player one step, used both by policies and the keyboard
    ///
    /// The vacated cell keeps its occupancy marker while the other player
    /// still stands on it. Standing still leaves the markers alone.
    pub fn move_player(&mut self, id: PlayerId, decision: Decision) {
        let Some(&player) = self.players.get(id.index()) else {
            return;
        };
        let moved = player.moved(
            decision,
            self.cells.interior_min(),
            self.cells.interior_max(),
        );
        if decision != Decision::Stay {
            let shared = self.players.iter().any(|p| p.id != id && p.pos == player.pos);
            if !shared {
                self.occupied.set(player.pos, false);
            }
            self.occupied.set(moved.pos, true);
        }
        self.players[id.index()] = moved;
    }

    /// Whether the game has ended, and how
    ///
    /// With two players a dead player only ends the game while trailing;
    /// a dead player who leads or ties keeps the game going until the other
    /// player also dies or both cells are vacated.
    pub fn status(&self) -> Status {
        let over = match self.players.as_slice() {
            [solo] => !solo.alive,
            [one, two] => {
                (!one.alive && !two.alive)
                    || (!one.alive && two.score > one.score)
                    || (!two.alive && one.score > two.score)
                    || (!self.occupied.get(one.pos) && !self.occupied.get(two.pos))
            }
            _ => false,
        };
        if over {
            Status::Over(self.outcome())
        } else {
            Status::Running
        }
    }

    /// The standing if the game ended now
    pub fn outcome(&self) -> Outcome {
        match self.players.as_slice() {
            [one, two] => match one.score.cmp(&two.score) {
                Ordering::Greater => Outcome::Winner(one.id),
                Ordering::Less => Outcome::Winner(two.id),
                Ordering::Equal => Outcome::Tie,
            },
            _ => Outcome::Winner(PlayerId::One),
        }
    }

    /// The player that goes on the leaderboard, player 1 on a tie
    pub fn best_player(&self) -> &Player {
        match self.players.as_slice() {
            [one, two] if two.score > one.score => two,
            _ => &self.players[0],
        }
    }

    /// End-of-game message for the front-end
    pub fn announcement(&self, outcome: Outcome) -> String {
        let score = self.best_player().score;
        match (self.players.len(), outcome) {
            (1, _) => format!("Good Job!\nScore {score}"),
            (_, Outcome::Winner(id)) => format!("{} Wins!\nScore {score}", id.color()),
            (_, Outcome::Tie) => format!("Tie Game!\nScore {score}"),
        }
    }

    /// How to draw `pos` this tick
    pub fn paint(&self, pos: Pos2) -> Paint {
        let standing = self
            .players
            .iter()
            .find(|p| p.alive && p.pos == pos && self.occupied.get(pos));
        if let Some(player) = standing {
            Paint::Player(player.id)
        } else if self.burst.get(pos) || self.border.get(pos) {
            Paint::Alert
        } else if self.cells.get(pos) {
            Paint::Alive
        } else {
            Paint::Dead
        }
    }

    /// Every lattice cell with its paint, row-major
    pub fn frame(&self) -> impl Iterator<Item = (Pos2, Paint)> + '_ {
        self.cells.positions().map(|pos| (pos, self.paint(pos)))
    }
}
