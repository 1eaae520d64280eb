//! Round resolution
//!
//! Resolves one round between a hider and a seeker, and credits scores
//! with the sign convention of the world's perspective role so the
//! running scores stay consistent with the equilibrium computed from the
//! same payoff matrix.

use std::sync::Arc;

use serde::Serialize;

use crate::error::GameError;
use crate::player::{Player, PlayerState};
use crate::random::SeededRng;
use crate::role::Role;
use crate::space::PositionSpace;
use crate::strategy::StrategySampler;
use crate::world::World;

/// Outcome of a single round
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundRecord<P> {
    pub round: u32,
    pub hider: P,
    pub seeker: P,
    /// Payoff to the world's perspective role.
    pub payoff: f64,
    pub found: bool,
}

impl<P> RoundRecord<P> {
    pub fn winner(&self) -> Role {
        if self.found {
            Role::Seeker
        } else {
            Role::Hider
        }
    }
}

/// Snapshot of both sides after the latest round
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GameStats {
    pub round: u32,
    pub hider_score: f64,
    pub seeker_score: f64,
    pub hider_wins: u32,
    pub seeker_wins: u32,
}

/// Plays rounds between two players over a shared world
#[derive(Clone, Debug)]
pub struct RoundResolver<S: PositionSpace> {
    world: Arc<World<S>>,
    hider: Player,
    seeker: Player,
    sampler: StrategySampler<SeededRng>,
    round: u32,
    last: Option<(usize, usize)>,
}

impl<S: PositionSpace> RoundResolver<S> {
    pub fn new(world: Arc<World<S>>, hider: Player, seeker: Player, rng: SeededRng) -> Result<Self, GameError> {
        if hider.role() != Role::Hider || seeker.role() != Role::Seeker {
            return Err(GameError::Config(format!(
                "players seated as {} and {}",
                hider.role(),
                seeker.role()
            )));
        }
        Ok(Self {
            world,
            hider,
            seeker,
            sampler: StrategySampler::new(rng),
            round: 0,
            last: None,
        })
    }

    pub fn world(&self) -> &World<S> {
        &self.world
    }

    pub fn player(&self, role: Role) -> &Player {
        match role {
            Role::Hider => &self.hider,
            Role::Seeker => &self.seeker,
        }
    }

    pub fn player_mut(&mut self, role: Role) -> &mut Player {
        match role {
            Role::Hider => &mut self.hider,
            Role::Seeker => &mut self.seeker,
        }
    }

    /// Record a human-controlled side's move for the next round
    pub fn choose(&mut self, role: Role, pos: S::Position) -> Result<(), GameError> {
        let world = Arc::clone(&self.world);
        self.player_mut(role).choose(world.space(), pos)
    }

    /// Play one round
    ///
    /// Both moves are taken before any state changes, so a failed move
    /// leaves scores and the round counter untouched.
    pub fn play_round(&mut self) -> Result<RoundRecord<S::Position>, GameError> {
        for side in [&self.hider, &self.seeker] {
            if !side.is_ready() {
                return Err(GameError::NoMoveSelected(side.role()));
            }
        }
        let space = self.world.space();
        let h = self.hider.make_move(space, &mut self.sampler)?;
        let s = self.seeker.make_move(space, &mut self.sampler)?;
        self.resolve(h, s)
    }

    /// Resolve a round from explicit linear indices
    pub fn resolve(&mut self, h: usize, s: usize) -> Result<RoundRecord<S::Position>, GameError> {
        let payoff = self.world.score_index(h, s)?;
        let found = h == s;
        let winner = if found { Role::Seeker } else { Role::Hider };

        // the perspective role earns the payoff, its opponent the negation
        let credit = if winner == self.world.perspective() {
            payoff
        } else {
            -payoff
        };
        let side = self.player_mut(winner).state_mut();
        side.add_score(credit);
        side.add_win();

        self.round += 1;
        self.last = Some((h, s));

        let space = self.world.space();
        let record = RoundRecord {
            round: self.round,
            hider: space.from_index(h)?,
            seeker: space.from_index(s)?,
            payoff,
            found,
        };
        log::trace!(
            "round {}: hider {:?} seeker {:?} payoff {} found {}",
            record.round,
            record.hider,
            record.seeker,
            payoff,
            found
        );
        Ok(record)
    }

    /// Positions played in the latest round, if any
    pub fn last_positions(&self) -> Option<(S::Position, S::Position)> {
        let (h, s) = self.last?;
        let space = self.world.space();
        Some((space.from_index(h).ok()?, space.from_index(s).ok()?))
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn hider_state(&self) -> &PlayerState {
        self.hider.state()
    }

    pub fn seeker_state(&self) -> &PlayerState {
        self.seeker.state()
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            round: self.round,
            hider_score: self.hider.state().score,
            seeker_score: self.seeker.state().score,
            hider_wins: self.hider.state().wins,
            seeker_wins: self.seeker.state().wins,
        }
    }

    pub fn reset(&mut self) {
        self.round = 0;
        self.last = None;
        self.hider.state_mut().reset();
        self.seeker.state_mut().reset();
    }
}
