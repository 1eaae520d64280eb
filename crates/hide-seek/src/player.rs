//! Players and per-side state

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::role::Role;
use crate::space::PositionSpace;
use crate::strategy::{Strategy, StrategySampler};

/// Cumulative score and win count for one side
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub score: f64,
    pub wins: u32,
}

impl PlayerState {
    pub fn add_score(&mut self, points: f64) {
        self.score += points;
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Where a side's moves come from
#[derive(Clone, Debug, PartialEq)]
pub enum Controller {
    /// Position picked by a person through the presentation layer.
    /// Consumed by the round that plays it.
    Human { choice: Option<usize> },
    /// Position drawn from an equilibrium strategy each round.
    Computer { strategy: Strategy },
}

/// One side of the game
#[derive(Clone, Debug)]
pub struct Player {
    role: Role,
    controller: Controller,
    state: PlayerState,
}

impl Player {
    pub fn human(role: Role) -> Self {
        Self {
            role,
            controller: Controller::Human { choice: None },
            state: PlayerState::default(),
        }
    }

    pub fn computer(role: Role, strategy: Strategy) -> Self {
        Self {
            role,
            controller: Controller::Computer { strategy },
            state: PlayerState::default(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human { .. })
    }

    /// The computer's strategy, if this side is computer-controlled.
    pub fn strategy(&self) -> Option<&Strategy> {
        match &self.controller {
            Controller::Computer { strategy } => Some(strategy),
            Controller::Human { .. } => None,
        }
    }

    /// Whether a move can be made this round without further input
    pub fn is_ready(&self) -> bool {
        match &self.controller {
            Controller::Human { choice } => choice.is_some(),
            Controller::Computer { .. } => true,
        }
    }

    /// Record a human selection
    ///
    /// Fails if the position is outside `space`, or if this side is not
    /// human-controlled.
    pub fn choose<S: PositionSpace>(&mut self, space: &S, pos: S::Position) -> Result<(), GameError> {
        let idx = space.to_index(pos)?;
        match &mut self.controller {
            Controller::Human { choice } => {
                *choice = Some(idx);
                Ok(())
            }
            Controller::Computer { .. } => Err(GameError::Config(format!(
                "the {} is computer-controlled",
                self.role
            ))),
        }
    }

    /// Linear index of this round's move
    pub fn make_move<S, R>(&mut self, space: &S, sampler: &mut StrategySampler<R>) -> Result<usize, GameError>
    where
        S: PositionSpace,
        R: Rng,
    {
        match &mut self.controller {
            Controller::Human { choice } => {
                let idx = choice.take().ok_or(GameError::NoMoveSelected(self.role))?;
                space.check_index(idx)
            }
            Controller::Computer { strategy } => {
                let pos = sampler.sample(strategy.probabilities(), space)?;
                space.to_index(pos)
            }
        }
    }

    /// Replace the computer's strategy, e.g. after the matrix changed
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.controller = Controller::Computer { strategy };
    }
}
