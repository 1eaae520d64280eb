//! Human versus computer play

use std::sync::Arc;

use crate::error::GameError;
use crate::matrix::PayoffMatrix;
use crate::player::Player;
use crate::random::SeededRng;
use crate::role::Role;
use crate::round::{GameStats, RoundRecord, RoundResolver};
use crate::solver::{self, Equilibrium};
use crate::space::PositionSpace;
use crate::strategy::Strategy;
use crate::world::World;

/// A game where a person plays one role and the computer plays the other
/// with its equilibrium strategy
#[derive(Clone, Debug)]
pub struct Session<S: PositionSpace> {
    human_role: Role,
    matrix: PayoffMatrix,
    computer: Equilibrium,
    resolver: RoundResolver<S>,
}

impl<S: PositionSpace> Session<S> {
    pub fn new(world: Arc<World<S>>, human_role: Role, rng: SeededRng) -> Result<Self, GameError> {
        let matrix = world.generate_matrix();
        let computer_role = human_role.opponent();
        let computer = solver::equilibrium(&matrix, computer_role);
        log::debug!(
            "computer plays the {} with value {:.4}",
            computer_role,
            computer.value
        );

        let human = Player::human(human_role);
        let machine = Player::computer(computer_role, computer.strategy.clone());
        let (hider, seeker) = match human_role {
            Role::Hider => (human, machine),
            Role::Seeker => (machine, human),
        };
        let resolver = RoundResolver::new(world, hider, seeker, rng)?;
        Ok(Self {
            human_role,
            matrix,
            computer,
            resolver,
        })
    }

    pub fn human_role(&self) -> Role {
        self.human_role
    }

    pub fn computer_role(&self) -> Role {
        self.human_role.opponent()
    }

    pub fn payoff_matrix(&self) -> &PayoffMatrix {
        &self.matrix
    }

    pub fn computer_strategy(&self) -> &Strategy {
        &self.computer.strategy
    }

    /// Game value from the computer's viewpoint.
    pub fn computer_value(&self) -> f64 {
        self.computer.value
    }

    pub fn world(&self) -> &World<S> {
        self.resolver.world()
    }

    /// Select the human's position for the next round
    pub fn choose(&mut self, pos: S::Position) -> Result<(), GameError> {
        self.resolver.choose(self.human_role, pos)
    }

    pub fn play_round(&mut self) -> Result<RoundRecord<S::Position>, GameError> {
        self.resolver.play_round()
    }

    /// Scores and wins of both sides after the latest round.
    pub fn stats(&self) -> GameStats {
        self.resolver.stats()
    }

    pub fn last_positions(&self) -> Option<(S::Position, S::Position)> {
        self.resolver.last_positions()
    }

    pub fn reset(&mut self) {
        self.resolver.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{Cell, Grid, Line};
    use crate::world::PlaceType;

    fn world() -> Arc<World<Line>> {
        Arc::new(
            World::with_places(Line::new(4).unwrap(), vec![PlaceType::Neutral; 4], Role::Hider, false).unwrap(),
        )
    }

    #[test]
    fn test_computer_gets_opposite_role() {
        let session = Session::new(world(), Role::Seeker, SeededRng::from_u64(1)).unwrap();
        assert_eq!(session.computer_role(), Role::Hider);
        assert_eq!(session.computer_strategy().len(), 4);
        assert!((session.computer_value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_round_requires_choice() {
        let mut session = Session::new(world(), Role::Hider, SeededRng::from_u64(1)).unwrap();
        assert_eq!(session.play_round(), Err(GameError::NoMoveSelected(Role::Hider)));
        assert!(session.choose(4).is_err());

        session.choose(2).unwrap();
        let record = session.play_round().unwrap();
        assert_eq!(record.hider, 2);
        assert_eq!(session.stats().round, 1);
        assert_eq!(session.last_positions(), Some((2, record.seeker)));

        session.reset();
        assert_eq!(session.stats(), GameStats::default());
    }

    #[test]
    fn test_many_rounds_on_grid() {
        let grid = Grid::new(2, 2).unwrap();
        let world = Arc::new(World::random(grid, Role::Hider, true, &mut SeededRng::from_u64(4)));
        let mut session = Session::new(world, Role::Seeker, SeededRng::from_u64(4)).unwrap();
        for _ in 0..20 {
            session.choose(Cell::new(0, 1)).unwrap();
            let record = session.play_round().unwrap();
            assert_eq!(record.seeker, Cell::new(0, 1));
        }
        let stats = session.stats();
        assert_eq!(stats.round, 20);
        assert_eq!(stats.hider_wins + stats.seeker_wins, 20);
    }
}
