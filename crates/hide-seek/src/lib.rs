//! Hide & Seek game engine
//!
//! Two-player zero-sum pursuit game over a discrete world. The engine
//! builds the payoff matrix from per-position place types, solves each
//! side's minimax strategy by linear programming, and resolves rounds of
//! play. This crate is compiled to:
//! - Native (for the terminal front-end)
//! - WASM (for a browser front-end)

mod config;
mod error;
mod matrix;
mod player;
mod random;
mod role;
mod round;
mod session;
mod simulation;
pub mod solver;
mod space;
mod strategy;
mod world;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{GameConfig, Shape};
pub use error::{GameError, StrategyFault};
pub use matrix::PayoffMatrix;
pub use player::{Controller, Player, PlayerState};
pub use random::SeededRng;
pub use role::Role;
pub use round::{GameStats, RoundRecord, RoundResolver};
pub use session::Session;
pub use simulation::{Simulation, SimulationResults, SimulationStats};
pub use solver::{equilibrium, solve, Equilibrium};
pub use space::{Cell, Grid, Line, PositionSpace};
pub use strategy::{Strategy, StrategySampler, TOLERANCE};
pub use world::{PlaceType, World};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_from_config() {
        let mut config = GameConfig::from_json(r#"{"shape": {"line": {"size": 4}}, "seed": 3}"#).unwrap();
        config.proximity = true;
        let world = Arc::new(config.world(Line::new(4).unwrap()).unwrap());

        let matrix = world.generate_matrix();
        let hider = solve(&matrix, Role::Hider);
        let seeker = solve(&matrix, Role::Seeker);
        assert_eq!(hider.len(), 4);
        assert_eq!(seeker.len(), 4);

        let mut sim = Simulation::new(Arc::clone(&world), config.play_rng()).unwrap();
        let stats = sim.run(100).unwrap();
        assert_eq!(stats.rounds_played, 100);
        assert_eq!(sim.hider_strategy(), &hider);
        assert_eq!(sim.seeker_strategy(), &seeker);
    }
}
