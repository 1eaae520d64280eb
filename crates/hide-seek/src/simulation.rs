//! Repeated play between two equilibrium strategies

use std::sync::Arc;

use serde::Serialize;

use crate::error::GameError;
use crate::matrix::PayoffMatrix;
use crate::player::Player;
use crate::random::SeededRng;
use crate::role::Role;
use crate::round::{RoundRecord, RoundResolver};
use crate::solver;
use crate::space::PositionSpace;
use crate::strategy::Strategy;
use crate::world::World;

/// Running aggregate over simulated rounds
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    pub rounds_played: u32,
    pub hider_wins: u32,
    pub seeker_wins: u32,
    /// Sum of round payoffs to the world's perspective role.
    pub total_payoff: f64,
}

impl SimulationStats {
    fn record<P>(&mut self, round: &RoundRecord<P>) {
        self.rounds_played += 1;
        self.total_payoff += round.payoff;
        match round.winner() {
            Role::Hider => self.hider_wins += 1,
            Role::Seeker => self.seeker_wins += 1,
        }
    }

    /// `wins` as a percentage of rounds played, 0 before the first round
    pub fn win_rate(&self, role: Role) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        let wins = match role {
            Role::Hider => self.hider_wins,
            Role::Seeker => self.seeker_wins,
        };
        wins as f64 / self.rounds_played as f64 * 100.0
    }

    pub fn average_payoff(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.total_payoff / self.rounds_played as f64
    }
}

/// End-of-simulation summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SimulationResults {
    pub rounds_played: u32,
    pub hider_wins: u32,
    pub seeker_wins: u32,
    pub hider_win_rate: f64,
    pub seeker_win_rate: f64,
    pub average_payoff: f64,
    pub hider_score: f64,
    pub seeker_score: f64,
}

/// Both sides play their equilibrium strategies against each other
#[derive(Clone, Debug)]
pub struct Simulation<S: PositionSpace> {
    matrix: PayoffMatrix,
    hider_strategy: Strategy,
    seeker_strategy: Strategy,
    resolver: RoundResolver<S>,
    stats: SimulationStats,
}

impl<S: PositionSpace> Simulation<S> {
    /// Solve both roles and seat two computer players
    ///
    /// The hider is solved on the matrix as generated and the seeker on
    /// its negative transpose.
    pub fn new(world: Arc<World<S>>, rng: SeededRng) -> Result<Self, GameError> {
        let matrix = world.generate_matrix();
        let hider_strategy = solver::solve(&matrix, Role::Hider);
        let seeker_strategy = solver::solve(&matrix, Role::Seeker);
        log::debug!(
            "simulation over {} positions: hider {:?} seeker {:?}",
            matrix.size(),
            hider_strategy.probabilities(),
            seeker_strategy.probabilities()
        );
        let resolver = RoundResolver::new(
            world,
            Player::computer(Role::Hider, hider_strategy.clone()),
            Player::computer(Role::Seeker, seeker_strategy.clone()),
            rng,
        )?;
        Ok(Self {
            matrix,
            hider_strategy,
            seeker_strategy,
            resolver,
            stats: SimulationStats::default(),
        })
    }

    /// Play one round and return it with the updated aggregate
    pub fn next_round(&mut self) -> Result<(RoundRecord<S::Position>, SimulationStats), GameError> {
        let round = self.resolver.play_round()?;
        self.stats.record(&round);
        Ok((round, self.stats))
    }

    /// Play `n` rounds and return the final aggregate
    pub fn run(&mut self, n: u32) -> Result<SimulationStats, GameError> {
        for _ in 0..n {
            self.next_round()?;
        }
        log::info!(
            "simulated {} rounds: hider {:.2}% seeker {:.2}% average payoff {:.4}",
            self.stats.rounds_played,
            self.stats.win_rate(Role::Hider),
            self.stats.win_rate(Role::Seeker),
            self.stats.average_payoff()
        );
        Ok(self.stats)
    }

    pub fn results(&self) -> SimulationResults {
        SimulationResults {
            rounds_played: self.stats.rounds_played,
            hider_wins: self.stats.hider_wins,
            seeker_wins: self.stats.seeker_wins,
            hider_win_rate: self.stats.win_rate(Role::Hider),
            seeker_win_rate: self.stats.win_rate(Role::Seeker),
            average_payoff: self.stats.average_payoff(),
            hider_score: self.resolver.hider_state().score,
            seeker_score: self.resolver.seeker_state().score,
        }
    }

    /// Zero the aggregates and the resolver; strategies are kept.
    pub fn reset(&mut self) {
        self.stats = SimulationStats::default();
        self.resolver.reset();
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    pub fn matrix(&self) -> &PayoffMatrix {
        &self.matrix
    }

    pub fn hider_strategy(&self) -> &Strategy {
        &self.hider_strategy
    }

    pub fn seeker_strategy(&self) -> &Strategy {
        &self.seeker_strategy
    }

    pub fn resolver(&self) -> &RoundResolver<S> {
        &self.resolver
    }
}
