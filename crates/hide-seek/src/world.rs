//! Game world and payoff model
//!
//! A world pairs a position space with a fixed place type per position.
//! Scores are computed from a single perspective role; the opposing
//! role's payoff is always the negation.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::matrix::PayoffMatrix;
use crate::role::Role;
use crate::space::PositionSpace;

/// Base payoff of every encounter.
const BASE_SCORE: f64 = 1.0;
/// Escape multiplier when the hider sits on an easy place.
const EASY_BONUS: f64 = 2.0;
/// Capture multiplier when the hider is found on a hard place.
const HARD_BONUS: f64 = 3.0;

/// Kind of place at a position, fixed when the world is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    /// Rewards a hider that escapes from here.
    Easy,
    Neutral,
    /// Rewards a seeker that catches the hider here.
    Hard,
}

impl Distribution<PlaceType> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlaceType {
        match rng.gen_range(0..3) {
            0 => PlaceType::Easy,
            1 => PlaceType::Neutral,
            _ => PlaceType::Hard,
        }
    }
}

/// Proximity multiplier for a miss at distance `d`
fn proximity_factor(d: usize) -> f64 {
    match d {
        1 => 0.5,
        2 => 0.75,
        _ => 1.0,
    }
}

/// A world instance: positions, place types and scoring rules
#[derive(Clone, Debug)]
pub struct World<S: PositionSpace> {
    space: S,
    places: Vec<PlaceType>,
    perspective: Role,
    proximity: bool,
}

impl<S: PositionSpace> World<S> {
    /// Create a world with uniformly random place types
    pub fn random<R: Rng + ?Sized>(space: S, perspective: Role, proximity: bool, rng: &mut R) -> Self {
        let places = (0..space.position_count()).map(|_| rng.gen()).collect();
        Self {
            space,
            places,
            perspective,
            proximity,
        }
    }

    /// Create a world with the given place types, one per position
    pub fn with_places(
        space: S,
        places: Vec<PlaceType>,
        perspective: Role,
        proximity: bool,
    ) -> Result<Self, GameError> {
        if places.len() != space.position_count() {
            return Err(GameError::Config(format!(
                "{} place types for {} positions",
                places.len(),
                space.position_count()
            )));
        }
        Ok(Self {
            space,
            places,
            perspective,
            proximity,
        })
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn position_count(&self) -> usize {
        self.space.position_count()
    }

    pub fn perspective(&self) -> Role {
        self.perspective
    }

    pub fn proximity(&self) -> bool {
        self.proximity
    }

    pub fn places(&self) -> &[PlaceType] {
        &self.places
    }

    pub fn place_type(&self, pos: S::Position) -> Result<PlaceType, GameError> {
        Ok(self.places[self.space.to_index(pos)?])
    }

    /// Payoff to the perspective role for a pair of positions
    pub fn score(&self, hider: S::Position, seeker: S::Position) -> Result<f64, GameError> {
        let h = self.space.to_index(hider)?;
        let s = self.space.to_index(seeker)?;
        Ok(self.score_unchecked(h, s))
    }

    /// Payoff to the perspective role for a pair of linear indices
    pub fn score_index(&self, hider: usize, seeker: usize) -> Result<f64, GameError> {
        let h = self.space.check_index(hider)?;
        let s = self.space.check_index(seeker)?;
        Ok(self.score_unchecked(h, s))
    }

    fn score_unchecked(&self, h: usize, s: usize) -> f64 {
        let found = h == s;
        let mut score = BASE_SCORE;

        // negative when the perspective role loses the encounter
        if found != (self.perspective == Role::Seeker) {
            score = -score;
        }
        match (found, self.places[h]) {
            (false, PlaceType::Easy) => score *= EASY_BONUS,
            (true, PlaceType::Hard) => score *= HARD_BONUS,
            _ => {}
        }
        if self.proximity && !found {
            score *= proximity_factor(self.space.distance(h, s));
        }
        score
    }

    /// Materialize the full payoff matrix
    pub fn generate_matrix(&self) -> PayoffMatrix {
        let n = self.position_count();
        log::debug!(
            "generating {}x{} payoff matrix from the {}'s perspective",
            n,
            n,
            self.perspective
        );
        PayoffMatrix::from_fn(n, self.perspective, |h, s| self.score_unchecked(h, s))
    }
}
