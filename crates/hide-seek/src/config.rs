//! Game configuration supplied by the presentation layer

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::random::SeededRng;
use crate::role::Role;
use crate::space::{Grid, Line, PositionSpace};
use crate::world::World;

/// Stream for place-type assignment.
const WORLD_STREAM: u64 = 0;
/// Stream for move sampling.
const PLAY_STREAM: u64 = 1;

/// World shape and size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Line { size: usize },
    Grid { rows: usize, cols: usize },
}

impl Shape {
    /// Number of positions, `None` if `rows * cols` overflows
    pub fn position_count(&self) -> Option<usize> {
        match *self {
            Shape::Line { size } => Some(size),
            Shape::Grid { rows, cols } => rows.checked_mul(cols),
        }
    }
}

/// Everything needed to set up a game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub shape: Shape,
    /// Role the payoff matrix is written for.
    #[serde(default)]
    pub perspective: Role,
    /// Role the person plays in an interactive session.
    #[serde(default)]
    pub human_role: Role,
    /// Soften payoffs for near misses.
    #[serde(default)]
    pub proximity: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            perspective: Role::Hider,
            human_role: Role::Hider,
            proximity: false,
            seed: None,
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        match self.shape {
            Shape::Line { size } => Line::new(size).map(|_| ()),
            Shape::Grid { rows, cols } => Grid::new(rows, cols).map(|_| ()),
        }
    }

    /// Fix a seed if none was given, so the run can be replayed
    pub fn seeded(mut self) -> Self {
        if self.seed.is_none() {
            self.seed = Some(rand::random());
        }
        self
    }

    fn base_rng(&self) -> SeededRng {
        SeededRng::from_u64(self.seed.unwrap_or_default())
    }

    /// Generator for place-type assignment.
    pub fn world_rng(&self) -> SeededRng {
        self.base_rng().fork(WORLD_STREAM)
    }

    /// Generator for sampled moves.
    pub fn play_rng(&self) -> SeededRng {
        self.base_rng().fork(PLAY_STREAM)
    }

    /// Create a world over `space` with this configuration's rules
    pub fn world<S: PositionSpace>(&self, space: S) -> Result<World<S>, GameError> {
        self.validate()?;
        if Some(space.position_count()) != self.shape.position_count() {
            return Err(GameError::Config(format!(
                "space has {} positions, configuration has {:?}",
                space.position_count(),
                self.shape
            )));
        }
        Ok(World::random(
            space,
            self.perspective,
            self.proximity,
            &mut self.world_rng(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = GameConfig::from_json(r#"{"shape": {"line": {"size": 5}}}"#).unwrap();
        assert_eq!(config, GameConfig::new(Shape::Line { size: 5 }));
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "shape": {"grid": {"rows": 2, "cols": 3}},
            "perspective": "seeker",
            "human_role": "seeker",
            "proximity": true,
            "seed": 17
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.shape, Shape::Grid { rows: 2, cols: 3 });
        assert_eq!(config.perspective, Role::Seeker);
        assert!(config.proximity);
        assert_eq!(config.seed, Some(17));
        assert_eq!(GameConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_empty_world() {
        assert!(matches!(
            GameConfig::from_json(r#"{"shape": {"grid": {"rows": 0, "cols": 3}}}"#),
            Err(GameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"shape": "line"}"#),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_overflowing_grid_rejected() {
        let json = r#"{"shape": {"grid": {"rows": 18446744073709551615, "cols": 2}}}"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(GameError::InvalidDimensions { .. })
        ));

        let config = GameConfig::new(Shape::Grid { rows: usize::MAX, cols: 2 });
        assert_eq!(config.shape.position_count(), None);
        assert!(config.world(Line::new(4).unwrap()).is_err());
    }

    #[test]
    fn test_seeded_worlds_repeat() {
        let mut config = GameConfig::new(Shape::Line { size: 12 });
        config.seed = Some(99);
        let a = config.world(Line::new(12).unwrap()).unwrap();
        let b = config.world(Line::new(12).unwrap()).unwrap();
        assert_eq!(a.places(), b.places());
        assert!(config.world(Line::new(3).unwrap()).is_err());
    }

    #[test]
    fn test_seeded_fills_seed_once() {
        let config = GameConfig::new(Shape::Line { size: 2 }).seeded();
        let seed = config.seed;
        assert!(seed.is_some());
        assert_eq!(config.seeded().seed, seed);
    }
}
