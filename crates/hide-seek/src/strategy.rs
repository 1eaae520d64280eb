//! Mixed strategies and sampling

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, StrategyFault};
use crate::space::PositionSpace;

/// Allowed drift of a strategy's total probability from 1.
pub const TOLERANCE: f64 = 1e-6;

/// Probability distribution over the positions of a world
///
/// Entries are non-negative and sum to 1 within [`TOLERANCE`]. The only
/// way to get one is through a validating constructor, deserialization
/// included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Strategy(Vec<f64>);

impl Strategy {
    /// Validate a probability vector
    pub fn new(probabilities: Vec<f64>) -> Result<Self, GameError> {
        validate(&probabilities)?;
        Ok(Self(probabilities))
    }

    /// Equal weight on each of `n` positions
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// All weight on one position
    pub fn pure(n: usize, index: usize) -> Result<Self, GameError> {
        if index >= n {
            return Err(GameError::OutOfRange { index, count: n });
        }
        let mut probabilities = vec![0.0; n];
        probabilities[index] = 1.0;
        Ok(Self(probabilities))
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the heaviest position (first on ties).
    pub fn mode(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &p)| if p > best.1 { (i, p) } else { best })
            .0
    }

    pub(crate) fn check_len(&self, expected: usize) -> Result<(), GameError> {
        if self.0.len() != expected {
            return Err(StrategyFault::LengthMismatch {
                expected,
                found: self.0.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for Strategy {
    type Error = GameError;

    fn try_from(probabilities: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(probabilities)
    }
}

impl From<Strategy> for Vec<f64> {
    fn from(strategy: Strategy) -> Self {
        strategy.0
    }
}

/// Check the strategy invariants on a raw probability vector
pub fn validate(probabilities: &[f64]) -> Result<(), StrategyFault> {
    if probabilities.is_empty() {
        return Err(StrategyFault::Empty);
    }
    if let Some((index, &value)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0 || **p > 1.0 + TOLERANCE)
    {
        return Err(StrategyFault::BadEntry { index, value });
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > TOLERANCE {
        return Err(StrategyFault::NotNormalized(sum));
    }
    Ok(())
}

/// Draws concrete moves from mixed strategies
///
/// Owns its random source so a sampler seeded by the caller replays the
/// same moves.
#[derive(Clone, Debug)]
pub struct StrategySampler<R> {
    rng: R,
}

impl<R: Rng> StrategySampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a linear index in `0..strategy.len()` by weight
    pub fn sample_index(&mut self, strategy: &[f64]) -> Result<usize, GameError> {
        validate(strategy)?;
        let weights = WeightedIndex::new(strategy)
            .map_err(|_| GameError::InvalidStrategy(StrategyFault::NotNormalized(strategy.iter().sum())))?;
        Ok(weights.sample(&mut self.rng))
    }

    /// Draw a position of `space`
    ///
    /// The strategy must cover exactly the positions of `space`.
    pub fn sample<S: PositionSpace>(
        &mut self,
        strategy: &[f64],
        space: &S,
    ) -> Result<S::Position, GameError> {
        let expected = space.position_count();
        if strategy.len() != expected {
            if strategy.is_empty() {
                return Err(StrategyFault::Empty.into());
            }
            return Err(StrategyFault::LengthMismatch {
                expected,
                found: strategy.len(),
            }
            .into());
        }
        let idx = self.sample_index(strategy)?;
        space.from_index(idx)
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }
}
