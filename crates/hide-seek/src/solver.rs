//! Minimax equilibrium solver
//!
//! Solves the zero-sum game for one role by linear programming. The
//! payoff matrix is first oriented so rows are the role's positions and
//! entries are the role's payoff (the negative transpose for the side
//! opposite the matrix perspective); the role then maximizes its
//! guaranteed expected payoff.
//!
//! The LP is the classic reduction: rescale the matrix to
//! `B = (A - min) / (max - min) + 1`, so every entry lies in `[1, 2]`
//! whatever the payoff scale, then solve
//!
//! ```text
//!     maximize  sum(y)   subject to  B y <= 1,  y >= 0
//! ```
//!
//! with a dense simplex tableau. The row player's strategy is read off
//! the dual values of the constraints. The value of `B` is `1 / sum(y)`,
//! mapped back through the rescaling.

use serde::Serialize;

use crate::matrix::PayoffMatrix;
use crate::role::Role;
use crate::strategy::Strategy;

/// Pivot tolerance.
const EPSILON: f64 = 1e-9;

/// Iteration cap per tableau column/row; Bland's rule terminates well
/// before this on any finite matrix.
const MAX_PIVOTS_PER_DIM: usize = 64;

/// A role's equilibrium: its optimal mixed strategy and the game value
/// from its own viewpoint
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Equilibrium {
    pub strategy: Strategy,
    pub value: f64,
}

/// Why the LP did not produce a strategy. Never leaves this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SolveError {
    Unbounded,
    IterationLimit,
    Degenerate,
}

/// Optimal mixed strategy for `role`
///
/// Falls back to the uniform strategy if the LP cannot be solved.
pub fn solve(matrix: &PayoffMatrix, role: Role) -> Strategy {
    equilibrium(matrix, role).strategy
}

/// Optimal mixed strategy and game value for `role`
pub fn equilibrium(matrix: &PayoffMatrix, role: Role) -> Equilibrium {
    let n = matrix.size();
    let oriented = matrix.for_role(role);
    if n == 1 {
        return Equilibrium {
            strategy: Strategy::uniform(1),
            value: oriented[0][0],
        };
    }
    match maximin(&oriented) {
        Ok((probabilities, value)) => match Strategy::new(probabilities) {
            Ok(strategy) => Equilibrium { strategy, value },
            Err(e) => fallback(matrix, role, &format!("{}", e)),
        },
        Err(e) => fallback(matrix, role, &format!("{:?}", e)),
    }
}

/// Uniform strategy, valued against the opponent's best response
fn fallback(matrix: &PayoffMatrix, role: Role, reason: &str) -> Equilibrium {
    log::warn!(
        "equilibrium solve for the {} failed ({}); using uniform strategy",
        role,
        reason
    );
    let n = matrix.size();
    let strategy = Strategy::uniform(n);
    let oriented = matrix.for_role(role);
    let value = (0..n)
        .map(|c| oriented.iter().map(|row| row[c]).sum::<f64>() / n as f64)
        .fold(f64::INFINITY, f64::min);
    Equilibrium { strategy, value }
}

/// Maximize the row player's guaranteed payoff over `a` (m x n)
///
/// Returns the row strategy (normalized) and the game value.
fn maximin(a: &[Vec<f64>]) -> Result<(Vec<f64>, f64), SolveError> {
    let m = a.len();
    let n = a.first().map_or(0, Vec::len);
    let (min, max) = a
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    if !range.is_finite() {
        return Err(SolveError::Degenerate);
    }
    if range <= 0.0 {
        // constant game: every strategy is optimal
        return Ok((vec![1.0 / m as f64; m], min));
    }

    let scaled: Vec<Vec<f64>> = a
        .iter()
        .map(|row| row.iter().map(|v| (v - min) / range + 1.0).collect())
        .collect();
    let mut tableau = Tableau::new(&scaled);
    let pivots = tableau.optimize((m + n) * MAX_PIVOTS_PER_DIM)?;

    let total = tableau.objective();
    if total <= EPSILON {
        return Err(SolveError::Degenerate);
    }
    let duals = tableau.duals();
    let mass: f64 = duals.iter().sum();
    if mass <= EPSILON {
        return Err(SolveError::Degenerate);
    }
    let probabilities = duals
        .iter()
        .map(|x| if *x > 0.0 { x / mass } else { 0.0 })
        .collect();
    let value = (1.0 / total - 1.0) * range + min;
    log::debug!(
        "solved {}x{} game in {} pivots, value {:.6}",
        m,
        n,
        pivots,
        value
    );
    Ok((probabilities, value))
}

/// Dense simplex tableau for `max sum(y) s.t. B y <= 1, y >= 0`
///
/// `B` must be strictly positive.
/// Columns: `n` decision variables, `m` slacks, then the right-hand side.
/// The last row is the objective.
struct Tableau {
    m: usize,
    n: usize,
    cells: Vec<Vec<f64>>,
    basis: Vec<usize>,
}

impl Tableau {
    fn new(b: &[Vec<f64>]) -> Self {
        let m = b.len();
        let n = b.first().map_or(0, Vec::len);
        let width = n + m + 1;
        let mut cells = Vec::with_capacity(m + 1);
        for (i, row) in b.iter().enumerate() {
            let mut line = vec![0.0; width];
            line[..n].copy_from_slice(row);
            line[n + i] = 1.0;
            line[width - 1] = 1.0;
            cells.push(line);
        }
        let mut objective = vec![0.0; width];
        for v in objective.iter_mut().take(n) {
            *v = -1.0;
        }
        cells.push(objective);
        Self {
            m,
            n,
            cells,
            basis: (n..n + m).collect(),
        }
    }

    fn rhs(&self) -> usize {
        self.n + self.m
    }

    fn objective(&self) -> f64 {
        self.cells[self.m][self.rhs()]
    }

    /// Dual value of each constraint: the objective row under the slacks.
    fn duals(&self) -> Vec<f64> {
        self.cells[self.m][self.n..self.n + self.m].to_vec()
    }

    /// Pivot until optimal, returning the number of pivots taken
    fn optimize(&mut self, limit: usize) -> Result<usize, SolveError> {
        for pivots in 0..limit {
            // Bland: lowest-index improving column
            let Some(col) = (0..self.rhs()).find(|&c| self.cells[self.m][c] < -EPSILON) else {
                return Ok(pivots);
            };
            let row = self.leaving_row(col).ok_or(SolveError::Unbounded)?;
            self.pivot(row, col);
        }
        Err(SolveError::IterationLimit)
    }

    /// Minimum-ratio row for `col`, ties broken by lowest basic variable
    fn leaving_row(&self, col: usize) -> Option<usize> {
        let rhs = self.rhs();
        (0..self.m)
            .filter(|&r| self.cells[r][col] > EPSILON)
            .map(|r| (r, self.cells[r][rhs] / self.cells[r][col]))
            .min_by(|(ra, a), (rb, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(self.basis[*ra].cmp(&self.basis[*rb]))
            })
            .map(|(r, _)| r)
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let p = self.cells[row][col];
        for v in self.cells[row].iter_mut() {
            *v /= p;
        }
        let pivot_row = self.cells[row].clone();
        for (r, line) in self.cells.iter_mut().enumerate() {
            if r == row {
                continue;
            }
            let factor = line[col];
            if factor.abs() <= f64::EPSILON {
                continue;
            }
            for (v, pv) in line.iter_mut().zip(&pivot_row) {
                *v -= factor * pv;
            }
        }
        self.basis[row] = col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;
    use crate::space::{Grid, Line};
    use crate::strategy::{Strategy, TOLERANCE};
    use crate::world::{PlaceType, World};
    use proptest::prelude::*;
    use proptest::strategy::Strategy as _;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{:?} != {:?}", actual, expected);
        }
    }

    /// Expected payoff of `eq.strategy` against each pure reply
    fn column_payoffs(m: &PayoffMatrix, role: Role, eq: &Equilibrium) -> Vec<f64> {
        let oriented = m.for_role(role);
        let p = eq.strategy.probabilities();
        (0..m.size())
            .map(|c| oriented.iter().zip(p).map(|(row, w)| w * row[c]).sum::<f64>())
            .collect()
    }

    fn assert_guarantees(m: &PayoffMatrix, role: Role, eq: &Equilibrium, tolerance: f64) {
        for payoff in column_payoffs(m, role, eq) {
            assert!(payoff >= eq.value - tolerance, "{} below value {}", payoff, eq.value);
        }
    }

    fn assert_valid(strategy: &Strategy) {
        let sum: f64 = strategy.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE);
        assert!(strategy.probabilities().iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_matching_pennies() {
        let m = PayoffMatrix::from_rows(vec![vec![1.0, -1.0], vec![-1.0, 1.0]], Role::Hider).unwrap();
        for role in [Role::Hider, Role::Seeker] {
            let eq = equilibrium(&m, role);
            assert_close(eq.strategy.probabilities(), &[0.5, 0.5]);
            assert!(eq.value.abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_position() {
        let m = PayoffMatrix::from_rows(vec![vec![-3.0]], Role::Hider).unwrap();
        let eq = equilibrium(&m, Role::Hider);
        assert_eq!(eq.strategy.probabilities(), &[1.0]);
        assert_eq!(eq.value, -3.0);
        assert_eq!(solve(&m, Role::Seeker).probabilities(), &[1.0]);
    }

    #[test]
    fn test_dominated_row_gets_no_weight() {
        // row 1 is dominated by row 0
        let m = PayoffMatrix::from_rows(
            vec![vec![3.0, 2.0, 4.0], vec![1.0, 1.0, 1.0], vec![2.0, 5.0, 0.0]],
            Role::Hider,
        )
        .unwrap();
        let eq = equilibrium(&m, Role::Hider);
        assert_valid(&eq.strategy);
        assert!(eq.strategy.probabilities()[1] < 1e-9);
    }

    #[test]
    fn test_saddle_point() {
        // pure saddle at (0, 1) with value 2
        let m = PayoffMatrix::from_rows(vec![vec![3.0, 2.0], vec![1.0, 0.0]], Role::Hider).unwrap();
        let hider = equilibrium(&m, Role::Hider);
        assert_close(hider.strategy.probabilities(), &[1.0, 0.0]);
        assert!((hider.value - 2.0).abs() < 1e-9);

        let seeker = equilibrium(&m, Role::Seeker);
        assert_close(seeker.strategy.probabilities(), &[0.0, 1.0]);
        assert!((seeker.value + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rock_paper_scissors_variant() {
        let m = PayoffMatrix::from_rows(
            vec![vec![0.0, 2.0, -1.0], vec![-1.0, 0.0, 1.0], vec![1.0, -1.0, 0.0]],
            Role::Hider,
        )
        .unwrap();
        let eq = equilibrium(&m, Role::Hider);
        assert_close(eq.strategy.probabilities(), &[0.25, 1.0 / 3.0, 5.0 / 12.0]);
        assert!((eq.value - 1.0 / 12.0).abs() < 1e-9);
        // every column pays exactly the value
        assert_close(&column_payoffs(&m, Role::Hider, &eq), &[1.0 / 12.0; 3]);

        let seeker = equilibrium(&m, Role::Seeker);
        assert_close(seeker.strategy.probabilities(), &[1.0 / 3.0, 0.25, 5.0 / 12.0]);
        assert_guarantees(&m, Role::Seeker, &seeker, 1e-9);
    }

    #[test]
    fn test_scaled_games_share_strategies() {
        let rows = vec![vec![2.0, 0.0], vec![0.0, 1.0]];
        for k in [1e-10, 1e-4, 1.0, 1e4, 1e10] {
            let scaled: Vec<Vec<f64>> = rows.iter().map(|r| r.iter().map(|v| v * k).collect()).collect();
            let m = PayoffMatrix::from_rows(scaled, Role::Hider).unwrap();
            let eq = equilibrium(&m, Role::Hider);
            assert_close(eq.strategy.probabilities(), &[1.0 / 3.0, 2.0 / 3.0]);
            assert!((eq.value / k - 2.0 / 3.0).abs() < 1e-9, "k {} value {}", k, eq.value);
            assert_guarantees(&m, Role::Hider, &eq, 1e-9 * k);
        }
    }

    #[test]
    fn test_shifted_game_keeps_strategy() {
        let m = PayoffMatrix::from_rows(vec![vec![1e9 + 2.0, 1e9], vec![1e9, 1e9 + 1.0]], Role::Hider).unwrap();
        let eq = equilibrium(&m, Role::Hider);
        assert_close(eq.strategy.probabilities(), &[1.0 / 3.0, 2.0 / 3.0]);
        assert!((eq.value - (1e9 + 2.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_constant_game() {
        let m = PayoffMatrix::from_rows(vec![vec![4.0; 3]; 3], Role::Hider).unwrap();
        for role in [Role::Hider, Role::Seeker] {
            let eq = equilibrium(&m, role);
            assert_valid(&eq.strategy);
            let expected = if role == Role::Hider { 4.0 } else { -4.0 };
            assert_eq!(eq.value, expected);
        }
    }

    #[test]
    fn test_neutral_world_is_uniform() {
        let world = World::with_places(Line::new(4).unwrap(), vec![PlaceType::Neutral; 4], Role::Hider, false)
            .unwrap();
        let m = world.generate_matrix();
        for role in [Role::Hider, Role::Seeker] {
            assert_close(solve(&m, role).probabilities(), &[0.25; 4]);
        }
        // hider caught with probability 1/4: 3/4 * 1 - 1/4 * 1
        assert!((equilibrium(&m, Role::Hider).value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_seeker_perspective_matrix() {
        let mut rng = SeededRng::from_u64(3);
        let hider_view = World::random(Line::new(5).unwrap(), Role::Hider, true, &mut rng);
        let seeker_view = World::with_places(
            hider_view.space().clone(),
            hider_view.places().to_vec(),
            Role::Seeker,
            true,
        )
        .unwrap();
        for role in [Role::Hider, Role::Seeker] {
            let a = equilibrium(&hider_view.generate_matrix(), role);
            let b = equilibrium(&seeker_view.generate_matrix(), role);
            assert!((a.value - b.value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_sum_duality() {
        let world = World::random(Grid::new(3, 3).unwrap(), Role::Hider, true, &mut SeededRng::from_u64(21));
        let m = world.generate_matrix();
        let hider = equilibrium(&m, Role::Hider);
        let seeker = equilibrium(&m, Role::Seeker);
        assert!((hider.value + seeker.value).abs() < 1e-6);

        // each strategy guarantees its value against the other
        let expected = m.expected_payoff(&hider.strategy, &seeker.strategy).unwrap();
        assert!((expected - hider.value).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_is_uniform() {
        let m = PayoffMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]], Role::Hider).unwrap();
        let eq = fallback(&m, Role::Hider, "test");
        assert_eq!(eq.strategy, Strategy::uniform(2));
        assert!((eq.value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_iteration_limit_reported() {
        let a = vec![vec![0.0, 2.0, -1.0], vec![-1.0, 0.0, 1.0], vec![1.0, -1.0, 0.0]];
        let b: Vec<Vec<f64>> = a.iter().map(|r| r.iter().map(|v| v + 2.0).collect()).collect();
        let mut tableau = Tableau::new(&b);
        assert_eq!(tableau.optimize(0), Err(SolveError::IterationLimit));
    }

    proptest! {
        #[test]
        fn prop_strategies_are_distributions(
            rows in (2usize..7).prop_flat_map(|n| proptest::collection::vec(
                proptest::collection::vec(-10.0f64..10.0, n), n))
        ) {
            let m = PayoffMatrix::from_rows(rows, Role::Hider).unwrap();
            for role in [Role::Hider, Role::Seeker] {
                let eq = equilibrium(&m, role);
                let sum: f64 = eq.strategy.probabilities().iter().sum();
                prop_assert!((sum - 1.0).abs() < TOLERANCE);
                prop_assert!(eq.strategy.probabilities().iter().all(|p| *p >= 0.0 && *p <= 1.0));
                for payoff in column_payoffs(&m, role, &eq) {
                    prop_assert!(payoff >= eq.value - 1e-6);
                }
            }
        }

        #[test]
        fn prop_values_are_negatives(seed in any::<u64>(), size in 2usize..9, proximity in any::<bool>()) {
            let world = World::random(Line::new(size).unwrap(), Role::Hider, proximity, &mut SeededRng::from_u64(seed));
            let m = world.generate_matrix();
            let h = equilibrium(&m, Role::Hider).value;
            let s = equilibrium(&m, Role::Seeker).value;
            prop_assert!((h + s).abs() < 1e-6);
        }
    }
}
