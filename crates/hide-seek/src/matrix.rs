//! Immutable payoff matrix

use serde::Serialize;

use crate::error::GameError;
use crate::role::Role;
use crate::strategy::Strategy;

/// Square N x N payoff matrix
///
/// Entry `(i, j)` is the payoff to `perspective` when the hider is at
/// position `i` and the seeker at position `j`. Built once and never
/// mutated; derived views return new matrices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PayoffMatrix {
    size: usize,
    perspective: Role,
    cells: Vec<f64>,
}

impl PayoffMatrix {
    /// Build from a payoff function over index pairs
    pub(crate) fn from_fn<F>(size: usize, perspective: Role, mut payoff: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let cells = (0..size)
            .flat_map(|i| (0..size).map(move |j| (i, j)))
            .map(|(i, j)| payoff(i, j))
            .collect();
        Self {
            size,
            perspective,
            cells,
        }
    }

    /// Build from explicit rows, e.g. a matrix supplied by the caller
    ///
    /// Rows must form a non-empty square of finite values.
    pub fn from_rows(rows: Vec<Vec<f64>>, perspective: Role) -> Result<Self, GameError> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::MalformedMatrix("matrix is empty".to_string()));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GameError::MalformedMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(GameError::MalformedMatrix(format!(
                    "entry ({}, {}) is not finite",
                    i, j
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            size,
            perspective,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The role whose payoff the entries describe.
    pub fn perspective(&self) -> Role {
        self.perspective
    }

    /// Payoff with the hider at `i` and the seeker at `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Swap the roles of rows and columns, keeping the perspective.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.size, self.perspective, |i, j| self.get(j, i))
    }

    /// Same game seen from the other side: `-M`, perspective flipped.
    pub fn negate(&self) -> Self {
        Self {
            size: self.size,
            perspective: self.perspective.opponent(),
            cells: self.cells.iter().map(|v| -v).collect(),
        }
    }

    /// Rows as `role`'s positions, entries as `role`'s payoff
    ///
    /// For the hider under a hider-perspective matrix this is the matrix
    /// itself; for the seeker it is the negative transpose. The result is
    /// always the maximizing player's matrix for `role`.
    pub fn for_role(&self, role: Role) -> Vec<Vec<f64>> {
        let sign = if role == self.perspective { 1.0 } else { -1.0 };
        (0..self.size)
            .map(|r| {
                (0..self.size)
                    .map(|c| match role {
                        Role::Hider => sign * self.get(r, c),
                        Role::Seeker => sign * self.get(c, r),
                    })
                    .collect()
            })
            .collect()
    }

    /// Expected payoff to the perspective role when both sides randomize.
    pub fn expected_payoff(&self, hider: &Strategy, seeker: &Strategy) -> Result<f64, GameError> {
        hider.check_len(self.size)?;
        seeker.check_len(self.size)?;
        let h = hider.probabilities();
        let s = seeker.probabilities();
        Ok(self
            .rows()
            .zip(h)
            .map(|(row, p)| p * row.iter().zip(s).map(|(v, q)| v * q).sum::<f64>())
            .sum())
    }
}
