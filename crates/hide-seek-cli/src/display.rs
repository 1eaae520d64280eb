//! Plain-text rendering of worlds, matrices and strategies

use hide_seek::{Cell, Grid, Line, PayoffMatrix, PlaceType, PositionSpace, Strategy, World};

/// How a space is laid out on the terminal and read back from input
pub trait Board: PositionSpace {
    /// Rows and columns of the printed board.
    fn layout(&self) -> (usize, usize);
    fn parse_position(&self, input: &str) -> Result<Self::Position, String>;
    fn describe(&self, pos: Self::Position) -> String;
}

impl Board for Line {
    fn layout(&self) -> (usize, usize) {
        (1, self.size)
    }

    fn parse_position(&self, input: &str) -> Result<usize, String> {
        input
            .trim()
            .parse()
            .map_err(|_| format!("expected a position in 0..{}", self.size))
    }

    fn describe(&self, pos: usize) -> String {
        pos.to_string()
    }
}

impl Board for Grid {
    fn layout(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn parse_position(&self, input: &str) -> Result<Cell, String> {
        let mut parts = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(str::parse::<usize>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(row)), Some(Ok(col)), None) => Ok(Cell::new(row, col)),
            _ => Err("expected ROW,COL".to_string()),
        }
    }

    fn describe(&self, cell: Cell) -> String {
        cell.to_string()
    }
}

fn symbol(place: PlaceType) -> char {
    match place {
        PlaceType::Easy => 'E',
        PlaceType::Neutral => '.',
        PlaceType::Hard => 'H',
    }
}

/// Place types laid out as the board
pub fn places<S: Board>(world: &World<S>) -> String {
    let (rows, cols) = world.space().layout();
    let mut out = String::from("places (E easy, . neutral, H hard)\n");
    for r in 0..rows {
        for c in 0..cols {
            out.push(' ');
            out.push(symbol(world.places()[r * cols + c]));
        }
        out.push('\n');
    }
    out
}

/// Payoff matrix, hider positions down the side
pub fn matrix(matrix: &PayoffMatrix) -> String {
    let mut out = format!("payoffs to the {} (rows: hider, cols: seeker)\n", matrix.perspective());
    for row in matrix.rows() {
        let line: String = row.iter().map(|v| format!("{:>7.2}", v)).collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Probabilities laid out as the board
pub fn strategy<S: Board>(space: &S, strategy: &Strategy) -> String {
    let (rows, cols) = space.layout();
    strategy
        .probabilities()
        .chunks(cols)
        .take(rows)
        .map(|row| row.iter().map(|p| format!("{:>7.3}", p)).collect::<String>() + "\n")
        .collect()
}
