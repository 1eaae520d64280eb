//! WASM bindings for a browser front-end

#![cfg(feature = "wasm")]

use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{solver, GameConfig, Grid, Line, PositionSpace, Role, Shape, Simulation, World};

/// Parse a configuration, seeding it from the browser if needed
fn parse_config(config_json: &str) -> Result<GameConfig, JsError> {
    let mut config = GameConfig::from_json(config_json)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u64::MAX as f64) as u64);
    }
    Ok(config)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn js_error(e: crate::GameError) -> JsError {
    JsError::new(&e.to_string())
}

#[derive(Serialize)]
struct WorldView<'a> {
    seed: Option<u64>,
    places: &'a [crate::PlaceType],
    matrix: Vec<Vec<f64>>,
}

fn world_view<S: PositionSpace>(config: &GameConfig, space: S) -> Result<JsValue, JsError> {
    let world = config.world(space).map_err(js_error)?;
    to_js(&WorldView {
        seed: config.seed,
        places: world.places(),
        matrix: world.generate_matrix().to_rows(),
    })
}

/// Generate a world and its payoff matrix
///
/// # Returns
/// `{seed, places, matrix}`
#[wasm_bindgen]
pub fn generate_payoff_matrix(config_json: &str) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    match config.shape {
        Shape::Line { size } => world_view(&config, Line::new(size).map_err(js_error)?),
        Shape::Grid { rows, cols } => world_view(&config, Grid::new(rows, cols).map_err(js_error)?),
    }
}

fn equilibrium<S: PositionSpace>(config: &GameConfig, space: S, role: Role) -> Result<JsValue, JsError> {
    let world = config.world(space).map_err(js_error)?;
    to_js(&solver::equilibrium(&world.generate_matrix(), role))
}

/// Solve the equilibrium strategy for `role` ("hider" or "seeker")
///
/// # Returns
/// `{strategy, value}`
#[wasm_bindgen]
pub fn solve_strategy(config_json: &str, role: &str) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let role: Role = role.parse().map_err(|e: String| JsError::new(&e))?;
    match config.shape {
        Shape::Line { size } => equilibrium(&config, Line::new(size).map_err(js_error)?, role),
        Shape::Grid { rows, cols } => equilibrium(&config, Grid::new(rows, cols).map_err(js_error)?, role),
    }
}

fn simulation<S: PositionSpace>(config: &GameConfig, space: S, rounds: u32) -> Result<JsValue, JsError> {
    let world: Arc<World<S>> = Arc::new(config.world(space).map_err(js_error)?);
    let mut sim = Simulation::new(world, config.play_rng()).map_err(js_error)?;
    sim.run(rounds).map_err(js_error)?;
    to_js(&sim.results())
}

/// Run `rounds` rounds of equilibrium-vs-equilibrium play
///
/// # Returns
/// JSON serialized SimulationResults
#[wasm_bindgen]
pub fn simulate(config_json: &str, rounds: u32) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    match config.shape {
        Shape::Line { size } => simulation(&config, Line::new(size).map_err(js_error)?, rounds),
        Shape::Grid { rows, cols } => simulation(&config, Grid::new(rows, cols).map_err(js_error)?, rounds),
    }
}
