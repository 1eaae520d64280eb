//! Terminal front-end for the Hide & Seek engine

mod args;
mod display;
mod play;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hide_seek::{solver, GameConfig, Grid, Line, PositionSpace, Role, Shape, Simulation, World};

use crate::args::{Cli, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.game.config()?.seeded();
    log::info!("seed {}", config.seed.unwrap_or_default());
    match config.shape {
        Shape::Line { size } => run(&cli.command, &config, Line::new(size)?),
        Shape::Grid { rows, cols } => run(&cli.command, &config, Grid::new(rows, cols)?),
    }
}

fn run<S>(command: &Command, config: &GameConfig, space: S) -> Result<()>
where
    S: PositionSpace + display::Board,
{
    let world = Arc::new(config.world(space)?);
    match command {
        Command::Matrix { json } => matrix(&world, *json),
        Command::Solve { json } => strategies(&world, *json),
        Command::Simulate { rounds, json } => simulate(world, config, *rounds, *json),
        Command::Play => play::interactive(world, config),
    }
}

fn matrix<S: PositionSpace + display::Board>(world: &World<S>, json: bool) -> Result<()> {
    let matrix = world.generate_matrix();
    if json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
        return Ok(());
    }
    println!("{}", display::places(world));
    println!("{}", display::matrix(&matrix));
    Ok(())
}

fn strategies<S: PositionSpace + display::Board>(world: &World<S>, json: bool) -> Result<()> {
    let matrix = world.generate_matrix();
    let hider = solver::equilibrium(&matrix, Role::Hider);
    let seeker = solver::equilibrium(&matrix, Role::Seeker);
    if json {
        let both = serde_json::json!({ "hider": hider, "seeker": seeker });
        println!("{}", serde_json::to_string_pretty(&both)?);
        return Ok(());
    }
    println!("{}", display::places(world));
    for (role, eq) in [(Role::Hider, &hider), (Role::Seeker, &seeker)] {
        println!("{} (value {:+.4})", role, eq.value);
        println!("{}", display::strategy(world.space(), &eq.strategy));
    }
    Ok(())
}

fn simulate<S: PositionSpace + display::Board>(
    world: Arc<World<S>>,
    config: &GameConfig,
    rounds: u32,
    json: bool,
) -> Result<()> {
    let mut sim = Simulation::new(world, config.play_rng()).context("setting up simulation")?;
    sim.run(rounds).context("running simulation")?;
    let results = sim.results();
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    println!("rounds        {}", results.rounds_played);
    println!("hider wins    {} ({:.2}%)", results.hider_wins, results.hider_win_rate);
    println!("seeker wins   {} ({:.2}%)", results.seeker_wins, results.seeker_win_rate);
    println!("avg payoff    {:+.4}", results.average_payoff);
    println!("hider score   {:+.2}", results.hider_score);
    println!("seeker score  {:+.2}", results.seeker_score);
    Ok(())
}
