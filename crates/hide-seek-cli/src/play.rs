//! Interactive rounds against the computer

use std::sync::Arc;

use anyhow::Result;
use dialoguer::Input;
use hide_seek::{GameConfig, Role, Session, World};

use crate::display::{self, Board};

enum Turn<P> {
    Move(P),
    Reset,
    Quit,
}

fn prompt<S: Board>(space: &S, role: Role) -> Result<Turn<S::Position>> {
    let input: String = Input::new()
        .with_prompt(format!("{} position (r reset, q quit)", role))
        .validate_with(|s: &String| -> Result<(), String> {
            match s.trim() {
                "q" | "r" => Ok(()),
                other => space.parse_position(other).map(|_| ()),
            }
        })
        .interact_text()?;
    Ok(match input.trim() {
        "q" => Turn::Quit,
        "r" => Turn::Reset,
        other => Turn::Move(space.parse_position(other).map_err(anyhow::Error::msg)?),
    })
}

pub fn interactive<S: Board>(world: Arc<World<S>>, config: &GameConfig) -> Result<()> {
    let mut session = Session::new(world, config.human_role, config.play_rng())?;
    println!("{}", display::places(session.world()));
    println!(
        "you are the {}; the computer's equilibrium value is {:+.4}",
        session.human_role(),
        session.computer_value()
    );

    loop {
        let space = session.world().space().clone();
        match prompt(&space, session.human_role())? {
            Turn::Quit => break,
            Turn::Reset => {
                session.reset();
                println!("scores reset");
            }
            Turn::Move(pos) => {
                if let Err(e) = session.choose(pos) {
                    println!("{}", e);
                    continue;
                }
                let round = session.play_round()?;
                let stats = session.stats();
                println!(
                    "round {}: hider {} seeker {} -> {} (payoff {:+.2})",
                    round.round,
                    space.describe(round.hider),
                    space.describe(round.seeker),
                    if round.found { "found" } else { "escaped" },
                    round.payoff
                );
                println!(
                    "hider {:+.2} ({} wins)  seeker {:+.2} ({} wins)",
                    stats.hider_score, stats.hider_wins, stats.seeker_score, stats.seeker_wins
                );
            }
        }
    }
    Ok(())
}
