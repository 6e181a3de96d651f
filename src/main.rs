//! Self-play driver.
//!
//! Usage:
//! `cargo run --release`
//! `cargo run --release -- --depth 4 --cards monkey,crab,tiger,elephant,rabbit`
//! `cargo run --release -- --seed 7 --red random --blue alphabeta --max-turns 60`
//!
//! Set `RUST_LOG=info` to see the engines' search lines.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use onitama_engine::engines::engine_alpha_beta::AlphaBetaEngine;
use onitama_engine::engines::engine_random::RandomEngine;
use onitama_engine::engines::engine_trait::{Engine, GoParams};
use onitama_engine::game_state::game::{Game, GameSnapshot};
use onitama_engine::game_state::onitama_types::{Player, Position};
use onitama_engine::utils::render_position::render_position;

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn parse_arg<T: std::str::FromStr>(flag: &str) -> Result<Option<T>, String> {
    match arg_value(flag) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("invalid value for {flag}: {raw}")),
        None => Ok(None),
    }
}

fn build_engine(kind: &str, depth: u8, rng: &mut StdRng) -> Result<Box<dyn Engine>, String> {
    match kind {
        "alphabeta" => Ok(Box::new(AlphaBetaEngine::with_depth(depth))),
        "random" => Ok(Box::new(RandomEngine::seeded(rng.random()))),
        other => Err(format!("unknown engine '{other}', expected alphabeta or random")),
    }
}

fn print_board(game: &Game) -> Result<(), String> {
    let (position, table) = Position::from_snapshot(game).map_err(|e| e.to_string())?;
    println!("{}\n", render_position(&position, &table));
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let depth = parse_arg::<u8>("--depth")?.unwrap_or(3).max(1);
    let max_turns = parse_arg::<u32>("--max-turns")?.unwrap_or(100);
    let movetime_ms = parse_arg::<u64>("--movetime")?;
    let mut rng = match parse_arg::<u64>("--seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut game = match arg_value("--cards") {
        Some(list) => {
            let names: Vec<&str> = list.split(',').map(str::trim).collect();
            Game::from_names(&names).map_err(|e| e.to_string())?
        }
        None => Game::random(&mut rng),
    };

    let red_kind = arg_value("--red").unwrap_or_else(|| "alphabeta".to_owned());
    let blue_kind = arg_value("--blue").unwrap_or_else(|| "alphabeta".to_owned());
    let mut red = build_engine(&red_kind, depth, &mut rng)?;
    let mut blue = build_engine(&blue_kind, depth, &mut rng)?;
    let params = GoParams {
        depth: Some(depth),
        movetime_ms,
    };

    println!(
        "self-play: red={} blue={} depth={depth}",
        red.name(),
        blue.name()
    );
    print_board(&game)?;

    for turn in 1..=max_turns {
        if let Some(winner) = game.check_victory() {
            println!("{winner} wins after {} moves", game.moves().len());
            return Ok(());
        }

        let player = game.active_player();
        let engine = match player {
            Player::Red => &mut red,
            Player::Blue => &mut blue,
        };
        let out = engine
            .choose_move(&game, &params)
            .map_err(|e| e.to_string())?;
        for line in &out.info_lines {
            info!("{} {}: {line}", player, engine.name());
        }

        let Some(mv) = out.best_move else {
            println!("{player} has no legal move");
            return Ok(());
        };
        println!("{turn}. {player} plays {mv} (score {})", out.score);
        game.do_move(mv).map_err(|e| e.to_string())?;
        print_board(&game)?;
    }

    match game.check_victory() {
        Some(winner) => println!("{winner} wins after {} moves", game.moves().len()),
        None => println!("no result after {max_turns} turns"),
    }
    Ok(())
}
