//! Raw enumeration throughput runner.
//!
//! Usage:
//! `cargo run --release --bin tree_throughput`
//! `cargo run --release --bin tree_throughput -- --depth 5 --mode dfs`
//! `cargo run --release --bin tree_throughput -- --cards ox,frog,rabbit,eel,cobra --mode perft`
//!
//! Modes: `bfs`, `dfs`, `perft` or `all` (default). Without `--cards` the
//! five-Tigers opening is used.

use std::time::Instant;

use chrono::Utc;

use onitama_engine::game_state::cards::CardKind;
use onitama_engine::game_state::game::Game;
use onitama_engine::game_state::onitama_types::Position;
use onitama_engine::move_generation::perft::perft;
use onitama_engine::search::board_scoring::MobilityEvaluator;
use onitama_engine::search::search_engine::SearchEngine;
use onitama_engine::search::tree_generation::TraversalOrder;

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn parse_arg_u8(flag: &str, default: u8) -> Result<u8, String> {
    match arg_value(flag) {
        Some(raw) => raw
            .parse::<u8>()
            .map(|v| v.max(1))
            .map_err(|_| format!("invalid value for {flag}: {raw}")),
        None => Ok(default),
    }
}

fn kilonodes_per_second(nodes: usize, elapsed_ms: u128) -> f64 {
    nodes as f64 / elapsed_ms.max(1) as f64
}

fn run_tree(game: &Game, depth: u8, order: TraversalOrder) -> Result<(), String> {
    let mut engine =
        SearchEngine::from_game(game, MobilityEvaluator::default()).map_err(|e| e.to_string())?;
    let started = Instant::now();
    let total = engine.generate_tree(depth, order);
    let elapsed_ms = started.elapsed().as_millis();
    let counts = engine.node_counts(depth);
    let terminals: Vec<usize> = (0..=depth)
        .map(|level| {
            engine
                .get_nodes(level)
                .into_iter()
                .filter(|&id| engine.tree().node(id).terminal)
                .count()
        })
        .collect();
    println!(
        "{order:?}: depth={depth} total_nodes={total} per_level={counts:?} terminal_per_level={terminals:?} elapsed_ms={elapsed_ms} knps={:.1}",
        kilonodes_per_second(total, elapsed_ms)
    );
    Ok(())
}

fn run_perft(game: &Game, depth: u8) -> Result<(), String> {
    let (mut position, table) = Position::from_snapshot(game).map_err(|e| e.to_string())?;
    for level in 1..=depth {
        let started = Instant::now();
        let counts = perft(&mut position, &table, level);
        let elapsed_ms = started.elapsed().as_millis();
        println!(
            "perft: depth={level} nodes={} captures={} king_captures={} goal_reaches={} terminals={} elapsed_ms={elapsed_ms} knps={:.1}",
            counts.nodes,
            counts.captures,
            counts.king_captures,
            counts.goal_reaches,
            counts.terminals,
            kilonodes_per_second(counts.nodes, elapsed_ms)
        );
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let depth = parse_arg_u8("--depth", 4)?;
    let mode = arg_value("--mode").unwrap_or_else(|| "all".to_owned());
    let game = match arg_value("--cards") {
        Some(list) => {
            let names: Vec<&str> = list.split(',').map(str::trim).collect();
            Game::from_names(&names).map_err(|e| e.to_string())?
        }
        None => Game::new([CardKind::Tiger; 5]),
    };

    println!(
        "tree throughput run: {} depth={depth} mode={mode}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    match mode.as_str() {
        "all" => {
            run_tree(&game, depth, TraversalOrder::BreadthFirst)?;
            run_tree(&game, depth, TraversalOrder::DepthFirst)?;
            run_perft(&game, depth)
        }
        "perft" => run_perft(&game, depth),
        other => {
            let order = TraversalOrder::from_name(other)
                .ok_or_else(|| format!("unknown mode '{other}', expected bfs, dfs, perft or all"))?;
            run_tree(&game, depth, order)
        }
    }
}
