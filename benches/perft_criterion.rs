use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use onitama_engine::game_state::cards::{deal_from_names, CardKind, Deal};
use onitama_engine::game_state::game::Game;
use onitama_engine::game_state::onitama_types::Position;
use onitama_engine::move_generation::perft::perft;
use onitama_engine::moves::card_table::CardTable;
use onitama_engine::search::board_scoring::MobilityEvaluator;
use onitama_engine::search::search_engine::SearchEngine;
use onitama_engine::search::tree_generation::TraversalOrder;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    cards: &'static [&'static str],
    max_depth: u8,
}

const FIVE_TIGERS: &[usize] = &[10, 100, 80 * 12 + 16 * 8];

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "five_tigers",
        cards: &["tiger", "tiger", "tiger", "tiger", "tiger"],
        max_depth: 3,
    },
    BenchCase {
        name: "classic",
        cards: &["monkey", "elephant", "crane", "mantis", "tiger"],
        max_depth: 3,
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "five_tigers",
        cards: &["tiger", "tiger", "tiger", "tiger", "tiger"],
        max_depth: 5,
    },
    BenchCase {
        name: "classic",
        cards: &["monkey", "elephant", "crane", "mantis", "tiger"],
        max_depth: 5,
    },
    BenchCase {
        name: "wide",
        cards: &["dragon", "goose", "rooster", "horse", "boar"],
        max_depth: 4,
    },
];

fn standard_suite() -> bool {
    matches!(std::env::var("ONITAMA_BENCH_SUITE"), Ok(value) if value.eq_ignore_ascii_case("standard"))
}

fn selected_cases() -> &'static [BenchCase] {
    if standard_suite() {
        CASES_STANDARD
    } else {
        CASES_QUICK
    }
}

fn case_deal(case: &BenchCase) -> Deal {
    deal_from_names(case.cards).expect("benchmark cards should parse")
}

fn bench_perft(c: &mut Criterion) {
    let suite_name = if standard_suite() { "standard" } else { "quick" };
    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let deal = case_deal(case);
        let (start, table) =
            Position::from_snapshot(&Game::new(deal)).expect("opening snapshot should convert");

        for depth in 1..=case.max_depth {
            let mut position = start.clone();
            let expected = perft(&mut position, &table, depth).nodes;
            // Correctness guard before benchmarking.
            if deal == [CardKind::Tiger; 5] && (depth as usize) <= FIVE_TIGERS.len() {
                assert_eq!(expected, FIVE_TIGERS[depth as usize - 1], "five tigers depth {depth}");
            }

            group.throughput(Throughput::Elements(expected as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                &expected,
                |b, expected| {
                    b.iter(|| {
                        let counts = perft(black_box(&mut position), &table, black_box(depth));
                        assert_eq!(counts.nodes, *expected);
                        black_box(counts.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_tree_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_generation");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let game = Game::new(case_deal(case));
        let depth = case.max_depth.min(4);
        for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
            let mut engine = SearchEngine::from_game(&game, MobilityEvaluator::default())
                .expect("opening snapshot should convert");
            let expected = engine.generate_tree(depth, order);

            group.throughput(Throughput::Elements(expected as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), format!("{}_d{}", case.name, depth)),
                &expected,
                |b, expected| {
                    b.iter(|| {
                        let total = engine.generate_tree(black_box(depth), order);
                        assert_eq!(total, *expected);
                        black_box(total)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_card_table(c: &mut Criterion) {
    c.bench_function("card_table_build", |b| {
        b.iter(|| {
            CardTable::new(black_box([
                CardKind::Dragon,
                CardKind::Goose,
                CardKind::Rooster,
                CardKind::Horse,
                CardKind::Boar,
            ]))
        })
    });
}

criterion_group!(perft_benches, bench_perft, bench_tree_generation, bench_card_table);
criterion_main!(perft_benches);
