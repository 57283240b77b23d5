//! Perft throughput and divide output for profiling move generation.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p dreamer_core -- [depth] [fen]
//!   cargo run --release --example perft_bench -p dreamer_core -- divide 4 [fen]

use dreamer_core::{Board, STARTPOS_FEN, move_to_uci, perft, perft_divide};
use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

const SUITE: &[(&str, &str)] = &[
    ("Starting position", STARTPOS_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { nodes as f64 / secs } else { 0.0 }
}

fn board_from(fen: Option<&String>) -> Result<Board, String> {
    let fen = fen.map_or(STARTPOS_FEN, String::as_str);
    Board::from_fen(fen).map_err(|e| format!("bad FEN '{fen}': {e}"))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let divide = args.first().is_some_and(|a| a == "divide");
    let rest = if divide { &args[1..] } else { &args[..] };
    let depth: u8 = rest.first().and_then(|s| s.parse().ok()).unwrap_or(5);

    let result = match (divide, rest.get(1)) {
        (true, fen) => board_from(fen).map(|board| run_divide(board, depth)),
        (false, Some(fen)) => board_from(Some(fen)).map(|board| run_single(board, depth)),
        (false, None) => {
            run_suite(depth);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_divide(mut board: Board, depth: u8) {
    let mut total = 0;
    for (mv, nodes) in perft_divide(&mut board, depth) {
        println!("{}: {nodes}", move_to_uci(mv));
        total += nodes;
    }
    println!();
    println!("Nodes searched: {total}");
}

fn run_single(mut board: Board, depth: u8) {
    println!("Position: {}", board.to_fen());
    println!("Depth: {depth}");

    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_suite(depth: u8) {
    println!("=== Perft suite, depth {depth} ===");

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in SUITE {
        let Ok(mut board) = Board::from_fen(fen) else {
            eprintln!("{name}: unparsable FEN");
            continue;
        };
        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();
        total_nodes += nodes;
        total_time += elapsed;
        println!(
            "{name:.<30} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
