/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use std::path::PathBuf;
use std::time::Instant;
use anyhow::Context;
use clap::Parser;
use dead_wounded::game::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Lets the AI play against many secrets and reports how many turns it needed.
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Measure how quickly each AI difficulty finds the secret")]
struct Args {
    /// easy, medium or hard
    #[arg(short, long, default_value = "hard")]
    difficulty: Difficulty,
    /// number of random secrets to play against (every secret when omitted)
    #[arg(short, long)]
    games: Option<usize>,
    /// give up on a game after this many guesses
    #[arg(long, default_value = "50")]
    max_turns: usize,
    #[arg(long, default_value = "42")]
    seed: u64,
    /// JSON file overriding the hard AI tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => HardTuning::read(path).context("loading hard tuning")?,
        None => HardTuning::default(),
    };
    let solver = Solver::with_tuning(args.difficulty, tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let secrets: Vec<DigitCode> = match args.games {
        Some(n) => (0..n).map(|_| random_code_with(&mut rng)).collect(),
        None => {
            let mut all = all_codes().to_vec();
            all.shuffle(&mut rng);
            all
        }
    };
    log::info!("playing {} against {} secrets", solver.difficulty(), secrets.len());

    let start_at = Instant::now();
    let mut histogram = vec![0usize; args.max_turns + 1];
    let mut unsolved = 0;
    let mut total_turns = 0;
    for (idx, secret) in secrets.iter().enumerate() {
        let outcome = play_out(&solver, *secret, args.max_turns, &mut rng);
        if outcome.solved {
            histogram[outcome.turns()] += 1;
            total_turns += outcome.turns();
        } else {
            unsolved += 1;
            log::debug!("gave up on {} after {} turns", secret, outcome.turns());
        }

        if (idx + 1) % 500 == 0 {
            log::info!("{} / {} games done", idx + 1, secrets.len());
        }
    }
    let dur = start_at.elapsed();

    let solved = secrets.len() - unsolved;
    println!("difficulty: {}", solver.difficulty());
    println!("games: {} ({} solved, {} gave up)", secrets.len(), solved, unsolved);
    if solved > 0 {
        let worst = histogram.iter().rposition(|n| *n > 0).unwrap_or(0);
        println!("average turns: {:.3}", total_turns as f64 / solved as f64);
        println!("worst game: {} turns", worst);
        for (turns, n) in histogram.iter().enumerate().filter(|(_, n)| **n > 0) {
            println!("  {:>3} turns: {:>5}", turns, n);
        }
    }
    eprintln!("done in {:.2}s", dur.as_secs_f64());

    Ok(())
}
