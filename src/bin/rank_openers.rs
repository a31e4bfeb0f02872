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

use std::io::{self, Write};
use std::time::{Duration, Instant};
use clap::Parser;
use dead_wounded::game::*;
use tracing_subscriber::EnvFilter;

/// Scores every possible first guess against every possible secret.
#[derive(Parser, Debug)]
#[command(name = "rank_openers")]
#[command(about = "Rank opening guesses by worst case, then by expected information")]
struct Args {
    /// also evaluate these codes and print where they stand
    #[arg(long, value_delimiter = ',')]
    check: Vec<DigitCode>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let (dur, ranked): (Duration, Vec<GuessEvaluation>) = timed(|| {
        Solver::rank_guesses::<_, { N_RECOMMENDATIONS }>(all_codes(), all_codes()).collect()
    });

    // one line per opener: code, worst case, entropy (space separated)
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for item in &ranked {
        writeln!(out, "{} {} {:.6}", item.guess, item.worst_case, item.entropy)?;
    }

    for code in &args.check {
        let eval = evaluate_guess(code, all_codes());
        writeln!(out, "# {} {} {:.6}", eval.guess, eval.worst_case, eval.entropy)?;
    }

    log::info!("ranked {} openers in {:.2}s", NUM_CODES, dur.as_secs_f64());
    Ok(())
}

fn timed<R, F>(f: F) -> (Duration, R)
    where F: FnOnce() -> R
{
    let start_at = Instant::now();
    let out = f();
    let dur = start_at.elapsed();

    (dur, out)
}
