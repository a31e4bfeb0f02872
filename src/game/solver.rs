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

use std::cmp::{Ordering, Reverse};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::{code::*, history::*, prelude::*, score::*};

lazy_static! {
    static ref MEDIUM_OPENING: DigitCode =
        MEDIUM_OPENER.parse().expect("MEDIUM_OPENER should be a valid code");
    static ref HARD_OPENINGS: Vec<DigitCode> = HARD_OPENERS
        .iter()
        .map(|s| s.parse().expect("HARD_OPENERS should all be valid codes"))
        .collect();
}

///
/// How strong the AI opponent plays. This selects behavior only, it holds no state.
///
///   * Easy = random guesses, never learns anything from feedback
///   * Medium = a random guess among the codes that could still be the secret
///   * Hard = a near-minimax search over the codes that could still be the secret
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyErr(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| ParseDifficultyErr(s.to_string()))
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

///
/// How the hard AI turns its evaluations into a choice.
///
///   * Relaxed = any guess within a margin of the best worst-case is acceptable, then a random pick
///               among the highest entropy acceptable guesses. Near optimal, but not predictable.
///   * Minimax = the smallest worst-case, ties broken by entropy.
///   * MaxEntropy = the highest entropy, ties broken by worst-case.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardStrategy {
    #[default]
    Relaxed,
    Minimax,
    MaxEntropy,
}

///
/// Tuning for the hard AI. The defaults are the values from prelude.rs; a partial config (for
/// example `{"relaxation_margin": 0.25}`) deserializes with everything else left at the default.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardTuning {
    /// evaluate at most this many guesses per turn (a random sample of the pool)
    pub sample_size: usize,
    /// fraction above the best worst-case that is still acceptable (Relaxed only)
    pub relaxation_margin: SolverFloat,
    /// how many of the best acceptable guesses to pick between (Relaxed only, max MAX_TOP_PICKS)
    pub top_picks: usize,
    /// opening guesses, one is picked at random
    pub openers: Vec<DigitCode>,
    pub strategy: HardStrategy,
}

impl Default for HardTuning {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            relaxation_margin: RELAXATION_MARGIN,
            top_picks: TOP_PICKS,
            openers: HARD_OPENINGS.clone(),
            strategy: HardStrategy::default(),
        }
    }
}

impl HardTuning {
    ///
    /// The largest worst-case that still counts as acceptable, given the best one seen:
    /// max(best + 1, ceil(best * (1 + margin)))
    ///
    pub fn acceptable_worst_case(&self, min_worst_case: usize) -> usize {
        let relaxed = (min_worst_case as SolverFloat * (1.0 + self.relaxation_margin)).ceil();
        let relaxed = if relaxed.is_finite() && relaxed > 0.0 {
            relaxed as usize
        } else {
            0
        };

        relaxed.max(min_worst_case + 1)
    }

    fn effective_top_picks(&self) -> usize {
        self.top_picks.clamp(1, MAX_TOP_PICKS)
    }

    /// Reads tuning from a JSON file. Missing fields keep their defaults.
    pub fn read(path: &Path) -> Result<Self, LoadTuningErr> {
        let raw = fs::read_to_string(path).map_err(|source| LoadTuningErr::Io {
            path: path.display().to_string(),
            source,
        })?;

        let tuning: HardTuning = serde_json::from_str(&raw).map_err(|source| LoadTuningErr::Malformed {
            path: path.display().to_string(),
            source,
        })?;

        if tuning.openers.is_empty() {
            log::warn!("tuning in {} has no openers, hard will open with a random guess", path.display());
        }

        Ok(tuning)
    }
}

#[derive(Error, Debug)]
pub enum LoadTuningErr {
    #[error("unable to read tuning file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning file '{path}'")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

///
/// What we learn about a guess by splitting the candidate pool according to the score each
/// candidate would give it.
///
///   * worst_case = size of the largest group. If the secret lands in that group this is how many
///                  candidates remain. Smaller is better.
///   * entropy = Shannon entropy (bits) of the group sizes, the expected information gained by
///               the guess. Larger is better.
///
/// Evaluations compare by quality: smaller worst_case is better, then larger entropy. The guess
/// itself does not take part in comparisons.
///
#[derive(Copy, Clone, Debug)]
pub struct GuessEvaluation {
    pub guess: DigitCode,
    pub worst_case: usize,
    pub entropy: SolverFloat,
}

impl PartialEq<Self> for GuessEvaluation {
    fn eq(&self, other: &Self) -> bool {
        self.worst_case == other.worst_case && self.entropy == other.entropy
    }
}

impl PartialOrd<Self> for GuessEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match other.worst_case.cmp(&self.worst_case) {
            Ordering::Equal => self.entropy.partial_cmp(&other.entropy),
            ord => Some(ord),
        }
    }
}

///
/// Partitions the pool by the score each member would give to the guess, and summarizes the
/// partition.
///
/// The partition is an array with one bucket per Score::to_code(), so this never allocates.
///
pub fn evaluate_guess(guess: &DigitCode, pool: &[DigitCode]) -> GuessEvaluation {
    let mut buckets = [0usize; Score::NUM_STATES];
    for candidate in pool {
        buckets[score(candidate, guess).to_code() as usize] += 1;
    }

    let total = pool.len() as SolverFloat;
    let mut worst_case: usize = 0;
    let mut entropy: SolverFloat = 0.0;
    for count in buckets {
        if count == 0 {
            continue;
        }

        worst_case = worst_case.max(count);
        let p = count as SolverFloat / total;
        entropy -= p * p.log2();
    }

    GuessEvaluation {
        guess: *guess,
        worst_case,
        entropy,
    }
}

///
/// The AI opponent: picks the next guess for a difficulty given everything guessed so far.
///
/// A Solver has no memory between turns. Every call rebuilds the candidate pool from the history
/// it is given, so it can be shared freely (it is Send + Sync and never mutated) and survives
/// restarts of whatever is holding the history.
///
#[derive(Debug, Clone, Default)]
pub struct Solver {
    difficulty: Difficulty,
    tuning: HardTuning,
}

impl Solver {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_tuning(difficulty, HardTuning::default())
    }

    pub fn with_tuning(difficulty: Difficulty, tuning: HardTuning) -> Self {
        Self { difficulty, tuning }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tuning(&self) -> &HardTuning {
        &self.tuning
    }

    /// Picks the next guess using the thread local rng
    pub fn next_guess(&self, history: &[GuessRecord]) -> DigitCode {
        self.next_guess_with_rng(history, &mut rand::thread_rng())
    }

    ///
    /// Picks the next guess, drawing all randomness from the given rng.
    ///
    /// This never fails. A history that no code is consistent with (which honest play can't
    /// produce) falls back to a random guess.
    ///
    pub fn next_guess_with_rng<R: Rng + ?Sized>(&self, history: &[GuessRecord], rng: &mut R) -> DigitCode {
        use Difficulty::*;
        let guess = match self.difficulty {
            Easy => random_code_with(rng),
            Medium => self.medium_guess(history, rng),
            Hard => self.hard_guess(history, rng),
        };

        log::debug!("{} ai guesses {} on turn {}", self.difficulty, guess, history.len() + 1);
        guess
    }

    fn medium_guess<R: Rng + ?Sized>(&self, history: &[GuessRecord], rng: &mut R) -> DigitCode {
        if history.is_empty() {
            return *MEDIUM_OPENING;
        }

        let pool = CandidatePool::from_history(history);
        match pool.as_slice().choose(rng) {
            Some(guess) => *guess,
            None => fallback_guess(rng),
        }
    }

    fn hard_guess<R: Rng + ?Sized>(&self, history: &[GuessRecord], rng: &mut R) -> DigitCode {
        if history.is_empty() {
            return match self.tuning.openers.choose(rng) {
                Some(opener) => *opener,
                None => random_code_with(rng),
            };
        }

        let pool = CandidatePool::from_history(history);
        match pool.as_slice() {
            [] => return fallback_guess(rng),
            [only] => return *only,
            _ => {}
        }

        // evaluating every member of a large pool is quadratic, so only a sample of guesses is
        // considered... but each one is always evaluated against the whole pool
        let evaluations: Vec<GuessEvaluation> = if pool.len() > self.tuning.sample_size {
            pool.as_slice()
                .choose_multiple(rng, self.tuning.sample_size)
                .map(|guess| evaluate_guess(guess, pool.as_slice()))
                .collect()
        } else {
            pool.iter()
                .map(|guess| evaluate_guess(guess, pool.as_slice()))
                .collect()
        };

        let picked = match self.tuning.strategy {
            HardStrategy::Relaxed => self.pick_relaxed(evaluations, rng),
            HardStrategy::Minimax => {
                let best: TopK<GuessEvaluation, 1> = evaluations.into_iter().top_k(|e| *e);
                best.map(|e| e.guess).next()
            }
            HardStrategy::MaxEntropy => {
                let best: TopK<GuessEvaluation, 1> = evaluations
                    .into_iter()
                    .top_k(|e| (e.entropy, Reverse(e.worst_case)));
                best.map(|e| e.guess).next()
            }
        };

        picked.unwrap_or_else(|| fallback_guess(rng))
    }

    ///
    /// The default hard behavior.
    ///
    /// Strict minimax would always play the same guess in the same position, which makes the AI
    /// easy to learn. Instead every guess whose worst-case is within the relaxation margin of the
    /// best is "acceptable", the acceptable guesses are ranked by entropy, and one of the top few is
    /// picked at random.
    ///
    fn pick_relaxed<R: Rng + ?Sized>(&self, evaluations: Vec<GuessEvaluation>, rng: &mut R) -> Option<DigitCode> {
        let min_worst_case = evaluations.iter().map(|e| e.worst_case).min()?;
        let acceptable = self.tuning.acceptable_worst_case(min_worst_case);

        let top: Vec<GuessEvaluation> = evaluations
            .into_iter()
            .filter(|e| e.worst_case <= acceptable)
            .top_k::<SolverFloat, _, MAX_TOP_PICKS>(|e| e.entropy)
            .take(self.tuning.effective_top_picks())
            .collect();

        log::trace!(
            "best worst-case {}, accepting up to {}, picking from {} guesses",
            min_worst_case,
            acceptable,
            top.len()
        );

        top.choose(rng).map(|e| e.guess)
    }

    ///
    /// Evaluates the given guesses against a pool and returns the best K by quality (smallest
    /// worst-case, then highest entropy). Used to study openers, where the pool is the universe.
    ///
    pub fn rank_guesses<'a, I, const K: usize>(guesses: I, pool: &[DigitCode]) -> TopK<GuessEvaluation, K>
        where
            I: IntoIterator<Item = &'a DigitCode>,
            [Option<GuessEvaluation>; K]: Default,
    {
        guesses
            .into_iter()
            .map(|guess| evaluate_guess(guess, pool))
            .top_k(|e| *e)
    }
}

fn fallback_guess<R: Rng + ?Sized>(rng: &mut R) -> DigitCode {
    log::debug!("no candidates remain for this history, falling back to a random guess");
    random_code_with(rng)
}

/// Picks the next guess for the difficulty with default tuning.
pub fn next_guess(difficulty: Difficulty, history: &[GuessRecord]) -> DigitCode {
    Solver::new(difficulty).next_guess(history)
}

/// Like next_guess, drawing randomness from the given rng.
pub fn next_guess_with_rng<R: Rng + ?Sized>(difficulty: Difficulty, history: &[GuessRecord], rng: &mut R) -> DigitCode {
    Solver::new(difficulty).next_guess_with_rng(history, rng)
}
