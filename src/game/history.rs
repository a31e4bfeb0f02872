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

use serde::{Deserialize, Serialize};
use super::{code::*, prelude::*, score::*, universe::*};

///
/// One turn taken against a fixed (unknown) secret: the code that was guessed and the feedback it
/// received. A match's history is just a slice of these, in the order they were played.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: DigitCode,
    pub dead: u8,
    pub wounded: u8,
}

impl GuessRecord {
    pub fn new(guess: DigitCode, score: Score) -> Self {
        Self {
            guess,
            dead: score.dead,
            wounded: score.wounded,
        }
    }

    /// Scores the guess against the secret and records the result
    pub fn scored(secret: &DigitCode, guess: DigitCode) -> Self {
        Self::new(guess, score(secret, &guess))
    }

    pub fn score(&self) -> Score {
        Score {
            dead: self.dead,
            wounded: self.wounded,
        }
    }

    pub fn is_win(&self) -> bool {
        self.score().is_win()
    }

    ///
    /// Tests whether a candidate secret is consistent with this record: if the candidate were the
    /// secret, would this guess have received exactly this feedback?
    ///
    pub fn allows(&self, candidate: &DigitCode) -> bool {
        score(candidate, &self.guess) == self.score()
    }
}

///
/// The codes that could still be the secret given some history.
///
/// This is derived, never stored: every call to from_history filters the whole universe again.
/// The true secret is always in the pool as long as the history was honestly scored against it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    codes: Vec<DigitCode>,
}

impl CandidatePool {
    pub fn from_history(history: &[GuessRecord]) -> Self {
        let codes: Vec<DigitCode> = all_codes()
            .iter()
            .copied()
            .filter(|candidate| is_code_allowed_by_history(history, candidate))
            .collect();

        log::debug!(
            "{} of {} codes remain after {} guesses",
            codes.len(),
            NUM_CODES,
            history.len()
        );

        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &DigitCode) -> bool {
        // the universe is sorted and filtering keeps that order
        self.codes.binary_search(code).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DigitCode> + '_ {
        self.codes.iter()
    }

    pub fn as_slice(&self) -> &[DigitCode] {
        &self.codes
    }

    ///
    /// How many bits of information are still needed to pin down the secret. Every remaining code
    /// is equally likely, so this is just log2 of the pool size.
    ///
    pub fn uncertainty(&self) -> SolverFloat {
        if self.codes.len() <= 1 {
            0.0
        } else {
            (self.codes.len() as SolverFloat).log2()
        }
    }
}

/// Whether a candidate is consistent with every record in the history
pub fn is_code_allowed_by_history(history: &[GuessRecord], candidate: &DigitCode) -> bool {
    history.iter().all(|record| record.allows(candidate))
}
