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

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use super::{code::*, prelude::*};

///
/// Any score can be converted to a "code" which uniquely identifies it. This is the type of that
/// number. The range is 0 -> 5*5=25, so a u8 is plenty.
///
pub type ScoreCode = u8;

///
/// The feedback for one guess:
///   * dead = digits of the guess in the same position as in the secret
///   * wounded = digits of the guess present in the secret, but in another position
///
/// dead + wounded never exceeds 4, and dead == 4 means the guess was the secret.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    pub dead: u8,
    pub wounded: u8,
}

impl Score {
    /// The only winning score
    pub const WIN: Score = Score { dead: CODE_SIZE as u8, wounded: 0 };

    /// How many distinct codes to_code() can produce. Not all of them are reachable scores (for
    /// example 3 dead 1 wounded can never happen) but it keeps the coding trivial.
    pub const NUM_STATES: usize = (CODE_SIZE + 1) * (CODE_SIZE + 1);

    pub fn new(dead: u8, wounded: u8) -> Self {
        debug_assert!((dead + wounded) as usize <= CODE_SIZE);
        Self { dead, wounded }
    }

    pub fn is_win(&self) -> bool {
        self.dead as usize == CODE_SIZE
    }

    ///
    /// Computes a number in [0, 25) that uniquely identifies this score.
    ///
    /// The solver keeps one bucket per possible outcome of a guess, and using this code as an index
    /// lets those buckets live in a fixed size array on the stack instead of a HashMap<Score, _>.
    ///
    pub fn to_code(&self) -> ScoreCode {
        self.dead * (CODE_SIZE as u8 + 1) + self.wounded
    }

    /// Converts a ScoreCode back to a Score
    pub fn from_code(code: ScoreCode) -> Option<Self> {
        let base = CODE_SIZE as u8 + 1;
        let (dead, wounded) = (code / base, code % base);
        if dead >= base || (dead + wounded) as usize > CODE_SIZE {
            return None;
        }

        Some(Self { dead, wounded })
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D {}W", self.dead, self.wounded)
    }
}

///
/// Scores a guess against a secret.
///
/// This is done in two passes:
/// * a DEAD pass, which counts exact position matches and "claims" those positions on both sides
/// * a WOUNDED pass, which for every unclaimed guess position looks for the same digit in an
///   unclaimed secret position, consuming that secret position when found
///
/// Consuming secret positions means one secret digit can never satisfy two guess digits. With
/// distinct digits in every code that can't actually happen, but the bookkeeping is kept so the
/// result stays right if that ever stops being true.
///
/// Both arguments are expected to be valid codes, which DigitCode guarantees.
///
pub fn score(secret: &DigitCode, guess: &DigitCode) -> Score {
    debug_assert!(is_code_digits(&secret.digits()) && is_code_digits(&guess.digits()));

    let mut dead = 0;
    let mut wounded = 0;
    let mut guess_claimed = [false; CODE_SIZE];
    let mut secret_claimed = [false; CODE_SIZE];

    // DEAD pass
    for i in 0..CODE_SIZE {
        if guess[i] == secret[i] {
            dead += 1;
            guess_claimed[i] = true;
            secret_claimed[i] = true;
        }
    }

    // WOUNDED pass
    for i in 0..CODE_SIZE {
        if guess_claimed[i] {
            continue;
        }

        for j in 0..CODE_SIZE {
            if !secret_claimed[j] && guess[i] == secret[j] {
                wounded += 1;
                secret_claimed[j] = true;
                break;
            }
        }
    }

    Score { dead, wounded }
}

/// Whether the score ends the game (4 dead)
pub fn is_win(score: &Score) -> bool {
    score.is_win()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::all_codes;
    use test_case::test_case;

    fn code(s: &str) -> DigitCode {
        s.parse().expect("test codes should be valid")
    }

    #[test_case("1234", "5678", 0, 0)]
    #[test_case("1234", "1234", 4, 0)]
    #[test_case("1234", "4321", 0, 4)]
    #[test_case("1743", "3854", 0, 2)]
    #[test_case("1743", "3845", 1, 1)]
    #[test_case("1234", "1243", 2, 2)]
    #[test_case("1234", "1324", 2, 2)]
    #[test_case("1234", "1567", 1, 0)]
    #[test_case("0123", "0456", 1, 0)]
    #[test_case("1234", "0234", 3, 0)]
    #[test_case("9081", "1890", 0, 4)]
    fn test_score(secret: &str, guess: &str, dead: u8, wounded: u8) {
        assert_eq!(
            score(&code(secret), &code(guess)),
            Score { dead, wounded },
            "secret={}, guess={}",
            secret,
            guess,
        );
    }

    #[test]
    fn test_score_self_is_win() {
        for c in all_codes() {
            assert_eq!(score(c, c), Score::WIN, "{:?}", c);
        }
    }

    #[test]
    fn test_score_bounds_and_symmetry() {
        // all secrets against a spread of guesses (every 37th code keeps this quick)
        for secret in all_codes() {
            for guess in all_codes().iter().step_by(37) {
                let s = score(secret, guess);
                assert!(s.dead as usize + s.wounded as usize <= CODE_SIZE, "{:?} vs {:?}", secret, guess);
                assert_eq!(s, score(guess, secret), "distinct digits make scoring symmetric");
                assert_eq!(s.is_win(), secret == guess);
            }
        }
    }

    #[test]
    fn test_is_win() {
        assert!(is_win(&Score { dead: 4, wounded: 0 }));
        for dead in 0..4 {
            assert!(!is_win(&Score { dead, wounded: 0 }));
        }
    }

    #[test]
    fn test_score_codes_fit_into_code_type() {
        assert!(Score::NUM_STATES < ScoreCode::MAX as usize);
    }

    #[test]
    fn test_reversible_coding_of_scores() {
        let mut seen = [false; Score::NUM_STATES];
        for dead in 0..=4u8 {
            for wounded in 0..=(4 - dead) {
                let s = Score { dead, wounded };
                let code = s.to_code();
                assert!(!seen[code as usize], "duplicate code {}", code);
                seen[code as usize] = true;
                assert_eq!(Score::from_code(code), Some(s));
            }
        }

        assert_eq!(Score::from_code(Score::NUM_STATES as ScoreCode), None);
        assert_eq!(Score::from_code(Score { dead: 3, wounded: 2 }.to_code()), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::new(1, 2).to_string(), "1D 2W");
    }
}
