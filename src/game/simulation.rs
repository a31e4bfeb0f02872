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

use rand::Rng;
use super::{code::*, history::*, solver::*};

///
/// The result of letting the AI play against a fixed secret.
///
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub secret: DigitCode,
    /// every guess the AI made, in order, with the feedback it got
    pub history: Vec<GuessRecord>,
    /// whether the last guess was the secret (false if max_turns ran out first)
    pub solved: bool,
}

impl PlayOutcome {
    pub fn turns(&self) -> usize {
        self.history.len()
    }
}

///
/// Plays one side of a match: the AI guesses, the guess is scored against the secret and recorded,
/// and this repeats until the AI wins or max_turns guesses have been made.
///
/// This is the loop a match runner performs on the AI's turns (and all of practice mode, where the
/// AI is the only guesser).
///
pub fn play_out<R: Rng + ?Sized>(solver: &Solver, secret: DigitCode, max_turns: usize, rng: &mut R) -> PlayOutcome {
    let mut history = Vec::new();
    let mut solved = false;

    while !solved && history.len() < max_turns {
        let guess = solver.next_guess_with_rng(&history, rng);
        let record = GuessRecord::scored(&secret, guess);
        solved = record.is_win();
        history.push(record);
    }

    PlayOutcome {
        secret,
        history,
        solved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{all_codes, Difficulty};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_case::test_case;

    #[test_case(Difficulty::Medium)]
    #[test_case(Difficulty::Hard)]
    fn test_secret_never_filtered_out(difficulty: Difficulty) {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let solver = Solver::new(difficulty);
        for _ in 0..25 {
            let secret = random_code_with(&mut rng);
            let outcome = play_out(&solver, secret, 20, &mut rng);
            assert!(outcome.solved, "{} did not solve {:?}", difficulty, secret);

            for turn in 0..outcome.turns() {
                let pool = CandidatePool::from_history(&outcome.history[..turn]);
                assert!(pool.contains(&secret), "secret {:?} lost after {} turns", secret, turn);
            }
        }
    }

    #[test]
    fn test_hard_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let solver = Solver::new(Difficulty::Hard);
        let secrets: Vec<DigitCode> = all_codes().choose_multiple(&mut rng, 60).copied().collect();

        let mut total = 0;
        for secret in secrets.iter().copied() {
            let outcome = play_out(&solver, secret, 12, &mut rng);
            assert!(outcome.solved);
            assert!(outcome.turns() <= 8, "took {} turns to find {:?}", outcome.turns(), secret);
            total += outcome.turns();
        }

        let average = total as f64 / secrets.len() as f64;
        assert!(average < 6.5, "average of {} turns is too slow", average);
    }

    #[test]
    fn test_medium_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let solver = Solver::new(Difficulty::Medium);
        for _ in 0..40 {
            let secret = random_code_with(&mut rng);
            let outcome = play_out(&solver, secret, 15, &mut rng);
            assert!(outcome.solved, "medium did not solve {:?}", secret);
        }
    }

    #[test]
    fn test_easy_does_not_learn() {
        // easy guesses uniformly at random, so turns to win is geometric with mean 5040... anything
        // that filters would win within 10 or so
        let mut rng = ChaCha8Rng::seed_from_u64(44);
        let solver = Solver::new(Difficulty::Easy);
        let secret: DigitCode = "3857".parse().unwrap();

        let games = 100;
        let total: usize = (0..games)
            .map(|_| play_out(&solver, secret, 200_000, &mut rng).turns())
            .sum();
        let average = total as f64 / games as f64;
        assert!(average > 2500.0, "easy averaged {} turns, it should not be learning", average);
    }

    #[test]
    fn test_max_turns_stops_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(45);
        let solver = Solver::new(Difficulty::Easy);
        let outcome = play_out(&solver, "0123".parse().unwrap(), 3, &mut rng);
        assert!(outcome.turns() <= 3);
        assert_eq!(outcome.solved, outcome.history.last().map(|r| r.is_win()).unwrap_or(false));
    }
}
