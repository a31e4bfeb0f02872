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

// This file allows you to configure some of the constants that define the game of dead & wounded
// and the default tuning of the AI opponent.
//
// The game itself is fixed at 4 distinct digits. The solver constants at the bottom are empirical
// tuning values and can be overridden at runtime through HardTuning (see solver.rs).


// how many digits are in a code?
pub const CODE_SIZE: usize = 4;
// how many distinct digits can appear in a code (0 through 9)
pub const NUM_DIGITS: usize = 10;
// how many valid codes exist? 10 * 9 * 8 * 7
pub const NUM_CODES: usize = 5040;

// the fixed opening guess played by the medium AI
pub const MEDIUM_OPENER: &str = "0123";
// the strong openers the hard AI picks between for its first guess
pub const HARD_OPENERS: [&str; 4] = ["0123", "0167", "1234", "5678"];

// when the candidate pool is larger than this, the hard AI only evaluates a random sample of this
// many guesses
pub const SAMPLE_SIZE: usize = 300;
// how far (as a fraction) above the best worst-case a guess may be and still be "acceptable"
pub const RELAXATION_MARGIN: SolverFloat = 0.15;
// how many of the highest entropy acceptable guesses the hard AI picks between
pub const TOP_PICKS: usize = 5;
// hard upper bound on TOP_PICKS (TopK works on fixed size arrays)
pub const MAX_TOP_PICKS: usize = 16;
// how many openers rank_openers prints
pub const N_RECOMMENDATIONS: usize = 32;

// This type allows you to switch between using f64 for all calculations and f32 if you so desire.
pub type SolverFloat = f64;

pub use crate::util::*;

/// Converts an ASCII digit ('0'..='9') to its value. Returns None for anything else.
pub fn digit_value(c: char) -> Option<u8> {
    c.to_digit(10).map(|d| d as u8)
}

/// Verifies that every byte is a digit value (not ASCII, the value 0..=9) and that no digit is
/// repeated. This is the invariant held by every DigitCode.
pub fn is_code_digits(digits: &[u8]) -> bool {
    if digits.len() != CODE_SIZE {
        return false;
    }

    let mut seen = [false; NUM_DIGITS];
    for d in digits {
        let idx = *d as usize;
        if idx >= NUM_DIGITS || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }

    true
}
