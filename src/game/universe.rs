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

use lazy_static::lazy_static;
use super::{code::*, prelude::*};

lazy_static! {
    ///
    /// Every valid code, in ascending order ("0123" first, "9876" last).
    ///
    /// This is the entire search space of the game. It is built once, the first time anything
    /// touches it, and is never mutated afterwards, so it can be shared between any number of
    /// threads without locking.
    ///
    pub static ref ALL_CODES: Vec<DigitCode> = build_universe();
}

fn build_universe() -> Vec<DigitCode> {
    let mut out = Vec::with_capacity(NUM_CODES);
    for a in 0..NUM_DIGITS as u8 {
        for b in (0..NUM_DIGITS as u8).filter(|b| *b != a) {
            for c in (0..NUM_DIGITS as u8).filter(|c| *c != a && *c != b) {
                for d in (0..NUM_DIGITS as u8).filter(|d| *d != a && *d != b && *d != c) {
                    out.push(DigitCode::from_digits_unchecked([a, b, c, d]));
                }
            }
        }
    }

    log::debug!("built universe of {} codes", out.len());
    out
}

/// Returns every valid code. Same data as ALL_CODES, as a slice.
pub fn all_codes() -> &'static [DigitCode] {
    ALL_CODES.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_universe_size() {
        assert_eq!(all_codes().len(), NUM_CODES);
    }

    #[test]
    fn test_universe_unique_and_sorted() {
        let unique: HashSet<DigitCode> = all_codes().iter().copied().collect();
        assert_eq!(unique.len(), NUM_CODES);
        assert!(all_codes().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all_codes()[0].to_string(), "0123");
        assert_eq!(all_codes()[NUM_CODES - 1].to_string(), "9876");
    }

    #[test]
    fn test_universe_all_valid() {
        for code in all_codes() {
            assert!(validate(&code.to_string()).is_ok(), "{:?}", code);
        }
    }
}
