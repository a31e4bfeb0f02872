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

use std::convert::TryFrom;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;
use std::str::FromStr;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::prelude::*;

///
/// A secret or a guess: exactly 4 digits, all distinct.
///
/// Stored as digit values (0..=9) rather than ASCII or as a number, so that leading zeros survive
/// ("0123" is a different code from "123"). Every DigitCode that exists has passed the checks in
/// validate(), so the rest of the crate never re-checks this.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitCode([u8; CODE_SIZE]);

///
/// The reasons a string can fail to be a DigitCode. Each variant carries enough detail for a
/// caller to render its own message.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCodeReason {
    #[error("must be exactly 4 digits (got {found})")]
    WrongLength { found: usize },
    #[error("must contain only digits 0-9 (found '{character}' at position {position})")]
    NonDigitCharacter { character: char, position: usize },
    #[error("digits must be unique (no repetition), '{digit}' appears more than once")]
    DuplicateDigit { digit: u8 },
}

///
/// Checks that the input is a valid code, returning the parsed code when it is.
///
/// The checks happen in this order and the first failure is returned:
///   * the input must be exactly 4 characters long
///   * every character must be a digit 0-9
///   * no digit may appear twice
///
pub fn validate(code: &str) -> Result<DigitCode, InvalidCodeReason> {
    let found = code.chars().count();
    if found != CODE_SIZE {
        return Err(InvalidCodeReason::WrongLength { found });
    }

    let mut digits = [0u8; CODE_SIZE];
    for (position, character) in code.chars().enumerate() {
        digits[position] = digit_value(character)
            .ok_or(InvalidCodeReason::NonDigitCharacter { character, position })?;
    }

    let mut seen = [false; NUM_DIGITS];
    for digit in digits {
        let slot = &mut seen[digit as usize];
        if *slot {
            return Err(InvalidCodeReason::DuplicateDigit { digit });
        }
        *slot = true;
    }

    Ok(DigitCode(digits))
}

/// Returns a uniformly random code, using the thread local rng.
pub fn random_code() -> DigitCode {
    random_code_with(&mut rand::thread_rng())
}

///
/// Returns a uniformly random code drawn from the given rng.
///
/// Shuffles all 10 digits and keeps the first 4, so every one of the 5040 codes is equally likely.
///
pub fn random_code_with<R: Rng + ?Sized>(rng: &mut R) -> DigitCode {
    let mut digits = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    digits.shuffle(rng);

    let mut out = [0u8; CODE_SIZE];
    out.copy_from_slice(&digits[..CODE_SIZE]);
    DigitCode(out)
}

impl DigitCode {
    /// Builds a code from digit values, returning None if any value is out of range or repeated.
    pub fn from_digits(digits: [u8; CODE_SIZE]) -> Option<Self> {
        if is_code_digits(&digits) {
            Some(Self(digits))
        } else {
            None
        }
    }

    /// Only for callers that have already established the invariant (the universe builder).
    pub(crate) fn from_digits_unchecked(digits: [u8; CODE_SIZE]) -> Self {
        debug_assert!(is_code_digits(&digits));
        Self(digits)
    }

    pub fn digits(&self) -> [u8; CODE_SIZE] {
        self.0
    }

    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl Index<usize> for DigitCode {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromStr for DigitCode {
    type Err = InvalidCodeReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<&str> for DigitCode {
    type Error = InvalidCodeReason;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate(value)
    }
}

impl TryFrom<String> for DigitCode {
    type Error = InvalidCodeReason;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl From<DigitCode> for String {
    fn from(code: DigitCode) -> Self {
        code.to_string()
    }
}

impl Display for DigitCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for d in self.0 {
            write!(f, "{}", d)?;
        }

        Ok(())
    }
}

// Debug prints like a string so that failing assertions are readable
impl Debug for DigitCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case("1234")]
    #[test_case("0123")]
    #[test_case("9876")]
    #[test_case("5078")]
    fn test_validate_accepts(input: &str) {
        let code = validate(input).expect("should be valid");
        assert_eq!(code.to_string(), input, "should round trip including leading zeros");
    }

    #[test_case("", InvalidCodeReason::WrongLength { found: 0 })]
    #[test_case("123", InvalidCodeReason::WrongLength { found: 3 })]
    #[test_case("12345", InvalidCodeReason::WrongLength { found: 5 })]
    #[test_case("12ab", InvalidCodeReason::NonDigitCharacter { character: 'a', position: 2 })]
    #[test_case(" 123", InvalidCodeReason::NonDigitCharacter { character: ' ', position: 0 })]
    #[test_case("12\u{e9}4", InvalidCodeReason::NonDigitCharacter { character: '\u{e9}', position: 2 } ; "multibyte character counts once")]
    #[test_case("1123", InvalidCodeReason::DuplicateDigit { digit: 1 })]
    #[test_case("1111", InvalidCodeReason::DuplicateDigit { digit: 1 })]
    #[test_case("1a1a", InvalidCodeReason::NonDigitCharacter { character: 'a', position: 1 })]
    #[test_case("11", InvalidCodeReason::WrongLength { found: 2 })]
    fn test_validate_rejects(input: &str, expected: InvalidCodeReason) {
        assert_eq!(validate(input), Err(expected), "input={:?}", input);
    }

    #[test]
    fn test_validate_matches_definition() {
        // every 4 character string over a small alphabet, checked against the plain definition
        let alphabet = ['0', '1', '2', '3', 'x'];
        for a in alphabet {
            for b in alphabet {
                for c in alphabet {
                    for d in alphabet {
                        let s: String = [a, b, c, d].iter().collect();
                        let distinct: HashSet<char> = s.chars().collect();
                        let expected = s.chars().all(|c| c.is_ascii_digit()) && distinct.len() == 4;
                        assert_eq!(validate(&s).is_ok(), expected, "input={}", s);
                    }
                }
            }
        }
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let messages: HashSet<String> = ["123", "12ab", "1123"]
            .iter()
            .map(|s| validate(s).unwrap_err().to_string())
            .collect();
        assert_eq!(messages.len(), 3, "{:?}", messages);
    }

    #[test]
    fn test_random_code_always_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let code = random_code_with(&mut rng);
            assert!(validate(&code.to_string()).is_ok(), "generated invalid code {}", code);
        }
    }

    #[test]
    fn test_random_code_varies() {
        let seen: HashSet<DigitCode> = (0..20).map(|_| random_code()).collect();
        assert!(seen.len() > 1, "random codes should vary");
    }

    #[test]
    fn test_random_code_covers_every_digit_in_every_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [[false; NUM_DIGITS]; CODE_SIZE];
        for _ in 0..2000 {
            let code = random_code_with(&mut rng);
            for (pos, d) in code.digits().iter().enumerate() {
                seen[pos][*d as usize] = true;
            }
        }
        assert!(seen.iter().flatten().all(|v| *v));
    }

    #[test]
    fn test_from_digits() {
        assert_eq!(DigitCode::from_digits([0, 1, 2, 3]), Some("0123".parse().unwrap()));
        assert_eq!(DigitCode::from_digits([0, 1, 2, 2]), None);
        assert_eq!(DigitCode::from_digits([0, 1, 2, 10]), None);
    }

    #[test]
    fn test_serde_as_string() {
        let code: DigitCode = "0451".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"0451\"");
        assert_eq!(serde_json::from_str::<DigitCode>("\"0451\"").unwrap(), code);
        assert!(serde_json::from_str::<DigitCode>("\"0441\"").is_err());
    }
}
