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

use std::iter::FusedIterator;

///
/// The K highest scoring items of an iterator, emitted from highest to lowest score.
///
/// Everything lives in fixed size arrays, so picking the best few of a few thousand candidates
/// never allocates or sorts the whole input. Among items with equal scores, the one seen first
/// ranks higher.
///
pub struct TopK<E, const K: usize> {
    items: [Option<E>; K],
    next: usize,
    len: usize,
}

impl<Element, const K: usize> TopK<Element, K> {
    pub fn new<Itr, Score, ScoringFunc>(iter: Itr, f: ScoringFunc) -> Self
    where
        Itr: Iterator<Item = Element>,
        ScoringFunc: Fn(&Element) -> Score,
        Score: PartialOrd<Score>,
        [Option<Element>; K]: Default,
        [Option<Score>; K]: Default,
    {
        // kept in lockstep: scores[i] is f(items[i]), both sorted from best to worst
        let mut items: [Option<Element>; K] = Default::default();
        let mut scores: [Option<Score>; K] = Default::default();
        let mut len: usize = 0;

        for item in iter {
            let score = f(&item);
            let beaten = scores[..len]
                .iter()
                .position(|held| matches!(held, Some(held) if *held < score));

            let at = match beaten {
                Some(at) => at,
                None if len < K => len,
                None => continue,
            };

            // shift everything from `at` down one slot, the last slot falls off the end
            items[at..].rotate_right(1);
            scores[at..].rotate_right(1);
            items[at] = Some(item);
            scores[at] = Some(score);
            len = (len + 1).min(K);
        }

        Self { items, next: 0, len }
    }
}

impl<Element, const K: usize> Iterator for TopK<Element, K> {
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }

        let out = self.items[self.next].take();
        self.next += 1;
        out
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<Element, const K: usize> ExactSizeIterator for TopK<Element, K> {}
impl<Element, const K: usize> FusedIterator for TopK<Element, K> {}

pub trait TopKExt: Iterator + Sized {
    fn top_k<Score, ScoreFn, const N: usize>(self, score_f: ScoreFn) -> TopK<Self::Item, N>
    where
        ScoreFn: Fn(&Self::Item) -> Score,
        Score: PartialOrd<Score>,
        [Option<Self::Item>; N]: Default,
        [Option<Score>; N]: Default,
    {
        TopK::new(self, score_f)
    }
}

impl<I> TopKExt for I where I: Iterator + Sized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_highest_in_order() {
        let top: Vec<i32> = [5, 1, 9, 3, 7, 2].iter().copied().top_k::<i32, _, 3>(|v| *v).collect();
        assert_eq!(top, vec![9, 7, 5]);
    }

    #[test]
    fn test_fewer_items_than_k() {
        let top: TopK<i32, 8> = [4, 6].iter().copied().top_k(|v| *v);
        assert_eq!(top.len(), 2);
        assert_eq!(top.collect::<Vec<_>>(), vec![6, 4]);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let items = [("a", 1), ("b", 2), ("c", 2), ("d", 1)];
        let top: Vec<&str> = items.iter().top_k::<i32, _, 3>(|(_, s)| *s).map(|(n, _)| *n).collect();
        assert_eq!(top, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_float_scores() {
        let top: Vec<f64> = [0.5, 2.25, 1.0].iter().copied().top_k::<f64, _, 1>(|v| *v).collect();
        assert_eq!(top, vec![2.25]);
    }

    #[test]
    fn test_empty() {
        let top: TopK<u8, 4> = std::iter::empty().top_k(|v: &u8| *v);
        assert_eq!(top.count(), 0);
    }
}
