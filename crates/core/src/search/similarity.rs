//! Ratcliff/Obershelp string similarity.
//!
//! Finds the longest common block, then recurses on the unmatched text to
//! its left and right. The ratio is `2 * M / (len(a) + len(b))` where `M` is
//! the total size of all matched blocks. Ties between equally long blocks
//! resolve to the earliest position in `a`, then in `b`, which makes the
//! ratio asymmetric for some inputs.
//!
//! When `b` has at least 200 characters, characters occurring more than
//! `len(b) / 100 + 1` times are too popular to anchor a block. A block found
//! from a rarer anchor still grows across them.

#![allow(clippy::float_arithmetic, clippy::cast_precision_loss)]

use std::collections::HashMap;

/// Length of `b` from which popular characters stop anchoring blocks.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity of `a` and `b` in `[0.0, 1.0]`. Two empty strings are identical.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = Matcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of every non-popular character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

/// A common run `a[i..i + size] == b[j..j + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    i: usize,
    j: usize,
    size: usize,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest block inside `a[alo..ahi]` x `b[blo..bhi]`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let mut best = Block { i: alo, j: blo, size: 0 };
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best.size {
                        best = Block { i: i + 1 - k, j: j + 1 - k, size: k };
                    }
                }
            }
            j2len = next;
        }

        while best.i > alo && best.j > blo && self.a[best.i - 1] == self.b[best.j - 1] {
            best = Block { i: best.i - 1, j: best.j - 1, size: best.size + 1 };
        }
        while best.i + best.size < ahi
            && best.j + best.size < bhi
            && self.a[best.i + best.size] == self.b[best.j + best.size]
        {
            best.size += 1;
        }
        best
    }

    fn matching_blocks(&self) -> Vec<Block> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            if alo < block.i && blo < block.j {
                pending.push((alo, block.i, blo, block.j));
            }
            if block.i + block.size < ahi && block.j + block.size < bhi {
                pending.push((block.i + block.size, ahi, block.j + block.size, bhi));
            }
            blocks.push(block);
        }
        blocks.sort_unstable_by_key(|block| (block.i, block.j));
        blocks
    }

    fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|block| block.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[rstest]
    #[case("alice", "alice", 1.0)]
    #[case("alice", "alise", 0.8)]
    #[case("abcd", "bcde", 0.75)]
    #[case("tide", "diet", 0.25)]
    #[case("diet", "tide", 0.5)]
    #[case("abc", "xyz", 0.0)]
    #[case("", "", 1.0)]
    #[case("bob", "", 0.0)]
    #[case("ali", "alice", 0.75)]
    fn test_ratio(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        let got = ratio(a, b);
        assert!(approx(got, expected), "ratio({a:?}, {b:?}) = {got}, expected {expected}");
    }

    #[test]
    fn test_matching_blocks_recurse_both_sides() {
        let a: Vec<char> = "xaybz".chars().collect();
        let b: Vec<char> = "aqqbz".chars().collect();
        let blocks = Matcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![Block { i: 1, j: 0, size: 1 }, Block { i: 3, j: 3, size: 2 }]
        );
    }

    #[rstest]
    #[case("aaa", format!("b{}", "a".repeat(198)), 6.0 / 202.0)]
    #[case("aaa", format!("b{}", "a".repeat(199)), 0.0)]
    #[case("aaaa", "a".repeat(250), 8.0 / 254.0)]
    #[case("ca", format!("{}c{}", "b".repeat(150), "a".repeat(50)), 4.0 / 203.0)]
    fn test_popular_characters_in_long_b(
        #[case] a: &str,
        #[case] b: String,
        #[case] expected: f64,
    ) {
        let got = ratio(a, &b);
        assert!(approx(got, expected), "ratio({a:?}, <{} chars>) = {got}", b.len());
    }

    #[test]
    fn test_ratio_counts_characters_not_bytes() {
        assert!(approx(ratio("é", "é"), 1.0));
        assert!(approx(ratio("éa", "ea"), 0.5));
    }
}
