//! Enumeration of every filling of a line that honors a clue.
//!
//! A line with a clue of `k` runs is seen as `k + 1` stretches of
//! empty cells around the runs.  The first and last stretch may be
//! empty, the ones between runs hold at least one cell, and together
//! they hold every cell the runs don't.  For `[2, 1]` on 5 cells
//! there are two blanks to spare, and the gap vectors come out as:
//!
//! <pre>
//! [0, 1, 1]  ##.#.
//! [0, 2, 0]  ##..#
//! [1, 1, 0]  .##.#
//! </pre>
//!
//! Vectors are produced in lexicographic order, so the order is the
//! same on every call.

use std::iter::FusedIterator;

/// Lazy iterator over the fillings of one line, `true` meaning
/// filled.  See [candidates].
#[derive(Debug, Clone)]
pub struct Candidates {
    length: usize,
    runs: Vec<usize>,
    gaps: Vec<usize>,
    done: bool,
}

/// Generate every filling of a `length` cells line honoring `clue`.
///
/// Zero entries in `clue` are ignored.  An empty clue has exactly one
/// filling, all empty.  A clue that doesn't fit has none.
pub fn candidates(length: usize, clue: &[usize]) -> Candidates {
    let runs: Vec<usize> = clue.iter().copied().filter(|&r| r > 0).collect();
    let occupation = runs.iter().sum::<usize>();
    // Every stretch between two runs needs one blank.
    let separators = runs.len().saturating_sub(1);

    let mut gaps = vec![0; runs.len() + 1];
    let done = match length.checked_sub(occupation + separators) {
        Some(slack) => {
            for gap in gaps.iter_mut().skip(1).take(separators) {
                *gap = 1;
            }
            let last = gaps.len() - 1;
            gaps[last] += slack;
            false
        }
        None => true,
    };

    Candidates {
        length,
        runs,
        gaps,
        done,
    }
}

impl Candidates {
    /// The gap vector of the next filling, or `None` once exhausted.
    pub fn gaps(&self) -> Option<&[usize]> {
        if self.done {
            None
        } else {
            Some(&self.gaps)
        }
    }

    fn min_gap(&self, i: usize) -> usize {
        if i == 0 || i == self.runs.len() {
            0
        } else {
            1
        }
    }

    /// Lay the current gap vector out as cells.
    fn to_mask(&self) -> Vec<bool> {
        let mut ret = Vec::with_capacity(self.length);
        for (i, gap) in self.gaps.iter().enumerate() {
            ret.extend(std::iter::repeat(false).take(*gap));
            if let Some(run) = self.runs.get(i) {
                ret.extend(std::iter::repeat(true).take(*run));
            }
        }
        debug_assert_eq!(ret.len(), self.length);
        ret
    }

    /// Move to the lexicographic successor of the gap vector: the
    /// rightmost stretch above its minimum gives one cell to its left
    /// neighbour, and all slack to its right is pushed back onto the
    /// last stretch.
    fn advance(&mut self) {
        let last = self.gaps.len() - 1;
        let donor = (1..=last).rev().find(|&i| self.gaps[i] > self.min_gap(i));
        let Some(donor) = donor else {
            self.done = true;
            return;
        };

        self.gaps[donor - 1] += 1;
        let mut slack = 0;
        for i in donor..=last {
            let min = self.min_gap(i);
            slack += self.gaps[i] - min;
            self.gaps[i] = min;
        }
        self.gaps[last] += slack - 1;
    }
}

impl Iterator for Candidates {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let ret = self.to_mask();
        self.advance();
        Some(ret)
    }
}

impl FusedIterator for Candidates {}

/// Run-length encode the filled stretches of a line.
pub fn runs(line: &[bool]) -> Vec<usize> {
    let mut ret = vec![];
    let mut current = 0;
    for &filled in line {
        if filled {
            current += 1;
        } else if current > 0 {
            ret.push(current);
            current = 0;
        }
    }
    if current > 0 {
        ret.push(current);
    }
    ret
}
