use std::{cmp::max, fmt};

use crate::error::Error;

pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A set of code points, stored as sorted, non-overlapping, non-adjacent inclusive ranges.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    ranges: Vec<(u32, u32)>,
}

impl CodePointSet {
    pub fn new() -> CodePointSet {
        CodePointSet { ranges: Vec::new() }
    }

    /// Create a set from arbitrary ranges.
    ///
    /// Ranges may overlap or touch. Empty ranges (`lo > hi`) are ignored and anything past
    /// [`MAX_CODE_POINT`] is clamped away.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (u32, u32)>) -> CodePointSet {
        let mut ranges: Vec<_> = ranges
            .into_iter()
            .filter(|&(lo, _)| lo <= MAX_CODE_POINT)
            .map(|(lo, hi)| (lo, hi.min(MAX_CODE_POINT)))
            .filter(|&(lo, hi)| lo <= hi)
            .collect();

        // Sort by start value ascending, end value descending
        ranges.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut coalesced: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());

        for (lo, hi) in ranges {
            match coalesced.last_mut() {
                Some(last) if lo <= last.1.saturating_add(1) => last.1 = max(last.1, hi),
                _ => coalesced.push((lo, hi)),
            }
        }

        CodePointSet { ranges: coalesced }
    }

    pub fn from_code_points(code_points: impl IntoIterator<Item = u32>) -> CodePointSet {
        CodePointSet::from_ranges(code_points.into_iter().map(|cp| (cp, cp)))
    }

    /// Combine several sets into one that subsumes them all.
    pub fn union<'a>(sets: impl IntoIterator<Item = &'a CodePointSet>) -> CodePointSet {
        CodePointSet::from_ranges(
            sets.into_iter()
                .flat_map(|set| set.ranges.iter().copied()),
        )
    }

    /// Remove individual code points. Values not in the set are ignored.
    pub fn remove_values(self, values: impl IntoIterator<Item = u32>) -> CodePointSet {
        let mut values: Vec<u32> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        values
            .into_iter()
            .fold(self, |set, value| set.subtract(value, value))
    }

    /// Remove every code point in `low..=high`.
    pub fn remove_range(self, low: char, high: char) -> Result<CodePointSet, Error> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }

        Ok(self.subtract(low as u32, high as u32))
    }

    fn subtract(self, lo: u32, hi: u32) -> CodePointSet {
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);

        for (start, end) in self.ranges {
            if end < lo || start > hi {
                ranges.push((start, end));
                continue;
            }

            if start < lo {
                ranges.push((start, lo - 1));
            }

            if end > hi {
                ranges.push((hi + 1, end));
            }
        }

        CodePointSet { ranges }
    }

    pub fn contains(&self, code_point: u32) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if hi < code_point {
                    std::cmp::Ordering::Less
                } else if lo > code_point {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|&(lo, hi)| (hi - lo) as usize + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges making up the set, sorted and coalesced.
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|&(lo, hi)| lo..=hi)
    }

    pub fn to_sorted_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl fmt::Debug for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.ranges.iter().map(|&(lo, hi)| {
                if lo == hi {
                    format!("{lo:#x}")
                } else {
                    format!("{lo:#x}..={hi:#x}")
                }
            }))
            .finish()
    }
}
