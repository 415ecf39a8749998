// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{Chain, ComplexLike, GradedComplex, MatchOptions, MorseMatching};

/// Sentinel for a cell that has not been matched.
const UNMATCHED: u32 = u32::MAX;

/// An acyclic partial matching on an arbitrary graded complex, built by
/// coreduction.
///
/// The matcher greedily extracts cells whose grade-restricted boundary has
/// size one (a coreduction pair, excised as a king-queen match) or size zero
/// (an ace). Each excision decrements the boundary counts of the cofaces, so
/// the process runs in time linear in the number of incidences. Matching
/// never crosses grade boundaries, so the graded closure property is
/// preserved by construction; it is verified on every restricted boundary
/// query and a violation is a fatal logic error.
///
/// Cells are assigned priorities `value(cell) * M + processing_time`, which
/// orders the gradient lexicographically by (grade, extraction time). When
/// several cells are eligible the least index is taken, fixing the tie-break
/// so the matching is reproducible.
///
/// In practice this method is slower than the specialized cubical template
/// matcher. Its redeeming trait is its applicability to general complexes;
/// it is the matcher applied to Morse complexes obtained from earlier
/// reduction steps.
pub struct CoreductionMatching {
    mate: Vec<u32>,
    priority: Vec<i64>,
    begin: Vec<u32>,
    reindex: Vec<(u32, u32)>,
}

impl CoreductionMatching {
    /// Compute the matching on `graded`.
    ///
    /// `options.match_dim` caps matching at the given dimension: cells above
    /// the cap are ignored entirely and cells at the cap are never matched
    /// upward, so homology of the reduced complex is valid below the cap.
    ///
    /// # Panics
    /// Panics if `options.match_dim` exceeds the complex dimension, or if the
    /// grading violates the closure property.
    #[must_use]
    pub fn new(graded: &GradedComplex, options: MatchOptions) -> Self {
        let complex = graded.complex();
        let dimension = complex.dimension();

        let match_dim = match options.match_dim {
            Some(cap) => {
                assert!(cap <= dimension, "match_dim exceeds complex dimension");
                cap
            }
            None => dimension,
        };

        // Cells of dimension at most match_dim, with the top range never
        // matched upward.
        let top_range = complex.range(match_dim);
        let top_begin = top_range.start;
        let cell_count = top_range.end;

        debug!(cells = cell_count, "coreduction matching");

        let mut state = MatchState {
            graded,
            options,
            top_begin,
            mate: vec![UNMATCHED; cell_count as usize],
            priority: vec![0; cell_count as usize],
            boundary_count: vec![0; cell_count as usize],
            coreducible: BTreeSet::new(),
            ace_candidates: BTreeSet::new(),
            kept_count: 0,
            num_processed: 0,
        };
        state.initialize(cell_count);
        state.run();

        let MatchState {
            mate, priority, ..
        } = state;

        // Collect critical cells in dimension order.
        let mut begin = Vec::with_capacity(match_dim as usize + 2);
        let mut reindex = Vec::new();
        let mut index = 0;
        for dim in 0..=match_dim {
            begin.push(index);
            for cell in complex.range(dim) {
                if kept(graded, options, cell) && mate[cell as usize] == cell {
                    reindex.push((cell, index));
                    index += 1;
                }
            }
        }
        begin.push(index);

        if cell_count != 0 {
            debug!(
                critical = index,
                reduction_percent = 100 - (100 * u64::from(index)) / u64::from(cell_count),
                "coreduction matching complete"
            );
        }

        Self {
            mate,
            priority,
            begin,
            reindex,
        }
    }
}

impl MorseMatching for CoreductionMatching {
    /// Cells beyond the matched range (above `match_dim`, when set) are
    /// reported as unmatched aces.
    fn mate(&self, cell: u32) -> u32 {
        match self.mate.get(cell as usize) {
            Some(&mate) if mate != UNMATCHED => mate,
            _ => cell,
        }
    }

    fn priority(&self, cell: u32) -> i64 {
        self.priority.get(cell as usize).copied().unwrap_or(0)
    }

    fn critical_cells(&self) -> (&[u32], &[(u32, u32)]) {
        (&self.begin, &self.reindex)
    }
}

/// Return true if `cell` survives the truncation predicate.
fn kept(graded: &GradedComplex, options: MatchOptions, cell: u32) -> bool {
    !options.truncate || graded.value(cell) <= options.max_grade
}

struct MatchState<'a> {
    graded: &'a GradedComplex,
    options: MatchOptions,
    top_begin: u32,
    mate: Vec<u32>,
    priority: Vec<i64>,
    boundary_count: Vec<u32>,
    coreducible: BTreeSet<u32>,
    ace_candidates: BTreeSet<u32>,
    /// Number of cells satisfying the truncation predicate.
    kept_count: i64,
    num_processed: i64,
}

impl MatchState<'_> {
    /// Boundary of `cell` restricted to cells of the same grade.
    ///
    /// # Panics
    /// Panics if a boundary cell has strictly greater grade.
    fn restricted_boundary(&self, cell: u32) -> Chain {
        let value = self.graded.value(cell);
        let mut result = Chain::new();
        self.graded.complex().column(cell, |face| {
            let face_value = self.graded.value(face);
            assert!(
                face_value <= value,
                "graded complex closure property failed"
            );
            if face_value == value {
                result += face;
            }
        });
        result
    }

    /// Coboundary of `cell` restricted to cells of the same grade; empty for
    /// cells of the cap dimension, which are never matched upward.
    fn restricted_coboundary(&self, cell: u32) -> Chain {
        let mut result = Chain::new();
        if cell >= self.top_begin {
            return result;
        }
        let value = self.graded.value(cell);
        self.graded.complex().row(cell, |coface| {
            if self.graded.value(coface) == value {
                result += coface;
            }
        });
        result
    }

    fn initialize(&mut self, cell_count: u32) {
        for cell in 0..cell_count {
            if !kept(self.graded, self.options, cell) {
                continue;
            }
            self.kept_count += 1;
            let count = self.restricted_boundary(cell).len() as u32;
            self.boundary_count[cell as usize] = count;
            match count {
                0 => {
                    self.ace_candidates.insert(cell);
                }
                1 => {
                    self.coreducible.insert(cell);
                }
                _ => {}
            }
        }
    }

    /// Record the processing time of `cell` as its priority and update the
    /// boundary counts of its cofaces.
    fn process(&mut self, cell: u32) {
        self.priority[cell as usize] = self.graded.value(cell) * self.kept_count + self.num_processed;
        self.num_processed += 1;
        self.coreducible.remove(&cell);
        self.ace_candidates.remove(&cell);

        for coface in &self.restricted_coboundary(cell) {
            self.boundary_count[coface as usize] -= 1;
            match self.boundary_count[coface as usize] {
                0 => {
                    self.coreducible.remove(&coface);
                    self.ace_candidates.insert(coface);
                }
                1 => {
                    self.coreducible.insert(coface);
                }
                _ => {}
            }
        }
    }

    fn run(&mut self) {
        while self.num_processed < self.kept_count {
            if let Some(king) = self.coreducible.pop_first() {
                // The king's restricted boundary has exactly one unmatched
                // cell left; that cell is the queen.
                let queen = self
                    .restricted_boundary(king)
                    .iter()
                    .find(|&face| self.mate[face as usize] == UNMATCHED)
                    .expect("coreducible cell with no unmatched boundary");

                self.mate[king as usize] = queen;
                self.mate[queen as usize] = king;
                self.process(queen);
                self.process(king);
            } else {
                let ace = self
                    .ace_candidates
                    .pop_first()
                    .expect("unprocessed cells but no ace candidate");
                self.mate[ace as usize] = ace;
                self.process(ace);
            }
        }
    }
}
