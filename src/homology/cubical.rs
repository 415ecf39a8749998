// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::mem::take;
use std::sync::Arc;

use tracing::debug;

use crate::{
    ComplexLike, CubicalComplex, GradedComplex, Grading, MatchOptions, MorseMatching,
};

/// An acyclic partial matching on a graded cubical complex, built from
/// per-axis hypercube templates.
///
/// Each cube attempts to mate with the cube obtained by extending it along
/// one additional axis within the same grade. The proposal is accepted only
/// if the candidate king has no valid king of its own among the axes already
/// considered, which is checked by a recursion bounded by the ambient
/// dimension. On a cubical complex this yields a provably acyclic matching in
/// O(cells x dimension) with no global data structure beyond the set of kings
/// discovered in the previous dimension's pass.
///
/// The grade-equality requirement on proposals means mates never cross grade
/// boundaries, so the induced Morse complex of a graded complex remains
/// graded. Fringe cells are never matched and never reported as critical.
///
/// Matches are not stored: [`MorseMatching::mate`] reruns the proposal over
/// the full axis range at query time, which reproduces the function computed
/// during construction.
///
/// This approach is detailed in Harker, Mischaikow, Spendlove, *Morse
/// Theoretic Templates for High Dimensional Homology Computation*.
pub struct CubicalMatching {
    complex: Arc<CubicalComplex>,
    grading: Grading,
    type_size: u32,
    begin: Vec<u32>,
    reindex: Vec<(u32, u32)>,
}

impl CubicalMatching {
    /// Compute the matching on `graded`, which must hold the cubical complex
    /// variant.
    ///
    /// # Panics
    /// Panics if the complex of `graded` is not cubical.
    #[must_use]
    pub fn new(graded: &GradedComplex, options: MatchOptions) -> Self {
        let complex = Arc::clone(
            graded
                .complex()
                .as_cubical()
                .expect("cubical matching requires a cubical complex"),
        );
        let grading = graded.grading().clone();
        let dimension = complex.dimension();

        debug!(cells = complex.size(), "cubical morse matching");

        // Kings are only discovered from their queens, one dimension below;
        // the set found during each pass is carried into the next pass so
        // those cells are skipped.
        let mut next_kings: HashSet<u32> = HashSet::new();

        let mut begin = Vec::with_capacity(dimension as usize + 2);
        let mut reindex = Vec::new();
        let mut index = 0;
        for dim in 0..=dimension {
            begin.push(index);
            let prev_kings = take(&mut next_kings);

            for cell in complex.range(dim) {
                if complex.rightfringe(cell)
                    || (options.truncate && grading.value(cell) > options.max_grade)
                    || prev_kings.contains(&cell)
                {
                    continue;
                }

                let mate = propose(&complex, &grading, cell, dimension, true);
                if mate == cell {
                    reindex.push((cell, index));
                    index += 1;
                } else {
                    next_kings.insert(mate);
                }
            }
        }
        begin.push(index);

        if complex.size() != 0 {
            debug!(
                critical = index,
                reduction_percent = 100 - (100 * u64::from(index)) / u64::from(complex.size()),
                "cubical matching complete"
            );
        }

        Self {
            type_size: complex.type_size(),
            complex,
            grading,
            begin,
            reindex,
        }
    }
}

impl MorseMatching for CubicalMatching {
    fn mate(&self, cell: u32) -> u32 {
        propose(
            &self.complex,
            &self.grading,
            cell,
            self.complex.dimension(),
            false,
        )
    }

    fn priority(&self, cell: u32) -> i64 {
        i64::from(self.type_size - cell % self.type_size)
    }

    fn critical_cells(&self) -> (&[u32], &[(u32, u32)]) {
        (&self.begin, &self.reindex)
    }
}

/// Propose a mate for `cell` among the axes below `axes`.
///
/// With `kings_only` set (the construction pass), only axes not in the cell's
/// shape are tried, so proposals go one dimension up. A proposal is accepted
/// if it is not fringe, lies in the same grade, and has no valid mate of its
/// own among the axes below the proposing axis; the recursion depth is
/// bounded by the ambient dimension. Returns `cell` itself when no proposal
/// is accepted, which makes the cell critical.
fn propose(
    complex: &CubicalComplex,
    grading: &Grading,
    cell: u32,
    axes: u32,
    kings_only: bool,
) -> u32 {
    if complex.rightfringe(cell) {
        return cell;
    }
    let shape = complex.cell_shape(cell);
    let position = complex.cell_pos(cell);

    for axis in 0..axes {
        let bit = 1u32 << axis;
        if kings_only && shape & bit != 0 {
            continue;
        }

        let candidate = complex.cell_index(shape ^ bit, position);
        if !complex.rightfringe(candidate)
            && grading.value(candidate) == grading.value(cell)
            && candidate == propose(complex, grading, candidate, axis, false)
        {
            return candidate;
        }
    }
    cell
}
