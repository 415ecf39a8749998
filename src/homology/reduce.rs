// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use tracing::info;

use crate::{
    Complex, ComplexLike, GradedComplex, Grading, MatchOptions, Matching, MorseComplex,
    compute_matching,
};

/// One step of graded Morse reduction with a caller-supplied matching:
/// construct the Morse complex of `base` and lift the grading through the
/// inclusion of critical cells.
#[must_use]
pub fn morse_graded_complex_with_matching(
    base: &GradedComplex,
    matching: Arc<Matching>,
) -> GradedComplex {
    let morse = MorseComplex::new(base.complex().clone(), matching);

    // Each new cell inherits the grade of the critical cell it represents.
    let values: Vec<i64> = (0..morse.size())
        .map(|new_cell| base.value(morse.include_cell(new_cell)))
        .collect();

    GradedComplex::new(
        Complex::Morse(Arc::new(morse)),
        Grading::Table(Arc::new(values)),
    )
}

/// One step of graded Morse reduction: compute a matching on `base` via the
/// dispatcher and reduce by it.
#[must_use]
pub fn morse_graded_complex(base: &GradedComplex, options: MatchOptions) -> GradedComplex {
    let matching = Arc::new(compute_matching(base, options));
    morse_graded_complex_with_matching(base, matching)
}

/// Iterate graded Morse reduction to its fixed point, the minimal connection
/// matrix complex of `base`.
///
/// Each step strictly decreases the cell count until the reduction stops
/// making progress, so the loop terminates.
#[must_use]
pub fn connection_matrix(base: &GradedComplex, options: MatchOptions) -> GradedComplex {
    let mut current = base.clone();
    loop {
        let next = morse_graded_complex(&current, options);
        info!(
            from = current.complex().size(),
            to = next.complex().size(),
            "morse reduction step"
        );
        if next.complex().size() == current.complex().size() {
            return current;
        }
        current = next;
    }
}

/// Iterate graded Morse reduction to its fixed point, retaining the whole
/// tower of intermediate complexes.
///
/// The returned list starts with `base` and ends with the fixed point (equal
/// to [`connection_matrix`] of `base`); sizes are strictly decreasing along
/// the list.
#[must_use]
pub fn connection_matrix_tower(base: &GradedComplex, options: MatchOptions) -> Vec<GradedComplex> {
    let mut tower = vec![base.clone()];
    loop {
        let current = tower.last().expect("tower is never empty");
        let next = morse_graded_complex(current, options);
        if next.complex().size() == current.complex().size() {
            return tower;
        }
        tower.push(next);
    }
}

/// Iterate ungraded Morse reduction to its fixed point.
///
/// The stabilised complex has zero boundary operator, so its cell count in
/// each dimension is the Z/2 Betti number of `base` in that dimension (up to
/// dimension `match_dim - 1` when `options.match_dim` caps the matcher).
#[must_use]
pub fn homology(base: &Complex, options: MatchOptions) -> Complex {
    let mut current = base.clone();
    loop {
        let next: Complex = MorseComplex::reduce(current.clone(), options).into();
        info!(
            from = current.size(),
            to = next.size(),
            "homology reduction step"
        );
        if next.size() == current.size() {
            return current;
        }
        current = next;
    }
}
