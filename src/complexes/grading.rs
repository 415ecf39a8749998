// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gradings of cell complexes and builders for the common ones.
//!
//! A grading assigns an integer to each cell subject to the closure property:
//! no cell's grade exceeds that of any cell it bounds. Gradings here are a
//! small sum type rather than boxed closures; each variant captures its
//! precomputed state by shared ownership, so a [`GradedComplex`] is cheap to
//! clone and safe to share.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::{Complex, ComplexLike, CubicalComplex};

/// A grading function `cell -> integer` on a complex.
///
/// Constructed directly for the simple variants or through the builders
/// [`construct_grading`], [`inclusion_grading`], and [`cubical_nerve`].
#[derive(Clone)]
pub enum Grading {
    /// Every cell has the same grade.
    Constant(i64),
    /// Grades stored per cell, indexed by cell.
    Table(Arc<Vec<i64>>),
    /// The minimum over each cell's top-dimensional star of grades assigned
    /// to top cells. See [`construct_grading`].
    TopStarMin {
        /// The cubical complex the top star is taken in.
        complex: Arc<CubicalComplex>,
        /// Grades of the top-dimensional cells, indexed by `cell - offset`.
        top_values: Arc<Vec<i64>>,
        /// Index of the first top-dimensional cell.
        offset: u32,
    },
    /// Grade 0 on a closed subcomplex, grade 1 elsewhere. See
    /// [`inclusion_grading`].
    InclusionClosure(Arc<HashSet<u32>>),
    /// Grade 0 on cells spanned by a set of vertex positions, up to a
    /// dimension cap; grade 1 elsewhere. See [`cubical_nerve`].
    CubicalNerve {
        /// The cubical complex the nerve is taken in.
        complex: Arc<CubicalComplex>,
        /// The selected vertex positions.
        positions: Arc<HashSet<u32>>,
        /// Cells above this dimension are excluded regardless of position.
        max_dim: u32,
    },
}

impl Grading {
    /// The grade of `cell`.
    #[must_use]
    pub fn value(&self, cell: u32) -> i64 {
        match self {
            Grading::Constant(value) => *value,
            Grading::Table(values) => values[cell as usize],
            Grading::TopStarMin {
                complex,
                top_values,
                offset,
            } => complex
                .topstar(cell)
                .into_iter()
                .map(|top| top_values[(top - offset) as usize])
                .min()
                .expect("top star of a cell is never empty"),
            Grading::InclusionClosure(closure) => {
                if closure.contains(&cell) {
                    0
                } else {
                    1
                }
            }
            Grading::CubicalNerve {
                complex,
                positions,
                max_dim,
            } => {
                if complex.cell_dim(cell) > *max_dim {
                    return 1;
                }
                let vertex_count = complex.size_in_dim(0);
                for face in complex.closure(&HashSet::from([cell])) {
                    // A cell is a vertex exactly when it precedes all
                    // extended shapes in the numbering.
                    if face < vertex_count && !positions.contains(&complex.cell_pos(face)) {
                        return 1;
                    }
                }
                0
            }
        }
    }
}

/// A complex together with a grading satisfying the closure property: for
/// every cell x and every y in the boundary of x, `value(y) <= value(x)`.
///
/// The closure property is the caller's obligation; the matchers verify it
/// where their algorithms touch it and treat a violation as a fatal logic
/// error.
#[derive(Clone)]
pub struct GradedComplex {
    complex: Complex,
    grading: Grading,
}

impl GradedComplex {
    /// Pair a complex with a grading.
    #[must_use]
    pub fn new(complex: Complex, grading: Grading) -> Self {
        Self { complex, grading }
    }

    /// The underlying complex.
    #[must_use]
    pub fn complex(&self) -> &Complex {
        &self.complex
    }

    /// The grading function.
    #[must_use]
    pub fn grading(&self) -> &Grading {
        &self.grading
    }

    /// The grade of `cell`.
    #[must_use]
    pub fn value(&self, cell: u32) -> i64 {
        self.grading.value(cell)
    }

    /// The number of cells in each dimension, split by grade.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<i64, Vec<u32>> {
        let mut counts = BTreeMap::new();
        let dimension = self.complex.dimension() as usize;
        for dim in 0..=dimension as u32 {
            for cell in self.complex.range(dim) {
                let per_dim: &mut Vec<u32> = counts
                    .entry(self.value(cell))
                    .or_insert_with(|| vec![0; dimension + 1]);
                per_dim[dim as usize] += 1;
            }
        }
        counts
    }
}

/// Define a grading on the cubical complex `complex` subject to values on the
/// top-dimensional cells.
///
/// Each cell's grade is the minimum of `top_cell_grading` over the
/// top-dimensional cells containing it, so the closure property holds by
/// construction.
pub fn construct_grading(
    complex: &Arc<CubicalComplex>,
    top_cell_grading: impl Fn(u32) -> i64,
) -> Grading {
    let dimension = complex.dimension();
    let offset = complex.size() - complex.size_in_dim(dimension);
    let top_values: Vec<i64> = complex
        .range(dimension)
        .map(|top| top_cell_grading(top))
        .collect();

    Grading::TopStarMin {
        complex: Arc::clone(complex),
        top_values: Arc::new(top_values),
        offset,
    }
}

/// Define a grading based on inclusion in `included`: cells of `complex` in
/// the closure of `included` are graded 0, all others 1.
pub fn inclusion_grading(complex: &impl ComplexLike, included: &HashSet<u32>) -> Grading {
    Grading::InclusionClosure(Arc::new(complex.closure(included)))
}

/// Define a grading on a cubical complex selecting those cells all of whose
/// vertices have positions in `positions`, up to dimension `max_dim`
/// (defaulting to the full dimension). Selected cells are graded 0, all
/// others 1.
pub fn cubical_nerve(
    complex: &Arc<CubicalComplex>,
    positions: &HashSet<u32>,
    max_dim: Option<u32>,
) -> Grading {
    Grading::CubicalNerve {
        max_dim: max_dim.unwrap_or_else(|| complex.dimension()),
        complex: Arc::clone(complex),
        positions: Arc::new(positions.clone()),
    }
}
