// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use crate::{CellComplex, Chain, CubicalComplex, MorseComplex};

/// Trait for types representing finite cell complexes over the field with two
/// elements.
///
/// Cells are opaque `u32` indices in `[0, size)`, partitioned by dimension:
/// all cells of dimension d occupy the contiguous range `range(d)`, with
/// dimensions ascending. The boundary relation is exposed both as chains and
/// as callback visitors over single columns/rows of the boundary matrix.
pub trait ComplexLike {
    /// The number of cells in the complex.
    fn size(&self) -> u32;

    /// The dimension of the complex. This is at least the dimension of any
    /// cell in the complex.
    fn dimension(&self) -> u32;

    /// The number of cells of dimension `dim`.
    fn size_in_dim(&self, dim: u32) -> u32 {
        let range = self.range(dim);
        range.end - range.start
    }

    /// The contiguous range of cell indices of dimension `dim`.
    fn range(&self, dim: u32) -> Range<u32>;

    /// The dimension of the cell `cell`.
    fn cell_dim(&self, cell: u32) -> u32;

    /// Apply `callback` to every cell of the boundary of `cell`, once per
    /// incidence. A face incident twice is visited twice; over Z/2 the two
    /// visits cancel in any chain accumulating the result.
    fn column(&self, cell: u32, callback: impl FnMut(u32));

    /// Apply `callback` to every cell of the coboundary of `cell`, once per
    /// incidence.
    fn row(&self, cell: u32, callback: impl FnMut(u32));

    /// The boundary of a single cell as a chain.
    fn cell_boundary(&self, cell: u32) -> Chain {
        let mut result = Chain::new();
        self.column(cell, |face| result += face);
        result
    }

    /// The coboundary of a single cell as a chain.
    fn cell_coboundary(&self, cell: u32) -> Chain {
        let mut result = Chain::new();
        self.row(cell, |coface| result += coface);
        result
    }

    /// The boundary of a chain, extended linearly over Z/2.
    fn boundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain {
            self.column(cell, |face| result += face);
        }
        result
    }

    /// The coboundary of a chain, extended linearly over Z/2.
    fn coboundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain {
            self.row(cell, |coface| result += coface);
        }
        result
    }

    /// The closure of a set of cells: the smallest set containing `cells`
    /// that also contains the boundary cells of each of its members.
    fn closure(&self, cells: &HashSet<u32>) -> HashSet<u32> {
        let mut result = cells.clone();
        let mut work: Vec<u32> = cells.iter().copied().collect();
        while let Some(cell) = work.pop() {
            self.column(cell, |face| {
                if result.insert(face) {
                    work.push(face);
                }
            });
        }
        result
    }

    /// The number of cells in each dimension, indexed by dimension.
    fn counts(&self) -> Vec<u32> {
        (0..=self.dimension())
            .map(|dim| self.size_in_dim(dim))
            .collect()
    }
}

/// A tagged variant over the concrete complex types in this crate, with
/// shared ownership of the underlying data.
///
/// The variant replaces runtime downcasting: algorithms that require
/// cubical-only operations (shapes, positions, fringe, top stars) obtain them
/// through [`Complex::as_cubical`], and the matching dispatcher selects its
/// algorithm by tag. Cloning is cheap (reference counted).
#[derive(Clone)]
pub enum Complex {
    /// A complex with explicitly stored boundaries.
    Cell(Arc<CellComplex>),
    /// An implicitly stored cubical complex.
    Cubical(Arc<CubicalComplex>),
    /// A reduced complex over the critical cells of a matching.
    Morse(Arc<MorseComplex>),
}

impl Complex {
    /// Return the underlying cubical complex, if this is the cubical variant.
    #[must_use]
    pub fn as_cubical(&self) -> Option<&Arc<CubicalComplex>> {
        match self {
            Complex::Cubical(complex) => Some(complex),
            _ => None,
        }
    }

    /// Return the underlying Morse complex, if this is the Morse variant.
    #[must_use]
    pub fn as_morse(&self) -> Option<&Arc<MorseComplex>> {
        match self {
            Complex::Morse(complex) => Some(complex),
            _ => None,
        }
    }
}

impl ComplexLike for Complex {
    fn size(&self) -> u32 {
        match self {
            Complex::Cell(complex) => complex.size(),
            Complex::Cubical(complex) => complex.size(),
            Complex::Morse(complex) => complex.size(),
        }
    }

    fn dimension(&self) -> u32 {
        match self {
            Complex::Cell(complex) => complex.dimension(),
            Complex::Cubical(complex) => complex.dimension(),
            Complex::Morse(complex) => complex.dimension(),
        }
    }

    fn range(&self, dim: u32) -> Range<u32> {
        match self {
            Complex::Cell(complex) => complex.range(dim),
            Complex::Cubical(complex) => complex.range(dim),
            Complex::Morse(complex) => complex.range(dim),
        }
    }

    fn cell_dim(&self, cell: u32) -> u32 {
        match self {
            Complex::Cell(complex) => complex.cell_dim(cell),
            Complex::Cubical(complex) => complex.cell_dim(cell),
            Complex::Morse(complex) => complex.cell_dim(cell),
        }
    }

    fn column(&self, cell: u32, callback: impl FnMut(u32)) {
        match self {
            Complex::Cell(complex) => complex.column(cell, callback),
            Complex::Cubical(complex) => complex.column(cell, callback),
            Complex::Morse(complex) => complex.column(cell, callback),
        }
    }

    fn row(&self, cell: u32, callback: impl FnMut(u32)) {
        match self {
            Complex::Cell(complex) => complex.row(cell, callback),
            Complex::Cubical(complex) => complex.row(cell, callback),
            Complex::Morse(complex) => complex.row(cell, callback),
        }
    }
}

impl From<CellComplex> for Complex {
    fn from(complex: CellComplex) -> Self {
        Complex::Cell(Arc::new(complex))
    }
}

impl From<CubicalComplex> for Complex {
    fn from(complex: CubicalComplex) -> Self {
        Complex::Cubical(Arc::new(complex))
    }
}

impl From<MorseComplex> for Complex {
    fn from(complex: MorseComplex) -> Self {
        Complex::Morse(Arc::new(complex))
    }
}

/// Locate `cell` in the dimension partition described by `begin`, where
/// `begin[d]` is the first cell of dimension d and the final entry is the
/// total size.
pub(crate) fn dim_from_begin(begin: &[u32], cell: u32) -> u32 {
    debug_assert!(
        cell < *begin.last().expect("empty begin table"),
        "cell index out of range"
    );
    (begin.partition_point(|&first| first <= cell) - 1) as u32
}
