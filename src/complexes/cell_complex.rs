// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Range;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::complexes::traits::dim_from_begin;
use crate::{Chain, ComplexLike};

/// A concrete cell complex with vector-based storage.
///
/// `CellComplex` represents a finite cell complex where each cell's boundary
/// chain is explicitly stored. Coboundaries are derived by transposition at
/// construction, so only dimensions and boundaries need to be supplied. There
/// needs to be few enough cells that the memory overhead of storing these
/// vectors is acceptable.
///
/// Cells must be supplied in ascending order of dimension, giving the dense
/// dimension-ordered partition required by [`ComplexLike`].
///
/// # Examples
///
/// ```rust
/// use conmat::{CellComplex, Chain, ComplexLike};
///
/// // Two vertices and one edge between them.
/// let complex = CellComplex::new(
///     vec![0, 0, 1],
///     vec![Chain::new(), Chain::new(), [0, 1].into_iter().collect()],
/// );
///
/// assert_eq!(complex.size(), 3);
/// assert_eq!(complex.cell_boundary(2), [0, 1].into_iter().collect());
/// ```
#[derive(Clone, Debug)]
pub struct CellComplex {
    begin: Vec<u32>,
    boundaries: Vec<Chain>,
    coboundaries: Vec<Chain>,
}

impl CellComplex {
    /// Create a new cell complex from per-cell dimensions and boundary
    /// chains.
    ///
    /// # Panics
    /// Panics if the vectors have different lengths, if `cell_dimensions` is
    /// not ascending, or if any boundary chain references a cell that is not
    /// exactly one dimension lower.
    #[must_use]
    pub fn new(cell_dimensions: Vec<u32>, boundaries: Vec<Chain>) -> Self {
        let cell_count = cell_dimensions.len();
        assert_eq!(cell_count, boundaries.len(), "cell count mismatch");
        assert!(
            cell_dimensions.windows(2).all(|pair| pair[0] <= pair[1]),
            "cells must be ordered by ascending dimension"
        );

        let dimension = cell_dimensions.last().copied().unwrap_or_default();
        let mut begin = vec![0; dimension as usize + 2];
        for (dim_entry, dim) in begin.iter_mut().zip(0..=dimension) {
            *dim_entry = cell_dimensions.partition_point(|&cell_dim| cell_dim < dim) as u32;
        }
        begin[dimension as usize + 1] = cell_count as u32;

        for (cell, boundary) in boundaries.iter().enumerate() {
            for face in boundary {
                assert!(
                    (face as usize) < cell_count,
                    "boundary cell index out of range"
                );
                assert!(
                    cell_dimensions[face as usize] + 1 == cell_dimensions[cell],
                    "boundary cell is not of adjacent lower dimension"
                );
            }
        }

        let mut coboundaries = vec![Chain::new(); cell_count];
        for (cell, boundary) in boundaries.iter().enumerate() {
            for face in boundary {
                coboundaries[face as usize] += cell as u32;
            }
        }

        Self {
            begin,
            boundaries,
            coboundaries,
        }
    }
}

impl ComplexLike for CellComplex {
    fn size(&self) -> u32 {
        self.boundaries.len() as u32
    }

    fn dimension(&self) -> u32 {
        self.begin.len() as u32 - 2
    }

    fn range(&self, dim: u32) -> Range<u32> {
        self.begin[dim as usize]..self.begin[dim as usize + 1]
    }

    fn cell_dim(&self, cell: u32) -> u32 {
        dim_from_begin(&self.begin, cell)
    }

    fn column(&self, cell: u32, mut callback: impl FnMut(u32)) {
        for face in &self.boundaries[cell as usize] {
            callback(face);
        }
    }

    fn row(&self, cell: u32, mut callback: impl FnMut(u32)) {
        for coface in &self.coboundaries[cell as usize] {
            callback(coface);
        }
    }
}

impl Serialize for CellComplex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let cell_dimensions: Vec<u32> = (0..self.size()).map(|cell| self.cell_dim(cell)).collect();
        (cell_dimensions, &self.boundaries).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellComplex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (cell_dimensions, boundaries) = <(Vec<u32>, Vec<Chain>)>::deserialize(deserializer)?;
        Ok(CellComplex::new(cell_dimensions, boundaries))
    }
}
