// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builders for the standard complexes used by the integration tests and
//! benchmarks.

use std::sync::Arc;

use conmat::{
    CellComplex, Chain, Complex, ComplexLike, CubicalComplex, GradedComplex, Grading,
};

/// Two vertices joined by one edge.
pub fn interval() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 1],
        vec![Chain::new(), Chain::new(), [0, 1].into_iter().collect()],
    )
}

/// Four vertices and four edges forming a circle.
pub fn hollow_square() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 0, 0, 1, 1, 1, 1],
        vec![
            Chain::new(),
            Chain::new(),
            Chain::new(),
            Chain::new(),
            [0, 1].into_iter().collect(),
            [1, 2].into_iter().collect(),
            [2, 3].into_iter().collect(),
            [3, 0].into_iter().collect(),
        ],
    )
}

/// A wedge of two circles, each made of two edges.
pub fn figure_eight() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 0, 1, 1, 1, 1],
        vec![
            Chain::new(),
            Chain::new(),
            Chain::new(),
            [0, 1].into_iter().collect(),
            [0, 1].into_iter().collect(),
            [0, 2].into_iter().collect(),
            [0, 2].into_iter().collect(),
        ],
    )
}

/// An n-by-n periodic grid: a cell structure on the torus.
pub fn torus_grid(n: u32) -> CellComplex {
    assert!(n >= 1);
    let area = n * n;
    let index = |x: u32, y: u32| (y % n) * n + (x % n);

    let mut cell_dimensions = Vec::with_capacity(4 * area as usize);
    let mut boundaries = Vec::with_capacity(4 * area as usize);

    // Vertices.
    for _ in 0..area {
        cell_dimensions.push(0);
        boundaries.push(Chain::new());
    }
    // Edges along the x axis, then along the y axis.
    for y in 0..n {
        for x in 0..n {
            cell_dimensions.push(1);
            boundaries.push([index(x, y), index(x + 1, y)].into_iter().collect());
        }
    }
    for y in 0..n {
        for x in 0..n {
            cell_dimensions.push(1);
            boundaries.push([index(x, y), index(x, y + 1)].into_iter().collect());
        }
    }
    // Squares.
    let x_edge = |x: u32, y: u32| area + index(x, y);
    let y_edge = |x: u32, y: u32| 2 * area + index(x, y);
    for y in 0..n {
        for x in 0..n {
            cell_dimensions.push(2);
            boundaries.push(
                [
                    x_edge(x, y),
                    x_edge(x, y + 1),
                    y_edge(x, y),
                    y_edge(x + 1, y),
                ]
                .into_iter()
                .collect(),
            );
        }
    }

    CellComplex::new(cell_dimensions, boundaries)
}

/// A grid of boxes with its 2-cells graded 1 and every lower cell graded 0:
/// the graded complex whose grade-0 part is the edge skeleton.
pub fn edge_skeleton_grid(boxes: Vec<u32>) -> GradedComplex {
    let complex = Arc::new(CubicalComplex::new(boxes));
    let values: Vec<i64> = (0..complex.size())
        .map(|cell| i64::from(complex.cell_dim(cell) == 2))
        .collect();
    GradedComplex::new(Complex::Cubical(complex), Grading::Table(Arc::new(values)))
}

/// The 3-by-4 grid graded so that the grade-0 part is a circle through the
/// lower-left four boxes.
pub fn circle_in_grid() -> GradedComplex {
    let complex = Arc::new(CubicalComplex::new(vec![3, 4]));
    let zero_cells = [0u32, 1, 3, 4, 12, 15, 24, 25];
    let values: Vec<i64> = (0..complex.size())
        .map(|cell| i64::from(!zero_cells.contains(&cell)))
        .collect();
    GradedComplex::new(Complex::Cubical(complex), Grading::Table(Arc::new(values)))
}

/// Attach a trivial grading to a complex.
pub fn trivially_graded(complex: impl Into<Complex>) -> GradedComplex {
    GradedComplex::new(complex.into(), Grading::Constant(0))
}
