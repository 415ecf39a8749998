// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conmat` crate computes connection matrices of graded cell complexes
//! by iterated discrete Morse reduction over the field with two elements.
//!
//! A graded complex is reduced by computing an acyclic partial matching on
//! its cells (a cubical template matcher for cubical complexes, a
//! coreduction matcher for everything else), forming the Morse complex over
//! the critical cells, and lifting the grading through the reduction. The
//! [`connection_matrix`] driver repeats this until the cell count stabilises
//! at the minimal complex; [`homology`] runs the same loop ungraded, leaving
//! the Z/2 Betti numbers as cell counts.
//!
//! # Examples
//!
//! ```rust
//! use conmat::{
//!     ComplexLike, CubicalComplex, GradedComplex, Grading, MatchOptions,
//!     connection_matrix,
//! };
//!
//! // A 3-by-4 rectangle of boxes, trivially graded, is contractible.
//! let complex = CubicalComplex::new(vec![3, 4]);
//! let graded = GradedComplex::new(complex.into(), Grading::Constant(0));
//!
//! let minimal = connection_matrix(&graded, MatchOptions::default());
//! assert_eq!(minimal.complex().counts(), vec![1, 0, 0]);
//! ```

#![warn(missing_docs)]

pub use crate::algebra::Chain;
pub use crate::complexes::{
    CellComplex, Complex, ComplexLike, CubicalComplex, GradedComplex, Grading, construct_grading,
    cubical_nerve, inclusion_grading,
};
pub use crate::homology::{
    CoreductionMatching, CubicalMatching, MatchOptions, Matching, MorseComplex, MorseMatching,
    compute_matching, connection_matrix, connection_matrix_tower, homology, morse_graded_complex,
    morse_graded_complex_with_matching,
};

mod algebra;
mod complexes;
mod homology;
