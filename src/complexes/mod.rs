// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use cell_complex::CellComplex;
pub use cubical::CubicalComplex;
pub use grading::{
    GradedComplex, Grading, construct_grading, cubical_nerve, inclusion_grading,
};
pub use traits::{Complex, ComplexLike};
pub(crate) use traits::dim_from_begin;

mod cell_complex;
mod cubical;
mod grading;
mod traits;
