// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use coreduction::CoreductionMatching;
pub use cubical::CubicalMatching;
pub use morse::MorseComplex;
pub use reduce::{
    connection_matrix, connection_matrix_tower, homology, morse_graded_complex,
    morse_graded_complex_with_matching,
};
pub use traits::{MatchOptions, Matching, MorseMatching, compute_matching};

mod coreduction;
mod cubical;
mod morse;
mod reduce;
mod traits;
