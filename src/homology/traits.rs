// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{CoreductionMatching, CubicalMatching, GradedComplex};

/// The interface for an acyclic partial matching used in discrete Morse
/// theoretic cell complex reductions.
///
/// A partial matching pairs *queen* cells to *king* cells of exactly one
/// greater dimension, leaving the unmatched *ace* (critical) cells to
/// generate the reduced Morse complex. The pairing is encoded as an
/// involution [`MorseMatching::mate`]: aces are their own mates, and a cell
/// is a queen or a king according to whether its index is less or greater
/// than its mate's.
///
/// The matching must be *acyclic*: the directed gradient graph with an arc
/// from each king to every boundary queen other than its own mate, plus an
/// arc from each queen to its king, has no cycle. Acyclicity is what makes
/// the flow in [`crate::MorseComplex`] terminate with the canonical
/// projection.
///
/// For an involved treatment of this approach see Harker, Mischaikow, Mrozek,
/// and Nanda, *Discrete Morse Theoretic Algorithms for Computing Homology of
/// Complexes and Maps*.
pub trait MorseMatching {
    /// The mate of `cell`: itself for an ace, its king for a queen, its
    /// queen for a king.
    fn mate(&self, cell: u32) -> u32;

    /// A total order on cells used to sequence the flow. A queen must have
    /// priority greater than or equal to every queen in the boundary of its
    /// king; the flow pops queens in decreasing priority.
    fn priority(&self, cell: u32) -> i64;

    /// The critical cells found by the matching.
    ///
    /// Returns `(begin, reindex)`: `begin[d]` is the index in the reduced
    /// complex of the first critical cell of dimension d (with a final entry
    /// equal to the number of critical cells), and `reindex` lists
    /// `(old_cell, new_index)` pairs in ascending `new_index` order.
    fn critical_cells(&self) -> (&[u32], &[(u32, u32)]);
}

/// Options controlling matching construction, shared by both matchers and
/// the reduction drivers.
///
/// The defaults reproduce an unconstrained matching over the full complex.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchOptions {
    /// Cap the generic matcher at this dimension; homology is then valid up
    /// to dimension `match_dim - 1`. `None` matches the full complex. The
    /// cubical matcher ignores this option.
    pub match_dim: Option<u32>,
    /// When true, cells with grade exceeding `max_grade` are excluded from
    /// matching and from the reduced complex.
    pub truncate: bool,
    /// The largest grade kept when `truncate` is set.
    pub max_grade: i64,
}

/// An acyclic partial matching produced by one of the crate's matchers.
///
/// The variant is selected from the complex variant by
/// [`compute_matching`]; both variants implement [`MorseMatching`].
pub enum Matching {
    /// Template matching on a cubical complex.
    Cubical(CubicalMatching),
    /// Coreduction-based matching on an arbitrary complex.
    Coreduction(CoreductionMatching),
}

impl MorseMatching for Matching {
    fn mate(&self, cell: u32) -> u32 {
        match self {
            Matching::Cubical(matching) => matching.mate(cell),
            Matching::Coreduction(matching) => matching.mate(cell),
        }
    }

    fn priority(&self, cell: u32) -> i64 {
        match self {
            Matching::Cubical(matching) => matching.priority(cell),
            Matching::Coreduction(matching) => matching.priority(cell),
        }
    }

    fn critical_cells(&self) -> (&[u32], &[(u32, u32)]) {
        match self {
            Matching::Cubical(matching) => matching.critical_cells(),
            Matching::Coreduction(matching) => matching.critical_cells(),
        }
    }
}

/// Compute an acyclic partial matching on `graded`, dispatching on the
/// complex variant: cubical complexes get the template matcher, everything
/// else the coreduction matcher. `options.match_dim` is ignored by the
/// cubical path.
#[must_use]
pub fn compute_matching(graded: &GradedComplex, options: MatchOptions) -> Matching {
    if graded.complex().as_cubical().is_some() {
        Matching::Cubical(CubicalMatching::new(graded, options))
    } else {
        Matching::Coreduction(CoreductionMatching::new(graded, options))
    }
}
