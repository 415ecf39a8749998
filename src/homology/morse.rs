// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::ops::Range;
use std::sync::Arc;

use crate::complexes::dim_from_begin;
use crate::{
    Chain, Complex, ComplexLike, GradedComplex, Grading, MatchOptions, Matching, MorseMatching,
    compute_matching,
};

/// The reduced complex over the critical cells of an acyclic partial
/// matching.
///
/// A `MorseComplex` is itself a complex (see [`ComplexLike`]); its cells are
/// the aces of the matching, renumbered densely by dimension, and its
/// boundary operator is induced by the gradient flow on the parent complex.
/// The parent complex and matching are held by shared ownership, so towers of
/// successive reductions chain naturally.
///
/// Boundaries and coboundaries of every critical cell are precomputed at
/// construction; all complex queries afterwards are table lookups. The chain
/// maps between the parent and the reduced complex ([`MorseComplex::lift`],
/// [`MorseComplex::lower`] and their duals) remain available and run the
/// flow on demand.
pub struct MorseComplex {
    base: Complex,
    matching: Arc<Matching>,
    begin: Vec<u32>,
    /// Old cell of each new cell; a bijection onto the critical cells.
    inclusion: Vec<u32>,
    /// New index of each critical old cell; inverse of `inclusion`.
    projection: HashMap<u32, u32>,
    boundaries: Vec<Chain>,
    coboundaries: Vec<Chain>,
}

impl MorseComplex {
    /// Construct the reduced complex of `base` under `matching`.
    pub fn new(base: Complex, matching: Arc<Matching>) -> Self {
        let (begin, reindex) = matching.critical_cells();
        let begin = begin.to_vec();

        let mut inclusion = Vec::with_capacity(reindex.len());
        let mut projection = HashMap::with_capacity(reindex.len());
        for &(old_cell, new_index) in reindex {
            debug_assert_eq!(new_index as usize, inclusion.len());
            inclusion.push(old_cell);
            projection.insert(old_cell, new_index);
        }

        let mut complex = Self {
            base,
            matching,
            begin,
            inclusion,
            projection,
            boundaries: Vec::new(),
            coboundaries: Vec::new(),
        };

        let size = complex.inclusion.len();
        let mut boundaries = Vec::with_capacity(size);
        for new_cell in 0..size {
            let old_boundary = complex
                .base
                .boundary(&Chain::singleton(complex.inclusion[new_cell]));
            boundaries.push(complex.lower(&old_boundary));
        }

        let mut coboundaries = vec![Chain::new(); size];
        for (new_cell, boundary) in boundaries.iter().enumerate() {
            for face in boundary {
                coboundaries[face as usize] += new_cell as u32;
            }
        }

        complex.boundaries = boundaries;
        complex.coboundaries = coboundaries;
        complex
    }

    /// Compute a matching on `base` with a trivial grading and construct the
    /// reduced complex from it.
    pub fn reduce(base: Complex, options: MatchOptions) -> Self {
        let graded = GradedComplex::new(base.clone(), Grading::Constant(0));
        let matching = Arc::new(compute_matching(&graded, options));
        Self::new(base, matching)
    }

    /// The parent complex.
    #[must_use]
    pub fn base(&self) -> &Complex {
        &self.base
    }

    /// The matching this complex reduces by.
    #[must_use]
    pub fn matching(&self) -> &Arc<Matching> {
        &self.matching
    }

    /// The critical cell of the parent complex represented by the new cell
    /// `cell`.
    #[must_use]
    pub fn include_cell(&self, cell: u32) -> u32 {
        self.inclusion[cell as usize]
    }

    /// Map a chain of the reduced complex to its representative critical
    /// cells in the parent complex.
    #[must_use]
    pub fn include(&self, chain: &Chain) -> Chain {
        chain.iter().map(|cell| self.include_cell(cell)).collect()
    }

    /// Map a chain of the parent complex onto the reduced complex, keeping
    /// only critical cells. This is not a chain map; see
    /// [`MorseComplex::lower`].
    #[must_use]
    pub fn project(&self, chain: &Chain) -> Chain {
        chain
            .iter()
            .filter_map(|cell| self.projection.get(&cell).copied())
            .collect()
    }

    /// Push a chain of the parent complex down the gradient until no
    /// cancellable queen remains.
    ///
    /// Returns `(canonical, gamma)`: `canonical` is the canonical form of the
    /// input, supported on aces, kings, and queens that could not be
    /// cancelled (none remain on termination); `gamma` collects the kings
    /// whose boundaries were used to cancel queens.
    ///
    /// Queens are cancelled in decreasing priority order, which the matching
    /// guarantees is compatible with the gradient; a queen already toggled
    /// out of the canonical chain by an earlier king is skipped.
    #[must_use]
    pub fn flow(&self, input: &Chain) -> (Chain, Chain) {
        let mut canonical = Chain::new();
        let mut gamma = Chain::new();
        let mut queens: BinaryHeap<(i64, u32)> = BinaryHeap::new();
        let matching = &*self.matching;

        let process = |cell: u32, canonical: &mut Chain, queens: &mut BinaryHeap<(i64, u32)>| {
            if cell < matching.mate(cell) {
                queens.push((matching.priority(cell), cell));
            }
            *canonical += cell;
        };

        for cell in input {
            process(cell, &mut canonical, &mut queens);
        }

        while let Some((_, queen)) = queens.pop() {
            if !canonical.contains(queen) {
                continue;
            }
            let king = matching.mate(queen);
            gamma += king;
            self.base
                .column(king, |cell| process(cell, &mut canonical, &mut queens));
        }

        (canonical, gamma)
    }

    /// Dual of [`MorseComplex::flow`]: push a cochain up the gradient,
    /// cancelling kings against the coboundaries of their queens in
    /// increasing priority order.
    #[must_use]
    pub fn coflow(&self, input: &Chain) -> (Chain, Chain) {
        let mut cocanonical = Chain::new();
        let mut cogamma = Chain::new();
        let mut kings: BinaryHeap<Reverse<(i64, u32)>> = BinaryHeap::new();
        let matching = &*self.matching;

        let process =
            |cell: u32, cocanonical: &mut Chain, kings: &mut BinaryHeap<Reverse<(i64, u32)>>| {
                if cell > matching.mate(cell) {
                    kings.push(Reverse((matching.priority(cell), cell)));
                }
                *cocanonical += cell;
            };

        for cell in input {
            process(cell, &mut cocanonical, &mut kings);
        }

        while let Some(Reverse((_, king))) = kings.pop() {
            if !cocanonical.contains(king) {
                continue;
            }
            let queen = matching.mate(king);
            cogamma += queen;
            self.base
                .row(queen, |cell| process(cell, &mut cocanonical, &mut kings));
        }

        (cocanonical, cogamma)
    }

    /// Lift a chain of the reduced complex to its representative cycle-level
    /// chain in the parent complex. This is a chain map: it commutes with the
    /// boundary operators.
    #[must_use]
    pub fn lift(&self, chain: &Chain) -> Chain {
        let included = self.include(chain);
        let (_, gamma) = self.flow(&self.base.boundary(&included));
        included + gamma
    }

    /// Lower a chain of the parent complex to the reduced complex. This is a
    /// chain map: it commutes with the boundary operators.
    #[must_use]
    pub fn lower(&self, chain: &Chain) -> Chain {
        let (canonical, _) = self.flow(chain);
        self.project(&canonical)
    }

    /// Lift a cochain of the reduced complex to the parent complex; the dual
    /// of [`MorseComplex::lift`].
    #[must_use]
    pub fn colift(&self, cochain: &Chain) -> Chain {
        let included = self.include(cochain);
        let (_, cogamma) = self.coflow(&self.base.coboundary(&included));
        included + cogamma
    }

    /// Lower a cochain of the parent complex to the reduced complex; the
    /// dual of [`MorseComplex::lower`].
    #[must_use]
    pub fn colower(&self, cochain: &Chain) -> Chain {
        let (cocanonical, _) = self.coflow(cochain);
        self.project(&cocanonical)
    }
}

impl ComplexLike for MorseComplex {
    fn size(&self) -> u32 {
        self.inclusion.len() as u32
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
