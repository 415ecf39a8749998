// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chains over the field with two elements.
//!
//! A chain is a formal Z/2-linear combination of cells, which is the same
//! thing as a finite set of cells: addition is symmetric difference. This
//! module provides [`Chain`], a `HashSet`-backed implementation used for all
//! (co)boundary arithmetic in the crate.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A Z/2 chain: a finite set of cell indices with symmetric difference as
/// addition.
///
/// Adding a cell toggles its membership, so a cell added twice cancels. This
/// is exactly the arithmetic of coefficients in the field with two elements,
/// and it is relied upon throughout: boundary operators visit faces with
/// multiplicity and let cancellation happen in the receiving chain.
///
/// # Examples
///
/// ```rust
/// use conmat::Chain;
///
/// let mut chain = Chain::new();
/// chain += 3;
/// chain += 5;
/// chain += 3; // cancels
///
/// assert_eq!(chain.len(), 1);
/// assert!(chain.contains(5));
/// ```
#[derive(Clone, Debug, Default, Eq)]
pub struct Chain {
    cells: HashSet<u32>,
}

impl Chain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: HashSet::new(),
        }
    }

    /// Create an empty chain with capacity for at least `capacity` cells.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    /// Create a chain containing exactly one cell.
    #[must_use]
    pub fn singleton(cell: u32) -> Self {
        let mut chain = Self::new();
        chain += cell;
        chain
    }

    /// Return true if `cell` has a nonzero coefficient in this chain.
    #[must_use]
    pub fn contains(&self, cell: u32) -> bool {
        self.cells.contains(&cell)
    }

    /// The number of cells with nonzero coefficient.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return true if the chain is the zero chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return some cell of the chain, or `None` if the chain is zero.
    #[must_use]
    pub fn any(&self) -> Option<u32> {
        self.cells.iter().next().copied()
    }

    /// Iterate over the cells of the chain in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().copied()
    }
}

impl AddAssign<u32> for Chain {
    fn add_assign(&mut self, cell: u32) {
        if !self.cells.insert(cell) {
            self.cells.remove(&cell);
        }
    }
}

impl AddAssign<&Chain> for Chain {
    fn add_assign(&mut self, rhs: &Chain) {
        for cell in rhs.iter() {
            *self += cell;
        }
    }
}

impl AddAssign for Chain {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl Add for Chain {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl Add<&Chain> for Chain {
    type Output = Self;

    fn add(mut self, rhs: &Chain) -> Self::Output {
        self += rhs;
        self
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl FromIterator<u32> for Chain {
    /// Collect with toggle semantics: cells appearing an even number of times
    /// cancel.
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut chain = Self::new();
        for cell in iter {
            chain += cell;
        }
        chain
    }
}

impl<'a> IntoIterator for &'a Chain {
    type IntoIter = std::iter::Copied<std::collections::hash_set::Iter<'a, u32>>;
    type Item = u32;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return write!(f, "0");
        }

        let mut cells: Vec<u32> = self.iter().collect();
        cells.sort_unstable();

        let mut first = true;
        for cell in cells {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut cells: Vec<u32> = self.iter().collect();
        cells.sort_unstable();
        cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cells = Vec::<u32>::deserialize(deserializer)?;
        Ok(cells.into_iter().collect())
    }
}
