// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Implementation of a cubical complex with more cells than can be explicitly
//! stored. The complex is a rectangular grid of boxes on the integer lattice;
//! cells are cubes of every dimension up to the ambient dimension.
//!
//! ## Shapes and positions
//!
//! A cube is identified by a *shape* and a *position*. The shape is a bitmask
//! over the D axes recording along which axes the cube is extended; the
//! position is a flat index into the grid with place value
//! `PV[d] = boxes[0]·…·boxes[d-1]` for axis d. A cube of shape `s` at
//! position `p` occupies the interval `[c_d, c_d + 1]` along each extended
//! axis d and the point `{c_d}` along each other axis, where `c` are the
//! coordinates of `p`.
//!
//! Cells are numbered `TS[shape] · type_size + position`, where `type_size`
//! is the number of positions and `TS` orders shapes by ascending dimension.
//! This makes the cell numbering dense and dimension-ordered as required by
//! [`ComplexLike`].
//!
//! ## The fringe
//!
//! Position arithmetic is flat, modulo `type_size`, so the underlying lattice
//! is periodic. Cubes extended along an axis at that axis's last coordinate
//! wrap around the grid; these are the *right fringe*. The fringe cells close
//! the boundary operator but represent no geometry of the rectangle, so the
//! matchers never pair or report them.
//!
//! # Examples
//!
//! ```rust
//! use conmat::{ComplexLike, CubicalComplex};
//!
//! // A 3-by-4 grid: 12 vertices, 12 + 12 edges, 12 squares.
//! let complex = CubicalComplex::new(vec![3, 4]);
//!
//! assert_eq!(complex.size(), 48);
//! assert_eq!(complex.counts(), vec![12, 24, 12]);
//!
//! // The edge from vertex 0 to vertex 1 extends along axis 0.
//! assert_eq!(complex.cell_boundary(12), [0, 1].into_iter().collect());
//! assert!(!complex.rightfringe(12));
//!
//! // The edge at the last column wraps; it is fringe.
//! assert!(complex.rightfringe(14));
//! ```

use std::ops::Range;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ComplexLike;

/// A finite cubical complex on a rectangular grid of boxes, stored
/// implicitly.
///
/// Only the per-axis box counts are stored; every query is O(ambient
/// dimension) index arithmetic. See the module-level documentation for the
/// cell numbering scheme and the fringe convention.
#[derive(Clone, Debug)]
pub struct CubicalComplex {
    boxes: Vec<u32>,
    place_values: Vec<u32>,
    type_size: u32,
    /// Ordinal of each shape in the dimension-sorted shape order.
    type_of_shape: Vec<u32>,
    /// Shape of each ordinal; inverse of `type_of_shape`.
    shape_of_type: Vec<u32>,
    begin: Vec<u32>,
}

impl CubicalComplex {
    /// Create a cubical complex on a grid with `boxes[d]` boxes along axis d.
    ///
    /// # Panics
    /// Panics if `boxes` is empty, if any axis has zero boxes, if the ambient
    /// dimension exceeds 31, or if the total cell count overflows `u32`.
    #[must_use]
    pub fn new(boxes: Vec<u32>) -> Self {
        assert!(!boxes.is_empty(), "cubical complex must have at least one axis");
        assert!(
            boxes.len() <= 31,
            "cubical complex ambient dimension cannot exceed 31"
        );
        assert!(
            boxes.iter().all(|&count| count >= 1),
            "each axis must have at least one box"
        );

        let dimension = boxes.len();
        let mut place_values = Vec::with_capacity(dimension);
        let mut type_size: u64 = 1;
        for &count in &boxes {
            place_values.push(type_size as u32);
            type_size *= u64::from(count);
            assert!(type_size <= u64::from(u32::MAX), "cell count overflow");
        }
        assert!(
            type_size << dimension <= u64::from(u32::MAX),
            "cell count overflow"
        );
        let type_size = type_size as u32;

        // Shapes sorted by dimension, ties by numeric value, so that cell
        // indices are dimension-ordered.
        let shape_count = 1u32 << dimension;
        let mut shape_of_type: Vec<u32> = (0..shape_count).collect();
        shape_of_type.sort_by_key(|&shape| (shape.count_ones(), shape));
        let mut type_of_shape = vec![0; shape_count as usize];
        for (ordinal, &shape) in shape_of_type.iter().enumerate() {
            type_of_shape[shape as usize] = ordinal as u32;
        }

        let mut begin = Vec::with_capacity(dimension + 2);
        let mut first = 0u32;
        for dim in 0..=dimension as u32 {
            begin.push(first);
            let shapes_in_dim = shape_of_type
                .iter()
                .filter(|shape| shape.count_ones() == dim)
                .count() as u32;
            first += shapes_in_dim * type_size;
        }
        begin.push(first);

        Self {
            boxes,
            place_values,
            type_size,
            type_of_shape,
            shape_of_type,
            begin,
        }
    }

    /// The number of boxes along each axis.
    #[must_use]
    pub fn boxes(&self) -> &[u32] {
        &self.boxes
    }

    /// The number of positions per shape.
    #[must_use]
    pub fn type_size(&self) -> u32 {
        self.type_size
    }

    /// The ordinal of each shape in the dimension-sorted shape order,
    /// indexed by shape bitmask. A cell's index is
    /// `ts()[shape] * type_size() + position`.
    #[must_use]
    pub fn ts(&self) -> &[u32] {
        &self.type_of_shape
    }

    /// The extent bitmask of `cell`: bit d is set iff the cube extends along
    /// axis d.
    #[must_use]
    pub fn cell_shape(&self, cell: u32) -> u32 {
        self.shape_of_type[(cell / self.type_size) as usize]
    }

    /// The position of `cell` within its shape.
    #[must_use]
    pub fn cell_pos(&self, cell: u32) -> u32 {
        cell % self.type_size
    }

    /// The cell index of the cube with the given shape and position.
    #[must_use]
    pub fn cell_index(&self, shape: u32, position: u32) -> u32 {
        debug_assert!(position < self.type_size, "position out of range");
        self.type_of_shape[shape as usize] * self.type_size + position
    }

    /// The per-axis coordinates of a position.
    #[must_use]
    pub fn coordinates(&self, position: u32) -> Vec<u32> {
        let mut remainder = position;
        self.boxes
            .iter()
            .map(|&count| {
                let coordinate = remainder % count;
                remainder /= count;
                coordinate
            })
            .collect()
    }

    /// Return true if `cell` is on the right fringe: it extends along some
    /// axis whose coordinate is the last of that axis, wrapping around the
    /// periodic lattice.
    #[must_use]
    pub fn rightfringe(&self, cell: u32) -> bool {
        let shape = self.cell_shape(cell);
        let mut remainder = self.cell_pos(cell);
        for (axis, &count) in self.boxes.iter().enumerate() {
            let coordinate = remainder % count;
            remainder /= count;
            if shape & (1 << axis) != 0 && coordinate == count - 1 {
                return true;
            }
        }
        false
    }

    /// The top-dimensional cells containing `cell`: one for each subset of
    /// the non-extended axes, stepping one place value down along each axis
    /// in the subset (modulo the lattice).
    #[must_use]
    pub fn topstar(&self, cell: u32) -> Vec<u32> {
        let shape = self.cell_shape(cell);
        let position = self.cell_pos(cell);
        let dimension = self.boxes.len();
        let top_shape = (1u32 << dimension) - 1;

        let free_axes: Vec<usize> = (0..dimension)
            .filter(|&axis| shape & (1 << axis) == 0)
            .collect();

        let mut result = Vec::with_capacity(1 << free_axes.len());
        for subset in 0..(1u32 << free_axes.len()) {
            let mut top_position = i64::from(position);
            for (index, &axis) in free_axes.iter().enumerate() {
                if subset & (1 << index) != 0 {
                    top_position -= i64::from(self.place_values[axis]);
                }
            }
            let top_position = top_position.rem_euclid(i64::from(self.type_size)) as u32;
            result.push(self.cell_index(top_shape, top_position));
        }
        result
    }
}

impl ComplexLike for CubicalComplex {
    fn size(&self) -> u32 {
        *self.begin.last().expect("begin table is never empty")
    }

    fn dimension(&self) -> u32 {
        self.boxes.len() as u32
    }

    fn range(&self, dim: u32) -> Range<u32> {
        self.begin[dim as usize]..self.begin[dim as usize + 1]
    }

    fn cell_dim(&self, cell: u32) -> u32 {
        self.cell_shape(cell).count_ones()
    }

    fn column(&self, cell: u32, mut callback: impl FnMut(u32)) {
        let shape = self.cell_shape(cell);
        let position = self.cell_pos(cell);
        for axis in 0..self.boxes.len() {
            let bit = 1u32 << axis;
            if shape & bit != 0 {
                let face_shape = shape ^ bit;
                callback(self.cell_index(face_shape, position));
                let far_position = (position + self.place_values[axis]) % self.type_size;
                callback(self.cell_index(face_shape, far_position));
            }
        }
    }

    fn row(&self, cell: u32, mut callback: impl FnMut(u32)) {
        let shape = self.cell_shape(cell);
        let position = self.cell_pos(cell);
        for axis in 0..self.boxes.len() {
            let bit = 1u32 << axis;
            if shape & bit == 0 {
                let coface_shape = shape | bit;
                callback(self.cell_index(coface_shape, position));
                let far_position = (i64::from(position) - i64::from(self.place_values[axis]))
                    .rem_euclid(i64::from(self.type_size)) as u32;
                callback(self.cell_index(coface_shape, far_position));
            }
        }
    }
}

impl Serialize for CubicalComplex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.boxes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CubicalComplex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(CubicalComplex::new(Vec::<u32>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::Chain;

    use super::*;

    #[test]
    fn numbering() {
        let complex = CubicalComplex::new(vec![3, 4]);
        assert_eq!(complex.type_size(), 12);
        assert_eq!(complex.size(), 48);
        assert_eq!(complex.dimension(), 2);
        assert_eq!(complex.range(0), 0..12);
        assert_eq!(complex.range(1), 12..36);
        assert_eq!(complex.range(2), 36..48);

        // Shape ordinals: vertices, x-edges, y-edges, squares.
        assert_eq!(complex.ts(), &[0, 1, 2, 3]);
        assert_eq!(complex.cell_shape(13), 0b01);
        assert_eq!(complex.cell_shape(25), 0b10);
        assert_eq!(complex.cell_pos(25), 1);
        assert_eq!(complex.cell_index(0b10, 1), 25);
        assert_eq!(complex.cell_dim(40), 2);

        assert_eq!(complex.coordinates(7), vec![1, 2]);
    }

    #[test]
    fn boundary_and_coboundary() {
        let complex = CubicalComplex::new(vec![3, 4]);

        // Horizontal edge 12 at (0, 0) has the two endpoint vertices.
        assert_eq!(complex.cell_boundary(12), [0, 1].into_iter().collect());
        // Vertical edge 26 at (2, 0) runs up to vertex (2, 1).
        assert_eq!(complex.cell_boundary(26), [2, 5].into_iter().collect());
        // Square 39 at (0, 1).
        assert_eq!(
            complex.cell_boundary(39),
            [27, 28, 15, 18].into_iter().collect()
        );

        // Coboundary of vertex 0 wraps into the fringe.
        assert_eq!(
            complex.cell_coboundary(0),
            [12, 23, 24, 33].into_iter().collect()
        );

        // The boundary of a boundary is zero.
        for cell in complex.range(2) {
            assert_eq!(
                complex.boundary(&complex.cell_boundary(cell)),
                Chain::new()
            );
        }
    }

    #[test]
    fn fringe() {
        let complex = CubicalComplex::new(vec![3, 4]);

        // Vertices never extend, so they are never fringe.
        for cell in complex.range(0) {
            assert!(!complex.rightfringe(cell));
        }

        // Horizontal edges at the last column wrap.
        assert!(complex.rightfringe(14));
        assert!(complex.rightfringe(23));
        assert!(!complex.rightfringe(13));

        // Vertical edges at the top row wrap.
        assert!(complex.rightfringe(33));
        assert!(!complex.rightfringe(26));

        // Squares wrap along either axis.
        assert!(complex.rightfringe(38));
        assert!(complex.rightfringe(45));
        assert!(!complex.rightfringe(40));
    }

    #[test]
    fn topstar() {
        let complex = CubicalComplex::new(vec![3, 4]);

        // A square's top star is itself.
        assert_eq!(complex.topstar(40), vec![40]);

        // An edge has two containing squares, stepping down along the free
        // axis.
        let mut star = complex.topstar(15);
        star.sort_unstable();
        assert_eq!(star, vec![36, 39]);

        let mut star = complex.topstar(27);
        star.sort_unstable();
        assert_eq!(star, vec![38, 39]);

        // A vertex has four.
        let mut star = complex.topstar(7);
        star.sort_unstable();
        assert_eq!(star, vec![39, 40, 42, 43]);
    }

    #[test]
    fn one_axis_grid() {
        let complex = CubicalComplex::new(vec![4]);
        assert_eq!(complex.size(), 8);
        assert_eq!(complex.counts(), vec![4, 4]);
        assert_eq!(complex.cell_boundary(4), [0, 1].into_iter().collect());
        assert!(complex.rightfringe(7));
    }

    #[test]
    #[should_panic(expected = "at least one box")]
    fn zero_boxes_panic() {
        CubicalComplex::new(vec![3, 0]);
    }

    #[test]
    fn serde_round_trip() {
        let complex = CubicalComplex::new(vec![5, 6, 2]);
        let json = serde_json::to_string(&complex).unwrap();
        assert_eq!(json, "[5,6,2]");

        let back: CubicalComplex = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size(), complex.size());
        assert_eq!(back.ts(), complex.ts());
    }
}
