// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Executable regenerating the serialized test complexes under
//! `testing/complexes/`.

use std::error::Error;
use std::fs;

use conmat::{CellComplex, Chain, CubicalComplex};
use serde::Serialize;

fn write_complex<C>(complex: &C, name: &str) -> Result<(), Box<dyn Error>>
where
    C: Serialize,
{
    let filename = format!("testing/complexes/{}_complex.json", name);
    let json = serde_json::to_string(complex)?;
    fs::write(&filename, json)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all("testing/complexes")?;

    println!("Generating test complexes...");

    write_complex(&triangle(), "triangle")?;
    write_complex(&figure_eight(), "figure_eight")?;
    write_complex(&CubicalComplex::new(vec![3, 4]), "grid_3x4")?;

    Ok(())
}

/// A filled triangle: 3 vertices, 3 edges, 1 face.
fn triangle() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 0, 1, 1, 1, 2],
        vec![
            Chain::new(),
            Chain::new(),
            Chain::new(),
            [0, 1].into_iter().collect(),
            [1, 2].into_iter().collect(),
            [0, 2].into_iter().collect(),
            [3, 4, 5].into_iter().collect(),
        ],
    )
}

/// A wedge of two circles, each made of two edges.
fn figure_eight() -> CellComplex {
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
