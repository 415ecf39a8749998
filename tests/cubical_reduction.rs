//! Reduction of graded cubical grids, pinned to exact cell indices.
//!
//! The scenario is a 3-by-4 grid of boxes whose 2-cells are graded 1 and
//! whose vertices and edges are graded 0, truncated at grade 0. The matcher
//! leaves one critical vertex (11) and six critical edges (24, 25, 27, 28,
//! 30, 31); every flow, lift, and coflow value below follows from that
//! matching.

use conmat::{
    Chain, ComplexLike, MatchOptions, MorseComplex, MorseMatching, morse_graded_complex,
};
use test_utilities::{circle_in_grid, edge_skeleton_grid};

fn chain(cells: &[u32]) -> Chain {
    cells.iter().copied().collect()
}

fn truncated_skeleton() -> (conmat::GradedComplex, MatchOptions) {
    let options = MatchOptions {
        truncate: true,
        max_grade: 0,
        ..MatchOptions::default()
    };
    (edge_skeleton_grid(vec![3, 4]), options)
}

fn reduced_skeleton() -> std::sync::Arc<MorseComplex> {
    let (graded, options) = truncated_skeleton();
    let reduced = morse_graded_complex(&graded, options);
    std::sync::Arc::clone(reduced.complex().as_morse().expect("reduction yields a Morse complex"))
}

#[test]
fn sizes() {
    let morse = reduced_skeleton();

    assert_eq!(morse.size(), 7);
    assert_eq!(morse.dimension(), 2);
    assert_eq!(morse.counts(), vec![1, 6, 0]);
}

#[test]
fn include_and_project() {
    let morse = reduced_skeleton();

    let included: Vec<Chain> = (0..morse.size())
        .map(|cell| morse.include(&Chain::singleton(cell)))
        .collect();
    let expected = [
        chain(&[11]),
        chain(&[24]),
        chain(&[25]),
        chain(&[27]),
        chain(&[28]),
        chain(&[30]),
        chain(&[31]),
    ];
    assert_eq!(included, expected);

    for (new_cell, old_chain) in included.iter().enumerate() {
        assert_eq!(morse.project(old_chain), Chain::singleton(new_cell as u32));
    }

    // A non-critical cell projects to zero.
    assert_eq!(morse.project(&chain(&[13])), Chain::new());
}

#[test]
fn minimal_boundaries() {
    let morse = reduced_skeleton();

    // One iteration already reaches the minimal Morse complex.
    for cell in 0..morse.size() {
        assert_eq!(morse.cell_boundary(cell), Chain::new());
        assert_eq!(morse.cell_coboundary(cell), Chain::new());
    }
}

#[test]
fn flow_values() {
    let morse = reduced_skeleton();

    // Queens flow to the critical vertex, cancelling along the way.
    assert_eq!(
        morse.flow(&chain(&[0])),
        (chain(&[11]), chain(&[12, 13, 26, 29, 32]))
    );
    assert_eq!(morse.flow(&chain(&[4])), (chain(&[11]), chain(&[16, 29, 32])));
    assert_eq!(morse.flow(&chain(&[10])), (chain(&[11]), chain(&[22])));

    // An ace is already canonical.
    assert_eq!(morse.flow(&chain(&[11])), (chain(&[11]), Chain::new()));

    // Edges are kings or aces here, hence canonical.
    for cell in morse.base().range(1) {
        assert_eq!(morse.flow(&chain(&[cell])), (chain(&[cell]), Chain::new()));
    }
}

#[test]
fn lift_and_lower() {
    let morse = reduced_skeleton();

    assert_eq!(morse.lift(&morse.project(&chain(&[11]))), chain(&[11]));
    assert_eq!(
        morse.lift(&morse.project(&chain(&[25]))),
        chain(&[13, 16, 25, 26])
    );
    assert_eq!(
        morse.lift(&morse.project(&chain(&[30]))),
        chain(&[18, 19, 21, 22, 30, 32])
    );

    // In the minimal Morse complex every cell lifts to a cycle.
    for cell in 0..morse.size() {
        assert_eq!(
            morse.base().boundary(&morse.lift(&Chain::singleton(cell))),
            Chain::new()
        );
    }

    // Every vertex flows to the critical one.
    for cell in morse.base().range(0) {
        assert_eq!(
            morse.lower(&chain(&[cell])),
            morse.project(&chain(&[11]))
        );
    }

    // Kings are canonical but project to zero; aces project to themselves.
    for cell in morse.base().range(1) {
        assert_eq!(morse.lower(&chain(&[cell])), morse.project(&chain(&[cell])));
    }
}

#[test]
fn coflow_values() {
    let morse = reduced_skeleton();

    // Vertices are queens or aces, hence cocanonical.
    for cell in morse.base().range(0) {
        assert_eq!(morse.coflow(&chain(&[cell])), (chain(&[cell]), Chain::new()));
    }

    // Critical cells are cocanonical.
    for cell in 0..morse.size() {
        let included = morse.include(&Chain::singleton(cell));
        assert_eq!(morse.coflow(&included), (included.clone(), Chain::new()));
    }

    // Kings propagate up the gradient.
    assert_eq!(
        morse.coflow(&chain(&[12])),
        (chain(&[23, 24, 33]), chain(&[0]))
    );
    assert_eq!(
        morse.coflow(&chain(&[29])),
        (
            chain(&[17, 23, 27, 28, 33, 34, 35]),
            chain(&[0, 1, 2, 3, 4, 5])
        )
    );
}

#[test]
fn colift_and_colower() {
    let morse = reduced_skeleton();

    // The dual generator of the critical vertex spans every vertex.
    assert_eq!(
        morse.colift(&morse.project(&chain(&[11]))),
        (0u32..12).collect::<Chain>()
    );

    // Critical edges colift to themselves.
    for cell in morse.range(1) {
        assert_eq!(
            morse.colift(&Chain::singleton(cell)),
            morse.include(&Chain::singleton(cell))
        );
    }

    // Queens are cocanonical but project to zero; aces to themselves.
    for cell in morse.base().range(0) {
        assert_eq!(
            morse.colower(&chain(&[cell])),
            morse.project(&chain(&[cell]))
        );
    }

    assert_eq!(morse.colower(&chain(&[12])), chain(&[1]));
    assert_eq!(morse.colower(&chain(&[29])), chain(&[3, 4]));
}

#[test]
fn matching_trichotomy() {
    let morse = reduced_skeleton();
    let matching = morse.matching();
    let base = morse.base();

    for cell in 0..base.size() {
        let mate = matching.mate(cell);
        assert!(mate < base.size());
        assert!(mate == cell || matching.mate(mate) == cell);
    }
}

#[test]
fn graded_reduction_counts() {
    // The grade-0 part of the grading is a circle; the rest of the rectangle
    // fills it in at grade 1.
    let graded = circle_in_grid();

    let first = morse_graded_complex(&graded, MatchOptions::default());
    let counts = first.counts();
    assert_eq!(counts[&0], vec![1, 1, 0]);
    assert_eq!(counts[&1], vec![1, 1, 1]);

    // The grade-0 part is fully reduced after one step.
    let morse = first.complex().as_morse().unwrap();
    for cell in 0..morse.size() {
        assert!(first.value(cell) == 1 || morse.cell_boundary(cell) == Chain::new());
    }

    // A second reduction cancels the spare grade-1 vertex-edge pair; the
    // connecting square survives in its own grade.
    let second = morse_graded_complex(&first, MatchOptions::default());
    let counts = second.counts();
    assert_eq!(counts[&0], vec![1, 1, 0]);
    assert_eq!(counts[&1], vec![0, 0, 1]);

    // Truncating the second reduction at grade 0 leaves the circle's pair.
    let truncated = morse_graded_complex(
        &second,
        MatchOptions {
            truncate: true,
            max_grade: 0,
            ..MatchOptions::default()
        },
    );
    let counts = truncated.counts();
    assert_eq!(counts.keys().copied().collect::<Vec<i64>>(), vec![0]);
    assert_eq!(counts[&0], vec![1, 1, 0]);
}

#[test]
fn boundary_squares_to_zero_in_graded_reduction() {
    let graded = circle_in_grid();
    let first = morse_graded_complex(&graded, MatchOptions::default());
    let morse = first.complex().as_morse().unwrap();

    for cell in 0..morse.size() {
        assert_eq!(morse.boundary(&morse.cell_boundary(cell)), Chain::new());
    }

    // bd and cbd stay transposed.
    for cell in 0..morse.size() {
        for face in &morse.cell_boundary(cell) {
            assert!(morse.cell_coboundary(face).contains(cell));
        }
    }
}
