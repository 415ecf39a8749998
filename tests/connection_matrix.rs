//! Driver-level tests: fixed points, towers, truncation, and Betti numbers.

use conmat::{
    Chain, ComplexLike, CoreductionMatching, MatchOptions, MorseMatching, connection_matrix,
    connection_matrix_tower, homology, morse_graded_complex,
};
use test_utilities::{
    circle_in_grid, edge_skeleton_grid, figure_eight, hollow_square, interval, torus_grid,
    trivially_graded,
};

#[test]
fn unit_square_reduces_to_a_point() {
    // Four vertices, four edges, one 2-cell.
    let complex = conmat::CubicalComplex::new(vec![2, 2]);
    let betti = homology(&complex.into(), MatchOptions::default());
    assert_eq!(betti.counts(), vec![1, 0, 0]);
}

#[test]
fn truncation_keeps_the_low_grade_subcomplex() {
    // Grade one square of a 3-by-3 grid at 0 and the rest at 1: truncating
    // at grade 0 reduces exactly the closure of that square, which is
    // contractible.
    let complex = std::sync::Arc::new(conmat::CubicalComplex::new(vec![3, 3]));
    let grading = conmat::construct_grading(&complex, |top| i64::from(top != 27));
    let graded = conmat::GradedComplex::new(conmat::Complex::Cubical(complex), grading);

    let options = MatchOptions {
        truncate: true,
        max_grade: 0,
        ..MatchOptions::default()
    };
    let minimal = connection_matrix(&graded, options);
    assert_eq!(minimal.complex().counts(), vec![1, 0, 0]);
}

#[test]
fn interval_reduces_to_a_point() {
    let betti = homology(&interval().into(), MatchOptions::default());
    assert_eq!(betti.counts(), vec![1, 0]);
}

#[test]
fn hollow_square_betti_numbers() {
    let betti = homology(&hollow_square().into(), MatchOptions::default());
    assert_eq!(betti.counts(), vec![1, 1]);
}

#[test]
fn figure_eight_betti_numbers() {
    let betti = homology(&figure_eight().into(), MatchOptions::default());
    assert_eq!(betti.counts(), vec![1, 2]);
}

#[test]
fn torus_betti_numbers() {
    for n in [1, 2, 3] {
        let betti = homology(&torus_grid(n).into(), MatchOptions::default());
        assert_eq!(betti.counts(), vec![1, 2, 1], "torus grid of size {}", n);
    }
}

#[test]
fn stabilised_complex_has_zero_boundary() {
    let betti = homology(&torus_grid(3).into(), MatchOptions::default());
    for cell in 0..betti.size() {
        assert_eq!(betti.cell_boundary(cell), Chain::new());
    }
}

#[test]
fn match_dim_caps_valid_homology() {
    // Matching capped at dimension 1 still gets beta_0 right on the torus.
    let options = MatchOptions {
        match_dim: Some(1),
        ..MatchOptions::default()
    };
    let betti = homology(&torus_grid(2).into(), options);
    assert_eq!(betti.size_in_dim(0), 1);
}

#[test]
fn connection_matrix_reaches_a_fixed_point() {
    let graded = circle_in_grid();
    let options = MatchOptions::default();

    let minimal = connection_matrix(&graded, options);
    let again = connection_matrix(&minimal, options);
    assert_eq!(minimal.complex().counts(), again.complex().counts());

    // Grade-0 circle plus the grade-1 connecting square.
    let counts = minimal.counts();
    assert_eq!(counts[&0], vec![1, 1, 0]);
    assert_eq!(counts[&1], vec![0, 0, 1]);
}

#[test]
fn truncated_connection_matrix_matches_the_subcomplex() {
    // Truncating at grade 0 reduces exactly the closed grade-0 subcomplex:
    // the edge skeleton of the rectangle, a wedge of six circles.
    let graded = edge_skeleton_grid(vec![3, 4]);
    let options = MatchOptions {
        truncate: true,
        max_grade: 0,
        ..MatchOptions::default()
    };

    let minimal = connection_matrix(&graded, options);
    assert_eq!(minimal.complex().counts(), vec![1, 6, 0]);
}

#[test]
fn truncation_below_every_grade_leaves_nothing() {
    let graded = trivially_graded(hollow_square());
    let options = MatchOptions {
        truncate: true,
        max_grade: -1,
        ..MatchOptions::default()
    };

    let reduced = morse_graded_complex(&graded, options);
    assert_eq!(reduced.complex().size(), 0);
}

#[test]
fn tower_is_strictly_decreasing_to_the_fixed_point() {
    let graded = trivially_graded(torus_grid(3));
    let options = MatchOptions::default();

    let tower = connection_matrix_tower(&graded, options);
    assert!(tower.len() >= 2);
    assert_eq!(tower[0].complex().size(), graded.complex().size());
    for step in tower.windows(2) {
        assert!(step[1].complex().size() < step[0].complex().size());
    }

    let minimal = connection_matrix(&graded, options);
    assert_eq!(
        tower.last().unwrap().complex().counts(),
        minimal.complex().counts()
    );
}

#[test]
fn tower_of_a_minimal_complex_is_a_single_step() {
    let graded = trivially_graded(hollow_square());
    let options = MatchOptions::default();

    let minimal = connection_matrix(&graded, options);
    let tower = connection_matrix_tower(&minimal, options);
    assert_eq!(tower.len(), 1);
}

#[test]
fn coreduction_matching_invariants_on_the_torus() {
    let graded = trivially_graded(torus_grid(3));
    let matching = CoreductionMatching::new(&graded, MatchOptions::default());
    let complex = graded.complex();

    for cell in 0..complex.size() {
        let mate = matching.mate(cell);
        // Involution and trichotomy.
        assert_eq!(matching.mate(mate), cell);
        if mate != cell {
            let (queen, king) = if cell < mate { (cell, mate) } else { (mate, cell) };
            assert_eq!(complex.cell_dim(queen) + 1, complex.cell_dim(king));
            assert_eq!(graded.value(queen), graded.value(king));
            // Queens are processed before their kings.
            assert!(matching.priority(queen) < matching.priority(king));
        }
    }
}
