//! Tests for the Forest aggregate and Tree growth

use rstest::rstest;

use forestry::domain::{DomainError, Forest, Tree, TreeSpecies};

#[ctor::ctor]
fn init() {
    forestry::util::testing::init_test_logging();
}

fn sample_forest() -> Forest {
    let mut forest = Forest::new("acadia");
    forest.add_tree(Tree::new(TreeSpecies::Oak, 2010, 15.0, 0.5));
    forest.add_tree(Tree::new(TreeSpecies::Maple, 2015, 8.0, 0.3));
    forest.add_tree(Tree::new(TreeSpecies::Birch, 2018, 12.0, 1.0));
    forest
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
fn given_tree_when_grown_n_times_then_height_compounds(#[case] n: u32) {
    let mut tree = Tree::new(TreeSpecies::Fir, 2012, 14.0, 12.5);
    for _ in 0..n {
        tree.grow();
    }
    let expected = 14.0 * (1.0_f64 + 12.5 / 100.0).powi(n as i32);
    assert!((tree.height() - expected).abs() < 1e-9);
}

#[test]
fn given_forest_when_growing_all_then_every_tree_advances() {
    let mut forest = sample_forest();
    forest.grow_all();
    assert!((forest.trees()[0].height() - 15.0 * 1.005).abs() < 1e-9);
    assert!((forest.trees()[1].height() - 8.0 * 1.003).abs() < 1e-9);
    assert!((forest.trees()[2].height() - 12.0 * 1.01).abs() < 1e-9);
}

#[test]
fn given_threshold_when_reaping_then_only_taller_trees_are_removed_in_order() {
    let mut forest = sample_forest();
    let reaped = forest.reap_above(12.0);

    // 15.0 is strictly above; 12.0 is not
    assert_eq!(reaped, 1);
    let species: Vec<_> = forest.trees().iter().map(|t| t.species()).collect();
    assert_eq!(species, vec![TreeSpecies::Maple, TreeSpecies::Birch]);
}

#[test]
fn given_reaped_forest_when_reaping_again_then_nothing_changes() {
    let mut forest = sample_forest();
    forest.reap_above(12.0);
    let second = forest.reap_above(12.0);
    assert_eq!(second, 0);
    assert_eq!(forest.len(), 2);
}

#[test]
fn given_nan_threshold_when_reaping_then_no_tree_is_removed() {
    // "nan" parses as f64 at the reap prompt; nothing is strictly
    // greater than NaN, so the forest must survive intact
    let mut forest = sample_forest();
    let reaped = forest.reap_above(f64::NAN);
    assert_eq!(reaped, 0);
    assert_eq!(forest.len(), 3);
}

#[test]
fn given_nan_height_tree_when_reaping_then_it_is_never_removed() {
    let mut forest = Forest::new("swamp");
    forest.add_tree(Tree::new(TreeSpecies::Willow, 2019, f64::NAN, 1.0));
    forest.add_tree(Tree::new(TreeSpecies::Pine, 2020, 30.0, 1.0));

    let reaped = forest.reap_above(12.0);

    assert_eq!(reaped, 1);
    assert_eq!(forest.trees()[0].species(), TreeSpecies::Willow);
}

#[test]
fn given_empty_forest_when_averaging_then_returns_zero() {
    let forest = Forest::new("empty");
    assert_eq!(forest.average_height(), 0.0);
}

#[test]
fn given_two_trees_when_averaging_then_returns_mean() {
    let mut forest = Forest::new("pair");
    forest.add_tree(Tree::new(TreeSpecies::Pine, 2020, 10.0, 1.0));
    forest.add_tree(Tree::new(TreeSpecies::Willow, 2021, 20.0, 1.0));
    assert!((forest.average_height() - 15.0).abs() < 1e-12);
}

#[test]
fn given_forest_when_removing_first_tree_then_later_indices_shift() {
    let mut forest = sample_forest();
    let removed = forest.remove_tree(0).unwrap();

    assert_eq!(removed.species(), TreeSpecies::Oak);
    assert_eq!(forest.trees()[0].species(), TreeSpecies::Maple);
    assert_eq!(forest.trees()[1].species(), TreeSpecies::Birch);
}

#[rstest]
#[case(3)]
#[case(-1)]
fn given_out_of_range_index_when_removing_then_forest_is_unchanged(#[case] index: i64) {
    let mut forest = sample_forest();
    let err = forest.remove_tree(index).unwrap_err();
    assert_eq!(err, DomainError::TreeNotFound(index));
    assert_eq!(forest.len(), 3);
}

#[test]
fn given_empty_forest_when_writing_summary_then_prints_empty_notice() {
    let forest = Forest::new("empty");
    let mut out = Vec::new();
    forest.write_summary(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Forest name: empty"));
    assert!(text.contains("The forest is empty."));
}

#[test]
fn given_populated_forest_when_writing_summary_then_prints_lines_and_footer() {
    let forest = sample_forest();
    let mut out = Vec::new();
    forest.write_summary(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Forest name: acadia"));
    assert!(text.contains("     0 OAK     2010   15.00'   0.5%"));
    assert!(text.contains("     1 MAPLE   2015    8.00'   0.3%"));
    assert!(text.contains("     2 BIRCH   2018   12.00'   1.0%"));
    assert!(text.contains("There are 3 trees, with an average height of 11.67"));
}
