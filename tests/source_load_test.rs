//! Tests for loading forests from delimited source files

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use forestry::application::services::ForestStore;
use forestry::application::ApplicationError;
use forestry::domain::TreeSpecies;
use forestry::infrastructure::RealFileSystem;

#[ctor::ctor]
fn init() {
    forestry::util::testing::init_test_logging();
}

fn store_in(dir: &TempDir) -> ForestStore {
    ForestStore::new(
        Arc::new(RealFileSystem),
        dir.path().to_path_buf(),
        dir.path().to_path_buf(),
    )
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(format!("{name}.csv"));
    std::fs::write(&path, content).expect("write source file");
    path
}

#[test]
fn given_well_formed_source_when_loading_then_trees_appear_in_file_order() {
    let temp = TempDir::new().unwrap();
    write_source(&temp, "acadia", "OAK,2010,15.0,0.5\nMAPLE,2015,8.0,0.3\n");
    let store = store_in(&temp);

    let load = store.load_source("acadia").unwrap();

    assert!(load.malformed.is_none());
    assert_eq!(load.forest.name(), "acadia");
    assert_eq!(load.forest.len(), 2);
    assert_eq!(load.forest.trees()[0].species(), TreeSpecies::Oak);
    assert_eq!(load.forest.trees()[1].species(), TreeSpecies::Maple);
    assert_eq!(load.forest.trees()[1].height(), 8.0);
}

#[test]
fn given_bad_species_line_when_loading_then_parse_stops_with_partial_forest() {
    let temp = TempDir::new().unwrap();
    write_source(
        &temp,
        "acadia",
        "OAK,2010,15.0,0.5\nMAPLE,2015,8.0,0.3\nBADSPECIES,2020,5.0,0.2\n",
    );
    let store = store_in(&temp);

    let load = store.load_source("acadia").unwrap();

    assert_eq!(load.forest.len(), 2);
    let malformed = load.malformed.expect("malformed line reported");
    assert_eq!(malformed.line_no, 3);
    assert!(malformed.reason.contains("BADSPECIES"));
}

#[test]
fn given_non_integer_year_when_loading_then_first_line_is_malformed() {
    let temp = TempDir::new().unwrap();
    write_source(&temp, "acadia", "OAK,twenty-ten,15.0,0.5\n");
    let store = store_in(&temp);

    let load = store.load_source("acadia").unwrap();

    assert!(load.forest.is_empty());
    assert_eq!(load.malformed.unwrap().line_no, 1);
}

#[test]
fn given_missing_source_file_when_loading_then_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let err = store.load_source("ghost").unwrap_err();
    assert!(matches!(err, ApplicationError::SourceNotFound { .. }));
    assert!(!store.source_exists("ghost"));
}

#[test]
fn given_fields_with_spaces_when_loading_then_values_are_trimmed() {
    let temp = TempDir::new().unwrap();
    write_source(&temp, "acadia", "PINE, 2019, 11.5, 14.0\n");
    let store = store_in(&temp);

    let load = store.load_source("acadia").unwrap();
    assert!(load.malformed.is_none());
    assert_eq!(load.forest.trees()[0].species(), TreeSpecies::Pine);
    assert_eq!(load.forest.trees()[0].growth_rate(), 14.0);
}
