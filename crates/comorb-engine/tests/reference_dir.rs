//! Classifiers built from reference files on disk.

use std::fs;
use std::path::Path;

use comorb_engine::{Classifier, Classifiers, EngineError};
use comorb_standards::{ReferenceConfig, ReferenceKind, TableError, embedded};
use tempfile::TempDir;

const CUSTOM_ICD9: &str = "\
Comorbidities,Enhanced ICD-9-CM
Congestive heart failure,\"428.x, 402.01\"
Coagulopathy,\"286.x, 287.3-287.5\"
";

fn write_embedded(dir: &Path) {
    for kind in ReferenceKind::all() {
        fs::write(dir.join(kind.default_file_name()), kind.embedded()).expect("write table");
    }
}

#[test]
fn custom_range_table_replaces_embedded_one() {
    let dir = TempDir::new().expect("temp dir");
    write_embedded(dir.path());
    fs::write(dir.path().join("small_icd9.csv"), CUSTOM_ICD9).expect("write table");

    let config = ReferenceConfig::embedded()
        .with_reference_dir(dir.path())
        .with_file_name(ReferenceKind::Icd9Elixhauser, "small_icd9.csv");
    let classifiers = Classifiers::load(&config).expect("tables load");

    let icd9 = &classifiers.icd9_elixhauser;
    assert_eq!(icd9.categories(), ["Congestive heart failure", "Coagulopathy"]);
    assert_eq!(icd9.classify("428.0 287.4").to_vec(), [1, 1]);
    assert_eq!(icd9.classify("287.5").to_vec(), [0, 0]);
    assert_eq!(classifiers.icd10_elixhauser.categories().len(), 31);
}

#[test]
fn toml_config_selects_files() {
    let dir = TempDir::new().expect("temp dir");
    write_embedded(dir.path());
    fs::write(dir.path().join("small_icd9.csv"), CUSTOM_ICD9).expect("write table");

    let config_path = dir.path().join("comorb.toml");
    let toml = format!(
        "reference_dir = {:?}\n\n[files]\nicd9_elixhauser = \"small_icd9.csv\"\n",
        dir.path().display().to_string()
    );
    fs::write(&config_path, toml).expect("write config");

    let config = ReferenceConfig::from_file(&config_path).expect("config parses");
    let classifiers = Classifiers::load(&config).expect("tables load");
    assert_eq!(classifiers.icd9_elixhauser.categories().len(), 2);
    assert_eq!(classifiers.cmr.categories().len(), 39);
}

#[test]
fn missing_file_surfaces_as_table_error() {
    let dir = TempDir::new().expect("temp dir");
    let config = ReferenceConfig::embedded().with_reference_dir(dir.path());

    let err = Classifiers::load(&config).unwrap_err();
    assert!(matches!(err, EngineError::Table(TableError::Io { .. })), "{err}");
}

#[test]
fn three_endpoint_clause_fails_to_load() {
    let dir = TempDir::new().expect("temp dir");
    write_embedded(dir.path());
    fs::write(
        dir.path().join(embedded::ICD9_ELIXHAUSER_FILE),
        "Comorbidities,Enhanced ICD-9-CM\nBroken,\"401.1-401.5-401.9\"\n",
    )
    .expect("write table");

    let config = ReferenceConfig::embedded().with_reference_dir(dir.path());
    let err = Classifiers::load(&config).unwrap_err();
    assert!(
        matches!(err, EngineError::Table(TableError::InvalidExpression { .. })),
        "{err}"
    );
}
