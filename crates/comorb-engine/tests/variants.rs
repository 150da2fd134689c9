//! CMR and chronic condition classification over the embedded tables.

use comorb_engine::{Classifier, defaults};

#[test]
fn cmr_combines_every_listed_code() {
    let cmr = &defaults::embedded().expect("embedded data loads").cmr;
    let result = cmr.classify("E11.9 Z23, Z20.828 , J30.1, N18.3");
    assert_eq!(result.len(), 39);
    assert_eq!(result.sum(), 2);
    insta::assert_snapshot!(result.label().unwrap_or_default(), @"DIAB_UNCX | RENLFL_MOD");
}

#[test]
fn cmr_batch_rows_follow_inputs() {
    let cmr = &defaults::embedded().expect("embedded data loads").cmr;
    let table = cmr.classify_all(&["E11.9 Z23, Z20.828", "J30.1", "N18.3"]);

    let sums: Vec<usize> = table.rows().map(|row| row.sum()).collect();
    assert_eq!(sums, [1, 0, 1]);
    assert_eq!(table.total(), 2);
    assert_eq!(table.column("DIAB_UNCX"), Some(vec![true, false, false]));
}

#[test]
fn cci_labels_body_system() {
    let cci = &defaults::embedded().expect("embedded data loads").cci;
    assert_eq!(
        cci.label("428.0").as_deref(),
        Some("Diseases of the circulatory system")
    );
    assert_eq!(cci.label(""), None);
    assert_eq!(cci.classify("4280|4280,1611, 1, 0010").sum(), 2);
}

#[test]
fn cci_batch() {
    let cci = &defaults::embedded().expect("embedded data loads").cci;
    let table = cci.classify_all(&["4280|4280", "1611, 1, 0010", ""]);

    assert_eq!(table.shape(), (3, 18));
    let sums: Vec<usize> = table.rows().map(|row| row.sum()).collect();
    assert_eq!(sums, [1, 1, 0]);
    assert_eq!(table.total(), 2);
}

#[test]
fn cci_lookup_and_chronic_bit() {
    let cci = &defaults::embedded().expect("embedded data loads").cci;

    let row = cci.table().lookup_prefix("428").expect("prefix of 4280");
    assert_eq!(row.code, "4280");
    assert_eq!(row.description, "CONGESTIVE HEART FAILURE NOS");

    assert!(cci.classify_chronic("1611"));
    assert!(!cci.classify_chronic("0010"));
    assert!(cci.lookup("9999").is_none());
}

#[test]
fn batch_table_serializes_rows_as_integers() {
    let cci = &defaults::embedded().expect("embedded data loads").cci;
    let table = cci.classify_all(&["428.0"]);
    let json = serde_json::to_value(&table).expect("serializes");
    assert_eq!(json["categories"].as_array().map(Vec::len), Some(18));
    assert_eq!(json["rows"][0][6], 1);
    assert_eq!(json["rows"][0][0], 0);
}
