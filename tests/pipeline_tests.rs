use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use confgen::config::AppConfig;
use confgen::model::ModelError;
use confgen::{Error, pipeline};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Copy the fixture inputs into a scratch directory so tests can edit them.
fn scratch_inputs() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    for entry in fs::read_dir(fixtures().join("input")).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
    }
    dir
}

fn config_for(input: &Path, output: &Path) -> AppConfig {
    AppConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        ..AppConfig::default()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn generates_all_four_outputs() {
    let out = tempdir().unwrap();
    let output_dir = out.path().join("out");
    let config = config_for(&fixtures().join("input"), &output_dir);

    let written = pipeline::run(&config).unwrap();
    assert_eq!(
        written,
        vec![
            output_dir.join("config.xml"),
            output_dir.join("meta.json"),
            output_dir.join("delta.json"),
            output_dir.join("res_patched_config.json"),
        ]
    );

    let expected_xml = fs::read_to_string(fixtures().join("expected_config.xml")).unwrap();
    assert_eq!(
        fs::read_to_string(output_dir.join("config.xml")).unwrap(),
        expected_xml
    );
}

#[test]
fn metadata_catalog_covers_every_class() {
    let out = tempdir().unwrap();
    let config = config_for(&fixtures().join("input"), out.path());
    pipeline::run(&config).unwrap();

    let meta = read_json(&out.path().join("meta.json"));
    let records = meta.as_array().unwrap();
    let classes: Vec<&str> = records
        .iter()
        .map(|r| r["class"].as_str().unwrap())
        .collect();
    assert_eq!(
        classes,
        vec!["BTS", "MGMT", "HWE", "RU", "COMM", "MetricJob"]
    );

    assert_eq!(
        records[0],
        json!({
            "class": "BTS",
            "documentation": "Base Transmitter Station. This is the only root class",
            "isRoot": true,
            "max": "0",
            "min": "0",
            "parameters": [
                {"name": "id", "type": "uint32"},
                {"name": "name", "type": "string"},
                {"name": "MGMT", "type": "class"},
                {"name": "HWE", "type": "class"},
                {"name": "COMM", "type": "class"}
            ]
        })
    );
    assert_eq!(records[3]["min"], "0");
    assert_eq!(records[3]["max"], "42");
}

#[test]
fn delta_and_patched_config_round_trip() {
    let out = tempdir().unwrap();
    let config = config_for(&fixtures().join("input"), out.path());
    pipeline::run(&config).unwrap();

    assert_eq!(
        read_json(&out.path().join("delta.json")),
        json!({
            "additions": [{"key": "vendor", "value": "acme"}],
            "deletions": ["legacy"],
            "updates": [
                {"key": "name", "from": "BTS-33", "to": "BTS-33a"},
                {
                    "key": "parameters",
                    "from": {"freq": 900, "power": [10, 20]},
                    "to": {"freq": 1800, "power": [10, 20]}
                }
            ]
        })
    );
    assert_eq!(
        read_json(&out.path().join("res_patched_config.json")),
        read_json(&fixtures().join("input").join("patched_config.json"))
    );
}

#[test]
fn generate_keeps_delta_and_patched_document_in_memory() {
    let out = tempdir().unwrap();
    let output_dir = out.path().join("out");
    let config = config_for(&fixtures().join("input"), &output_dir);

    let artifacts = pipeline::generate(&config).unwrap();
    assert!(!output_dir.exists());

    let keys = |updates: &[confgen::delta::Update]| -> Vec<String> {
        updates.iter().map(|u| u.key.clone()).collect()
    };
    assert_eq!(artifacts.delta.additions.len(), 1);
    assert_eq!(artifacts.delta.additions[0].key, "vendor");
    assert_eq!(artifacts.delta.deletions, vec!["legacy".to_string()]);
    assert_eq!(keys(&artifacts.delta.updates), vec!["name", "parameters"]);

    assert_eq!(
        Value::Object(artifacts.patched),
        read_json(&fixtures().join("input").join("patched_config.json"))
    );
    assert_eq!(
        serde_json::from_str::<Value>(&artifacts.delta_json).unwrap(),
        serde_json::to_value(&artifacts.delta).unwrap()
    );
}

#[test]
fn json_outputs_use_four_space_indent() {
    let out = tempdir().unwrap();
    let config = config_for(&fixtures().join("input"), out.path());
    pipeline::run(&config).unwrap();

    let delta = fs::read_to_string(out.path().join("delta.json")).unwrap();
    assert!(delta.starts_with("{\n    \"additions\": [\n        {"));
}

#[test]
fn missing_input_writes_nothing() {
    for missing in ["impulse_test_input.xml", "config.json", "patched_config.json"] {
        let input = scratch_inputs();
        fs::remove_file(input.path().join(missing)).unwrap();

        let out = tempdir().unwrap();
        let output_dir = out.path().join("out");
        let err = pipeline::run(&config_for(input.path(), &output_dir)).unwrap_err();

        match err {
            Error::MissingInput(path) => assert_eq!(path, input.path().join(missing)),
            other => panic!("expected MissingInput for {missing}, got {other:?}"),
        }
        assert!(!output_dir.exists(), "output written despite missing {missing}");
    }
}

#[test]
fn malformed_markup_writes_nothing() {
    let input = scratch_inputs();
    fs::write(
        input.path().join("impulse_test_input.xml"),
        "<XMI><Class name=\"A\" isRoot=\"true\"></XMI>",
    )
    .unwrap();

    let out = tempdir().unwrap();
    let output_dir = out.path().join("out");
    let err = pipeline::run(&config_for(input.path(), &output_dir)).unwrap_err();

    assert!(matches!(err, Error::Markup { .. }), "got {err:?}");
    assert!(!output_dir.exists());
}

#[test]
fn malformed_config_json_writes_nothing() {
    let input = scratch_inputs();
    fs::write(input.path().join("patched_config.json"), "{ not json").unwrap();

    let out = tempdir().unwrap();
    let output_dir = out.path().join("out");
    let err = pipeline::run(&config_for(input.path(), &output_dir)).unwrap_err();

    assert!(matches!(err, Error::Json { .. }), "got {err:?}");
    assert!(!output_dir.exists());
}

#[test]
fn failed_write_leaves_output_dir_empty() {
    let out = tempdir().unwrap();
    let mut config = config_for(&fixtures().join("input"), out.path());
    config.outputs.delta = "no_such_subdir/delta.json".into();

    let err = pipeline::run(&config).unwrap_err();
    match err {
        Error::Write { path, .. } => {
            assert_eq!(path, out.path().join("no_such_subdir").join("delta.json"))
        }
        other => panic!("expected Write error, got {other:?}"),
    }

    let leftovers: Vec<PathBuf> = fs::read_dir(out.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert!(leftovers.is_empty(), "partial output left behind: {leftovers:?}");
}

#[test]
fn unknown_aggregation_class_is_fatal() {
    let input = scratch_inputs();
    fs::write(
        input.path().join("impulse_test_input.xml"),
        r#"<XMI>
             <Class name="A" isRoot="true"/>
             <Aggregation source="Missing" target="A" sourceMultiplicity="1"/>
           </XMI>"#,
    )
    .unwrap();

    let out = tempdir().unwrap();
    let err = pipeline::run(&config_for(input.path(), out.path())).unwrap_err();
    assert!(
        matches!(err, Error::Model(ModelError::UnknownClass { ref name, .. }) if name == "Missing"),
        "got {err:?}"
    );
    assert!(!out.path().join("meta.json").exists());
}

#[test]
fn missing_root_is_fatal() {
    let input = scratch_inputs();
    fs::write(
        input.path().join("impulse_test_input.xml"),
        r#"<XMI><Class name="A"/><Class name="B"/></XMI>"#,
    )
    .unwrap();

    let out = tempdir().unwrap();
    let err = pipeline::run(&config_for(input.path(), out.path())).unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::NoRoot)), "got {err:?}");
}

#[test]
fn cyclic_containment_writes_nothing() {
    let input = scratch_inputs();
    fs::write(
        input.path().join("impulse_test_input.xml"),
        r#"<XMI>
             <Class name="A" isRoot="true"/>
             <Class name="B"/>
             <Aggregation source="B" target="A" sourceMultiplicity="1"/>
             <Aggregation source="A" target="B" sourceMultiplicity="1"/>
           </XMI>"#,
    )
    .unwrap();

    let out = tempdir().unwrap();
    let output_dir = out.path().join("out");
    let err = pipeline::run(&config_for(input.path(), &output_dir)).unwrap_err();
    assert!(
        matches!(err, Error::Model(ModelError::CyclicContainment { .. })),
        "got {err:?}"
    );
    assert!(!output_dir.exists());
}

#[test]
fn diff_and_patch_files() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base.json");
    let patched = dir.path().join("patched.json");
    let delta_path = dir.path().join("delta.json");
    fs::write(&base, r#"{"a": 1, "b": 2}"#).unwrap();
    fs::write(&patched, r#"{"b": 3, "c": 4}"#).unwrap();

    let delta = pipeline::diff_files(&base, &patched).unwrap();
    fs::write(&delta_path, serde_json::to_string(&delta).unwrap()).unwrap();

    let rebuilt = pipeline::patch_files(&base, &delta_path).unwrap();
    assert_eq!(Value::Object(rebuilt), json!({"b": 3, "c": 4}));
}
