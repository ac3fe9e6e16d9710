use std::fs;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use biogrid_atomese::config::{ConfigLoader, DEFAULT_SCRIPT};
use biogrid_atomese::error::BiogridError;

#[test]
fn resolve_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("biogrid-atomese.json");
    fs::write(
        &path,
        r#"{ "dataset_dir": "atomspace/full", "metadata_path": "meta/registry.json" }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.dataset_dir, Utf8PathBuf::from("atomspace/full"));
    assert_eq!(resolved.metadata_path, Utf8PathBuf::from("meta/registry.json"));
    assert_eq!(resolved.gene_level_dir, Utf8PathBuf::from("gene-level"));
    assert_eq!(resolved.raw_data_dir, Utf8PathBuf::from("raw_data"));
    assert_eq!(resolved.script, DEFAULT_SCRIPT);
}

#[test]
fn named_config_must_exist() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("missing.json");
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, BiogridError::ConfigRead(_));
}

#[test]
fn malformed_config_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, "{ dataset_dir: ").unwrap();
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, BiogridError::ConfigParse(_));
}
