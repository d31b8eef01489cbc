use super::*;
use crate::fixtures::ExperimentBuilder;
use crate::schema::{DATA_STORAGE, SPECTRA_ORIGIN};
use tempfile::tempdir;

#[test]
fn test_basename_and_sample_name() {
    assert_eq!(basename("/data/raw/ko15.mzML"), "ko15.mzML");
    assert_eq!(basename("ko15.mzML"), "ko15.mzML");
    assert_eq!(sample_name("/data/raw/ko15.mzML"), "ko15");
    assert_eq!(sample_name("/data/raw/ko15.CDF"), "ko15");
    assert_eq!(sample_name("blank"), "blank");
}

#[test]
fn test_relocate_keeps_quoting() {
    let base = Path::new("/new/place");
    assert_eq!(
        relocate("\"/old/ko15.mzML\"", base),
        "\"/new/place/ko15.mzML\""
    );
    assert_eq!(relocate("/old/ko16.mzML", base), "/new/place/ko16.mzML");
}

#[test]
fn test_relocate_skips_missing_values() {
    let base = Path::new("/new");
    assert_eq!(relocate("NA", base), "NA");
    assert_eq!(relocate("\"NA\"", base), "\"NA\"");
    assert_eq!(relocate("\"\"", base), "\"\"");
}

#[test]
fn test_rewrite_spectra_paths() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .raw_dir("/data/run_2024")
        .sample("ko15", 3)
        .sample("ko16", 2)
        .write(&dir.path().join("exp"));

    let rewritten = rewrite_spectra_paths(&experiment, "/mnt/spectra").unwrap();
    // 5 spectra x 2 backend columns + 2 samples
    assert_eq!(rewritten, 12);

    let backend = experiment.backend_data().unwrap();
    assert_eq!(backend.preamble, vec!["# MsBackendMzR".to_string()]);
    let origins: Vec<&str> = backend.column_values(DATA_ORIGIN).unwrap().collect();
    assert_eq!(origins[0], "\"/mnt/spectra/ko15.mzML\"");
    assert_eq!(origins[4], "\"/mnt/spectra/ko16.mzML\"");
    let storage: Vec<&str> = backend.column_values(DATA_STORAGE).unwrap().collect();
    assert_eq!(storage[3], "\"/mnt/spectra/ko16.mzML\"");

    let samples = experiment.sample_data().unwrap();
    let origins: Vec<&str> = samples.column_values(SPECTRA_ORIGIN).unwrap().collect();
    assert_eq!(
        origins,
        vec!["\"/mnt/spectra/ko15.mzML\"", "\"/mnt/spectra/ko16.mzML\""]
    );

    // Untouched cells keep their bytes
    let text = fs::read_to_string(experiment.file(ExperimentFile::BackendData)).unwrap();
    assert!(text.contains("\"scan=3\""));
    assert!(!text.contains("/data/run_2024/"));
}

#[test]
fn test_rewrite_tolerates_missing_storage_column() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .sample("ko15", 2)
        .write(&dir.path().join("exp"));

    let mut backend = experiment.backend_data().unwrap();
    let position = backend.column_position(DATA_STORAGE).unwrap();
    backend.columns.remove(position);
    for row in &mut backend.rows {
        row.values.remove(position);
    }
    experiment
        .write_table(ExperimentFile::BackendData, &backend)
        .unwrap();

    let rewritten = rewrite_spectra_paths(&experiment, "/elsewhere").unwrap();
    assert_eq!(rewritten, 3);
    assert!(experiment
        .backend_data()
        .unwrap()
        .column_position(DATA_STORAGE)
        .is_none());
}

#[test]
fn test_create_placeholder_spectra() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .sample("ko15", 2)
        .sample("ko16", 2)
        .write(&dir.path().join("exp"));

    let target = dir.path().join("fake").join("spectra");
    let created = create_placeholder_spectra(&experiment, &target).unwrap();

    assert_eq!(
        created,
        vec![target.join("ko15.mzML"), target.join("ko16.mzML")]
    );
    for path in &created {
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
    }
}
