use super::*;
use crate::engine::EngineError;
use crate::fixtures::{fake_engine, ExperimentBuilder};
use std::path::PathBuf;
use tempfile::tempdir;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_even_split() {
    let plan = PartitionPlan::new(names(&["a", "b", "c", "d"]), Some(2)).unwrap();
    assert_eq!(plan.groups(), &[vec![0, 1], vec![2, 3]]);
    assert_eq!(
        plan.keys(),
        vec![PartitionKey::Number(1), PartitionKey::Number(2)]
    );
    assert!(plan.warning().is_none());
}

#[test]
fn test_uneven_split_puts_larger_groups_first() {
    let plan = PartitionPlan::new(names(&["a", "b", "c", "d", "e"]), Some(2)).unwrap();
    assert_eq!(plan.groups(), &[vec![0, 1, 2], vec![3, 4]]);

    let plan = PartitionPlan::new(names(&["a", "b", "c", "d", "e", "f", "g"]), Some(3)).unwrap();
    assert_eq!(plan.groups(), &[vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
}

#[test]
fn test_one_partition_per_sample_keys_by_name() {
    let plan = PartitionPlan::new(names(&["ko15", "ko16", "wt15", "wt16"]), Some(4)).unwrap();
    assert_eq!(
        plan.keys(),
        vec![
            PartitionKey::Sample("ko15".to_string()),
            PartitionKey::Sample("ko16".to_string()),
            PartitionKey::Sample("wt15".to_string()),
            PartitionKey::Sample("wt16".to_string()),
        ]
    );

    let default = PartitionPlan::new(names(&["ko15", "ko16", "wt15", "wt16"]), None).unwrap();
    assert_eq!(default.groups(), plan.groups());
    assert_eq!(default.keys(), plan.keys());
    assert!(default.warning().is_none());
}

#[test]
fn test_over_request_is_clamped() {
    let plan = PartitionPlan::new(names(&["a", "b", "c", "d"]), Some(5)).unwrap();
    assert_eq!(plan.len(), 4);
    assert!(plan.by_sample());
    let warning = plan.warning().unwrap();
    assert!(warning.contains("'5'"));
    assert!(warning.contains("'4'"));
}

#[test]
fn test_invalid_requests() {
    assert!(matches!(
        PartitionPlan::new(Vec::new(), None),
        Err(PartitionError::NoSamples)
    ));
    assert!(matches!(
        PartitionPlan::new(names(&["a"]), Some(0)),
        Err(PartitionError::ZeroPartitions)
    ));
    assert!(matches!(
        PartitionPlan::new(names(&["a", "b", "a"]), None),
        Err(PartitionError::DuplicateSampleName(name)) if name == "a"
    ));
    // Duplicates are fine when keyed by number
    assert!(PartitionPlan::new(names(&["a", "b", "a"]), Some(2)).is_ok());
}

#[test]
fn test_partition_invokes_engine() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .sample("ko15", 3)
        .sample("ko16", 3)
        .sample("wt15", 3)
        .sample("wt16", 3)
        .write(&dir.path().join("exp"));
    let workspace = dir.path().join("parts");

    let engine = fake_engine(|invocation: &Invocation| {
        // Placeholders exist while the engine runs
        let fake = PathBuf::from(invocation.get("fake_spectra").unwrap());
        assert!(fake.join("ko15.mzML").is_file());
        assert!(fake.join("wt16.mzML").is_file());

        let outputs: Vec<String> =
            serde_json::from_str(invocation.get("output_paths").unwrap()).unwrap();
        let groups: Vec<Vec<usize>> =
            serde_json::from_str(invocation.get("partition_indices").unwrap()).unwrap();
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
        let sample_names = ["ko15", "ko16", "wt15", "wt16"];
        for (output, group) in outputs.iter().zip(&groups) {
            let mut builder = ExperimentBuilder::new();
            for &i in group {
                builder = builder.sample(sample_names[i], 3);
            }
            builder.write(Path::new(output));
        }
        Ok(())
    });

    let partitions = partition(&experiment, Some(2), &workspace, &engine).unwrap();

    let keys: Vec<&PartitionKey> = partitions.keys().collect();
    assert_eq!(keys, vec![&PartitionKey::Number(1), &PartitionKey::Number(2)]);
    assert_eq!(
        partitions[&PartitionKey::Number(2)].sample_names().unwrap(),
        vec!["wt15", "wt16"]
    );
    for part in partitions.values() {
        assert!(part.path().starts_with(&workspace));
    }

    let calls = engine.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].script(), PARTITION_SCRIPT);
    assert_eq!(calls[0].package(), "XCMS");
    assert_eq!(
        calls[0].get("xcms_experiment"),
        Some(experiment.path().to_str().unwrap())
    );
    // The scratch directory is gone after the call
    assert!(!Path::new(calls[0].get("fake_spectra").unwrap()).exists());
}

#[test]
fn test_partition_by_sample_name() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .sample("ko15", 2)
        .sample("ko16", 2)
        .write(&dir.path().join("exp"));

    let engine = fake_engine(|_: &Invocation| Ok(()));
    let partitions = partition(&experiment, None, dir.path().join("parts"), &engine).unwrap();

    let keys: Vec<String> = partitions.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["ko15", "ko16"]);
}

#[test]
fn test_engine_failure_leaves_no_partitions() {
    let dir = tempdir().unwrap();
    let experiment = ExperimentBuilder::new()
        .sample("ko15", 2)
        .sample("ko16", 2)
        .write(&dir.path().join("exp"));
    let workspace = dir.path().join("parts");

    let engine = fake_engine(|_: &Invocation| {
        Err(EngineError::ScriptFailed {
            package: "XCMS".to_string(),
            code: Some(1),
        })
    });
    let err = partition(&experiment, Some(2), &workspace, &engine).unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error was encountered while running XCMS, (return code 1), please inspect stdout and stderr to learn more."
    );
    assert_eq!(std::fs::read_dir(&workspace).unwrap().count(), 0);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Groups cover every sample once, in order, with sizes differing by at most one
        #[test]
        fn test_plan_is_contiguous_and_balanced(samples in 1usize..200, requested in 1usize..250) {
            let sample_names: Vec<String> = (0..samples).map(|i| format!("s{}", i)).collect();
            let plan = PartitionPlan::new(sample_names, Some(requested)).unwrap();

            prop_assert_eq!(plan.len(), requested.min(samples));
            let flat: Vec<usize> = plan.groups().iter().flatten().copied().collect();
            prop_assert_eq!(flat, (0..samples).collect::<Vec<_>>());

            let sizes: Vec<usize> = plan.groups().iter().map(Vec::len).collect();
            prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
            let largest = sizes[0];
            let smallest = sizes[sizes.len() - 1];
            prop_assert!(smallest >= 1 && largest - smallest <= 1);

            prop_assert_eq!(plan.warning().is_some(), requested > samples);
            prop_assert_eq!(plan.keys().len(), plan.len());
        }
    }
}
