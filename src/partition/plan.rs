use std::collections::HashSet;
use std::fmt;

use super::PartitionError;

/// Key of one partition in the result
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartitionKey {
    /// Name of the single sample in the partition
    Sample(String),
    /// 1-based partition number
    Number(usize),
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Sample(name) => f.write_str(name),
            PartitionKey::Number(n) => write!(f, "{}", n),
        }
    }
}

/// How the samples of an experiment are split into partitions.
///
/// The 0-based sample range is cut into contiguous groups whose sizes differ
/// by at most one, larger groups first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    sample_names: Vec<String>,
    groups: Vec<Vec<usize>>,
    requested: Option<usize>,
}

impl PartitionPlan {
    /// Plan `requested` partitions of the given samples.
    ///
    /// `None` means one partition per sample. Requests above the sample count
    /// are clamped; see [`PartitionPlan::warning`].
    pub fn new(sample_names: Vec<String>, requested: Option<usize>) -> Result<Self, PartitionError> {
        let samples = sample_names.len();
        if samples == 0 {
            return Err(PartitionError::NoSamples);
        }
        if requested == Some(0) {
            return Err(PartitionError::ZeroPartitions);
        }
        let count = requested.map_or(samples, |k| k.min(samples));

        let base = samples / count;
        let larger = samples % count;
        let mut groups = Vec::with_capacity(count);
        let mut start = 0;
        for i in 0..count {
            let size = if i < larger { base + 1 } else { base };
            groups.push((start..start + size).collect());
            start += size;
        }

        let plan = Self {
            sample_names,
            groups,
            requested,
        };
        if plan.by_sample() {
            let mut seen = HashSet::new();
            if let Some(name) = plan.sample_names.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(PartitionError::DuplicateSampleName(name.clone()));
            }
        }
        Ok(plan)
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false: a plan has at least one partition
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 0-based sample indices of each partition
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Sample names in sample order
    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    /// Whether every partition holds exactly one sample
    pub fn by_sample(&self) -> bool {
        self.groups.len() == self.sample_names.len()
    }

    /// Result keys, in partition order
    pub fn keys(&self) -> Vec<PartitionKey> {
        if self.by_sample() {
            self.sample_names
                .iter()
                .cloned()
                .map(PartitionKey::Sample)
                .collect()
        } else {
            (1..=self.groups.len()).map(PartitionKey::Number).collect()
        }
    }

    /// Message for a request that exceeded the number of samples
    pub fn warning(&self) -> Option<String> {
        let samples = self.sample_names.len();
        match self.requested {
            Some(requested) if requested > samples => Some(format!(
                "You have requested a number of partitions '{}' that is greater than your \
                 number of samples '{}'. Your data will be partitioned by sample into '{}' partitions.",
                requested, samples, samples
            )),
            _ => None,
        }
    }
}
