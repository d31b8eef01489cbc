use crate::engine::EngineError;
use crate::experiment::ExperimentError;

/// Errors that can occur while partitioning an experiment
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading the experiment or creating a partition directory
    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    /// The engine failed to write the partitions
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Error serializing the engine parameters
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// The experiment has no samples to partition
    #[error("The experiment has no samples to partition")]
    NoSamples,

    /// Zero partitions were requested
    #[error("The number of partitions must be at least 1")]
    ZeroPartitions,

    /// Two samples share a name, so partitions cannot be keyed by sample
    #[error("Sample name '{0}' occurs more than once; partitions cannot be keyed by sample name")]
    DuplicateSampleName(String),
}
