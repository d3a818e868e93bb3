/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum StitchStage {
    Ingest,
    Project,
    Accumulate,
    Normalize,
    Finalize,
}

impl std::fmt::Display for StitchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ingest => write!(f, "Ordering frames"),
            Self::Project => write!(f, "Projecting frames"),
            Self::Accumulate => write!(f, "Accumulating canvas"),
            Self::Normalize => write!(f, "Normalizing seams"),
            Self::Finalize => write!(f, "Finalizing output"),
        }
    }
}

/// Thread-safe progress reporting for the stitch pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: StitchStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_stitch` delegates.
pub(crate) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
