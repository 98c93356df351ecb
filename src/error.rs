use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Crate error type.
///
/// Variants split along the pipeline's failure boundaries: build-time errors
/// abort index construction, load-time errors prevent the engine from
/// becoming ready, and dimension errors mark a programming mistake at a
/// vector seam. Degenerate query inputs (empty text, oversized K) are not
/// errors and never reach this type.
#[derive(Debug, Error)]
pub enum Error {
    /// No documents survived ingestion + filtering.
    #[error("corpus is empty after filtering")]
    EmptyCorpus,

    /// The document-frequency bounds excluded every candidate term.
    #[error("vocabulary is empty after applying document-frequency bounds")]
    EmptyVocabulary,

    /// The singular value decomposition did not converge.
    #[error("singular value decomposition failed to converge")]
    SvdConvergence,

    /// A corpus record failed schema validation at ingestion.
    #[error("invalid document at position {index}: {reason}")]
    InvalidDocument { index: usize, reason: String },

    /// A corpus data file could not be read.
    #[error("corpus file {path}: {source}")]
    CorpusIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A corpus data file could not be parsed.
    #[error("corpus file {path}: {source}")]
    CorpusParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A persisted artifact is missing or corrupt.
    #[error("artifact {name}: {source}")]
    Artifact {
        name: &'static str,
        #[source]
        source: ArtifactError,
    },

    /// Loaded artifacts disagree with each other (e.g. document table length
    /// vs. index row count). The engine refuses to serve from such a set.
    #[error("artifact mismatch: {0}")]
    ArtifactMismatch(String),

    /// A query vector's dimensionality does not match the indexed vectors'.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    InvalidDimension { expected: usize, got: usize },

    /// The full-space index was not built or loaded.
    #[error("full-space index is not available")]
    MissingFullIndex,
}

/// What went wrong with a single persisted blob.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Cbor(#[from] serde_cbor::Error),
}
