use std::fmt;

use thiserror::Error;

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Errors that can occur while scoring a corpus
///
/// Scoring is all-or-nothing: when any of these is returned no score is
/// produced for any document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// A document has no tokens, so it cannot be normalized
    #[error("document {index} contains no tokens")]
    EmptyDocument { index: usize },

    /// The corpus as a whole cannot produce a complement distribution
    #[error("degenerate corpus: {reason}")]
    DegenerateCorpus { reason: DegenerateReason },

    /// Bucket configuration is malformed
    #[error("invalid bucket boundaries: {reason}")]
    InvalidBoundaries { reason: String },

    /// Document vector does not fit the profiled corpus
    #[error("document {index} vector does not fit the corpus: {reason}")]
    InvalidDocumentVector { index: usize, reason: String },

    /// Token was not part of the profiled corpus
    #[error("token '{token}' is not part of the profiled corpus")]
    UnknownToken { token: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Corpus has no tokens at all (including a corpus with no documents)
    NoTokens,
    /// One document holds every token of the corpus
    EmptyComplement { index: usize },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoTokens => write!(f, "corpus contains no tokens"),
            DegenerateReason::EmptyComplement { index } => {
                write!(f, "document {} contains every token of the corpus, complement is empty", index)
            }
        }
    }
}
