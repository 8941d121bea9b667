/// This crate is a Document Anomaly Scorer using the "Distance to Textual Complement" method.
/// See Guthrie, "Unsupervised Detection of Anomalous Text" (2008) for the original research.
pub mod scorer;
pub mod utils;

/// Anomaly Scorer
/// The top-level struct of this crate.
/// It scores every document of a tokenized corpus by how far its token
/// distribution lies from the distribution of the rest of the corpus.
///
/// Internally, one scoring call builds:
/// - A global token frequency ranking
/// - A token -> frequency band (bucket) map
/// - A universe vector (per-bucket token counts of the whole corpus)
///
/// and then, for each document, compares its normalized bucket vector with the
/// normalized complement (universe minus the document) by Manhattan distance.
///
/// Scores are in `[0, 2]`, aligned with the input order.
///
/// # Parallelism
/// With `ScorerConfig::parallel` (default) token counting and per-document
/// scoring run on the rayon pool. Results are identical to the sequential path.
///
/// # Errors
/// Empty documents, a corpus without tokens and a document holding the whole
/// corpus are reported as `ScoreError` instead of NaN scores.
pub use scorer::AnomalyScorer;

/// Score documents with the default configuration
pub use scorer::score_documents;

/// Corpus Profile
/// Read-only state shared by all documents of one scoring call:
/// - The token -> bucket map
/// - The universe vector
///
/// Useful for inspecting how a corpus is banded.
pub use scorer::CorpusProfile;

/// Scorer configuration and frequency band limits
/// `ScorerConfig` is serde-deserializable; missing fields take defaults.
/// `BucketBoundaries` defaults to the 13 bands
/// 100, 300, 1000, ..., 30000000, unbounded.
pub use scorer::config::{BucketBoundaries, ScorerConfig, DEFAULT_BUCKET_LIMITS};

/// Error types
pub use scorer::error::{DegenerateReason, Result, ScoreError};

/// Token Frequency structure
/// Counts token occurrences and ranks tokens by frequency, with ties broken
/// by token value so the ranking is deterministic.
pub use scorer::token::TokenFrequency;

/// Fixed-length bucket vector
pub use utils::math::vector::BucketVector;
