pub mod bucket;
pub mod config;
pub mod error;
pub mod token;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    scorer::{
        bucket::BucketMap,
        config::{BucketBoundaries, ScorerConfig},
        error::{DegenerateReason, Result, ScoreError},
        token::TokenFrequency,
    },
    utils::math::vector::BucketVector,
};

/// Score every document with the default configuration
///
/// Returns one score per document, aligned with `documents`.
pub fn score_documents<D, T>(documents: &[D]) -> Result<Vec<f64>>
where
    D: AsRef<[T]> + Sync,
    T: AsRef<str> + Sync,
{
    AnomalyScorer::default().score_documents(documents)
}

/// Distance to Textual Complement scorer
///
/// Each document is reduced to a histogram over global frequency-rank bands
/// and compared (L1) with the histogram of the rest of the corpus.
/// Scores lie in `[0, 2]`; higher means the document's vocabulary profile
/// is further from everything else.
#[derive(Debug, Clone, Default)]
pub struct AnomalyScorer {
    config: ScorerConfig,
}

impl AnomalyScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Scorer with custom bands, other settings default
    pub fn with_boundaries(boundaries: BucketBoundaries) -> Self {
        Self {
            config: ScorerConfig {
                boundaries,
                ..ScorerConfig::default()
            },
        }
    }

    #[inline]
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score every document of the corpus
    /// `config.parallel` で並列/逐次を切り替える (結果は同一)
    pub fn score_documents<D, T>(&self, documents: &[D]) -> Result<Vec<f64>>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        if self.config.parallel {
            self.par_score_documents(documents)
        } else {
            self.score_documents_seq(documents)
        }
    }

    /// Sequential scoring
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn score_documents_seq<D, T>(&self, documents: &[D]) -> Result<Vec<f64>>
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let profile = self.profile(documents)?;
        let scores = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| profile.score_tokens(index, doc.as_ref()))
            .collect::<Result<Vec<f64>>>()?;
        debug!(documents = scores.len(), parallel = false, "scored corpus");
        Ok(scores)
    }

    /// Parallel scoring on the rayon pool
    ///
    /// Token counting and per-document scoring run in parallel; ranking is
    /// the barrier between them. On failure the error of the lowest document
    /// index is returned, same as the sequential path.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn par_score_documents<D, T>(&self, documents: &[D]) -> Result<Vec<f64>>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let freq = documents
            .par_iter()
            .map(|doc| TokenFrequency::from_tokens(doc.as_ref()))
            .reduce(TokenFrequency::new, |mut acc, freq| {
                acc.merge(freq);
                acc
            });
        let profile = self.build_profile(documents.len(), &freq)?;

        let results: Vec<Result<f64>> = documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| profile.score_tokens(index, doc.as_ref()))
            .collect();
        // 先頭のエラーを返すため逐次で集約
        let scores = results.into_iter().collect::<Result<Vec<f64>>>()?;
        debug!(documents = scores.len(), parallel = true, "scored corpus");
        Ok(scores)
    }

    /// Build the shared ranking and universe statistics of a corpus
    pub fn profile<D, T>(&self, documents: &[D]) -> Result<CorpusProfile>
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut freq = TokenFrequency::new();
        for doc in documents {
            freq.add_tokens(doc.as_ref());
        }
        self.build_profile(documents.len(), &freq)
    }

    fn build_profile(&self, doc_num: usize, freq: &TokenFrequency) -> Result<CorpusProfile> {
        if freq.token_sum() == 0 {
            return Err(ScoreError::DegenerateCorpus {
                reason: DegenerateReason::NoTokens,
            });
        }
        let boundaries = self.config.boundaries.clone();
        let map = BucketMap::from_frequency(freq, &boundaries);

        let mut universe = BucketVector::zeros(boundaries.len());
        for (token, count) in freq.iter() {
            if let Some(bucket) = map.get(token) {
                universe.add_at(bucket, count);
            }
        }

        debug!(
            documents = doc_num,
            vocab = map.len(),
            tokens = freq.token_sum(),
            buckets = boundaries.len(),
            "built corpus profile"
        );

        Ok(CorpusProfile {
            boundaries,
            map,
            universe,
            doc_num,
        })
    }
}

/// Shared read-only state of one scoring call
///
/// Holds the token -> bucket map and the universe vector of the corpus it was
/// built from.
#[derive(Debug, Clone)]
pub struct CorpusProfile {
    boundaries: BucketBoundaries,
    map: BucketMap,
    universe: BucketVector<u64>,
    doc_num: usize,
}

impl CorpusProfile {
    /// Bucket of a token, None if the token is not in the corpus
    #[inline]
    pub fn bucket_of(&self, token: &str) -> Option<usize> {
        self.map.get(token)
    }

    /// Per-bucket token counts of the whole corpus
    #[inline]
    pub fn universe(&self) -> &BucketVector<u64> {
        &self.universe
    }

    #[inline]
    pub fn universe_token_count(&self) -> u64 {
        self.universe.sum()
    }

    /// Number of distinct tokens
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.boundaries.len()
    }

    #[inline]
    pub fn boundaries(&self) -> &BucketBoundaries {
        &self.boundaries
    }

    /// Number of documents the profile was built from
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.doc_num
    }

    /// Bucket histogram of a token sequence
    pub fn document_vector<T>(&self, tokens: &[T]) -> Result<BucketVector<u64>>
    where
        T: AsRef<str>,
    {
        let mut vec = BucketVector::zeros(self.bucket_count());
        for token in tokens {
            let token = token.as_ref();
            let bucket = self.map.get(token).ok_or_else(|| ScoreError::UnknownToken {
                token: token.to_string(),
            })?;
            vec.add_at(bucket, 1);
        }
        Ok(vec)
    }

    /// L1 distance between the normalized document vector and the normalized
    /// complement (universe - document), capped at 2.0
    ///
    /// `document` must fit inside the universe: same bucket count and no
    /// bucket larger than the universe's.
    ///
    /// # Arguments
    /// * `index` - position of the document, used in errors
    /// * `document` - its bucket histogram
    pub fn complement_distance(&self, index: usize, document: &BucketVector<u64>) -> Result<f64> {
        if document.len() != self.bucket_count() {
            return Err(ScoreError::InvalidDocumentVector {
                index,
                reason: format!(
                    "expected {} buckets, got {}",
                    self.bucket_count(),
                    document.len()
                ),
            });
        }
        let overflow = document
            .as_slice()
            .iter()
            .zip(self.universe.as_slice())
            .position(|(d, u)| d > u);
        if let Some(bucket) = overflow {
            return Err(ScoreError::InvalidDocumentVector {
                index,
                reason: format!("bucket {} exceeds the corpus count", bucket),
            });
        }

        let doc_total = document.sum();
        if doc_total == 0 {
            return Err(ScoreError::EmptyDocument { index });
        }
        let universe_total = self.universe_token_count();
        if doc_total >= universe_total {
            return Err(ScoreError::DegenerateCorpus {
                reason: DegenerateReason::EmptyComplement { index },
            });
        }

        let complement = self
            .universe
            .sub(document)
            .normalized()
            .ok_or(ScoreError::DegenerateCorpus {
                reason: DegenerateReason::EmptyComplement { index },
            })?;
        let document = document
            .normalized()
            .ok_or(ScoreError::EmptyDocument { index })?;
        // 丸め誤差で2をわずかに超えることがある
        Ok(document.manhattan_distance(&complement).min(2.0))
    }

    #[inline]
    fn score_tokens<T>(&self, index: usize, tokens: &[T]) -> Result<f64>
    where
        T: AsRef<str>,
    {
        let vec = self.document_vector(tokens)?;
        self.complement_distance(index, &vec)
    }
}
