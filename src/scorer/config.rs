use serde::{Deserialize, Serialize};

use crate::scorer::error::{Result, ScoreError};

/// Rank limits of the reference configuration
/// the last one is unbounded and catches the long tail
pub const DEFAULT_BUCKET_LIMITS: [usize; 13] = [
    100,
    300,
    1_000,
    3_000,
    10_000,
    30_000,
    100_000,
    300_000,
    1_000_000,
    3_000_000,
    10_000_000,
    30_000_000,
    usize::MAX,
];

/// Ascending rank thresholds partitioning tokens into frequency bands
///
/// Bucket `b` holds the tokens whose 0-based frequency rank `i` satisfies
/// `limits[b - 1] <= i < limits[b]`. The last bucket takes every rank past the
/// previous limit, whatever its own value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct BucketBoundaries {
    limits: Vec<usize>,
}

impl BucketBoundaries {
    /// Create validated boundaries
    ///
    /// # Arguments
    /// * `limits` - 昇順の順位閾値 (先頭は1以上)
    pub fn new(limits: Vec<usize>) -> Result<Self> {
        if limits.is_empty() {
            return Err(ScoreError::InvalidBoundaries {
                reason: "at least one bucket is required".to_string(),
            });
        }
        if limits[0] == 0 {
            return Err(ScoreError::InvalidBoundaries {
                reason: "first limit must be positive".to_string(),
            });
        }
        if let Some(pos) = limits.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ScoreError::InvalidBoundaries {
                reason: format!(
                    "limits must be strictly ascending, got {} then {} at position {}",
                    limits[pos],
                    limits[pos + 1],
                    pos + 1
                ),
            });
        }
        Ok(Self { limits })
    }

    /// Number of buckets
    #[inline]
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    #[inline]
    pub fn limits(&self) -> &[usize] {
        &self.limits
    }

    /// Smallest bucket `b` with `rank < limits[b]`
    /// ranks past every limit fall into the last bucket
    #[inline]
    pub fn bucket_for_rank(&self, rank: usize) -> usize {
        let b = self.limits.partition_point(|&limit| limit <= rank);
        b.min(self.limits.len() - 1)
    }
}

impl Default for BucketBoundaries {
    fn default() -> Self {
        Self {
            limits: DEFAULT_BUCKET_LIMITS.to_vec(),
        }
    }
}

impl TryFrom<Vec<usize>> for BucketBoundaries {
    type Error = ScoreError;

    fn try_from(limits: Vec<usize>) -> Result<Self> {
        Self::new(limits)
    }
}

impl From<BucketBoundaries> for Vec<usize> {
    fn from(b: BucketBoundaries) -> Self {
        b.limits
    }
}

/// Scorer configuration
///
/// Loading it (file, env, flags) is up to the caller; every field has a
/// default so a partial document deserializes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScorerConfig {
    /// frequency band limits
    pub boundaries: BucketBoundaries,
    /// score documents on the rayon pool
    pub parallel: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            boundaries: BucketBoundaries::default(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_thirteen_buckets() {
        let b = BucketBoundaries::default();
        assert_eq!(b.len(), 13);
        assert_eq!(b.limits()[0], 100);
        assert_eq!(*b.limits().last().unwrap(), usize::MAX);
    }

    #[test]
    fn bucket_for_rank_follows_limits() {
        let b = BucketBoundaries::default();
        assert_eq!(b.bucket_for_rank(0), 0);
        assert_eq!(b.bucket_for_rank(99), 0);
        assert_eq!(b.bucket_for_rank(100), 1);
        assert_eq!(b.bucket_for_rank(299), 1);
        assert_eq!(b.bucket_for_rank(300), 2);
        assert_eq!(b.bucket_for_rank(29_999_999), 11);
        assert_eq!(b.bucket_for_rank(30_000_000), 12);
        assert_eq!(b.bucket_for_rank(usize::MAX - 1), 12);
    }

    #[test]
    fn last_bucket_is_unbounded() {
        let b = BucketBoundaries::new(vec![2, 5]).unwrap();
        assert_eq!(b.bucket_for_rank(1), 0);
        assert_eq!(b.bucket_for_rank(2), 1);
        assert_eq!(b.bucket_for_rank(4), 1);
        assert_eq!(b.bucket_for_rank(5), 1);
        assert_eq!(b.bucket_for_rank(1_000), 1);
    }

    #[test]
    fn rejects_malformed_limits() {
        assert!(matches!(
            BucketBoundaries::new(vec![]),
            Err(ScoreError::InvalidBoundaries { .. })
        ));
        assert!(matches!(
            BucketBoundaries::new(vec![0, 10]),
            Err(ScoreError::InvalidBoundaries { .. })
        ));
        assert!(matches!(
            BucketBoundaries::new(vec![10, 10]),
            Err(ScoreError::InvalidBoundaries { .. })
        ));
        assert!(matches!(
            BucketBoundaries::new(vec![10, 5, 20]),
            Err(ScoreError::InvalidBoundaries { .. })
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ScorerConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.boundaries, BucketBoundaries::default());

        let config: ScorerConfig = serde_json::from_str(r#"{"boundaries": [1, 10, 100]}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.boundaries.limits(), &[1, 10, 100]);
    }

    #[test]
    fn config_rejects_invalid_boundaries() {
        let res: std::result::Result<ScorerConfig, _> =
            serde_json::from_str(r#"{"boundaries": [10, 3]}"#);
        assert!(res.is_err());
    }
}
