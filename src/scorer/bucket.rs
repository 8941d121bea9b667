use indexmap::IndexMap;

use crate::scorer::{config::BucketBoundaries, token::TokenFrequency};

/// token -> bucket index
///
/// Built once from the global frequency ranking and never mutated afterwards.
/// Iteration order is rank order.
#[derive(Debug, Clone)]
pub struct BucketMap {
    buckets: IndexMap<Box<str>, usize>,
}

impl BucketMap {
    /// Assign each distinct token of `freq` to its frequency band
    pub fn from_frequency(freq: &TokenFrequency, boundaries: &BucketBoundaries) -> Self {
        let buckets = freq
            .ranked_tokens()
            .into_iter()
            .enumerate()
            .map(|(rank, (token, _))| (Box::from(token), boundaries.bucket_for_rank(rank)))
            .collect();
        Self { buckets }
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<usize> {
        self.buckets.get(token).copied()
    }

    /// 語彙数
    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq_with_counts(counts: &[(&str, usize)]) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        for &(token, n) in counts {
            for _ in 0..n {
                freq.add_token(token);
            }
        }
        freq
    }

    #[test]
    fn most_frequent_tokens_land_in_first_bucket() {
        let freq = freq_with_counts(&[("f", 1), ("a", 7), ("e", 2), ("b", 6), ("d", 3), ("c", 5)]);
        let boundaries = BucketBoundaries::new(vec![2, 5, usize::MAX]).unwrap();
        let map = BucketMap::from_frequency(&freq, &boundaries);

        assert_eq!(map.len(), 6);
        assert_eq!(map.get("a"), Some(0));
        assert_eq!(map.get("b"), Some(0));
        assert_eq!(map.get("c"), Some(1));
        assert_eq!(map.get("d"), Some(1));
        assert_eq!(map.get("e"), Some(1));
        assert_eq!(map.get("f"), Some(2));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn equal_counts_split_by_token_order() {
        let freq = freq_with_counts(&[("beta", 1), ("alpha", 1)]);
        let boundaries = BucketBoundaries::new(vec![1, usize::MAX]).unwrap();
        let map = BucketMap::from_frequency(&freq, &boundaries);
        assert_eq!(map.get("alpha"), Some(0));
        assert_eq!(map.get("beta"), Some(1));
    }

    #[test]
    fn default_boundaries_spill_into_second_bucket_after_rank_100() {
        let mut freq = TokenFrequency::new();
        for i in 0..150u32 {
            let token = format!("t{:03}", i);
            // t000 が最頻出
            for _ in 0..(200 - i) {
                freq.add_token(&token);
            }
        }
        let map = BucketMap::from_frequency(&freq, &BucketBoundaries::default());
        assert_eq!(map.get("t000"), Some(0));
        assert_eq!(map.get("t099"), Some(0));
        assert_eq!(map.get("t100"), Some(1));
        assert_eq!(map.get("t149"), Some(1));
    }
}
