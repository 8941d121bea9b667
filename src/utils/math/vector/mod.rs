pub mod math;

use num::Num;

/// Dense fixed-length vector indexed by bucket
///
/// Bucket vectors are short (one slot per frequency band), so unlike the
/// token-indexed vectors they are never sparse.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketVector<N = f64>
where
    N: Num + Copy,
{
    vals: Vec<N>,
}

impl<N> BucketVector<N>
where
    N: Num + Copy,
{
    /// ゼロ埋めのベクトルを作成
    pub fn zeros(len: usize) -> Self {
        Self {
            vals: vec![N::zero(); len],
        }
    }

    pub fn from_vec(vals: Vec<N>) -> Self {
        Self { vals }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.vals
    }

    /// Add `n` to the given bucket
    ///
    /// # Panics
    /// if `bucket` is out of range
    #[inline]
    pub fn add_at(&mut self, bucket: usize, n: N) -> &mut Self {
        let slot = &mut self.vals[bucket];
        *slot = *slot + n;
        self
    }

    /// Total mass of the vector
    #[inline]
    pub fn sum(&self) -> N {
        self.vals.iter().fold(N::zero(), |acc, &v| acc + v)
    }
}
