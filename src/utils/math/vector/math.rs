use num::{Num, ToPrimitive};

use super::BucketVector;

impl<N> BucketVector<N>
where
    N: Num + Copy,
{
    /// 要素ごとの差を計算するメソッド
    ///
    /// # Arguments
    /// * `other` - 引くベクトル
    ///
    /// # Returns
    /// * `BucketVector<N>` - self - other
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to subtract."
        );
        let vals = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(&l, &r)| l - r)
            .collect();
        Self::from_vec(vals)
    }
}

impl<N> BucketVector<N>
where
    N: Num + Copy + ToPrimitive,
{
    /// Scale the vector so that its entries sum to 1.0
    ///
    /// # Returns
    /// * `None` - if the mass is zero or does not fit in f64
    #[inline]
    pub fn normalized(&self) -> Option<BucketVector<f64>> {
        let total = self.sum().to_f64()?;
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        let vals = self
            .as_slice()
            .iter()
            .map(|v| v.to_f64().map(|v| v / total))
            .collect::<Option<Vec<f64>>>()?;
        Some(BucketVector::from_vec(vals))
    }
}

impl BucketVector<f64> {
    /// マンハッタン距離 (L1)
    /// 加算はbucket順で行う
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `f64` - Σ|self[b] - other[b]|
    #[inline]
    pub fn manhattan_distance(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute manhattan distance."
        );
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .fold(0.0, |acc, (l, r)| acc + (l - r).abs())
    }
}
