use std::cmp::Ordering;

use num::{Float, Num};

use super::SpVec;

impl<N> SpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product by merge-join over the sorted indices.
    ///
    /// d(a, b) = Σ(a_i * b_i)
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let (a_inds, a_vals) = (self.inds(), self.vals());
        let (b_inds, b_vals) = (other.inds(), other.vals());
        let mut i = 0;
        let mut j = 0;
        let mut result = 0_f64;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Σ(a_i^2)
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.vals()
            .iter()
            .map(|&v| {
                let v: f64 = v.into();
                v * v
            })
            .sum()
    }

    /// Euclidean length
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// cos(θ) = a・b / (|a||b|)
    ///
    /// A zero vector on either side scores 0, including against itself.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

impl<N> SpVec<N>
where
    N: Float + Into<f64>,
{
    /// Divide every entry by the Euclidean norm.
    /// The zero vector is left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        let Some(inv) = <N as num::NumCast>::from(1.0 / norm) else {
            return;
        };
        for val in self.vals_mut() {
            *val = *val * inv;
        }
    }
}
