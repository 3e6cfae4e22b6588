pub mod math;
pub mod serde;

use std::fmt::Debug;

use num::Num;

use crate::utils::sort::radix_sort_u32_soa;

/// Sparse vector that stores only non-zero entries.
///
/// Holds the logical length plus two parallel arrays:
/// - `inds`: column index of each stored entry
/// - `vals`: value of each stored entry
///
/// Entries are always kept in ascending `inds` order with no duplicates,
/// which is what the merge-join in `dot` relies on.
#[derive(Clone, PartialEq)]
pub struct SpVec<N>
where
    N: Num + Copy,
{
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    /// Empty vector of logical length `len` (the zero vector)
    #[inline]
    pub fn zeros(len: usize) -> Self {
        SpVec {
            len,
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped, repeated indices are summed.
    /// Indices at or beyond `len` are ignored.
    pub fn from_pairs<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
        N: Default,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = pairs
            .into_iter()
            .filter(|&(idx, val)| (idx as usize) < len && val != N::zero())
            .unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);

        let mut out = SpVec {
            len,
            inds: Vec::with_capacity(inds.len()),
            vals: Vec::with_capacity(vals.len()),
        };
        for (idx, val) in inds.into_iter().zip(vals) {
            match out.inds.last() {
                Some(&last) if last == idx => {
                    let slot = out.vals.len() - 1;
                    out.vals[slot] = out.vals[slot] + val;
                }
                _ => {
                    out.inds.push(idx);
                    out.vals.push(val);
                }
            }
        }
        out.drop_zeros();
        out
    }

    /// Build from a dense slice, skipping zeros
    #[cfg(test)]
    pub(crate) fn from_dense(dense: &[N]) -> Self {
        let mut out = SpVec::zeros(dense.len());
        for (idx, &val) in dense.iter().enumerate() {
            if val != N::zero() {
                out.inds.push(idx as u32);
                out.vals.push(val);
            }
        }
        out
    }

    /// Build from already sorted parts; rejects unsorted, duplicate or out-of-range indices
    pub(crate) fn from_sorted_parts(len: usize, inds: Vec<u32>, vals: Vec<N>) -> Option<Self> {
        if inds.len() != vals.len() {
            return None;
        }
        if inds.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        if inds.last().is_some_and(|&last| last as usize >= len) {
            return None;
        }
        Some(SpVec { len, inds, vals })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when no entry is stored
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at logical index, `None` when out of range
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored entries as `(index, value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&idx, &val)| (idx as usize, val))
    }

    /// Expand into a dense `Vec`
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = val;
        }
        dense
    }

    pub(crate) fn inds(&self) -> &[u32] {
        &self.inds
    }

    pub(crate) fn vals(&self) -> &[N] {
        &self.vals
    }

    pub(crate) fn vals_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    fn drop_zeros(&mut self) {
        let zero = N::zero();
        if self.vals.iter().all(|v| *v != zero) {
            return;
        }
        let mut keep_inds = Vec::with_capacity(self.inds.len());
        let mut keep_vals = Vec::with_capacity(self.vals.len());
        for (&idx, &val) in self.inds.iter().zip(self.vals.iter()) {
            if val != zero {
                keep_inds.push(idx);
                keep_vals.push(val);
            }
        }
        self.inds = keep_inds;
        self.vals = keep_vals;
    }
}

impl<N> Debug for SpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "SpVec(len: {}, nnz: {}) [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("SpVec")
                .field("len", &self.len)
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_sums_and_drops_zeros() {
        let v: SpVec<f32> = SpVec::from_pairs(6, vec![(4, 1.0), (1, 2.0), (4, 2.0), (2, 0.0), (9, 5.0)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(1, 2.0), (4, 3.0)]);
        assert_eq!(v.get(4), Some(3.0));
        assert_eq!(v.get(0), Some(0.0));
        assert_eq!(v.get(6), None);
    }

    #[test]
    fn dense_round_trip() {
        let dense = vec![0.0f32, 1.5, 0.0, 0.0, 2.5];
        let v = SpVec::from_dense(&dense);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.to_dense(), dense);
    }

    #[test]
    fn sorted_parts_validation() {
        assert!(SpVec::<f32>::from_sorted_parts(3, vec![0, 2], vec![1.0, 1.0]).is_some());
        assert!(SpVec::<f32>::from_sorted_parts(3, vec![2, 0], vec![1.0, 1.0]).is_none());
        assert!(SpVec::<f32>::from_sorted_parts(3, vec![1, 1], vec![1.0, 1.0]).is_none());
        assert!(SpVec::<f32>::from_sorted_parts(3, vec![3], vec![1.0]).is_none());
        assert!(SpVec::<f32>::from_sorted_parts(3, vec![0], vec![]).is_none());
    }

    #[test]
    fn zero_vector() {
        let v: SpVec<f32> = SpVec::zeros(10);
        assert!(v.is_zero());
        assert_eq!(v.len(), 10);
        assert_eq!(v.to_dense(), vec![0.0; 10]);
    }
}
