use num::Num;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SpVec;

impl<N> Serialize for SpVec<N>
where
    N: Num + Copy + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // fields: len, entries as ordered (index, value) pairs
        let mut state = serializer.serialize_struct("SpVec", 2)?;
        state.serialize_field("len", &(self.len() as u64))?;
        let entries: Vec<(u32, N)> = self
            .inds()
            .iter()
            .copied()
            .zip(self.vals().iter().copied())
            .collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SpVec<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SpVecData<N> {
            len: u64,
            entries: Vec<(u32, N)>,
        }

        let data = SpVecData::<N>::deserialize(deserializer)?;
        let (inds, vals): (Vec<u32>, Vec<N>) = data.entries.into_iter().unzip();
        SpVec::from_sorted_parts(data.len as usize, inds, vals).ok_or_else(|| {
            DeError::custom("SpVec deserialize error: entries must be sorted, unique and in range")
        })
    }
}
