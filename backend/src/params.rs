use serde::{Deserialize, Deserializer};

/// A request body field that may be left out entirely.
///
/// Pair with `#[serde(default)]`: a missing key stays `Absent`, while any
/// value that is sent, including `false` or `""`, becomes `Present`.
/// An explicit `null` is rejected because no post column accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    /// The sent value, or `current` when the field was omitted.
    pub fn or_keep(self, current: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => current,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Present)
    }
}
