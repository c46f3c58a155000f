//! Utility types, used throughout the crate.

/// A float which is non-NaN and non-infinite.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[repr(transparent)]
pub struct FiniteF32(f32);
impl FiniteF32 {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub fn new(val: f32) -> Result<Self, FiniteF32Error> {
        if val.is_finite() {
            // Fold -0.0 into 0.0 so Ord and Hash agree with PartialEq.
            Ok(Self(val + 0.0))
        } else {
            Err(FiniteF32Error::NotFinite)
        }
    }
    /// Accept only finite values strictly greater than zero.
    pub fn new_positive(val: f32) -> Result<Self, FiniteF32Error> {
        let val = Self::new(val)?;
        if val.0 > 0.0 {
            Ok(val)
        } else {
            Err(FiniteF32Error::NotPositive)
        }
    }
    /// Clamp a finite value into `[0, 1]`.
    pub fn new_unit(val: f32) -> Result<Self, FiniteF32Error> {
        Self::new(val).map(|v| Self(v.0.clamp(0.0, 1.0)))
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FiniteF32 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f32> for FiniteF32 {
    type Error = FiniteF32Error;
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<FiniteF32> for f32 {
    fn from(value: FiniteF32) -> Self {
        value.get()
    }
}
impl serde::Serialize for FiniteF32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f32(self.0)
    }
}
impl<'de> serde::Deserialize<'de> for FiniteF32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let val = f32::deserialize(deserializer)?;
        Self::new(val).map_err(serde::de::Error::custom)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiniteF32Error {
    #[error("not finite")]
    NotFinite,
    #[error("not greater than zero")]
    NotPositive,
}

// We guarantee no NaN, so PartialEq acts like Eq.
impl Eq for FiniteF32 {}
#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for FiniteF32 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Never NaN, so total_cmp agrees with partial_cmp except for signed zeros.
        self.0.total_cmp(&other.0)
    }
}
impl std::hash::Hash for FiniteF32 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

#[cfg(test)]
mod test {
    use super::{FiniteF32, FiniteF32Error};
    #[test]
    fn rejects_non_finite() {
        assert_eq!(FiniteF32::new(f32::NAN), Err(FiniteF32Error::NotFinite));
        assert_eq!(
            FiniteF32::new(f32::INFINITY),
            Err(FiniteF32Error::NotFinite)
        );
        assert_eq!(FiniteF32::new(2.5).map(FiniteF32::get), Ok(2.5));
    }
    #[test]
    fn positive_and_unit() {
        assert_eq!(
            FiniteF32::new_positive(0.0),
            Err(FiniteF32Error::NotPositive)
        );
        assert_eq!(FiniteF32::new_unit(1.7).map(FiniteF32::get), Ok(1.0));
        assert_eq!(FiniteF32::new_unit(-0.2).map(FiniteF32::get), Ok(0.0));
    }
}
