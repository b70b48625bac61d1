//! Typed Ids
//!
//! The backend identifies everything with plain integers; wrapping them per record type keeps a
//! cart item id from being passed where a product id is expected. On the wire they are the bare
//! integer.

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub struct TypedId<T>(u64, PhantomData<fn() -> T>);

impl<T> TypedId<T> {
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

// Manual impls so `T` needs none of these traits itself.

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl<T> fmt::Display for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Widget;

    #[test]
    fn wire_form_is_the_bare_integer() -> TestResult {
        let id: TypedId<Widget> = serde_json::from_str("42")?;

        assert_eq!(id, TypedId::new(42));
        assert_eq!(serde_json::to_string(&id)?, "42");
        assert_eq!(format!("{id} {id:?}"), "42 #42");

        Ok(())
    }
}
