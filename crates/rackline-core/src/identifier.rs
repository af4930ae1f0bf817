//! Interned identifiers for device templates and placed device instances.
//!
//! Layout passes compare and hash device ids on every row, so ids are
//! interned once and carried around as a `Copy` symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier of a device template or device instance.
///
/// # Examples
///
/// ```
/// use rackline_core::identifier::Id;
///
/// let compressor = Id::new("compressor");
/// assert_eq!(compressor, "compressor");
///
/// let second = Id::numbered("compressor", 2);
/// assert_eq!(second, "compressor#2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the identifier `"{prefix}#{index}"`.
    ///
    /// Used to name device instances that were placed without an explicit id.
    pub fn numbered(prefix: &str, index: usize) -> Self {
        Self::new(&format!("{prefix}#{index}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_same_symbol() {
        let a = Id::new("eq-rack");
        let b = Id::new("eq-rack");
        let c = Id::new("delay");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "eq-rack");
    }

    #[test]
    fn test_numbered() {
        let first = Id::numbered("preamp", 0);
        let again = Id::numbered("preamp", 0);
        let second = Id::numbered("preamp", 1);

        assert_eq!(first, again);
        assert_ne!(first, second);
        assert_eq!(second, "preamp#1");
    }

    #[test]
    fn test_display() {
        let id = Id::new("limiter");
        assert_eq!(id.to_string(), "limiter");
    }

    #[test]
    fn test_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(Id::new("slot-a"), 1);
        map.insert(Id::new("slot-b"), 2);

        assert_eq!(map.get(&Id::from("slot-a")), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
