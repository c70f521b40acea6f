//! Namespaced identifiers, such as `minecraft:village/plains/streets`.

use std::fmt;

use arcstr::ArcStr;
use thiserror::Error;


/// Namespace used when an identifier is parsed without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";


/// A validated `namespace:path` identifier, the namespace is always explicit once
/// parsed. The string is reference counted so cloning an identifier is cheap, which
/// matters because pool keys are cloned all along structure planning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(ArcStr);

impl Ident {

    /// The reserved empty pool, always present in a catalog.
    pub const EMPTY_POOL: Self = Self(arcstr::literal!("minecraft:empty"));
    /// Name of the connector synthesized on feature elements.
    pub const BOTTOM: Self = Self(arcstr::literal!("minecraft:bottom"));

    /// Parse an identifier, an identifier without namespace gets the default one.
    pub fn parse(s: &str) -> Result<Self, IdentError> {

        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, s),
        };

        if namespace.is_empty() || !namespace.bytes().all(is_namespace_byte) {
            return Err(IdentError::IllegalNamespace(s.to_string()));
        }

        if path.is_empty() || !path.bytes().all(is_path_byte) {
            return Err(IdentError::IllegalPath(s.to_string()));
        }

        if namespace.len() + path.len() + 1 == s.len() {
            Ok(Self(ArcStr::from(s)))
        } else {
            Ok(Self(arcstr::format!("{namespace}:{path}")))
        }

    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        self.split().0
    }

    #[inline]
    pub fn path(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Parsing guarantees the separator.
        self.0.split_once(':').unwrap_or((DEFAULT_NAMESPACE, &self.0))
    }

}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Ident {
    type Error = IdentError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}


#[inline]
fn is_namespace_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.')
}

#[inline]
fn is_path_byte(b: u8) -> bool {
    is_namespace_byte(b) || b == b'/'
}


/// Error when parsing an identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentError {
    #[error("illegal namespace in identifier: {0:?}")]
    IllegalNamespace(String),
    #[error("illegal path in identifier: {0:?}")]
    IllegalPath(String),
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse() {

        let ident = Ident::parse("village/plains/houses").unwrap();
        assert_eq!(ident.as_str(), "minecraft:village/plains/houses");
        assert_eq!(ident.namespace(), "minecraft");
        assert_eq!(ident.path(), "village/plains/houses");

        let ident = Ident::parse("mod:empty").unwrap();
        assert_eq!(ident.namespace(), "mod");
        assert_eq!(ident, Ident::parse("mod:empty").unwrap());

        assert_eq!(Ident::parse("empty").unwrap(), Ident::EMPTY_POOL);

        assert!(matches!(Ident::parse("Mod:x"), Err(IdentError::IllegalNamespace(_))));
        assert!(matches!(Ident::parse("mod:"), Err(IdentError::IllegalPath(_))));
        assert!(matches!(Ident::parse("a:b:c"), Err(IdentError::IllegalPath(_))));
        assert!(matches!(Ident::parse(""), Err(IdentError::IllegalPath(_))));

    }

}
