//! Validated newtype wrappers for pipeline identifier strings.
//!
//! Each newtype enforces a non-empty constraint at construction time via
//! [`TryFrom<&str>`]. Once constructed, the inner value is immutable (no
//! `DerefMut`). Serde `Deserialize` impls re-run validation so an empty
//! identifier cannot enter the type system from untrusted JSON.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when constructing a validated newtype from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewtypeError {
    /// The string did not match the expected format.
    InvalidFormat {
        /// Name of the type that rejected the input.
        type_name: &'static str,
        /// A human-readable description of the expected format.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },
}

impl fmt::Display for NewtypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat {
                type_name,
                expected,
                got,
            } => write!(f, "invalid {type_name}: expected {expected}, got {got:?}"),
        }
    }
}

impl std::error::Error for NewtypeError {}

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Identifier of a pipeline node, unique within a single document.
///
/// Node identifiers are opaque: any non-empty string is accepted. Edges refer
/// to nodes exclusively through these identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl TryFrom<&str> for NodeId {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            Err(NewtypeError::InvalidFormat {
                type_name: "NodeId",
                expected: "a non-empty identifier string",
                got: s.to_owned(),
            })
        } else {
            Ok(Self(s.to_owned()))
        }
    }
}

impl TryFrom<String> for NodeId {
    type Error = NewtypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() {
            Err(NewtypeError::InvalidFormat {
                type_name: "NodeId",
                expected: "a non-empty identifier string",
                got: s,
            })
        } else {
            Ok(Self(s))
        }
    }
}

impl NodeId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// EdgeId
// ---------------------------------------------------------------------------

/// Identifier of a pipeline edge.
///
/// Edge identifiers play no role in cycle detection; they exist so findings
/// can name the offending edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(String);

impl TryFrom<&str> for EdgeId {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            Err(NewtypeError::InvalidFormat {
                type_name: "EdgeId",
                expected: "a non-empty identifier string",
                got: s.to_owned(),
            })
        } else {
            Ok(Self(s.to_owned()))
        }
    }
}

impl TryFrom<String> for EdgeId {
    type Error = NewtypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() {
            Err(NewtypeError::InvalidFormat {
                type_name: "EdgeId",
                expected: "a non-empty identifier string",
                got: s,
            })
        } else {
            Ok(Self(s))
        }
    }
}

impl EdgeId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for EdgeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EdgeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
