//! Validated newtypes for rule names and rule parameters.
//!
//! `RuleName` and `Param` wrap `String` values that have passed identifier
//! validation at construction time, so the registry and the matcher never
//! see malformed names. Both look up by `&str` through `Borrow<str>`.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexSet;
use serde::Deserialize;
use serde::de;

use crate::error::DocumentError;
use crate::identifier::validate_identifier;

/// The universally quantified parameters of a rule, in declaration order.
pub type Params = IndexSet<Param>;

macro_rules! identifier_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "` after validating the input.")]
            ///
            /// # Errors
            ///
            /// Returns [`DocumentError::InvalidIdentifier`] if the string
            /// fails identifier validation.
            pub fn new(name: impl Into<String>) -> Result<Self, DocumentError> {
                let s: String = name.into();
                validate_identifier(&s)?;
                Ok(Self(s))
            }

            /// Returns the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        // `Hash` is derived from the inner `String`, which hashes like `str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(de::Error::custom)
            }
        }
    };
}

identifier_newtype! {
    /// A validated name of a definition or theorem.
    RuleName
}

identifier_newtype! {
    /// A validated name of a universally quantified rule parameter.
    Param
}

/// Builds a parameter set from names.
///
/// Repeated names collapse into one entry.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidIdentifier`] for the first name that
/// fails identifier validation.
///
///     use eqproof::params;
///
///     let ps = params(["x", "b"]).unwrap();
///     assert!(ps.contains("x"));
pub fn params<I, S>(names: I) -> Result<Params, DocumentError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Param::new).collect()
}
