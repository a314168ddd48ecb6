//! String-backed identifiers.
//!
//! Identifiers are persisted as JSON strings and compared verbatim. Numeric
//! meaning (used for "next id" allocation) is derived on demand with
//! [`crate::parse_int_prefix`], never stored.

/// Declare a `#[serde(transparent)]` string newtype identifier.
///
/// The generated type gets `as_str`, `numeric_value`, `Display`, `From<String>`,
/// `From<&str>` and a `FromStr` that rejects blank input.
#[macro_export]
macro_rules! string_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Numeric reading of the id (leading integer prefix), if any.
            pub fn numeric_value(&self) -> Option<i64> {
                $crate::parse_int_prefix(&self.0)
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err($crate::DomainError::invalid_id(format!(
                        "{}: must not be blank",
                        $name
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}
