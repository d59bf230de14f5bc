//! Macro for implementing Display and FromStr for small status enums
//!
//! Session states and punch modes cross the HTTP boundary and the logs as
//! plain strings. This macro keeps those spellings in one place.
//!
//! # Example
//!
//! ```rust
//! use punchcard_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Day,
//!     Night,
//! }
//!
//! impl_domain_status_conversions!(Shift {
//!     Day => "day",
//!     Night => "night",
//! });
//!
//! assert_eq!(Shift::Night.to_string(), "night");
//! assert_eq!("DAY".parse::<Shift>(), Ok(Shift::Day));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
///
/// Parsing is case-insensitive; the error names the enum and the rejected
/// input. Paths in the expansion are absolute so call sites may shadow
/// `Result` with the crate alias.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
