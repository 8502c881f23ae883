// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.

/// Map a fieldless enum to fixed string tags.
///
/// Generates `as_str()`, a `Display` impl that writes the tag, `ALL` in
/// declaration order, and a `FromStr` impl that returns the given error
/// type (constructed from the rejected input) for unknown tags.
///
/// ```ignore
/// ni_core::string_enum! {
///     Color, UnknownColor {
///         Red => "red",
///         Green => "green",
///     }
/// }
/// ```
#[macro_export]
macro_rules! string_enum {
    ($enum:ident, $err:ident { $( $variant:ident => $tag:literal ),+ $(,)? }) => {
        impl $enum {
            pub const ALL: &'static [$enum] = &[ $( $enum::$variant ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $enum::$variant => $tag, )+
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum {
            type Err = $err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok($enum::$variant), )+
                    other => Err($err(other.to_string())),
                }
            }
        }
    };
}
