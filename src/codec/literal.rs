//! Closed-set string values and their (permissive) codec.
//!
//! Decoding never checks membership in the declared literal set: any text is
//! accepted and kept verbatim, so the stored literal set can grow without a
//! code change. Membership is checked later, by `validation`.

use super::raw::{RawValue, TextCell};
use crate::error::CodecError;

/// A string enumeration backed by a fixed set of declared literals.
pub trait LiteralEnum: Sized {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Every declared literal, in declaration order.
    const LITERALS: &'static [&'static str];

    /// Build a value from stored text. Must accept any string.
    fn from_literal(literal: String) -> Self;

    fn as_literal(&self) -> &str;

    /// Whether the held literal is one of `LITERALS`.
    fn is_declared(&self) -> bool {
        Self::LITERALS.contains(&self.as_literal())
    }
}

/// Decode a non-nullable enumerated column.
///
/// NULL is not valid input here; callers holding a nullable column use
/// [`decode_nullable`].
pub fn decode<E: LiteralEnum>(raw: RawValue) -> Result<E, CodecError> {
    match raw.into_text_cell(E::TYPE_NAME)? {
        TextCell::Text(s) => Ok(E::from_literal(s)),
        TextCell::Absent => Err(CodecError::UnsupportedScanType {
            target: E::TYPE_NAME,
            found: "null",
        }),
    }
}

/// Decode a nullable enumerated column. NULL yields `None`.
pub fn decode_nullable<E: LiteralEnum>(raw: RawValue) -> Result<Option<E>, CodecError> {
    if raw.is_null() {
        return Ok(None);
    }
    decode(raw).map(Some)
}

/// Decode into an existing slot.
///
/// NULL resets the slot to `None` whatever it held before. On error the slot
/// is left exactly as it was.
pub fn scan_nullable<E: LiteralEnum>(slot: &mut Option<E>, raw: RawValue) -> Result<(), CodecError> {
    *slot = decode_nullable(raw)?;
    Ok(())
}

pub fn encode<E: LiteralEnum>(value: &E) -> String {
    value.as_literal().to_string()
}

/// Encode a nullable enumerated field for parameter binding. Never fails.
pub fn encode_nullable<E: LiteralEnum>(value: Option<&E>) -> TextCell {
    match value {
        Some(v) => TextCell::Text(encode(v)),
        None => TextCell::Absent,
    }
}

/// Declare a closed-set string enum with an `Other` fallback for undeclared text.
///
/// Generates the enum, its `LiteralEnum` impl, string conversions, serde
/// support via those conversions, `Display`, and `FromRaw`.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Text outside the declared literal set, kept verbatim.
            Other(String),
        }

        impl $crate::codec::literal::LiteralEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const LITERALS: &'static [&'static str] = &[$($lit),+];

            fn from_literal(literal: String) -> Self {
                match literal.as_str() {
                    $( $lit => $name::$variant, )+
                    _ => $name::Other(literal),
                }
            }

            fn as_literal(&self) -> &str {
                match self {
                    $( $name::$variant => $lit, )+
                    $name::Other(s) => s,
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                <$name as $crate::codec::literal::LiteralEnum>::from_literal(s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                <$name as $crate::codec::literal::LiteralEnum>::as_literal(&v).to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(<$name as $crate::codec::literal::LiteralEnum>::as_literal(self))
            }
        }

        impl $crate::codec::row::FromRaw for $name {
            fn from_raw(raw: $crate::codec::raw::RawValue) -> Result<Self, $crate::error::CodecError> {
                $crate::codec::literal::decode(raw)
            }
        }

        $crate::codec::pg::impl_pg_text!($name);
    };
}

pub(crate) use literal_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{AuthType, Plan};

    #[test]
    fn test_decode_text_into_plan() {
        let plan: Option<Plan> = decode_nullable(RawValue::from("pro")).unwrap();
        assert_eq!(plan, Some(Plan::Pro));
        assert_eq!(encode_nullable(plan.as_ref()), TextCell::Text("pro".to_string()));
    }

    #[test]
    fn test_decode_null_into_plan() {
        let plan: Option<Plan> = decode_nullable(RawValue::Null).unwrap();
        assert_eq!(plan, None);
        assert_eq!(encode_nullable(plan.as_ref()), TextCell::Absent);
    }

    #[test]
    fn test_decode_bytes_into_auth_type() {
        let auth: Option<AuthType> = decode_nullable(RawValue::from(&b"jwt"[..])).unwrap();
        assert_eq!(auth, Some(AuthType::Jwt));
        assert_eq!(auth.unwrap().as_literal(), "jwt");
    }

    #[test]
    fn test_integer_is_unsupported() {
        let err = decode_nullable::<Plan>(RawValue::Int(42)).unwrap_err();
        assert_eq!(err.to_string(), "unsupported scan type for Plan: int64");

        let err = decode::<AuthType>(RawValue::Int(42)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedScanType { target: "AuthType", found: "int64" }
        ));
    }

    #[test]
    fn test_non_nullable_rejects_null() {
        let err = decode::<Plan>(RawValue::Null).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedScanType { found: "null", .. }));
    }

    #[test]
    fn test_every_declared_literal_round_trips() {
        for lit in Plan::LITERALS.iter().chain(AuthType::LITERALS) {
            let raw = RawValue::from(*lit);
            let cell = match *lit {
                "key" | "jwt" => encode_nullable(decode_nullable::<AuthType>(raw).unwrap().as_ref()),
                _ => encode_nullable(decode_nullable::<Plan>(raw).unwrap().as_ref()),
            };
            assert_eq!(cell.as_deref(), Some(*lit));
        }
    }

    #[test]
    fn test_undeclared_literal_decodes_verbatim() {
        let plan: Plan = decode(RawValue::from("team")).unwrap();
        assert_eq!(plan, Plan::Other("team".to_string()));
        assert!(!plan.is_declared());
        assert_eq!(encode(&plan), "team");

        let empty: Plan = decode(RawValue::from("")).unwrap();
        assert_eq!(empty.as_literal(), "");
    }

    #[test]
    fn test_scan_null_clears_previous_literal() {
        let mut slot = Some(Plan::Enterprise);
        scan_nullable(&mut slot, RawValue::Null).unwrap();
        assert_eq!(slot, None);
        assert_eq!(encode_nullable(slot.as_ref()), TextCell::Absent);
    }

    #[test]
    fn test_scan_failure_leaves_slot_unmodified() {
        let mut slot = Some(AuthType::Key);
        let err = scan_nullable(&mut slot, RawValue::Float(3.5)).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedScanType { found: "float64", .. }));
        assert_eq!(slot, Some(AuthType::Key));
    }

    #[test]
    fn test_serde_uses_literal_text() {
        let json = serde_json::to_string(&Plan::Enterprise).unwrap();
        assert_eq!(json, "\"enterprise\"");

        let plan: Plan = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(plan, Plan::Free);
    }
}
