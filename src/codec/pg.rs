//! Postgres binding for enumerated values.
//!
//! Enumerated columns are TEXT on the wire. Decoding copies the text verbatim
//! (no literal-set check), encoding writes the literal. `Option<T>` carries
//! NULL in both directions, so nullable enum columns need nothing extra.

/// Implement `sqlx::Type`, `Decode` and `Encode` for Postgres as TEXT.
macro_rules! impl_pg_text {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <&str as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let text = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(<$name as $crate::codec::literal::LiteralEnum>::from_literal(
                    text.to_owned(),
                ))
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(
                    <$name as $crate::codec::literal::LiteralEnum>::as_literal(self),
                    buf,
                )
            }
        }
    };
}

pub(crate) use impl_pg_text;
