//! Type-safe price representation.
//!
//! Prices in the shop are whole Norwegian kroner - the bakery never sells
//! anything priced in øre, and the source data stores plain integers.

use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// A price in whole Norwegian kroner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero kroner.
    pub const ZERO: Self = Self(0);

    /// Create a price from whole kroner.
    #[must_use]
    pub const fn from_kroner(kroner: i64) -> Self {
        Self(kroner)
    }

    /// Get the amount in whole kroner.
    #[must_use]
    pub const fn as_kroner(&self) -> i64 {
        self.0
    }

    /// Format for display (e.g., "35 kr").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} kr", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * i64::from(rhs))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kr", self.0)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let kroner = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(kroner))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let unit = Price::from_kroner(35);
        assert_eq!(unit * 3, Price::from_kroner(105));
        assert_eq!(unit + Price::from_kroner(90), Price::from_kroner(125));

        let mut total = Price::ZERO;
        total += unit;
        assert_eq!(total.as_kroner(), 35);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_kroner(129).to_string(), "129 kr");
        assert_eq!(Price::from_kroner(129).display(), "129 kr");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_kroner(45);
        assert_eq!(serde_json::to_string(&price).unwrap(), "45");
        let parsed: Price = serde_json::from_str("45").unwrap();
        assert_eq!(parsed, price);
    }
}
