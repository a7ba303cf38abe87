use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, currencies};

/// A currency of the store and its exchange rate.
///
/// `rate` converts an amount of this currency into the base currency of the
/// store. The base currency itself is implicit and never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Currency {
    pub id: Uuid,
    pub name: String,
    pub rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<currencies::Model> for Currency {
    type Error = EngineError;

    fn try_from(model: currencies::Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|err| {
            EngineError::Database(DbErr::Custom(format!(
                "invalid currency id '{}' in store: {err}",
                model.id
            )))
        })?;

        Ok(Self {
            id,
            name: model.name,
            rate: model.rate,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (rate {})", self.name, self.rate)
    }
}

/// A validated exchange rate: finite and not negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rate {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(EngineError::InvalidRate(
                "rate must be a finite number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(EngineError::InvalidRate(format!(
                "rate must be >= 0, got {value}"
            )));
        }
        Ok(Self(value))
    }
}

/// Parses a rate typed as text, e.g. `"655.957"`.
impl FromStr for Rate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidRate("rate is required".to_string()));
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| EngineError::InvalidRate(format!("'{trimmed}' is not a number")))?;
        Self::try_from(value)
    }
}

/// Fields to overwrite on an existing currency. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrencyPatch {
    pub name: Option<String>,
    pub rate: Option<Rate>,
}

impl CurrencyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.rate.is_none()
    }
}

/// Trim the name and reject blank ones.
pub(crate) fn normalize_currency_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "currency name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Ids that are not UUIDs cannot exist in the store.
pub(crate) fn parse_currency_id(value: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| EngineError::KeyNotFound(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_rejects_negative_and_non_finite() {
        assert!(matches!(
            Rate::try_from(-0.5),
            Err(EngineError::InvalidRate(_))
        ));
        assert!(matches!(
            Rate::try_from(f64::NAN),
            Err(EngineError::InvalidRate(_))
        ));
        assert!(matches!(
            Rate::try_from(f64::INFINITY),
            Err(EngineError::InvalidRate(_))
        ));
        assert_eq!(Rate::try_from(0.0).map(Rate::value), Ok(0.0));
    }

    #[test]
    fn rate_parses_text() {
        assert_eq!("655.957".parse::<Rate>().map(Rate::value), Ok(655.957));
        assert_eq!(" 1 ".parse::<Rate>().map(Rate::value), Ok(1.0));
        assert_eq!(
            "".parse::<Rate>(),
            Err(EngineError::InvalidRate("rate is required".to_string()))
        );
        assert!(matches!(
            "abc".parse::<Rate>(),
            Err(EngineError::InvalidRate(_))
        ));
        assert!(matches!(
            "inf".parse::<Rate>(),
            Err(EngineError::InvalidRate(_))
        ));
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(normalize_currency_name("  FCFA "), Ok("FCFA".to_string()));
        assert!(matches!(
            normalize_currency_name("   "),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert_eq!(
            parse_currency_id("nope"),
            Err(EngineError::KeyNotFound("nope".to_string()))
        );
        let id = Uuid::new_v4();
        assert_eq!(parse_currency_id(&id.to_string()), Ok(id));
    }
}
