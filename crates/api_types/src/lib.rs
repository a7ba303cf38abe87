use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod currency {
    use super::*;

    /// Exchange rate as sent by clients.
    ///
    /// Forms usually submit the rate as typed text, so both a JSON number and a
    /// numeric string are accepted. The engine decides whether the value is valid.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RateInput {
        Number(f64),
        Text(String),
    }

    impl From<f64> for RateInput {
        fn from(value: f64) -> Self {
            Self::Number(value)
        }
    }

    /// Request body for `POST /currency`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyNew {
        pub name: String,
        pub rate: RateInput,
    }

    /// Request body for `PUT /currency/{currencyId}`.
    ///
    /// Missing fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CurrencyUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub rate: Option<RateInput>,
    }

    /// A currency as returned by every endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CurrencyView {
        pub id: Uuid,
        pub name: String,
        pub rate: f64,
    }
}

pub mod error {
    use super::*;

    /// Body of every non-success response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }
}
