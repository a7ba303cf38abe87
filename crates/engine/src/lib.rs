//! Currency store of the yodi back office.
//!
//! [`Engine`] wraps the database connection and exposes the currency
//! operations; every input goes through the same validation whether it comes
//! from the HTTP server or the admin CLI.

pub use currency::{Currency, CurrencyPatch, Rate};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};

mod currencies;
mod currency;
mod error;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
