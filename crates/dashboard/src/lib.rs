//! Terminal back office for the yodi currency.
//!
//! The binary opens [`dialog::CurrencyEditDialog`] against the server
//! configured in [`config::AppConfig`].

pub mod app;
pub mod client;
pub mod config;
pub mod dialog;
pub mod error;
pub mod toast;
pub mod ui;
