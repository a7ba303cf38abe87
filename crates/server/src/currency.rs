//! Currency API endpoints.

use api_types::currency::{CurrencyNew, CurrencyUpdate, CurrencyView, RateInput};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{CurrencyPatch, EngineError, Rate};

use crate::{Operation, ServerError, server::ServerState};

fn map_currency(currency: engine::Currency) -> CurrencyView {
    CurrencyView {
        id: currency.id,
        name: currency.name,
        rate: currency.rate,
    }
}

fn parse_rate(input: RateInput) -> Result<Rate, EngineError> {
    match input {
        RateInput::Number(value) => Rate::try_from(value),
        RateInput::Text(text) => text.parse(),
    }
}

/// `POST /currency`
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CurrencyNew>, JsonRejection>,
) -> Result<(StatusCode, Json<CurrencyView>), ServerError> {
    let op = Operation::Create;
    let Json(payload) = payload.map_err(|rejection| ServerError::Body(op, rejection))?;
    let rate = parse_rate(payload.rate).map_err(|err| ServerError::Engine(op, err))?;

    let currency = state
        .engine
        .create_currency(&payload.name, rate)
        .await
        .map_err(|err| ServerError::Engine(op, err))?;
    tracing::info!(id = %currency.id, "created currency {currency}");

    Ok((StatusCode::CREATED, Json(map_currency(currency))))
}

/// `GET /currency`, `null` when no currency exists yet.
pub async fn get(
    State(state): State<ServerState>,
) -> Result<Json<Option<CurrencyView>>, ServerError> {
    let currency = state
        .engine
        .current_currency()
        .await
        .map_err(|err| ServerError::Engine(Operation::Fetch, err))?;

    Ok(Json(currency.map(map_currency)))
}

/// `PUT /currency/{currency_id}`
pub async fn update(
    State(state): State<ServerState>,
    Path(currency_id): Path<String>,
    payload: Result<Json<CurrencyUpdate>, JsonRejection>,
) -> Result<Json<CurrencyView>, ServerError> {
    let op = Operation::Update;
    let Json(payload) = payload.map_err(|rejection| ServerError::Body(op, rejection))?;
    let patch = CurrencyPatch {
        name: payload.name,
        rate: payload
            .rate
            .map(parse_rate)
            .transpose()
            .map_err(|err| ServerError::Engine(op, err))?,
    };

    let currency = state
        .engine
        .update_currency(&currency_id, patch)
        .await
        .map_err(|err| ServerError::Engine(op, err))?;
    tracing::info!(id = %currency.id, "updated currency {currency}");

    Ok(Json(map_currency(currency)))
}
