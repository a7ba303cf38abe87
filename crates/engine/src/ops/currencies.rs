use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, CurrencyPatch, EngineError, Rate, ResultEngine, currencies,
    currency::{normalize_currency_name, parse_currency_id},
};

use super::{Engine, with_tx};

impl Engine {
    /// Persist a new currency and return it with its generated id.
    pub async fn create_currency(&self, name: &str, rate: Rate) -> ResultEngine<Currency> {
        let name = normalize_currency_name(name)?;
        let now = Utc::now();

        let model = currencies::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            name: ActiveValue::Set(name),
            rate: ActiveValue::Set(rate.value()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        Currency::try_from(model)
    }

    /// The currency in use: the most recently created one, `None` when the
    /// store is empty.
    pub async fn current_currency(&self) -> ResultEngine<Option<Currency>> {
        currencies::Entity::find()
            .order_by_desc(currencies::Column::CreatedAt)
            .order_by_desc(currencies::Column::Id)
            .one(&self.database)
            .await?
            .map(Currency::try_from)
            .transpose()
    }

    /// Look a currency up by id.
    pub async fn currency(&self, currency_id: &str) -> ResultEngine<Currency> {
        let id = parse_currency_id(currency_id)?;
        let model = currencies::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(currency_id.to_string()))?;

        Currency::try_from(model)
    }

    /// Overwrite the fields set in `patch` and return the updated currency.
    ///
    /// Lookup and write share one transaction; a missing id never creates a row.
    pub async fn update_currency(
        &self,
        currency_id: &str,
        patch: CurrencyPatch,
    ) -> ResultEngine<Currency> {
        let id = parse_currency_id(currency_id)?;
        let name = patch
            .name
            .as_deref()
            .map(normalize_currency_name)
            .transpose()?;

        with_tx!(self, |db_tx| {
            let Some(model) = currencies::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
            else {
                return Err(EngineError::KeyNotFound(currency_id.to_string()));
            };

            let mut active: currencies::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(rate) = patch.rate {
                active.rate = ActiveValue::Set(rate.value());
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Currency::try_from(model)
        })
    }
}
