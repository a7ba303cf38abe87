//! Edit dialog for the current currency.
//!
//! The dialog is a small state machine:
//!
//! ```text
//! Closed -> Fetching -> Ready | FetchError
//! Ready -> Submitting -> Closed (saved) | Ready (failed)
//! ```
//!
//! It never talks to the terminal: the app renders [`CurrencyEditDialog`] and
//! forwards key presses to it. Every outcome the user must see is queued as a
//! [`Toast`] and collected with [`CurrencyEditDialog::take_notifications`].

use api_types::currency::{CurrencyUpdate, CurrencyView, RateInput};
use uuid::Uuid;

use crate::{client::CurrencyApi, toast::Toast};

pub const FETCH_ERROR: &str = "unable to load the currency";
pub const UPDATE_SUCCESS: &str = "currency updated";
pub const UPDATE_FAILED: &str = "currency update failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Fetching,
    Ready,
    /// The fetch failed; the form stays locked until the dialog is reopened.
    FetchError(String),
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Rate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyForm {
    pub name: String,
    pub rate: String,
    pub focus: Field,
}

impl Default for CurrencyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            rate: String::new(),
            focus: Field::Name,
        }
    }
}

impl CurrencyForm {
    fn fill(&mut self, currency: &CurrencyView) {
        self.name = currency.name.clone();
        self.rate = currency.rate.to_string();
        self.focus = Field::Name;
    }

    fn active_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Rate => &mut self.rate,
        }
    }

    /// Required-field checks run before anything is sent.
    fn validate(&self) -> Result<CurrencyUpdate, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("currency name is required".to_string());
        }

        let rate = self.rate.trim();
        if rate.is_empty() {
            return Err("exchange rate is required".to_string());
        }
        let rate: f64 = rate
            .parse()
            .ok()
            .filter(|value: &f64| value.is_finite())
            .ok_or_else(|| "exchange rate must be a number".to_string())?;
        if rate < 0.0 {
            return Err("exchange rate must be >= 0".to_string());
        }

        Ok(CurrencyUpdate {
            name: Some(name.to_string()),
            rate: Some(RateInput::Number(rate)),
        })
    }
}

/// An update that passed validation and waits to be sent.
#[derive(Debug)]
pub struct PendingUpdate {
    pub id: Uuid,
    pub body: CurrencyUpdate,
}

type OnUpdate = Box<dyn FnMut(&CurrencyView) + Send>;

pub struct CurrencyEditDialog {
    state: DialogState,
    current: Option<CurrencyView>,
    form: CurrencyForm,
    notifications: Vec<Toast>,
    on_update: Option<OnUpdate>,
}

impl Default for CurrencyEditDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CurrencyEditDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyEditDialog")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("form", &self.form)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

impl CurrencyEditDialog {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            current: None,
            form: CurrencyForm::default(),
            notifications: Vec::new(),
            on_update: None,
        }
    }

    /// Called with the saved currency after every successful update.
    pub fn with_on_update(mut self, on_update: impl FnMut(&CurrencyView) + Send + 'static) -> Self {
        self.on_update = Some(Box::new(on_update));
        self
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn current(&self) -> Option<&CurrencyView> {
        self.current.as_ref()
    }

    pub fn form(&self) -> &CurrencyForm {
        &self.form
    }

    pub fn take_notifications(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.notifications)
    }

    /// Open the dialog and mark it as loading. Ignored while submitting.
    pub fn open(&mut self) {
        if self.state == DialogState::Submitting {
            return;
        }
        self.form = CurrencyForm::default();
        self.state = DialogState::Fetching;
    }

    /// Load the current currency into the form.
    pub async fn fetch<A: CurrencyApi>(&mut self, api: &A) {
        if self.state != DialogState::Fetching {
            return;
        }

        match api.current_currency().await {
            Ok(currency) => {
                match &currency {
                    Some(currency) => self.form.fill(currency),
                    None => self.form = CurrencyForm::default(),
                }
                self.current = currency;
                self.state = DialogState::Ready;
            }
            Err(err) => {
                tracing::error!("failed to fetch currency: {err}");
                self.state = DialogState::FetchError(FETCH_ERROR.to_string());
            }
        }
    }

    /// [`open`](Self::open) followed by [`fetch`](Self::fetch).
    pub async fn open_with<A: CurrencyApi>(&mut self, api: &A) {
        self.open();
        self.fetch(api).await;
    }

    /// Close without saving. Returns `false` while a submit is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.state == DialogState::Submitting {
            return false;
        }
        self.state = DialogState::Closed;
        true
    }

    pub fn input(&mut self, ch: char) {
        if self.state == DialogState::Ready {
            self.form.active_mut().push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.state == DialogState::Ready {
            self.form.active_mut().pop();
        }
    }

    pub fn next_field(&mut self) {
        if self.state == DialogState::Ready {
            self.form.focus = match self.form.focus {
                Field::Name => Field::Rate,
                Field::Rate => Field::Name,
            };
        }
    }

    /// Validate the form and move to `Submitting`.
    ///
    /// Returns `None` when there is nothing to send; a rejected form queues an
    /// error toast and stays `Ready`.
    pub fn begin_submit(&mut self) -> Option<PendingUpdate> {
        if self.state != DialogState::Ready {
            return None;
        }

        let Some(id) = self.current.as_ref().map(|currency| currency.id) else {
            self.notifications.push(Toast::error("no currency to update"));
            return None;
        };

        match self.form.validate() {
            Ok(body) => {
                self.state = DialogState::Submitting;
                Some(PendingUpdate { id, body })
            }
            Err(message) => {
                self.notifications.push(Toast::error(message));
                None
            }
        }
    }

    /// Send a pending update and apply the outcome.
    pub async fn finish_submit<A: CurrencyApi>(&mut self, api: &A, pending: PendingUpdate) {
        match api.update_currency(pending.id, &pending.body).await {
            Ok(updated) => {
                tracing::info!(id = %updated.id, "currency updated");
                if let Some(on_update) = self.on_update.as_mut() {
                    on_update(&updated);
                }
                self.current = Some(updated);
                self.notifications.push(Toast::success(UPDATE_SUCCESS));
                self.state = DialogState::Closed;
            }
            Err(err) => {
                tracing::error!("failed to update currency: {err}");
                let message = err.server_message().unwrap_or(UPDATE_FAILED).to_string();
                self.notifications.push(Toast::error(message));
                self.state = DialogState::Ready;
            }
        }
    }

    /// [`begin_submit`](Self::begin_submit) followed by
    /// [`finish_submit`](Self::finish_submit).
    pub async fn submit<A: CurrencyApi>(&mut self, api: &A) {
        if let Some(pending) = self.begin_submit() {
            self.finish_submit(api, pending).await;
        }
    }
}
