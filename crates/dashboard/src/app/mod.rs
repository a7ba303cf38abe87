use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use api_types::currency::CurrencyView;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    client::{Client, CurrencyApi},
    config::AppConfig,
    dialog::{CurrencyEditDialog, DialogState},
    error::{AppError, Result},
    toast::Toast,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug)]
pub struct AppState {
    pub dialog: CurrencyEditDialog,
    pub toasts: Vec<Toast>,
    pub summary: Option<CurrencyView>,
    pub summary_error: Option<String>,
    pub base_url: String,
}

impl AppState {
    fn collect_notifications(&mut self) {
        self.toasts.extend(self.dialog.take_notifications());
    }

    fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Open,
    Cancel,
    NextField,
    Backspace,
    Input(char),
    Submit,
    Ignore,
}

/// What a key does depends on where the dialog is.
fn command_for(state: &DialogState, action: AppAction) -> Command {
    if action == AppAction::Quit {
        return Command::Quit;
    }

    match state {
        DialogState::Closed => match action {
            AppAction::Input('q' | 'Q') => Command::Quit,
            AppAction::Input('e' | 'E' | 'r' | 'R') | AppAction::Submit => Command::Open,
            _ => Command::Ignore,
        },
        DialogState::FetchError(_) => match action {
            AppAction::Cancel => Command::Cancel,
            AppAction::Input('r' | 'R') => Command::Open,
            _ => Command::Ignore,
        },
        DialogState::Ready => match action {
            AppAction::Cancel => Command::Cancel,
            AppAction::NextField => Command::NextField,
            AppAction::Backspace => Command::Backspace,
            AppAction::Input(ch) => Command::Input(ch),
            AppAction::Submit => Command::Submit,
            _ => Command::Ignore,
        },
        DialogState::Fetching | DialogState::Submitting => Command::Ignore,
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    refresh: Arc<AtomicBool>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let refresh = Arc::new(AtomicBool::new(false));
        let flag = refresh.clone();
        let dialog = CurrencyEditDialog::new().with_on_update(move |_| {
            flag.store(true, Ordering::SeqCst);
        });

        Ok(Self {
            client,
            state: AppState {
                dialog,
                toasts: Vec::new(),
                summary: None,
                summary_error: None,
                base_url: config.base_url,
            },
            refresh,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn draw(&self, terminal: &mut ui::Terminal) -> Result<()> {
        terminal
            .draw(|frame| ui::render(frame, &self.state))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.load_summary().await;
        self.open_dialog(terminal).await?;

        while !self.should_quit {
            self.state.prune_toasts(Instant::now());
            self.draw(terminal)?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, terminal).await?;
                    }
                }
            }

            if self.refresh.swap(false, Ordering::SeqCst) {
                self.load_summary().await;
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, terminal: &mut ui::Terminal) -> Result<()> {
        match command_for(self.state.dialog.state(), map_key(key)) {
            Command::Quit => self.should_quit = true,
            Command::Open => self.open_dialog(terminal).await?,
            Command::Cancel => {
                self.state.dialog.cancel();
            }
            Command::NextField => self.state.dialog.next_field(),
            Command::Backspace => self.state.dialog.backspace(),
            Command::Input(ch) => self.state.dialog.input(ch),
            Command::Submit => self.submit(terminal).await?,
            Command::Ignore => {}
        }

        Ok(())
    }

    async fn open_dialog(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        self.state.dialog.open();
        self.draw(terminal)?;
        self.state.dialog.fetch(&self.client).await;
        self.state.collect_notifications();
        Ok(())
    }

    async fn submit(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        if let Some(pending) = self.state.dialog.begin_submit() {
            self.draw(terminal)?;
            self.state.dialog.finish_submit(&self.client, pending).await;
        }
        self.state.collect_notifications();
        Ok(())
    }

    async fn load_summary(&mut self) {
        match self.client.current_currency().await {
            Ok(currency) => {
                self.state.summary = currency;
                self.state.summary_error = None;
            }
            Err(err) => {
                tracing::error!("failed to load currency summary: {err}");
                self.state.summary_error = Some(format!("Server unreachable: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_reopens_after_close_and_fetch_error() {
        assert_eq!(
            command_for(&DialogState::Closed, AppAction::Input('r')),
            Command::Open
        );
        assert_eq!(
            command_for(&DialogState::FetchError("down".to_string()), AppAction::Input('r')),
            Command::Open
        );
        assert_eq!(
            command_for(&DialogState::Closed, AppAction::Input('e')),
            Command::Open
        );
    }

    #[test]
    fn r_is_plain_input_while_editing() {
        assert_eq!(
            command_for(&DialogState::Ready, AppAction::Input('r')),
            Command::Input('r')
        );
        assert_eq!(
            command_for(&DialogState::Ready, AppAction::Input('q')),
            Command::Input('q')
        );
    }

    #[test]
    fn keys_are_ignored_while_a_request_is_in_flight() {
        for state in [DialogState::Fetching, DialogState::Submitting] {
            assert_eq!(command_for(&state, AppAction::Cancel), Command::Ignore);
            assert_eq!(command_for(&state, AppAction::Submit), Command::Ignore);
        }
        assert_eq!(
            command_for(&DialogState::Submitting, AppAction::Quit),
            Command::Quit
        );
    }
}
