//! Form state and key handling.

use bmi_model::ValidationError;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::presenter::{Form, Presenter, PresenterError, Session, Trend, TrendView};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Username,
    Weight,
    Height,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Username => Focus::Weight,
            Focus::Weight => Focus::Height,
            Focus::Height => Focus::Username,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Username => Focus::Height,
            Focus::Weight => Focus::Username,
            Focus::Height => Focus::Weight,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Error,
    Info,
}

/// A message box shown on top of the form until any key is pressed.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub severity: Severity,
    pub title: String,
    pub text: String,
}

impl Message {
    fn error(title: &str, text: impl ToString) -> Self {
        Self {
            severity: Severity::Error,
            title: title.to_owned(),
            text: text.to_string(),
        }
    }

    fn info(title: &str, text: impl ToString) -> Self {
        Self {
            severity: Severity::Info,
            title: title.to_owned(),
            text: text.to_string(),
        }
    }
}

pub struct App {
    presenter: Presenter,
    session: Session,
    form: Form,
    focus: Focus,
    message: Option<Message>,
    trend: Option<Trend>,
    running: bool,
}

impl App {
    pub fn new(presenter: Presenter) -> Self {
        Self {
            presenter,
            session: Session::new(),
            form: Form::default(),
            focus: Focus::Username,
            message: None,
            trend: None,
            running: true,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn trend(&self) -> Option<&Trend> {
        self.trend.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        if self.message.take().is_some() {
            return;
        }
        if self.trend.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.trend = None;
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => self.calculate().await,
            KeyCode::F(2) => self.show_trend().await,
            KeyCode::Char('t') if ctrl => self.show_trend().await,
            KeyCode::Char('r') if ctrl => self.refresh_history().await,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Backspace => {
                self.focused_field().pop();
            }
            KeyCode::Char(c) if !ctrl => self.focused_field().push(c),
            _ => {}
        }
    }

    fn focused_field(&mut self) -> &mut String {
        match self.focus {
            Focus::Username => &mut self.form.username,
            Focus::Weight => &mut self.form.weight,
            Focus::Height => &mut self.form.height,
        }
    }

    async fn calculate(&mut self) {
        debug!("Calculate requested");
        if let Err(e) = self.presenter.calculate(&mut self.session, &self.form).await {
            self.message = Some(match e {
                PresenterError::Invalid(e) => Message::error("Invalid Input", e),
                PresenterError::Store(e) => Message::error("Error", e),
            });
        }
    }

    async fn refresh_history(&mut self) {
        if let Err(e) = self
            .presenter
            .refresh_history(&mut self.session, &self.form.username)
            .await
        {
            self.message = Some(Message::error("Error", e));
        }
    }

    async fn show_trend(&mut self) {
        debug!("Trend requested");
        match self.presenter.trend(&self.form.username).await {
            Ok(TrendView::Chart(trend)) => self.trend = Some(trend),
            Ok(TrendView::Empty) => {
                self.message = Some(Message::info("No Data", "No records found for the user."))
            }
            Err(PresenterError::Invalid(ValidationError::EmptyUsername)) => {
                self.message = Some(Message::error(
                    "Error",
                    "Please enter a username to view trends.",
                ))
            }
            Err(e) => self.message = Some(Message::error("Error", e)),
        }
    }
}
