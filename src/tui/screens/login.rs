//! Login screen
//!
//! Credentials go to the mocked auth backend: any non-empty pair is
//! accepted after the configured latency, so the screen's only real
//! failure mode is a blank field.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::auth;
use crate::theme::Theme;
use crate::tui::app::ScreenAction;
use crate::tui::ui::{centered_rect, InputField, Styles};

/// Login form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

pub struct LoginScreen {
    pub email_input: InputField,
    pub password_input: InputField,
    current_field: LoginField,
    pub is_submitting: bool,
    pub error: Option<String>,
    latency: Duration,
}

impl LoginScreen {
    pub fn new(latency: Duration) -> Self {
        let mut screen = Self {
            email_input: InputField::new("Email").with_placeholder("you@example.com"),
            password_input: InputField::new("Password").masked(),
            current_field: LoginField::Email,
            is_submitting: false,
            error: None,
            latency,
        };
        screen.update_field_focus();
        screen
    }

    fn update_field_focus(&mut self) {
        self.email_input
            .set_focus(self.current_field == LoginField::Email);
        self.password_input
            .set_focus(self.current_field == LoginField::Password);
    }

    fn focused_input(&mut self) -> &mut InputField {
        match self.current_field {
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    fn next_field(&mut self) {
        self.current_field = match self.current_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.update_field_focus();
    }

    /// Reset the form after a sign-out
    pub fn reset(&mut self) {
        self.email_input.clear();
        self.password_input.clear();
        self.error = None;
        self.is_submitting = false;
        self.current_field = LoginField::Email;
        self.update_field_focus();
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.next_field();
            }
            KeyCode::Enter => return self.submit().await,
            KeyCode::Esc => return Ok(ScreenAction::Quit),
            KeyCode::Char(c) => {
                self.error = None;
                self.focused_input().insert_char(c);
            }
            KeyCode::Backspace => self.focused_input().delete_char(),
            KeyCode::Delete => self.focused_input().delete_char_forward(),
            KeyCode::Left => self.focused_input().move_cursor_left(),
            KeyCode::Right => self.focused_input().move_cursor_right(),
            KeyCode::Home => self.focused_input().move_cursor_to_start(),
            KeyCode::End => self.focused_input().move_cursor_to_end(),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    async fn submit(&mut self) -> Result<ScreenAction> {
        self.is_submitting = true;
        let result = auth::login(
            &self.email_input.value,
            &self.password_input.value,
            self.latency,
        )
        .await;
        self.is_submitting = false;

        match result {
            Ok(user) => {
                self.error = None;
                self.password_input.clear();
                Ok(ScreenAction::LoggedIn(user))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Ok(ScreenAction::SetError(e.to_string()))
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let card = centered_rect(52, 70, area);
        let block = Block::default()
            .title("Sign In")
            .borders(Borders::ALL)
            .border_style(Styles::active_border(theme));
        let inner = block.inner(card);
        f.render_widget(block, card);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Heading
                Constraint::Length(3), // Email
                Constraint::Length(3), // Password
                Constraint::Length(1), // Error
                Constraint::Length(2), // Hint
                Constraint::Min(0),
            ])
            .split(inner);

        let heading = Paragraph::new(Line::from(Span::styled(
            "stockpit — inventory manager",
            Styles::title(theme).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(heading, chunks[0]);

        self.email_input.render(f, chunks[1], theme);
        self.password_input.render(f, chunks[2], theme);

        if let Some(ref error) = self.error {
            let line = Paragraph::new(error.clone())
                .style(Styles::error(theme))
                .alignment(Alignment::Center);
            f.render_widget(line, chunks[3]);
        } else if self.is_submitting {
            let line = Paragraph::new("Signing in...")
                .style(Styles::info(theme))
                .alignment(Alignment::Center);
            f.render_widget(line, chunks[3]);
        }

        let hint = Paragraph::new(vec![
            Line::from(Span::styled(
                "Demo build: any email and password will do",
                Styles::muted(theme),
            )),
            Line::from(Span::styled(
                "Tab: switch field | Enter: sign in | Esc: quit",
                Styles::muted(theme),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(hint, chunks[4]);
    }
}
