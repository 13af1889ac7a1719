//! Settings screen: profile, preferences, logout

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::auth::Session;
use crate::theme::{Theme, ThemeMode};
use crate::tui::app::ScreenAction;
use crate::tui::ui::Styles;

/// One actionable row on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsEntry {
    AccountSettings,
    CompanyProfile,
    DataManagement,
    DarkMode,
    Notifications,
    Logout,
}

impl SettingsEntry {
    fn label(&self) -> &str {
        match self {
            SettingsEntry::AccountSettings => "Account Settings",
            SettingsEntry::CompanyProfile => "Company Profile",
            SettingsEntry::DataManagement => "Data Management",
            SettingsEntry::DarkMode => "Dark Mode",
            SettingsEntry::Notifications => "Notifications",
            SettingsEntry::Logout => "Log Out",
        }
    }

    fn description(&self) -> &str {
        match self {
            SettingsEntry::AccountSettings => "Manage your account information",
            SettingsEntry::CompanyProfile => "Update your company information",
            SettingsEntry::DataManagement => "Export the dataset (see `stockpit export`)",
            SettingsEntry::DarkMode => "Switch between the light and dark palette",
            SettingsEntry::Notifications => "Low-stock and late-order notifications",
            SettingsEntry::Logout => "Sign out and return to the login screen",
        }
    }
}

pub struct SettingsScreen {
    entries: Vec<SettingsEntry>,
    state: ListState,
    pub notifications_enabled: bool,
}

impl SettingsScreen {
    pub fn new() -> Self {
        let entries = vec![
            SettingsEntry::AccountSettings,
            SettingsEntry::CompanyProfile,
            SettingsEntry::DataManagement,
            SettingsEntry::DarkMode,
            SettingsEntry::Notifications,
            SettingsEntry::Logout,
        ];
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            entries,
            state,
            notifications_enabled: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Up => {
                let selected = self.state.selected().unwrap_or(0);
                let new_selected = if selected == 0 {
                    self.entries.len() - 1
                } else {
                    selected - 1
                };
                self.state.select(Some(new_selected));
            }
            KeyCode::Down => {
                let selected = self.state.selected().unwrap_or(0);
                self.state.select(Some((selected + 1) % self.entries.len()));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(entry) = self.state.selected().and_then(|i| self.entries.get(i)) {
                    return Ok(self.activate(*entry));
                }
            }
            KeyCode::Esc => return Ok(ScreenAction::NavigateBack),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn activate(&mut self, entry: SettingsEntry) -> ScreenAction {
        match entry {
            SettingsEntry::AccountSettings | SettingsEntry::CompanyProfile => {
                ScreenAction::SetStatus(format!(
                    "{} is not available in the demo build",
                    entry.label()
                ))
            }
            SettingsEntry::DataManagement => ScreenAction::SetStatus(
                "Run `stockpit export` to dump the dataset as JSON".to_string(),
            ),
            SettingsEntry::DarkMode => ScreenAction::ToggleTheme,
            SettingsEntry::Notifications => {
                self.notifications_enabled = !self.notifications_enabled;
                ScreenAction::SetStatus(format!(
                    "Notifications {}",
                    if self.notifications_enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                ))
            }
            SettingsEntry::Logout => ScreenAction::Logout,
        }
    }

    pub fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        mode: ThemeMode,
        session: &Session,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Profile card
                Constraint::Min(0),    // Settings list
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.draw_profile(f, chunks[0], theme, session);
        self.draw_entries(f, chunks[1], theme, mode);

        let hints = Paragraph::new(Line::from(Span::styled(
            "↑/↓: navigate | Enter: select/toggle | Esc: back",
            Styles::muted(theme),
        )));
        f.render_widget(hints, chunks[2]);
    }

    fn draw_profile(&self, f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let (name, email, role) = match session.user() {
            Some(user) => (user.name.clone(), user.email.clone(), user.role.as_str()),
            None => ("User".to_string(), "user@example.com".to_string(), "USER"),
        };
        let initial = name.chars().next().unwrap_or('U');

        let lines = vec![
            Line::from(vec![
                Span::styled(format!("({}) ", initial), Styles::title(theme)),
                Span::styled(name, Styles::text(theme).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(email, Styles::muted(theme))),
            Line::from(Span::styled(role.to_string(), Styles::info(theme))),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .title("Profile")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(card, area);
    }

    fn draw_entries(&mut self, f: &mut Frame, area: Rect, theme: &Theme, mode: ThemeMode) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = Some(i) == self.state.selected();
                let style = if is_selected {
                    Styles::selected(theme)
                } else {
                    Styles::text(theme)
                };

                let marker = match entry {
                    SettingsEntry::DarkMode => {
                        format!(" [{}]", if mode == ThemeMode::Dark { "on" } else { "off" })
                    }
                    SettingsEntry::Notifications => {
                        format!(
                            " [{}]",
                            if self.notifications_enabled {
                                "on"
                            } else {
                                "off"
                            }
                        )
                    }
                    _ => String::new(),
                };

                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("{}{}", entry.label(), marker),
                        style.add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", entry.description()),
                        if is_selected { style } else { Styles::muted(theme) },
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("App Settings")
                .borders(Borders::ALL)
                .border_style(Styles::active_border(theme)),
        );
        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}
