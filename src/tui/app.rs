//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use super::screens::*;
use super::ui::{centered_rect, Styles};
use crate::auth::Session;
use crate::config::Config;
use crate::models::User;
use crate::store::Store;
use crate::theme::{Theme, ThemeMode};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Inventory,
    Orders,
    Settings,
    Help,
}

impl Screen {
    fn title(&self) -> &str {
        match self {
            Screen::Login => "Sign In",
            Screen::Dashboard => "Dashboard",
            Screen::Inventory => "Inventory",
            Screen::Orders => "Orders",
            Screen::Settings => "Settings",
            Screen::Help => "Help",
        }
    }
}

/// What a screen asks the app to do after handling a key
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// No action taken
    None,
    /// Navigate to a different screen
    NavigateTo(Screen),
    /// Go back to the previous screen
    NavigateBack,
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// Login succeeded with this user
    LoggedIn(User),
    /// Sign out and return to the login screen
    Logout,
    /// Flip between the light and dark palette
    ToggleTheme,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    pub config: Config,
    pub store: Store,
    pub session: Session,
    pub theme_mode: ThemeMode,

    // Screen states
    pub login: LoginScreen,
    pub dashboard: DashboardScreen,
    pub inventory: InventoryScreen,
    pub orders: OrdersScreen,
    pub settings: SettingsScreen,
    pub help: HelpScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let store = Store::with_mock_data();
        let dashboard = DashboardScreen::new(&store);
        let inventory = InventoryScreen::new(&store);
        let orders = OrdersScreen::new(&store);

        Ok(Self {
            current_screen: Screen::Login,
            previous_screen: None,
            theme_mode: config.theme,
            login: LoginScreen::new(config.mock_latency()),
            dashboard,
            inventory,
            orders,
            settings: SettingsScreen::new(),
            help: HelpScreen::new(),
            config,
            store,
            session: Session::new(),
            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme_mode)
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    // Windows terminals report both press and release
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key).await?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Whether the active screen currently owns character input
    fn is_editing(&self) -> bool {
        match self.current_screen {
            Screen::Login => true,
            Screen::Inventory => self.inventory.is_editing(),
            Screen::Orders => self.orders.is_editing(),
            _ => false,
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts that never collide with text entry
        if key.code == KeyCode::F(1) {
            self.show_help_popup = !self.show_help_popup;
            return Ok(());
        }
        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return Ok(());
        }

        if !self.is_editing() {
            match key.code {
                KeyCode::Char('?') => {
                    self.show_help_popup = true;
                    return Ok(());
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char(c @ '1'..='4') if self.session.is_authenticated() => {
                    let screen = match c {
                        '1' => Screen::Dashboard,
                        '2' => Screen::Inventory,
                        '3' => Screen::Orders,
                        _ => Screen::Settings,
                    };
                    self.navigate_to_screen(screen);
                    return Ok(());
                }
                _ => {}
            }
        }

        // Screen-specific event handling
        let action = match self.current_screen {
            Screen::Login => self.login.handle_key(key).await?,
            Screen::Dashboard => self.dashboard.handle_key(key, &self.store)?,
            Screen::Inventory => self.inventory.handle_key(key, &self.store)?,
            Screen::Orders => self.orders.handle_key(key, &self.store)?,
            Screen::Settings => self.settings.handle_key(key)?,
            Screen::Help => self.help.handle_key(key)?,
        };
        self.apply_action(action);

        Ok(())
    }

    fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::NavigateTo(screen) => self.navigate_to_screen(screen),
            ScreenAction::NavigateBack => self.navigate_back(),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(msg) => self.set_status(msg),
            ScreenAction::SetError(msg) => self.set_error(msg),
            ScreenAction::LoggedIn(user) => {
                let name = user.name.clone();
                self.session.sign_in(user);
                self.navigate_to_screen(Screen::Dashboard);
                self.set_status(format!("Welcome back, {}", name));
            }
            ScreenAction::Logout => {
                self.session.sign_out();
                self.login.reset();
                self.previous_screen = None;
                self.current_screen = Screen::Login;
                self.clear_messages();
            }
            ScreenAction::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.set_status(format!("Theme: {}", self.theme_mode.as_str()));
            }
        }
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        if screen == self.current_screen {
            return;
        }
        info!(from = self.current_screen.title(), to = screen.title(), "navigate");
        if screen == Screen::Dashboard {
            self.dashboard.refresh(&self.store);
        }
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        self.clear_messages();
    }

    fn navigate_back(&mut self) {
        let target = self.previous_screen.unwrap_or(Screen::Dashboard);
        // Never "back" into the login screen while signed in
        let target = if target == Screen::Login && self.session.is_authenticated() {
            Screen::Dashboard
        } else {
            target
        };
        self.navigate_to_screen(target);
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let theme = self.theme();
        let size = f.size();

        // Main layout: tab bar on top, content, status bar at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_tab_bar(f, chunks[0], &theme);

        match self.current_screen {
            Screen::Login => self.login.draw(f, chunks[1], &theme),
            Screen::Dashboard => self.dashboard.draw(f, chunks[1], &theme),
            Screen::Inventory => self.inventory.draw(f, chunks[1], &theme),
            Screen::Orders => self.orders.draw(f, chunks[1], &theme),
            Screen::Settings => {
                self.settings
                    .draw(f, chunks[1], &theme, self.theme_mode, &self.session)
            }
            Screen::Help => self.help.draw(f, chunks[1], &theme),
        }

        self.draw_status_bar(f, chunks[2], &theme);

        if self.show_help_popup {
            self.draw_help_popup(f, size, &theme);
        }
    }

    fn draw_tab_bar(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.session.is_authenticated() {
            let line = Line::from(Span::styled("stockpit", Styles::title(theme)));
            f.render_widget(Paragraph::new(line), area);
            return;
        }

        let tabs = [
            (Screen::Dashboard, "1 Dashboard"),
            (Screen::Inventory, "2 Inventory"),
            (Screen::Orders, "3 Orders"),
            (Screen::Settings, "4 Settings"),
        ];
        let mut spans = vec![Span::styled("stockpit ", Styles::title(theme))];
        for (screen, label) in tabs {
            spans.push(Span::raw(" "));
            spans.push(if screen == self.current_screen {
                Span::styled(format!("[{}]", label), Styles::selected(theme))
            } else {
                Span::styled(format!(" {} ", label), Styles::muted(theme))
            });
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "{} | Esc: Back | q: Quit | F1/?: Help",
                self.current_screen.title()
            )
        };

        let style = if self.error_message.is_some() {
            Styles::error(theme)
        } else if self.status_message.is_some() {
            Styles::success(theme)
        } else {
            Styles::muted(theme)
        };

        let status_bar = Paragraph::new(status_text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(70, 60, area);
        f.render_widget(Clear, popup_area);

        let help_content = self.context_help();
        let help_popup = Paragraph::new(help_content)
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border(theme)),
            )
            .style(Styles::text(theme));
        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Esc - Go back\n\
            q - Quit application\n\
            F1 / ? - Toggle this help\n\
            1-4 - Jump to a screen\n\n";

        let screen_help = match self.current_screen {
            Screen::Login => {
                "Sign In:\n\
                Tab - Switch field\n\
                Enter - Sign in\n\
                Esc - Quit\n\
                Any non-empty credentials work in the demo"
            }
            Screen::Dashboard => {
                "Dashboard:\n\
                r - Refresh figures"
            }
            Screen::Inventory => {
                "Inventory:\n\
                / - Search by name or code\n\
                c - Clear search\n\
                Left/Right - Move column cursor\n\
                s / Space - Sort by cursor column\n\
                Up/Down - Select material\n\
                Enter - Material details"
            }
            Screen::Orders => {
                "Orders:\n\
                / - Search customer, code, or id\n\
                f - Cycle status filter\n\
                Left/Right - Move column cursor\n\
                s / Space - Sort by cursor column\n\
                Enter - Order details"
            }
            Screen::Settings => {
                "Settings:\n\
                Up/Down - Navigate entries\n\
                Enter / Space - Activate or toggle"
            }
            Screen::Help => {
                "Help Screen:\n\
                Up/Down - Switch section\n\
                PageUp/PageDown - Scroll content"
            }
        };

        format!("{}{}", global_help, screen_help)
    }
}
