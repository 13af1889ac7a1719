//! Help screen with sectioned key-binding reference

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::tui::app::ScreenAction;
use crate::tui::ui::Styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelpSection {
    Overview,
    Navigation,
    Dashboard,
    Inventory,
    Orders,
    Settings,
    Shortcuts,
}

impl HelpSection {
    fn as_str(&self) -> &str {
        match self {
            HelpSection::Overview => "Overview",
            HelpSection::Navigation => "Navigation",
            HelpSection::Dashboard => "Dashboard",
            HelpSection::Inventory => "Inventory",
            HelpSection::Orders => "Orders",
            HelpSection::Settings => "Settings",
            HelpSection::Shortcuts => "Keyboard Shortcuts",
        }
    }
}

pub struct HelpScreen {
    sections: Vec<HelpSection>,
    current_section: usize,
    section_state: ListState,
    scroll_offset: u16,
}

impl HelpScreen {
    pub fn new() -> Self {
        let sections = vec![
            HelpSection::Overview,
            HelpSection::Navigation,
            HelpSection::Dashboard,
            HelpSection::Inventory,
            HelpSection::Orders,
            HelpSection::Settings,
            HelpSection::Shortcuts,
        ];
        let mut section_state = ListState::default();
        section_state.select(Some(0));
        Self {
            sections,
            current_section: 0,
            section_state,
            scroll_offset: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Up => {
                if self.current_section > 0 {
                    self.current_section -= 1;
                    self.section_state.select(Some(self.current_section));
                    self.scroll_offset = 0;
                }
            }
            KeyCode::Down => {
                if self.current_section < self.sections.len() - 1 {
                    self.current_section += 1;
                    self.section_state.select(Some(self.current_section));
                    self.scroll_offset = 0;
                }
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.scroll_offset += 10;
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
            }
            KeyCode::Esc => return Ok(ScreenAction::NavigateBack),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn section_content(&self) -> Vec<&'static str> {
        match self.sections[self.current_section] {
            HelpSection::Overview => vec![
                "stockpit tracks materials, orders, and stock alerts over a",
                "built-in demo dataset. Nothing leaves the terminal: there is",
                "no server or database behind this build.",
                "",
                "Sign in with any non-empty email and password.",
            ],
            HelpSection::Navigation => vec![
                "1 - Dashboard",
                "2 - Inventory",
                "3 - Orders",
                "4 - Settings",
                "",
                "Esc goes back to the previous screen.",
                "q quits from anywhere (outside a text field).",
            ],
            HelpSection::Dashboard => vec![
                "Shows low-stock alerts, inventory and order summaries, and",
                "the most recent stock movements.",
                "",
                "r - refresh the derived figures",
            ],
            HelpSection::Inventory => vec![
                "/ - focus the search box (filters by name or code)",
                "c - clear the search",
                "Left/Right - move the column cursor",
                "s or Space - sort by the cursor column; again to reverse",
                "Up/Down - select a material",
                "Enter - open the material details popup",
            ],
            HelpSection::Orders => vec![
                "/ - focus the search box (customer, code, or order id)",
                "f - cycle the status filter (all/pending/processing/completed)",
                "Left/Right - move the column cursor",
                "s or Space - sort by the cursor column; again to reverse",
                "Enter - open the order details popup",
            ],
            HelpSection::Settings => vec![
                "Up/Down - navigate entries",
                "Enter or Space - activate or toggle the entry",
                "",
                "Dark Mode switches the palette immediately.",
                "Log Out returns to the login screen.",
            ],
            HelpSection::Shortcuts => vec![
                "Global:",
                "  F1 or ? - toggle the help popup",
                "  q - quit (outside text fields)",
                "  Esc - back / close popup",
                "",
                "Tables:",
                "  Home/End - first/last row",
                "  Left/Right + s - choose and toggle the sort column",
            ],
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = self
            .sections
            .iter()
            .map(|s| ListItem::new(s.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border(theme)),
            )
            .highlight_style(Styles::selected(theme));
        f.render_stateful_widget(list, chunks[0], &mut self.section_state);

        let lines: Vec<Line> = self
            .section_content()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Styles::text(theme))))
            .collect();
        let content = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(self.sections[self.current_section].as_str())
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border(theme)),
            )
            .scroll((self.scroll_offset, 0));
        f.render_widget(content, chunks[1]);
    }
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}
