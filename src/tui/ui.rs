//! Common UI styles and widgets shared across screens

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Common UI styles, resolved against the active theme
pub struct Styles;

impl Styles {
    pub fn text(theme: &Theme) -> Style {
        Style::default().fg(theme.text)
    }

    pub fn muted(theme: &Theme) -> Style {
        Style::default().fg(theme.text_secondary)
    }

    pub fn title(theme: &Theme) -> Style {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(theme: &Theme) -> Style {
        Style::default()
            .bg(theme.primary)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(theme: &Theme) -> Style {
        Style::default().fg(theme.error)
    }

    pub fn warning(theme: &Theme) -> Style {
        Style::default().fg(theme.warning)
    }

    pub fn success(theme: &Theme) -> Style {
        Style::default().fg(theme.success)
    }

    pub fn info(theme: &Theme) -> Style {
        Style::default().fg(theme.secondary)
    }

    pub fn active_border(theme: &Theme) -> Style {
        Style::default().fg(theme.primary)
    }

    pub fn inactive_border(theme: &Theme) -> Style {
        Style::default().fg(theme.border)
    }
}

/// Single-line text input with cursor editing and optional masking
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor: usize,
    /// Render the value as bullets (password entry)
    pub masked: bool,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            cursor: 0,
            masked: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Render the input field as a bordered one-line box
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let shown;
        let style;
        if self.value.is_empty() && !self.placeholder.is_empty() {
            shown = self.placeholder.clone();
            style = Styles::muted(theme);
        } else if self.masked {
            shown = "\u{2022}".repeat(self.value.chars().count());
            style = Styles::text(theme);
        } else {
            shown = self.value.clone();
            style = Styles::text(theme);
        }

        let border_style = if self.is_focused {
            Styles::active_border(theme)
        } else {
            Styles::inactive_border(theme)
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        f.render_widget(Paragraph::new(shown).style(style).block(block), area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_field_editing() {
        let mut field = InputField::new("Email");
        for c in "demo".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "demo");
        assert_eq!(field.cursor, 4);

        field.move_cursor_left();
        field.delete_char();
        assert_eq!(field.value, "dmo");

        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "mo");

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_input_field_multibyte_cursor() {
        let mut field = InputField::new("Name");
        field.insert_char('å');
        field.insert_char('b');
        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value, "åxb");
    }
}
