//! Inventory screen: searchable, sortable materials table

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::Material;
use crate::store::Store;
use crate::theme::{Theme, Tone};
use crate::tui::app::ScreenAction;
use crate::tui::components::{CellSpan, CellValue, Column, DataTable, TableConfig};
use crate::tui::ui::{centered_rect, InputField, Styles};

pub struct InventoryScreen {
    pub search_input: InputField,
    search_focused: bool,
    table: DataTable<Material>,
    detail: Option<Material>,
}

impl InventoryScreen {
    pub fn new(store: &Store) -> Self {
        let columns = vec![
            Column::new("code", "Code", 10, |m: &Material| CellValue::text(&m.code)).sortable(),
            Column::new("name", "Material", 26, |m: &Material| {
                CellValue::text(&m.name)
            })
            .sortable(),
            Column::new("stock", "Stock", 18, |m: &Material| {
                CellValue::number(m.stock)
            })
            .sortable()
            .with_renderer(|m| {
                let tone = if m.is_low_stock() {
                    Tone::Warning
                } else {
                    Tone::Success
                };
                let mut spans = vec![CellSpan::new(
                    format!("{} {}", m.stock, m.unit_of_measure),
                    tone,
                )];
                if m.is_low_stock() {
                    spans.push(CellSpan::new("  LOW", Tone::Warning));
                }
                spans
            }),
            Column::new("location", "Location", 22, |m: &Material| {
                CellValue::opt_text(m.location.as_deref())
            })
            .sortable(),
            Column::new("supplier", "Supplier", 24, |m: &Material| {
                CellValue::opt_text(m.supplier.as_deref())
            })
            .sortable(),
        ];

        let table = DataTable::new(
            columns,
            |m: &Material| m.id.clone(),
            TableConfig::new("Materials")
                .with_empty_text("No materials found. Try adjusting your search."),
        )
        .with_rows(store.search_materials(""));

        Self {
            search_input: InputField::new("Search").with_placeholder("Search by name or code..."),
            search_focused: false,
            table,
            detail: None,
        }
    }

    /// Whether this screen currently owns raw key input (search box or
    /// detail popup), so global shortcuts must stay out of the way
    pub fn is_editing(&self) -> bool {
        self.search_focused || self.detail.is_some()
    }

    fn refilter(&mut self, store: &Store) {
        self.table.set_rows(store.search_materials(&self.search_input.value));
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &Store) -> Result<ScreenAction> {
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.detail = None;
            }
            return Ok(ScreenAction::None);
        }

        if self.search_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                    self.search_focused = false;
                    self.search_input.set_focus(false);
                }
                KeyCode::Char(c) => {
                    self.search_input.insert_char(c);
                    self.refilter(store);
                }
                KeyCode::Backspace => {
                    self.search_input.delete_char();
                    self.refilter(store);
                }
                KeyCode::Delete => {
                    self.search_input.delete_char_forward();
                    self.refilter(store);
                }
                KeyCode::Left => self.search_input.move_cursor_left(),
                KeyCode::Right => self.search_input.move_cursor_right(),
                _ => {}
            }
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_focused = true;
                self.search_input.set_focus(true);
            }
            KeyCode::Char('c') => {
                self.search_input.clear();
                self.refilter(store);
                return Ok(ScreenAction::SetStatus("Search cleared".to_string()));
            }
            KeyCode::Up => self.table.select_previous(),
            KeyCode::Down => self.table.select_next(),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(),
            KeyCode::Left => self.table.previous_column(),
            KeyCode::Right => self.table.next_column(),
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                self.table.toggle_active_sort();
            }
            KeyCode::Enter => {
                self.detail = self.table.selected().cloned();
            }
            KeyCode::Esc => return Ok(ScreenAction::NavigateBack),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.search_input.render(f, chunks[0], theme);
        self.table.render(f, chunks[1], theme);

        let hints = Paragraph::new(Line::from(Span::styled(
            "/: search | ←/→: column | s: sort | Enter: details | Esc: back",
            Styles::muted(theme),
        )));
        f.render_widget(hints, chunks[2]);

        if let Some(material) = self.detail.clone() {
            self.draw_detail(f, area, &material, theme);
        }
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, material: &Material, theme: &Theme) {
        let popup = centered_rect(60, 60, area);
        f.render_widget(Clear, popup);

        let row = |label: &str, value: String| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Styles::muted(theme)),
                Span::styled(value, Styles::text(theme)),
            ])
        };

        let mut lines = vec![
            row("Code:", material.code.clone()),
            row(
                "Stock:",
                format!("{} {}", material.stock, material.unit_of_measure),
            ),
            row("Threshold:", material.threshold.to_string()),
            row("Unit Price:", format!("${:.2}", material.unit_price)),
            row("Lead Time:", format!("{} days", material.lead_time_days)),
            row(
                "Avg. Usage:",
                format!("{} / week", material.average_usage),
            ),
            row(
                "Location:",
                material.location.clone().unwrap_or_else(|| "—".to_string()),
            ),
            row(
                "Supplier:",
                material.supplier.clone().unwrap_or_else(|| "—".to_string()),
            ),
        ];
        if material.is_low_stock() {
            lines.push(Line::from(Span::styled(
                "Stock is at or below the reorder threshold",
                Styles::warning(theme),
            )));
        }

        let popup_widget = Paragraph::new(lines).block(
            Block::default()
                .title(material.name.clone())
                .borders(Borders::ALL)
                .border_style(Styles::active_border(theme)),
        );
        f.render_widget(popup_widget, popup);
    }
}
