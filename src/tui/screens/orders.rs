//! Orders screen: searchable, sortable order book with a status filter

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Order, OrderStatus, Priority};
use crate::store::Store;
use crate::theme::{Theme, Tone};
use crate::tui::app::ScreenAction;
use crate::tui::components::{CellSpan, CellValue, Column, DataTable, TableConfig};
use crate::tui::ui::{centered_rect, InputField, Styles};

fn status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Completed => Tone::Success,
        OrderStatus::Processing => Tone::Primary,
        OrderStatus::Cancelled => Tone::Error,
        OrderStatus::Pending => Tone::Warning,
    }
}

fn priority_tone(priority: Priority) -> Tone {
    match priority {
        Priority::High => Tone::Error,
        Priority::Medium => Tone::Warning,
        Priority::Low => Tone::Muted,
    }
}

pub struct OrdersScreen {
    pub search_input: InputField,
    search_focused: bool,
    status_filter: Option<OrderStatus>,
    table: DataTable<Order>,
    detail: Option<Order>,
}

impl OrdersScreen {
    pub fn new(store: &Store) -> Self {
        let columns = vec![
            Column::new("id", "Order ID", 8, |o: &Order| CellValue::text(&o.id)).sortable(),
            Column::new("customer", "Customer", 24, |o: &Order| {
                CellValue::text(&o.customer_name)
            })
            .sortable(),
            Column::new("status", "Status", 12, |o: &Order| {
                CellValue::text(o.status.as_str())
            })
            .sortable()
            .with_renderer(|o| vec![CellSpan::new(o.status.as_str(), status_tone(o.status))]),
            Column::new("priority", "Priority", 10, |o: &Order| {
                CellValue::text(o.priority.as_str())
            })
            .sortable()
            .with_renderer(|o| {
                vec![CellSpan::new(
                    o.priority.as_str(),
                    priority_tone(o.priority),
                )]
            }),
            Column::new("due_date", "Due Date", 12, |o: &Order| {
                CellValue::text(o.due_date.to_string())
            })
            .sortable(),
            Column::new("created", "Created", 12, |o: &Order| {
                CellValue::text(o.created_at.to_string())
            })
            .sortable(),
        ];

        let table = DataTable::new(
            columns,
            |o: &Order| o.id.clone(),
            TableConfig::new("Orders")
                .with_empty_text("No orders found. Try adjusting your search."),
        )
        .with_rows(store.search_orders("", None));

        Self {
            search_input: InputField::new("Search")
                .with_placeholder("Search by customer or order ID..."),
            search_focused: false,
            status_filter: None,
            table,
            detail: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.search_focused || self.detail.is_some()
    }

    fn refilter(&mut self, store: &Store) {
        self.table
            .set_rows(store.search_orders(&self.search_input.value, self.status_filter));
    }

    /// All -> Pending -> Processing -> Completed -> All
    fn cycle_status_filter(&mut self, store: &Store) -> String {
        self.status_filter = match self.status_filter {
            None => Some(OrderStatus::Pending),
            Some(OrderStatus::Pending) => Some(OrderStatus::Processing),
            Some(OrderStatus::Processing) => Some(OrderStatus::Completed),
            Some(OrderStatus::Completed) | Some(OrderStatus::Cancelled) => None,
        };
        self.refilter(store);
        match self.status_filter {
            Some(status) => format!("Filter: {} orders", status.as_str()),
            None => "Filter: all orders".to_string(),
        }
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
            KeyCode::Char('f') => {
                let status = self.cycle_status_filter(store);
                return Ok(ScreenAction::SetStatus(status));
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
                Constraint::Length(1), // Filter chips
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.search_input.render(f, chunks[0], theme);
        self.draw_filter_chips(f, chunks[1], theme);
        self.table.render(f, chunks[2], theme);

        let hints = Paragraph::new(Line::from(Span::styled(
            "/: search | f: status filter | ←/→: column | s: sort | Enter: details | Esc: back",
            Styles::muted(theme),
        )));
        f.render_widget(hints, chunks[3]);

        if let Some(order) = self.detail.clone() {
            self.draw_detail(f, area, &order, theme);
        }
    }

    fn draw_filter_chips(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chip = |label: &str, active: bool| -> Span<'static> {
            if active {
                Span::styled(format!("[{}]", label), Styles::title(theme))
            } else {
                Span::styled(format!(" {} ", label), Styles::muted(theme))
            }
        };

        let line = Line::from(vec![
            chip("All Orders", self.status_filter.is_none()),
            Span::raw(" "),
            chip(
                "Pending",
                self.status_filter == Some(OrderStatus::Pending),
            ),
            Span::raw(" "),
            chip(
                "Processing",
                self.status_filter == Some(OrderStatus::Processing),
            ),
            Span::raw(" "),
            chip(
                "Completed",
                self.status_filter == Some(OrderStatus::Completed),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, order: &Order, theme: &Theme) {
        let popup = centered_rect(64, 64, area);
        f.render_widget(Clear, popup);

        let row = |label: &str, value: String, tone: Tone| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), Styles::muted(theme)),
                Span::styled(value, ratatui::style::Style::default().fg(theme.color(tone))),
            ])
        };

        let mut lines = vec![
            row(
                "Customer:",
                format!("{} ({})", order.customer_name, order.customer_code),
                Tone::Default,
            ),
            row(
                "Status:",
                order.status.as_str().to_string(),
                status_tone(order.status),
            ),
            row(
                "Priority:",
                order.priority.as_str().to_string(),
                priority_tone(order.priority),
            ),
            row("Due Date:", order.due_date.to_string(), Tone::Default),
            row("Created:", order.created_at.to_string(), Tone::Default),
            row("Updated:", order.updated_at.to_string(), Tone::Default),
            Line::from(Span::styled("Items:", Styles::muted(theme))),
        ];
        for item in &order.items {
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} × {} ({})",
                    item.quantity, item.product_name, item.product_code
                ),
                Styles::text(theme),
            )));
        }

        let popup_widget = Paragraph::new(lines).block(
            Block::default()
                .title(format!("Order #{}", order.id))
                .borders(Borders::ALL)
                .border_style(Styles::active_border(theme)),
        );
        f.render_widget(popup_widget, popup);
    }
}
