//! Dashboard screen: stock alerts, summary cards, recent activity

use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{InventorySummary, OrderSummary, StockAlert, Transaction, TransactionKind};
use crate::store::Store;
use crate::theme::Theme;
use crate::tui::app::ScreenAction;
use crate::tui::ui::Styles;

pub struct DashboardScreen {
    pub alerts: Vec<StockAlert>,
    pub inventory: InventorySummary,
    pub orders: OrderSummary,
    pub recent: Vec<Transaction>,
}

impl DashboardScreen {
    pub fn new(store: &Store) -> Self {
        let mut screen = Self {
            alerts: Vec::new(),
            inventory: InventorySummary {
                total_items: 0,
                items_in_stock: 0,
                low_stock_items: 0,
                out_of_stock_items: 0,
                total_value: 0.0,
            },
            orders: OrderSummary {
                pending: 0,
                processing: 0,
                completed: 0,
                total: 0,
                late_orders: 0,
            },
            recent: Vec::new(),
        };
        screen.refresh(store);
        screen
    }

    /// Re-derive every figure from the store
    pub fn refresh(&mut self, store: &Store) {
        let today = Local::now().date_naive();
        self.alerts = store.stock_alerts();
        self.inventory = store.inventory_summary();
        self.orders = store.order_summary(today);
        self.recent = store.recent_transactions(5);
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &Store) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Char('r') => {
                self.refresh(store);
                Ok(ScreenAction::SetStatus("Dashboard refreshed".to_string()))
            }
            _ => Ok(ScreenAction::None),
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let alert_height = (self.alerts.len().max(1) + 2) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(alert_height),
                Constraint::Length(9),
                Constraint::Min(0),
            ])
            .split(area);

        self.draw_alerts(f, chunks[0], theme);
        self.draw_overview(f, chunks[1], theme);
        self.draw_activity(f, chunks[2], theme);
    }

    fn draw_alerts(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = if self.alerts.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "All inventory levels are within acceptable thresholds",
                Styles::success(theme),
            )))]
        } else {
            self.alerts
                .iter()
                .map(|alert| {
                    ListItem::new(Line::from(vec![
                        Span::styled("⚠ Low Stock: ", Styles::warning(theme)),
                        Span::styled(alert.material_name.clone(), Styles::text(theme)),
                        Span::styled(
                            format!(
                                " — {} units ({}% of threshold)",
                                alert.current_stock, alert.percent_remaining
                            ),
                            Styles::muted(theme),
                        ),
                    ]))
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .title("Alerts")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(list, area);
    }

    fn draw_overview(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_inventory_card(f, halves[0], theme);
        self.draw_orders_card(f, halves[1], theme);
    }

    fn stat_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Styles::muted(theme)),
            Span::styled(value, Styles::text(theme)),
        ])
    }

    fn draw_inventory_card(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let s = &self.inventory;
        let low_style = if s.low_stock_items > 0 {
            Styles::warning(theme)
        } else {
            Styles::text(theme)
        };
        let out_style = if s.out_of_stock_items > 0 {
            Styles::error(theme)
        } else {
            Styles::text(theme)
        };

        let lines = vec![
            Self::stat_line("Total Items:", s.total_items.to_string(), theme),
            Self::stat_line("Items in Stock:", s.items_in_stock.to_string(), theme),
            Line::from(vec![
                Span::styled(format!("{:<18}", "Low Stock Items:"), Styles::muted(theme)),
                Span::styled(s.low_stock_items.to_string(), low_style),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<18}", "Out of Stock:"), Styles::muted(theme)),
                Span::styled(s.out_of_stock_items.to_string(), out_style),
            ]),
            Self::stat_line("Total Value:", format!("${:.2}", s.total_value), theme),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .title("Inventory Summary")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(card, area);
    }

    fn draw_orders_card(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let s = &self.orders;
        let late_style = if s.late_orders > 0 {
            Styles::error(theme)
        } else {
            Styles::text(theme)
        };

        let lines = vec![
            Self::stat_line("Pending Orders:", s.pending.to_string(), theme),
            Self::stat_line("Processing:", s.processing.to_string(), theme),
            Self::stat_line("Completed:", s.completed.to_string(), theme),
            Line::from(vec![
                Span::styled(format!("{:<18}", "Late Orders:"), Styles::muted(theme)),
                Span::styled(s.late_orders.to_string(), late_style),
            ]),
            Self::stat_line("Total Orders:", s.total.to_string(), theme),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .title("Orders Summary")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(card, area);
    }

    fn draw_activity(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .recent
            .iter()
            .map(|tx| {
                let (tag, tag_style) = match tx.kind {
                    TransactionKind::Inbound => ("[IN] ", Styles::success(theme)),
                    TransactionKind::Outbound => ("[OUT]", Styles::info(theme)),
                };
                let note = tx
                    .notes
                    .as_deref()
                    .map(|n| format!(" — {}", n))
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::styled(tag.to_string(), tag_style),
                    Span::styled(
                        format!(" {} × {}", tx.quantity, tx.material_name),
                        Styles::text(theme),
                    ),
                    Span::styled(note, Styles::muted(theme)),
                    Span::styled(
                        format!("  {}", tx.timestamp.format("%Y-%m-%d %H:%M")),
                        Styles::muted(theme),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Recent Activity")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border(theme)),
        );
        f.render_widget(list, area);
    }
}
