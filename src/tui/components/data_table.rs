//! Generic sortable data table
//!
//! Renders a header band plus one row per record. Each column carries its
//! own typed accessor, so the table never reaches into records by field
//! name. Sorting is a derived index permutation over the caller's rows:
//! the input order is never mutated, and the displayed order is rebuilt
//! from scratch whenever the rows or the sort selection change.

use std::cmp::Ordering;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::{Theme, Tone};
use crate::tui::ui::Styles;

/// Value a column accessor extracts from a record, used for sorting and
/// default cell rendering
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        CellValue::Number(value.into())
    }

    /// `None` becomes [`CellValue::Missing`]
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Missing,
        }
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format!("{}", n),
            CellValue::Missing => String::new(),
        }
    }

    /// Ordering between two present values. Text pairs compare
    /// case-insensitively with a case-sensitive tie-break; numbers use
    /// natural order; numbers sort before text in a mixed column.
    fn compare_present(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Missing, _) | (_, CellValue::Missing) => Ordering::Equal,
        }
    }
}

/// Compare two cell values under a sort direction. Missing values sort
/// after present ones in either direction; the direction flip applies
/// only between two present values.
fn compare_values(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
        (CellValue::Missing, _) => Ordering::Greater,
        (_, CellValue::Missing) => Ordering::Less,
        _ => {
            let ord = a.compare_present(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort selection, owned by the table instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    SortedBy {
        key: &'static str,
        direction: SortDirection,
    },
}

/// One styled fragment of a custom-rendered cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpan {
    pub text: String,
    pub tone: Tone,
}

impl CellSpan {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Default)
    }
}

/// Column descriptor: label, layout hint, sortability, and the typed
/// accessor that reads this column's value out of a record
pub struct Column<T> {
    pub key: &'static str,
    pub title: String,
    pub width: u16,
    pub sortable: bool,
    accessor: Box<dyn Fn(&T) -> CellValue>,
    renderer: Option<Box<dyn Fn(&T) -> Vec<CellSpan>>>,
}

impl<T> Column<T> {
    pub fn new(
        key: &'static str,
        title: &str,
        width: u16,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            key,
            title: title.to_string(),
            width,
            sortable: false,
            accessor: Box::new(accessor),
            renderer: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Custom cell renderer; its output is used verbatim instead of the
    /// accessor's display string
    pub fn with_renderer(mut self, renderer: impl Fn(&T) -> Vec<CellSpan> + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }
}

/// Display configuration for a [`DataTable`]
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub title: String,
    pub show_borders: bool,
    pub empty_text: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: "Table".to_string(),
            show_borders: true,
            empty_text: None,
        }
    }
}

impl TableConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Shown instead of header and rows when the table is empty
    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = Some(text.to_string());
        self
    }
}

pub struct DataTable<T> {
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    key_extractor: Box<dyn Fn(&T) -> String>,
    config: TableConfig,
    sort: SortState,
    /// Permutation of row indices in display order
    view: Vec<usize>,
    /// Selected position within `view`
    selection: Option<usize>,
    /// Header cursor for keyboard sort activation
    active_column: usize,
    scroll_offset: usize,
}

impl<T> DataTable<T> {
    pub fn new(
        columns: Vec<Column<T>>,
        key_extractor: impl Fn(&T) -> String + 'static,
        config: TableConfig,
    ) -> Self {
        let mut table = Self {
            rows: Vec::new(),
            columns,
            key_extractor: Box::new(key_extractor),
            config,
            sort: SortState::Unsorted,
            view: Vec::new(),
            selection: None,
            active_column: 0,
            scroll_offset: 0,
        };
        table.rebuild_view();
        table
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replace the rows. Selection sticks to the same record key when it
    /// is still present, otherwise falls back to the first row.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        let selected_key = self.selected_key();
        self.rows = rows;
        self.rebuild_view_with(selected_key);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Records in display order
    pub fn visible(&self) -> Vec<&T> {
        self.view.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Keys of the records in display order
    pub fn visible_keys(&self) -> Vec<String> {
        self.view
            .iter()
            .map(|&i| (self.key_extractor)(&self.rows[i]))
            .collect()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selection
            .and_then(|pos| self.view.get(pos))
            .and_then(|&i| self.rows.get(i))
    }

    fn selected_key(&self) -> Option<String> {
        self.selected().map(|row| (self.key_extractor)(row))
    }

    pub fn select_next(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selection = Some(match self.selection {
            Some(pos) => (pos + 1) % self.view.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selection = Some(match self.selection {
            Some(0) | None => self.view.len() - 1,
            Some(pos) => pos - 1,
        });
    }

    pub fn select_first(&mut self) {
        if !self.view.is_empty() {
            self.selection = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.view.is_empty() {
            self.selection = Some(self.view.len() - 1);
        }
    }

    /// Move the header cursor one column to the right
    pub fn next_column(&mut self) {
        if !self.columns.is_empty() {
            self.active_column = (self.active_column + 1) % self.columns.len();
        }
    }

    /// Move the header cursor one column to the left
    pub fn previous_column(&mut self) {
        if !self.columns.is_empty() {
            self.active_column = if self.active_column == 0 {
                self.columns.len() - 1
            } else {
                self.active_column - 1
            };
        }
    }

    /// Activate the header cursor's column, like clicking its header
    pub fn toggle_active_sort(&mut self) {
        if let Some(col) = self.columns.get(self.active_column) {
            let key = col.key;
            self.toggle_sort(key);
        }
    }

    /// Activating a column toggles direction when it is already the sort
    /// column, otherwise sorts it ascending. Unknown or non-sortable
    /// columns are a no-op.
    pub fn toggle_sort(&mut self, key: &str) {
        let Some(col) = self.columns.iter().find(|c| c.key == key) else {
            return;
        };
        if !col.sortable {
            return;
        }
        let key = col.key;
        self.sort = match self.sort {
            SortState::SortedBy {
                key: active,
                direction,
            } if active == key => SortState::SortedBy {
                key,
                direction: direction.flipped(),
            },
            _ => SortState::SortedBy {
                key,
                direction: SortDirection::Ascending,
            },
        };
        self.rebuild_view();
    }

    /// Rebuild the display permutation from the rows and sort state,
    /// then re-locate the previously selected record by key
    fn rebuild_view(&mut self) {
        let selected_key = self.selected_key();
        self.rebuild_view_with(selected_key);
    }

    fn rebuild_view_with(&mut self, selected_key: Option<String>) {
        let rows = &self.rows;
        let mut view: Vec<usize> = (0..rows.len()).collect();
        if let SortState::SortedBy { key, direction } = self.sort {
            if let Some(col) = self.columns.iter().find(|c| c.key == key) {
                // sort_by is stable: equal keys keep input order
                view.sort_by(|&a, &b| {
                    compare_values(&(col.accessor)(&rows[a]), &(col.accessor)(&rows[b]), direction)
                });
            }
        }
        self.view = view;

        self.selection = selected_key
            .and_then(|key| {
                self.view
                    .iter()
                    .position(|&i| (self.key_extractor)(&self.rows[i]) == key)
            })
            .or(if self.rows.is_empty() { None } else { Some(0) });
        self.scroll_offset = 0;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = if self.config.show_borders {
            Block::default()
                .title(self.config.title.clone())
                .borders(Borders::ALL)
                .border_style(Styles::active_border(theme))
        } else {
            Block::default()
        };

        if self.rows.is_empty() {
            if let Some(ref empty_text) = self.config.empty_text {
                let paragraph = Paragraph::new(empty_text.clone())
                    .style(Styles::muted(theme))
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(paragraph, area);
                return;
            }
        }

        let mut items = vec![ListItem::new(self.header_line(theme))];

        let chrome = if self.config.show_borders { 2 } else { 0 };
        let visible_rows = (area.height as usize).saturating_sub(chrome + 1).max(1);
        if let Some(pos) = self.selection {
            if pos < self.scroll_offset {
                self.scroll_offset = pos;
            } else if pos >= self.scroll_offset + visible_rows {
                self.scroll_offset = pos + 1 - visible_rows;
            }
        }

        for (pos, &idx) in self
            .view
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_rows)
        {
            let row = &self.rows[idx];
            let is_selected = Some(pos) == self.selection;
            items.push(ListItem::new(self.row_line(row, is_selected, theme)));
        }

        f.render_widget(List::new(items).block(block), area);
    }

    fn header_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Styles::muted(theme)));
            }

            let mut style = if col.sortable {
                Styles::title(theme)
            } else {
                Styles::muted(theme).add_modifier(Modifier::BOLD)
            };
            if i == self.active_column {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            let mut title = col.title.clone();
            if let SortState::SortedBy { key, direction } = self.sort {
                if key == col.key {
                    title.push(' ');
                    title.push_str(direction.indicator());
                }
            }
            spans.push(Span::styled(fit(&title, col.width as usize), style));
        }
        Line::from(spans)
    }

    fn row_line(&self, row: &T, is_selected: bool, theme: &Theme) -> Line<'static> {
        let selected_style = Styles::selected(theme);
        let mut spans = Vec::new();
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                let style = if is_selected {
                    selected_style
                } else {
                    Styles::muted(theme)
                };
                spans.push(Span::styled(" | ", style));
            }

            // Custom renderer output is used verbatim; otherwise the
            // accessor's value is coerced to a display string
            let cell = match &col.renderer {
                Some(renderer) => renderer(row),
                None => vec![CellSpan::plain((col.accessor)(row).display())],
            };
            spans.extend(fit_spans(cell, col.width as usize, is_selected, theme));
        }
        Line::from(spans)
    }
}

/// Truncate to the display width and pad the remainder with spaces
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    for _ in used..width {
        out.push(' ');
    }
    out
}

fn fit_spans(
    cell: Vec<CellSpan>,
    width: usize,
    is_selected: bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut remaining = width;
    for piece in cell {
        if remaining == 0 {
            break;
        }
        let mut text = String::new();
        for ch in piece.text.chars() {
            let w = ch.width().unwrap_or(0);
            if w > remaining {
                break;
            }
            text.push(ch);
            remaining -= w;
        }
        let style = if is_selected {
            Styles::selected(theme)
        } else {
            Style::default().fg(theme.color(piece.tone))
        };
        out.push(Span::styled(text, style));
    }
    if remaining > 0 {
        let style = if is_selected {
            Styles::selected(theme)
        } else {
            Style::default()
        };
        out.push(Span::styled(" ".repeat(remaining), style));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        name: &'static str,
        stock: u32,
        location: Option<&'static str>,
    }

    fn item(id: &'static str, name: &'static str, stock: u32) -> Item {
        Item {
            id,
            name,
            stock,
            location: Some("Warehouse A"),
        }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "ID", 6, |i: &Item| CellValue::text(i.id)),
            Column::new("name", "Name", 16, |i: &Item| CellValue::text(i.name)).sortable(),
            Column::new("stock", "Stock", 8, |i: &Item| CellValue::number(i.stock)).sortable(),
            Column::new("location", "Location", 14, |i: &Item| {
                CellValue::opt_text(i.location)
            })
            .sortable(),
        ]
    }

    fn table_with(rows: Vec<Item>) -> DataTable<Item> {
        DataTable::new(columns(), |i| i.id.to_string(), TableConfig::new("Items"))
            .with_rows(rows)
    }

    fn sample() -> Vec<Item> {
        vec![
            item("a", "Aluminum", 15),
            item("b", "Copper", 250),
            item("c", "Steel", 80),
        ]
    }

    fn keys(table: &DataTable<Item>) -> Vec<String> {
        table.visible_keys()
    }

    #[test]
    fn test_unsorted_preserves_input_order() {
        let table = table_with(sample());
        assert_eq!(table.sort_state(), SortState::Unsorted);
        assert_eq!(keys(&table), ["a", "b", "c"]);
    }

    #[test]
    fn test_stock_sort_matches_worked_example() {
        // records a:15, b:250, c:80 — ascending [a,c,b], descending [b,c,a]
        let mut table = table_with(sample());

        table.toggle_sort("stock");
        assert_eq!(keys(&table), ["a", "c", "b"]);

        table.toggle_sort("stock");
        assert_eq!(keys(&table), ["b", "c", "a"]);
    }

    #[test]
    fn test_descending_is_exact_reverse_for_distinct_keys() {
        let mut table = table_with(sample());
        table.toggle_sort("name");
        let ascending = keys(&table);

        table.toggle_sort("name");
        let mut reversed = keys(&table);
        reversed.reverse();
        assert_eq!(ascending, reversed);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut table = table_with(sample());
        table.toggle_sort("stock");
        let once = keys(&table);

        // same column and direction applied again via a fresh table
        let mut other = table_with(sample());
        other.toggle_sort("stock");
        other.set_rows(sample());
        assert_eq!(keys(&other), once);
    }

    #[test]
    fn test_sort_preserves_membership_and_length() {
        let mut table = table_with(sample());
        table.toggle_sort("name");

        let mut sorted_ids = keys(&table);
        sorted_ids.sort();
        assert_eq!(sorted_ids, ["a", "b", "c"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores_original_order_of_distinct_keys() {
        let mut table = table_with(sample());
        table.toggle_sort("stock");
        let first = keys(&table);
        table.toggle_sort("stock");
        table.toggle_sort("stock");
        assert_eq!(keys(&table), first);
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let mut table = table_with(sample());
        table.toggle_sort("stock");
        table.toggle_sort("stock");
        assert_eq!(
            table.sort_state(),
            SortState::SortedBy {
                key: "stock",
                direction: SortDirection::Descending
            }
        );

        table.toggle_sort("name");
        assert_eq!(
            table.sort_state(),
            SortState::SortedBy {
                key: "name",
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn test_non_sortable_column_is_a_no_op() {
        let mut table = table_with(sample());
        table.toggle_sort("id");
        assert_eq!(table.sort_state(), SortState::Unsorted);
        assert_eq!(keys(&table), ["a", "b", "c"]);

        table.toggle_sort("no-such-column");
        assert_eq!(table.sort_state(), SortState::Unsorted);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut table = table_with(vec![
            item("a", "Widget", 10),
            item("b", "Widget", 10),
            item("c", "Anvil", 10),
        ]);
        table.toggle_sort("stock");
        assert_eq!(keys(&table), ["a", "b", "c"]);

        table.toggle_sort("stock");
        assert_eq!(keys(&table), ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let mut rows = sample();
        rows[1].location = None; // b has no location
        let mut table = table_with(rows);

        table.toggle_sort("location");
        assert_eq!(keys(&table).last().unwrap(), "b");

        table.toggle_sort("location");
        assert_eq!(keys(&table).last().unwrap(), "b");
    }

    #[test]
    fn test_text_comparison_is_case_insensitive() {
        let mut table = table_with(vec![
            item("a", "zebra", 1),
            item("b", "Apple", 2),
            item("c", "mango", 3),
        ]);
        table.toggle_sort("name");
        assert_eq!(keys(&table), ["b", "c", "a"]);
    }

    #[test]
    fn test_selection_follows_record_across_resort() {
        let mut table = table_with(sample());
        table.select_next(); // b
        assert_eq!(table.selected().unwrap().id, "b");

        table.toggle_sort("stock"); // b moves to the end
        assert_eq!(table.selected().unwrap().id, "b");
        table.select_next();
        assert_eq!(table.selected().unwrap().id, "a");
    }

    #[test]
    fn test_set_rows_never_mutates_caller_order() {
        let original = sample();
        let mut table = table_with(original.clone());
        table.toggle_sort("stock");
        table.toggle_sort("stock");

        // fresh rows arrive in caller order and are re-sorted from scratch
        table.set_rows(original.clone());
        assert_eq!(table.len(), original.len());
        assert_eq!(keys(&table), ["b", "c", "a"]);
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_rows_render_empty_text_instead_of_header() {
        let mut table = DataTable::new(
            columns(),
            |i: &Item| i.id.to_string(),
            TableConfig::new("Items").with_empty_text("No items found"),
        );

        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| table.render(f, f.size(), &Theme::dark()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No items found"));
        assert!(!text.contains("Stock"));
    }

    #[test]
    fn test_empty_rows_without_empty_text_render_header_only() {
        let mut table = table_with(Vec::new());

        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| table.render(f, f.size(), &Theme::dark()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Stock"));
    }

    #[test]
    fn test_render_shows_rows_in_sorted_order_with_indicator() {
        let mut table = table_with(sample());
        table.toggle_sort("stock");

        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| table.render(f, f.size(), &Theme::dark()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Stock ▲"));
        let aluminum = text.find("Aluminum").unwrap();
        let steel = text.find("Steel").unwrap();
        let copper = text.find("Copper").unwrap();
        assert!(aluminum < steel && steel < copper);
    }

    #[test]
    fn test_custom_renderer_output_used_verbatim() {
        let cols = vec![
            Column::new("id", "ID", 6, |i: &Item| CellValue::text(i.id)),
            Column::new("stock", "Stock", 12, |i: &Item| CellValue::number(i.stock))
                .with_renderer(|i| vec![CellSpan::new(format!("{} units", i.stock), Tone::Warning)]),
        ];
        let mut table = DataTable::new(cols, |i: &Item| i.id.to_string(), TableConfig::new("Items"))
            .with_rows(vec![item("a", "Aluminum", 15)]);

        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| table.render(f, f.size(), &Theme::dark()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("15 units"));
    }
}
