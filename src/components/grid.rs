//! Data grid component
//!
//! Renders the current page of the projection with a cell cursor, sort
//! arrows in the header, staged edits highlighted, and a pagination footer.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use crate::model::{CellValue, Column, Projection, Row, TableState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState as WidgetTableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 30;
const COLUMN_SPACING: u16 = 2;

/// Grid with a cell cursor over the visible page
pub struct DataGrid {
    /// Row index within the current page
    pub cursor_row: usize,
    /// Index into the visible columns
    pub cursor_col: usize,
    /// First rendered column (horizontal scroll)
    col_offset: usize,
    /// Mirrors the table's edit flag so keys can switch meaning
    pub editing: bool,
    table_state: WidgetTableState,
}

impl Default for DataGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGrid {
    pub fn new() -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            col_offset: 0,
            editing: false,
            table_state: WidgetTableState::default(),
        }
    }

    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn move_down(&mut self, page_len: usize) {
        if self.cursor_row + 1 < page_len {
            self.cursor_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self, column_count: usize) {
        if self.cursor_col + 1 < column_count {
            self.cursor_col += 1;
        }
    }

    /// Back to the top of the page
    pub fn reset_row(&mut self) {
        self.cursor_row = 0;
        self.table_state = WidgetTableState::default();
    }

    /// Keep the cursor inside the page after rows or columns changed
    pub fn clamp(&mut self, page_len: usize, column_count: usize) {
        self.cursor_row = self.cursor_row.min(page_len.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(column_count.saturating_sub(1));
        self.col_offset = self.col_offset.min(self.cursor_col);
    }
}

impl Component for DataGrid {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let action = match key.code {
            // Navigation
            KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::CursorRight),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('+') => Some(Action::CycleRowsPerPage),
            KeyCode::Char('s') if ctrl && self.editing => Some(Action::SaveAllEdits),
            KeyCode::Char('s') if !ctrl => Some(Action::SortByCursorColumn),

            // Inline editing
            KeyCode::Char('e') if !self.editing => Some(Action::StartEditing),
            KeyCode::Enter if self.editing => Some(Action::OpenCellEditor),
            KeyCode::Esc if self.editing => Some(Action::CancelAllEdits),

            // Rows
            KeyCode::Char('a') => Some(Action::AddRow),
            KeyCode::Char('d') => Some(Action::RequestDeleteRow),

            // Panels & files
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('c') => Some(Action::OpenManageColumns),
            KeyCode::Char('i') => Some(Action::OpenImport),
            KeyCode::Char('x') => Some(Action::ExportCsv),
            KeyCode::Char('t') => Some(Action::ToggleTheme),

            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_with_context which takes the table
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the grid
pub struct GridRenderContext<'a> {
    pub table: &'a TableState,
    pub projection: &'a Projection<'a>,
    pub columns: &'a [&'a Column],
    pub palette: &'a Palette,
    pub focused: bool,
}

impl DataGrid {
    pub fn draw_with_context(&mut self, frame: &mut Frame, area: Rect, ctx: &GridRenderContext) -> Result<()> {
        let palette = ctx.palette;
        let title = if ctx.table.is_editing() {
            Line::from(vec![
                Span::raw(" Table "),
                Span::styled(
                    "[editing] ",
                    Style::default().fg(palette.pending).add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(" Table ")
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(ctx.focused))
            .title(title)
            .style(palette.base());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        self.render_footer(frame, chunks[1], ctx);

        if ctx.columns.is_empty() {
            let hint = Paragraph::new("No visible columns (press c to manage columns)")
                .style(Style::default().fg(palette.text_dim))
                .alignment(Alignment::Center);
            frame.render_widget(hint, chunks[0]);
            return Ok(());
        }

        self.clamp(ctx.projection.rows.len(), ctx.columns.len());
        let widths = column_widths(ctx.columns, &ctx.projection.rows, ctx.table);
        let shown = self.scroll_to_cursor(&widths, chunks[0].width);

        let header = TableRow::new(shown.clone().map(|i| {
            let column = ctx.columns[i];
            let mut label = column.label.clone();
            if ctx.table.sort().order_by.as_deref() == Some(column.key.as_str()) {
                label.push(' ');
                label.push_str(ctx.table.sort().direction.arrow());
            }
            Cell::from(truncate(&label, widths[i]))
        }))
        .style(Style::default().fg(palette.header).add_modifier(Modifier::BOLD));

        if ctx.projection.rows.is_empty() {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(chunks[0]);
            let table = Table::new(Vec::<TableRow>::new(), shown.clone().map(|i| Constraint::Length(widths[i] as u16)))
                .header(header)
                .column_spacing(COLUMN_SPACING);
            frame.render_widget(table, body[0]);

            let empty = Paragraph::new("No rows to display")
                .style(Style::default().fg(palette.text_dim))
                .alignment(Alignment::Center);
            frame.render_widget(empty, body[1]);
            return Ok(());
        }

        let constraints: Vec<Constraint> = shown
            .clone()
            .map(|i| Constraint::Length(widths[i] as u16))
            .collect();
        let rows = ctx.projection.rows.iter().enumerate().map(|(row_idx, row)| {
            TableRow::new(shown.clone().map(|col_idx| {
                let column = ctx.columns[col_idx];
                let (text, pending) = cell_text(ctx.table, row, column);
                let mut style = Style::default().fg(palette.text);
                if pending {
                    style = style.fg(palette.pending).add_modifier(Modifier::ITALIC);
                }
                if row_idx == self.cursor_row && col_idx == self.cursor_col {
                    style = style
                        .bg(palette.cursor_bg)
                        .fg(palette.cursor_fg)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(truncate(&text, widths[col_idx])).style(style)
            }))
        });

        let table = Table::new(rows, constraints)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .highlight_style(Style::default().bg(palette.row_alt_bg));

        self.table_state.select(Some(self.cursor_row));
        frame.render_stateful_widget(table, chunks[0], &mut self.table_state);
        Ok(())
    }

    /// Adjust the horizontal offset so the cursor column is on screen and
    /// return the range of rendered columns
    fn scroll_to_cursor(&mut self, widths: &[usize], available: u16) -> std::ops::Range<usize> {
        let available = available as usize;
        let span = |from: usize, to: usize| -> usize {
            widths[from..=to].iter().sum::<usize>() + (to - from) * COLUMN_SPACING as usize
        };

        if self.cursor_col < self.col_offset {
            self.col_offset = self.cursor_col;
        }
        while self.col_offset < self.cursor_col && span(self.col_offset, self.cursor_col) > available {
            self.col_offset += 1;
        }

        let mut end = self.col_offset + 1;
        while end < widths.len() && span(self.col_offset, end) <= available {
            end += 1;
        }
        self.col_offset..end
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, ctx: &GridRenderContext) {
        let projection = ctx.projection;
        let line = Line::from(vec![
            Span::styled("Rows per page: ", Style::default().fg(ctx.palette.text_dim)),
            Span::styled(
                ctx.table.rows_per_page().to_string(),
                Style::default().fg(ctx.palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(projection.range_label(), Style::default().fg(ctx.palette.text)),
            Span::raw("  "),
            Span::styled(
                format!("page {}/{}", projection.page + 1, projection.page_count),
                Style::default().fg(ctx.palette.text_dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
    }
}

/// Text shown for a cell and whether it is a staged edit
pub fn cell_text(table: &TableState, row: &Row, column: &Column) -> (String, bool) {
    if table.is_editing() {
        if let Some(value) = table.pending_value(&row.id, &column.key) {
            return (value.to_string(), true);
        }
    }
    let text = row
        .get(&column.key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| CellValue::default_for(column.kind).to_string());
    (text, false)
}

/// Display width per column, from the header and the cells on the page
fn column_widths(columns: &[&Column], rows: &[&Row], table: &TableState) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            // room for " ▲"
            let header = column.label.width() + 2;
            let cells = rows
                .iter()
                .map(|row| cell_text(table, row, column).0.width())
                .max()
                .unwrap_or(0);
            header.max(cells).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Fit text into `width` columns, ending with "…" when cut
pub fn truncate(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.width() <= width {
        return flat;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{project, ColumnKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(table: &TableState, grid: &mut DataGrid) -> String {
        let projection = project(table, "");
        let columns = table.visible_columns();
        let palette = Palette::light();
        let ctx = GridRenderContext {
            table,
            projection: &projection,
            columns: &columns,
            palette: &palette,
            focused: true,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                grid.draw_with_context(frame, area, &ctx).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("line\nbreak", 20), "line break");
        // wide chars count double
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut grid = DataGrid::new();
        grid.move_up();
        grid.move_left();
        assert_eq!((grid.cursor_row, grid.cursor_col), (0, 0));

        for _ in 0..10 {
            grid.move_down(3);
            grid.move_right(2);
        }
        assert_eq!((grid.cursor_row, grid.cursor_col), (2, 1));

        grid.clamp(1, 1);
        assert_eq!((grid.cursor_row, grid.cursor_col), (0, 0));
    }

    #[test]
    fn test_keys_depend_on_edit_mode() {
        let mut grid = DataGrid::new();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert_eq!(grid.handle_key_event(enter).unwrap(), None);
        assert_eq!(grid.handle_key_event(esc).unwrap(), None);
        assert_eq!(grid.handle_key_event(save).unwrap(), None);

        grid.editing = true;
        assert_eq!(grid.handle_key_event(enter).unwrap(), Some(Action::OpenCellEditor));
        assert_eq!(grid.handle_key_event(esc).unwrap(), Some(Action::CancelAllEdits));
        assert_eq!(grid.handle_key_event(save).unwrap(), Some(Action::SaveAllEdits));
    }

    #[test]
    fn test_renders_header_rows_and_footer() {
        let mut table = TableState::seeded();
        table.set_sort("name");
        let screen = render(&table, &mut DataGrid::new());

        assert!(screen.contains("Name ▲"));
        assert!(screen.contains("Ada Lovelace"));
        assert!(screen.contains("Rows per page: 10"));
        assert!(screen.contains("1–4 of 4"));
        assert!(screen.contains("page 1/1"));
    }

    #[test]
    fn test_renders_empty_state() {
        let mut table = TableState::empty();
        table.add_column("name", "Name", ColumnKind::Text, None).unwrap();
        let screen = render(&table, &mut DataGrid::new());
        assert!(screen.contains("No rows to display"));
        assert!(screen.contains("0 of 0"));
    }

    #[test]
    fn test_pending_value_is_shown_while_editing() {
        let mut table = TableState::seeded();
        let id = table.rows()[0].id.clone();
        table.start_editing();
        table.edit_cell(&id, "role", CellValue::text("Countess"));

        let row = table.row(&id).unwrap().clone();
        let role = table.column("role").unwrap().clone();
        assert_eq!(cell_text(&table, &row, &role), ("Countess".to_string(), true));

        table.stop_editing();
        assert_eq!(cell_text(&table, &row, &role), ("Engineer".to_string(), false));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let mut grid = DataGrid::new();
        let widths = vec![10; 8];
        grid.cursor_col = 7;
        let shown = grid.scroll_to_cursor(&widths, 40);
        assert!(shown.contains(&7));
        assert!(shown.start > 0);

        grid.cursor_col = 0;
        let shown = grid.scroll_to_cursor(&widths, 40);
        assert_eq!(shown.start, 0);
    }
}
