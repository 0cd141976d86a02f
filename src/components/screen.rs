//! Main screen: top bar, grid, Manage Columns panel, status and help bars

use crate::components::calculate_main_layout;
use crate::components::column_manager::ColumnManager;
use crate::components::grid::{DataGrid, GridRenderContext};
use crate::components::theme::Palette;
use crate::model::{project, Preferences, TableState};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Context needed for rendering the main screen
pub struct ScreenContext<'a> {
    pub table: &'a TableState,
    pub prefs: &'a Preferences,
    pub palette: &'a Palette,
    pub search_mode: bool,
    pub status_message: Option<&'a str>,
}

/// Draw the main screen
pub fn draw_main_screen(
    frame: &mut Frame,
    area: Rect,
    grid: &mut DataGrid,
    column_manager: &mut ColumnManager,
    ctx: &ScreenContext,
) -> Result<()> {
    let panel_open = ctx.prefs.manage_columns_open;
    let layout = calculate_main_layout(area, ctx.status_message.is_some(), panel_open);

    frame.render_widget(Block::default().style(ctx.palette.base()), area);

    render_top_bar(frame, layout.top_bar, ctx);

    let projection = project(ctx.table, &ctx.prefs.global_search);
    let columns = ctx.table.visible_columns();
    let grid_ctx = GridRenderContext {
        table: ctx.table,
        projection: &projection,
        columns: &columns,
        palette: ctx.palette,
        focused: !panel_open && !ctx.search_mode,
    };
    grid.draw_with_context(frame, layout.grid, &grid_ctx)?;

    if let Some(panel_area) = layout.column_panel {
        column_manager.draw_with_columns(frame, panel_area, ctx.table.columns(), ctx.palette, true)?;
    }

    if let (Some(status_area), Some(message)) = (layout.status, ctx.status_message) {
        let status = Paragraph::new(Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(ctx.palette.success),
        )));
        frame.render_widget(status, status_area);
    }

    render_help_bar(frame, layout.help, ctx);
    Ok(())
}

fn render_top_bar(frame: &mut Frame, area: Rect, ctx: &ScreenContext) {
    let palette = ctx.palette;
    let mut spans = vec![
        Span::styled(
            " Tabula ",
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    let query = &ctx.prefs.global_search;
    if ctx.search_mode {
        spans.push(Span::styled("Search: ", Style::default().fg(palette.accent)));
        spans.push(Span::styled(
            format!("{}_", query),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ));
    } else if query.is_empty() {
        spans.push(Span::styled("/ to search", Style::default().fg(palette.text_dim)));
    } else {
        spans.push(Span::styled("Search: ", Style::default().fg(palette.text_dim)));
        spans.push(Span::styled(query.clone(), Style::default().fg(palette.text)));
    }

    spans.push(Span::raw("  "));
    if ctx.table.is_editing() {
        spans.push(Span::styled(
            " EDITING ",
            Style::default()
                .fg(palette.bg)
                .bg(palette.pending)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("{} rows · {} columns · {} theme", ctx.table.rows().len(), ctx.table.columns().len(), ctx.prefs.theme.name()),
        Style::default().fg(palette.text_dim),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(ctx.search_mode)),
    );
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &ScreenContext) {
    let palette = ctx.palette;
    let hint = |key: &str, label: &str, color| {
        vec![
            Span::styled(format!(" {} ", key), palette.key_hint(color)),
            Span::raw(format!("{}  ", label)),
        ]
    };

    let groups = if ctx.search_mode {
        vec![
            hint("Esc/Enter", "Done", palette.success),
            hint("Backspace", "Delete", palette.warning),
        ]
    } else if ctx.prefs.manage_columns_open {
        vec![
            hint("Space", "Show/Hide", palette.success),
            hint("J/K", "Move", palette.accent),
            hint("a", "Add Column", palette.success),
            hint("Esc", "Close", palette.warning),
        ]
    } else if ctx.table.is_editing() {
        vec![
            hint("Enter", "Edit Cell", palette.accent),
            hint("Ctrl+s", "Save All", palette.success),
            hint("Esc", "Cancel All", palette.warning),
            hint("?", "Help", palette.accent),
        ]
    } else {
        vec![
            hint("q", "Quit", palette.warning),
            hint("e", "Inline Edit", palette.accent),
            hint("a", "Add Row", palette.success),
            hint("d", "Delete", palette.error),
            hint("s", "Sort", palette.accent),
            hint("c", "Columns", palette.accent),
            hint("i/x", "Import/Export", palette.accent),
            hint("t", "Theme", palette.accent),
            hint("?", "Help", palette.accent),
        ]
    };

    let paragraph = Paragraph::new(Line::from(groups.concat())).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(paragraph, area);
}
