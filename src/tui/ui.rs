//! UI rendering for the TUI.

use std::time::Instant;

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::app::{App, MenuState, Mode};

/// Render the entire UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    render_at(app, frame, Instant::now());
}

/// Render the entire UI as of `now`.
pub fn render_at(app: &mut App, frame: &mut Frame, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_tree_area(app, frame, chunks[1], now);
    render_footer(app, frame, chunks[2]);

    // Render overlays based on mode
    match &app.mode {
        Mode::ContextMenu(menu) => render_context_menu(menu, frame),
        Mode::Help => render_help_overlay(frame),
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let location = app
        .root
        .as_ref()
        .map(|root| root.display().to_string())
        .unwrap_or_else(|| app.tree.name.clone());

    let header_text = format!(" {}  │  {} nodes", location, app.tree.count());

    let block = Block::default()
        .title(" Tree Explorer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &mut App, frame: &mut Frame, area: Rect, now: Instant) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let display = app.display_rows(now);
    let visible_height = inner_area.height as usize;

    let selected_line = display
        .iter()
        .position(|row| row.row == Some(app.selected))
        .unwrap_or(0);
    let scroll_offset = calculate_scroll_offset(selected_line, visible_height, display.len());

    for (i, display_row) in display
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let mut line = display_row.line.clone();
        if display_row.row == Some(app.selected) {
            line = line.patch_style(Style::default().bg(Color::DarkGray));
        }

        let row_area = Rect::new(inner_area.x, y, inner_area.width, 1);
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected
            .saturating_sub(padding)
            .min(total.saturating_sub(visible_height))
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => "[↑↓] Navigate  [Enter] Toggle  [←→] Collapse/Expand  [m] Menu  [?] Help  [q] Quit",
        Mode::ContextMenu(_) => "[↑↓] Choose  [Enter] Run  [Esc] Close",
        Mode::Help => "[Esc] Close",
    };

    let selection = app.selected_row().and_then(|row| {
        let node = row.node?;
        Some(match row.category {
            Some(category) => format!("{}  [{}]", node.path, category),
            None => node.path,
        })
    });

    // Show status message if present, otherwise hints
    let text = app
        .status_message
        .clone()
        .or(selection)
        .unwrap_or_default();

    let lines = vec![Line::from(text), Line::from(hints)];
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_context_menu(menu: &MenuState, frame: &mut Frame) {
    let area = frame.area();

    let width = menu
        .items
        .iter()
        .map(|item| item.chars().count())
        .chain([menu.payload.name.chars().count()])
        .max()
        .unwrap_or(10) as u16
        + 6;
    let width = width.min(area.width.saturating_sub(4));
    let height = (menu.items.len() as u16 + 2).min(area.height.saturating_sub(2));
    let menu_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, menu_area);

    let block = Block::default()
        .title(format!(" {} ", menu.payload.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let items: Vec<ListItem> = menu
        .items
        .iter()
        .map(|item| ListItem::new(item.as_str()))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(menu.selected));
    frame.render_stateful_widget(list, menu_area, &mut state);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 20u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 g / G      Go to top / bottom
 Enter/Spc  Toggle folder
 →/l        Expand folder
 ←/h        Collapse / Go to parent
 E / C      Expand / Collapse all

 ACTIONS
 ─────────────────────────────────
 m          Open context menu
 r          Rescan project
 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
