//! TUI rendering — orchestrates all panes.

pub mod contact_form;
pub mod contact_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, success banner, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(if app.submit_status.is_empty() { 0 } else { 1 }),
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_banner(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  if let Some(message) = &app.alert {
    draw_alert(f, area, message);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Contact Manager",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{}  {date} ", app.client.base_url()),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

fn draw_banner(f: &mut Frame, area: Rect, app: &App) {
  if app.submit_status.is_empty() {
    return;
  }
  f.render_widget(
    Paragraph::new(app.submit_status.as_str())
      .centered()
      .style(Style::default().fg(Color::Black).bg(Color::Green)),
    area,
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Form on the left, saved contacts on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  contact_form::draw(f, cols[0], app);
  contact_list::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.alert.is_some() {
    ("ALERT", "Enter/Esc dismiss")
  } else {
    (
      "FORM",
      "Tab/↑↓ move  Enter next/submit  Ctrl-S submit  PgUp/PgDn scroll  Esc quit",
    )
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {hints}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Alert ────────────────────────────────────────────────────────────────────

fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
  let [popup] = Layout::horizontal([Constraint::Percentage(60)])
    .flex(Flex::Center)
    .areas(area);
  let [popup] = Layout::vertical([Constraint::Length(5)])
    .flex(Flex::Center)
    .areas(popup);

  let block = Block::default()
    .title(" Alert ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(message.to_owned()),
      Line::from(Span::styled(
        "[Enter] OK",
        Style::default().fg(Color::DarkGray),
      )),
    ])
    .wrap(Wrap { trim: true })
    .block(block),
    popup,
  );
}
