//! "Add New Contact" form pane — left panel.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Focus},
  form::FormField,
};

/// Render the form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Add New Contact ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Each input is a 3-row box plus one row for its error; the message box is
  // taller and never has an error.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3),
      Constraint::Length(1),
      Constraint::Length(3),
      Constraint::Length(1),
      Constraint::Length(3),
      Constraint::Length(1),
      Constraint::Length(5),
      Constraint::Length(3),
      Constraint::Min(0),
    ])
    .split(inner);

  for (i, field) in FormField::ALL.into_iter().enumerate() {
    let input_area = rows[i * 2];
    draw_input(f, input_area, app, field);

    if field != FormField::Message
      && let Some(msg) = app.errors.get(&field)
    {
      f.render_widget(
        Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Red)),
        rows[i * 2 + 1],
      );
    }
  }

  draw_submit(f, rows[7], app);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App, field: FormField) {
  let focused = app.focus == Focus::Field(field);
  let border = if app.errors.contains_key(&field) {
    Color::Red
  } else if focused {
    Color::Blue
  } else {
    Color::DarkGray
  };

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let value = app.form.value(field);
  let text: Vec<Line> = if value.is_empty() && !focused {
    vec![Line::from(Span::styled(
      field.placeholder(),
      Style::default().fg(Color::DarkGray),
    ))]
  } else {
    let mut lines: Vec<Line> = value.split('\n').map(|l| Line::from(l.to_owned())).collect();
    if focused && let Some(last) = lines.last_mut() {
      last.push_span(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    lines
  };

  f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(block), area);
}

fn draw_submit(f: &mut Frame, area: Rect, app: &App) {
  let enabled = app.can_submit();
  let focused = app.focus == Focus::Submit;

  let mut style = if enabled {
    Style::default().fg(Color::White).bg(Color::Blue)
  } else {
    Style::default().fg(Color::Gray).bg(Color::DarkGray)
  };
  if focused {
    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
  }

  f.render_widget(
    Paragraph::new("Submit Contact")
      .centered()
      .style(style)
      .block(Block::default().borders(Borders::ALL)),
    area,
  );
}
