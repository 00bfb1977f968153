//! Saved contacts pane — right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span, Text},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the contact list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Saved Contacts ({}) ", app.contacts.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.contacts.is_empty() {
    f.render_widget(
      Paragraph::new("No contacts yet.")
        .centered()
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .contacts
    .iter()
    .map(|contact| {
      let mut lines = vec![
        Line::from(Span::styled(
          contact.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
          format!("{} | {}", contact.email, contact.phone),
          Style::default().fg(Color::Gray),
        )),
      ];
      if !contact.message.is_empty() {
        lines.push(Line::from(Span::styled(
          format!("“{}”", contact.message),
          Style::default().add_modifier(Modifier::ITALIC),
        )));
      }
      lines.push(Line::from(""));
      ListItem::new(Text::from(lines))
    })
    .collect();

  // No selection: the list is read-only, scrolled by offset.
  let mut state = ListState::default().with_offset(app.list_scroll);
  f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}
