use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::applet::state::AppletState;

pub fn render(f: &mut Frame, state: &mut AppletState) {
    let [panel, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    // Panel line: icon plus the count label, which stays hidden at zero.
    let mut spans = vec![icon_glyph(state), Span::raw(" ")];
    if let Some(label) = state.label() {
        spans.push(Span::styled(
            label,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), panel);

    if state.menu_open {
        render_menu(f, body, state);
    } else {
        let hint = Paragraph::new("Press Enter for the mail summary.")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, body);
    }

    let line = match &state.status {
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan))),
        None => hint_line(state.menu_open),
    };
    f.render_widget(Paragraph::new(line), footer);
}

fn icon_glyph(state: &AppletState) -> Span<'static> {
    if state.has_unread {
        Span::styled(
            "✉",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("✉", Style::default().fg(Color::DarkGray))
    }
}

fn render_menu(f: &mut Frame, area: Rect, state: &mut AppletState) {
    let block = Block::default()
        .title(" Inbox ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if state.shows_placeholder() {
        let p = Paragraph::new("No mail.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let mut items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|e| {
            let sender = Span::styled(
                e.sender.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            );
            let subject = Span::styled(e.subject.clone(), Style::default().fg(Color::Gray));
            ListItem::new(Text::from(vec![Line::from(sender), Line::from(subject)]))
        })
        .collect();
    if state.overflowed {
        items.push(ListItem::new("…"));
    }

    let list = List::new(items)
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn hint_line(menu_open: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" summary  "),
    ];
    if menu_open {
        spans.extend([
            Span::styled("j/k", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" move  "),
            Span::styled("a", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" archive  "),
            Span::styled("t", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" trash  "),
            Span::styled("d", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" delete  "),
        ]);
    }
    spans.extend([
        Span::styled("u", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" recount  "),
        Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" refresh  "),
        Span::styled("S", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" settings  "),
        Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]);
    Line::from(spans)
}
