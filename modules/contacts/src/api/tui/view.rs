use ratatui::{
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::api::tui::controller::{ContactsController, NoticeKind};
use crate::api::tui::form::{Field, Focus};

const TITLE: &str = "Contact Management System";
const LABEL_WIDTH: u16 = 7;
const FIELDS: [(Field, Focus); 3] = [
    (Field::Name, Focus::Name),
    (Field::Phone, Focus::Phone),
    (Field::Email, Focus::Email),
];

/// Draw the whole screen from controller state.
pub fn render(frame: &mut Frame, controller: &ContactsController) {
    let [form_area, list_area, buttons_area, status_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(4),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_form(frame, controller, form_area);
    render_list(frame, controller, list_area);
    render_buttons(frame, controller, buttons_area);
    render_status(frame, controller, status_area);

    if controller.notice().is_some() {
        render_notice(frame, controller);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn button(label: &str, focused: bool) -> Span<'static> {
    Span::styled(format!("[ {label} ]"), focus_style(focused))
}

fn render_form(frame: &mut Frame, controller: &ContactsController, area: Rect) {
    let block = Block::bordered().title(TITLE.bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = controller.form();
    let mut lines: Vec<Line> = FIELDS
        .iter()
        .map(|(field, focus)| {
            let focused = controller.focus() == *focus;
            Line::from(vec![
                Span::raw(format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize)),
                Span::styled(
                    form.value(*field).to_string(),
                    Style::default().fg(if focused { Color::Yellow } else { Color::Reset }),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(button("Add Contact", controller.focus() == Focus::Add)));
    frame.render_widget(Paragraph::new(lines), inner);

    if controller.notice().is_none() {
        if let Some(row) = FIELDS.iter().position(|(_, f)| *f == controller.focus()) {
            let typed = u16::try_from(form.value(FIELDS[row].0).chars().count()).unwrap_or(u16::MAX);
            let x = inner
                .x
                .saturating_add(LABEL_WIDTH)
                .saturating_add(typed)
                .min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y + row as u16));
        }
    }
}

fn render_list(frame: &mut Frame, controller: &ContactsController, area: Rect) {
    let list_focused = controller.focus() == Focus::List;
    let header = Row::new(["Name", "Phone", "Email"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = controller.rows().iter().map(|c| {
        let row = Row::new([c.name.clone(), c.phone.clone(), c.email.clone()]);
        if controller.selected() == Some(c.id) {
            row.style(Style::default().fg(Color::Cyan))
        } else {
            row
        }
    });

    let block = Block::bordered()
        .title("Contacts")
        .border_style(Style::default().fg(if list_focused { Color::Yellow } else { Color::Reset }));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(controller.cursor());
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_buttons(frame: &mut Frame, controller: &ContactsController, area: Rect) {
    let line = Line::from(vec![
        button("Update Contact", controller.focus() == Focus::Update),
        Span::raw("  "),
        button("Delete Contact", controller.focus() == Focus::Delete),
    ]);
    frame.render_widget(Paragraph::new(line).centered(), area);
}

fn render_status(frame: &mut Frame, controller: &ContactsController, area: Rect) {
    let mut spans = Vec::new();
    if let Some(id) = controller.selected() {
        spans.push(Span::styled(format!("Editing #{id}  "), Style::default().fg(Color::Cyan)));
    }
    spans.push(Span::styled(
        "Tab focus | Enter activate | ^A add | ^U update | ^D delete | ^L clear | Esc deselect | ^Q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice(frame: &mut Frame, controller: &ContactsController) {
    let Some(notice) = controller.notice() else {
        return;
    };
    let area = centered(frame.area(), 50, 7);
    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    let block = Block::bordered()
        .title(notice.title())
        .border_style(Style::default().fg(color));
    let text = vec![
        Line::from(notice.message.as_str()),
        Line::default(),
        Line::from("Press any key".fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .centered()
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
