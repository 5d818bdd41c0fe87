// File: src/tui/view.rs
use crate::model::{Item, PriceClass, Query};
use crate::tui::state::{AppState, InputMode};
use crate::view::StatusSlot;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Wrap,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};

fn price_badge(price: PriceClass) -> Span<'static> {
    let color = match price {
        PriceClass::Free => Color::Green,
        PriceClass::Paid => Color::Yellow,
    };
    Span::styled(
        format!(" {} ", price),
        Style::default().fg(Color::Black).bg(color),
    )
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " SEARCH ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" /:Search (Enter:Apply Esc:Cancel)  c:Clear All"),
        ]),
        Line::from(vec![
            Span::styled(
                " FILTER ",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" d:Start Date  r:Cycle Region  p:Cycle Free/Paid"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  ?:Toggle Help  q:Quit"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0), footer_height])
        .split(f.area());

    draw_featured(f, state, v_chunks[0]);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(v_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(h_chunks[0]);

    draw_results(f, state, left[0]);
    draw_details(f, state, left[1]);
    draw_map(f, state, h_chunks[1]);
    draw_footer(f, state, v_chunks[2], full_help_text);
}

fn draw_featured(f: &mut Frame, state: &AppState, area: Rect) {
    let views = state.sync.views();
    let block = Block::default().borders(Borders::ALL).title(" Featured ");

    if state.loading() || views.featured.is_empty() {
        let text = if state.loading() {
            "Loading..."
        } else {
            views.status(StatusSlot::Featured)
        };
        let p = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    f.render_widget(block, area);
    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, views.featured.len() as u32); views.featured.len()])
        .split(inner);

    for (bucket, col) in views.featured.iter().zip(columns.iter()) {
        let idx = state.featured_slide % bucket.len();
        let item = &bucket[idx];
        let lines = vec![
            Line::from(vec![
                Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                price_badge(item.price),
            ]),
            Line::from(Span::styled(
                item.location.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(item.date_range_label()),
            Line::from(Span::styled(
                format!("{}/{}", idx + 1, bucket.len()),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let p = Paragraph::new(lines)
            .block(Block::default().borders(Borders::LEFT))
            .wrap(Wrap { trim: true });
        f.render_widget(p, *col);
    }
}

fn draw_results(f: &mut Frame, state: &mut AppState, area: Rect) {
    let items: Vec<ListItem> = state
        .items()
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    price_badge(item.price),
                    Span::raw(" "),
                    Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("    {}  {}", item.location, item.date_range_label()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let title = if state.loading() {
        " Events (loading...) ".to_string()
    } else {
        format!(" Events: {} ", state.sync.views().status(StatusSlot::Results))
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn details_text(item: &Item) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(desc) = &item.description {
        lines.push(Line::from(desc.clone()));
    }
    if let Some(region) = &item.region {
        lines.push(Line::from(format!("Region: {}", region)));
    }
    if !item.organization_url.is_empty() {
        lines.push(Line::from(format!("Details: {}", item.organization_url)));
    }
    if let Some(logo) = &item.logo_url {
        lines.push(Line::from(format!("Logo: {}", logo)));
    }
    if lines.is_empty() {
        lines.push(Line::from("No details."));
    }
    lines
}

fn draw_details(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = match state.get_selected_item() {
        Some(item) => details_text(item),
        None => vec![Line::from(
            state.sync.views().status(StatusSlot::Results).to_string(),
        )],
    };
    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn draw_map(f: &mut Frame, state: &AppState, area: Rect) {
    let map = state.sync.map();
    let (x_bounds, y_bounds) = map.canvas_bounds();

    let selected = state
        .get_selected_item()
        .and_then(|i| i.coordinates.filter(|p| p.is_finite()));
    let coords: Vec<(f64, f64)> = map
        .markers
        .iter()
        .map(|m| (m.point.lng, m.point.lat))
        .collect();
    let highlight: Vec<(f64, f64)> = selected.map(|p| (p.lng, p.lat)).into_iter().collect();

    let title = format!(" Map: {} ", state.sync.views().status(StatusSlot::Map));
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &highlight,
                color: Color::LightCyan,
            });
        });
    f.render_widget(canvas, area);
}

/// Footer summary of the active filters.
fn filter_label(query: &Query) -> String {
    if query.is_empty() {
        return "all upcoming".to_string();
    }
    let mut parts = Vec::new();
    let text = query.text.trim();
    if !text.is_empty() {
        parts.push(format!("\"{}\"", text));
    }
    if let Some(region) = &query.region {
        parts.push(format!("region:{}", region));
    }
    if let Some(date) = query.date {
        parts.push(format!("date:{}", date.format("%Y-%m-%d")));
    }
    if let Some(price) = query.price {
        parts.push(price.to_string());
    }
    parts.join(" ")
}

/// Column of the text cursor inside a bordered input box, kept on screen
/// however long the input grows.
fn cursor_column(area: Rect, prefix: usize, cursor: usize) -> u16 {
    let offset = u16::try_from(prefix.saturating_add(cursor)).unwrap_or(u16::MAX);
    let last = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(offset).min(last)
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect, full_help_text: Vec<Line<'static>>) {
    let input = match state.mode {
        InputMode::Searching => Some(("/", " Search (Enter:Apply Esc:Cancel) ")),
        InputMode::DateEntry => Some(("", " Start date YYYY-MM-DD (Enter:Apply Esc:Cancel) ")),
        InputMode::Normal => None,
    };
    if let Some((prefix, title)) = input {
        let p = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, area);
        f.set_cursor_position((
            cursor_column(area, prefix.len(), state.cursor_position),
            area.y + 1,
        ));
        return;
    }

    if state.show_full_help {
        let p = Paragraph::new(full_help_text).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    }

    let label = filter_label(&state.current_query());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::raw(state.sync.views().status(StatusSlot::Results).to_string()),
        Span::raw(" | "),
        Span::styled(" ?:Help ", Style::default().fg(Color::DarkGray)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn details_fall_back_to_placeholder() {
        let d = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let mut item = Item::new("A", d, d, "X");
        assert_eq!(details_text(&item).len(), 1);

        item.organization_url = "https://example.org".to_string();
        item.region = Some("EU".to_string());
        assert_eq!(details_text(&item).len(), 2);
    }

    #[test]
    fn footer_summarizes_filters() {
        assert_eq!(filter_label(&Query::text("  ")), "all upcoming");

        let query = Query {
            text: " jazz ".to_string(),
            region: Some("EU".to_string()),
            date: NaiveDate::from_ymd_opt(2030, 2, 1),
            price: Some(PriceClass::Free),
        };
        assert_eq!(filter_label(&query), "\"jazz\" region:EU date:2030-02-01 Free");
    }

    #[test]
    fn cursor_stays_inside_the_input_box() {
        let area = Rect::new(0, 10, 40, 3);
        assert_eq!(cursor_column(area, 1, 0), 2);
        assert_eq!(cursor_column(area, 0, 5), 6);
        assert_eq!(cursor_column(area, 1, 70_000), 38);
    }
}
