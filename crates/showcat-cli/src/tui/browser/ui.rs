//! TUI rendering logic for the catalog browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};
use showcat_api::tvmaze::Show;
use showcat_catalog::{PageWindow, Section};

use super::state::{BrowserState, InputMode};

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search + filters
            Constraint::Min(5),    // main content
            Constraint::Length(3), // pagination
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    if state.details.current().is_some() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        draw_show_table(frame, panes[0], state);
        draw_detail_pane(frame, panes[1], state);
    } else {
        draw_show_table(frame, chunks[1], state);
    }

    draw_pagination(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);
}

/// Draws the search input and the filter summary.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.view.query().search.clone())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let genre = state.genre.selected().map_or("any", String::as_str);
    let rating = state
        .rating
        .selected()
        .map_or_else(|| String::from("any"), ToString::to_string);
    let mut spans = vec![Span::raw(format!(
        "genre: {genre}  rating: {rating}  ({} of {})",
        state.view.filtered_count(),
        state.view.catalog().shows.len(),
    ))];
    if state.view.catalog().is_partial() {
        spans.push(Span::styled(
            format!(
                "  partial: {} page(s) failed",
                state.view.catalog().failed_pages.len()
            ),
            Style::default().fg(Color::Red),
        ));
    }
    let filters = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters: g / r "),
    );
    frame.render_widget(filters, header_chunks[1]);
}

/// Draws the shows of the current page.
fn draw_show_table(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let header = Row::new(vec!["ID", "Name", "Rating", "Genres", "Premiered", "Status"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let open_id = state.details.selected_show();
    let rows: Vec<Row> = state
        .view
        .visible()
        .into_iter()
        .map(|show| {
            let style = if Some(show.id) == open_id {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![
                show.id.to_string(),
                show.name.clone(),
                fmt_rating(show),
                show.genres.join(", "),
                show.premiered.clone().unwrap_or_default(),
                show.status.clone().unwrap_or_default(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Shows "))
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Formats a show rating for the table.
fn fmt_rating(show: &Show) -> String {
    show.rating
        .map_or_else(|| String::from("-"), |r| format!("{r:.1}"))
}

/// Draws the seasons, cast, and crew of the open show.
fn draw_detail_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let Some(details) = state.details.current() else {
        return;
    };

    let title = state.detail_show().map_or_else(
        || format!(" Show {} ", details.ticket.show_id),
        |s| format!(" {} ({}) ", s.name, s.id),
    );

    let mut lines = Vec::new();
    section_lines(&mut lines, "Seasons", &details.seasons, |season| {
        let episodes = season
            .episode_order
            .map_or_else(|| String::from("?"), |n| n.to_string());
        format!(
            "  S{:02}  {episodes} episodes  {} ~ {}",
            season.number,
            season.premiere_date.as_deref().unwrap_or("-"),
            season.end_date.as_deref().unwrap_or("-"),
        )
    });
    lines.push(Line::default());
    section_lines(&mut lines, "Cast", &details.cast, |member| {
        format!("  {} as {}", member.person.name, member.character)
    });
    lines.push(Line::default());
    section_lines(&mut lines, "Crew", &details.crew, |member| {
        format!("  {}: {}", member.kind, member.person.name)
    });

    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(pane, area);
}

/// Appends a section heading and its body.
fn section_lines<T>(
    lines: &mut Vec<Line<'static>>,
    heading: &str,
    section: &Section<T>,
    fmt_item: impl Fn(&T) -> String,
) {
    let heading_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    match section {
        Section::Loading => {
            lines.push(Line::styled(String::from(heading), heading_style));
            lines.push(Line::from("  loading..."));
        }
        Section::Failed(failure) => {
            lines.push(Line::styled(String::from(heading), heading_style));
            lines.push(Line::styled(
                format!("  unavailable: {failure}"),
                Style::default().fg(Color::Red),
            ));
        }
        Section::Loaded(items) => {
            lines.push(Line::styled(
                format!("{heading} ({})", items.len()),
                heading_style,
            ));
            if items.is_empty() {
                lines.push(Line::from("  none"));
            }
            lines.extend(items.iter().map(|item| Line::from(fmt_item(item))));
        }
    }
}

/// Draws the pagination control.
fn draw_pagination(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let line = pagination_line(&state.view.window(), state.view.current_page());
    let title = format!(
        " Page {} / {} ",
        state.view.current_page(),
        state.view.total_pages()
    );
    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(bar, area);
}

/// Builds the page links: previous, first, window, last, next.
fn pagination_line(window: &PageWindow, current: u32) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let active = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut spans = Vec::new();
    spans.push(Span::styled(
        "\u{2039} prev ",
        if window.has_prev { Style::default() } else { dim },
    ));
    if let Some(first) = window.first {
        spans.push(Span::raw(format!(" {} ", first.page)));
        if first.ellipsis {
            spans.push(Span::styled(" \u{2026} ", dim));
        }
    }
    for page in window.pages() {
        let style = if page == current {
            active
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {page} "), style));
    }
    if let Some(last) = window.last {
        if last.ellipsis {
            spans.push(Span::styled(" \u{2026} ", dim));
        }
        spans.push(Span::raw(format!(" {} ", last.page)));
    }
    spans.push(Span::styled(
        " next \u{203a}",
        if window.has_next { Style::default() } else { dim },
    ));
    Line::from(spans)
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = match state.input_mode {
        InputMode::Search => Line::from("Type to search | Esc: clear | Enter: done"),
        InputMode::Normal => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  \u{2190}\u{2192}/PgUp/PgDn: page  Home/End: first/last  /: search  g/r: genre/rating  Enter: details  Esc: close  o: open  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
