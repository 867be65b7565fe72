use feed_core::{FeedItem, FeedViewModel, ScreenLayout, TrailingControl};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use super::constants::*;
use super::layout;
use crate::platform::app::FeedScreen;

pub fn render(frame: &mut Frame, screen: &mut FeedScreen) {
    let areas = layout::split(frame.area());

    frame.render_widget(Paragraph::new(header_line(&screen.view)), areas.header);

    match screen.view.layout {
        ScreenLayout::CenteredSpinner => render_first_load(frame, areas.body, screen.tick),
        ScreenLayout::List => render_list(frame, areas.body, screen),
    }

    frame.render_widget(Paragraph::new(footer_line(screen)), areas.footer);
}

pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

fn header_line(view: &FeedViewModel) -> Line<'static> {
    let mut count = match view.total_count {
        Some(total) => format!(" {} of {} loaded", view.cursor, format_with_commas(total)),
        None => format!(" {} loaded", view.cursor),
    };
    if let Some(received) = view.last_page_len {
        count.push_str(&format!(" (+{received})"));
    }
    Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(Color::Gray)),
    ])
}

fn render_first_load(frame: &mut Frame, area: Rect, tick: usize) {
    let text = format!("{} {}", spinner_char(tick), LABEL_LOADING);
    let width = text.chars().count() as u16;
    let spinner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(spinner, layout::centered(area, width, 1));
}

fn render_list(frame: &mut Frame, area: Rect, screen: &mut FeedScreen) {
    let mut rows: Vec<ListItem> = screen
        .view
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| ListItem::new(item_line(index, item)))
        .collect();
    rows.push(ListItem::new(trailing_line(screen.view.trailing, screen.tick)));

    let list = List::new(rows).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, area, &mut screen.list_state);
}

fn item_line(index: usize, item: &FeedItem) -> Line<'_> {
    let title = if item.title.trim().is_empty() {
        LABEL_UNTITLED
    } else {
        item.title.as_str()
    };
    Line::from(vec![
        Span::styled(format!("{:>4}  ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::raw(title),
        Span::raw("  "),
        Span::styled(item.image_url.as_str(), Style::default().fg(Color::Blue)),
    ])
}

fn trailing_line(control: TrailingControl, tick: usize) -> Line<'static> {
    let line = match control {
        TrailingControl::Spinner => Line::from(Span::styled(
            format!("{} {}", spinner_char(tick), LABEL_LOADING),
            Style::default().fg(Color::Cyan),
        )),
        TrailingControl::Retry => Line::from(Span::styled(
            LABEL_RETRY,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TrailingControl::LoadMore => Line::from(Span::styled(
            LABEL_LOAD_MORE,
            Style::default().fg(Color::Green),
        )),
    };
    line.alignment(Alignment::Center)
}

fn footer_line(screen: &FeedScreen) -> Line<'static> {
    let mut text = KEY_HELP.to_string();
    if let Some(at) = screen.last_page_at {
        text.push_str(&format!("  |  updated {}", at.format("%H:%M:%S")));
    }
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
