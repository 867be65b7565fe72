use chrono::{DateTime, Local};
use feed_core::{FeedViewModel, ScreenLayout, TrailingControl};
use feed_engine::EngineHandle;
use feed_logging::{feed_debug, feed_info};
use ratatui::crossterm::event::{self, Event};
use ratatui::widgets::ListState;
use ratatui::DefaultTerminal;

use super::input::{map_key, UiAction};
use super::ui;
use super::ui::constants::{PAGE_JUMP, TICK_INTERVAL};
use crate::config::AppConfig;

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    feed_info!(
        "starting feed: base_url={} page_size={}",
        config.fetch.base_url,
        config.page_size
    );
    let mut engine = EngineHandle::new(config.fetch, config.api_key, config.page_size)?;
    let mut screen = FeedScreen::awaiting_first_page(engine.snapshot());

    let mut terminal = ratatui::init();
    let result = screen.run(&mut terminal, &mut engine);
    ratatui::restore();

    engine.shutdown();
    feed_info!("feed screen closed with {} items", screen.view.items.len());
    result
}

/// UI-side state of the feed screen: the latest snapshot plus selection.
pub struct FeedScreen {
    pub(crate) view: FeedViewModel,
    pub(crate) list_state: ListState,
    pub(crate) tick: usize,
    pub(crate) last_page_at: Option<DateTime<Local>>,
    should_quit: bool,
}

impl FeedScreen {
    pub fn new(view: FeedViewModel) -> Self {
        Self {
            view,
            list_state: ListState::default().with_selected(Some(0)),
            tick: 0,
            last_page_at: None,
            should_quit: false,
        }
    }

    /// Screen for startup: the first page is requested before the first frame,
    /// so it is drawn as loading until the engine's own snapshot arrives.
    pub fn awaiting_first_page(view: FeedViewModel) -> Self {
        let view = FeedViewModel {
            loading: true,
            layout: ScreenLayout::for_state(view.items.is_empty(), true),
            trailing: TrailingControl::for_state(true, view.failed),
            ..view
        };
        Self::new(view)
    }

    fn run(&mut self, terminal: &mut DefaultTerminal, engine: &mut EngineHandle) -> anyhow::Result<()> {
        engine.advance();

        while !self.should_quit {
            if let Some(view) = engine.try_recv() {
                self.apply_snapshot(view, Local::now());
            }
            terminal.draw(|frame| ui::render::render(frame, self))?;

            if event::poll(TICK_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(action) = map_key(key) {
                        if self.handle_action(action) {
                            engine.advance();
                        }
                    }
                }
            }
            self.tick = self.tick.wrapping_add(1);
        }
        Ok(())
    }

    /// Take a new snapshot from the engine.
    pub fn apply_snapshot(&mut self, view: FeedViewModel, now: DateTime<Local>) {
        let settled_ok = self.view.loading && !view.loading && !view.failed;
        if view.cursor != self.view.cursor || settled_ok {
            self.last_page_at = Some(now);
        }
        self.view = view;
        let last = self.last_row();
        if self.selected() > last {
            self.list_state.select(Some(last));
        }
    }

    /// Apply a key action. Returns true when the engine should advance.
    pub fn handle_action(&mut self, action: UiAction) -> bool {
        let last = self.last_row();
        let selected = self.selected();
        match action {
            UiAction::Quit => {
                self.should_quit = true;
                false
            }
            UiAction::Up => self.select(selected.saturating_sub(1)),
            UiAction::PageUp => self.select(selected.saturating_sub(PAGE_JUMP)),
            UiAction::Home => self.select(0),
            UiAction::Down => self.select((selected + 1).min(last)),
            UiAction::PageDown => self.select((selected + PAGE_JUMP).min(last)),
            UiAction::End => self.select(last),
            UiAction::Activate => selected == last && self.view.trailing.requests_advance(),
            UiAction::Advance => self.view.trailing.requests_advance(),
        }
    }

    pub(crate) fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Index of the trailing control row.
    pub(crate) fn last_row(&self) -> usize {
        self.view.items.len()
    }

    /// Scrolling onto a load-more control counts as asking for the next
    /// page; a retry control still needs an explicit press.
    fn select(&mut self, row: usize) -> bool {
        let moved = row != self.selected();
        self.list_state.select(Some(row));
        let reached_end = moved
            && row == self.last_row()
            && self.view.layout == ScreenLayout::List
            && self.view.trailing == TrailingControl::LoadMore;
        if reached_end {
            feed_debug!("selection reached the end of {} items", self.view.items.len());
        }
        reached_end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use feed_core::FeedItem;

    use super::*;

    fn view(count: usize, loading: bool, failed: bool) -> FeedViewModel {
        let items: Vec<_> = (0..count)
            .map(|i| FeedItem {
                id: i.to_string(),
                title: format!("gif {i}"),
                image_url: format!("https://media.example.com/{i}.gif"),
            })
            .collect();
        FeedViewModel {
            layout: ScreenLayout::for_state(items.is_empty(), loading),
            trailing: TrailingControl::for_state(loading, failed),
            cursor: count as u64,
            items,
            loading,
            failed,
            ..FeedViewModel::default()
        }
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn scrolling_onto_load_more_requests_next_page() {
        let mut screen = FeedScreen::new(view(3, false, false));
        assert!(!screen.handle_action(UiAction::Down));
        assert!(!screen.handle_action(UiAction::Down));
        assert!(screen.handle_action(UiAction::Down));
        assert_eq!(screen.selected(), 3);
        // Already on the trailing row: no second request.
        assert!(!screen.handle_action(UiAction::Down));
    }

    #[test]
    fn scrolling_onto_retry_does_not_request() {
        let mut screen = FeedScreen::new(view(2, false, true));
        assert!(!screen.handle_action(UiAction::End));
        assert_eq!(screen.selected(), 2);
        assert!(screen.handle_action(UiAction::Activate));
    }

    #[test]
    fn activate_only_reacts_on_trailing_row() {
        let mut screen = FeedScreen::new(view(2, false, false));
        assert!(!screen.handle_action(UiAction::Activate));
        screen.handle_action(UiAction::End);
        assert!(screen.handle_action(UiAction::Activate));
    }

    #[test]
    fn nothing_is_requested_while_loading() {
        let mut screen = FeedScreen::new(view(2, true, false));
        assert!(!screen.handle_action(UiAction::End));
        assert!(!screen.handle_action(UiAction::Activate));
        assert!(!screen.handle_action(UiAction::Advance));
    }

    #[test]
    fn advance_key_works_from_any_row() {
        let mut screen = FeedScreen::new(view(5, false, true));
        assert_eq!(screen.selected(), 0);
        assert!(screen.handle_action(UiAction::Advance));
    }

    #[test]
    fn page_moves_are_clamped() {
        let mut screen = FeedScreen::new(view(4, false, false));
        assert!(screen.handle_action(UiAction::PageDown));
        assert_eq!(screen.selected(), 4);
        screen.handle_action(UiAction::PageUp);
        assert_eq!(screen.selected(), 0);
    }

    #[test]
    fn empty_feed_selects_trailing_row() {
        let mut screen = FeedScreen::new(view(0, false, false));
        assert_eq!(screen.selected(), screen.last_row());
        assert!(screen.handle_action(UiAction::Activate));
    }

    #[test]
    fn quit_sets_flag() {
        let mut screen = FeedScreen::new(view(0, false, false));
        assert!(!screen.handle_action(UiAction::Quit));
        assert!(screen.should_quit);
    }

    #[test]
    fn snapshot_with_new_items_records_time() {
        let mut screen = FeedScreen::new(view(0, true, false));
        screen.apply_snapshot(view(10, false, false), noon());
        assert_eq!(screen.last_page_at, Some(noon()));
    }

    #[test]
    fn failed_snapshot_does_not_record_time() {
        let mut screen = FeedScreen::new(view(0, true, false));
        screen.apply_snapshot(view(0, false, true), noon());
        assert_eq!(screen.last_page_at, None);
    }

    #[test]
    fn startup_screen_shows_first_load_spinner() {
        let mut screen = FeedScreen::awaiting_first_page(FeedViewModel::default());
        assert!(screen.view.loading);
        assert_eq!(screen.view.layout, ScreenLayout::CenteredSpinner);
        assert_eq!(screen.view.trailing, TrailingControl::Spinner);
        assert!(!screen.handle_action(UiAction::Activate));
        assert!(!screen.handle_action(UiAction::Advance));
    }

    #[test]
    fn fast_first_page_after_startup_records_time() {
        let mut screen = FeedScreen::awaiting_first_page(FeedViewModel::default());
        screen.apply_snapshot(view(10, false, false), noon());
        assert_eq!(screen.view.layout, ScreenLayout::List);
        assert_eq!(screen.last_page_at, Some(noon()));
    }

    #[test]
    fn selection_is_clamped_when_snapshot_shrinks_rows() {
        let mut screen = FeedScreen::new(view(5, false, false));
        screen.handle_action(UiAction::End);
        screen.apply_snapshot(view(2, false, false), noon());
        assert_eq!(screen.selected(), 2);
    }
}
