use std::time::Duration;

pub const TITLE: &str = " Trending GIFs ";
pub const LABEL_LOAD_MORE: &str = "[ Load More ]";
pub const LABEL_RETRY: &str = "[ Retry ]";
pub const LABEL_LOADING: &str = "Loading";
pub const LABEL_UNTITLED: &str = "(untitled)";
pub const KEY_HELP: &str = "j/k move  enter select  l load more  r retry  q quit";

pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Event poll timeout; also paces the spinner.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);
/// Rows moved by PageUp / PageDown.
pub const PAGE_JUMP: usize = 10;
