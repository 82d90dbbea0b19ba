//! Self-play framework for 2048.
//!
//! A learning [`Player`] and a stochastic [`Environment`] take turns on a
//! 4x4 [`Board`]. Each game is recorded as an [`Episode`], and a
//! [`Statistic`] keeps a bounded history of them, reports block
//! aggregates, and round-trips the whole run through a line-oriented
//! text format. Learned values live in flat [`Weight`] tables.
//!
//! ## Architecture
//!
//! - [`Board`]: tile ranks and the slide/place transition model
//! - [`Action`]: slide or place, with a stable two-character encoding
//! - [`Agent`]: capability trait for anything that can take a turn
//! - [`Episode`]: one game with its board, move records and turn order
//! - [`Statistic`]: bounded episode history, reports, persistence
//! - [`Arena`]: drives two agents through episodes of a statistic
pub mod action;
pub mod agent;
pub mod arena;
pub mod board;
pub mod config;
pub mod cursor;
pub mod environment;
pub mod episode;
pub mod error;
pub mod player;
pub mod report;
pub mod statistic;
pub mod tuple;
pub mod weight;

pub use action::*;
pub use agent::*;
pub use arena::*;
pub use board::*;
pub use config::*;
pub use cursor::*;
pub use environment::*;
pub use episode::*;
pub use error::*;
pub use player::*;
pub use report::*;
pub use statistic::*;
pub use tuple::*;
pub use weight::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Tile exponent. A cell of rank r shows 2^r; rank 0 is empty.
pub type Rank = u8;
/// Points earned by a single action.
pub type Reward = u32;
/// Running sum of rewards over an episode.
pub type Score = u64;
/// Wall-clock milliseconds since the unix epoch, or a duration thereof.
pub type Millis = u64;

// ============================================================================
// BOARD PARAMETERS
// ============================================================================
/// Side length of the board.
pub const SIDE: usize = 4;
/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;
/// Exclusive upper bound on encodable tile ranks.
pub const RANKS: usize = 36;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Displayed tile value of a rank. Rank 0 (empty) shows as 0.
pub const fn value(rank: Rank) -> u64 {
    (1u64 << rank) & !1
}

/// Wall-clock time in milliseconds.
pub fn millis() -> Millis {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Millis)
        .unwrap_or_default()
}

/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    if simplelog::CombinedLogger::init(vec![term]).is_err() {
        log::warn!("logger already initialized");
    }
}
