//! Minimax Chess Engine
//!
//! Fixed-depth alpha-beta search over a mutable position:
//! - Material + piece-square + mobility evaluation, White-relative
//! - Capture / promotion / check move ordering
//! - Transposition cache keyed on (position, remaining depth, side to move)
//!
//! No iterative deepening, quiescence or time management: a search runs to
//! completion for the depth it was given.

mod cache;
mod config;
mod eval;
mod ordering;
mod pst;
mod search;

use chess_core::{Engine, Game, SearchResult};
use tracing::debug;

pub use cache::{Bound, CacheEntry, CacheKey, TranspositionCache};
pub use config::{CacheConfig, CachePolicy, ConfigError, SearchConfig, DEFAULT_DEPTH};
pub use eval::{evaluate, piece_square_value, piece_value, DRAW_SCORE, MATE_SCORE};
pub use ordering::{gives_check, move_order_score, order_moves};
pub use search::{SearchStats, Searcher, INFINITY, MAXIMIZING_SIDE};

/// Chess engine wrapping a [`Searcher`] behind the [`Engine`] trait.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    searcher: Searcher,
    config: SearchConfig,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Depth used by callers that do not pick one.
    pub fn default_depth(&self) -> u8 {
        self.config.depth
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn searcher_mut(&mut self) -> &mut Searcher {
        &mut self.searcher
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult {
        self.searcher.best_move(game, depth)
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.searcher.clear_cache();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "depth" => match value.parse::<u8>() {
                Ok(depth) if depth >= 1 => {
                    self.config.depth = depth;
                    true
                }
                _ => false,
            },
            "cachepolicy" => {
                let policy = match value.to_ascii_lowercase().as_str() {
                    "persistent" => CachePolicy::Persistent,
                    "per-search" | "persearch" => CachePolicy::PerSearch,
                    _ => return false,
                };
                self.config.cache.policy = policy;
                self.searcher.set_cache_policy(policy);
                true
            }
            "cachemaxentries" => {
                let max_entries = match value.parse::<usize>() {
                    Ok(0) => None,
                    Ok(n) => Some(n),
                    Err(_) => return false,
                };
                self.config.cache.max_entries = max_entries;
                self.searcher.set_cache_max_entries(max_entries);
                true
            }
            _ => {
                debug!(name, value, "unknown option");
                false
            }
        }
    }
}
