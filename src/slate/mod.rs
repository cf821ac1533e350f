mod game;
mod slate_file;
mod team_stats;

pub use game::{AmericanOdds, Game, GameKey, MarketRecord, RestDays};
pub use slate_file::Slate;
pub use team_stats::{TeamStatRow, TeamStats};
