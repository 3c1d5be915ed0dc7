//! Fate deck and keyword resolution.
//!
//! - `card`: immutable card definitions (keyword, suit, value)
//! - `deck`: draw/discard piles driven by the session's random stream
//! - `keyword`: pure keyword resolver with the suit-match asymmetry
mod card;
mod deck;
pub mod keyword;

pub use card::{FateCard, Keyword, Suit};
pub use deck::{FateDeck, FateDraw};
pub use keyword::{ActionContext, KeywordEffect, resolve, resolve_card, resolve_draw};
