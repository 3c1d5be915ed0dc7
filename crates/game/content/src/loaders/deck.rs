//! Fate deck loader.

use std::path::Path;

use encounter_core::{FateCard, Keyword, Suit};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn one() -> u32 {
    1
}

/// A run of identical cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStack {
    pub keyword: Keyword,
    pub suit: Suit,
    pub value: i32,
    #[serde(default = "one")]
    pub copies: u32,
}

/// Deck structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FateDeckSpec {
    pub cards: Vec<CardStack>,
}

impl FateDeckSpec {
    /// Expands stacks into individual cards, in file order.
    pub fn expand(&self) -> Vec<FateCard> {
        self.cards
            .iter()
            .flat_map(|stack| {
                std::iter::repeat_n(
                    FateCard::new(stack.keyword, stack.suit, stack.value),
                    stack.copies as usize,
                )
            })
            .collect()
    }
}

/// Loader for fate decks from RON files.
pub struct FateDeckLoader;

impl FateDeckLoader {
    /// Load a deck from a RON file. The result is unshuffled; the engine
    /// shuffles it with the session stream.
    pub fn load(path: &Path) -> LoadResult<Vec<FateCard>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<FateCard>> {
        let spec: FateDeckSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse fate deck RON: {}", e))?;

        let cards = spec.expand();
        if cards.is_empty() {
            anyhow::bail!("Fate deck contains no cards");
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_copies() {
        let cards = FateDeckLoader::parse(
            r#"(cards: [
                (keyword: Surge, suit: Blade, value: 2, copies: 3),
                (keyword: Echo, suit: Spirit, value: 0),
            ])"#,
        )
        .expect("valid RON");

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0], FateCard::new(Keyword::Surge, Suit::Blade, 2));
        assert_eq!(cards[3].keyword, Keyword::Echo);
    }

    #[test]
    fn rejects_empty_deck() {
        assert!(FateDeckLoader::parse("(cards: [])").is_err());
        assert!(FateDeckLoader::parse("(cards: [(keyword: Ward, suit: Shield, value: 1, copies: 0)])").is_err());
    }
}
