//! Draw and discard piles.
//!
//! The top of each pile is the **last** element of its vector. Cards only
//! ever move between the two piles; the total count never changes after the
//! deck is built.

use tracing::debug;

use super::{FateCard, Keyword};
use crate::env::RandomStream;

/// Result of one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FateDraw {
    /// Card taken from the draw pile (now on top of the discard pile).
    pub card: FateCard,
    /// Card repeated by an Echo draw. It has been returned to the top of the
    /// draw pile and will be the next card drawn. Never itself an Echo.
    pub echoed: Option<FateCard>,
    /// Number of cards shuffled back in before this draw, if a reshuffle happened.
    pub reshuffled: Option<u32>,
}

/// Ordered fate piles owned by a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateDeck {
    draw_pile: Vec<FateCard>,
    discard_pile: Vec<FateCard>,
}

impl FateDeck {
    /// Builds a deck and shuffles it with the session stream.
    pub fn shuffled(cards: Vec<FateCard>, rng: &mut RandomStream) -> Self {
        let mut draw_pile = cards;
        rng.shuffle(&mut draw_pile);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    /// Rebuilds a deck from exact pile contents (bottom first).
    pub fn from_piles(draw_pile: Vec<FateCard>, discard_pile: Vec<FateCard>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    pub fn draw_pile(&self) -> &[FateCard] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[FateCard] {
        &self.discard_pile
    }

    /// Total number of cards across both piles.
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draws the top card.
    ///
    /// An empty draw pile is refilled by shuffling the discard pile first;
    /// the reshuffle consumes the stream. Returns `None` only when the deck
    /// holds no cards at all.
    ///
    /// An Echo only takes back a non-Echo card, so every draw moves at least
    /// one card closer to the bottom of the draw pile.
    pub fn draw(&mut self, rng: &mut RandomStream) -> Option<FateDraw> {
        let reshuffled = if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return None;
            }
            Some(self.reshuffle(rng))
        } else {
            None
        };

        let card = self.draw_pile.pop()?;
        let echoed = match self.discard_pile.last() {
            Some(previous) if card.keyword == Keyword::Echo && previous.keyword != Keyword::Echo => {
                self.discard_pile.pop()
            }
            _ => None,
        };

        self.discard_pile.push(card);
        if let Some(previous) = echoed {
            self.draw_pile.push(previous);
        }

        debug!(
            keyword = %card.keyword,
            suit = %card.suit,
            value = card.value,
            echoed = echoed.is_some(),
            "fate card drawn"
        );

        Some(FateDraw {
            card,
            echoed,
            reshuffled,
        })
    }

    /// Moves the whole discard pile into the draw pile and shuffles it.
    fn reshuffle(&mut self, rng: &mut RandomStream) -> u32 {
        let mut cards = std::mem::take(&mut self.discard_pile);
        rng.shuffle(&mut cards);
        let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
        // Anything still in the draw pile stays on top of the fresh cards
        cards.append(&mut self.draw_pile);
        self.draw_pile = cards;
        debug!(count, "fate deck reshuffled");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fate::Suit;

    fn card(keyword: Keyword, value: i32) -> FateCard {
        FateCard::new(keyword, Suit::Blade, value)
    }

    #[test]
    fn draw_moves_card_to_discard() {
        let mut rng = RandomStream::from_seed(1);
        let mut deck = FateDeck::from_piles(vec![card(Keyword::Surge, 1), card(Keyword::Ward, 2)], vec![]);

        let draw = deck.draw(&mut rng).unwrap();
        assert_eq!(draw.card, card(Keyword::Ward, 2));
        assert_eq!(draw.reshuffled, None);
        assert_eq!(deck.draw_pile(), &[card(Keyword::Surge, 1)]);
        assert_eq!(deck.discard_pile(), &[card(Keyword::Ward, 2)]);
        assert_eq!(rng.position(), 0);
    }

    #[test]
    fn exhausted_pile_reshuffles_and_consumes_rng() {
        let mut rng = RandomStream::from_seed(3);
        let mut deck = FateDeck::from_piles(
            vec![],
            vec![card(Keyword::Surge, 1), card(Keyword::Pierce, 2), card(Keyword::Focus, 3)],
        );

        let draw = deck.draw(&mut rng).unwrap();
        assert_eq!(draw.reshuffled, Some(3));
        assert!(rng.position() > 0);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.draw_pile().len(), 2);
        assert_eq!(deck.discard_pile(), &[draw.card]);
    }

    #[test]
    fn echo_returns_previous_card_to_play() {
        let mut rng = RandomStream::from_seed(4);
        let surge = card(Keyword::Surge, 5);
        let echo = card(Keyword::Echo, 0);
        let filler = card(Keyword::Ward, 1);
        let mut deck = FateDeck::from_piles(vec![filler, echo, surge], vec![]);

        assert_eq!(deck.draw(&mut rng).unwrap().card, surge);
        let draw = deck.draw(&mut rng).unwrap();
        assert_eq!(draw.card, echo);
        assert_eq!(draw.echoed, Some(surge));
        assert_eq!(deck.discard_pile(), &[echo]);
        assert_eq!(deck.draw_pile(), &[filler, surge]);
        assert_eq!(deck.len(), 3);

        // The echoed card comes up next
        assert_eq!(deck.draw(&mut rng).unwrap().card, surge);
    }

    #[test]
    fn echo_with_empty_discard_repeats_nothing() {
        let mut rng = RandomStream::from_seed(4);
        let mut deck = FateDeck::from_piles(vec![card(Keyword::Echo, 0)], vec![]);
        let draw = deck.draw(&mut rng).unwrap();
        assert_eq!(draw.echoed, None);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn echo_never_returns_another_echo() {
        let mut rng = RandomStream::from_seed(2);
        let surge = card(Keyword::Surge, 3);
        let echo = card(Keyword::Echo, 0);
        let mut deck = FateDeck::from_piles(vec![surge, echo, echo], vec![]);

        let first = deck.draw(&mut rng).unwrap();
        assert_eq!(first.echoed, None);
        let second = deck.draw(&mut rng).unwrap();
        assert_eq!(second.card, echo);
        assert_eq!(second.echoed, None);
        assert_eq!(deck.draw_pile(), &[surge]);
        assert_eq!(deck.discard_pile(), &[echo, echo]);

        assert_eq!(deck.draw(&mut rng).unwrap().card, surge);
    }

    #[test]
    fn echo_heavy_deck_cycles_through_every_card() {
        let mut rng = RandomStream::from_seed(2);
        let cards = vec![
            card(Keyword::Surge, 1),
            card(Keyword::Echo, 0),
            card(Keyword::Pierce, 2),
            card(Keyword::Echo, 0),
        ];
        let mut deck = FateDeck::from_piles(cards, vec![]);

        let mut reshuffles = 0;
        let mut seen_surge = false;
        let mut seen_pierce = false;
        for _ in 0..40 {
            let draw = deck.draw(&mut rng).unwrap();
            if draw.reshuffled.is_some() {
                reshuffles += 1;
            }
            seen_surge |= draw.card.keyword == Keyword::Surge;
            seen_pierce |= draw.card.keyword == Keyword::Pierce;
            assert_eq!(deck.len(), 4);
        }
        assert!(reshuffles >= 3);
        assert!(seen_surge && seen_pierce);
    }

    #[test]
    fn empty_deck_yields_nothing() {
        let mut rng = RandomStream::from_seed(4);
        let mut deck = FateDeck::default();
        assert!(deck.draw(&mut rng).is_none());
    }

    #[test]
    fn shuffled_deck_is_deterministic() {
        let cards: Vec<FateCard> = (0..10).map(|v| card(Keyword::Surge, v)).collect();
        let a = FateDeck::shuffled(cards.clone(), &mut RandomStream::from_seed(11));
        let b = FateDeck::shuffled(cards, &mut RandomStream::from_seed(11));
        assert_eq!(a, b);
    }
}
