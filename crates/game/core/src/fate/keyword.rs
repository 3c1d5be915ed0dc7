//! Keyword resolution.
//!
//! Pure mapping from (keyword, action context, suit match) to an effect
//! descriptor. Every keyword has an effect in every context; the context only
//! decides which field of the descriptor it lands in:
//!
//! | keyword | offense contexts       | defense context |
//! |---------|------------------------|-----------------|
//! | Surge   | `surge` (extra amount) | `block`         |
//! | Pierce  | `pierce`               | `block`         |
//! | Focus   | `floor`                | `block`         |
//! | Ward    | `guard` (player guard) | `block`         |
//! | Echo    | repeats previous card  | repeats previous card |
//!
//! The suit-match asymmetry comes from [`KeywordTable::scale`].

use super::{FateCard, FateDraw, Keyword};
use crate::env::KeywordTable;

/// What the drawing side is doing when the card is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionContext {
    PhysicalOffense,
    SpiritualOffense,
    Defense,
}

impl ActionContext {
    pub const fn is_offense(self) -> bool {
        matches!(self, Self::PhysicalOffense | Self::SpiritualOffense)
    }
}

/// Numeric contribution of one resolved keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordEffect {
    /// Added to the strike amount.
    pub surge: u32,
    /// Subtracted from the target's defense before it applies.
    pub pierce: u32,
    /// Minimum amount the strike deals.
    pub floor: u32,
    /// Subtracted from incoming damage.
    pub block: u32,
    /// Added to the player's defense bonus for the round.
    pub guard: u32,
}

impl KeywordEffect {
    pub const NONE: Self = Self {
        surge: 0,
        pierce: 0,
        floor: 0,
        block: 0,
        guard: 0,
    };

    /// Overall size of the effect, used to compare resolutions.
    pub fn magnitude(&self) -> u32 {
        self.surge
            .saturating_add(self.pierce)
            .saturating_add(self.floor)
            .saturating_add(self.block)
            .saturating_add(self.guard)
    }
}

/// Resolves a single keyword.
pub fn resolve(
    keyword: Keyword,
    context: ActionContext,
    suit_matches: bool,
    table: &KeywordTable,
) -> KeywordEffect {
    let amount = table.scale(table.magnitude(keyword), suit_matches);
    if amount == 0 {
        return KeywordEffect::NONE;
    }

    let mut effect = KeywordEffect::NONE;
    if !context.is_offense() {
        if keyword != Keyword::Echo {
            effect.block = amount;
        }
        return effect;
    }

    match keyword {
        Keyword::Surge => effect.surge = amount,
        Keyword::Pierce => effect.pierce = amount,
        Keyword::Focus => effect.floor = amount,
        Keyword::Ward => effect.guard = amount,
        Keyword::Echo => {}
    }
    effect
}

/// Resolves one card against a context using the card's own suit.
pub fn resolve_card(card: &FateCard, context: ActionContext, table: &KeywordTable) -> KeywordEffect {
    resolve(card.keyword, context, card.suit.matches(context), table)
}

/// Resolves a full draw, following an Echo to the card it repeats.
///
/// An Echo with nothing to repeat resolves to no effect. The deck never
/// echoes another Echo.
pub fn resolve_draw(draw: &FateDraw, context: ActionContext, table: &KeywordTable) -> KeywordEffect {
    match (draw.card.keyword, draw.echoed) {
        (Keyword::Echo, Some(previous)) => resolve_card(&previous, context, table),
        (Keyword::Echo, None) => KeywordEffect::NONE,
        _ => resolve_card(&draw.card, context, table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fate::Suit;

    const CONTEXTS: [ActionContext; 3] = [
        ActionContext::PhysicalOffense,
        ActionContext::SpiritualOffense,
        ActionContext::Defense,
    ];

    #[test]
    fn matched_surge_doubles() {
        let table = KeywordTable::default();
        let effect = resolve(Keyword::Surge, ActionContext::PhysicalOffense, true, &table);
        assert_eq!(effect.surge, 4);
        let effect = resolve(Keyword::Surge, ActionContext::PhysicalOffense, false, &table);
        assert_eq!(effect.surge, 1);
    }

    #[test]
    fn mismatched_small_magnitude_is_nullified() {
        let table = KeywordTable::default();
        let effect = resolve(Keyword::Focus, ActionContext::SpiritualOffense, false, &table);
        assert_eq!(effect, KeywordEffect::NONE);
        let effect = resolve(Keyword::Focus, ActionContext::SpiritualOffense, true, &table);
        assert_eq!(effect.floor, 2);
    }

    #[test]
    fn defense_context_turns_everything_into_block() {
        let table = KeywordTable::default();
        for keyword in [Keyword::Surge, Keyword::Pierce, Keyword::Ward, Keyword::Focus] {
            let effect = resolve(keyword, ActionContext::Defense, true, &table);
            assert_eq!(effect.block, table.magnitude(keyword) * 2);
            assert_eq!(effect.magnitude(), effect.block);
        }
    }

    #[test]
    fn ward_on_offense_raises_guard() {
        let table = KeywordTable::default();
        let effect = resolve(Keyword::Ward, ActionContext::PhysicalOffense, true, &table);
        assert_eq!(effect.guard, 4);
        assert_eq!(effect.surge, 0);
    }

    #[test]
    fn matching_context_strictly_beats_every_mismatch() {
        let table = KeywordTable::default();
        for keyword in [Keyword::Surge, Keyword::Pierce, Keyword::Ward, Keyword::Focus] {
            for suit in [Suit::Blade, Suit::Spirit, Suit::Shield] {
                let card = FateCard::new(keyword, suit, 0);
                let matched = resolve_card(&card, suit.aligned_context(), &table).magnitude();
                for context in CONTEXTS.iter().copied().filter(|c| *c != suit.aligned_context()) {
                    let mismatched = resolve_card(&card, context, &table).magnitude();
                    assert!(matched > mismatched, "{keyword} {suit} {context}");
                }
            }
        }
    }

    #[test]
    fn echo_resolves_previous_card() {
        let table = KeywordTable::default();
        let previous = FateCard::new(Keyword::Surge, Suit::Blade, 3);
        let draw = FateDraw {
            card: FateCard::new(Keyword::Echo, Suit::Spirit, 0),
            echoed: Some(previous),
            reshuffled: None,
        };
        let effect = resolve_draw(&draw, ActionContext::PhysicalOffense, &table);
        assert_eq!(effect.surge, 4);

        let lonely = FateDraw { echoed: None, ..draw };
        assert_eq!(
            resolve_draw(&lonely, ActionContext::PhysicalOffense, &table),
            KeywordEffect::NONE
        );
    }
}
