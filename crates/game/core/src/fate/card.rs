use strum::{Display, EnumIter, IntoStaticStr};

use super::ActionContext;

/// Effect category printed on a fate card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    /// Amplifies the strike amount.
    Surge,
    /// Ignores part of the target's defense.
    Pierce,
    /// Blocks incoming damage; raises the player's guard when drawn on offense.
    Ward,
    /// Guarantees a minimum amount on offense.
    Focus,
    /// Repeats the previously drawn card.
    Echo,
}

/// Alignment tag printed on a fate card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Blade,
    Spirit,
    Shield,
}

impl Suit {
    /// The action context this suit is aligned with.
    pub const fn aligned_context(self) -> ActionContext {
        match self {
            Suit::Blade => ActionContext::PhysicalOffense,
            Suit::Spirit => ActionContext::SpiritualOffense,
            Suit::Shield => ActionContext::Defense,
        }
    }

    pub fn matches(self, context: ActionContext) -> bool {
        self.aligned_context() == context
    }
}

/// Immutable fate card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateCard {
    pub keyword: Keyword,
    pub suit: Suit,
    /// Base numeric modifier; read by flee checks.
    pub value: i32,
}

impl FateCard {
    pub const fn new(keyword: Keyword, suit: Suit, value: i32) -> Self {
        Self {
            keyword,
            suit,
            value,
        }
    }
}
