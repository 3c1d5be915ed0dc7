use super::{AdversaryId, ResourceMeter};
use crate::env::IntentKind;

/// How an adversary left the fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// Health reached zero.
    Lethal,
    /// Will reached zero while health remained.
    NonLethal,
}

/// Declared next action of an adversary.
///
/// Revealed before the player acts and executed unchanged during
/// resolution. `empowerment` is the extra strength added by sacrifice side
/// costs after the reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub kind: IntentKind,
    pub empowerment: u32,
}

impl Intent {
    pub fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            empowerment: 0,
        }
    }
}

/// One adversary instance in the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Adversary {
    pub id: AdversaryId,
    /// Index of the definition in the session bestiary.
    pub definition: usize,
    pub name: String,
    /// Lethal track. The maximum already includes the environment delta.
    pub health: ResourceMeter,
    /// Non-lethal track; `None` means this adversary cannot be pacified.
    pub will: Option<ResourceMeter>,
    /// Base defense, before environment deltas.
    pub defense: u32,
    /// Base power, before environment deltas.
    pub power: u32,
    /// Intent for the current round; `None` before the reveal.
    pub intent: Option<Intent>,
    /// Defense gained this round; reset at round end.
    pub defense_bonus: u32,
    /// Next step of a cyclic behaviour pattern.
    pub pattern_cursor: u32,
    /// Set once the adversary becomes terminal.
    pub resolution: Option<Resolution>,
}

impl Adversary {
    /// True while the adversary can be targeted and acts.
    pub fn is_active(&self) -> bool {
        self.resolution.is_none()
    }

    pub fn can_be_pacified(&self) -> bool {
        self.will.is_some()
    }
}
