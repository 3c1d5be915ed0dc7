/// Compile-time capacities and defaults for the encounter core.
///
/// Balance numbers are content and live in [`crate::env::EncounterRules`];
/// this type only carries the structural limits the engine needs as const
/// generics plus the defaults used when content leaves a rule unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncounterConfig;

impl EncounterConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneous status effects on the player.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== content defaults =====
    pub const DEFAULT_SUMMON_CAP: u32 = 4;
    pub const DEFAULT_DEFEND_BONUS: u32 = 2;
    pub const DEFAULT_ACTION_COST: u32 = 1;
    pub const DEFAULT_FLEE_THRESHOLD: i32 = 3;
    pub const DEFAULT_FLEE_PUNISHMENT: u32 = 3;
    pub const DEFAULT_SACRIFICE_BUDGET_BONUS: u32 = 1;
    pub const DEFAULT_SACRIFICE_INTENT_BOOST: u32 = 2;
    pub const DEFAULT_MATCH_MULTIPLIER: u32 = 2;
    pub const DEFAULT_MISMATCH_DIVISOR: u32 = 2;
}
