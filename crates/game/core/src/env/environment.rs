//! Environment tiers and their modifier table.
//!
//! The world layer hands combat a degradation tier for the zone the
//! encounter happens in. Content supplies one row of deltas per tier; every
//! delta favours the adversaries.

use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Degradation level of the encounter's surrounding zone, least hostile first.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnvironmentTier {
    #[default]
    Stable,
    Contested,
    Breached,
}

/// Additive deltas applied to adversary power, defense, and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentModifiers {
    pub power_delta: i32,
    pub defense_delta: i32,
    pub health_delta: i32,
}

impl EnvironmentModifiers {
    pub const NONE: Self = Self::new(0, 0, 0);

    pub const fn new(power_delta: i32, defense_delta: i32, health_delta: i32) -> Self {
        Self {
            power_delta,
            defense_delta,
            health_delta,
        }
    }

    /// True when every delta is at least the corresponding delta of `other`.
    pub fn dominates(&self, other: &Self) -> bool {
        self.power_delta >= other.power_delta
            && self.defense_delta >= other.defense_delta
            && self.health_delta >= other.health_delta
    }
}

/// Content-supplied modifier rows, one per tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentTable {
    pub stable: EnvironmentModifiers,
    pub contested: EnvironmentModifiers,
    pub breached: EnvironmentModifiers,
}

impl EnvironmentTable {
    pub const fn new(
        stable: EnvironmentModifiers,
        contested: EnvironmentModifiers,
        breached: EnvironmentModifiers,
    ) -> Self {
        Self {
            stable,
            contested,
            breached,
        }
    }

    /// Looks up the row for a tier.
    pub fn row(&self, tier: EnvironmentTier) -> EnvironmentModifiers {
        match tier {
            EnvironmentTier::Stable => self.stable,
            EnvironmentTier::Contested => self.contested,
            EnvironmentTier::Breached => self.breached,
        }
    }

    /// Checks that each tier dominates the one before it.
    ///
    /// Content tables are validated upstream; this is exposed for tooling and
    /// tests that want to assert the property on a loaded table.
    pub fn is_monotonic(&self) -> bool {
        let rows: Vec<EnvironmentModifiers> = EnvironmentTier::iter().map(|t| self.row(t)).collect();
        rows.windows(2).all(|pair| pair[1].dominates(&pair[0]))
    }
}

impl Default for EnvironmentTable {
    fn default() -> Self {
        Self::new(
            EnvironmentModifiers::NONE,
            EnvironmentModifiers::new(1, 1, 2),
            EnvironmentModifiers::new(2, 2, 5),
        )
    }
}
