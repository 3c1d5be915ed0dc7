//! Strike amount calculation.

use crate::fate::KeywordEffect;

/// Every input to one strike.
///
/// ```text
/// raw    = base + power_delta + dealt_delta + taken_delta + surge
///          - max(0, defense - pierce) - block
/// amount = max(max(0, raw), floor)
/// ```
///
/// All deltas are summed before the single clamp, so the order in which
/// environment and status layers were consulted cannot change the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrikeInput {
    /// Attacker's base power or influence, plus any empowerment.
    pub base: u32,
    /// Environment power delta.
    pub power_delta: i32,
    /// Attacker's damage-dealt status sum.
    pub dealt_delta: i32,
    /// Defender's damage-taken status sum.
    pub taken_delta: i32,
    /// Defender's total defense.
    pub defense: u32,
    pub keyword: KeywordEffect,
}

/// Final amount of a strike. Never negative.
pub fn effective_amount(input: &StrikeInput) -> u32 {
    let mitigation = i64::from(input.defense.saturating_sub(input.keyword.pierce));
    let raw = i64::from(input.base)
        + i64::from(input.power_delta)
        + i64::from(input.dealt_delta)
        + i64::from(input.taken_delta)
        + i64::from(input.keyword.surge)
        - mitigation
        - i64::from(input.keyword.block);

    let clamped = u32::try_from(raw.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
    clamped.max(input.keyword.floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_dealt_status_reduces_base() {
        let input = StrikeInput {
            base: 5,
            dealt_delta: -1,
            ..StrikeInput::default()
        };
        assert_eq!(effective_amount(&input), 4);
    }

    #[test]
    fn heavy_mitigation_clamps_to_zero() {
        let input = StrikeInput {
            base: 2,
            defense: 9,
            taken_delta: -3,
            ..StrikeInput::default()
        };
        assert_eq!(effective_amount(&input), 0);
    }

    #[test]
    fn pierce_cannot_make_defense_negative() {
        let input = StrikeInput {
            base: 3,
            defense: 1,
            keyword: KeywordEffect {
                pierce: 4,
                ..KeywordEffect::NONE
            },
            ..StrikeInput::default()
        };
        assert_eq!(effective_amount(&input), 3);
    }

    #[test]
    fn focus_floor_lifts_a_blocked_strike() {
        let input = StrikeInput {
            base: 1,
            defense: 6,
            keyword: KeywordEffect {
                floor: 2,
                ..KeywordEffect::NONE
            },
            ..StrikeInput::default()
        };
        assert_eq!(effective_amount(&input), 2);
    }

    #[test]
    fn layer_order_does_not_matter() {
        let env_first = StrikeInput {
            base: 4,
            power_delta: 2,
            dealt_delta: -7,
            ..StrikeInput::default()
        };
        let status_first = StrikeInput {
            base: 4,
            power_delta: -7,
            dealt_delta: 2,
            ..StrikeInput::default()
        };
        assert_eq!(effective_amount(&env_first), effective_amount(&status_first));
        assert_eq!(effective_amount(&env_first), 0);
    }
}
