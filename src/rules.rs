//! Linking rules: one main habit tied to sub habits at a shared check-in frequency.

use crate::models::HabitId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Please select one main habit and at least one sub habit.")]
    MissingHabits,
    #[error("Frequency must be a positive number of days.")]
    NoFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyStrategy {
    #[default]
    Average,
    Gcd,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHabit {
    pub id: HabitId,
    pub frequency: u32,
    #[serde(default)]
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    #[serde(default)]
    pub main: Option<RuleHabit>,
    #[serde(default)]
    pub subs: Vec<RuleHabit>,
    #[serde(default)]
    pub strategy: FrequencyStrategy,
    #[serde(default)]
    pub custom_frequency: Option<u32>,
}

/// Payload the backend expects on `POST /habits/addRule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRequest {
    pub main_id: HabitId,
    pub sub_ids: Vec<HabitId>,
    pub frequency: u32,
    pub streak: u32,
}

/// Rounded mean or GCD of the selected frequencies, or the custom value.
pub fn derive_frequency(
    strategy: FrequencyStrategy,
    frequencies: &[u32],
    custom: Option<u32>,
) -> Option<u32> {
    let derived = match strategy {
        FrequencyStrategy::Custom => custom?,
        _ if frequencies.is_empty() => return None,
        FrequencyStrategy::Average => {
            let count = frequencies.len() as u64;
            let sum: u64 = frequencies.iter().map(|f| u64::from(*f)).sum();
            // Halves round up.
            u32::try_from((sum + count / 2) / count).ok()?
        }
        FrequencyStrategy::Gcd => frequencies.iter().copied().fold(0, gcd),
    };
    (derived > 0).then_some(derived)
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl RuleDraft {
    pub fn build(&self) -> Result<RuleRequest, RuleError> {
        let main = self.main.ok_or(RuleError::MissingHabits)?;
        if self.subs.is_empty() {
            return Err(RuleError::MissingHabits);
        }

        let selected: Vec<RuleHabit> = std::iter::once(main).chain(self.subs.iter().copied()).collect();
        let frequencies: Vec<u32> = selected.iter().map(|habit| habit.frequency).collect();
        let frequency = derive_frequency(self.strategy, &frequencies, self.custom_frequency)
            .ok_or(RuleError::NoFrequency)?;
        let streak = selected.iter().map(|habit| habit.streak).max().unwrap_or(0);

        Ok(RuleRequest {
            main_id: main.id,
            sub_ids: self.subs.iter().map(|habit| habit.id).collect(),
            frequency,
            streak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: HabitId, frequency: u32, streak: u32) -> RuleHabit {
        RuleHabit {
            id,
            frequency,
            streak,
        }
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(derive_frequency(FrequencyStrategy::Average, &[1, 2], None), Some(2));
        assert_eq!(derive_frequency(FrequencyStrategy::Average, &[2, 3, 3], None), Some(3));
        assert_eq!(derive_frequency(FrequencyStrategy::Average, &[1, 1, 2], None), Some(1));
        assert_eq!(derive_frequency(FrequencyStrategy::Average, &[], None), None);
    }

    #[test]
    fn gcd_of_selected_frequencies() {
        assert_eq!(derive_frequency(FrequencyStrategy::Gcd, &[12, 18, 30], None), Some(6));
        assert_eq!(derive_frequency(FrequencyStrategy::Gcd, &[7, 5], None), Some(1));
        assert_eq!(derive_frequency(FrequencyStrategy::Gcd, &[0, 0], None), None);
    }

    #[test]
    fn custom_ignores_selection() {
        assert_eq!(derive_frequency(FrequencyStrategy::Custom, &[3, 6], Some(10)), Some(10));
        assert_eq!(derive_frequency(FrequencyStrategy::Custom, &[3, 6], None), None);
        assert_eq!(derive_frequency(FrequencyStrategy::Custom, &[3, 6], Some(0)), None);
    }

    #[test]
    fn build_takes_largest_streak() {
        let draft = RuleDraft {
            main: Some(habit(1, 2, 4)),
            subs: vec![habit(2, 4, 9), habit(3, 6, 1)],
            strategy: FrequencyStrategy::Gcd,
            custom_frequency: None,
        };
        let rule = draft.build().unwrap();
        assert_eq!(
            rule,
            RuleRequest {
                main_id: 1,
                sub_ids: vec![2, 3],
                frequency: 2,
                streak: 9,
            }
        );
        let wire = serde_json::to_value(&rule).unwrap();
        assert_eq!(wire["mainId"], 1);
        assert_eq!(wire["subIds"], serde_json::json!([2, 3]));
    }

    #[test]
    fn build_requires_main_and_sub() {
        let mut draft = RuleDraft {
            main: None,
            subs: vec![habit(2, 1, 0)],
            strategy: FrequencyStrategy::Average,
            custom_frequency: None,
        };
        assert_eq!(draft.build(), Err(RuleError::MissingHabits));

        draft.main = Some(habit(1, 1, 0));
        draft.subs.clear();
        assert_eq!(draft.build(), Err(RuleError::MissingHabits));

        draft.subs.push(habit(2, 1, 0));
        draft.strategy = FrequencyStrategy::Custom;
        assert_eq!(draft.build(), Err(RuleError::NoFrequency));
    }
}
