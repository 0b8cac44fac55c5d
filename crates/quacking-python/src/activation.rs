//! Activation predicates: whether a rule fires at a given line.
//!
//! The host owns enable/disable state. The checker only asks, once per
//! visited node, through the [`Activation`] trait. [`ActivationPolicy`] is a
//! ready-made, serde-configurable implementation for hosts that keep their
//! disable state as plain data.

use std::collections::{BTreeMap, BTreeSet};

use quacking_core::error::{QuackingError, QuackingResult};
use quacking_core::message::QUACKING;
use serde::{Deserialize, Serialize};

/// Decides whether a rule is active at a source line.
pub trait Activation {
    fn is_active(&self, rule_id: &str, line: u32) -> bool;
}

impl<A: Activation + ?Sized> Activation for &A {
    fn is_active(&self, rule_id: &str, line: u32) -> bool {
        (**self).is_active(rule_id, line)
    }
}

/// Every rule is active everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysActive;

impl Activation for AlwaysActive {
    fn is_active(&self, _rule_id: &str, _line: u32) -> bool {
        true
    }
}

/// Adapts a closure into an [`Activation`].
#[derive(Debug, Clone, Copy)]
pub struct ActivationFn<F>(pub F);

impl<F> Activation for ActivationFn<F>
where
    F: Fn(&str, u32) -> bool,
{
    fn is_active(&self, rule_id: &str, line: u32) -> bool {
        (self.0)(rule_id, line)
    }
}

// ============================================================================
// Activation Policy
// ============================================================================

/// Inclusive range of disabled lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn contains(&self, line: u32) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// Enable/disable state for rules, keyed by symbol or msgid.
///
/// ```json
/// {
///   "disabled": ["E3107"],
///   "disabled_lines": { "no-type-hints": [{ "start": 3, "end": 7 }] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationPolicy {
    /// Rules disabled for the whole file.
    pub disabled: BTreeSet<String>,
    /// Rules disabled for ranges of lines.
    pub disabled_lines: BTreeMap<String, Vec<LineRange>>,
}

impl ActivationPolicy {
    /// Decode and validate a policy from JSON.
    pub fn from_json(json: &str) -> QuackingResult<Self> {
        let policy: ActivationPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Disable a rule for the whole file.
    pub fn disable(&mut self, key: impl Into<String>) {
        self.disabled.insert(key.into());
    }

    /// Disable a rule for lines `start..=end`.
    pub fn disable_lines(
        &mut self,
        key: impl Into<String>,
        start: u32,
        end: u32,
    ) -> QuackingResult<()> {
        let key = key.into();
        let range = LineRange { start, end };
        check_range(&key, &range)?;
        self.disabled_lines.entry(key).or_default().push(range);
        Ok(())
    }

    /// Reject inverted line ranges.
    pub fn validate(&self) -> QuackingResult<()> {
        for (key, ranges) in &self.disabled_lines {
            for range in ranges {
                check_range(key, range)?;
            }
        }
        Ok(())
    }
}

fn check_range(key: &str, range: &LineRange) -> QuackingResult<()> {
    if range.start > range.end {
        return Err(QuackingError::invalid_config(format!(
            "disabled line range {}..{} for '{}' is inverted",
            range.start, range.end, key
        )));
    }
    Ok(())
}

/// True if a configured key names `rule_id`, directly or by msgid.
fn names_rule(key: &str, rule_id: &str) -> bool {
    key == rule_id || QUACKING.message(key).is_some_and(|m| m.symbol == rule_id)
}

impl Activation for ActivationPolicy {
    fn is_active(&self, rule_id: &str, line: u32) -> bool {
        if self.disabled.iter().any(|key| names_rule(key, rule_id)) {
            return false;
        }
        !self
            .disabled_lines
            .iter()
            .filter(|(key, _)| names_rule(key, rule_id))
            .flat_map(|(_, ranges)| ranges)
            .any(|range| range.contains(line))
    }
}
