//! Condition rules and the static shape of an engine definition.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::normalize::NormalizedInput;
use crate::error::DiagnosisError;

/// Which diagnosis domain an engine covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Erectile dysfunction
    Ed,
    /// Premature ejaculation
    Pe,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::Ed, EngineKind::Pe];

    /// Path segment used to address this engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Ed => "ed",
            EngineKind::Pe => "pe",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ed") {
            Ok(EngineKind::Ed)
        } else if s.eq_ignore_ascii_case("pe") {
            Ok(EngineKind::Pe)
        } else {
            Err(DiagnosisError::UnknownEngine {
                name: s.to_string(),
            })
        }
    }
}

/// A named condition activated when any of its fields is answered positively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionRule {
    pub name: &'static str,
    pub any_of: &'static [&'static str],
}

impl ConditionRule {
    pub const fn new(name: &'static str, any_of: &'static [&'static str]) -> Self {
        Self { name, any_of }
    }

    pub fn matches(&self, input: &NormalizedInput) -> bool {
        self.any_of.iter().any(|field| input.is_set(field))
    }
}

/// Specialists recommended for one condition, in recommendation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub condition: &'static str,
    pub specialists: &'static [&'static str],
}

impl Recommendation {
    pub const fn new(condition: &'static str, specialists: &'static [&'static str]) -> Self {
        Self {
            condition,
            specialists,
        }
    }
}

/// Static definition of one engine: its fields, rules and recommendation table.
#[derive(Debug)]
pub struct EngineSpec {
    pub kind: EngineKind,
    /// Human-facing name, e.g. "ED".
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
    pub rules: &'static [ConditionRule],
    pub recommendations: &'static [Recommendation],
}

impl EngineSpec {
    pub fn recommendations_for(&self, condition: &str) -> Option<&'static [&'static str]> {
        self.recommendations
            .iter()
            .find(|rec| rec.condition == condition)
            .map(|rec| rec.specialists)
    }
}

/// Rules that fire for `input`, in declared rule order.
pub fn evaluate<'r>(rules: &'r [ConditionRule], input: &NormalizedInput) -> Vec<&'r ConditionRule> {
    rules.iter().filter(|rule| rule.matches(input)).collect()
}
