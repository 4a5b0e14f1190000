//! Diagnosis engines: normalize -> evaluate -> aggregate.
//!
//! One engine type parameterized by an [`EngineSpec`]; the ED and PE engines
//! differ only in their static tables. Building an [`Engine`] runs the table
//! integrity check once, so a request can never hit a condition without a
//! recommendation entry.

pub mod aggregate;
pub mod normalize;
pub mod rules;
pub mod tables;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DiagnosisError, Result};

pub use normalize::{NormalizedInput, RawValue};
pub use rules::{ConditionRule, EngineKind, EngineSpec, Recommendation};

/// Conditions and specialists for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisResult {
    pub detected_conditions: Vec<String>,
    pub suggested_doctors: Vec<String>,
}

/// An engine whose tables passed the integrity check.
#[derive(Debug, Clone)]
pub struct Engine {
    spec: &'static EngineSpec,
    /// Condition name -> specialists, one entry per rule.
    specialists: HashMap<&'static str, &'static [&'static str]>,
}

impl Engine {
    /// Validate `spec` and resolve every rule's recommendations.
    pub fn build(spec: &'static EngineSpec) -> Result<Self> {
        let fault = |message: String| DiagnosisError::ConfigurationIntegrity {
            engine: spec.label.to_string(),
            message,
        };

        let mut fields = HashSet::new();
        for field in spec.required_fields {
            if !fields.insert(*field) {
                return Err(fault(format!("required field '{field}' is listed twice")));
            }
        }

        let mut specialists: HashMap<&'static str, &'static [&'static str]> =
            HashMap::with_capacity(spec.rules.len());
        for rule in spec.rules {
            if specialists.contains_key(rule.name) {
                return Err(fault(format!("condition '{}' is defined twice", rule.name)));
            }
            if rule.any_of.is_empty() {
                return Err(fault(format!("condition '{}' has no fields", rule.name)));
            }
            if let Some(field) = rule.any_of.iter().find(|f| !fields.contains(*f)) {
                return Err(fault(format!(
                    "condition '{}' reads unknown field '{field}'",
                    rule.name
                )));
            }
            let doctors = spec.recommendations_for(rule.name).ok_or_else(|| {
                fault(format!(
                    "condition '{}' has no recommendation entry",
                    rule.name
                ))
            })?;
            specialists.insert(rule.name, doctors);
        }

        for rec in spec.recommendations {
            if !specialists.contains_key(rec.condition) {
                tracing::warn!(
                    engine = spec.label,
                    condition = rec.condition,
                    "recommendation entry has no matching condition rule"
                );
            }
        }

        Ok(Self { spec, specialists })
    }

    pub fn kind(&self) -> EngineKind {
        self.spec.kind
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        self.spec.required_fields
    }

    pub fn condition_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.spec.rules.iter().map(|rule| rule.name)
    }

    /// Coerce raw answers into this engine's strict field set.
    pub fn normalize(&self, input: &Map<String, Value>) -> Result<NormalizedInput> {
        normalize::normalize(self.spec.required_fields, input)
    }

    /// Evaluate and aggregate already-normalized answers. Infallible.
    pub fn classify(&self, input: &NormalizedInput) -> DiagnosisResult {
        let fired = rules::evaluate(self.spec.rules, input);

        let suggested_doctors = aggregate::aggregate(fired.iter().map(|rule| {
            *self
                .specialists
                .get(rule.name)
                .expect("every rule is resolved in Engine::build")
        }))
        .into_iter()
        .map(str::to_string)
        .collect();

        DiagnosisResult {
            detected_conditions: fired.iter().map(|rule| rule.name.to_string()).collect(),
            suggested_doctors,
        }
    }

    /// Full pipeline on one request's answers.
    pub fn diagnose(&self, input: &Map<String, Value>) -> Result<DiagnosisResult> {
        let normalized = self.normalize(input)?;
        let result = self.classify(&normalized);
        tracing::debug!(
            engine = self.spec.label,
            conditions = result.detected_conditions.len(),
            doctors = result.suggested_doctors.len(),
            "diagnosis complete"
        );
        Ok(result)
    }

    /// Parse a JSON document and diagnose it. The document must be an object.
    pub fn diagnose_json(&self, body: &[u8]) -> Result<DiagnosisResult> {
        if body.is_empty() {
            return Err(DiagnosisError::MalformedPayload {
                message: "Empty request body".to_string(),
            });
        }
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => self.diagnose(&map),
            other => Err(DiagnosisError::MalformedPayload {
                message: format!("expected a JSON object, got {}", json_type_name(&other)),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Both engines, validated and ready to share across requests.
#[derive(Debug, Clone)]
pub struct Engines {
    ed: Engine,
    pe: Engine,
}

impl Engines {
    /// Build both engines from the static tables.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            ed: Engine::build(tables::spec_for(EngineKind::Ed))?,
            pe: Engine::build(tables::spec_for(EngineKind::Pe))?,
        })
    }

    pub fn get(&self, kind: EngineKind) -> &Engine {
        match kind {
            EngineKind::Ed => &self.ed,
            EngineKind::Pe => &self.pe,
        }
    }

    /// Look up an engine by its path segment.
    pub fn by_name(&self, name: &str) -> Result<&Engine> {
        Ok(self.get(name.parse()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Engine> {
        EngineKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static NO_RECOMMENDATION: EngineSpec = EngineSpec {
        kind: EngineKind::Ed,
        label: "broken",
        required_fields: &["a"],
        rules: &[ConditionRule::new("Orphan", &["a"])],
        recommendations: &[],
    };

    static UNKNOWN_FIELD: EngineSpec = EngineSpec {
        kind: EngineKind::Pe,
        label: "broken",
        required_fields: &["a"],
        rules: &[ConditionRule::new("Reads b", &["b"])],
        recommendations: &[Recommendation::new("Reads b", &["Someone"])],
    };

    static DUPLICATE_CONDITION: EngineSpec = EngineSpec {
        kind: EngineKind::Pe,
        label: "broken",
        required_fields: &["a"],
        rules: &[
            ConditionRule::new("Twice", &["a"]),
            ConditionRule::new("Twice", &["a"]),
        ],
        recommendations: &[Recommendation::new("Twice", &["Someone"])],
    };

    static DUPLICATE_FIELD: EngineSpec = EngineSpec {
        kind: EngineKind::Pe,
        label: "broken",
        required_fields: &["a", "a"],
        rules: &[ConditionRule::new("Uses a", &["a"])],
        recommendations: &[Recommendation::new("Uses a", &["Someone"])],
    };

    static EMPTY_RULE: EngineSpec = EngineSpec {
        kind: EngineKind::Pe,
        label: "broken",
        required_fields: &["a"],
        rules: &[ConditionRule::new("Nothing", &[])],
        recommendations: &[Recommendation::new("Nothing", &["Someone"])],
    };

    static ORPHAN_RECOMMENDATION: EngineSpec = EngineSpec {
        kind: EngineKind::Pe,
        label: "lenient",
        required_fields: &["a"],
        rules: &[ConditionRule::new("Uses a", &["a"])],
        recommendations: &[
            Recommendation::new("Uses a", &["Someone"]),
            Recommendation::new("Ghost", &["Nobody"]),
        ],
    };

    #[test]
    fn duplicate_required_field_is_an_integrity_fault() {
        let err = Engine::build(&DUPLICATE_FIELD).unwrap_err();
        assert!(matches!(err, DiagnosisError::ConfigurationIntegrity { .. }));
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn rule_without_fields_is_an_integrity_fault() {
        let err = Engine::build(&EMPTY_RULE).unwrap_err();
        assert!(matches!(err, DiagnosisError::ConfigurationIntegrity { .. }));
        assert!(err.to_string().contains("has no fields"));
    }

    #[test]
    fn orphan_recommendation_only_warns() {
        let engine = Engine::build(&ORPHAN_RECOMMENDATION).unwrap();
        assert_eq!(engine.condition_names().collect::<Vec<_>>(), vec!["Uses a"]);
    }

    #[test]
    fn missing_recommendation_is_an_integrity_fault() {
        let err = Engine::build(&NO_RECOMMENDATION).unwrap_err();
        assert!(matches!(err, DiagnosisError::ConfigurationIntegrity { .. }));
        assert!(err.to_string().contains("Orphan"));
    }

    #[test]
    fn unknown_rule_field_is_an_integrity_fault() {
        let err = Engine::build(&UNKNOWN_FIELD).unwrap_err();
        assert!(err.to_string().contains("unknown field 'b'"));
    }

    #[test]
    fn duplicate_condition_is_an_integrity_fault() {
        assert!(Engine::build(&DUPLICATE_CONDITION).is_err());
    }

    #[test]
    fn standard_tables_pass_integrity_check() {
        let engines = Engines::standard().unwrap();
        assert_eq!(engines.get(EngineKind::Ed).condition_names().count(), 11);
        assert_eq!(engines.get(EngineKind::Pe).condition_names().count(), 12);
        assert_eq!(engines.iter().count(), 2);
    }

    #[test]
    fn diagnose_json_rejects_empty_and_non_object_bodies() {
        let engines = Engines::standard().unwrap();
        let ed = engines.get(EngineKind::Ed);
        assert_eq!(
            ed.diagnose_json(b""),
            Err(DiagnosisError::MalformedPayload {
                message: "Empty request body".into()
            })
        );
        // Only a zero-length body is "empty"; blank text is bad JSON.
        assert_eq!(
            ed.diagnose_json(b"  \n"),
            Err(DiagnosisError::MalformedPayload {
                message: "Invalid JSON format".into()
            })
        );
        assert!(matches!(
            ed.diagnose_json(b"[true]"),
            Err(DiagnosisError::MalformedPayload { message }) if message.contains("array")
        ));
        assert!(matches!(
            ed.diagnose_json(b"{\"stress_anxiety\": "),
            Err(DiagnosisError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn by_name_reports_unknown_engine() {
        let engines = Engines::standard().unwrap();
        assert_eq!(engines.by_name("PE").unwrap().kind(), EngineKind::Pe);
        assert!(matches!(
            engines.by_name("xx"),
            Err(DiagnosisError::UnknownEngine { .. })
        ));
    }

    #[test]
    fn classify_reports_conditions_in_declared_order() {
        let engines = Engines::standard().unwrap();
        let ed = engines.get(EngineKind::Ed);
        let mut answers = Map::new();
        for field in ed.required_fields() {
            answers.insert(field.to_string(), json!(false));
        }
        answers.insert("groin_pain".into(), json!("yes"));
        answers.insert("medical_conditions".into(), json!(true));

        let result = ed.diagnose(&answers).unwrap();
        assert_eq!(
            result.detected_conditions,
            vec!["Vascular ED", "Pelvic Floor Dysfunction"]
        );
        assert_eq!(
            result.suggested_doctors,
            vec!["Andrologist", "Cardiologist", "Pelvic Floor Physiotherapist"]
        );
    }
}
