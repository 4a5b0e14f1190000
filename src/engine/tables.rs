//! Static symptom tables for the ED and PE engines.
//!
//! Condition and specialist names are client-facing strings. Keep them
//! byte-for-byte stable, including the typographic apostrophe in
//! "Peyronie’s Disease".

use super::rules::{ConditionRule, EngineKind, EngineSpec, Recommendation};

pub static ED: EngineSpec = EngineSpec {
    kind: EngineKind::Ed,
    label: "ED",
    required_fields: &[
        "stress_anxiety",
        "anxious_before_sex",
        "medical_conditions",
        "smoking_alcohol",
        "weight_fatigue",
        "medications",
        "pelvic_injury",
        "pain_curvature",
        "loud_snoring",
        "autoimmune_conditions",
        "groin_pain",
        "tight_grip_masturbation",
    ],
    rules: &[
        ConditionRule::new("Psychological ED", &["stress_anxiety", "anxious_before_sex"]),
        ConditionRule::new("Vascular ED", &["medical_conditions"]),
        ConditionRule::new("Lifestyle-Induced ED", &["smoking_alcohol"]),
        ConditionRule::new("Hormonal ED", &["weight_fatigue"]),
        ConditionRule::new("Medication-Induced ED", &["medications"]),
        ConditionRule::new("Post-Surgical or Injury-Related ED", &["pelvic_injury"]),
        ConditionRule::new("Peyronie’s Disease", &["pain_curvature"]),
        ConditionRule::new("Sleep Apnea-Induced ED", &["loud_snoring"]),
        ConditionRule::new(
            "Autoimmune & Chronic Inflammation-Related ED",
            &["autoimmune_conditions"],
        ),
        ConditionRule::new("Pelvic Floor Dysfunction", &["groin_pain"]),
        ConditionRule::new("Death Grip Syndrome", &["tight_grip_masturbation"]),
    ],
    recommendations: &[
        Recommendation::new("Psychological ED", &["Psychiatrist", "Sexologist"]),
        Recommendation::new("Vascular ED", &["Andrologist", "Cardiologist"]),
        Recommendation::new("Lifestyle-Induced ED", &["Andrologist", "Urologist"]),
        Recommendation::new("Hormonal ED", &["Endocrinologist", "Andrologist"]),
        Recommendation::new("Medication-Induced ED", &["Andrologist", "Primary Care Doctor"]),
        Recommendation::new("Post-Surgical or Injury-Related ED", &["Urologist", "Andrologist"]),
        Recommendation::new("Peyronie’s Disease", &["Urologist", "Andrologist"]),
        Recommendation::new("Sleep Apnea-Induced ED", &["Sleep Specialist", "Andrologist"]),
        Recommendation::new(
            "Autoimmune & Chronic Inflammation-Related ED",
            &["Rheumatologist", "Andrologist"],
        ),
        Recommendation::new(
            "Pelvic Floor Dysfunction",
            &["Pelvic Floor Physiotherapist", "Andrologist"],
        ),
        Recommendation::new("Death Grip Syndrome", &["Sexologist", "Psychosexual Therapist"]),
    ],
};

pub static PE: EngineSpec = EngineSpec {
    kind: EngineKind::Pe,
    label: "PE",
    required_fields: &[
        "since_first_experience",
        "recent_onset",
        "inconsistent_timing",
        "normal_duration_dissatisfied",
        "performance_anxiety",
        "relationship_issues",
        "pelvic_pain_urination",
        "thyroid_symptoms",
        "erection_difficulty",
        "high_sensitivity",
        "substance_use",
        "rushed_masturbation",
    ],
    rules: &[
        ConditionRule::new("Lifelong PE", &["since_first_experience"]),
        ConditionRule::new("Acquired PE", &["recent_onset"]),
        ConditionRule::new("Natural Variable PE", &["inconsistent_timing"]),
        ConditionRule::new("Subjective PE", &["normal_duration_dissatisfied"]),
        ConditionRule::new("Anxiety-Related PE", &["performance_anxiety"]),
        ConditionRule::new("Relationship-Related PE", &["relationship_issues"]),
        ConditionRule::new("Prostatitis-Related PE", &["pelvic_pain_urination"]),
        ConditionRule::new("Thyroid-Related PE", &["thyroid_symptoms"]),
        ConditionRule::new("ED-Associated PE", &["erection_difficulty"]),
        ConditionRule::new("Penile Hypersensitivity", &["high_sensitivity"]),
        ConditionRule::new("Substance-Related PE", &["substance_use"]),
        ConditionRule::new("Conditioned PE", &["rushed_masturbation"]),
    ],
    recommendations: &[
        Recommendation::new("Lifelong PE", &["Urologist", "Sexologist"]),
        Recommendation::new("Acquired PE", &["Urologist", "Andrologist"]),
        Recommendation::new("Natural Variable PE", &["Sexologist", "Psychosexual Therapist"]),
        Recommendation::new("Subjective PE", &["Sexologist", "Psychologist"]),
        Recommendation::new("Anxiety-Related PE", &["Psychiatrist", "Sexologist"]),
        Recommendation::new(
            "Relationship-Related PE",
            &["Couples Therapist", "Psychosexual Therapist"],
        ),
        Recommendation::new("Prostatitis-Related PE", &["Urologist", "Andrologist"]),
        Recommendation::new("Thyroid-Related PE", &["Endocrinologist", "Andrologist"]),
        Recommendation::new("ED-Associated PE", &["Andrologist", "Urologist"]),
        Recommendation::new("Penile Hypersensitivity", &["Andrologist", "Urologist"]),
        Recommendation::new(
            "Substance-Related PE",
            &["Addiction Specialist", "Primary Care Doctor"],
        ),
        Recommendation::new("Conditioned PE", &["Sexologist", "Psychosexual Therapist"]),
    ],
};

/// Table definition for `kind`.
pub fn spec_for(kind: EngineKind) -> &'static EngineSpec {
    match kind {
        EngineKind::Ed => &ED,
        EngineKind::Pe => &PE,
    }
}
