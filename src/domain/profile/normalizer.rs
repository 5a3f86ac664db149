//! ProfileNormalizer - turns raw diagnostic output into a PersonProfile.
//!
//! The diagnostic is free-form model output. Anything that is not a JSON
//! object carrying a `name` degrades to the default profile; the normalizer
//! never fails.

use serde_json::{Map, Value};
use thiserror::Error;

use super::person::{CareerGoal, PersonProfile, Skill};

/// Placeholder values for the profile fields a diagnostic never supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerDefaults {
    pub name: String,
    pub education_level: String,
    pub skill_level: String,
    pub skill_years: Option<u32>,
    pub max_skills: usize,
    pub goal_role: String,
    pub goal_area: String,
    pub goal_horizon_years: Option<u32>,
    pub goal_motivation: Option<String>,
    pub weekly_study_hours: Option<u32>,
    pub learning_preference: Option<String>,
    pub available_resources: Option<String>,
}

impl Default for NormalizerDefaults {
    fn default() -> Self {
        Self {
            name: "Usuário".to_string(),
            education_level: "Não informado".to_string(),
            skill_level: "intermediário".to_string(),
            skill_years: Some(2),
            max_skills: 3,
            goal_role: "Profissional em evolução".to_string(),
            goal_area: "Desenvolvimento de carreira".to_string(),
            goal_horizon_years: Some(2),
            goal_motivation: Some("Crescimento profissional".to_string()),
            weekly_study_hours: Some(10),
            learning_preference: Some("online".to_string()),
            available_resources: Some("cursos online".to_string()),
        }
    }
}

/// Why a diagnostic could not be mapped. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum MalformedDiagnostic {
    #[error("diagnostic is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("diagnostic is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Maps diagnostic JSON onto the canonical profile shape.
#[derive(Debug, Clone, Default)]
pub struct ProfileNormalizer {
    defaults: NormalizerDefaults,
}

impl ProfileNormalizer {
    pub fn new(defaults: NormalizerDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &NormalizerDefaults {
        &self.defaults
    }

    /// Normalizes a raw diagnostic, substituting the default profile when
    /// the text cannot be mapped.
    pub fn normalize(&self, raw_diagnostic: &str) -> PersonProfile {
        match self.map_diagnostic(raw_diagnostic) {
            Ok(profile) => profile,
            Err(reason) => {
                tracing::warn!(%reason, "malformed diagnostic, using default profile");
                self.default_profile()
            }
        }
    }

    /// The profile handed downstream when a diagnostic is unusable.
    pub fn default_profile(&self) -> PersonProfile {
        PersonProfile {
            name: self.defaults.name.clone(),
            age: None,
            education_level: self.defaults.education_level.clone(),
            field_of_study: None,
            current_skills: Vec::new(),
            career_goals: vec![self.placeholder_goal()],
            weekly_study_hours: self.defaults.weekly_study_hours,
            learning_preference: self.defaults.learning_preference.clone(),
            available_resources: self.defaults.available_resources.clone(),
        }
    }

    fn map_diagnostic(&self, raw_diagnostic: &str) -> Result<PersonProfile, MalformedDiagnostic> {
        let body = strip_code_fence(raw_diagnostic);
        let value: Value = serde_json::from_str(body)
            .map_err(|e| MalformedDiagnostic::NotAnObject(e.to_string()))?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(MalformedDiagnostic::NotAnObject(format!(
                    "found {}",
                    json_kind(&other)
                )))
            }
        };

        let name = non_blank_str(&object, "name").ok_or(MalformedDiagnostic::MissingField("name"))?;

        let current_skills = object
            .get("top_skills")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .take(self.defaults.max_skills)
                    .filter_map(|entry| self.skill_from_entry(entry))
                    .collect()
            })
            .unwrap_or_default();

        Ok(PersonProfile {
            name: name.to_string(),
            age: None,
            education_level: self.defaults.education_level.clone(),
            field_of_study: non_blank_str(&object, "industry").map(str::to_string),
            current_skills,
            career_goals: vec![self.placeholder_goal()],
            weekly_study_hours: self.defaults.weekly_study_hours,
            learning_preference: self.defaults.learning_preference.clone(),
            available_resources: self.defaults.available_resources.clone(),
        })
    }

    fn skill_from_entry(&self, entry: &Value) -> Option<Skill> {
        let (area, endorsements) = match entry {
            Value::String(name) => (name.trim(), None),
            Value::Object(fields) => {
                let area = non_blank_str(fields, "skill").or_else(|| non_blank_str(fields, "name"))?;
                (area, fields.get("endorsements").and_then(endorsement_count))
            }
            _ => return None,
        };
        if area.is_empty() {
            return None;
        }

        Some(Skill {
            area: area.to_string(),
            level: self.defaults.skill_level.clone(),
            years: self.defaults.skill_years,
            details: endorsements.map(|count| format!("{count} endossos")),
        })
    }

    fn placeholder_goal(&self) -> CareerGoal {
        CareerGoal {
            desired_role: self.defaults.goal_role.clone(),
            area_of_interest: self.defaults.goal_area.clone(),
            horizon_years: self.defaults.goal_horizon_years,
            motivation: self.defaults.goal_motivation.clone(),
        }
    }
}

/// Models often wrap JSON in a markdown fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn non_blank_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn endorsement_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
