//! Diagnostic module - model-produced commentary on a profile reference.

use serde::{Deserialize, Serialize};

use super::foundation::{Timestamp, UserId, ValidationError};

/// The fourteen fields the diagnostic prompt asks the model to fill.
pub const DIAGNOSTIC_FIELDS: [&str; 14] = [
    "profile_url",
    "name",
    "headline",
    "current_position",
    "current_company",
    "location",
    "industry",
    "summary",
    "top_skills",
    "recommendations_count",
    "recommendation_excerpts",
    "profile_completeness_score",
    "attractiveness_score",
    "improvement_suggestions",
];

/// A validated pointer to a public profile, usually a LinkedIn URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileReference(String);

impl ProfileReference {
    pub fn new(reference: impl Into<String>) -> Result<Self, ValidationError> {
        let reference = reference.into().trim().to_string();
        if reference.is_empty() {
            return Err(ValidationError::empty_field("profile_reference"));
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "profile_reference",
                "must not contain whitespace",
            ));
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProfileReference {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileReference> for String {
    fn from(reference: ProfileReference) -> Self {
        reference.0
    }
}

impl std::fmt::Display for ProfileReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored diagnostic. Append-only: never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub id: i64,
    pub raw_text: String,
    pub source_reference: String,
    pub owner_id: UserId,
    pub created_at: Timestamp,
}

/// Builds the diagnostic instruction for a profile reference.
///
/// Pure: the same reference always yields the same prompt.
pub fn diagnostic_prompt(reference: &ProfileReference) -> String {
    format!(
        r#"Você é um especialista em recrutamento e marca pessoal no LinkedIn.

Analise o perfil público disponível em: {reference}

Responda APENAS com um único objeto JSON, sem texto antes ou depois, contendo exatamente os campos:

{{
  "profile_url": "URL do perfil analisado",
  "name": "nome completo",
  "headline": "título do perfil",
  "current_position": "cargo atual",
  "current_company": "empresa atual",
  "location": "cidade, país",
  "industry": "setor de atuação",
  "summary": ["no máximo 3 tópicos resumindo a trajetória"],
  "top_skills": [{{"skill": "nome da competência", "endorsements": 0}}],
  "recommendations_count": 0,
  "recommendation_excerpts": ["no máximo 2 trechos citados de recomendações"],
  "profile_completeness_score": 0,
  "attractiveness_score": 0,
  "improvement_suggestions": ["no máximo 3 sugestões de melhoria"]
}}

REGRAS:
- "top_skills" lista as 5 principais competências com o número de recomendações de cada uma
- "profile_completeness_score" é um inteiro de 0 a 100
- "attractiveness_score" é um número de 0 a 10
- Use null para informações que não puder determinar
"#,
        reference = reference.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_reference() {
        assert_eq!(
            ProfileReference::new("   "),
            Err(ValidationError::empty_field("profile_reference"))
        );
    }

    #[test]
    fn rejects_reference_with_spaces() {
        assert!(ProfileReference::new("linkedin.com/in/a b").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let reference = ProfileReference::new("  linkedin.com/in/alice\n").unwrap();
        assert_eq!(reference.as_str(), "linkedin.com/in/alice");
    }

    #[test]
    fn prompt_embeds_reference_and_every_field() {
        let reference = ProfileReference::new("linkedin.com/in/alice").unwrap();
        let prompt = diagnostic_prompt(&reference);

        assert!(prompt.contains("linkedin.com/in/alice"));
        for field in DIAGNOSTIC_FIELDS {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let reference = ProfileReference::new("linkedin.com/in/bob").unwrap();
        assert_eq!(diagnostic_prompt(&reference), diagnostic_prompt(&reference));
    }
}
