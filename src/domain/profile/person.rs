//! PersonProfile - the canonical document describing a learner.
//!
//! Field names serialize in English. Portuguese aliases are accepted on
//! input so profiles pasted by users of the Portuguese chat surface parse
//! without translation.

use serde::{Deserialize, Serialize};

/// A capability the person already has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub area: String,
    #[serde(alias = "nivel")]
    pub level: String,
    #[serde(default, alias = "experiencia_anos", skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,
    #[serde(default, alias = "detalhes", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Skill {
    pub fn new(area: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            level: level.into(),
            years: None,
            details: None,
        }
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// A career objective the person is working towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerGoal {
    #[serde(alias = "cargo_desejado")]
    pub desired_role: String,
    #[serde(alias = "area_interesse")]
    pub area_of_interest: String,
    #[serde(default, alias = "prazo_anos", skip_serializing_if = "Option::is_none")]
    pub horizon_years: Option<u32>,
    #[serde(default, alias = "motivacao", skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
}

/// Normalized person profile consumed by the career skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "idade", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(alias = "escolaridade")]
    pub education_level: String,
    #[serde(default, alias = "area_formacao")]
    pub field_of_study: Option<String>,
    #[serde(default, alias = "competencias_atuais")]
    pub current_skills: Vec<Skill>,
    #[serde(default, alias = "objetivos_carreira")]
    pub career_goals: Vec<CareerGoal>,
    #[serde(default, alias = "disponibilidade_estudo_horas_semana")]
    pub weekly_study_hours: Option<u32>,
    #[serde(default, alias = "preferencia_aprendizado")]
    pub learning_preference: Option<String>,
    #[serde(default, alias = "recursos_disponiveis")]
    pub available_resources: Option<String>,
}

impl PersonProfile {
    /// Creates a profile with only the required fields set.
    pub fn new(name: impl Into<String>, education_level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            education_level: education_level.into(),
            field_of_study: None,
            current_skills: Vec::new(),
            career_goals: Vec::new(),
            weekly_study_hours: None,
            learning_preference: None,
            available_resources: None,
        }
    }

    /// Pretty JSON rendering embedded in prompts and chat replies.
    pub fn to_pretty_json(&self) -> String {
        // Serializing plain strings and integers cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// The template returned by the `exemplo` chat command.
pub fn example_profile() -> PersonProfile {
    PersonProfile {
        name: "João Silva".to_string(),
        age: Some(28),
        education_level: "Superior Completo".to_string(),
        field_of_study: Some("Engenharia da Computação".to_string()),
        current_skills: vec![
            Skill::new("Python", "intermediário")
                .with_years(3)
                .with_details("Desenvolvimento web e automação"),
            Skill::new("JavaScript", "básico")
                .with_years(1)
                .with_details("Frontend básico"),
        ],
        career_goals: vec![CareerGoal {
            desired_role: "Cientista de Dados".to_string(),
            area_of_interest: "Inteligência Artificial".to_string(),
            horizon_years: Some(2),
            motivation: Some("Interesse em machine learning e big data".to_string()),
        }],
        weekly_study_hours: Some(15),
        learning_preference: Some("online".to_string()),
        available_resources: Some("cursos online, livros".to_string()),
    }
}
