//! Self-description served at `/.well-known/agent.json`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCard {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl SkillCard {
    fn new(name: &str, description: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub version: String,
    pub skills: Vec<SkillCard>,
}

pub fn career_agent_card() -> AgentCard {
    AgentCard {
        name: "Agente de Carreira AI".to_string(),
        description: "Especialista em desenvolvimento de carreira e educação profissional".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        skills: vec![
            SkillCard::new(
                "Analisar Perfil",
                "Analisa um perfil profissional e fornece insights detalhados",
                &["análise", "perfil", "carreira"],
            ),
            SkillCard::new(
                "Gerar Trilha de Estudos",
                "Gera uma trilha de estudos personalizada baseada no perfil",
                &["trilha", "estudos", "educação", "desenvolvimento"],
            ),
            SkillCard::new(
                "Sugerir Recursos",
                "Sugere recursos de estudo para uma área específica",
                &["recursos", "cursos", "certificações", "estudo"],
            ),
            SkillCard::new(
                "Criar Perfil Exemplo",
                "Cria um exemplo de perfil para testes",
                &["exemplo", "template", "perfil"],
            ),
        ],
    }
}

pub fn score_agent_card() -> AgentCard {
    AgentCard {
        name: "Agente Auxiliar".to_string(),
        description: "Calcula scores de adequação para áreas de carreira".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        skills: vec![SkillCard::new(
            "Calcular Score",
            "Calcula um score de adequação para uma área de carreira",
            &["carreira", "score", "avaliação"],
        )],
    }
}
