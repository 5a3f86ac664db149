//! Career score table used by the score-calculator agent.

use serde::Serialize;

use super::params::ScoreRequest;

const FALLBACK_SCORE: u8 = 5;

/// (area, [iniciante, intermediário, avançado])
const SCORE_TABLE: [(&str, [u8; 3]); 4] = [
    ("tecnologia", [7, 8, 9]),
    ("dados", [6, 8, 9]),
    ("gestão", [5, 7, 8]),
    ("design", [6, 7, 8]),
];

fn level_index(experience: &str) -> Option<usize> {
    match experience {
        "iniciante" => Some(0),
        "intermediário" => Some(1),
        "avançado" => Some(2),
        _ => None,
    }
}

/// Result of a score calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerScore {
    pub area: String,
    #[serde(rename = "experiencia")]
    pub experience: String,
    pub score: u8,
    #[serde(rename = "recomendacao")]
    pub recommendation: String,
    #[serde(rename = "proximos_passos")]
    pub next_steps: String,
}

impl CareerScore {
    pub fn compute(request: &ScoreRequest) -> Self {
        let area = request.area.to_lowercase();
        let experience = request.experience.to_lowercase();
        let score = SCORE_TABLE
            .iter()
            .find(|(name, _)| *name == area)
            .zip(level_index(&experience))
            .map(|((_, scores), idx)| scores[idx])
            .unwrap_or(FALLBACK_SCORE);

        Self {
            recommendation: format!(
                "Score {score}/10 para {} com nível {}",
                request.area, request.experience
            ),
            next_steps: format!(
                "Considere focar em projetos práticos na área de {}",
                request.area
            ),
            area: request.area.clone(),
            experience: request.experience.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(area: &str, experience: &str) -> u8 {
        CareerScore::compute(&ScoreRequest {
            area: area.to_string(),
            experience: experience.to_string(),
        })
        .score
    }

    #[test]
    fn looks_up_table() {
        assert_eq!(score("tecnologia", "intermediário"), 8);
        assert_eq!(score("dados", "iniciante"), 6);
        assert_eq!(score("gestão", "avançado"), 8);
        assert_eq!(score("Design", "INICIANTE"), 6);
    }

    #[test]
    fn unknown_area_or_level_scores_five() {
        assert_eq!(score("astronomia", "avançado"), 5);
        assert_eq!(score("dados", "expert"), 5);
    }

    #[test]
    fn recommendation_mentions_score() {
        let result = CareerScore::compute(&ScoreRequest::default());
        assert_eq!(result.recommendation, "Score 8/10 para tecnologia com nível intermediário");
    }

    #[test]
    fn serializes_with_portuguese_keys() {
        let json = serde_json::to_value(CareerScore::compute(&ScoreRequest::default())).unwrap();

        assert_eq!(json["area"], "tecnologia");
        assert_eq!(json["experiencia"], "intermediário");
        assert_eq!(json["score"], 8);
        assert!(json["recomendacao"].is_string());
        assert!(json["proximos_passos"].is_string());
        assert!(json.get("experience").is_none());
    }
}
