//! Prompt templates and canned replies of the career agent.

use super::params::ResourceRequest;
use crate::domain::profile::PersonProfile;

pub const UNSUPPORTED_CONTENT_REPLY: &str = "Apenas mensagens de texto são suportadas.";

pub const ANALYZE_USAGE_REPLY: &str =
    "Para analisar um perfil, envie os dados no formato JSON. Use 'exemplo' para ver um template.";

pub const SCORE_USAGE_REPLY: &str = "Sou o Agente Auxiliar. Posso calcular scores de carreira. \
     Use: 'calcular score área: [área] experiência: [nível]'";

/// System instruction of the conversational wrapper.
pub const CAREER_PERSONA: &str = "Você é um especialista em desenvolvimento de carreira e \
     educação profissional. Responda sempre em português, de forma estruturada, específica e \
     acionável.";

pub const HELP_TEXT: &str = r#"🤖 **Agente de Carreira AI** - Como posso ajudar:

**📊 Análise de Perfil:**
- Digite "analisar perfil" + dados JSON
- Receba insights sobre pontos fortes, áreas de melhoria e recomendações

**🛤️ Trilha de Estudos:**
- Digite "trilha de estudos" + dados JSON (ou descreva seu objetivo)
- Receba um plano personalizado de desenvolvimento

**📚 Sugestão de Recursos:**
- Digite "sugerir recursos área: [área] nível: [nível] tipo: [tipo]"
- Receba cursos, livros, certificações e projetos recomendados

**📝 Exemplo de Perfil:**
- Digite "exemplo" para ver um template de perfil JSON

**💡 Dicas:**
- Use dados estruturados em JSON para melhores resultados
- Especifique suas competências atuais e objetivos de carreira
- Inclua disponibilidade de tempo e recursos

Digite 'exemplo' para começar!"#;

pub const GREETING: &str = r#"👋 Olá! Sou seu **Agente de Carreira AI**.

Posso ajudar você com:
- 📊 Análise de perfil profissional
- 🛤️ Criação de trilhas de estudos personalizadas
- 📚 Sugestão de recursos educacionais
- 💡 Orientação de carreira

Digite 'ajuda' para ver todos os comandos disponíveis ou 'exemplo' para ver um template de perfil.

Como posso ajudar você hoje?"#;

pub fn profile_analysis_prompt(profile: &PersonProfile) -> String {
    format!(
        r#"Você é um especialista em desenvolvimento de carreira com 15+ anos de experiência.

PERFIL PARA ANÁLISE:
{profile}

TAREFA: Forneça uma análise profissional estruturada seguindo EXATAMENTE este formato:

## 🎯 PONTOS FORTES
- [Liste 3-5 pontos fortes específicos baseados nas competências]

## 📈 OPORTUNIDADES DE CRESCIMENTO
- [Identifique 3-4 áreas com potencial de desenvolvimento]

## ⚠️ LACUNAS CRÍTICAS
- [Aponte 2-3 lacunas que impedem os objetivos de carreira]

## 🚀 RECOMENDAÇÕES ESTRATÉGICAS
- [Forneça 4-5 ações concretas e priorizadas]

## 📋 PRÓXIMOS PASSOS (30-60-90 dias)
- 30 dias: [Ação imediata]
- 60 dias: [Desenvolvimento médio prazo]
- 90 dias: [Objetivo trimestral]

DIRETRIZES:
- Seja específico e acionável
- Considere o prazo e disponibilidade informados
- Priorize competências que mais impactam os objetivos
- Use linguagem profissional mas acessível
"#,
        profile = profile.to_pretty_json()
    )
}

const TRAIL_FORMAT: &str = r#"```json
{
  "titulo": "Trilha para [Objetivo Principal]",
  "duracao_total": "[X meses/semanas]",
  "nivel_inicial": "[atual]",
  "nivel_final": "[objetivo]",
  "etapas": [
    {
      "numero": 1,
      "titulo": "[Nome da Etapa]",
      "objetivo": "[O que será alcançado]",
      "duracao": "[tempo estimado]",
      "prerequisitos": ["[se houver]"],
      "atividades": ["[Atividade específica]"],
      "recursos": [
        {
          "tipo": "curso|livro|projeto|certificação",
          "nome": "[Nome do recurso]",
          "provedor": "[Plataforma/Editora]",
          "custo": "[Gratuito/Pago/Valor]",
          "tempo_estimado": "[horas/dias]"
        }
      ],
      "criterios_conclusao": ["[Como saber que completou]"]
    }
  ],
  "marcos_verificacao": ["[Marco 1 - Semana X]"],
  "dicas_sucesso": ["[Dica prática]"]
}
```"#;

pub fn study_trail_prompt(profile: &PersonProfile) -> String {
    let hours = profile.weekly_study_hours.unwrap_or(10);
    format!(
        r#"Você é um arquiteto de aprendizagem especializado em desenvolvimento profissional.

PERFIL DO ESTUDANTE:
{profile}

TAREFA: Crie uma trilha de estudos estruturada seguindo este formato JSON:

{TRAIL_FORMAT}

DIRETRIZES:
- Máximo 5 etapas progressivas
- Considere disponibilidade de {hours}h/semana
- Priorize recursos gratuitos quando possível
- Inclua projetos práticos em cada etapa
- Seja realista com prazos
"#,
        profile = profile.to_pretty_json()
    )
}

/// Trail prompt for requests that carry no structured profile.
pub fn free_text_trail_prompt(request: &str) -> String {
    format!(
        r#"Você é um arquiteto de aprendizagem especializado em desenvolvimento profissional.

PEDIDO DO ESTUDANTE:
"{request}"

TAREFA: Com base no pedido, crie uma trilha de estudos estruturada seguindo este formato JSON:

{TRAIL_FORMAT}

DIRETRIZES:
- Máximo 5 etapas progressivas
- Quando faltar informação, assuma 10h/semana e nível intermediário
- Priorize recursos gratuitos quando possível
- Inclua projetos práticos em cada etapa
"#
    )
}

pub fn resource_suggestion_prompt(request: &ResourceRequest) -> String {
    let ResourceRequest { area, level, kind } = request;
    format!(
        r#"Você é um curador de conteúdo educacional especializado em desenvolvimento profissional.

SOLICITAÇÃO:
- Área: {area}
- Nível: {level}
- Tipo: {kind}

TAREFA: Sugira recursos de alta qualidade seguindo este formato JSON:

```json
{{
  "area": "{area}",
  "nivel": "{level}",
  "recursos": [
    {{
      "categoria": "cursos_online|livros|certificacoes|projetos|ferramentas",
      "itens": [
        {{
          "nome": "[Nome exato]",
          "provedor": "[Plataforma/Editora]",
          "descricao": "[Descrição concisa em 1-2 linhas]",
          "duracao": "[tempo estimado]",
          "custo": "[Gratuito/Valor aproximado]",
          "nivel_dificuldade": "1-5",
          "url": "[se disponível]"
        }}
      ]
    }}
  ],
  "sequencia_recomendada": ["[Ordem sugerida de estudo]"],
  "tempo_total_estimado": "[estimativa total]"
}}
```

CRITÉRIOS DE SELEÇÃO:
- Recursos atualizados (últimos 2 anos)
- Avaliações positivas da comunidade
- Aplicabilidade prática
- Boa relação custo-benefício

LIMITE: Máximo 8 recursos por categoria
"#
    )
}

pub fn quick_advice_prompt(question: &str, context: Option<&str>) -> String {
    let context = context
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("CONTEXTO: {c}\n\n"))
        .unwrap_or_default();
    format!(
        r#"Você é um mentor de carreira experiente. Responda de forma concisa e prática.

PERGUNTA: {question}

{context}RESPOSTA (máximo 150 palavras):
- Seja direto e acionável
- Inclua 1-2 dicas específicas
- Mencione recursos se relevante
- Use tom profissional mas amigável
"#
    )
}
