//! Prompt templates for the three generation flows.
//!
//! English and Portuguese templates are written in parallel; nothing is
//! translated at runtime. Every template ends with the JSON shape the
//! normalizer expects back.

use crate::culture::country_context;
use crate::models::{GenerationRequest, Language, OperationKind};

pub const IDEAS_SCHEMA: &str = r#"{"ideas": [{"title": "string", "description": "string", "targetAudience": "string", "priceRange": "string", "category": "string", "tags": ["string"]}]}"#;
pub const VALIDATION_SCHEMA: &str = r#"{"marketPotential": number, "competitionLevel": number, "feasibilityScore": number, "strengths": ["string"], "challenges": ["string"], "recommendation": "string"}"#;
pub const PROMOTION_SCHEMA: &str = r#"{"emailCampaign": {"subject": "string", "content": "string"}, "socialMediaPosts": ["string"], "affiliateResources": {"commissionRate": "string", "cookieDuration": "string", "averageOrderValue": "string", "salesCopy": "string"}}"#;

/// Build the user prompt for `request`.
///
/// With `country_aware` unset the plain templates are used and the request's
/// country is ignored.
pub fn build_prompt(request: &GenerationRequest, country_aware: bool) -> String {
    let niche = request.niche.as_str();
    let idea = request.idea.as_deref().unwrap_or_default();
    if country_aware {
        let market = Market::new(&request.country);
        let context = country_context(&request.country, request.language);
        match (request.kind, request.language) {
            (OperationKind::GenerateIdeas, Language::En) => ideas_en(niche, &market, context),
            (OperationKind::GenerateIdeas, Language::Pt) => ideas_pt(niche, &market, context),
            (OperationKind::ValidateIdea, Language::En) => validation_en(idea, niche, &market, context),
            (OperationKind::ValidateIdea, Language::Pt) => validation_pt(idea, niche, &market, context),
            (OperationKind::GeneratePromotionKit, Language::En) => promotion_en(idea, niche, &market, context),
            (OperationKind::GeneratePromotionKit, Language::Pt) => promotion_pt(idea, niche, &market, context),
        }
    } else {
        plain_prompt(request.kind, request.language, niche, idea)
    }
}

/// Persona sent as the system message to chat-style backends.
pub fn system_prompt(kind: OperationKind, language: Language) -> &'static str {
    match (kind, language) {
        (OperationKind::GenerateIdeas, Language::En) => "You are an expert digital product strategist. Generate practical, marketable digital product ideas.",
        (OperationKind::GenerateIdeas, Language::Pt) => "Você é um estrategista especialista em produtos digitais. Gere ideias práticas e comercializáveis de produtos digitais.",
        (OperationKind::ValidateIdea, Language::En) => "You are a market research analyst specializing in digital products. Provide realistic, data-driven assessments.",
        (OperationKind::ValidateIdea, Language::Pt) => "Você é um analista de pesquisa de mercado especializado em produtos digitais. Forneça avaliações realistas e baseadas em dados.",
        (OperationKind::GeneratePromotionKit, Language::En) => "You are a digital marketing expert specializing in product launches and affiliate marketing. Create compelling, conversion-focused content.",
        (OperationKind::GeneratePromotionKit, Language::Pt) => "Você é um especialista em marketing digital especializado em lançamentos de produtos e marketing de afiliados. Crie conteúdo atrativo e focado em conversão.",
    }
}

/// Portuguese phrasings of the target market. Brazil gets native wording,
/// every other country the generic "de X" / "em X" forms.
struct Market<'a> {
    name: &'a str,
    brazil: bool,
}

impl<'a> Market<'a> {
    fn new(name: &'a str) -> Self {
        Self { name, brazil: name == "Brazil" }
    }

    /// "mercado brasileiro" / "mercado de X"
    fn adjective_pt(&self) -> String {
        if self.brazil { "brasileiro".to_string() } else { format!("de {}", self.name) }
    }

    fn noun_pt(&self) -> String {
        if self.brazil { "o Brasil".to_string() } else { self.name.to_string() }
    }

    fn of_pt(&self) -> String {
        if self.brazil { "do Brasil".to_string() } else { format!("de {}", self.name) }
    }

    fn in_pt(&self) -> String {
        if self.brazil { "no Brasil".to_string() } else { format!("em {}", self.name) }
    }
}

fn ideas_en(niche: &str, market: &Market, context: &str) -> String {
    let country = market.name;
    format!(
        "Generate 3 innovative digital product ideas for the \"{niche}\" niche, specifically tailored for the {country} market.\n\n\
Cultural Context: {context}\n\n\
For each idea, provide:\n\
- A compelling, market-appropriate title\n\
- Detailed description (2-3 sentences)\n\
- Specific target audience for {country}\n\
- Realistic price range in local context\n\
- Appropriate category\n\
- Relevant tags\n\n\
Return ONLY a valid JSON object in this exact format:\n{IDEAS_SCHEMA}"
    )
}

fn ideas_pt(niche: &str, market: &Market, context: &str) -> String {
    let adjective = market.adjective_pt();
    let noun = market.noun_pt();
    format!(
        "Gere 3 ideias inovadoras de produtos digitais para o nicho \"{niche}\", especificamente adaptadas para o mercado {adjective}.\n\n\
Contexto Cultural: {context}\n\n\
Para cada ideia, forneça:\n\
- Um título atrativo e apropriado para o mercado\n\
- Descrição detalhada (2-3 frases)\n\
- Público-alvo específico para {noun}\n\
- Faixa de preço realista no contexto local\n\
- Categoria apropriada\n\
- Tags relevantes\n\n\
Retorne APENAS um objeto JSON válido neste formato exato:\n{IDEAS_SCHEMA}"
    )
}

fn validation_en(idea: &str, niche: &str, market: &Market, context: &str) -> String {
    let country = market.name;
    format!(
        "Analyze the viability of this digital product idea: \"{idea}\" in the \"{niche}\" niche for the {country} market.\n\n\
Cultural Context: {context}\n\n\
Consider local market conditions, competition, regulations, and cultural preferences specific to {country}.\n\n\
Provide scores (1-10) for:\n\
- Market potential in {country}\n\
- Competition level\n\
- Feasibility score considering local constraints\n\n\
Also provide at least 3 strengths, 3 challenges, and an overall recommendation.\n\n\
Return ONLY a valid JSON object:\n{VALIDATION_SCHEMA}"
    )
}

fn validation_pt(idea: &str, niche: &str, market: &Market, context: &str) -> String {
    let adjective = market.adjective_pt();
    let of = market.of_pt();
    let within = market.in_pt();
    format!(
        "Analise a viabilidade desta ideia de produto digital: \"{idea}\" no nicho \"{niche}\" para o mercado {adjective}.\n\n\
Contexto Cultural: {context}\n\n\
Considere condições de mercado local, concorrência, regulamentações e preferências culturais específicas {of}.\n\n\
Forneça pontuações (1-10) para:\n\
- Potencial de mercado {within}\n\
- Nível de concorrência\n\
- Pontuação de viabilidade considerando limitações locais\n\n\
Também forneça pelo menos 3 pontos fortes, 3 desafios e uma recomendação geral.\n\n\
Retorne APENAS um objeto JSON válido:\n{VALIDATION_SCHEMA}"
    )
}

fn promotion_en(idea: &str, niche: &str, market: &Market, context: &str) -> String {
    let country = market.name;
    format!(
        "Create a comprehensive promotion kit for this digital product: \"{idea}\" in the \"{niche}\" niche, specifically for the {country} market.\n\n\
Cultural Context: {context}\n\n\
Generate culturally appropriate content including:\n\
1. Email campaign (subject + content)\n\
2. 3 social media posts adapted for {country} audience\n\
3. Affiliate resources with local market considerations\n\n\
Use appropriate language, references, and marketing approaches for {country}.\n\n\
Return ONLY a valid JSON object:\n{PROMOTION_SCHEMA}"
    )
}

fn promotion_pt(idea: &str, niche: &str, market: &Market, context: &str) -> String {
    let adjective = market.adjective_pt();
    let noun = market.noun_pt();
    format!(
        "Crie um kit promocional abrangente para este produto digital: \"{idea}\" no nicho \"{niche}\", especificamente para o mercado {adjective}.\n\n\
Contexto Cultural: {context}\n\n\
Gere conteúdo culturalmente apropriado incluindo:\n\
1. Campanha de email (assunto + conteúdo)\n\
2. 3 posts para redes sociais adaptados para o público {adjective}\n\
3. Recursos para afiliados com considerações do mercado local\n\n\
Use linguagem, referências e abordagens de marketing apropriadas para {noun}.\n\n\
Retorne APENAS um objeto JSON válido:\n{PROMOTION_SCHEMA}"
    )
}

fn plain_prompt(kind: OperationKind, language: Language, niche: &str, idea: &str) -> String {
    match (kind, language) {
        (OperationKind::GenerateIdeas, Language::En) => format!(
            "Generate 3 innovative digital product ideas for the \"{niche}\" niche. Focus on products that can be created and sold online (apps, courses, software, digital tools, etc.). For each idea, provide a compelling title, detailed description, target audience, realistic price range, category, and relevant tags. Return ONLY a valid JSON object in this exact format: {IDEAS_SCHEMA}"
        ),
        (OperationKind::GenerateIdeas, Language::Pt) => format!(
            "Gere 3 ideias inovadoras de produtos digitais para o nicho \"{niche}\". Foque em produtos que podem ser criados e vendidos online (apps, cursos, software, ferramentas digitais, etc.). Para cada ideia, forneça um título atrativo, descrição detalhada, público-alvo, faixa de preço realista, categoria e tags relevantes. Retorne APENAS um objeto JSON válido neste formato exato: {IDEAS_SCHEMA}"
        ),
        (OperationKind::ValidateIdea, Language::En) => format!(
            "Analyze the viability of this digital product idea: \"{idea}\" in the \"{niche}\" niche. Provide a comprehensive validation including market potential (1-10), competition level (1-10), feasibility score (1-10), at least 3 strengths, at least 3 challenges, and an overall recommendation. Return ONLY a valid JSON object in this format: {VALIDATION_SCHEMA}"
        ),
        (OperationKind::ValidateIdea, Language::Pt) => format!(
            "Analise a viabilidade desta ideia de produto digital: \"{idea}\" no nicho \"{niche}\". Forneça uma validação abrangente incluindo potencial de mercado (1-10), nível de concorrência (1-10), pontuação de viabilidade (1-10), pelo menos 3 pontos fortes, pelo menos 3 desafios e uma recomendação geral. Retorne APENAS um objeto JSON válido neste formato: {VALIDATION_SCHEMA}"
        ),
        (OperationKind::GeneratePromotionKit, Language::En) => format!(
            "Create a comprehensive promotion kit for this digital product: \"{idea}\" in the \"{niche}\" niche. Generate: 1) Email campaign with subject and content, 2) 3 social media posts, 3) Affiliate resources including commission rate, cookie duration, average order value, and sales copy. Return ONLY a valid JSON object: {PROMOTION_SCHEMA}"
        ),
        (OperationKind::GeneratePromotionKit, Language::Pt) => format!(
            "Crie um kit promocional abrangente para este produto digital: \"{idea}\" no nicho \"{niche}\". Gere: 1) Campanha de email com assunto e conteúdo, 2) 3 posts para redes sociais, 3) Recursos para afiliados incluindo taxa de comissão, duração do cookie, valor médio do pedido e texto de vendas. Retorne APENAS um objeto JSON válido: {PROMOTION_SCHEMA}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culture::{known_countries, DEFAULT_COUNTRY};

    const KINDS: [OperationKind; 3] = [
        OperationKind::GenerateIdeas,
        OperationKind::ValidateIdea,
        OperationKind::GeneratePromotionKit,
    ];
    const LANGUAGES: [Language; 2] = [Language::En, Language::Pt];

    fn schema_for(kind: OperationKind) -> &'static str {
        match kind {
            OperationKind::GenerateIdeas => IDEAS_SCHEMA,
            OperationKind::ValidateIdea => VALIDATION_SCHEMA,
            OperationKind::GeneratePromotionKit => PROMOTION_SCHEMA,
        }
    }

    fn request(kind: OperationKind, country: &str, language: Language) -> GenerationRequest {
        GenerationRequest {
            kind,
            niche: "home fitness".into(),
            idea: kind.requires_idea().then(|| "Kettlebell video course".to_string()),
            country: country.into(),
            language,
        }
    }

    #[test]
    fn every_table_entry_yields_prompt_with_niche() {
        for country in known_countries() {
            for language in LANGUAGES {
                for kind in KINDS {
                    let prompt = build_prompt(&request(kind, country, language), true);
                    assert!(!prompt.is_empty());
                    assert!(prompt.contains("home fitness"), "{kind:?} {country} {language:?}");
                    assert!(prompt.contains(country_context(country, language)));
                }
            }
        }
    }

    #[test]
    fn unknown_country_uses_default_context() {
        let prompt = build_prompt(&request(OperationKind::GenerateIdeas, "Atlantis", Language::En), true);
        assert!(prompt.contains("Atlantis market"));
        assert!(prompt.contains(country_context(DEFAULT_COUNTRY, Language::En)));
    }

    #[test]
    fn prompts_end_with_schema_for_kind() {
        for kind in KINDS {
            for language in LANGUAGES {
                for aware in [true, false] {
                    let prompt = build_prompt(&request(kind, "Germany", language), aware);
                    assert!(prompt.ends_with(schema_for(kind)), "{kind:?} {language:?} aware={aware}");
                }
            }
        }
    }

    #[test]
    fn idea_text_is_interpolated_when_relevant() {
        let prompt = build_prompt(&request(OperationKind::ValidateIdea, "Brazil", Language::En), true);
        assert!(prompt.contains("\"Kettlebell video course\""));
        let prompt = build_prompt(&request(OperationKind::GeneratePromotionKit, "Brazil", Language::Pt), false);
        assert!(prompt.contains("\"Kettlebell video course\""));
    }

    #[test]
    fn portuguese_templates_phrase_brazil_natively() {
        let prompt = build_prompt(&request(OperationKind::ValidateIdea, "Brazil", Language::Pt), true);
        assert!(prompt.contains("mercado brasileiro"));
        assert!(prompt.contains("específicas do Brasil"));
        assert!(prompt.contains("Potencial de mercado no Brasil"));

        let prompt = build_prompt(&request(OperationKind::ValidateIdea, "Germany", Language::Pt), true);
        assert!(prompt.contains("mercado de Germany"));
        assert!(prompt.contains("Potencial de mercado em Germany"));
    }

    #[test]
    fn plain_templates_ignore_country() {
        for kind in KINDS {
            let prompt = build_prompt(&request(kind, "Namibia", Language::En), false);
            assert!(!prompt.contains("Namibia"));
            assert!(!prompt.contains("Cultural Context"));
        }
    }

    #[test]
    fn system_prompt_follows_language() {
        assert!(system_prompt(OperationKind::ValidateIdea, Language::En).starts_with("You are"));
        assert!(system_prompt(OperationKind::ValidateIdea, Language::Pt).starts_with("Você"));
    }
}
