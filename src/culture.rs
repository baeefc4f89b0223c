use serde::Serialize;

use crate::models::Language;

pub const DEFAULT_COUNTRY: &str = "United States";

struct CountryContext {
    country: &'static str,
    en: &'static str,
    pt: &'static str,
}

const CONTEXTS: &[CountryContext] = &[
    CountryContext {
        country: "United States",
        en: "Focus on side hustles, SaaS products, online courses, and digital marketing tools. Use American business terminology like \"monetize\", \"scale\", and \"passive income\". Popular formats include newsletters, mobile apps, and subscription services.",
        pt: "Foque em trabalhos extras, produtos SaaS, cursos online e ferramentas de marketing digital. Use terminologia de negócios americana como \"monetizar\", \"escalar\" e \"renda passiva\". Formatos populares incluem newsletters, aplicativos móveis e serviços de assinatura.",
    },
    CountryContext {
        country: "Brazil",
        en: "Focus on WhatsApp business solutions, Instagram marketing, local e-commerce, and extra income opportunities. Use Brazilian Portuguese expressions and consider PIX payments, local marketplaces like Mercado Livre, and social selling strategies.",
        pt: "Foque em soluções de negócios para WhatsApp, marketing no Instagram, e-commerce local e oportunidades de renda extra. Use expressões do português brasileiro e considere pagamentos PIX, marketplaces locais como Mercado Livre e estratégias de venda social.",
    },
    CountryContext {
        country: "Namibia",
        en: "Focus on accessible, low-cost digital products like simple PDFs with video tutorials, basic mobile solutions, and community-driven content. Prioritize motivational and educational content that works with limited internet connectivity.",
        pt: "Foque em produtos digitais acessíveis e de baixo custo como PDFs simples com tutoriais em vídeo, soluções móveis básicas e conteúdo comunitário. Priorize conteúdo motivacional e educativo que funcione com conectividade limitada à internet.",
    },
    CountryContext {
        country: "United Kingdom",
        en: "Focus on professional development tools, fintech solutions, and premium content. Use British terminology and consider compliance with UK regulations. Popular formats include webinars, professional certifications, and B2B tools.",
        pt: "Foque em ferramentas de desenvolvimento profissional, soluções fintech e conteúdo premium. Use terminologia britânica e considere conformidade com regulamentações do Reino Unido. Formatos populares incluem webinars, certificações profissionais e ferramentas B2B.",
    },
    CountryContext {
        country: "Germany",
        en: "Focus on engineering solutions, productivity tools, and privacy-focused products. Consider GDPR compliance and German preference for quality and precision. Popular formats include technical courses, software tools, and detailed guides.",
        pt: "Foque em soluções de engenharia, ferramentas de produtividade e produtos focados em privacidade. Considere conformidade GDPR e preferência alemã por qualidade e precisão. Formatos populares incluem cursos técnicos, ferramentas de software e guias detalhados.",
    },
];

/// Guidance text for `country` in `language`, falling back to the
/// [`DEFAULT_COUNTRY`] entry for unknown countries.
pub fn country_context(country: &str, language: Language) -> &'static str {
    let entry = CONTEXTS
        .iter()
        .find(|c| c.country == country)
        .or_else(|| CONTEXTS.iter().find(|c| c.country == DEFAULT_COUNTRY))
        .unwrap_or(&CONTEXTS[0]);
    match language {
        Language::En => entry.en,
        Language::Pt => entry.pt,
    }
}

/// Country names that carry a dedicated context entry.
#[cfg(test)]
pub(crate) fn known_countries() -> impl Iterator<Item = &'static str> {
    CONTEXTS.iter().map(|c| c.country)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryOption {
    pub code: &'static str,
    pub flag: &'static str,
    pub name: LocalizedName,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocalizedName {
    pub en: &'static str,
    pub pt: &'static str,
}

const fn country(code: &'static str, flag: &'static str, en: &'static str, pt: &'static str) -> CountryOption {
    CountryOption { code, flag, name: LocalizedName { en, pt } }
}

/// Countries offered by the client's target-country selector.
pub const SUPPORTED_COUNTRIES: &[CountryOption] = &[
    country("United States", "🇺🇸", "United States", "Estados Unidos"),
    country("Brazil", "🇧🇷", "Brazil", "Brasil"),
    country("United Kingdom", "🇬🇧", "United Kingdom", "Reino Unido"),
    country("Germany", "🇩🇪", "Germany", "Alemanha"),
    country("Canada", "🇨🇦", "Canada", "Canadá"),
    country("Australia", "🇦🇺", "Australia", "Austrália"),
    country("France", "🇫🇷", "France", "França"),
    country("Namibia", "🇳🇦", "Namibia", "Namíbia"),
    country("South Africa", "🇿🇦", "South Africa", "África do Sul"),
    country("Mexico", "🇲🇽", "Mexico", "México"),
];
