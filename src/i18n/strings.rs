/// All localized UI chrome for a locale.
///
/// Calculator-specific text (names, subtitles, SEO bundles) lives in each
/// calculator's configuration; this table only covers the page frame.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Navigation ====================
    /// First breadcrumb item
    pub home: &'static str,

    /// Heading of the browse index
    pub browse_title: &'static str,

    /// Link text pointing back to the browse index
    pub browse_link: &'static str,

    // ==================== Categories ====================
    pub category_health: &'static str,
    pub category_finance: &'static str,
    pub category_math: &'static str,
    pub category_everyday: &'static str,
    pub category_conversion: &'static str,

    // ==================== Calculator Surface ====================
    pub calculate_button: &'static str,
    pub results_heading: &'static str,
    pub presets_heading: &'static str,

    // ==================== Unavailable / Not Found ====================
    /// Heading shown when a calculator exists but cannot be loaded yet
    pub not_available_title: &'static str,

    /// Body shown when a calculator exists but cannot be loaded yet
    pub not_available_body: &'static str,

    /// Heading of the 404 page
    pub not_found_title: &'static str,

    /// Body of the 404 page
    pub not_found_body: &'static str,
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    home: "Home",
    browse_title: "All calculators",
    browse_link: "Browse all calculators",

    category_health: "Health",
    category_finance: "Finance",
    category_math: "Math",
    category_everyday: "Everyday life",
    category_conversion: "Conversion",

    calculate_button: "Calculate",
    results_heading: "Results",
    presets_heading: "Examples",

    not_available_title: "Coming soon",
    not_available_body: "This calculator is not available yet. We are working on it.",
    not_found_title: "Page not found",
    not_found_body: "We could not find the calculator you were looking for.",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LocaleStrings = LocaleStrings {
    home: "Inicio",
    browse_title: "Todas las calculadoras",
    browse_link: "Ver todas las calculadoras",

    category_health: "Salud",
    category_finance: "Finanzas",
    category_math: "Matemáticas",
    category_everyday: "Vida cotidiana",
    category_conversion: "Conversión",

    calculate_button: "Calcular",
    results_heading: "Resultados",
    presets_heading: "Ejemplos",

    not_available_title: "Próximamente",
    not_available_body: "Esta calculadora aún no está disponible. Estamos trabajando en ella.",
    not_found_title: "Página no encontrada",
    not_found_body: "No pudimos encontrar la calculadora que buscabas.",
};

// ==================== Portuguese Strings ====================

pub const PORTUGUESE_STRINGS: LocaleStrings = LocaleStrings {
    home: "Início",
    browse_title: "Todas as calculadoras",
    browse_link: "Ver todas as calculadoras",

    category_health: "Saúde",
    category_finance: "Finanças",
    category_math: "Matemática",
    category_everyday: "Dia a dia",
    category_conversion: "Conversão",

    calculate_button: "Calcular",
    results_heading: "Resultados",
    presets_heading: "Exemplos",

    not_available_title: "Em breve",
    not_available_body: "Esta calculadora ainda não está disponível. Estamos trabalhando nela.",
    not_found_title: "Página não encontrada",
    not_found_body: "Não encontramos a calculadora que você procurava.",
};

// ==================== French Strings ====================

pub const FRENCH_STRINGS: LocaleStrings = LocaleStrings {
    home: "Accueil",
    browse_title: "Tous les calculateurs",
    browse_link: "Voir tous les calculateurs",

    category_health: "Santé",
    category_finance: "Finances",
    category_math: "Mathématiques",
    category_everyday: "Vie quotidienne",
    category_conversion: "Conversion",

    calculate_button: "Calculer",
    results_heading: "Résultats",
    presets_heading: "Exemples",

    not_available_title: "Bientôt disponible",
    not_available_body: "Ce calculateur n'est pas encore disponible. Nous y travaillons.",
    not_found_title: "Page introuvable",
    not_found_body: "Nous n'avons pas trouvé le calculateur que vous cherchiez.",
};

// ==================== German Strings ====================

pub const GERMAN_STRINGS: LocaleStrings = LocaleStrings {
    home: "Startseite",
    browse_title: "Alle Rechner",
    browse_link: "Alle Rechner ansehen",

    category_health: "Gesundheit",
    category_finance: "Finanzen",
    category_math: "Mathematik",
    category_everyday: "Alltag",
    category_conversion: "Umrechnung",

    calculate_button: "Berechnen",
    results_heading: "Ergebnisse",
    presets_heading: "Beispiele",

    not_available_title: "Demnächst verfügbar",
    not_available_body: "Dieser Rechner ist noch nicht verfügbar. Wir arbeiten daran.",
    not_found_title: "Seite nicht gefunden",
    not_found_body: "Wir konnten den gesuchten Rechner nicht finden.",
};
