use std::fmt;

/// Wikipedia language edition a candidate title is tried against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    English,
    German,
}

impl Locale {
    /// Lookup order: every English title goes out before any German one.
    pub const ORDER: [Locale; 2] = [Locale::English, Locale::German];

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
        }
    }

    fn titles(self, name: &str) -> Vec<String> {
        match self {
            Locale::English => vec![
                format!("{name} (footballer)"),
                name.to_string(),
                format!("{name} (soccer)"),
                format!("{name} (football player)"),
            ],
            Locale::German => vec![format!("{name} (Fußballspieler)"), name.to_string()],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One page title to ask the portrait source about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub locale: Locale,
    pub title: String,
}

/// Candidates in strict priority order for a display name.
pub fn candidates_for(name: &str) -> Vec<Candidate> {
    Locale::ORDER
        .iter()
        .flat_map(|&locale| {
            locale
                .titles(name)
                .into_iter()
                .map(move |title| Candidate { locale, title })
        })
        .collect()
}
