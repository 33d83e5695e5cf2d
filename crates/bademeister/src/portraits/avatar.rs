use serde::Serialize;

const ANONYMOUS: &str = "🧑";

/// What a player card shows: the portrait when there is one, initials otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub name: String,
    pub image_url: Option<String>,
    pub initials: String,
}

impl Avatar {
    pub fn for_player(name: &str, image_url: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            image_url,
            initials: initials(name),
        }
    }
}

/// First letter of the first and last word, upper-cased.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return ANONYMOUS.to_string();
    };

    let mut letters: String = first.chars().take(1).collect();
    if words.len() > 1 {
        letters.extend(last.chars().take(1));
    }
    letters.to_uppercase()
}
