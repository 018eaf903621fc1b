/// English noun singularization for `plural` route parameters
///
/// Rule based, covering the common suffixes plus a short list of irregular
/// and uncountable words. Case of the first letter is preserved.

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("leaves", "leaf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
    ("movies", "movie"),
    ("shoes", "shoe"),
    ("indices", "index"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "fish",
    "species",
    "data",
];

/// Returns the singular form of `word`
///
/// # Examples
///
/// ```
/// use most_router::singularize;
///
/// assert_eq!(singularize("products"), "product");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("Boxes"), "Box");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_case(word, singular);
    }

    if lower.ends_with("ies") && lower.len() > 3 {
        return format!("{}y", &word[..word.len() - 3]);
    }

    let stem_len = if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
        || lower.ends_with("zzes")
    {
        word.len() - 2
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.len()
    } else if lower.ends_with('s') && lower.len() > 1 {
        word.len() - 1
    } else {
        word.len()
    };

    word[..stem_len].to_string()
}

/// Applies the first-letter case of `original` to `replacement`
fn match_case(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if !upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
