use unicode_normalization::UnicodeNormalization;

/// Search folding: NFKC then lower-case, so precomposed and decomposed
/// spellings of the same name compare equal.
pub fn fold(text: &str) -> String {
    let text: String = text.nfkc().collect();
    text.to_lowercase()
}

/// Lower-cases the whole name, then capitalises the first character of
/// each space-separated word. Runs of spaces are kept as-is.
pub fn title_case(text: &str) -> String {
    let text: String = text.nfkc().collect();
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
