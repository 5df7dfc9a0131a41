//! Ingredient-list parsing.
//!
//! Label text like `"sugar, emulsifier (322)"` is split into individual
//! ingredient names for prompt construction. Additive numbers such as the
//! `322` above are dropped; the surrounding words carry the meaning.

/// Split free-text ingredient lists into individual ingredient names.
///
/// Commas and parentheses are treated as delimiters. Each piece is trimmed;
/// pieces that are empty, a single character, or entirely digits are
/// discarded. Input order is preserved and duplicates are kept.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split([',', '(', ')'])
        .map(str::trim)
        .filter(|piece| piece.chars().count() > 1)
        .filter(|piece| !piece.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}
