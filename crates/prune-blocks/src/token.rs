//! Whole-token identifier matching.

/// Characters that may form part of an identifier: `[A-Za-z0-9_$]`.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether `text[start..start + len]` is bounded by non-identifier characters.
pub fn is_whole_token(text: &str, start: usize, len: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[start + len..].chars().next();
    !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
}

/// Byte offsets of every whole-token occurrence of `name` in `text`.
///
/// # Example
/// ```
/// use prune_blocks::token::token_positions;
///
/// let found: Vec<_> = token_positions("sync(); syncAll(); sync", "sync").collect();
/// assert_eq!(found, vec![0, 19]);
/// ```
pub fn token_positions<'a>(text: &'a str, name: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(name)
        .filter(move |(idx, _)| !name.is_empty() && is_whole_token(text, *idx, name.len()))
        .map(|(idx, _)| idx)
}
