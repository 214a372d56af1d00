use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a letter for table lookup: strip combining diacritical marks via
/// canonical decomposition, take the first base scalar, uppercase it.
///
/// Returns `None` only for characters whose decomposition is entirely
/// combining marks (which cannot happen for alphabetic input).
pub fn fold_letter(c: char) -> Option<char> {
    let base = std::iter::once(c).nfd().find(|d| !is_combining_mark(*d))?;
    base.to_uppercase().next()
}

/// Apply [`fold_letter`] to every alphabetic character, leaving everything
/// else untouched. Decoding an encoded stream yields the folded form of the
/// input: casing and accents are not restored.
pub fn fold(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphabetic() {
                fold_letter(c).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
