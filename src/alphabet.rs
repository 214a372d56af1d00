use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::codec::TOKEN_SEPARATOR;
use crate::error::{CipherError, Result};
use crate::fold::fold_letter;

/// The default letter -> emoji mapping, in the on-disk line format
/// `LETTER,symbol1,symbol2,...,symbolN`.
const DEFAULT_ALPHABET_SRC: &str = include_str!("../alphabets/default.csv");

static DEFAULT_ALPHABET: Lazy<Alphabet> = Lazy::new(|| {
    Alphabet::parse(DEFAULT_ALPHABET_SRC).expect("embedded default alphabet is valid")
});

/// The cipher alphabet: a letter -> set-of-symbols mapping with its derived
/// reverse map and a longest-match index for decoding.
///
/// Built once from a mapping source, immutable afterwards, shared read-only
/// by all codec invocations.
#[derive(Debug, Clone)]
pub struct Alphabet {
    letter_to_symbols: HashMap<char, Vec<String>>,
    symbol_to_letter: HashMap<String, char>,
    /// All known symbols, longest (by scalar count) first, ties in
    /// letter/insertion order. No symbol follows a symbol it is a prefix of.
    symbols_by_length: Vec<String>,
}

impl Alphabet {
    /// Parse a mapping source: one `LETTER,symbol1,...,symbolN` record per
    /// line, blank lines ignored.
    ///
    /// Records whose letter field does not fold to a single ASCII letter are
    /// skipped, as are empty symbol fields. A symbol assigned to two
    /// different letters ends up under the last one (logged, not an error).
    ///
    /// # Errors
    /// Returns `CipherError::MalformedMapping` if no usable letters remain.
    pub fn parse(source: &str) -> Result<Self> {
        let mut letter_to_symbols: HashMap<char, Vec<String>> = HashMap::new();
        let mut symbol_to_letter: HashMap<String, char> = HashMap::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(',');
            let letter_field = fields.next().unwrap_or("").trim();
            let letter = match Self::parse_letter(letter_field) {
                Some(letter) => letter,
                None => {
                    tracing::debug!(field = letter_field, "skipping record with invalid letter");
                    continue;
                }
            };

            let mut symbols: Vec<String> = Vec::new();
            for field in fields {
                let symbol = field.trim();
                if symbol.is_empty() {
                    continue;
                }
                if symbol.contains(TOKEN_SEPARATOR) {
                    tracing::debug!(letter = %letter, "skipping symbol containing the token separator");
                    continue;
                }
                if !symbols.iter().any(|s| s == symbol) {
                    symbols.push(symbol.to_string());
                }
            }
            if symbols.is_empty() {
                tracing::debug!(letter = %letter, "skipping record with no symbols");
                continue;
            }

            // Last record for a letter wins: drop the previous symbol set
            // from the reverse map before installing the new one.
            if let Some(previous) = letter_to_symbols.remove(&letter) {
                for symbol in previous {
                    symbol_to_letter.remove(&symbol);
                }
            }
            for symbol in &symbols {
                if let Some(old) = symbol_to_letter.insert(symbol.clone(), letter) {
                    if old != letter {
                        tracing::warn!(
                            symbol = %symbol,
                            from = %old,
                            to = %letter,
                            "symbol reassigned between letters; last assignment wins"
                        );
                        if let Some(old_symbols) = letter_to_symbols.get_mut(&old) {
                            old_symbols.retain(|s| s != symbol);
                        }
                    }
                }
            }
            letter_to_symbols.insert(letter, symbols);
        }

        if letter_to_symbols.is_empty() {
            return Err(CipherError::MalformedMapping(
                "mapping source yielded no usable letters".to_string(),
            ));
        }

        let symbols_by_length = Self::build_match_index(&letter_to_symbols);

        Ok(Self {
            letter_to_symbols,
            symbol_to_letter,
            symbols_by_length,
        })
    }

    /// Load a mapping file from disk.
    ///
    /// # Errors
    /// `CipherError::MappingIo` if the file cannot be read,
    /// `CipherError::MalformedMapping` if it yields no usable letters.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// The built-in default alphabet (26 letters), parsed once per process.
    pub fn builtin() -> &'static Alphabet {
        &DEFAULT_ALPHABET
    }

    /// Reduce a letter field to a single uppercase ASCII letter, or reject it.
    fn parse_letter(field: &str) -> Option<char> {
        let mut chars = field.chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let folded = fold_letter(first)?;
        folded.is_ascii_alphabetic().then_some(folded)
    }

    /// Collect all symbols sorted by descending scalar count. The sort is
    /// stable over letter-then-insertion order, so matching is deterministic.
    fn build_match_index(letter_to_symbols: &HashMap<char, Vec<String>>) -> Vec<String> {
        let mut letters: Vec<&char> = letter_to_symbols.keys().collect();
        letters.sort();

        let mut symbols: Vec<String> = letters
            .into_iter()
            .flat_map(|letter| letter_to_symbols[letter].iter().cloned())
            .collect();
        symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        symbols
    }

    /// The symbol set for a letter, in source order.
    pub fn symbols_for(&self, letter: char) -> Option<&[String]> {
        self.letter_to_symbols.get(&letter).map(Vec::as_slice)
    }

    /// The letter a symbol decodes to.
    pub fn letter_for(&self, symbol: &str) -> Option<char> {
        self.symbol_to_letter.get(symbol).copied()
    }

    /// Greedy longest match: the longest known symbol that is a prefix of
    /// `input`, with its letter.
    pub fn match_prefix(&self, input: &str) -> Option<(&str, char)> {
        for symbol in &self.symbols_by_length {
            if input.starts_with(symbol.as_str()) {
                if let Some(&letter) = self.symbol_to_letter.get(symbol) {
                    return Some((symbol.as_str(), letter));
                }
            }
        }
        None
    }

    /// All known symbols, longest first.
    pub fn symbols_by_length(&self) -> &[String] {
        &self.symbols_by_length
    }

    /// Number of letters with at least one record.
    pub fn letter_count(&self) -> usize {
        self.letter_to_symbols.len()
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbol_to_letter.len()
    }

    /// Summary statistics for display.
    pub fn summary(&self) -> AlphabetSummary {
        let symbols_per_letter = self
            .letter_to_symbols
            .iter()
            .map(|(letter, symbols)| (*letter, symbols.len()))
            .collect();
        let longest_symbol_scalars = self
            .symbols_by_length
            .first()
            .map_or(0, |s| s.chars().count());

        AlphabetSummary {
            letters: self.letter_count(),
            symbols: self.symbol_count(),
            longest_symbol_scalars,
            symbols_per_letter,
        }
    }
}

/// Summary statistics for a loaded alphabet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphabetSummary {
    pub letters: usize,
    pub symbols: usize,
    /// Scalar count of the longest symbol (multi-codepoint sequences count
    /// every scalar)
    pub longest_symbol_scalars: usize,
    pub symbols_per_letter: BTreeMap<char, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let alphabet = Alphabet::parse("A,🅰️,🙈\nB,🅱️").unwrap();
        assert_eq!(alphabet.letter_count(), 2);
        assert_eq!(alphabet.symbol_count(), 3);
        assert_eq!(
            alphabet.symbols_for('A').unwrap(),
            &["🅰️".to_string(), "🙈".to_string()]
        );
        assert_eq!(alphabet.letter_for("🅱️"), Some('B'));
        assert_eq!(alphabet.letter_for("🤖"), None);
    }

    #[test]
    fn test_letter_field_folds() {
        let alphabet = Alphabet::parse("a,😀\né,😁").unwrap();
        assert_eq!(alphabet.letter_for("😀"), Some('A'));
        assert_eq!(alphabet.letter_for("😁"), Some('E'));
    }

    #[test]
    fn test_malformed_records_skipped() {
        // Multi-char letter field, empty letter field, record with no
        // symbols: all skipped, the one good record survives.
        let alphabet = Alphabet::parse("AB,😀\n,😀\nC\nD,😀").unwrap();
        assert_eq!(alphabet.letter_count(), 1);
        assert_eq!(alphabet.letter_for("😀"), Some('D'));
    }

    #[test]
    fn test_empty_symbol_fields_skipped() {
        let alphabet = Alphabet::parse("A,,😀,, ,").unwrap();
        assert_eq!(alphabet.symbols_for('A').unwrap(), &["😀".to_string()]);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let alphabet = Alphabet::parse("A,😀\r\n\r\n\nB,😁\r\n").unwrap();
        assert_eq!(alphabet.letter_count(), 2);
    }

    #[test]
    fn test_last_record_for_letter_wins() {
        let alphabet = Alphabet::parse("A,😀\nA,😁").unwrap();
        assert_eq!(alphabet.symbols_for('A').unwrap(), &["😁".to_string()]);
        // The overwritten record's symbol is gone from the reverse map too.
        assert_eq!(alphabet.letter_for("😀"), None);
    }

    #[test]
    fn test_symbol_reassignment_last_wins() {
        // The same symbol under two letters is tolerated: the reverse map
        // follows the last assignment and the symbol leaves the first
        // letter's set.
        let alphabet = Alphabet::parse("A,😀,😎\nB,😀").unwrap();
        assert_eq!(alphabet.letter_for("😀"), Some('B'));
        assert_eq!(alphabet.symbols_for('A').unwrap(), &["😎".to_string()]);
    }

    #[test]
    fn test_empty_source_fails() {
        assert!(matches!(
            Alphabet::parse(""),
            Err(CipherError::MalformedMapping(_))
        ));
        assert!(matches!(
            Alphabet::parse("\n\n  \n"),
            Err(CipherError::MalformedMapping(_))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            Alphabet::load("/nonexistent/alphabet.csv"),
            Err(CipherError::MappingIo(_))
        ));
    }

    #[test]
    fn test_match_index_longest_first() {
        // 👩‍🦽 is three scalars, 👩 is one: the longer symbol must be
        // scanned first so it is never shadowed by its prefix.
        let alphabet = Alphabet::parse("A,👩\nB,👩‍🦽").unwrap();
        let index = alphabet.symbols_by_length();
        assert_eq!(index[0], "👩‍🦽");
        assert_eq!(index[1], "👩");

        let counts: Vec<usize> = index.iter().map(|s| s.chars().count()).collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn test_match_prefix() {
        let alphabet = Alphabet::parse("A,👩\nB,👩‍🦽").unwrap();
        assert_eq!(alphabet.match_prefix("👩‍🦽xyz"), Some(("👩‍🦽", 'B')));
        assert_eq!(alphabet.match_prefix("👩xyz"), Some(("👩", 'A')));
        assert_eq!(alphabet.match_prefix("xyz"), None);
    }

    #[test]
    fn test_builtin_alphabet() {
        let alphabet = Alphabet::builtin();
        assert_eq!(alphabet.letter_count(), 26);
        assert_eq!(alphabet.symbol_count(), 278);
        assert_eq!(alphabet.letter_for("🅰️"), Some('A'));
        assert_eq!(alphabet.letter_for("🙈"), Some('A'));
        assert_eq!(alphabet.letter_for("🅱️"), Some('B'));
        // Multi-codepoint sequences are atomic symbols.
        assert_eq!(alphabet.letter_for("👩🏻‍🦽‍➡️"), Some('G'));
        assert_eq!(alphabet.letter_for("🇳🇵"), Some('B'));
    }

    #[test]
    fn test_builtin_summary() {
        let summary = Alphabet::builtin().summary();
        assert_eq!(summary.letters, 26);
        assert_eq!(summary.symbols, 278);
        assert_eq!(summary.symbols_per_letter[&'Z'], 4);
        assert!(summary.longest_symbol_scalars >= 7);
    }
}
