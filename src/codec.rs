use rand::seq::SliceRandom;
use rand::Rng;

use crate::alphabet::Alphabet;
use crate::fold::fold_letter;

/// Separator inserted between every pair of adjacent tokens in an encoded
/// stream: ZERO WIDTH SPACE, invisible when rendered and never part of an
/// emoji sequence (emoji joiners use U+200D). Splitting on it recovers the
/// exact token sequence without guessing emoji boundaries.
pub const TOKEN_SEPARATOR: char = '\u{200B}';

/// Whitespace marker token emitted for a plain space in the input.
const SPACE_TOKEN: &str = " ";

/// Encoder/decoder over a shared read-only [`Alphabet`].
///
/// Encoding picks one symbol uniformly at random per letter occurrence, so
/// repeated calls on the same input usually differ. Decoding is the
/// deterministic inverse and never fails: unknown input passes through.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Codec<'a> {
    /// Create a codec over an alphabet.
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Create a codec over the built-in default alphabet.
    pub fn with_builtin_alphabet() -> Codec<'static> {
        Codec::new(Alphabet::builtin())
    }

    /// Encode text into an emoji stream using the thread-local RNG.
    pub fn encode(&self, text: &str) -> String {
        self.encode_with_rng(text, &mut rand::thread_rng())
    }

    /// Encode text into an emoji stream with a caller-supplied RNG
    /// (seedable in tests, session-scoped under concurrency).
    ///
    /// Per input character, in order: a letter is folded (accents stripped,
    /// uppercased) and replaced by a randomly chosen symbol for that letter;
    /// a plain space becomes the whitespace marker; everything else passes
    /// through as a literal token. Letters with no symbol set pass through
    /// unchanged.
    pub fn encode_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut out = String::new();
        let mut first = true;
        for ch in text.chars() {
            if !first {
                out.push(TOKEN_SEPARATOR);
            }
            first = false;

            if ch.is_alphabetic() {
                let symbol = fold_letter(ch)
                    .and_then(|letter| self.alphabet.symbols_for(letter))
                    .and_then(|symbols| symbols.choose(rng));
                match symbol {
                    Some(symbol) => out.push_str(symbol),
                    None => out.push(ch),
                }
            } else if ch == ' ' {
                out.push_str(SPACE_TOKEN);
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Decode an emoji stream back into text.
    ///
    /// If the token separator is present the stream is split on it and each
    /// part is exactly one token. Otherwise (hand-typed or legacy input) a
    /// greedy longest-match scan re-segments the raw scalar sequence, and
    /// whitespace runs of any length collapse to a single space.
    ///
    /// Total over all input: positions matching nothing copy through as
    /// literal characters.
    pub fn decode(&self, stream: &str) -> String {
        if stream.contains(TOKEN_SEPARATOR) {
            self.decode_tokens(stream)
        } else {
            self.decode_scan(stream)
        }
    }

    fn decode_tokens(&self, stream: &str) -> String {
        let mut out = String::new();
        for part in stream.split(TOKEN_SEPARATOR) {
            if part.is_empty() {
                continue;
            }
            if let Some(letter) = self.alphabet.letter_for(part) {
                out.push(letter);
            } else if part == SPACE_TOKEN {
                out.push(' ');
            } else {
                out.push_str(part);
            }
        }
        out
    }

    fn decode_scan(&self, stream: &str) -> String {
        let mut out = String::new();
        let mut rest = stream;
        while !rest.is_empty() {
            if let Some((symbol, letter)) = self.alphabet.match_prefix(rest) {
                out.push(letter);
                rest = &rest[symbol.len()..];
                continue;
            }
            let mut chars = rest.chars();
            let ch = match chars.next() {
                Some(ch) => ch,
                None => break,
            };
            if ch.is_whitespace() {
                out.push(' ');
                rest = rest.trim_start();
            } else {
                out.push(ch);
                rest = chars.as_str();
            }
        }
        out
    }
}
