//! emoji-cipher: a reversible substitution cipher between Latin letters
//! and emoji glyphs.
//!
//! Each letter maps to a set of emoji symbols; encoding picks one symbol
//! uniformly at random per occurrence, decoding is the deterministic
//! inverse. Multi-codepoint emoji (ZWJ sequences, skin-tone modifiers,
//! flags) are treated as atomic symbols. Non-alphabetic input passes
//! through losslessly, and an invisible zero-width separator between
//! tokens keeps the stream unambiguously re-tokenizable. Streams without
//! separators (typed or pasted by hand) decode through a greedy
//! longest-match scan.
//!
//! ```
//! use emoji_cipher::Codec;
//!
//! let codec = Codec::with_builtin_alphabet();
//! let encoded = codec.encode("Hello!");
//! assert_eq!(codec.decode(&encoded), "HELLO!");
//! ```

pub mod alphabet;
pub mod codec;
pub mod error;
pub mod fold;

pub use alphabet::{Alphabet, AlphabetSummary};
pub use codec::{Codec, TOKEN_SEPARATOR};
pub use error::{CipherError, Result};
pub use fold::{fold, fold_letter};
