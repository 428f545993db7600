//! Error types for suffix tree construction.

use thiserror::Error;

use crate::builder::Alphabet;

/// Errors a caller can recover from when building a suffix tree.
///
/// Broken construction invariants are not represented here: they panic with
/// the offending node id and offset instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input already contains the sentinel that is appended to it.
    #[error("text contains the sentinel {sentinel:?} at position {position}")]
    SentinelInText { sentinel: char, position: usize },

    /// The input holds a symbol the configured child table cannot store.
    #[error("symbol {symbol:?} at position {position} is outside the {alphabet} alphabet")]
    SymbolOutsideAlphabet {
        symbol: char,
        position: usize,
        alphabet: Alphabet,
    },

    /// The configured sentinel is itself a letter of the fixed alphabet.
    #[error("sentinel {sentinel:?} is a letter of the {alphabet} alphabet")]
    SentinelInAlphabet { sentinel: char, alphabet: Alphabet },

    /// Matching a suffix of the text against the tree ran off the end of the
    /// suffix without a mismatch, so the text is not sentinel-terminated.
    #[error("suffix {suffix} matched to its end without a mismatch")]
    UnterminatedMatch { suffix: usize },
}

/// A specialized `Result` type for suffix tree construction.
pub type Result<T> = std::result::Result<T, Error>;
