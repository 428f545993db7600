//! Construction settings.
//!
//! # Examples
//!
//! ```
//! use suffix_tree::{Algorithm, Alphabet, SuffixTreeBuilder};
//!
//! let tree = SuffixTreeBuilder::new()
//!     .algorithm(Algorithm::McCreight)
//!     .alphabet(Alphabet::Dna)
//!     .sentinel(b'#')
//!     .build("GATTACA")?;
//! assert_eq!(tree.text(), b"GATTACA#");
//! # Ok::<(), suffix_tree::Error>(())
//! ```

use std::fmt;

use tracing::{debug, debug_span};

use crate::error::{Error, Result};
use crate::node::dna_slot;
use crate::text::IndexedText;
use crate::tree::SuffixTree;
use crate::{mccreight, naive};

/// Sentinel appended to the text unless another is configured.
pub const DEFAULT_SENTINEL: u8 = b'$';

/// The construction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Inserts every suffix from the root. Quadratic in the worst case.
    Naive,
    /// Reuses the previous insertion point through suffix links. Linear.
    #[default]
    McCreight,
}

/// How child tables are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alphabet {
    /// Any byte; children live in a hash map.
    #[default]
    Bytes,
    /// `A`, `C`, `G` and `T` only; children live in a fixed array with one
    /// extra slot for the sentinel.
    Dna,
}

impl Alphabet {
    fn check(self, source: &[u8], sentinel: u8) -> Result<()> {
        match self {
            Alphabet::Bytes => Ok(()),
            Alphabet::Dna => {
                if b"ACGT".contains(&sentinel) {
                    return Err(Error::SentinelInAlphabet {
                        sentinel: sentinel as char,
                        alphabet: self,
                    });
                }
                // The sentinel itself is reported by `IndexedText::new`.
                match source.iter().position(|&ch| dna_slot(ch, sentinel).is_none()) {
                    Some(position) => Err(Error::SymbolOutsideAlphabet {
                        symbol: source[position] as char,
                        position,
                        alphabet: self,
                    }),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Bytes => write!(f, "byte"),
            Alphabet::Dna => write!(f, "DNA"),
        }
    }
}

/// Builder for [`SuffixTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixTreeBuilder {
    sentinel: u8,
    alphabet: Alphabet,
    algorithm: Algorithm,
}

impl Default for SuffixTreeBuilder {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            alphabet: Alphabet::default(),
            algorithm: Algorithm::default(),
        }
    }
}

impl SuffixTreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte appended to the text. It must not occur in the text.
    #[must_use]
    pub fn sentinel(mut self, sentinel: u8) -> Self {
        self.sentinel = sentinel;
        self
    }

    #[must_use]
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Appends the sentinel to `text` and builds its suffix tree.
    ///
    /// # Errors
    ///
    /// Fails if `text` contains the sentinel or, for [`Alphabet::Dna`], a
    /// symbol other than `A`, `C`, `G` and `T`.
    pub fn build(&self, text: impl AsRef<[u8]>) -> Result<SuffixTree> {
        let source = text.as_ref();
        let span = debug_span!("build", algorithm = ?self.algorithm, alphabet = %self.alphabet, len = source.len());
        let _enter = span.enter();

        self.alphabet.check(source, self.sentinel)?;
        let text = IndexedText::new(source, self.sentinel)?;
        let mut tree = SuffixTree::with_text(text, self.alphabet);
        match self.algorithm {
            Algorithm::Naive => naive::construct(&mut tree)?,
            Algorithm::McCreight => mccreight::construct(&mut tree)?,
        }
        debug!(nodes = tree.node_count(), leaves = tree.leaf_count(), "suffix tree built");
        Ok(tree)
    }
}
