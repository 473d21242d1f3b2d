use thiserror::Error;

/// Reasons why text could not be turned into a Data Matrix.
///
/// Encoding is deterministic, so repeating a failed call with the same
/// input fails the same way. No partial result is produced on error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The text needs more data codewords than the encoder supports.
    #[error("text needs {needed} data codewords, at most {max} are supported")]
    CapacityExceeded { needed: usize, max: usize },

    /// An explicit size `(rows, columns)` is not a known symbol size.
    #[error("no symbol with a {rows}x{columns} data area exists")]
    UnknownSize { rows: usize, columns: usize },

    /// The number of codewords does not match the chosen symbol size.
    ///
    /// Happens when an explicit size is too small for the text, or when
    /// a hand-made codeword sequence is placed into the wrong size.
    #[error("symbol holds {expected} codewords but {actual} were given")]
    PlacementSizeMismatch { expected: usize, actual: usize },

    /// The character has no single byte ASCII codeword.
    #[error("character {0:?} can not be encoded")]
    UnsupportedCharacter(char),
}
