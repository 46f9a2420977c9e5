/// This crate measures how close two texts are by the angle between
/// their bag-of-words frequency vectors.
pub mod vectorizer;
pub mod utils;
pub mod error;

/// Document Vector
/// The top-level struct of this crate.
/// It turns one text source (a string, a byte stream or a file) into a
/// token frequency vector and answers read-only queries about it.
///
/// Internally, it holds:
/// - The token -> count mapping (arbitrary precision counts)
/// - The number of lines consumed
/// - The total number of tokens, duplicates included
///
/// Tokens are maximal runs of ASCII letters, case-folded to lowercase.
/// Fragments that contain digits or underscores are discarded.
///
/// Comparison against another mapping is available as a dot product,
/// a cosine similarity, or an angular distance in radians
/// (0 for identical composition, π/2 for no shared vocabulary).
///
/// # Errors
/// The lenient constructors (`from_path`, `from_reader`) never fail: an
/// unavailable source is logged through `tracing` and yields an empty vector.
/// Use `try_from_path` / `try_from_reader` to receive a `SourceError` instead.
pub use vectorizer::document::DocumentVector;

/// Token Frequency structure
/// The accumulator behind `DocumentVector` construction.
/// It counts tokens exactly and can be used on its own.
pub use vectorizer::token::TokenFrequency;

/// Tokenizer
/// Splits on non-word characters, lowercases, and keeps pure alphabetic tokens.
pub use vectorizer::token::Tokenizer;

/// Token -> count mapping exchanged with callers.
pub use vectorizer::token::TermCounts;

/// Source Error
/// Raised by the fallible constructors when a source cannot be opened or read.
pub use error::SourceError;
