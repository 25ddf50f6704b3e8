//! Parser error types for gocmd-parser.

/// Errors that can occur while loading, checking, or extracting a package.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("No non-test package found in {path}")]
    NoPackage { path: String },

    #[error("Multiple packages found in {path}: {}", names.join(", "))]
    MultiplePackages { path: String, names: Vec<String> },

    #[error("Parse failed for {file}:{line}: {message}")]
    ParseFailed {
        file: String,
        line: u32,
        message: String,
    },

    #[error("Type check failed at {file}:{line}: {message}")]
    TypeCheck {
        file: String,
        line: u32,
        message: String,
    },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
