use thiserror::Error;

/// Failures the front-end surfaces to its embedder.
///
/// Duplicate declarations are not part of this taxonomy: they are recovered
/// inside the parse (the first declaration wins) and only logged.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// The source or an imported file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The grammar rejected the input. The message carries the position and
    /// the expected token context reported by the grammar.
    #[error("syntax error in '{file}': {message}")]
    Parse { file: String, message: String },
}
