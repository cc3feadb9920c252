use thiserror::Error;

/// Errors returned by [`crate::NamedRegExp`].
#[derive(Error, Debug)]
pub enum Error {
    /// The engine rejected the rewritten pattern.
    #[error("invalid regular expression `{pattern}`: {err}")]
    Compile {
        /// The rewritten pattern, as it was passed to the engine.
        pattern: String,
        /// The error reported by the engine.
        #[source]
        err: Box<fancy_regex::Error>,
    },

    /// The flags contain an unknown or repeated flag.
    #[error("invalid flags `{0}`")]
    InvalidFlags(String),

    /// The engine failed while matching, for instance because it reached
    /// its backtracking limit.
    #[error(transparent)]
    Engine(#[from] fancy_regex::Error),
}
