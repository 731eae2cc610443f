//! Session errors.

use gambit_core::InvalidMove;

/// Errors that can occur while handling session input.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A command was given without a required argument.
    #[error("{command} needs an argument")]
    MissingArgument {
        /// The command that was missing its argument.
        command: &'static str,
    },

    /// A square name such as `e4` could not be parsed.
    #[error("invalid square: {text}")]
    InvalidSquare {
        /// The text that failed to parse.
        text: String,
    },

    /// A move in coordinate notation could not be parsed.
    #[error("invalid move notation: {text}")]
    InvalidNotation {
        /// The text that failed to parse.
        text: String,
    },

    /// `set` named an option the session does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name.
        name: String,
    },

    /// `set` was given a value the option does not accept.
    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The engine rejected a move.
    #[error(transparent)]
    Move(#[from] InvalidMove),

    /// A game snapshot could not be encoded or decoded.
    #[error("bad game snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
