/// Error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mandatory argument was not supplied.
    MissingArgument {
        /// Function that was called
        function: String,

        /// Position of the missing argument
        index: usize,
    },

    /// An argument could not be read as the expected type.
    ArgumentType {
        /// Position (or keyword) of the argument
        arg: String,

        /// Type the function expected
        expected: &'static str,
    },

    /// An argument had the right type but an unusable value.
    InvalidArgument(String),

    /// The consolidation function name is not known.
    UnsupportedConsolidation(String),

    /// No function is registered under this name.
    UnknownFunction(String),

    /// Two function families registered the same public name.
    DuplicateFunction(String),

    /// The target expression could not be parsed.
    InvalidExpression {
        /// Byte offset at which parsing failed
        offset: usize,
    },

    /// The request was cancelled or ran past its deadline.
    Cancelled,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument { function, index } => {
                write!(f, "{function}: missing argument #{index}")
            }
            Self::ArgumentType { arg, expected } => {
                write!(f, "argument {arg} is not a {expected}")
            }
            Self::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            Self::UnsupportedConsolidation(name) => {
                write!(f, "unsupported consolidation function {name}")
            }
            Self::UnknownFunction(name) => {
                write!(f, "unknown function {name}")
            }
            Self::DuplicateFunction(name) => {
                write!(f, "function {name} is registered twice")
            }
            Self::InvalidExpression { offset } => {
                write!(f, "invalid expression at offset {offset}")
            }
            Self::Cancelled => {
                write!(f, "Cancelled")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
