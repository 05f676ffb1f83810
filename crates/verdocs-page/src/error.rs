//! Compile and evaluation error types.

/// Error returned when a document fails to compile.
///
/// Carries the offending location where the parser can recover one; line
/// numbers are 1-based and count from the start of the raw text, front
/// matter included.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Front matter between `---` fences is not valid YAML.
    #[error("Invalid front matter starting at line {line}: {source}")]
    FrontMatter {
        /// Line the front matter block starts on.
        line: usize,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A container component was opened but never closed.
    #[error("Unclosed component '{name}' opened at line {line}")]
    UnclosedComponent {
        /// Component name.
        name: String,
        /// Line of the opening fence.
        line: usize,
    },
    /// A closing fence appeared with no open container.
    #[error("Unexpected component close at line {line}")]
    UnexpectedClose {
        /// Line of the stray closing fence.
        line: usize,
    },
    /// Malformed component reference syntax.
    #[error("Malformed component reference at line {line}, column {column}: {message}")]
    Syntax {
        /// Line of the malformed reference.
        line: usize,
        /// Column (1-based) where parsing failed.
        column: usize,
        /// What was wrong.
        message: String,
    },
}

/// Error returned when a compiled module fails to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// A component reference names nothing in the registry.
    #[error("Unknown component '{name}'")]
    UnknownComponent {
        /// The unresolved component name.
        name: String,
    },
}
