pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown diagram dialect: {name} (expected nodes, labeled or progression)")]
    UnknownDialect { name: String },

    #[error("Invalid @{directive} value: {value}")]
    InvalidDirective { directive: String, value: String },
}
