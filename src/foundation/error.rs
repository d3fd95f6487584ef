/// Crate-wide result alias.
pub type RevealResult<T> = Result<T, RevealError>;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced by the reveal engine and its collaborators.
pub enum RevealError {
    /// A visible range violated `0 <= start <= end <= max_path_index`.
    #[error("invalid visible range [{start}, {end}]: {}", domain_text(.max_path_index))]
    RangeInvalid {
        /// Requested first path index.
        start: usize,
        /// Requested last path index (inclusive).
        end: usize,
        /// Largest valid path index, `None` when the drawing has no elements.
        max_path_index: Option<usize>,
    },

    /// The drawing source could not be parsed.
    #[error("source parse error: {0}")]
    SourceParse(String),

    /// A value failed validation at an API boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration or diagnostic (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure (IO, third-party crates).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn domain_text(max_path_index: &Option<usize>) -> String {
    match max_path_index {
        Some(max) => format!("valid domain is [0, {max}]"),
        None => "drawing has no elements".to_string(),
    }
}

impl RevealError {
    /// Build a [`RevealError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::SourceParse`].
    pub fn source_parse(msg: impl Into<String>) -> Self {
        Self::SourceParse(msg.into())
    }

    /// Build a [`RevealError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RevealError::RangeInvalid`].
    pub fn range_invalid(start: usize, end: usize, max_path_index: Option<usize>) -> Self {
        Self::RangeInvalid {
            start,
            end,
            max_path_index,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
