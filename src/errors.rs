use color_eyre::Report;

/// Error type for registry upsert operations
#[derive(Debug)]
pub enum UpsertError {
    /// The definition content is not valid
    Invalid(&'static str),
    /// The derived tag name collides with the one of a different keyword
    TagCollision {
        /// The tag both keywords derive to
        tag: String,
        /// The keyword already claiming the tag
        existing_keyword: String,
    },
    /// An unexpected error occurred
    Unexpected(Report),
}

/// Error type for registry update operations
#[derive(Debug)]
pub enum UpdateError {
    /// No trigger is identified by the given keyword
    NotFound,
    /// An unexpected error occurred
    Unexpected(Report),
}

/// Error type for registry remove operations
#[derive(Debug)]
pub enum RemoveError {
    /// No trigger is identified by the given keyword
    NotFound,
    /// Built-in triggers without user state cannot be removed
    NotRemovable,
    /// An unexpected error occurred
    Unexpected(Report),
}

impl UpsertError {
    pub fn into_report(self) -> Report {
        match self {
            UpsertError::Invalid(msg) => Report::msg(msg),
            UpsertError::TagCollision { tag, existing_keyword } => Report::msg(format!(
                "Tag '{tag}' is already taken by the '{existing_keyword}' trigger"
            )),
            UpsertError::Unexpected(report) => report,
        }
    }
}

impl RemoveError {
    pub fn into_report(self) -> Report {
        match self {
            RemoveError::NotFound => Report::msg("Trigger not found"),
            RemoveError::NotRemovable => Report::msg("Built-in triggers cannot be removed"),
            RemoveError::Unexpected(report) => report,
        }
    }
}

macro_rules! impl_from_report {
    ($err:ty) => {
        impl<T> From<T> for $err
        where
            T: Into<Report>,
        {
            fn from(err: T) -> Self {
                Self::Unexpected(err.into())
            }
        }
    };
}
impl_from_report!(UpsertError);
impl_from_report!(UpdateError);
impl_from_report!(RemoveError);
