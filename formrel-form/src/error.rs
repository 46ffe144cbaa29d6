use formrel_model::RelationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{0}' is not an input")]
    NotAnInput(String),

    #[error("duplicate field id: {0}")]
    DuplicateField(String),

    /// A listener failed while handling a notification.
    #[error(transparent)]
    Relation(#[from] RelationError),
}

/// Lets custom actions use `?` on form calls. Listener errors pass through unchanged.
impl From<FormError> for RelationError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Relation(inner) => inner,
            other => RelationError::Collaborator(other.to_string()),
        }
    }
}
