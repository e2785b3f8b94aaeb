use thiserror::Error;

/// Why a value could not be moved out of a cell or holder.
///
/// The cell is left untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TakeError {
    #[error("cannot take a value out of an empty cell")]
    Empty,

    /// Aliased contents are owned elsewhere and can only be borrowed.
    #[error("cannot take ownership of an aliased value")]
    Aliased,

    #[error("cell holds a `{actual}`, not a `{requested}`")]
    Mismatch {
        requested: &'static str,
        actual: &'static str,
    },
}
