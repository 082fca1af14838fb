use thiserror::Error;

use crate::behavioral::state::VendingError;

/// Every fallible operation in the catalogue returns this error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("unknown {kind} '{name}'")]
    UnknownVariant { kind: &'static str, name: String },

    #[error("request '{request}' reached the end of the chain unhandled")]
    Unhandled { request: String },

    #[error("snapshot index {index} is out of range (history holds {len})")]
    SnapshotOutOfRange { index: usize, len: usize },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("product {product} is not available")]
    OutOfStock { product: u32 },

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Vending(#[from] VendingError),
}

impl CatalogError {
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            name: name.into(),
        }
    }

    pub fn unhandled(request: impl Into<String>) -> Self {
        Self::Unhandled {
            request: request.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a caller passing a name nothing is registered under.
    pub fn is_unknown_variant(&self) -> bool {
        matches!(self, Self::UnknownVariant { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_message() {
        let err = CatalogError::unknown("eviction policy", "random");
        assert_eq!(err.to_string(), "unknown eviction policy 'random'");
        assert!(err.is_unknown_variant());
    }

    #[test]
    fn test_vending_error_converts() {
        let err: CatalogError = VendingError::OutOfStock.into();
        assert!(matches!(err, CatalogError::Vending(VendingError::OutOfStock)));
        assert!(!err.is_unknown_variant());
    }
}
