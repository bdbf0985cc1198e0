//! Parameter error types

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Invalid configuration (e.g. unknown parameter, name too long)
    #[error("invalid parameter configuration")]
    InvalidConfig,
    /// Store is full
    #[error("parameter store full")]
    StoreFull,
    /// Read-only parameter cannot be modified
    #[error("parameter is read-only")]
    ReadOnly,
    /// New value has a different type than the registered one
    #[error("parameter type mismatch")]
    TypeMismatch,
}
