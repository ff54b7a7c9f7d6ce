//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g., `ValidationError`, `ContentError`) are defined
//! next to the code that raises them. This module provides the shared
//! classification used by the command surface when it reports rejections.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure domain has its own error type
//! - **Severity Classification**: Player mistakes and data bugs are never conflated

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the acting side may retry once the situation changes
/// - **Validation**: the command is illegal in the current state
/// - **Content**: the catalogs are missing referenced data (a data bug)
/// - **Internal**: the engine detected an inconsistency in its own state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later in the same turn.
    ///
    /// Examples: not enough energy, ability on cooldown
    Recoverable,

    /// Validation error - the command is illegal as issued.
    ///
    /// Examples: card not in hand, target out of range, acting out of turn
    Validation,

    /// Content-integrity error - referenced catalog data is missing.
    ///
    /// Examples: unknown card id, unknown enemy template
    Content,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate engine bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Content => "content",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error points at bad data or an engine bug rather
    /// than a player mistake.
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::Content | Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who must act (player, content author, engine dev)
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
