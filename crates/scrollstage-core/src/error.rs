#![forbid(unsafe_code)]

//! Error types for timeline construction and lifecycle misuse.
//!
//! Every error here is a contract violation raised synchronously at the
//! offending call. None of them is transient, so nothing retries.

use std::fmt;

use crate::catalog::ItemId;

/// Top-level error for catalog, controller, and host interactions.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// The catalog or configuration is unusable.
    Configuration(ConfigurationError),
    /// A lifecycle operation was called in the wrong state.
    InvalidState(InvalidState),
    /// A required element handle was absent or not attached to the visual tree.
    MissingHandle {
        /// Which handle list the missing handle belongs to.
        role: HandleRole,
        /// Catalog index with no usable handle.
        index: usize,
    },
    /// The scroll host refused to pin the region.
    Pin(PinError),
}

/// Why a catalog or configuration was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The catalog has no items.
    EmptyCatalog,
    /// Two catalog items share an id.
    DuplicateId(ItemId),
    /// A configuration field is out of range.
    InvalidConfig {
        /// Field name as it appears in the config struct.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Lifecycle violations of the controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    /// `attach` was called while a subscription is live.
    AlreadyAttached,
    /// `attach` was called after `detach`; a detached controller is spent.
    Detached,
    /// A scroll tick arrived with no live subscription.
    NotAttached,
}

/// Which of the two aligned handle lists an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Stacked topic card.
    Card,
    /// Descriptive content panel.
    Content,
}

/// Reasons a scroll host can refuse a pin request.
#[derive(Debug, Clone, PartialEq)]
pub enum PinError {
    /// The host does not know the region.
    UnknownRegion(u64),
    /// The region is already pinned by another live subscription.
    RegionBusy(u64),
    /// Host-specific failure.
    Host(String),
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::InvalidState(err) => write!(f, "invalid state: {err}"),
            Self::MissingHandle { role, index } => {
                write!(f, "missing {role} handle at index {index}")
            }
            Self::Pin(err) => write!(f, "pin failed: {err}"),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "catalog must contain at least one item"),
            Self::DuplicateId(id) => write!(f, "duplicate catalog id {id}"),
            Self::InvalidConfig { field, reason } => write!(f, "`{field}` {reason}"),
        }
    }
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => write!(f, "controller is already attached"),
            Self::Detached => write!(f, "controller has been detached"),
            Self::NotAttached => write!(f, "no live subscription"),
        }
    }
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("card"),
            Self::Content => f.write_str("content"),
        }
    }
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion(id) => write!(f, "unknown region {id}"),
            Self::RegionBusy(id) => write!(f, "region {id} is already pinned"),
            Self::Host(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Pin(err) => Some(err),
            Self::InvalidState(err) => Some(err),
            Self::MissingHandle { .. } => None,
        }
    }
}

impl std::error::Error for ConfigurationError {}
impl std::error::Error for InvalidState {}
impl std::error::Error for PinError {}

impl From<ConfigurationError> for TimelineError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<InvalidState> for TimelineError {
    fn from(err: InvalidState) -> Self {
        Self::InvalidState(err)
    }
}

impl From<PinError> for TimelineError {
    fn from(err: PinError) -> Self {
        Self::Pin(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_index() {
        let err = TimelineError::MissingHandle {
            role: HandleRole::Content,
            index: 3,
        };
        assert_eq!(err.to_string(), "missing content handle at index 3");
    }

    #[test]
    fn config_error_converts_and_chains() {
        let err: TimelineError = ConfigurationError::DuplicateId(ItemId(7)).into();
        assert_eq!(
            err.to_string(),
            "configuration error: duplicate catalog id 7"
        );
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("duplicate catalog id 7"));
    }

    #[test]
    fn invalid_config_mentions_field() {
        let err = ConfigurationError::InvalidConfig {
            field: "per_item",
            reason: "must be finite and non-negative".into(),
        };
        assert_eq!(err.to_string(), "`per_item` must be finite and non-negative");
    }
}
