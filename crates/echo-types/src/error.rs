//! Error types for the EchoCore engine.
//!
//! All errors use the `EC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Match lifecycle errors
//! - 2xx: Entitlement / quota errors
//! - 3xx: Rate-limit errors
//! - 4xx: Profile / status errors
//! - 9xx: General / infrastructure errors
//!
//! Every denial here is an expected, recoverable-by-caller outcome and is
//! returned as a typed result, never panicked. Denial reasons stay
//! distinguishable so the caller can render the right user-facing message
//! ("upgrade to rewind" vs "come back tomorrow").

use thiserror::Error;

use crate::{MatchId, MeteredAction, Plan, UserId};

/// Central error enum for all EchoCore operations.
#[derive(Debug, Error)]
pub enum EchoError {
    // =================================================================
    // Match Lifecycle Errors (1xx)
    // =================================================================
    /// The requested match was not found in the registry.
    #[error("EC_ERR_100: Match not found: {0}")]
    MatchNotFound(MatchId),

    /// An unexpired match for this pair already exists in the current epoch.
    #[error("EC_ERR_101: Duplicate match for pair: {0}")]
    DuplicateMatch(MatchId),

    /// The match already transitioned to ACTIVE — rewind window is closed.
    #[error("EC_ERR_102: Rewind window closed: match is no longer PENDING")]
    RewindWindowClosed,

    /// Entitlement denied the rewind (plan or quota).
    #[error("EC_ERR_103: Rewind unavailable: {reason}")]
    RewindUnavailable { reason: String },

    /// A user cannot match with themselves.
    #[error("EC_ERR_104: Self-match blocked: both sides are the same user")]
    SelfMatchBlocked,

    /// The match's TTL elapsed before the attempted operation.
    #[error("EC_ERR_105: Match expired: {0}")]
    MatchExpired(MatchId),

    /// The acting user is not a member of the match.
    #[error("EC_ERR_106: User {0} is not a participant of this match")]
    NotAParticipant(UserId),

    // =================================================================
    // Entitlement / Quota Errors (2xx)
    // =================================================================
    /// The daily allowance for this action is used up on a known plan.
    #[error("EC_ERR_200: Quota exhausted for {action}: daily limit {limit} reached")]
    QuotaExhausted { action: MeteredAction, limit: u32 },

    /// The action is not offered at this plan at all.
    #[error("EC_ERR_201: Plan {plan} does not include {action}")]
    PlanInsufficient { action: MeteredAction, plan: Plan },

    // =================================================================
    // Rate-Limit Errors (3xx)
    // =================================================================
    /// Abuse-sensitive action bounded: too many attempts in the window.
    #[error("EC_ERR_300: Rate limited: {limit} per {window_secs}s exceeded")]
    RateLimited { limit: u32, window_secs: i64 },

    // =================================================================
    // Profile / Status Errors (4xx)
    // =================================================================
    /// No freshness record exists for this user.
    #[error("EC_ERR_400: Profile not found: {0}")]
    ProfileNotFound(UserId),

    // =================================================================
    // General / Infrastructure (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("EC_ERR_900: Internal error: {0}")]
    Internal(String),

    /// An external collaborator (clock, store) is unreachable. Surfaced
    /// to the caller as-is — retry policy is the caller's responsibility.
    #[error("EC_ERR_901: Unavailable: {0}")]
    Unavailable(String),

    /// Configuration error (invalid windows, limits, etc.).
    #[error("EC_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EchoError>;

#[cfg(test)]
mod tests {
    use crate::{PairKey, Plan};

    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let pair = PairKey::new(UserId::new(), UserId::new());
        let err = EchoError::MatchNotFound(MatchId::deterministic(&pair, 0));
        let msg = format!("{err}");
        assert!(msg.starts_with("EC_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn quota_exhausted_display() {
        let err = EchoError::QuotaExhausted {
            action: MeteredAction::Swipe,
            limit: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("EC_ERR_200"));
        assert!(msg.contains("SWIPE"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn plan_insufficient_display() {
        let err = EchoError::PlanInsufficient {
            action: MeteredAction::Rewind,
            plan: Plan::Free,
        };
        let msg = format!("{err}");
        assert!(msg.contains("EC_ERR_201"));
        assert!(msg.contains("FREE"));
        assert!(msg.contains("REWIND"));
    }

    #[test]
    fn all_errors_have_ec_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(EchoError::RewindWindowClosed),
            Box::new(EchoError::SelfMatchBlocked),
            Box::new(EchoError::RateLimited {
                limit: 10,
                window_secs: 3600,
            }),
            Box::new(EchoError::ProfileNotFound(UserId::new())),
            Box::new(EchoError::Unavailable("store unreachable".into())),
            Box::new(EchoError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("EC_ERR_"),
                "Error missing EC_ERR_ prefix: {msg}"
            );
        }
    }
}
