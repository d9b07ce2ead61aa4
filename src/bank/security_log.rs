use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::ClientId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, parse_display::Display)]
pub enum SecurityReason {
    #[display("failed login attempt")]
    FailedLogin,
    #[display("account locked after failed logins")]
    LockedAfterFailedLogins,
    #[display("operation blocked during quiet hours")]
    QuietHoursBlocked,
}

/// Entry of the bank's append only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, parse_display::Display)]
#[display("{created_at} client_id={client_id} {reason}")]
pub struct SecurityEvent {
    pub client_id: ClientId,
    pub reason: SecurityReason,
    pub created_at: NaiveDateTime,
}
