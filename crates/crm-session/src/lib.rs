//! Client-side session logic: OTP login, readiness tracking, and the
//! profile-save coordinator that bridges the two.

pub mod countdown;
pub mod error;
pub mod otp_controller;
pub mod readiness;
pub mod retry;
pub mod save_coordinator;
pub mod session_context;

pub use countdown::{CountdownState, CountdownTimer};
pub use error::{OtpError, OtpResult, SaveError, SaveResult};
pub use otp_controller::{OtpController, OtpPhase};
pub use readiness::ReadinessMonitor;
pub use retry::{IsRetryable, RetrySchedule, with_retry};
pub use save_coordinator::{SaveCoordinator, SaveOutcome, SaveStatus};
pub use session_context::{SessionContext, SessionSnapshot};

#[cfg(test)]
mod tests;
