pub mod backend;
pub mod error;
pub mod http_backend;
pub mod verify_outcome;

pub use backend::{ActorHandle, OtpService, ProfileChannel};
pub use error::{ClientError, Result};
pub use http_backend::HttpBackend;
pub use verify_outcome::VerifyOutcome;
