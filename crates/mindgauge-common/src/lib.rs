pub mod errors;
pub mod types;

pub use errors::{AssistantError, AuthError, OrchestrationError, StoreError, TransportError};
pub use types::{TestResult, TestType};

pub type Result<T> = std::result::Result<T, AssistantError>;
