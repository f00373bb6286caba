pub mod error;
pub mod extract;
pub mod money;
pub mod types;

pub use error::handler_404;
pub use error::internal;
pub use error::ApiError;
pub use extract::ValidatedJson;
