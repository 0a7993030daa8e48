pub mod claims;
pub mod errors;
pub mod handler;
pub mod options;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use options::IssueOptions;
pub use options::Namespace;
