pub mod error;
pub mod rules;
pub mod runtime;
pub mod validation;

pub use error::DomainError;
pub use runtime::RuntimeType;
