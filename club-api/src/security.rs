//! Access control and request validation.

pub mod rbac;
pub mod validation;

pub use rbac::require_role;
pub use validation::{FormRules, ValidatedForm};
