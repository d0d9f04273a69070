pub mod domain;
pub mod error;
pub mod traits;
pub mod view;

pub use domain::*;
pub use error::*;
pub use traits::*;
