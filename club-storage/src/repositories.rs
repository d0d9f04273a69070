pub mod account;
pub mod article;
pub mod expense;
pub mod fine;
pub mod payment;
pub mod player;
pub mod setting;

pub use account::*;
pub use article::*;
pub use expense::*;
pub use fine::*;
pub use payment::*;
pub use player::*;
pub use setting::*;
