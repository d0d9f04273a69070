pub mod account;
pub mod article;
pub mod expense;
pub mod finance;
pub mod fine;
pub mod money;
pub mod payment;
pub mod player;
pub mod reports;
pub mod setting;

pub use account::*;
pub use article::*;
pub use expense::*;
pub use finance::*;
pub use fine::*;
pub use money::*;
pub use payment::*;
pub use player::*;
pub use reports::*;
pub use setting::*;
