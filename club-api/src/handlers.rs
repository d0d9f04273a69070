pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod finance;
pub mod fines;
pub mod payments;
pub mod players;
pub mod settings;
