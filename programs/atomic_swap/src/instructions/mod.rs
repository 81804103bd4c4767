pub mod open;
pub mod settle;

pub use open::*;
pub use settle::*;
