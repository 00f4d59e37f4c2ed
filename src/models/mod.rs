pub mod ack;
pub mod common;
pub mod country;
pub mod place;
pub mod user;

pub use ack::*;
pub use common::*;
pub use country::*;
pub use place::*;
pub use user::*;
