//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod payment;
pub mod rate;
pub mod room;
pub mod tarification;

pub use common::*;
pub use payment::*;
pub use rate::*;
pub use room::*;
pub use tarification::*;
