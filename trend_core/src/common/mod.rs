pub mod enums;
pub mod error;
