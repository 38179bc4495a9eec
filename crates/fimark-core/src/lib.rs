pub mod config;
pub mod logging;

pub mod error;
pub mod marker;
pub mod stamp;
pub mod stream;
pub mod style;
pub mod verify;
