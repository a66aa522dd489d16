pub mod config;
pub mod diff;
pub mod error;
pub mod gateway;
pub mod init;
pub mod normalize;
pub mod source;
pub mod sync;
