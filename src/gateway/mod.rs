mod client;
mod traits;
mod types;

pub use client::GatewayClient;
pub use traits::CategoryStore;
pub use types::Category;
