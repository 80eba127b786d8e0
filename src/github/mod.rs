pub mod api;
pub mod protection;
pub mod types;


pub use api::{HttpProtectionApi, ProtectionApi};
pub use protection::ProtectionClient;
pub use types::ProtectionTarget;
