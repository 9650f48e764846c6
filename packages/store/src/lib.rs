pub mod config;
pub mod session;

mod memory;
pub use memory::MemoryTokenStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod cookie;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use cookie::CookieTokenStore;

pub use config::{AdminConfig, ConfigError};
pub use session::{SessionToken, TokenStore, TOKEN_KEY};
