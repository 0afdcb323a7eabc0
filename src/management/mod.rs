//! Token storage backends.
//!
//! The client only needs an opaque key-value store for its two token strings.
//! [`TokenStore`] is that contract; [`FileTokenStore`] keeps the tokens in the
//! local data directory and [`MemoryTokenStore`] keeps them for the lifetime
//! of the process.

mod file;
mod store;

pub use file::FileTokenStore;
pub use store::ACCESS_TOKEN_KEY;
pub use store::MemoryTokenStore;
pub use store::REFRESH_TOKEN_KEY;
pub use store::TokenStore;
