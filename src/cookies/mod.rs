pub mod base;
pub mod file_store;
pub mod memory_store;

// Re-export the primary cookie items so code outside can do
// "use crate::cookies::{CookieStore, read_cookie};"
pub use base::{create_cookie_store, read_cookie, CookieStore, CookieStoreError, SetCookie};
pub use file_store::FileCookieStore;
pub use memory_store::MemoryCookieStore;
