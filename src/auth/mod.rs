//! The authenticated request pipeline.
//!
//! Leaves first: `CsrfTokenProvider` makes sure a CSRF cookie exists,
//! `AuthenticatedFetch` wraps the HTTP client with the CSRF header and the
//! cookie jar, and `SessionManager` owns the signed-in state.

pub mod csrf;
pub mod fetch;
pub mod session;

pub use csrf::CsrfTokenProvider;
pub use fetch::{is_unsafe_method, AuthenticatedFetch};
pub use session::{LoginForm, SessionManager, SessionState, SessionStatus};
