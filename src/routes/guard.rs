use super::location::Location;
use crate::auth::SessionState;

/// What to do with a navigation to a protected location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session probe is still running. Show a neutral indicator, nothing else.
    Wait,
    /// Not signed in. `from` is restored after a successful login.
    Redirect { to: Location, from: Location },
    Allow,
}

/// Decide from the session state alone.
pub fn guard(state: &SessionState, requested: &Location) -> GuardDecision {
    if state.loading {
        GuardDecision::Wait
    } else if !state.authenticated {
        GuardDecision::Redirect {
            to: Location::login(),
            from: requested.clone(),
        }
    } else {
        GuardDecision::Allow
    }
}
