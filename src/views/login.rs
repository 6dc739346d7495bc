use dialoguer::{Input, Password};

use super::ViewError;
use crate::auth::LoginForm;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Where the login view gets its username and password from.
pub trait LoginPrompt: Send + Sync {
    /// Credentials for the given attempt (counting from 1), or `None` to give up.
    fn credentials(&self, attempt: u32) -> Result<Option<LoginForm>, ViewError>;

    /// The server turned the last attempt down.
    fn rejected(&self, _message: &str) {}
}

/// Credentials supplied up front, tried exactly once.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl LoginPrompt for StaticCredentials {
    fn credentials(&self, attempt: u32) -> Result<Option<LoginForm>, ViewError> {
        Ok((attempt == 1).then(|| LoginForm::new(&self.username, &self.password)))
    }
}

/// Asks on the terminal for whatever was not given on the command line.
pub struct TerminalPrompt {
    username: Option<String>,
    password: Option<String>,
    max_attempts: u32,
}

impl TerminalPrompt {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        TerminalPrompt {
            username,
            password,
            max_attempts: 3,
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> ViewError {
    ViewError::new(format!("Could not read credentials: {}", e))
}

impl LoginPrompt for TerminalPrompt {
    fn credentials(&self, attempt: u32) -> Result<Option<LoginForm>, ViewError> {
        if attempt > self.max_attempts {
            return Ok(None);
        }

        // Values from the command line only count for the first try.
        let preset = |value: &Option<String>| value.clone().filter(|_| attempt == 1);

        let username = match preset(&self.username) {
            Some(username) => username,
            None => Input::<String>::new()
                .with_prompt("Username")
                .with_initial_text(self.username.clone().unwrap_or_default())
                .interact_text()
                .map_err(prompt_error)?,
        };
        let password = match preset(&self.password) {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(prompt_error)?,
        };
        Ok(Some(LoginForm::new(username, password)))
    }

    fn rejected(&self, message: &str) {
        eprintln!("{}", message);
    }
}
