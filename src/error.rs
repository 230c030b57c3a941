//! Application error type.
//!
//! Every fallible operation returns `Result<_, AppError>`. The error carries the
//! process exit code so `main` can report it without inspecting the message.
//!
//! Exit codes:
//! - `2`: bad input, usage or I/O (files, CLI settings, mismatched lengths)
//! - `3`: data outside the model's domain (non-positive values, too few points)
//! - `4`: numeric or terminal failures (singular regression, draw errors)

/// Bad input, usage or I/O.
pub const EXIT_INPUT: u8 = 2;
/// Data that cannot be fitted.
pub const EXIT_DATA: u8 = 3;
/// Numeric or runtime failure.
pub const EXIT_NUMERIC: u8 = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(EXIT_DATA, message)
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(EXIT_NUMERIC, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_exit_codes() {
        assert_eq!(AppError::input("x").exit_code(), EXIT_INPUT);
        assert_eq!(AppError::data("x").exit_code(), EXIT_DATA);
        assert_eq!(AppError::numeric("x").exit_code(), EXIT_NUMERIC);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::data("x[0] = -1 is not strictly positive");
        assert_eq!(err.to_string(), "x[0] = -1 is not strictly positive");
    }
}
