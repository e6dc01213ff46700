//! Configuration validation logic.

use std::path::Path;
use std::sync::OnceLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum number of concurrent download workers.
pub const MAX_WORKERS: usize = 32;

/// Maximum number of days that can be requested.
pub const MAX_DAYS: u32 = 365;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_email(&config.account.email)?;
    validate_password(&config.account.password)?;
    validate_days(config.options.days)?;
    validate_workers(config.options.workers)?;
    validate_output_directory(&config.options.output_directory)?;

    Ok(())
}

/// Validate the account email.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::MissingConfig("email".to_string()));
    }

    if !email_pattern().is_match(email) {
        return Err(Error::ConfigValidation {
            field: "email".to_string(),
            message: format!("'{}' is not a valid email address", email),
        });
    }

    // Check for placeholder values
    let lower = email.to_lowercase();
    if lower.contains("replaceme") || lower.starts_with("your_email@") {
        return Err(Error::ConfigValidation {
            field: "email".to_string(),
            message: "Email appears to be a placeholder. Please provide your Arlo account email."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the account password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingConfig("password".to_string()));
    }

    let lower = password.to_lowercase();
    if lower == "replaceme" || lower == "your_password" {
        return Err(Error::ConfigValidation {
            field: "password".to_string(),
            message: "Password appears to be a placeholder.".to_string(),
        });
    }

    Ok(())
}

/// Validate the number of days to download.
pub fn validate_days(days: u32) -> Result<()> {
    if days > MAX_DAYS {
        return Err(Error::ConfigValidation {
            field: "days".to_string(),
            message: format!("At most {} days can be requested (got {})", MAX_DAYS, days),
        });
    }

    Ok(())
}

/// Validate the worker count.
pub fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(Error::ConfigValidation {
            field: "workers".to_string(),
            message: format!(
                "Worker count must be between 1 and {} (got {})",
                MAX_WORKERS, workers
            ),
        });
    }

    Ok(())
}

/// Validate the output directory.
pub fn validate_output_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Err(Error::MissingConfig("output_directory".to_string()));
    }

    if dir.exists() && !dir.is_dir() {
        return Err(Error::ConfigValidation {
            field: "output_directory".to_string(),
            message: format!("'{}' exists and is not a directory", dir.display()),
        });
    }

    Ok(())
}
