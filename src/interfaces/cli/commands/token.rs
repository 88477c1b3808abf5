//! Issue development token command

use colored::Colorize;

use crate::api::jwt::{JwtService, TokenRequest};
use crate::config::get_config;
use crate::interfaces::cli::CliError;

pub fn issue_token(
    user: String,
    email: Option<String>,
    name: Option<String>,
    minutes: Option<u64>,
) -> Result<(), CliError> {
    let config = get_config();
    let jwt = JwtService::from_config(&config.auth);
    let minutes = minutes.unwrap_or(config.auth.issued_token_minutes);

    let token = jwt.issue(&TokenRequest {
        owner_id: user,
        email,
        full_name: name,
        ttl_minutes: minutes,
    })?;

    eprintln!(
        "{} {}",
        "Token valid for minutes:".dimmed(),
        minutes.to_string().blue()
    );
    println!("{}", token);
    Ok(())
}
