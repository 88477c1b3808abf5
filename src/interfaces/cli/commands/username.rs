//! Check username command

use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::UsernameService;
use crate::storage::StorageFactory;

pub async fn check_username(username: String, offline: bool) -> Result<(), CliError> {
    let config = get_config();

    if offline {
        let normalized = crate::services::UsernamePolicy::from_config(&config.profile)
            .validate(&username)?;
        println!("{} {}", "Valid username:".green(), normalized.blue());
        return Ok(());
    }

    let stores = StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    let service = UsernameService::new(stores.profiles.clone(), &config.profile);

    let availability = service.availability(&username).await?;
    if availability.available {
        println!(
            "{} {}",
            "Available:".green(),
            availability.username.blue()
        );
        Ok(())
    } else {
        let reason = availability.error.unwrap_or_default();
        println!("{} {}", "Unavailable:".red(), reason.white());
        Err(CliError::ValidationError(reason))
    }
}
