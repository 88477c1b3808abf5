mod config_gen;
mod token;
mod username;

pub use config_gen::config_generate;
pub use token::issue_token;
pub use username::check_username;
