pub mod admin;
pub mod health;
pub mod onboarding;
pub mod public;
pub mod redirect;

pub use admin::admin_v1_routes;
pub use health::{AppStartTime, HealthService, health_routes};
pub use onboarding::onboarding_routes;
pub use public::public_routes;
pub use redirect::redirect_routes;
