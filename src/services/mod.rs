//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI; every service holds store
//! handles, never a backend type.

mod analytics_service;
pub mod appearance;
pub mod device;
mod public_page;
mod redirect;
pub mod session;
pub mod username;

pub use analytics_service::{AnalyticsService, AnalyticsSummary, LinkClicks};
pub use appearance::AppearanceUpdate;
pub use device::classify_device;
pub use public_page::{PageMeta, PublicLink, PublicPage, PublicPageService, click_href};
pub use redirect::RedirectService;
pub use session::{AdminSession, LinkView, SessionRegistry, SessionSnapshot, SharedSession};
pub use username::{Availability, ClaimIdentity, UsernamePolicy, UsernameService};
