pub mod click;
pub mod link;
pub mod profile;

pub use click::Entity as ClickEntity;
pub use link::Entity as LinkEntity;
pub use profile::Entity as ProfileEntity;
