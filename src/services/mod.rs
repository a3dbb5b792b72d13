pub mod identity;
pub mod upload;

pub use identity::MockIdentityProvider;
