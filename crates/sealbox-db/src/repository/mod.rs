//! SurrealDB repository implementations.

mod membership;
mod organization;
mod provider_key;
mod tenant_config;
mod user;

pub use membership::SurrealMembershipRepository;
pub use organization::SurrealOrganizationRepository;
pub use provider_key::SurrealProviderKeyRepository;
pub use tenant_config::SurrealTenantConfigRepository;
pub use user::SurrealUserRepository;
