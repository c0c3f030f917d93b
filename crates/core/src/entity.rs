//! Entity traits: identity + tenant partitioning.

use crate::id::TenantCode;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Entities partitioned by tenant.
///
/// Every store read must filter on the tenant returned here; rows whose tenant
/// differs from the one in scope must never reach a caller.
pub trait TenantScoped {
    fn tenant_code(&self) -> &TenantCode;

    fn belongs_to(&self, tenant: &TenantCode) -> bool {
        self.tenant_code() == tenant
    }
}
