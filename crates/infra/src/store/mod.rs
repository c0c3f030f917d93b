//! In-memory storage adapters.

mod in_memory;
mod tenant_table;

pub use in_memory::InMemoryAuthorityStore;
pub use tenant_table::TenantTable;
