use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use warden_core::{Entity, StoreError, StoreResult, TenantCode, TenantScoped};

/// Tenant-isolated table keyed by `(tenant, key)`.
///
/// Reads never observe another tenant's rows. A poisoned lock is reported as
/// [`StoreError::Backend`] instead of being silently treated as empty.
#[derive(Debug)]
pub struct TenantTable<K, V> {
    name: &'static str,
    inner: RwLock<HashMap<(TenantCode, K), V>>,
}

impl<K, V> TenantTable<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<(TenantCode, K), V>>> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend(format!("{} table lock poisoned", self.name)))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<(TenantCode, K), V>>> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend(format!("{} table lock poisoned", self.name)))
    }
}

impl<K, V> TenantTable<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn get(&self, tenant: &TenantCode, key: &K) -> StoreResult<Option<V>> {
        let map = self.read()?;
        Ok(map.get(&(tenant.clone(), key.clone())).cloned())
    }

    /// Rows for every key in `keys` that exists; unknown keys are skipped.
    pub fn get_many<'k>(
        &self,
        tenant: &TenantCode,
        keys: impl IntoIterator<Item = &'k K>,
    ) -> StoreResult<Vec<V>>
    where
        K: 'k,
    {
        let map = self.read()?;
        Ok(keys
            .into_iter()
            .filter_map(|k| map.get(&(tenant.clone(), k.clone())).cloned())
            .collect())
    }

    pub fn upsert(&self, tenant: &TenantCode, key: K, value: V) -> StoreResult<()> {
        let mut map = self.write()?;
        map.insert((tenant.clone(), key), value);
        Ok(())
    }

    /// Insert or replace an entity under its own tenant and id.
    pub fn put(&self, value: V) -> StoreResult<()>
    where
        V: Entity<Id = K> + TenantScoped,
    {
        let key = (value.tenant_code().clone(), value.id().clone());
        let mut map = self.write()?;
        map.insert(key, value);
        Ok(())
    }

    /// Rows of `tenant` matching `predicate`.
    pub fn filter(&self, tenant: &TenantCode, predicate: impl Fn(&V) -> bool) -> StoreResult<Vec<V>> {
        let map = self.read()?;
        Ok(map
            .iter()
            .filter(|((t, _), v)| t == tenant && predicate(v))
            .map(|(_, v)| v.clone())
            .collect())
    }

    /// Drop every row of `tenant`.
    pub fn clear_tenant(&self, tenant: &TenantCode) -> StoreResult<()> {
        let mut map = self.write()?;
        map.retain(|(t, _), _| t != tenant);
        Ok(())
    }
}
