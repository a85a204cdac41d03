//! Data Store
//!
//! In-memory state guarded by `parking_lot::RwLock`, persisted wholesale
//! as one JSON file per resource under `<work_dir>/data/`. Writes go to a
//! temp file first and are renamed into place, so a crash mid-write never
//! leaves a truncated file. Concurrent writers follow last-writer-wins;
//! there is no optimistic locking.

mod seed;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use shared::models::{
    AuditLogEntry, Material, Order, PriceList, Product, PromoCode, Subscription, TariffPlan,
    Template, User,
};
use tracing::{info, warn};

use crate::utils::{AppError, AppResult};

/// Stored user: public view plus the credential hash, which never leaves
/// the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

pub struct DataStore {
    root: PathBuf,
    pub users: RwLock<Vec<UserRecord>>,
    pub products: RwLock<Vec<Product>>,
    pub materials: RwLock<Vec<Material>>,
    pub templates: RwLock<Vec<Template>>,
    pub tariff_plans: RwLock<Vec<TariffPlan>>,
    pub promo_codes: RwLock<Vec<PromoCode>>,
    pub orders: RwLock<Vec<Order>>,
    pub subscriptions: RwLock<Vec<Subscription>>,
    /// Per-user price lists, keyed by phone number
    pub price_lists: RwLock<HashMap<String, PriceList>>,
    pub audit_log: RwLock<Vec<AuditLogEntry>>,
    next_order_id: AtomicU64,
    next_subscription_id: AtomicU64,
    next_audit_id: AtomicU64,
}

impl DataStore {
    /// Open the store rooted at `<work_dir>/data`, loading persisted
    /// resources and seeding catalog defaults on first run.
    pub fn open(work_dir: &Path) -> AppResult<Self> {
        let root = work_dir.join("data");
        fs::create_dir_all(&root)
            .map_err(|e| AppError::Internal(format!("Failed to create data dir: {}", e)))?;

        let users: Vec<UserRecord> = load_or(&root, "users.json", Vec::new)?;
        let products = load_or(&root, "products.json", seed::default_products)?;
        let materials = load_or(&root, "materials.json", seed::default_materials)?;
        let templates = load_or(&root, "templates.json", seed::default_templates)?;
        let tariff_plans = load_or(&root, "tariff_plans.json", seed::default_tariff_plans)?;
        let promo_codes: Vec<PromoCode> = load_or(&root, "promo_codes.json", Vec::new)?;
        let orders: Vec<Order> = load_or(&root, "orders.json", Vec::new)?;
        let subscriptions: Vec<Subscription> = load_or(&root, "subscriptions.json", Vec::new)?;
        let price_lists: HashMap<String, PriceList> =
            load_or(&root, "price_lists.json", HashMap::new)?;
        let audit_log: Vec<AuditLogEntry> = load_or(&root, "audit_log.json", Vec::new)?;

        let next_order_id = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let next_subscription_id = subscriptions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let next_audit_id = audit_log.iter().map(|e| e.id).max().unwrap_or(0) + 1;

        info!(
            users = users.len(),
            products = products.len(),
            orders = orders.len(),
            "data store loaded from {}",
            root.display()
        );

        Ok(Self {
            root,
            users: RwLock::new(users),
            products: RwLock::new(products),
            materials: RwLock::new(materials),
            templates: RwLock::new(templates),
            tariff_plans: RwLock::new(tariff_plans),
            promo_codes: RwLock::new(promo_codes),
            orders: RwLock::new(orders),
            subscriptions: RwLock::new(subscriptions),
            price_lists: RwLock::new(price_lists),
            audit_log: RwLock::new(audit_log),
            next_order_id: AtomicU64::new(next_order_id),
            next_subscription_id: AtomicU64::new(next_subscription_id),
            next_audit_id: AtomicU64::new(next_audit_id),
        })
    }

    // ========== ID allocation ==========

    pub fn next_order_id(&self) -> u64 {
        self.next_order_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn next_subscription_id(&self) -> u64 {
        self.next_subscription_id.fetch_add(1, Ordering::SeqCst)
    }

    fn next_audit_id(&self) -> u64 {
        self.next_audit_id.fetch_add(1, Ordering::SeqCst)
    }

    // ========== Persistence ==========

    pub fn persist_users(&self) -> AppResult<()> {
        save_json(&self.root, "users.json", &*self.users.read())
    }

    pub fn persist_products(&self) -> AppResult<()> {
        save_json(&self.root, "products.json", &*self.products.read())
    }

    pub fn persist_materials(&self) -> AppResult<()> {
        save_json(&self.root, "materials.json", &*self.materials.read())
    }

    pub fn persist_templates(&self) -> AppResult<()> {
        save_json(&self.root, "templates.json", &*self.templates.read())
    }

    pub fn persist_tariff_plans(&self) -> AppResult<()> {
        save_json(&self.root, "tariff_plans.json", &*self.tariff_plans.read())
    }

    pub fn persist_promo_codes(&self) -> AppResult<()> {
        save_json(&self.root, "promo_codes.json", &*self.promo_codes.read())
    }

    pub fn persist_orders(&self) -> AppResult<()> {
        save_json(&self.root, "orders.json", &*self.orders.read())
    }

    pub fn persist_subscriptions(&self) -> AppResult<()> {
        save_json(&self.root, "subscriptions.json", &*self.subscriptions.read())
    }

    pub fn persist_price_lists(&self) -> AppResult<()> {
        save_json(&self.root, "price_lists.json", &*self.price_lists.read())
    }

    pub fn persist_audit_log(&self) -> AppResult<()> {
        save_json(&self.root, "audit_log.json", &*self.audit_log.read())
    }

    // ========== Users ==========

    pub fn find_user(&self, phone: &str) -> Option<UserRecord> {
        self.users.read().iter().find(|r| r.user.phone == phone).cloned()
    }

    pub fn insert_user(&self, record: UserRecord) -> AppResult<()> {
        let mut users = self.users.write();
        if users.iter().any(|r| r.user.phone == record.user.phone) {
            return Err(AppError::Conflict(format!(
                "User {} already exists",
                record.user.phone
            )));
        }
        users.push(record);
        drop(users);
        self.persist_users()
    }

    /// Apply a mutation to one user record and persist
    pub fn update_user<F>(&self, phone: &str, mutate: F) -> AppResult<User>
    where
        F: FnOnce(&mut UserRecord),
    {
        let updated = {
            let mut users = self.users.write();
            let record = users
                .iter_mut()
                .find(|r| r.user.phone == phone)
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", phone)))?;
            mutate(record);
            record.user.clone()
        };
        self.persist_users()?;
        Ok(updated)
    }

    // ========== Price lists ==========

    /// Snapshot of one user's price list, empty if never saved
    pub fn price_list(&self, phone: &str) -> PriceList {
        self.price_lists.read().get(phone).cloned().unwrap_or_default()
    }

    /// Replace one user's price list wholesale and persist
    pub fn put_price_list(&self, phone: &str, mut list: PriceList) -> AppResult<PriceList> {
        list.last_updated = Some(chrono::Utc::now().to_rfc3339());
        self.price_lists
            .write()
            .insert(phone.to_string(), list.clone());
        self.persist_price_lists()?;
        Ok(list)
    }

    /// Apply a mutation to one user's price list and persist
    pub fn update_price_list<F, T>(&self, phone: &str, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut PriceList) -> AppResult<T>,
    {
        let outcome = {
            let mut lists = self.price_lists.write();
            let list = lists.entry(phone.to_string()).or_default();
            let outcome = mutate(list)?;
            list.last_updated = Some(chrono::Utc::now().to_rfc3339());
            outcome
        };
        self.persist_price_lists()?;
        Ok(outcome)
    }

    // ========== Audit trail ==========

    /// Append one entry to the audit trail. Persistence failures are
    /// logged but never fail the action being audited.
    pub fn audit(&self, user: Option<User>, action: impl Into<String>) {
        let entry = AuditLogEntry {
            id: self.next_audit_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            user,
            action: action.into(),
        };
        self.audit_log.write().push(entry);
        if let Err(e) = self.persist_audit_log() {
            warn!(target: "store", error = %e, "failed to persist audit log");
        }
    }
}

/// Load a resource file, falling back to `default` when absent
fn load_or<T, F>(root: &Path, name: &str, default: F) -> AppResult<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let path = root.join(name);
    if !path.exists() {
        return Ok(default());
    }
    let bytes = fs::read(&path)
        .map_err(|e| AppError::Internal(format!("Failed to read {}: {}", name, e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Internal(format!("Corrupt data file {}: {}", name, e)))
}

/// Atomic whole-file write: temp file in the same directory, then rename
fn save_json<T: Serialize>(root: &Path, name: &str, value: &T) -> AppResult<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize {}: {}", name, e)))?;
    let tmp = root.join(format!("{}.tmp", name));
    let path = root.join(name);
    fs::write(&tmp, bytes)
        .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", name, e)))?;
    fs::rename(&tmp, &path)
        .map_err(|e| AppError::Internal(format!("Failed to replace {}: {}", name, e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PriceTier, UserRole, UserStatus};
    use uuid::Uuid;

    fn store() -> (tempfile::TempDir, DataStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn user_record(phone: &str) -> UserRecord {
        UserRecord {
            user: User {
                phone: phone.to_string(),
                name: "Test".to_string(),
                status: UserStatus::Active,
                role: UserRole::User,
            },
            password_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_open_seeds_catalog() {
        let (_dir, store) = store();
        assert!(!store.products.read().is_empty());
        assert!(!store.materials.read().is_empty());
        assert!(!store.tariff_plans.read().is_empty());
        assert!(store.users.read().is_empty());
    }

    #[test]
    fn test_reopen_reads_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = DataStore::open(dir.path()).unwrap();
            store.insert_user(user_record("+998901234567")).unwrap();
            let mut list = PriceList::default();
            list.variants.insert(
                "vizitka".to_string(),
                vec![PriceTier {
                    id: Uuid::new_v4().to_string(),
                    soni: 100.0,
                    narxi: 1000.0,
                    summasi: 100_000.0,
                    additional_services: None,
                    izoh: None,
                }],
            );
            store.put_price_list("+998901234567", list).unwrap();
        }

        let store = DataStore::open(dir.path()).unwrap();
        assert!(store.find_user("+998901234567").is_some());
        let list = store.price_list("+998901234567");
        assert_eq!(list.variants["vizitka"].len(), 1);
        assert!(list.last_updated.is_some());
    }

    #[test]
    fn test_insert_user_conflict() {
        let (_dir, store) = store();
        store.insert_user(user_record("+998901234567")).unwrap();
        let err = store.insert_user(user_record("+998901234567")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_update_price_list_failure_does_not_bump_timestamp() {
        let (_dir, store) = store();
        let result: AppResult<()> = store.update_price_list("+998901234567", |_| {
            Err(AppError::Validation("nope".to_string()))
        });
        assert!(result.is_err());
        assert!(store.price_list("+998901234567").last_updated.is_none());
    }

    #[test]
    fn test_audit_ids_are_monotonic() {
        let (_dir, store) = store();
        store.audit(None, "first");
        store.audit(None, "second");
        let log = store.audit_log.read();
        assert_eq!(log.len(), 2);
        assert!(log[0].id < log[1].id);
    }

    #[test]
    fn test_order_id_sequence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let first = {
            let store = DataStore::open(dir.path()).unwrap();
            let id = store.next_order_id();
            let order = Order {
                id,
                user: "+998901234567".to_string(),
                items: Vec::new(),
                created_at: chrono::Utc::now().to_rfc3339(),
                status: Default::default(),
                subtotal: 0.0,
                promo_code: None,
                discount: 0.0,
                additional_services: Vec::new(),
                total_cost: 0.0,
                customer: shared::models::CustomerInfo {
                    name: "Test".to_string(),
                    phone: "+998901234567".to_string(),
                },
                delivery: shared::models::DeliveryInfo {
                    method: Default::default(),
                    address: None,
                },
                payment_method: "cash".to_string(),
            };
            store.orders.write().push(order);
            store.persist_orders().unwrap();
            id
        };

        let store = DataStore::open(dir.path()).unwrap();
        assert!(store.next_order_id() > first);
    }
}
