//! The equipment store: four collections behind a single writer.

use common::{OrderId, StorageKey};
use serde::{Serialize, de::DeserializeOwned};
use storage::{DocumentStorage, DocumentStorageExt};
use tokio::sync::Mutex;

use crate::error::{DomainError, ValidationError};
use crate::import::{ImportReport, RiderRow, parse_rider_rows};
use crate::{
    Collections, DeductionEntry, Deductions, EquipmentCounts, EquipmentItem, InventoryPool, Money,
    Order, OrderError, Rider, RiderCode, RiderForm, StoreConfig, Supervisor, SupervisorCode,
    SupervisorForm,
};

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub supervisor_count: usize,
    pub rider_count: usize,
    pub pending_orders: usize,
    pub inventory: EquipmentCounts,
    pub inventory_value: Money,
}

/// Owns the supervisors, riders, inventory pool and orders.
///
/// Every mutation runs under one lock: it works on a copy of the state,
/// writes all four documents, and only then replaces the state. A storage
/// failure therefore leaves the store unchanged.
pub struct EquipmentStore<S: DocumentStorage> {
    storage: S,
    config: StoreConfig,
    state: Mutex<Collections>,
}

impl<S: DocumentStorage> EquipmentStore<S> {
    /// Loads the store from `storage`.
    ///
    /// Each document is read on its own. A missing document yields the
    /// default; an unreadable one is logged and also yields the default.
    pub async fn load(storage: S, config: StoreConfig) -> Self {
        let supervisors = load_or_default(&storage, StorageKey::Supervisors, Vec::new).await;
        let riders = load_or_default(&storage, StorageKey::Riders, Vec::new).await;
        let inventory = load_or_default(&storage, StorageKey::Inventory, || {
            InventoryPool::new(config.initial_inventory)
        })
        .await;
        let orders = load_or_default(&storage, StorageKey::Orders, Vec::new).await;

        tracing::info!(
            supervisors = supervisors.len(),
            riders = riders.len(),
            orders = orders.len(),
            "equipment store loaded"
        );

        Self {
            storage,
            config,
            state: Mutex::new(Collections {
                supervisors,
                riders,
                inventory,
                orders,
            }),
        }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn persist(&self, state: &Collections) -> Result<(), DomainError> {
        self.storage
            .save(StorageKey::Supervisors, &state.supervisors)
            .await?;
        self.storage.save(StorageKey::Riders, &state.riders).await?;
        self.storage
            .save(StorageKey::Inventory, &state.inventory)
            .await?;
        self.storage.save(StorageKey::Orders, &state.orders).await?;
        Ok(())
    }

    async fn mutate<T, F>(&self, change: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Collections) -> Result<T, DomainError>,
    {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let outcome = change(&mut next)?;
        self.persist(&next).await?;
        *state = next;
        Ok(outcome)
    }
}

// Query methods
impl<S: DocumentStorage> EquipmentStore<S> {
    /// Returns a copy of all four collections.
    pub async fn snapshot(&self) -> Collections {
        self.state.lock().await.clone()
    }

    pub async fn supervisors(&self) -> Vec<Supervisor> {
        self.state.lock().await.supervisors.clone()
    }

    pub async fn riders(&self) -> Vec<Rider> {
        self.state.lock().await.riders.clone()
    }

    pub async fn inventory(&self) -> InventoryPool {
        self.state.lock().await.inventory
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }

    /// Returns the rider with `code`.
    pub async fn rider(&self, code: &RiderCode) -> Option<Rider> {
        let state = self.state.lock().await;
        state.riders.iter().find(|r| &r.code == code).cloned()
    }

    /// Returns the order with `id`.
    pub async fn order(&self, id: OrderId) -> Option<Order> {
        let state = self.state.lock().await;
        state.orders.iter().find(|o| o.id == id).cloned()
    }

    /// Returns riders whose name, code or region contains `query`.
    pub async fn search_riders(&self, query: &str) -> Vec<Rider> {
        let query = query.trim();
        let state = self.state.lock().await;
        state
            .riders
            .iter()
            .filter(|r| r.matches(query))
            .cloned()
            .collect()
    }

    /// Sum of a rider's four deduction totals.
    pub async fn total_deductions(&self, code: &RiderCode) -> Result<Money, DomainError> {
        self.rider(code)
            .await
            .map(|r| r.deductions.total())
            .ok_or_else(|| DomainError::rider_not_found(code))
    }

    /// Dashboard counts and the estimated pool value.
    pub async fn overview(&self) -> Overview {
        let state = self.state.lock().await;
        Overview {
            supervisor_count: state.supervisors.len(),
            rider_count: state.riders.len(),
            pending_orders: state
                .orders
                .iter()
                .filter(|o| o.status.is_pending())
                .count(),
            inventory: state.inventory.counts(),
            inventory_value: state.inventory.estimated_value(),
        }
    }

    /// Encodes all collections as the indented export document.
    pub async fn export(&self) -> Result<String, DomainError> {
        Ok(self.snapshot().await.to_pretty_json()?)
    }
}

// Supervisors and riders
impl<S: DocumentStorage> EquipmentStore<S> {
    /// Adds a supervisor with a zeroed allocation.
    #[tracing::instrument(skip(self, form), fields(code = %form.code))]
    pub async fn add_supervisor(&self, form: SupervisorForm) -> Result<Supervisor, DomainError> {
        let supervisor = Supervisor::try_from(form)?;
        let added = self
            .mutate(|state| {
                if state.supervisors.iter().any(|s| s.code == supervisor.code) {
                    return Err(ValidationError::DuplicateCode {
                        kind: "Supervisor",
                        code: supervisor.code.to_string(),
                    }
                    .into());
                }
                state.supervisors.push(supervisor.clone());
                Ok(supervisor)
            })
            .await?;

        tracing::info!(code = %added.code, "supervisor added");
        Ok(added)
    }

    /// Removes the supervisor with exactly `code`.
    #[tracing::instrument(skip(self))]
    pub async fn remove_supervisor(&self, code: &SupervisorCode) -> Result<Supervisor, DomainError> {
        self.mutate(|state| {
            let index = state
                .supervisors
                .iter()
                .position(|s| &s.code == code)
                .ok_or_else(|| DomainError::supervisor_not_found(code))?;
            Ok(state.supervisors.remove(index))
        })
        .await
    }

    /// Adds a rider with zeroed deductions and no photo.
    #[tracing::instrument(skip(self, form), fields(code = %form.code))]
    pub async fn add_rider(&self, form: RiderForm) -> Result<Rider, DomainError> {
        let rider = Rider::try_from(form)?;
        let added = self
            .mutate(|state| {
                if state.riders.iter().any(|r| r.code == rider.code) {
                    return Err(ValidationError::DuplicateCode {
                        kind: "Rider",
                        code: rider.code.to_string(),
                    }
                    .into());
                }
                state.riders.push(rider.clone());
                Ok(rider)
            })
            .await?;

        tracing::info!(code = %added.code, "rider added");
        Ok(added)
    }

    /// Removes the rider with exactly `code`.
    #[tracing::instrument(skip(self))]
    pub async fn remove_rider(&self, code: &RiderCode) -> Result<Rider, DomainError> {
        self.mutate(|state| {
            let index = state
                .riders
                .iter()
                .position(|r| &r.code == code)
                .ok_or_else(|| DomainError::rider_not_found(code))?;
            Ok(state.riders.remove(index))
        })
        .await
    }

    /// Replaces the rider's equipment photo reference.
    #[tracing::instrument(skip(self, image_data))]
    pub async fn set_rider_photo(
        &self,
        code: &RiderCode,
        image_data: impl Into<String>,
    ) -> Result<(), DomainError> {
        let image_data = image_data.into();
        self.mutate(|state| {
            let rider = find_rider(state, code)?;
            rider.equipment_photo = Some(image_data);
            Ok(())
        })
        .await
    }

    /// Appends one rider per valid row.
    ///
    /// Invalid rows and codes already present (in the store or earlier in
    /// the same batch) are skipped and listed in the report.
    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn bulk_import_riders(&self, rows: Vec<RiderRow>) -> Result<ImportReport, DomainError> {
        let report = self
            .mutate(|state| {
                let mut report = ImportReport::default();
                for row in &rows {
                    let rider = match row.to_rider() {
                        Ok(rider) => rider,
                        Err(e) => {
                            report.skip(row, e);
                            continue;
                        }
                    };
                    if state.riders.iter().any(|r| r.code == rider.code) {
                        report.skip(
                            row,
                            ValidationError::DuplicateCode {
                                kind: "Rider",
                                code: rider.code.to_string(),
                            },
                        );
                        continue;
                    }
                    report.imported.push(rider.code.clone());
                    state.riders.push(rider);
                }
                Ok(report)
            })
            .await?;

        metrics::counter!("ems_riders_imported_total").increment(report.imported_count() as u64);
        if !report.skipped.is_empty() {
            tracing::warn!(skipped = report.skipped.len(), "some import rows were skipped");
        }
        tracing::info!(imported = report.imported_count(), "riders imported");
        Ok(report)
    }

    /// Parses comma-separated text and imports the rows.
    pub async fn import_riders_csv(&self, text: &str) -> Result<ImportReport, DomainError> {
        self.bulk_import_riders(parse_rider_rows(text)).await
    }
}

// Inventory and orders
impl<S: DocumentStorage> EquipmentStore<S> {
    /// Sets `pool[item] = max(0, pool[item] + delta)` and returns the new value.
    #[tracing::instrument(skip(self))]
    pub async fn adjust_inventory(&self, item: EquipmentItem, delta: i64) -> Result<u32, DomainError> {
        self.mutate(|state| Ok(state.inventory.adjust(item, delta)))
            .await
    }

    /// Records a pending request from a supervisor.
    #[tracing::instrument(skip(self))]
    pub async fn request_order(
        &self,
        supervisor_code: SupervisorCode,
        quantities: EquipmentCounts,
    ) -> Result<Order, DomainError> {
        let order = self
            .mutate(|state| {
                let last = state.orders.iter().map(|o| o.id).max();
                let id = OrderId::next_after(last).ok_or_else(|| {
                    ValidationError::OrderIdsExhausted {
                        last: last.unwrap_or(OrderId::from_raw(u64::MAX)),
                    }
                })?;
                let order = Order::request(id, supervisor_code, quantities)?;
                state.orders.push(order.clone());
                Ok(order)
            })
            .await?;

        metrics::counter!("ems_orders_requested_total").increment(1);
        tracing::info!(order_id = %order.id, "order requested");
        Ok(order)
    }

    /// Approves a pending order if the pool covers every quantity.
    ///
    /// The check and the deduction happen under the store lock, so no other
    /// mutation can change the pool in between.
    #[tracing::instrument(skip(self))]
    pub async fn approve_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let result = self
            .mutate(|state| {
                let order = state
                    .orders
                    .iter_mut()
                    .find(|o| o.id == order_id)
                    .ok_or_else(|| DomainError::order_not_found(order_id))?;
                order.approve(&mut state.inventory)?;
                Ok(order.clone())
            })
            .await;

        match &result {
            Ok(order) => {
                metrics::counter!("ems_orders_approved_total").increment(1);
                tracing::info!(order_id = %order.id, "order approved");
            }
            Err(DomainError::Order(OrderError::InsufficientInventory { item, .. })) => {
                metrics::counter!("ems_orders_insufficient_inventory_total").increment(1);
                tracing::warn!(%order_id, %item, "not enough inventory to approve order");
            }
            Err(_) => {}
        }
        result
    }

    /// Rejects an order according to the configured reject policy.
    #[tracing::instrument(skip(self))]
    pub async fn reject_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let policy = self.config.reject_policy;
        let order = self
            .mutate(|state| {
                let order = state
                    .orders
                    .iter_mut()
                    .find(|o| o.id == order_id)
                    .ok_or_else(|| DomainError::order_not_found(order_id))?;
                order.reject(&mut state.inventory, policy)?;
                Ok(order.clone())
            })
            .await?;

        metrics::counter!("ems_orders_rejected_total").increment(1);
        tracing::info!(order_id = %order.id, %policy, "order rejected");
        Ok(order)
    }
}

// Deductions and bulk state
impl<S: DocumentStorage> EquipmentStore<S> {
    /// Adds an amount to one of the rider's running deduction totals.
    ///
    /// Negative amounts are refused unless credits are enabled.
    #[tracing::instrument(skip(self, entry), fields(kind = %entry.kind))]
    pub async fn add_deduction(
        &self,
        code: &RiderCode,
        entry: DeductionEntry,
    ) -> Result<Deductions, DomainError> {
        if entry.amount.is_negative() && !self.config.allow_credits {
            return Err(ValidationError::NegativeAmount {
                amount: entry.amount,
            }
            .into());
        }

        let deductions = self
            .mutate(|state| {
                let rider = find_rider(state, code)?;
                rider.deductions.add(entry.kind, entry.amount)?;
                Ok(rider.deductions)
            })
            .await?;

        tracing::info!(
            rider = %code,
            amount = %entry.amount,
            reason = entry.reason.as_deref().unwrap_or(""),
            "deduction recorded"
        );
        Ok(deductions)
    }

    /// Replaces all four collections with `collections`.
    ///
    /// The document must satisfy [`Collections::validate`]; otherwise nothing
    /// changes.
    #[tracing::instrument(skip(self, collections))]
    pub async fn import(&self, collections: Collections) -> Result<(), DomainError> {
        collections.validate()?;
        self.mutate(|state| {
            *state = collections;
            Ok(())
        })
        .await?;
        tracing::info!("collections replaced from import");
        Ok(())
    }

    /// Decodes an export document and replaces all collections with it.
    pub async fn import_json(&self, document: &str) -> Result<(), DomainError> {
        let collections = Collections::from_json(document)?;
        self.import(collections).await
    }
}

fn find_rider<'a>(
    state: &'a mut Collections,
    code: &RiderCode,
) -> Result<&'a mut Rider, DomainError> {
    state
        .riders
        .iter_mut()
        .find(|r| &r.code == code)
        .ok_or_else(|| DomainError::rider_not_found(code))
}

async fn load_or_default<S, T>(storage: &S, key: StorageKey, default: impl FnOnce() -> T) -> T
where
    S: DocumentStorage,
    T: DeserializeOwned + Send,
{
    match storage.load(key).await {
        Ok(Some(value)) => value,
        Ok(None) => default(),
        Err(e) => {
            tracing::warn!(%key, error = %e, "failed to load document, using default");
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStorage;

    async fn store() -> EquipmentStore<InMemoryStorage> {
        EquipmentStore::load(InMemoryStorage::new(), StoreConfig::default()).await
    }

    #[tokio::test]
    async fn test_empty_storage_starts_with_initial_inventory() {
        let store = store().await;
        assert_eq!(
            store.inventory().await.counts(),
            EquipmentCounts::new(100, 80, 300)
        );
        assert!(store.riders().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_validation_leaves_storage_untouched() {
        let store = store().await;
        let err = store
            .add_supervisor(SupervisorForm::new("", "Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.storage().document_count().await, 0);
    }

    #[tokio::test]
    async fn test_mutation_writes_all_four_documents() {
        let store = store().await;
        store
            .adjust_inventory(EquipmentItem::Tshirts, -1)
            .await
            .unwrap();
        assert_eq!(store.storage().document_count().await, 4);
    }

    #[tokio::test]
    async fn test_order_ids_increase() {
        let store = store().await;
        let a = store
            .request_order("S1".into(), EquipmentCounts::new(1, 0, 0))
            .await
            .unwrap();
        let b = store
            .request_order("S1".into(), EquipmentCounts::new(1, 0, 0))
            .await
            .unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_overview() {
        let store = store().await;
        store
            .add_supervisor(SupervisorForm::new("S1", "Mona"))
            .await
            .unwrap();
        store.add_rider(RiderForm::new("R1", "Ali")).await.unwrap();
        store
            .request_order("S1".into(), EquipmentCounts::new(0, 0, 1))
            .await
            .unwrap();

        let overview = store.overview().await;
        assert_eq!(overview.supervisor_count, 1);
        assert_eq!(overview.rider_count, 1);
        assert_eq!(overview.pending_orders, 1);
        assert_eq!(
            overview.inventory_value,
            Money::from_pounds(100 * 200 + 80 * 200 + 300 * 50)
        );
    }
}
