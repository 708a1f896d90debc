//! Freeze, read, unfreeze, and plan-view behavior of the baseline store over
//! both bundled substrates.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use cp_core::errors::{Error, Result};
use cp_core::PlannerConfig;
use cp_engine::{
    AvailabilityEngine, AvailabilityResult, BaselineState, BaselineStore, FileStore,
    HolidayOccurrence, HolidaySource, InMemoryStore, KeyValueStore, MilestoneDates,
};

fn dates(ec: &str, scc: &str, ga: &str) -> MilestoneDates {
    MilestoneDates::parse(ec, scc, ga).unwrap()
}

async fn compute(input: &MilestoneDates) -> AvailabilityResult {
    AvailabilityEngine::us_federal(PlannerConfig::default())
        .calculate(input)
        .await
        .unwrap()
}

/// A store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    refuse_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if self.refuse_writes.load(Ordering::SeqCst) {
            return Err(Error::FreezeStore {
                key: key.to_string(),
                reason: "disk full".into(),
            });
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await
    }
}

/// A source that must never be consulted.
struct Unreachable;

#[async_trait]
impl HolidaySource for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>> {
        Err(Error::HolidaySource {
            region: region.to_string(),
            year,
            reason: "offline".into(),
        })
    }
}

async fn freeze_lifecycle<K: KeyValueStore>(store: BaselineStore<K>) {
    let first = dates("2024-07-01", "2024-09-01", "2024-11-01");
    let first_result = compute(&first).await;

    assert!(!store.is_frozen("plan-1").await.unwrap());
    assert_eq!(store.read("plan-1").await.unwrap(), None);
    assert_eq!(store.state("plan-1").await.unwrap(), BaselineState::Unfrozen);

    let frozen = store
        .freeze("plan-1", first, first_result.clone())
        .await
        .unwrap();
    assert!(store.is_frozen("plan-1").await.unwrap());
    let read = store.read("plan-1").await.unwrap().unwrap();
    assert_eq!(read, frozen);
    assert_eq!(read.result, first_result);
    assert_eq!(read.input_dates, first);
    assert!(!store.is_frozen("plan-2").await.unwrap());

    let second = dates("2025-01-06", "2025-02-05", "2025-04-01");
    let second_result = compute(&second).await;
    store
        .freeze("plan-1", second, second_result.clone())
        .await
        .unwrap();
    assert_eq!(
        store.read("plan-1").await.unwrap().unwrap().result,
        second_result
    );

    store.unfreeze("plan-1").await.unwrap();
    assert!(!store.is_frozen("plan-1").await.unwrap());
    assert_eq!(store.read("plan-1").await.unwrap(), None);
    store.unfreeze("plan-1").await.unwrap();
}

#[tokio::test]
async fn lifecycle_in_memory() {
    freeze_lifecycle(BaselineStore::new(InMemoryStore::new())).await;
}

#[tokio::test]
async fn lifecycle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).await.unwrap();
    freeze_lifecycle(BaselineStore::new(store)).await;
}

#[tokio::test]
async fn disk_baseline_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let input = dates("2024-07-01", "2024-09-01", "2024-11-01");
    let result = compute(&input).await;
    {
        let store = BaselineStore::new(FileStore::open(dir.path()).await.unwrap());
        store.freeze("release/24.2", input, result.clone()).await.unwrap();
    }
    let reopened = BaselineStore::new(FileStore::open(dir.path()).await.unwrap());
    let read = reopened.read("release/24.2").await.unwrap().unwrap();
    assert_eq!(read.result, result);
    assert_eq!(read.release_plan_id, "release/24.2");
}

#[tokio::test]
async fn failed_write_keeps_previous_baseline() {
    let store = BaselineStore::new(FlakyStore::default());
    let first = dates("2024-07-01", "2024-09-01", "2024-11-01");
    let first_result = compute(&first).await;
    store.freeze("p", first, first_result.clone()).await.unwrap();

    store.store().refuse_writes.store(true, Ordering::SeqCst);
    let second = dates("2025-01-06", "2025-02-05", "2025-04-01");
    let err = store
        .freeze("p", second, compute(&second).await)
        .await
        .unwrap_err();
    assert!(err.is_freeze_store());
    assert_eq!(store.read("p").await.unwrap().unwrap().result, first_result);
}

#[tokio::test]
async fn frozen_view_never_recomputes() {
    let store = BaselineStore::new(InMemoryStore::new());
    let input = dates("2024-07-01", "2024-09-01", "2024-11-01");
    let result = compute(&input).await;
    store.freeze("p", input, result.clone()).await.unwrap();

    // Different dates and an engine that cannot resolve holidays: the frozen
    // baseline is still shown unchanged.
    let offline = AvailabilityEngine::new(Unreachable, PlannerConfig::default());
    let edited = dates("2024-07-15", "2024-09-15", "2024-11-15");
    let view = store.view("p", &edited, &offline).await.unwrap();
    assert!(view.is_frozen());
    assert_eq!(view.result(), &result);
}

#[tokio::test]
async fn unfrozen_view_computes_fresh() {
    let store = BaselineStore::new(InMemoryStore::new());
    let engine = AvailabilityEngine::us_federal(PlannerConfig::default());
    let input = dates("2024-07-01", "2024-09-01", "2024-11-01");
    let view = store.view("p", &input, &engine).await.unwrap();
    assert!(!view.is_frozen());
    assert_eq!(view.result().summary.total_available_days, 69);

    let offline = AvailabilityEngine::new(Unreachable, PlannerConfig::default());
    assert!(store
        .view("p", &input, &offline)
        .await
        .unwrap_err()
        .is_holiday_source());
}

#[tokio::test]
async fn tampered_totals_are_rejected() {
    let memory = InMemoryStore::new();
    let store = BaselineStore::new(memory.clone());
    let input = dates("2024-07-01", "2024-09-01", "2024-11-01");
    store.freeze("p", input, compute(&input).await).await.unwrap();

    let bytes = memory.get("baseline:p").await.unwrap().unwrap();
    let mut json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["result"]["summary"]["total_available_days"] = 70.into();
    memory
        .set("baseline:p", serde_json::to_vec(&json).unwrap())
        .await
        .unwrap();
    assert!(matches!(store.read("p").await, Err(Error::Serialization(_))));
}
