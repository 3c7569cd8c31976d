#![allow(dead_code)]

use std::path::Path;

use chrono::NaiveDate;
use finance_core::{
    core::{EntityStore, FixedClock},
    domain::{Category, NewTransaction},
    storage::{JsonFileStore, MemoryStore},
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// The reference "today" used across integration tests.
pub fn today() -> NaiveDate {
    date(2024, 1, 15)
}

pub fn memory_store() -> (EntityStore, MemoryStore) {
    let memory = MemoryStore::new();
    let store = EntityStore::load(Box::new(memory.clone()), Box::new(FixedClock::on(today())))
        .expect("load memory-backed store");
    (store, memory)
}

pub fn json_store(dir: &Path) -> EntityStore {
    let storage = JsonFileStore::new(dir).expect("create json store");
    EntityStore::load(Box::new(storage), Box::new(FixedClock::on(today())))
        .expect("load json-backed store")
}

/// Salary on Jan 5, food on Jan 10 and Feb 1.
pub fn seed_january(store: &mut EntityStore) {
    store
        .add_transaction(NewTransaction::income(Category::Salary, 1000.0, date(2024, 1, 5)))
        .expect("add salary");
    store
        .add_transaction(
            NewTransaction::expense(Category::Food, 200.0, date(2024, 1, 10))
                .with_description("groceries"),
        )
        .expect("add groceries");
    store
        .add_transaction(NewTransaction::expense(Category::Food, 50.0, date(2024, 2, 1)))
        .expect("add future expense");
}
