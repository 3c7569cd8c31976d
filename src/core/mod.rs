pub mod clock;
pub mod ids;
pub mod period;
pub mod services;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use period::{DateRange, PeriodSelector};
pub use store::{BudgetChange, EntityStore, Removal};
