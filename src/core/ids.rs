use chrono::{DateTime, Utc};

/// Hands out strictly increasing identifiers.
///
/// Ids track the creation time in milliseconds, but never repeat: two
/// entities created within the same millisecond (or after the clock steps
/// backwards) still receive distinct, increasing values.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Starts after `highest`, typically the largest id already persisted.
    pub fn seeded(highest: u64) -> Self {
        Self { last: highest }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last = millis.max(self.last.saturating_add(1));
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_instant_yields_distinct_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(first, now.timestamp_millis() as u64);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn seeded_generator_never_reuses_persisted_ids() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut ids = IdGenerator::seeded(u64::MAX - 10);
        assert_eq!(ids.next(earlier), u64::MAX - 9);
    }
}
