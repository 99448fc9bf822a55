use chrono::Utc;

/// Issues record ids.
///
/// Ids follow the wall clock in milliseconds but are forced strictly above
/// the last id issued, so rapid creation (batch imports) never collides and
/// an id is never handed out twice.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Start above `last`, usually the largest id already in the catalog
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    pub fn last_issued(&self) -> u64 {
        self.last
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::starting_after(0);
        let mut previous = 0;
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_starts_above_existing_ids() {
        let far_future = u64::try_from(Utc::now().timestamp_millis()).unwrap() + 1_000_000;
        let mut ids = IdGenerator::starting_after(far_future);
        assert_eq!(ids.next_id(), far_future + 1);
        assert_eq!(ids.last_issued(), far_future + 1);
    }
}
