//! Occupancy board: every parking record with its exit availability

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainResult, OccupancyService, ParkingRecord};

/// One row on the board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    /// 1-based display position
    pub number: usize,
    pub record: ParkingRecord,
    pub exit_allowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupancySnapshot {
    pub rows: Vec<BoardRow>,
    pub total: usize,
    pub still_parked: usize,
}

impl OccupancySnapshot {
    fn from_records(records: Vec<ParkingRecord>) -> Self {
        let total = records.len();
        let rows: Vec<BoardRow> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| BoardRow {
                number: i + 1,
                exit_allowed: record.exit_allowed(),
                record,
            })
            .collect();
        let still_parked = rows.iter().filter(|r| r.exit_allowed).count();

        Self {
            rows,
            total,
            still_parked,
        }
    }

    pub fn exited(&self) -> usize {
        self.total - self.still_parked
    }
}

pub struct OccupancyBoard {
    occupancy: Arc<dyn OccupancyService>,
}

impl OccupancyBoard {
    pub fn new(occupancy: Arc<dyn OccupancyService>) -> Self {
        Self { occupancy }
    }

    /// Load the board in the order the service returns records.
    pub async fn snapshot(&self) -> DomainResult<OccupancySnapshot> {
        let records = self.occupancy.list().await?;
        let snapshot = OccupancySnapshot::from_records(records);
        debug!(
            total = snapshot.total,
            still_parked = snapshot.still_parked,
            "Occupancy board loaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use crate::infrastructure::InMemoryOccupancy;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn record(id: i64, exit: Option<NaiveDateTime>) -> ParkingRecord {
        ParkingRecord {
            id: RecordId::from(id),
            plate_number: format!("B {} X", id),
            rate_tier_id: None,
            tier_name: Some("Motor".into()),
            hourly_rate: Some(Decimal::from(2000)),
            entry_at: at(8, 0),
            exit_at: exit,
            total_fee: exit.map(|_| Decimal::from(2000)),
        }
    }

    #[tokio::test]
    async fn rows_flag_exit_availability() {
        let store = Arc::new(InMemoryOccupancy::new());
        store.insert(record(1, None));
        store.insert(record(2, Some(at(8, 40))));
        store.insert(record(3, None));

        let board = OccupancyBoard::new(store);
        let snapshot = board.snapshot().await.unwrap();

        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.still_parked, 2);
        assert_eq!(snapshot.exited(), 1);
        let flags: Vec<(usize, bool)> = snapshot
            .rows
            .iter()
            .map(|r| (r.number, r.exit_allowed))
            .collect();
        assert_eq!(flags, vec![(1, true), (2, false), (3, true)]);
    }

    #[tokio::test]
    async fn empty_board() {
        let board = OccupancyBoard::new(Arc::new(InMemoryOccupancy::new()));
        assert_eq!(board.snapshot().await.unwrap(), OccupancySnapshot::default());
    }
}
