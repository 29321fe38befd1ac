//! Occupancy service over HTTP

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, warn};
use validator::Validate;

use super::client::ApiClient;
use super::dto::{EntryRequest, ExitRequest, ParkingRecordDto};
use super::envelope::{ListEnvelope, MutationAck};
use crate::domain::{
    DomainError, DomainResult, ExitRecord, NewParkingRecord, OccupancyService, ParkingRecord,
};
use crate::shared::validations::into_domain_error;

pub struct HttpOccupancyService {
    client: Arc<ApiClient>,
}

impl HttpOccupancyService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn decode_echo(ack_item: Option<serde_json::Value>) -> Option<ParkingRecord> {
    ack_item
        .and_then(|v| serde_json::from_value::<ParkingRecordDto>(v).ok())
        .map(ParkingRecord::from)
}

// The backend has no single-record endpoint, so `find_by_id` keeps the
// list-scanning default.
#[async_trait]
impl OccupancyService for HttpOccupancyService {
    async fn list(&self) -> DomainResult<Vec<ParkingRecord>> {
        let path = &self.client.config().endpoints.records_list;
        let body = self.client.get_json(path).await?;

        let envelope = ListEnvelope::from_value(body, "parkir");
        debug!(shape = envelope.shape(), "Record list envelope");

        let rows: Vec<ParkingRecordDto> = envelope.decode();
        let records: Vec<ParkingRecord> = rows.into_iter().map(ParkingRecord::from).collect();

        debug!(count = records.len(), "Parking records loaded");
        Ok(records)
    }

    async fn create(&self, record: NewParkingRecord) -> DomainResult<Option<ParkingRecord>> {
        record.validate().map_err(into_domain_error)?;

        let path = &self.client.config().endpoints.records_entry;
        let body = self
            .client
            .send_json(Method::POST, path, &EntryRequest::from(&record))
            .await?;

        match MutationAck::from_value(body, "prk_id") {
            MutationAck::Rejected { message } => {
                warn!(
                    plate = record.plate_number.as_str(),
                    message = message.as_str(),
                    "Vehicle entry rejected"
                );
                Err(DomainError::RemoteFailure(message))
            }
            MutationAck::Accepted { item } => {
                info!(
                    plate = record.plate_number.as_str(),
                    tier_id = %record.rate_tier_id,
                    "Vehicle entry recorded"
                );
                Ok(decode_echo(item))
            }
        }
    }

    async fn record_exit(&self, exit: ExitRecord) -> DomainResult<Option<ParkingRecord>> {
        let path = &self.client.config().endpoints.records_exit;
        let body = self
            .client
            .send_json(Method::PUT, path, &ExitRequest::from(&exit))
            .await?;

        match MutationAck::from_value(body, "prk_id") {
            MutationAck::Rejected { message } => {
                warn!(
                    record_id = %exit.record_id,
                    message = message.as_str(),
                    "Vehicle exit rejected"
                );
                Err(DomainError::RemoteFailure(message))
            }
            MutationAck::Accepted { item } => {
                info!(
                    record_id = %exit.record_id,
                    fee = %exit.total_fee,
                    "Vehicle exit recorded"
                );
                Ok(decode_echo(item))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::domain::{RateTierId, RecordId};
    use chrono::{NaiveDate, NaiveDateTime};
    use httpmock::prelude::*;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn service_for(server: &MockServer) -> HttpOccupancyService {
        let client = ApiClient::new(ApiConfig {
            base_url: server.base_url(),
            ..ApiConfig::default()
        })
        .unwrap();
        HttpOccupancyService::new(Arc::new(client))
    }

    fn rows() -> Value {
        json!([
            {
                "prk_id": "1",
                "prk_platnomor": "B 1 A",
                "jpr_nama": "Motor",
                "jpr_perjam": "2000",
                "prk_waktumasuk": "2024-01-01 10:00:00",
                "prk_waktukeluar": null,
                "prk_totaltarif": null
            },
            {
                "prk_id": 2,
                "prk_platnomor": "B 2 B",
                "jpr_nama": "Mobil",
                "jpr_perjam": 5000,
                "prk_waktumasuk": "2024-01-01 09:00:00",
                "prk_waktukeluar": "2024-01-01 09:30:00",
                "prk_totaltarif": "5000"
            }
        ])
    }

    async fn list_with(body: Value) -> Vec<ParkingRecord> {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/parkir/read2.php");
            then.status(200).json_body(body);
        });
        service_for(&server).list().await.unwrap()
    }

    #[tokio::test]
    async fn every_list_shape_yields_the_same_records() {
        let bare = list_with(rows()).await;
        let data = list_with(json!({"data": rows()})).await;
        let records = list_with(json!({"records": rows()})).await;

        assert_eq!(bare.len(), 2);
        assert_eq!(bare, data);
        assert_eq!(bare, records);
        assert!(bare[0].exit_allowed());
        assert!(!bare[1].exit_allowed());
    }

    #[tokio::test]
    async fn malformed_rows_do_not_hide_the_others() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/parkir/read2.php");
            then.status(200).json_body(json!({"data": [
                {
                    "prk_id": 1,
                    "prk_platnomor": "B 1 A",
                    "jpr_perjam": 2000,
                    "prk_waktumasuk": "2024-01-01 10:00:00"
                },
                {"prk_id": 2, "prk_platnomor": "B 2 B", "prk_waktumasuk": null},
                {"prk_id": 3, "prk_waktumasuk": "kemarin"}
            ]}));
        });
        let service = service_for(&server);

        let records = service.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::from(1));

        let found = service.find_by_id(&RecordId::from(1)).await.unwrap();
        assert_eq!(found.map(|r| r.plate_number), Some("B 1 A".to_string()));
        assert!(service.find_by_id(&RecordId::from(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_id_coerces_numeric_ids() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/parkir/read2.php");
            then.status(200).json_body(json!({"data": rows()}));
        });
        let service = service_for(&server);

        let found = service.find_by_id(&RecordId::from(1)).await.unwrap();
        assert_eq!(found.map(|r| r.plate_number), Some("B 1 A".to_string()));
        let found = service.find_by_id(&RecordId::from("2")).await.unwrap();
        assert!(found.is_some());
        assert!(service.find_by_id(&RecordId::from(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entry_posts_wire_fields() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/parkir/masuk.php").json_body(json!({
                "prk_platnomor": "B 1234 XYZ",
                "prk_waktumasuk": "2024-01-01 10:00:00",
                "jpr_id": 2
            }));
            then.status(200).json_body(json!({
                "status": "success",
                "data": {
                    "prk_id": 31,
                    "prk_platnomor": "B 1234 XYZ",
                    "jpr_id": 2,
                    "prk_waktumasuk": "2024-01-01 10:00:00"
                }
            }));
        });

        let created = service_for(&server)
            .create(NewParkingRecord::new("b 1234 xyz", at(10, 0), RateTierId::from(2)))
            .await
            .unwrap()
            .unwrap();
        m.assert();
        assert_eq!(created.id, RecordId::from(31));
        assert!(created.exit_at.is_none());
    }

    #[tokio::test]
    async fn rejected_entry_surfaces_message() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/parkir/masuk.php");
            then.status(200)
                .json_body(json!({"status": "error", "message": "Kendaraan masih parkir"}));
        });

        let err = service_for(&server)
            .create(NewParkingRecord::new("B 1", at(10, 0), RateTierId::from(1)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Remote service failure: Kendaraan masih parkir");
    }

    #[tokio::test]
    async fn exit_puts_one_update() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(PUT).path("/parkir/keluar.php").json_body(json!({
                "prk_id": 1,
                "prk_waktukeluar": "2024-01-01 12:01:00",
                "prk_totaltarif": 6000
            }));
            then.status(200).json_body(json!({"status": "success"}));
        });

        let updated = service_for(&server)
            .record_exit(ExitRecord {
                record_id: RecordId::from("1"),
                exit_at: at(12, 1),
                total_fee: Decimal::from(6000),
            })
            .await
            .unwrap();
        m.assert_hits(1);
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_a_remote_failure() {
        let client = ApiClient::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        let err = HttpOccupancyService::new(Arc::new(client))
            .list()
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RemoteFailure(_)));
    }
}
