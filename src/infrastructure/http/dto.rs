//! Wire DTOs for the parking backend (`jpr_*` tier fields, `prk_*` record
//! fields).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::{
    ExitRecord, NewParkingRecord, NewRateTier, ParkingRecord, RateTier, RateTierId, RecordId,
    TierStatus,
};
use crate::shared::time::format_wire;

#[derive(Debug, Deserialize)]
pub struct RateTierDto {
    pub jpr_id: RateTierId,
    #[serde(default)]
    pub jpr_nama: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub jpr_perjam: Option<Decimal>,
    #[serde(default)]
    pub jpr_status: Option<String>,
}

impl TryFrom<RateTierDto> for RateTier {
    type Error = String;

    fn try_from(dto: RateTierDto) -> Result<Self, Self::Error> {
        let hourly_rate = dto
            .jpr_perjam
            .ok_or_else(|| format!("rate tier {} has no hourly rate", dto.jpr_id))?;
        Ok(Self {
            id: dto.jpr_id,
            name: dto.jpr_nama.unwrap_or_default().trim().to_string(),
            hourly_rate,
            status: dto
                .jpr_status
                .as_deref()
                .map(TierStatus::from_wire)
                .unwrap_or(TierStatus::Inactive),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ParkingRecordDto {
    pub prk_id: RecordId,
    #[serde(default)]
    pub prk_platnomor: Option<String>,
    #[serde(default, deserialize_with = "lenient::tier_id_opt")]
    pub jpr_id: Option<RateTierId>,
    #[serde(default)]
    pub jpr_nama: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub jpr_perjam: Option<Decimal>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub prk_waktumasuk: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient::timestamp_opt")]
    pub prk_waktukeluar: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub prk_totaltarif: Option<Decimal>,
}

impl From<ParkingRecordDto> for ParkingRecord {
    fn from(dto: ParkingRecordDto) -> Self {
        // The entry endpoint stores a placeholder fee of 0; a fee only
        // exists once the record has an exit time.
        let total_fee = dto.prk_waktukeluar.and(dto.prk_totaltarif);
        Self {
            id: dto.prk_id,
            plate_number: dto.prk_platnomor.unwrap_or_default().trim().to_uppercase(),
            rate_tier_id: dto.jpr_id,
            tier_name: dto.jpr_nama.filter(|n| !n.trim().is_empty()),
            hourly_rate: dto.jpr_perjam,
            entry_at: dto.prk_waktumasuk,
            exit_at: dto.prk_waktukeluar,
            total_fee,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTierRequest<'a> {
    pub jpr_nama: &'a str,
    #[serde(serialize_with = "lenient::serialize_amount")]
    pub jpr_perjam: Decimal,
    pub jpr_status: &'static str,
}

impl<'a> From<&'a NewRateTier> for CreateTierRequest<'a> {
    fn from(tier: &'a NewRateTier) -> Self {
        Self {
            jpr_nama: &tier.name,
            jpr_perjam: tier.hourly_rate,
            jpr_status: tier.status.as_wire(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryRequest<'a> {
    pub prk_platnomor: &'a str,
    pub prk_waktumasuk: String,
    pub jpr_id: &'a RateTierId,
}

impl<'a> From<&'a NewParkingRecord> for EntryRequest<'a> {
    fn from(record: &'a NewParkingRecord) -> Self {
        Self {
            prk_platnomor: &record.plate_number,
            prk_waktumasuk: format_wire(record.entry_at),
            jpr_id: &record.rate_tier_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExitRequest<'a> {
    pub prk_id: &'a RecordId,
    pub prk_waktukeluar: String,
    #[serde(serialize_with = "lenient::serialize_amount")]
    pub prk_totaltarif: Decimal,
}

impl<'a> From<&'a ExitRecord> for ExitRequest<'a> {
    fn from(exit: &'a ExitRecord) -> Self {
        Self {
            prk_id: &exit.record_id,
            prk_waktukeluar: format_wire(exit.exit_at),
            prk_totaltarif: exit.total_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn record_from_listing_row() {
        let dto: ParkingRecordDto = serde_json::from_value(json!({
            "prk_id": "12",
            "prk_platnomor": "b 1234 xyz",
            "jpr_id": 2,
            "jpr_nama": "Mobil",
            "jpr_perjam": "5000.00",
            "prk_waktumasuk": "2024-01-01 10:00:00",
            "prk_waktukeluar": "0000-00-00 00:00:00",
            "prk_totaltarif": "0.00"
        }))
        .unwrap();
        let record = ParkingRecord::from(dto);
        assert_eq!(record.id, RecordId::from("12"));
        assert_eq!(record.plate_number, "B 1234 XYZ");
        assert_eq!(record.rate_tier_id, Some(RateTierId::from(2)));
        assert_eq!(record.hourly_rate, Some(Decimal::from(5000)));
        assert_eq!(record.entry_at, at(10, 0));
        assert!(record.exit_allowed());
        assert_eq!(record.total_fee, None);
    }

    #[test]
    fn exited_record_keeps_fee() {
        let dto: ParkingRecordDto = serde_json::from_value(json!({
            "prk_id": 3,
            "prk_platnomor": "D 1 A",
            "prk_waktumasuk": "2024-01-01 10:00:00",
            "prk_waktukeluar": "2024-01-01 12:01:00",
            "prk_totaltarif": 6000
        }))
        .unwrap();
        let record = ParkingRecord::from(dto);
        assert_eq!(record.exit_at, Some(at(12, 1)));
        assert_eq!(record.total_fee, Some(Decimal::from(6000)));
        assert!(record.tier_name.is_none());
    }

    #[test]
    fn record_without_entry_time_is_rejected() {
        let result = serde_json::from_value::<ParkingRecordDto>(json!({"prk_id": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn tier_status_defaults_to_inactive() {
        let dto: RateTierDto =
            serde_json::from_value(json!({"jpr_id": "1", "jpr_nama": "Motor", "jpr_perjam": 2000}))
                .unwrap();
        let tier = RateTier::try_from(dto).unwrap();
        assert_eq!(tier.status, TierStatus::Inactive);
        assert_eq!(tier.hourly_rate, Decimal::from(2000));

        let dto: RateTierDto =
            serde_json::from_value(json!({"jpr_id": 1, "jpr_nama": "Sepeda"})).unwrap();
        assert!(RateTier::try_from(dto).is_err());
    }

    #[test]
    fn exit_request_wire_shape() {
        let exit = ExitRecord {
            record_id: RecordId::from("7"),
            exit_at: at(12, 1),
            total_fee: Decimal::from(6000),
        };
        let body = serde_json::to_value(ExitRequest::from(&exit)).unwrap();
        assert_eq!(
            body,
            json!({
                "prk_id": 7,
                "prk_waktukeluar": "2024-01-01 12:01:00",
                "prk_totaltarif": 6000
            })
        );
    }

    #[test]
    fn entry_request_wire_shape() {
        let new = NewParkingRecord::new("b 9 z", at(8, 30), RateTierId::from("2"));
        let body = serde_json::to_value(EntryRequest::from(&new)).unwrap();
        assert_eq!(
            body,
            json!({
                "prk_platnomor": "B 9 Z",
                "prk_waktumasuk": "2024-01-01 08:30:00",
                "jpr_id": 2
            })
        );
    }
}
