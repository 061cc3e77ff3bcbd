//! Domain Model から DTO への変換

use marubatsu_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{RoomDetail, RoomSummary};

use super::http::{RoomDetailDto, RoomSummaryDto};

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            code: summary.code.as_str().to_string(),
            name: summary.name,
            is_public: summary.visibility.is_public(),
            status: summary.status.as_str().to_string(),
            players_count: summary.occupancy,
            created_at: timestamp_to_jst_rfc3339(summary.created_at.value()),
        }
    }
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(detail: RoomDetail) -> Self {
        Self {
            code: detail.summary.code.as_str().to_string(),
            name: detail.summary.name,
            is_public: detail.summary.visibility.is_public(),
            status: detail.summary.status.as_str().to_string(),
            players_count: detail.summary.occupancy,
            created_at: timestamp_to_jst_rfc3339(detail.summary.created_at.value()),
            created_by: detail.creator.as_str().to_string(),
            occupants: detail
                .occupants
                .into_iter()
                .map(|n| n.as_str().to_string())
                .collect(),
        }
    }
}
