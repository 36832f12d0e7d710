use serde::Serialize;
use uuid::Uuid;

/// Province enriched with its health region from the static lookup table.
#[derive(Debug, Serialize)]
pub struct ProvinceResponse {
    pub province_id: Uuid,
    pub name: String,
    pub health_region: Option<i16>,
}
