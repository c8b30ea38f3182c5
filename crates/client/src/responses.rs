//! Wire types for the pot service REST API.
//!
//! Every endpoint wraps its payload in an [`Envelope`]; the envelope's
//! `status` is `"SUCCESS"` when the request was accepted.

use potaful_core::hydration::HydrationCondition;
use potaful_core::SensorData;
use serde::{Deserialize, Serialize};

/// Envelope status for an accepted request.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Common response wrapper: `{ status, message, data }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// `GET api/auth/google`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleAuthUrl {
    pub auth_url: String,
}

/// `GET api/auth/profile`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileData {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// `"first last"` with surrounding whitespace removed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body of `POST api/mypot/add`.
#[derive(Debug, Clone, Serialize)]
pub struct AddPotRequest<'a> {
    pub pot_id: &'a str,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddedPot {
    pub pot_id: String,
    pub type_pot_id: String,
    pub type_name: String,
    pub max_water: i32,
    pub created_at: String,
}

/// `GET api/mypot`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PotList {
    pub pots: Vec<PotSummary>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PotSummary {
    pub pot_id: String,
    pub type_name: String,
    pub max_water: i32,
    pub soil_health: f64,
    pub last_update: String,
}

/// `GET api/mypot/{pot_id}/data`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PotDetail {
    pub pot_id: String,
    pub type_name: String,
    pub max_water: i32,
    pub sensor_data: SensorData,
    pub timestamp: String,
}

/// `POST api/mypot/{pot_id}/watering`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WateringAck {
    pub pot_id: String,
    pub action: String,
    pub status: String,
}

/// `GET api/mypot/hydration`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HydrationList {
    pub pots: Vec<HydrationPot>,
    pub total: i32,
}

/// Hydration summary row. The server omits fields freely, so all are optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HydrationPot {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub type_pot_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub type_name: Option<String>,
    pub max_water: Option<i32>,
    pub condition: Option<String>,
    pub soil_hydration: Option<f64>,
}

impl HydrationPot {
    pub fn condition(&self) -> HydrationCondition {
        HydrationCondition::from_tag(self.condition.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or("Unknown Pot")
    }
}
