//! Survey share tracking record
//!
//! Written by the public survey surface (an external collaborator);
//! the core only reads it for the per-panchayath share summary.

use serde::{Deserialize, Serialize};

/// One share event of the survey link into a ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyShare {
    pub id: String,
    /// Ward reference (String ID)
    pub ward_id: String,
    /// Panchayath reference (String ID)
    pub panchayath_id: String,
    /// Views accumulated through this share link
    pub view_count: i64,
    pub created_at: i64,
}
