use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "elementID")]
    pub element_id: String,
    pub comment: String,
    pub rate: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "editedAt", default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPatch {
    pub comment: String,
    pub rate: f64,
}

impl ReviewPatch {
    pub fn apply(self, review: &mut Review, now: DateTime<Utc>) {
        review.comment = self.comment;
        review.rate = self.rate;
        review.edited_at = Some(now);
    }
}
