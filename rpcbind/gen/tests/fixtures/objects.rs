//! Hand-authored canonical types for the fixture schema.

use serde::{Deserialize, Serialize};

pub use rpcbind::BoolInt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseObject {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Audio {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
}
