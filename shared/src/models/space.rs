//! Space Model
//!
//! A space is any order-taking location: a table, a bar seat, a delivery
//! slot or a reservation slot.

use serde::{Deserialize, Serialize};

/// Space kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceKind {
    #[default]
    Mesa,
    Barra,
    Delivery,
    Reserva,
}

/// Space occupancy status
///
/// Mutated manually by staff; not derived from order state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceStatus {
    #[default]
    Libre,
    Ocupada,
    Reservada,
    Mantenimiento,
}

/// Space entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: Option<String>,
    /// Unique short code (e.g. "M-04")
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    pub capacity: i32,
    #[serde(default)]
    pub status: SpaceStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create space payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceCreate {
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SpaceKind,
    pub capacity: i32,
    pub status: Option<SpaceStatus>,
    pub is_active: Option<bool>,
}

/// Update space payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SpaceKind>,
    pub capacity: Option<i32>,
    pub status: Option<SpaceStatus>,
    pub is_active: Option<bool>,
}

/// Update space status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceUpdateStatus {
    pub status: SpaceStatus,
}
