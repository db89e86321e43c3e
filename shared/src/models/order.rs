//! Order Model

use serde::{Deserialize, Serialize};

/// Order fulfillment status
///
/// Wire values are the SCREAMING_SNAKE_CASE Spanish labels the backend uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for the kitchen to pick it up (initial)
    #[default]
    Pendiente,
    /// Kitchen confirmed and working on it
    EnPreparacion,
    /// Ready to serve or hand over
    Listo,
    /// Handed to the customer (terminal success)
    Entregado,
    /// Abandoned before delivery (terminal failure)
    Cancelado,
}

impl OrderStatus {
    /// All statuses in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pendiente,
        OrderStatus::EnPreparacion,
        OrderStatus::Listo,
        OrderStatus::Entregado,
        OrderStatus::Cancelado,
    ];

    /// Wire label; also the key used for label-ordered sorting
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "PENDIENTE",
            OrderStatus::EnPreparacion => "EN_PREPARACION",
            OrderStatus::Listo => "LISTO",
            OrderStatus::Entregado => "ENTREGADO",
            OrderStatus::Cancelado => "CANCELADO",
        }
    }

    /// Terminal states admit no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregado | OrderStatus::Cancelado)
    }

    /// Active orders are those the kitchen still owes work on
    pub const fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pendiente | OrderStatus::EnPreparacion)
    }

    /// Whether the lifecycle defines an edge from `self` to `next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pendiente, EnPreparacion) => true,
            (EnPreparacion, Listo) => true,
            (Listo, Entregado) => true,
            (current, Cancelado) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Deletion is limited to orders the kitchen never confirmed or that
    /// were already abandoned
    pub const fn can_delete(&self) -> bool {
        matches!(self, OrderStatus::Pendiente | OrderStatus::Cancelado)
    }
}

/// A selected sub-component of a combo/composite line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboSelection {
    /// Component group the choice belongs to (e.g. side dish, drink)
    pub group: String,
    pub name: String,
    /// Price adjustment in currency units (0 for included components)
    #[serde(default)]
    pub price_delta: f64,
}

/// Order line item (snapshot of the product at creation time)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product reference (String ID)
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    /// Unit price in currency units (historical lowercase wire name)
    #[serde(rename = "unitprice")]
    pub unit_price: f64,
    /// Line total in currency units; equals unitprice x quantity unless the
    /// backend recorded an adjustment
    #[serde(rename = "totalprice")]
    pub total_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Selected combo sub-components. Primary representation; legacy rows
    /// carry a JSON array inside `notes` instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<ComboSelection>,
}

impl OrderItem {
    /// Combo selections, with the legacy JSON-in-notes encoding as fallback
    pub fn effective_selections(&self) -> Vec<ComboSelection> {
        if !self.selections.is_empty() {
            return self.selections.clone();
        }
        self.notes
            .as_deref()
            .and_then(decode_legacy_selections)
            .unwrap_or_default()
    }
}

/// Best-effort decode of the legacy notes encoding (a JSON array of
/// selection objects). Anything else is a plain note.
pub fn decode_legacy_selections(notes: &str) -> Option<Vec<ComboSelection>> {
    let trimmed = notes.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    match serde_json::from_str::<Vec<ComboSelection>>(trimmed) {
        Ok(selections) if !selections.is_empty() => Some(selections),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(error = %err, "notes field is not a legacy selection payload");
            None
        }
    }
}

/// Order entity (backend-owned; the client holds a working copy)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<String>,
    /// Human-facing number, assigned by the backend
    pub order_number: String,
    /// Space reference (String ID)
    pub space_id: String,
    /// Denormalized space name for display and filtering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Authoritative current total in currency units; may diverge from the
    /// item sum once the backend records adjustments
    pub total_amount: f64,
    /// RFC 3339, assigned by the backend
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Sum of line totals (the "original" total, shown next to `total_amount`)
    pub fn items_total(&self) -> f64 {
        crate::money::round_currency(self.items.iter().map(|i| i.total_price).sum())
    }
}

/// Create order payload
///
/// Items are submitted as ready-made snapshots; status is implicitly
/// PENDIENTE and `orderNumber`/`createdAt` are backend-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub space_id: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub items: Vec<OrderItem>,
    /// Client-computed sum of line totals
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdateStatus {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_labels() {
        let json = serde_json::to_string(&OrderStatus::EnPreparacion).unwrap();
        assert_eq!(json, "\"EN_PREPARACION\"");

        let status: OrderStatus = serde_json::from_str("\"CANCELADO\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelado);
        assert_eq!(status.label(), "CANCELADO");
    }

    #[test]
    fn test_forward_edges() {
        use OrderStatus::*;
        assert!(Pendiente.can_transition_to(EnPreparacion));
        assert!(EnPreparacion.can_transition_to(Listo));
        assert!(Listo.can_transition_to(Entregado));
    }

    #[test]
    fn test_cancel_from_non_terminal_only() {
        use OrderStatus::*;
        assert!(Pendiente.can_transition_to(Cancelado));
        assert!(EnPreparacion.can_transition_to(Cancelado));
        assert!(Listo.can_transition_to(Cancelado));
        assert!(!Entregado.can_transition_to(Cancelado));
        assert!(!Cancelado.can_transition_to(Cancelado));
    }

    #[test]
    fn test_no_backward_or_skipping_edges() {
        use OrderStatus::*;
        assert!(!Listo.can_transition_to(Pendiente));
        assert!(!Pendiente.can_transition_to(Listo));
        assert!(!Pendiente.can_transition_to(Entregado));
        assert!(!Entregado.can_transition_to(Listo));
        assert!(!Cancelado.can_transition_to(Pendiente));
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        for status in OrderStatus::ALL {
            assert!(!OrderStatus::Entregado.can_transition_to(status));
            assert!(!OrderStatus::Cancelado.can_transition_to(status));
        }
    }

    #[test]
    fn test_delete_policy() {
        use OrderStatus::*;
        assert!(Pendiente.can_delete());
        assert!(Cancelado.can_delete());
        assert!(!EnPreparacion.can_delete());
        assert!(!Listo.can_delete());
        assert!(!Entregado.can_delete());
    }

    #[test]
    fn test_item_wire_field_names() {
        let item = OrderItem {
            product_id: "p1".into(),
            name: "Paella".into(),
            quantity: 2,
            unit_price: 12.5,
            total_price: 25.0,
            notes: None,
            selections: vec![],
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["unitprice"], 12.5);
        assert_eq!(json["totalprice"], 25.0);
        assert!(json.get("selections").is_none());
    }

    #[test]
    fn test_legacy_selection_decode() {
        let notes = r#"[{"group":"Acompañamiento","name":"Patatas","priceDelta":0.0}]"#;
        let selections = decode_legacy_selections(notes).unwrap();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].name, "Patatas");

        assert!(decode_legacy_selections("sin cebolla").is_none());
        assert!(decode_legacy_selections("[]").is_none());
        assert!(decode_legacy_selections("[1,2,3]").is_none());
    }

    #[test]
    fn test_effective_selections_prefers_structured() {
        let structured = ComboSelection {
            group: "Bebida".into(),
            name: "Agua".into(),
            price_delta: 0.0,
        };
        let item = OrderItem {
            product_id: "p1".into(),
            name: "Menú del día".into(),
            quantity: 1,
            unit_price: 11.0,
            total_price: 11.0,
            notes: Some(r#"[{"group":"Bebida","name":"Vino"}]"#.into()),
            selections: vec![structured.clone()],
        };
        assert_eq!(item.effective_selections(), vec![structured]);

        let legacy = OrderItem {
            selections: vec![],
            ..item
        };
        assert_eq!(legacy.effective_selections()[0].name, "Vino");
    }

    #[test]
    fn test_items_total_independent_of_total_amount() {
        let order = Order {
            id: Some("o1".into()),
            order_number: "ORD-001".into(),
            space_id: "s1".into(),
            space_name: Some("Mesa 1".into()),
            customer_name: Some("Ana".into()),
            customer_phone: None,
            status: OrderStatus::Pendiente,
            items: vec![
                OrderItem {
                    product_id: "p1".into(),
                    name: "Tortilla".into(),
                    quantity: 2,
                    unit_price: 10.0,
                    total_price: 20.0,
                    notes: None,
                    selections: vec![],
                },
                OrderItem {
                    product_id: "p2".into(),
                    name: "Caña".into(),
                    quantity: 1,
                    unit_price: 5.0,
                    total_price: 5.0,
                    notes: None,
                    selections: vec![],
                },
            ],
            total_amount: 22.5,
            created_at: "2025-03-01T12:00:00Z".into(),
            notes: None,
        };
        assert_eq!(order.items_total(), 25.0);
        assert_eq!(order.total_amount, 22.5);
    }
}
