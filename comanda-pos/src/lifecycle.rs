//! Order lifecycle actions
//!
//! Staff-facing vocabulary over the status machine: each action names
//! one legal edge. The backend re-validates every transition; this
//! module is the UX fast-path that keeps illegal buttons from showing
//! up at all.

use shared::models::OrderStatus;

/// A staff action that moves an order along the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// PENDIENTE -> EN_PREPARACION
    StartPreparation,
    /// EN_PREPARACION -> LISTO
    MarkReady,
    /// LISTO -> ENTREGADO
    MarkDelivered,
    /// any non-terminal -> CANCELADO
    Cancel,
}

impl OrderAction {
    pub const ALL: [OrderAction; 4] = [
        OrderAction::StartPreparation,
        OrderAction::MarkReady,
        OrderAction::MarkDelivered,
        OrderAction::Cancel,
    ];

    /// Status this action moves the order into.
    pub const fn target_status(&self) -> OrderStatus {
        match self {
            OrderAction::StartPreparation => OrderStatus::EnPreparacion,
            OrderAction::MarkReady => OrderStatus::Listo,
            OrderAction::MarkDelivered => OrderStatus::Entregado,
            OrderAction::Cancel => OrderStatus::Cancelado,
        }
    }

    /// Whether the action is legal from the given status.
    pub fn is_allowed_from(&self, status: OrderStatus) -> bool {
        status.can_transition_to(self.target_status())
    }

    /// Actions available on an order in the given status.
    pub fn available_for(status: OrderStatus) -> Vec<OrderAction> {
        Self::ALL
            .iter()
            .copied()
            .filter(|action| action.is_allowed_from(status))
            .collect()
    }

    /// Button label for the action.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderAction::StartPreparation => "Iniciar preparación",
            OrderAction::MarkReady => "Marcar listo",
            OrderAction::MarkDelivered => "Marcar entregado",
            OrderAction::Cancel => "Cancelar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_follow_lifecycle_edges() {
        assert!(OrderAction::StartPreparation.is_allowed_from(OrderStatus::Pendiente));
        assert!(!OrderAction::StartPreparation.is_allowed_from(OrderStatus::Listo));

        assert!(OrderAction::MarkReady.is_allowed_from(OrderStatus::EnPreparacion));
        assert!(!OrderAction::MarkReady.is_allowed_from(OrderStatus::Pendiente));

        assert!(OrderAction::MarkDelivered.is_allowed_from(OrderStatus::Listo));
        assert!(!OrderAction::MarkDelivered.is_allowed_from(OrderStatus::EnPreparacion));
    }

    #[test]
    fn test_cancel_allowed_from_any_non_terminal() {
        assert!(OrderAction::Cancel.is_allowed_from(OrderStatus::Pendiente));
        assert!(OrderAction::Cancel.is_allowed_from(OrderStatus::EnPreparacion));
        assert!(OrderAction::Cancel.is_allowed_from(OrderStatus::Listo));
        assert!(!OrderAction::Cancel.is_allowed_from(OrderStatus::Entregado));
        assert!(!OrderAction::Cancel.is_allowed_from(OrderStatus::Cancelado));
    }

    #[test]
    fn test_available_for_each_status() {
        assert_eq!(
            OrderAction::available_for(OrderStatus::Pendiente),
            vec![OrderAction::StartPreparation, OrderAction::Cancel]
        );
        assert_eq!(
            OrderAction::available_for(OrderStatus::EnPreparacion),
            vec![OrderAction::MarkReady, OrderAction::Cancel]
        );
        assert_eq!(
            OrderAction::available_for(OrderStatus::Listo),
            vec![OrderAction::MarkDelivered, OrderAction::Cancel]
        );
        assert!(OrderAction::available_for(OrderStatus::Entregado).is_empty());
        assert!(OrderAction::available_for(OrderStatus::Cancelado).is_empty());
    }
}
