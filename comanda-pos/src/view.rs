//! Order board - filtered, sorted projection of the order collection
//!
//! Pure functions over a borrowed order slice: the board recomputes on
//! every read instead of caching, and the headline numbers always come
//! from the unfiltered collection.

use chrono::DateTime;
use shared::models::{Order, OrderStatus};
use shared::money;
use std::cmp::Ordering;

/// Status filter: everything, or one exact status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Sort order for the management view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderSort {
    /// Newest first (default)
    #[default]
    Recency,
    /// Status wire label, ascending
    StatusLabel,
    /// Highest total first
    Total,
}

/// Query parameters for the board.
#[derive(Debug, Clone, Default)]
pub struct BoardQuery {
    /// Case-insensitive substring over id, order number, space name and
    /// customer name; empty matches everything
    pub text: String,
    pub status: StatusFilter,
    pub sort: OrderSort,
}

impl BoardQuery {
    /// Applies filter and sort, returning borrowed orders.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let needle = self.text.trim().to_lowercase();
        let mut matched: Vec<&Order> = orders
            .iter()
            .filter(|o| self.status.matches(o.status) && matches_text(o, &needle))
            .collect();

        match self.sort {
            OrderSort::Recency => matched.sort_by(|a, b| compare_recency(a, b)),
            OrderSort::StatusLabel => {
                matched.sort_by(|a, b| a.status.label().cmp(b.status.label()))
            }
            OrderSort::Total => matched.sort_by(|a, b| {
                b.total_amount
                    .partial_cmp(&a.total_amount)
                    .unwrap_or(Ordering::Equal)
            }),
        }

        matched
    }
}

fn matches_text(order: &Order, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_ci(order.id.as_deref(), needle)
        || contains_ci(Some(&order.order_number), needle)
        || contains_ci(order.space_name.as_deref(), needle)
        || contains_ci(order.customer_name.as_deref(), needle)
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Newest first. Orders whose timestamp fails RFC 3339 parsing sort
/// after all parseable ones, string-descending among themselves; the
/// split keeps the comparator a total order.
fn compare_recency(a: &Order, b: &Order) -> Ordering {
    let ta = DateTime::parse_from_rfc3339(&a.created_at).ok();
    let tb = DateTime::parse_from_rfc3339(&b.created_at).ok();
    match (ta, tb) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}

/// Whole-collection aggregates for the board header.
///
/// Always computed from the unfiltered collection, so the headline
/// numbers do not move when the user narrows the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    /// PENDIENTE or EN_PREPARACION
    pub active: usize,
    /// Sum of `totalAmount` in currency units
    pub revenue: f64,
}

pub fn stats(orders: &[Order]) -> OrderStats {
    OrderStats {
        total: orders.len(),
        active: orders.iter().filter(|o| o.status.is_active()).count(),
        revenue: money::round_currency(orders.iter().map(|o| o.total_amount).sum()),
    }
}
