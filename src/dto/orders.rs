//! DTOs shaped for the orders listing.

use serde::Serialize;

use crate::domain::order::Order;
use crate::domain::types::ItemId;

/// Visible orders under the active filter and sort, plus global counters.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersPageData {
    /// Filtered and sorted orders; each holds only its surviving items.
    pub orders: Vec<Order>,
    /// Number of items across `orders`.
    pub total_items: usize,
    /// Ids of every visible item, the scope of "select all".
    pub visible_item_ids: Vec<ItemId>,
    pub unassigned_count: usize,
    pub unpaid_count: usize,
}
