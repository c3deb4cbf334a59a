//! Derived counters recomputed from the canonical orders on every call.

use std::collections::HashSet;

use crate::domain::client::{Client, ClientStats};
use crate::domain::order::{Order, OrderItem};
use crate::domain::types::ClientId;
use crate::dto::dashboard::DashboardSummary;

fn all_items(orders: &[Order]) -> impl Iterator<Item = &OrderItem> {
    orders.iter().flat_map(|order| order.items.iter())
}

/// Number of items across all orders with no assigned client.
pub fn unassigned_count(orders: &[Order]) -> usize {
    all_items(orders).filter(|item| !item.is_assigned()).count()
}

/// Number of items across all orders carrying the `Unpaid` label.
pub fn unpaid_count(orders: &[Order]) -> usize {
    all_items(orders).filter(|item| item.is_unpaid()).count()
}

/// Aggregates over the items assigned to `client_id`.
pub fn client_stats(orders: &[Order], client_id: ClientId) -> ClientStats {
    let mut stats = ClientStats::default();
    let mut order_ids = HashSet::new();

    for order in orders {
        for item in order
            .items
            .iter()
            .filter(|item| item.assigned_client_id == Some(client_id))
        {
            order_ids.insert(&order.id);
            stats.items_count += 1;
            stats.order_amount = stats.order_amount + item.price;
            if item.is_unpaid() {
                stats.unpaid_count += 1;
            }
        }
    }

    stats.orders_count = order_ids.len();
    stats
}

/// Figures read by the dashboard, settings and profile screens.
pub fn dashboard_summary(clients: &[Client], orders: &[Order], sales_goal: u32) -> DashboardSummary {
    DashboardSummary {
        client_count: clients.len(),
        unassigned_count: unassigned_count(orders),
        unpaid_count: unpaid_count(orders),
        sales_goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{ItemStatus, StatusLabel};
    use crate::domain::types::{ItemId, Money, OrderId, OrderNumber};

    fn item(id: &str, price: i64, unpaid: bool, client: Option<i64>) -> OrderItem {
        let label = if unpaid {
            StatusLabel::Unpaid
        } else {
            StatusLabel::Paid
        };
        OrderItem {
            id: ItemId::new(id).unwrap(),
            title: id.to_string(),
            price: Money::new(price).unwrap(),
            commission: None,
            status: ItemStatus::new(vec![label, StatusLabel::Processing]).unwrap(),
            image: String::new(),
            assigned_client_id: client.map(|id| ClientId::new(id).unwrap()),
        }
    }

    fn order(id: &str, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(id).unwrap(),
            order_number: OrderNumber::new(id).unwrap(),
            date: String::new(),
            total_amount: items.iter().map(|i| i.price).sum(),
            items,
        }
    }

    #[test]
    fn counts_are_derived_from_items() {
        let orders = vec![
            order("o1", vec![item("a", 100, false, Some(1)), item("b", 50, true, None)]),
            order("o2", vec![item("c", 70, true, Some(1)), item("d", 20, false, None)]),
        ];

        assert_eq!(unassigned_count(&orders), 2);
        assert_eq!(unpaid_count(&orders), 2);

        let stats = client_stats(&orders, ClientId::new(1).unwrap());
        assert_eq!(stats.items_count, 2);
        assert_eq!(stats.orders_count, 2);
        assert_eq!(stats.unpaid_count, 1);
        assert_eq!(stats.order_amount.minor_units(), 170);
    }

    #[test]
    fn client_without_items_has_empty_stats() {
        let orders = vec![order("o1", vec![item("a", 100, false, None)])];
        assert_eq!(
            client_stats(&orders, ClientId::new(9).unwrap()),
            ClientStats::default()
        );
    }
}
