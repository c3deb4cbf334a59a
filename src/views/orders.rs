//! Filtering and sorting of the orders listing.
//!
//! All predicates are applied per item and AND together; an order stays in
//! the listing only while at least one of its items survives.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderItem};
use crate::domain::types::{ClientId, ItemId, Money};
use crate::dto::orders::OrdersPageData;
use crate::views::aggregates;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSort {
    #[default]
    MostRecent,
    ValueHighToLow,
    ValueLowToHigh,
    ItemPriceHighToLow,
    ItemPriceLowToHigh,
}

impl OrderSort {
    pub const ALL: [OrderSort; 5] = [
        OrderSort::MostRecent,
        OrderSort::ValueHighToLow,
        OrderSort::ValueLowToHigh,
        OrderSort::ItemPriceHighToLow,
        OrderSort::ItemPriceLowToHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderSort::MostRecent => "Most recent",
            OrderSort::ValueHighToLow => "Order value (High to low)",
            OrderSort::ValueLowToHigh => "Order value (Low to high)",
            OrderSort::ItemPriceHighToLow => "Item price (High to low)",
            OrderSort::ItemPriceLowToHigh => "Item price (Low to high)",
        }
    }
}

/// Whose items to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientFilter {
    Client(ClientId),
    /// The shopper using the app.
    You,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub client: Option<ClientFilter>,
    pub unassigned_only: bool,
    pub unpaid_only: bool,
    pub search: Option<String>,
    pub sort: OrderSort,
    /// Client record standing in for the shopper, if any.
    pub me: Option<ClientId>,
}

impl OrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, filter: ClientFilter) -> Self {
        self.client = Some(filter);
        self
    }

    pub fn unassigned_only(mut self) -> Self {
        self.unassigned_only = true;
        self
    }

    pub fn unpaid_only(mut self) -> Self {
        self.unpaid_only = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn sort(mut self, sort: OrderSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn me(mut self, client_id: Option<ClientId>) -> Self {
        self.me = client_id;
        self
    }

    fn keeps(&self, order: &Order, item: &OrderItem) -> bool {
        let client_ok = match self.client {
            Some(ClientFilter::Client(id)) => item.assigned_client_id == Some(id),
            Some(ClientFilter::You) => {
                self.me.is_some() && item.assigned_client_id == self.me
            }
            None => true,
        };
        let unassigned_ok = !self.unassigned_only || !item.is_assigned();
        let unpaid_ok = !self.unpaid_only || item.is_unpaid();
        let search_ok = self.search.as_deref().is_none_or(|q| {
            item.title.to_lowercase().contains(q)
                || order.order_number.to_lowercase().contains(q)
        });

        client_ok && unassigned_ok && unpaid_ok && search_ok
    }
}

/// Keeps the surviving items of each order and drops emptied orders.
pub fn filter_orders(orders: &[Order], query: &OrderQuery) -> Vec<Order> {
    orders
        .iter()
        .filter_map(|order| {
            let items: Vec<OrderItem> = order
                .items
                .iter()
                .filter(|item| query.keeps(order, item))
                .cloned()
                .collect();
            (!items.is_empty()).then(|| Order {
                items,
                ..order.clone()
            })
        })
        .collect()
}

fn max_price(order: &Order) -> Money {
    order
        .items
        .iter()
        .map(|item| item.price)
        .max()
        .unwrap_or_default()
}

fn min_price(order: &Order) -> Money {
    order
        .items
        .iter()
        .map(|item| item.price)
        .min()
        .unwrap_or_default()
}

fn compare(a: &Order, b: &Order, sort: OrderSort) -> Ordering {
    match sort {
        OrderSort::MostRecent => b.order_number.cmp(&a.order_number),
        OrderSort::ValueHighToLow => b.total_amount.cmp(&a.total_amount),
        OrderSort::ValueLowToHigh => a.total_amount.cmp(&b.total_amount),
        OrderSort::ItemPriceHighToLow => max_price(b).cmp(&max_price(a)),
        OrderSort::ItemPriceLowToHigh => min_price(a).cmp(&min_price(b)),
    }
}

/// Stable sort; ties keep their canonical order.
pub fn sort_orders(orders: &mut [Order], sort: OrderSort) {
    orders.sort_by(|a, b| compare(a, b, sort));
}

pub fn visible_orders(orders: &[Order], query: &OrderQuery) -> Vec<Order> {
    let mut visible = filter_orders(orders, query);
    sort_orders(&mut visible, query.sort);
    visible
}

pub fn visible_item_ids(orders: &[Order]) -> Vec<ItemId> {
    orders.iter().flat_map(Order::item_ids).collect()
}

pub fn orders_page(orders: &[Order], query: &OrderQuery) -> OrdersPageData {
    let visible = visible_orders(orders, query);
    let visible_item_ids = visible_item_ids(&visible);

    OrdersPageData {
        total_items: visible_item_ids.len(),
        visible_item_ids,
        orders: visible,
        unassigned_count: aggregates::unassigned_count(orders),
        unpaid_count: aggregates::unpaid_count(orders),
    }
}

/// Filter toggles of the orders screen.
///
/// The client filter and the unassigned-only filter exclude each other:
/// turning one on clears the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderFilters {
    client: Option<ClientFilter>,
    unassigned_only: bool,
    unpaid_only: bool,
    search: String,
    sort: OrderSort,
}

impl OrderFilters {
    pub fn new(unassigned_only: bool) -> Self {
        Self {
            unassigned_only,
            ..Self::default()
        }
    }

    pub fn client(&self) -> Option<ClientFilter> {
        self.client
    }

    pub fn is_unassigned_only(&self) -> bool {
        self.unassigned_only
    }

    pub fn is_unpaid_only(&self) -> bool {
        self.unpaid_only
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> OrderSort {
        self.sort
    }

    pub fn select_client(&mut self, filter: Option<ClientFilter>) {
        if filter.is_some() {
            self.unassigned_only = false;
        }
        self.client = filter;
    }

    /// Flips the unassigned filter and drops any client filter.
    pub fn toggle_unassigned(&mut self) {
        self.set_unassigned(!self.unassigned_only);
    }

    pub fn set_unassigned(&mut self, on: bool) {
        self.unassigned_only = on;
        self.client = None;
    }

    pub fn toggle_unpaid(&mut self) {
        self.unpaid_only = !self.unpaid_only;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_sort(&mut self, sort: OrderSort) {
        self.sort = sort;
    }

    /// Turns the unassigned filter off once nothing is left to show.
    /// Returns true when the filter was switched off.
    pub fn reconcile(&mut self, unassigned_count: usize) -> bool {
        if self.unassigned_only && unassigned_count == 0 && self.client.is_none() {
            self.unassigned_only = false;
            return true;
        }
        false
    }

    /// The unassigned predicate is suspended while items are being selected
    /// so assigned items can be picked for re-assignment.
    pub fn to_query(&self, selecting: bool, me: Option<ClientId>) -> OrderQuery {
        OrderQuery {
            client: self.client,
            unassigned_only: self.unassigned_only && self.client.is_none() && !selecting,
            unpaid_only: self.unpaid_only,
            search: None,
            sort: self.sort,
            me,
        }
        .search(self.search.clone())
    }
}
