//! Domain Store contract and its in-memory implementation.
//!
//! Every mutation of clients and order items goes through the writer traits
//! below, so the invariants on assignments and statuses are enforced in one
//! place regardless of which screen issued the command.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::order::{Order, OrderItem};
use crate::domain::types::{ClientId, ItemId, OrderId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::views::aggregates;

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod order;
pub mod settings;

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Roster order, stats refreshed from the current orders.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    fn unassigned_count(&self) -> RepositoryResult<usize>;
    /// Items whose id is in `item_ids`, in canonical order.
    fn find_items(&self, item_ids: &[ItemId]) -> RepositoryResult<Vec<OrderItem>>;
}

pub trait OrderWriter {
    fn set_item_assignment(
        &self,
        order_id: &OrderId,
        item_id: &ItemId,
        client_id: Option<ClientId>,
    ) -> RepositoryResult<OrderItem>;
    fn assign_items(
        &self,
        item_ids: &[ItemId],
        client_id: Option<ClientId>,
    ) -> RepositoryResult<usize>;
    fn set_items_payment(&self, item_ids: &[ItemId], paid: bool) -> RepositoryResult<usize>;
}

pub trait SettingsReader {
    fn sales_goal(&self) -> RepositoryResult<u32>;
}

pub trait SettingsWriter {
    fn set_sales_goal(&self, goal: u32) -> RepositoryResult<()>;
}

pub const DEFAULT_SALES_GOAL: u32 = 2500;

#[derive(Debug)]
pub(crate) struct StoreState {
    pub(crate) clients: Vec<Client>,
    pub(crate) orders: Vec<Order>,
    pub(crate) sales_goal: u32,
}

impl StoreState {
    pub(crate) fn client_exists(&self, id: ClientId) -> bool {
        self.clients.iter().any(|client| client.id == id)
    }

    /// Returns the client with its stats recomputed from current orders.
    pub(crate) fn hydrate(&self, client: &Client) -> Client {
        let mut client = client.clone();
        client.stats = aggregates::client_stats(&self.orders, client.id);
        client
    }
}

/// In-memory Domain Store. Clones share the same state; all access is
/// serialized through a single mutex.
#[derive(Clone, Debug)]
pub struct InMemoryRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRepository {
    /// Builds a store from externally loaded records, rejecting duplicate ids
    /// and assignments that point at unknown clients.
    pub fn new(clients: Vec<Client>, orders: Vec<Order>) -> RepositoryResult<Self> {
        let mut client_ids = HashSet::new();
        for client in &clients {
            if !client_ids.insert(client.id) {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "duplicate client id {}",
                    client.id
                )));
            }
        }

        let mut order_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for order in &orders {
            if !order_ids.insert(&order.id) {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "duplicate order id {}",
                    order.id
                )));
            }
            for item in &order.items {
                if !item_ids.insert(&item.id) {
                    return Err(RepositoryError::ConstraintViolation(format!(
                        "duplicate item id {}",
                        item.id
                    )));
                }
                if let Some(client_id) = item.assigned_client_id {
                    if !client_ids.contains(&client_id) {
                        return Err(RepositoryError::ConstraintViolation(format!(
                            "item {} assigned to unknown client {client_id}",
                            item.id
                        )));
                    }
                }
            }
        }

        Ok(Self {
            state: Arc::new(Mutex::new(StoreState {
                clients,
                orders,
                sales_goal: DEFAULT_SALES_GOAL,
            })),
        })
    }

    pub fn empty() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                clients: Vec::new(),
                orders: Vec::new(),
                sales_goal: DEFAULT_SALES_GOAL,
            })),
        }
    }

    pub fn with_sales_goal(self, goal: u32) -> RepositoryResult<Self> {
        self.lock()?.sales_goal = goal;
        Ok(self)
    }

    pub(crate) fn lock(&self) -> RepositoryResult<MutexGuard<'_, StoreState>> {
        Ok(self.state.lock()?)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::empty()
    }
}
