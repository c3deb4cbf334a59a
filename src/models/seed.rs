//! Seed records loaded from a JSON file. Amounts are in minor units.

use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::client::{Address, Client, ClientStats, DeliveryPreference, ProductRequest};
use crate::domain::order::{ItemStatus, Order, OrderItem};
use crate::domain::types::{
    ClientEmail, ClientId, ClientName, ClientPhone, ClientSurname, ItemId, Money, Notes, OrderId,
    OrderNumber, ProductLink, ProductTitle, TypeConstraintError,
};
use crate::repository::InMemoryRepository;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed seed file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid seed record: {0}")]
    Invalid(#[from] TypeConstraintError),
    #[error("inconsistent seed data: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
pub struct SeedProductRequest {
    pub title: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub link: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SeedClient {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub product_requests: Vec<SeedProductRequest>,
    #[serde(default)]
    pub delivery_preference: String,
    #[serde(default)]
    pub is_favourite: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct SeedItem {
    pub id: String,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub commission: Option<i64>,
    pub status: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub assigned_client_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SeedOrder {
    pub id: String,
    pub order_number: String,
    pub date: String,
    pub total_amount: i64,
    pub items: Vec<SeedItem>,
}

#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub clients: Vec<SeedClient>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

impl TryFrom<SeedProductRequest> for ProductRequest {
    type Error = TypeConstraintError;

    fn try_from(request: SeedProductRequest) -> Result<Self, Self::Error> {
        let link = request
            .link
            .filter(|link| !link.trim().is_empty())
            .map(ProductLink::new)
            .transpose()?;

        ProductRequest::new(
            ProductTitle::new(request.title)?,
            request.quantity,
            Notes::new(request.notes),
            link,
        )
    }
}

impl TryFrom<SeedClient> for Client {
    type Error = TypeConstraintError;

    fn try_from(client: SeedClient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: ClientName::new(client.name)?,
            surname: ClientSurname::new(client.surname)?,
            phone: ClientPhone::new(client.phone)?,
            email: client.email.map(ClientEmail::new).transpose()?,
            notes: Notes::new(client.notes),
            addresses: client.addresses,
            product_requests: client
                .product_requests
                .into_iter()
                .map(ProductRequest::try_from)
                .collect::<Result<_, _>>()?,
            delivery_preference: DeliveryPreference::try_from(
                client.delivery_preference.as_str(),
            )?,
            is_favourite: client.is_favourite,
            stats: ClientStats::default(),
            created_at: client
                .created_at
                .unwrap_or_else(|| Utc::now().naive_utc()),
        })
    }
}

impl TryFrom<SeedItem> for OrderItem {
    type Error = TypeConstraintError;

    fn try_from(item: SeedItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::new(item.id)?,
            title: item.title,
            price: Money::new(item.price)?,
            commission: item.commission.map(Money::new).transpose()?,
            status: ItemStatus::try_from(item.status)?,
            image: item.image,
            assigned_client_id: item.assigned_client_id.map(ClientId::new).transpose()?,
        })
    }
}

impl TryFrom<SeedOrder> for Order {
    type Error = TypeConstraintError;

    fn try_from(order: SeedOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(order.id)?,
            order_number: OrderNumber::new(order.order_number)?,
            date: order.date,
            total_amount: Money::new(order.total_amount)?,
            items: order
                .items
                .into_iter()
                .map(OrderItem::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn into_domain(self) -> Result<(Vec<Client>, Vec<Order>), SeedError> {
        let clients = self
            .clients
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let orders = self
            .orders
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((clients, orders))
    }

    /// Builds a store, rejecting duplicate ids and dangling assignments.
    pub fn into_repository(self) -> Result<InMemoryRepository, SeedError> {
        let (clients, orders) = self.into_domain()?;
        Ok(InMemoryRepository::new(clients, orders)?)
    }
}
