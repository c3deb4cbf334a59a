//! Orders loaded from the retailer and the line items attributed to clients.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ItemId, Money, OrderId, OrderNumber, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    /// Display string, e.g. "Thu, 4 Dec '25".
    pub date: String,
    pub total_amount: Money,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn item_mut(&mut self, item_id: &ItemId) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|item| &item.id == item_id)
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: ItemId,
    pub title: String,
    pub price: Money,
    pub commission: Option<Money>,
    pub status: ItemStatus,
    /// Opaque image reference.
    pub image: String,
    pub assigned_client_id: Option<ClientId>,
}

impl OrderItem {
    pub fn is_assigned(&self) -> bool {
        self.assigned_client_id.is_some()
    }

    pub fn is_unpaid(&self) -> bool {
        self.status.contains(&StatusLabel::Unpaid)
    }
}

/// Serialized as the bare label text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum StatusLabel {
    Paid,
    Unpaid,
    Processing,
    Other(String),
}

impl StatusLabel {
    pub fn is_payment(&self) -> bool {
        matches!(self, StatusLabel::Paid | StatusLabel::Unpaid)
    }
}

impl Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLabel::Paid => write!(f, "Paid"),
            StatusLabel::Unpaid => write!(f, "Unpaid"),
            StatusLabel::Processing => write!(f, "Processing"),
            StatusLabel::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for StatusLabel {
    fn from(s: &str) -> Self {
        match s {
            "Paid" => StatusLabel::Paid,
            "Unpaid" => StatusLabel::Unpaid,
            "Processing" => StatusLabel::Processing,
            _ => StatusLabel::Other(s.to_string()),
        }
    }
}

impl From<String> for StatusLabel {
    fn from(s: String) -> Self {
        StatusLabel::from(s.as_str())
    }
}

impl From<StatusLabel> for String {
    fn from(label: StatusLabel) -> Self {
        label.to_string()
    }
}

/// Ordered, duplicate-free status labels. Never holds both `Paid` and
/// `Unpaid`.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ItemStatus(Vec<StatusLabel>);

impl ItemStatus {
    pub fn new(labels: Vec<StatusLabel>) -> Result<Self, TypeConstraintError> {
        let mut deduped: Vec<StatusLabel> = Vec::with_capacity(labels.len());
        for label in labels {
            if !deduped.contains(&label) {
                deduped.push(label);
            }
        }
        if deduped.contains(&StatusLabel::Paid) && deduped.contains(&StatusLabel::Unpaid) {
            return Err(TypeConstraintError::ConflictingPaymentStatus);
        }
        Ok(Self(deduped))
    }

    pub fn labels(&self) -> &[StatusLabel] {
        &self.0
    }

    pub fn contains(&self, label: &StatusLabel) -> bool {
        self.0.contains(label)
    }

    /// Drops any payment label and puts the new one first, keeping the
    /// remaining labels in order.
    #[must_use]
    pub fn with_payment(&self, paid: bool) -> Self {
        let payment = if paid {
            StatusLabel::Paid
        } else {
            StatusLabel::Unpaid
        };
        let labels = std::iter::once(payment)
            .chain(self.0.iter().filter(|label| !label.is_payment()).cloned())
            .collect();
        Self(labels)
    }
}

impl TryFrom<Vec<String>> for ItemStatus {
    type Error = TypeConstraintError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value.iter().map(|s| StatusLabel::from(s.as_str())).collect())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let labels = Vec::<StatusLabel>::deserialize(deserializer)?;
        ItemStatus::new(labels).map_err(serde::de::Error::custom)
    }
}
