use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientEmail, ClientId, ClientName, ClientPhone, ClientSurname, Money, Notes, ProductLink,
    ProductTitle, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub surname: ClientSurname,
    pub phone: ClientPhone,
    pub email: Option<ClientEmail>,
    pub notes: Notes,
    pub addresses: Vec<Address>,
    /// Newest request first.
    pub product_requests: Vec<ProductRequest>,
    pub delivery_preference: DeliveryPreference,
    pub is_favourite: bool,
    /// Derived from the current orders each time the client is read.
    pub stats: ClientStats,
    pub created_at: NaiveDateTime,
}

impl Client {
    /// Upper-cased first letters of name and surname.
    pub fn initials(&self) -> String {
        [self.name.as_str(), self.surname.as_str()]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn has_product_requests(&self) -> bool {
        !self.product_requests.is_empty()
    }
}

/// Per-client aggregates computed from order items assigned to the client.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientStats {
    pub unpaid_count: usize,
    pub orders_count: usize,
    pub items_count: usize,
    pub order_amount: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub complex: Option<String>,
    pub suburb: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRequest {
    pub title: ProductTitle,
    pub quantity: u32,
    pub notes: Notes,
    pub link: Option<ProductLink>,
}

impl ProductRequest {
    /// Builds a request, rejecting a zero quantity.
    pub fn new(
        title: ProductTitle,
        quantity: u32,
        notes: Notes,
        link: Option<ProductLink>,
    ) -> Result<Self, TypeConstraintError> {
        if quantity == 0 {
            return Err(TypeConstraintError::InvalidValue(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            title,
            quantity,
            notes,
            link,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeliveryPreference {
    #[default]
    None,
    ClientCollectsFromShopper,
    ShopperDeliversToClient,
    TakealotDeliversToClient,
    ClientCollectsFromTakealot,
}

impl DeliveryPreference {
    pub const ALL: [DeliveryPreference; 5] = [
        DeliveryPreference::None,
        DeliveryPreference::ClientCollectsFromShopper,
        DeliveryPreference::ShopperDeliversToClient,
        DeliveryPreference::TakealotDeliversToClient,
        DeliveryPreference::ClientCollectsFromTakealot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeliveryPreference::None => "None",
            DeliveryPreference::ClientCollectsFromShopper => "Client collects from shopper",
            DeliveryPreference::ShopperDeliversToClient => "Shopper delivers to client",
            DeliveryPreference::TakealotDeliversToClient => "Takealot delivers to client",
            DeliveryPreference::ClientCollectsFromTakealot => "Client collects from Takealot",
        }
    }
}

impl Display for DeliveryPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<&str> for DeliveryPreference {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(DeliveryPreference::None);
        }
        DeliveryPreference::ALL
            .into_iter()
            .find(|pref| pref.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| TypeConstraintError::InvalidValue(value.to_string()))
    }
}

/// Client record produced by the add-client collaborator; the store assigns
/// identity, timestamps and empty collections.
#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: ClientName,
    pub surname: ClientSurname,
    pub phone: ClientPhone,
    pub email: Option<ClientEmail>,
    pub notes: Notes,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        surname: ClientSurname,
        phone: ClientPhone,
        email: Option<ClientEmail>,
        notes: Notes,
    ) -> Self {
        Self {
            name,
            surname,
            phone,
            email,
            notes,
        }
    }
}

/// Partial client update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<ClientName>,
    pub surname: Option<ClientSurname>,
    pub phone: Option<ClientPhone>,
    pub email: Option<Option<ClientEmail>>,
    pub notes: Option<Notes>,
    pub addresses: Option<Vec<Address>>,
    pub product_requests: Option<Vec<ProductRequest>>,
    pub delivery_preference: Option<DeliveryPreference>,
    pub is_favourite: Option<bool>,
}

impl UpdateClient {
    pub fn addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = Some(addresses);
        self
    }

    pub fn product_requests(mut self, requests: Vec<ProductRequest>) -> Self {
        self.product_requests = Some(requests);
        self
    }

    pub fn delivery_preference(mut self, preference: DeliveryPreference) -> Self {
        self.delivery_preference = Some(preference);
        self
    }

    pub fn favourite(mut self, is_favourite: bool) -> Self {
        self.is_favourite = Some(is_favourite);
        self
    }

    pub fn notes(mut self, notes: Notes) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Applies the set fields onto `client`.
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            client.surname = surname.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            client.email = email.clone();
        }
        if let Some(notes) = &self.notes {
            client.notes = notes.clone();
        }
        if let Some(addresses) = &self.addresses {
            client.addresses = addresses.clone();
        }
        if let Some(requests) = &self.product_requests {
            client.product_requests = requests.clone();
        }
        if let Some(preference) = self.delivery_preference {
            client.delivery_preference = preference;
        }
        if let Some(is_favourite) = self.is_favourite {
            client.is_favourite = is_favourite;
        }
    }
}
