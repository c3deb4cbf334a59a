//! DTOs shaped for the clients listing.

use serde::Serialize;

use crate::domain::client::Client;

/// Clients sharing the first letter of their name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientGroup {
    pub letter: String,
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ClientListing {
    /// Alphabetical sorts are grouped by initial letter.
    Grouped(Vec<ClientGroup>),
    Flat(Vec<Client>),
}

impl ClientListing {
    pub fn len(&self) -> usize {
        match self {
            ClientListing::Grouped(groups) => groups.iter().map(|g| g.clients.len()).sum(),
            ClientListing::Flat(clients) => clients.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clients in display order regardless of grouping.
    pub fn clients(&self) -> Vec<&Client> {
        match self {
            ClientListing::Grouped(groups) => {
                groups.iter().flat_map(|g| g.clients.iter()).collect()
            }
            ClientListing::Flat(clients) => clients.iter().collect(),
        }
    }
}

/// Number of clients each filter pill would keep on its own.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ClientFilterCounts {
    pub with_product_requests: usize,
    pub favourites: usize,
    pub with_unpaid_items: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientsPageData {
    pub listing: ClientListing,
    pub counts: ClientFilterCounts,
    pub total_clients: usize,
    pub unassigned_count: usize,
}
