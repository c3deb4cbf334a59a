//! Filtering, sorting and grouping of the clients listing.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::client::Client;
use crate::dto::clients::{ClientFilterCounts, ClientGroup, ClientListing};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientSort {
    #[default]
    AZ,
    ZA,
    AmountHigh,
    AmountLow,
    Newest,
    Oldest,
}

impl ClientSort {
    pub fn label(self) -> &'static str {
        match self {
            ClientSort::AZ => "Alphabetical (A - Z)",
            ClientSort::ZA => "Alphabetical (Z - A)",
            ClientSort::AmountHigh => "Order amount (High to low)",
            ClientSort::AmountLow => "Order amount (Low to high)",
            ClientSort::Newest => "Newest",
            ClientSort::Oldest => "Oldest",
        }
    }

    pub fn is_alphabetical(self) -> bool {
        matches!(self, ClientSort::AZ | ClientSort::ZA)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientQuery {
    pub with_product_requests: bool,
    pub favourites_only: bool,
    pub with_unpaid_items: bool,
    pub search: Option<String>,
    pub sort: ClientSort,
}

impl ClientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product_requests(mut self) -> Self {
        self.with_product_requests = true;
        self
    }

    pub fn favourites_only(mut self) -> Self {
        self.favourites_only = true;
        self
    }

    pub fn with_unpaid_items(mut self) -> Self {
        self.with_unpaid_items = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn sort(mut self, sort: ClientSort) -> Self {
        self.sort = sort;
        self
    }

    fn keeps(&self, client: &Client) -> bool {
        (!self.with_product_requests || client.has_product_requests())
            && (!self.favourites_only || client.is_favourite)
            && (!self.with_unpaid_items || client.stats.unpaid_count > 0)
            && self.search.as_deref().is_none_or(|q| {
                client.name.to_lowercase().contains(q)
                    || client.surname.to_lowercase().contains(q)
                    || client.phone.contains(q)
            })
    }
}

/// Accent- and case-insensitive sort key: NFD with combining marks dropped,
/// then lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compares names on their collation key with the raw text as tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn compare(a: &Client, b: &Client, sort: ClientSort) -> Ordering {
    match sort {
        ClientSort::AZ => compare_names(&a.name, &b.name),
        ClientSort::ZA => compare_names(&b.name, &a.name),
        ClientSort::AmountHigh => b.stats.order_amount.cmp(&a.stats.order_amount),
        ClientSort::AmountLow => a.stats.order_amount.cmp(&b.stats.order_amount),
        ClientSort::Newest => b.created_at.cmp(&a.created_at),
        ClientSort::Oldest => a.created_at.cmp(&b.created_at),
    }
}

pub fn filter_clients(clients: &[Client], query: &ClientQuery) -> Vec<Client> {
    clients
        .iter()
        .filter(|client| query.keeps(client))
        .cloned()
        .collect()
}

pub fn sort_clients(clients: &mut [Client], sort: ClientSort) {
    clients.sort_by(|a, b| compare(a, b, sort));
}

/// "Émile" files under "E", next to the names it sorts with.
fn initial_letter(client: &Client) -> String {
    collation_key(&client.name)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Groups an already sorted list by the first letter of the name. Groups
/// appear in the order their first member appears.
pub fn group_by_initial(clients: Vec<Client>) -> Vec<ClientGroup> {
    let mut groups: Vec<ClientGroup> = Vec::new();
    for client in clients {
        let letter = initial_letter(&client);
        match groups.iter_mut().find(|group| group.letter == letter) {
            Some(group) => group.clients.push(client),
            None => groups.push(ClientGroup {
                letter,
                clients: vec![client],
            }),
        }
    }
    groups
}

pub fn list_clients(clients: &[Client], query: &ClientQuery) -> ClientListing {
    let mut visible = filter_clients(clients, query);
    sort_clients(&mut visible, query.sort);

    if query.sort.is_alphabetical() {
        ClientListing::Grouped(group_by_initial(visible))
    } else {
        ClientListing::Flat(visible)
    }
}

pub fn filter_counts(clients: &[Client]) -> ClientFilterCounts {
    ClientFilterCounts {
        with_product_requests: clients.iter().filter(|c| c.has_product_requests()).count(),
        favourites: clients.iter().filter(|c| c.is_favourite).count(),
        with_unpaid_items: clients.iter().filter(|c| c.stats.unpaid_count > 0).count(),
    }
}

/// Name or surname lookup used by the assign and client-filter sheets.
pub fn search_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let q = term.trim().to_lowercase();
    clients
        .iter()
        .filter(|client| {
            q.is_empty()
                || client.name.to_lowercase().contains(&q)
                || client.surname.to_lowercase().contains(&q)
        })
        .collect()
}
