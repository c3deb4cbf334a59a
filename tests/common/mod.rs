#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use shopper_desk::domain::client::{Address, Client, ClientStats, DeliveryPreference, ProductRequest};
use shopper_desk::domain::order::{ItemStatus, Order, OrderItem, StatusLabel};
use shopper_desk::domain::types::{
    ClientId, ClientName, ClientPhone, ClientSurname, ItemId, Money, Notes, OrderId, OrderNumber,
    ProductTitle,
};
use shopper_desk::models::config::EngineConfig;
use shopper_desk::repository::InMemoryRepository;
use shopper_desk::session::Session;

pub fn client_id(id: i64) -> ClientId {
    ClientId::new(id).unwrap()
}

pub fn item_id(id: &str) -> ItemId {
    ItemId::new(id).unwrap()
}

pub fn order_id(id: &str) -> OrderId {
    OrderId::new(id).unwrap()
}

fn created(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn address(street: &str, suburb: &str, city: &str, province: &str, postal_code: &str) -> Address {
    Address {
        street: street.to_string(),
        complex: None,
        suburb: suburb.to_string(),
        city: city.to_string(),
        province: province.to_string(),
        postal_code: postal_code.to_string(),
    }
}

fn request(title: &str, quantity: u32) -> ProductRequest {
    ProductRequest::new(ProductTitle::new(title).unwrap(), quantity, Notes::default(), None)
        .unwrap()
}

fn client(
    id: i64,
    name: &str,
    surname: &str,
    phone: &str,
    requests: Vec<ProductRequest>,
    address: Address,
) -> Client {
    Client {
        id: client_id(id),
        name: ClientName::new(name).unwrap(),
        surname: ClientSurname::new(surname).unwrap(),
        phone: ClientPhone::new(phone).unwrap(),
        email: None,
        notes: Notes::default(),
        addresses: vec![address],
        product_requests: requests,
        delivery_preference: DeliveryPreference::None,
        is_favourite: id == 1,
        stats: ClientStats::default(),
        created_at: created(id as u32),
    }
}

pub fn clients() -> Vec<Client> {
    vec![
        client(
            1,
            "Jordan",
            "Smith",
            "082 123 4567",
            vec![request("iPhone 15", 1)],
            address("12 Blue Lane", "Green Point", "Cape Town", "Western Cape", "8005"),
        ),
        client(
            2,
            "Naledi",
            "Khumalo",
            "071 987 6543",
            vec![],
            address("88 Heritage Close", "Morningside", "Sandton", "Gauteng", "2196"),
        ),
        client(
            3,
            "Themba",
            "Maseko",
            "060 555 0199",
            vec![
                request("Philips Airfryer XXL", 1),
                request("Macbook Air M3", 1),
            ],
            address("45 Whispering Crag Road", "Woodstock", "Cape Town", "Western Cape", "7915"),
        ),
        client(
            4,
            "Noah",
            "Williams",
            "083 444 2211",
            vec![],
            address("7 Oak Street", "Constantia", "Cape Town", "Western Cape", "7806"),
        ),
        client(
            5,
            "Priya",
            "Naidoo",
            "072 000 9988",
            vec![request("Neutrogena Sunscreen", 2)],
            address("15 Curry Avenue", "Umhlanga", "Durban", "KwaZulu-Natal", "4319"),
        ),
        client(
            6,
            "Aisha",
            "Khan",
            "072 111 2233",
            vec![],
            address("22 Bazaar Road", "Fordsburg", "Johannesburg", "Gauteng", "2092"),
        ),
        client(
            7,
            "Thandi",
            "Newton",
            "072 222 3344",
            vec![],
            address("59 Protea Way", "Newlands", "Cape Town", "Western Cape", "7700"),
        ),
        client(
            8,
            "Ben",
            "Wall",
            "071 222 5566",
            vec![],
            address("123 Sunshine Avenue", "Sea Point", "Cape Town", "Western Cape", "8005"),
        ),
    ]
}

fn item(id: &str, title: &str, price_rand: i64, unpaid: bool, assigned: Option<i64>) -> OrderItem {
    let payment = if unpaid {
        StatusLabel::Unpaid
    } else {
        StatusLabel::Paid
    };
    OrderItem {
        id: item_id(id),
        title: title.to_string(),
        price: Money::from_major(price_rand).unwrap(),
        commission: None,
        status: ItemStatus::new(vec![payment, StatusLabel::Processing]).unwrap(),
        image: String::new(),
        assigned_client_id: assigned.map(client_id),
    }
}

fn order(id: &str, number: &str, date: &str, total_rand: i64, items: Vec<OrderItem>) -> Order {
    Order {
        id: order_id(id),
        order_number: OrderNumber::new(number).unwrap(),
        date: date.to_string(),
        total_amount: Money::from_major(total_rand).unwrap(),
        items,
    }
}

/// Eight unassigned items and three unpaid ones across three orders.
pub fn orders() -> Vec<Order> {
    vec![
        order(
            "order-1",
            "235677",
            "Thu, 4 Dec '25",
            26754,
            vec![
                item("item-1", "Playstation 5 Pro Console (PS5 PRO)", 19858, false, Some(8)),
                item("item-2", "Philips 2000 Series 6.2L Airfryer", 1599, false, Some(8)),
                item("item-3", "The North Face Base Camp Duffel", 3399, false, None),
                item("item-restored-1", "Logitech G502 HERO Wired Mouse", 1499, false, None),
                item("item-restored-2", "S24 Silicone Case - Dark Violet", 399, true, None),
            ],
        ),
        order(
            "order-2",
            "235689",
            "Fri, 5 Dec '25",
            21395,
            vec![
                item("item-ben-1", "Apple Watch Series 10", 8999, false, Some(8)),
                item("item-ben-2", "Sony WH-1000XM5 Headphones", 7499, true, Some(8)),
                item("item-ben-3", "Nike Air Max 270 Trainers", 2799, false, Some(8)),
                item("item-ben-4", "Adidas Stan Smith Primegreen Shoes", 1599, true, Some(8)),
                item("item-restored-3", "Apple 20W USB-C Power Adapter", 499, false, None),
            ],
        ),
        order(
            "order-3",
            "235912",
            "Sat, 6 Dec '25",
            12496,
            vec![
                item("item-unassigned-1", "Nespresso Vertuo Pop Coffee Machine", 3499, false, None),
                item("item-unassigned-2", "Hydro Flask 32oz Wide Mouth Bottle", 1299, false, None),
                item("item-unassigned-3", "JBL Flip 6 Portable Speaker", 2499, false, None),
                item("item-unassigned-4", "Instant Pot Duo 7-in-1", 5199, false, None),
            ],
        ),
    ]
}

pub const INITIAL_UNASSIGNED: usize = 8;
pub const INITIAL_UNPAID: usize = 3;

pub fn repository() -> InMemoryRepository {
    InMemoryRepository::new(clients(), orders()).unwrap()
}

pub fn session() -> Session<InMemoryRepository> {
    Session::new(repository(), &EngineConfig::default())
}

/// Recomputes the unassigned count straight from the items.
pub fn count_unassigned(orders: &[Order]) -> usize {
    orders
        .iter()
        .flat_map(|order| order.items.iter())
        .filter(|item| item.assigned_client_id.is_none())
        .count()
}

pub fn assignee(orders: &[Order], id: &str) -> Option<ClientId> {
    orders
        .iter()
        .flat_map(|order| order.items.iter())
        .find(|item| item.id.as_str() == id)
        .and_then(|item| item.assigned_client_id)
}
