use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Money, Page},
    render::{Column, badge},
};

facet_enum! {
    pub enum OrderStatus {
        Pending => "pending",
        Processing => "processing",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

facet_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Paid => "paid",
        Failed => "failed",
        Refunded => "refunded",
    }
}

/// Fulfilment and payment progress independently of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub number: String,
    pub customer: String,
    pub email: String,
    pub items: u32,
    pub total: Money,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub placed_on: Date,
}

impl Record for Order {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[
        FacetSpec::new("status", OrderStatus::VALUES),
        FacetSpec::new("payment", PaymentStatus::VALUES),
    ];
    const SORT_KEYS: &'static [&'static str] = &["number", "customer", "total", "placed"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.number, &self.customer, &self.email]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "status" => Some(self.status.as_str()),
            "payment" => Some(self.payment_status.as_str()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "number" => Some(SortKey::text(&self.number)),
            "customer" => Some(SortKey::text(&self.customer)),
            "total" => Some(SortKey::Int(self.total.cents())),
            "placed" => Some(SortKey::Date(self.placed_on)),
            _ => None,
        }
    }
}

/// Money actually collected: paid orders that weren't cancelled.
pub fn revenue(orders: &[Order]) -> Money {
    orders
        .iter()
        .filter(|order| {
            order.payment_status == PaymentStatus::Paid && order.status != OrderStatus::Cancelled
        })
        .map(|order| order.total)
        .sum()
}

pub fn average_order_value(orders: &[Order]) -> Money {
    if orders.is_empty() {
        return Money::ZERO;
    }
    let total: Money = orders.iter().map(|order| order.total).sum();
    Money::from_cents(total.cents() / orders.len() as i64)
}

#[derive(Debug, Clone, Copy)]
pub struct OrderPage;

impl Page for OrderPage {
    const NAME: &'static str = "orders";
    const TITLE: &'static str = "Orders";

    type Record = Order;

    fn seed() -> Vec<Order> {
        seed()
    }

    fn columns() -> Vec<Column<Order>> {
        vec![
            Column::new("Order", |o: &Order| o.number.clone()),
            Column::new("Customer", |o: &Order| o.customer.clone()),
            Column::new("Items", |o: &Order| o.items.to_string()),
            Column::new("Total", |o: &Order| o.total.to_string()),
            Column::new("Status", |o: &Order| badge(o.status)),
            Column::new("Payment", |o: &Order| badge(o.payment_status)),
            Column::new("Placed", |o: &Order| o.placed_on.to_string()),
        ]
    }

    fn summary(records: &[Order]) -> Vec<(&'static str, String)> {
        vec![
            ("Orders", records.len().to_string()),
            ("Revenue", revenue(records).to_string()),
            ("Average", average_order_value(records).to_string()),
        ]
    }
}

fn order(
    id: u32,
    customer: &str,
    email: &str,
    items: u32,
    cents: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    placed_on: Date,
) -> Order {
    Order {
        id,
        number: format!("#ORD-{}", 1000 + id),
        customer: customer.to_string(),
        email: email.to_string(),
        items,
        total: Money::from_cents(cents),
        status,
        payment_status,
        placed_on,
    }
}

pub fn seed() -> Vec<Order> {
    use OrderStatus as S;
    use PaymentStatus as P;
    vec![
        order(
            1,
            "John Smith",
            "john.smith@mail.com",
            3,
            25_997,
            S::Delivered,
            P::Paid,
            date!(2024-03-01),
        ),
        order(
            2,
            "Emma Wilson",
            "emma.w@mail.com",
            1,
            8_999,
            S::Shipped,
            P::Paid,
            date!(2024-03-03),
        ),
        order(
            3,
            "Liam Garcia",
            "liam.g@mail.com",
            2,
            15_498,
            S::Processing,
            P::Paid,
            date!(2024-03-05),
        ),
        order(
            4,
            "Olivia Martinez",
            "olivia.m@mail.com",
            5,
            42_350,
            S::Pending,
            P::Pending,
            date!(2024-03-06),
        ),
        order(
            5,
            "Noah Anderson",
            "noah.a@mail.com",
            1,
            1_299,
            S::Cancelled,
            P::Refunded,
            date!(2024-03-07),
        ),
        order(
            6,
            "Ava Thompson",
            "ava.t@mail.com",
            4,
            31_296,
            S::Delivered,
            P::Paid,
            date!(2024-03-08),
        ),
        order(
            7,
            "William Lee",
            "will.lee@mail.com",
            2,
            19_998,
            S::Pending,
            P::Failed,
            date!(2024-03-09),
        ),
        order(
            8,
            "Sophia Harris",
            "sophia.h@mail.com",
            6,
            58_794,
            S::Shipped,
            P::Paid,
            date!(2024-03-11),
        ),
        order(
            9,
            "James Clark",
            "j.clark@mail.com",
            1,
            4_999,
            S::Processing,
            P::Pending,
            date!(2024-03-12),
        ),
        order(
            10,
            "Isabella Lewis",
            "bella.l@mail.com",
            3,
            22_497,
            S::Delivered,
            P::Paid,
            date!(2024-03-13),
        ),
        order(
            11,
            "Benjamin Walker",
            "ben.w@mail.com",
            2,
            12_000,
            S::Cancelled,
            P::Paid,
            date!(2024-03-14),
        ),
    ]
}
