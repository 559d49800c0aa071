use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Money, Page, RecordAction},
    render::{Column, badge},
};

facet_enum! {
    pub enum InvoiceStatus {
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub number: String,
    pub client: String,
    pub client_email: String,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub issued_on: Date,
    pub due_on: Date,
}

impl Record for Invoice {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[FacetSpec::new("status", InvoiceStatus::VALUES)];
    const SORT_KEYS: &'static [&'static str] = &["number", "client", "amount", "due"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.number, &self.client, &self.client_email]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "number" => Some(SortKey::text(&self.number)),
            "client" => Some(SortKey::text(&self.client)),
            "amount" => Some(SortKey::Int(self.amount.cents())),
            "due" => Some(SortKey::Date(self.due_on)),
            _ => None,
        }
    }
}

pub fn totals_by_status(invoices: &[Invoice]) -> BTreeMap<InvoiceStatus, Money> {
    let mut totals = BTreeMap::new();
    for invoice in invoices {
        let total = totals.entry(invoice.status).or_insert(Money::ZERO);
        *total = *total + invoice.amount;
    }
    totals
}

pub fn mark_paid(invoice: &Invoice) -> Invoice {
    Invoice {
        status: InvoiceStatus::Paid,
        ..invoice.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InvoicePage;

impl Page for InvoicePage {
    const NAME: &'static str = "invoices";
    const TITLE: &'static str = "Invoices";

    type Record = Invoice;

    fn seed() -> Vec<Invoice> {
        seed()
    }

    fn columns() -> Vec<Column<Invoice>> {
        vec![
            Column::new("Invoice", |i: &Invoice| i.number.clone()),
            Column::new("Client", |i: &Invoice| i.client.clone()),
            Column::new("Amount", |i: &Invoice| i.amount.to_string()),
            Column::new("Status", |i: &Invoice| badge(i.status)),
            Column::new("Issued", |i: &Invoice| i.issued_on.to_string()),
            Column::new("Due", |i: &Invoice| i.due_on.to_string()),
        ]
    }

    fn actions() -> Vec<RecordAction<Invoice>> {
        vec![RecordAction::new("mark-paid", "Mark paid", mark_paid)]
    }

    fn summary(records: &[Invoice]) -> Vec<(&'static str, String)> {
        let totals = totals_by_status(records);
        let total = |status: InvoiceStatus| {
            totals
                .get(&status)
                .copied()
                .unwrap_or(Money::ZERO)
                .to_string()
        };
        vec![
            ("Total", records.iter().map(|i| i.amount).sum::<Money>().to_string()),
            ("Paid", total(InvoiceStatus::Paid)),
            ("Outstanding", total(InvoiceStatus::Sent)),
            ("Overdue", total(InvoiceStatus::Overdue)),
        ]
    }
}

fn invoice(
    id: u32,
    client: &str,
    client_email: &str,
    cents: i64,
    status: InvoiceStatus,
    issued_on: Date,
    due_on: Date,
) -> Invoice {
    Invoice {
        id,
        number: format!("INV-2024-{id:03}"),
        client: client.to_string(),
        client_email: client_email.to_string(),
        amount: Money::from_cents(cents),
        status,
        issued_on,
        due_on,
    }
}

pub fn seed() -> Vec<Invoice> {
    use InvoiceStatus::*;
    vec![
        invoice(
            1,
            "Acme Corporation",
            "billing@acme.io",
            450_000,
            Paid,
            date!(2024-01-05),
            date!(2024-02-04),
        ),
        invoice(
            2,
            "Globex Inc.",
            "ap@globex.com",
            128_050,
            Sent,
            date!(2024-02-12),
            date!(2024-03-13),
        ),
        invoice(
            3,
            "Northwind Traders",
            "finance@northwind.com",
            89_900,
            Overdue,
            date!(2024-01-20),
            date!(2024-02-19),
        ),
        invoice(
            4,
            "Initech",
            "accounts@initech.com",
            310_000,
            Draft,
            date!(2024-03-01),
            date!(2024-03-31),
        ),
        invoice(
            5,
            "Umbrella Health",
            "payables@umbrella.health",
            742_500,
            Paid,
            date!(2024-02-01),
            date!(2024-03-02),
        ),
        invoice(
            6,
            "Stark Industries",
            "ap@stark.com",
            1_250_000,
            Sent,
            date!(2024-03-04),
            date!(2024-04-03),
        ),
        invoice(
            7,
            "Wayne Enterprises",
            "billing@wayne.com",
            56_000,
            Cancelled,
            date!(2024-01-15),
            date!(2024-02-14),
        ),
        invoice(
            8,
            "Hooli",
            "invoices@hooli.xyz",
            215_075,
            Overdue,
            date!(2024-01-28),
            date!(2024-02-27),
        ),
        invoice(
            9,
            "Soylent Co.",
            "finance@soylent.co",
            99_999,
            Paid,
            date!(2024-02-20),
            date!(2024-03-21),
        ),
        invoice(
            10,
            "Acme Corporation",
            "billing@acme.io",
            380_000,
            Sent,
            date!(2024-03-10),
            date!(2024-04-09),
        ),
        invoice(
            11,
            "Cyberdyne Systems",
            "ap@cyberdyne.ai",
            640_000,
            Draft,
            date!(2024-03-12),
            date!(2024-04-11),
        ),
        invoice(
            12,
            "Globex Inc.",
            "ap@globex.com",
            47_500,
            Paid,
            date!(2024-03-14),
            date!(2024-04-13),
        ),
    ]
}
