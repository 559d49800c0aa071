//! Integration tests for the built-in dashboard pages and their fixtures.

use std::collections::BTreeSet;

use dashkit::{
    core::{FilterState, PageAction, PageState, Record, SelectionAction},
    data::{
        Money, Page, PageKind,
        chat::{self, ChatAction, ChatPage, ChatState, Sender},
        email::{self, ComposeDraft, EmailPage, Folder},
        event::CalendarPage,
        file::{self, FilePage},
        invoice::{self, InvoicePage, InvoiceStatus},
        order::{self, OrderPage},
        product::{self, ProductPage},
        ticket::{self, Priority, TicketPage},
    },
};
use time::macros::datetime;

fn assert_unique_ids<P: Page>() {
    let records = P::seed();
    let unique: BTreeSet<_> = records.iter().map(|record| record.id()).collect();
    assert_eq!(unique.len(), records.len(), "{} seed has duplicate ids", P::NAME);
}

fn assert_facets_cover_seed<P: Page>() {
    for record in P::seed() {
        for spec in <P::Record as Record>::FACETS {
            let value = record
                .facet(spec.name)
                .unwrap_or_else(|| panic!("{} record missing facet {}", P::NAME, spec.name));
            assert!(spec.accepts(value), "{}: {}={} not declared", P::NAME, spec.name, value);
        }
        for flag in <P::Record as Record>::FLAGS {
            assert!(record.flag(flag).is_some(), "{} record missing flag {}", P::NAME, flag);
        }
        for key in <P::Record as Record>::SORT_KEYS {
            assert!(record.sort_key(key).is_some(), "{} record missing sort key {}", P::NAME, key);
        }
    }
}

#[test]
fn test_every_page_has_consistent_fixtures() -> anyhow::Result<()> {
    assert_unique_ids::<ChatPage>();
    assert_unique_ids::<EmailPage>();
    assert_unique_ids::<InvoicePage>();
    assert_unique_ids::<OrderPage>();
    assert_unique_ids::<ProductPage>();
    assert_unique_ids::<TicketPage>();
    assert_unique_ids::<FilePage>();
    assert_unique_ids::<CalendarPage>();

    assert_facets_cover_seed::<ChatPage>();
    assert_facets_cover_seed::<EmailPage>();
    assert_facets_cover_seed::<InvoicePage>();
    assert_facets_cover_seed::<OrderPage>();
    assert_facets_cover_seed::<ProductPage>();
    assert_facets_cover_seed::<TicketPage>();
    assert_facets_cover_seed::<FilePage>();
    assert_facets_cover_seed::<CalendarPage>();

    let names: BTreeSet<&str> = PageKind::ALL.iter().map(|kind| kind.name()).collect();
    assert_eq!(names.len(), PageKind::ALL.len());
    Ok(())
}

#[test]
fn test_invoice_totals() -> anyhow::Result<()> {
    let invoices = invoice::seed();
    let totals = invoice::totals_by_status(&invoices);
    assert_eq!(totals[&InvoiceStatus::Paid], Money::from_cents(1_339_999));
    assert_eq!(totals[&InvoiceStatus::Overdue].to_string(), "$3,049.75");

    let summary = InvoicePage::summary(&invoices);
    assert_eq!(summary[0], ("Total", "$44,090.24".to_string()));
    assert_eq!(summary[1], ("Paid", "$13,399.99".to_string()));
    assert_eq!(summary[2], ("Outstanding", "$17,580.50".to_string()));

    let paid = FilterState::new().with_facet("status", "paid").apply(&invoices);
    assert_eq!(paid.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 5, 9, 12]);
    Ok(())
}

#[test]
fn test_ticket_queue() -> anyhow::Result<()> {
    let tickets = ticket::seed();
    let active = ticket::active_by_priority(&tickets);
    assert_eq!(active[&Priority::Urgent], 2);
    assert_eq!(active[&Priority::High], 1);
    assert_eq!(active[&Priority::Medium], 3);
    assert_eq!(active[&Priority::Low], 1);

    let unassigned = FilterState::new().with_flag("unassigned").apply(&tickets);
    assert_eq!(unassigned.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3, 9]);

    // Tags are searchable
    let billing = FilterState::new().with_search("billing").apply(&tickets);
    assert_eq!(billing.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 5]);
    Ok(())
}

#[test]
fn test_email_actions() -> anyhow::Result<()> {
    let state = PageState::new(email::seed());
    assert_eq!(email::unread_count(state.records()), 6);

    let state = state
        .reduce(PageAction::Edit(1, email::mark_read))
        .reduce(PageAction::Edit(2, email::move_to_trash));
    assert_eq!(email::unread_count(state.records()), 4);

    let trash = state.reduce(PageAction::SetFacet(
        "folder".to_string(),
        dashkit::core::CategoryFilter::parse("trash"),
    ));
    let rows = trash.derive();
    assert_eq!(rows.state.rows().iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 11]);

    let starred = state.reduce(PageAction::Edit(5, email::toggle_starred));
    assert!(!starred.records()[4].is_starred);
    Ok(())
}

#[test]
fn test_compose_validation() -> anyhow::Result<()> {
    let existing = email::seed();
    let at = datetime!(2024-03-16 10:00 UTC);

    let draft = ComposeDraft {
        to: "team@acme.io".to_string(),
        subject: "Standup notes".to_string(),
        body: "See attached.".to_string(),
    };
    let sent = draft.send(&existing, at)?;
    assert_eq!(sent.id, 13);
    assert_eq!(sent.folder, Folder::Sent);
    assert!(sent.is_read);

    let bad_recipient = ComposeDraft {
        to: "team".to_string(),
        ..draft.clone()
    };
    assert!(bad_recipient.send(&existing, at).is_err());

    let empty = ComposeDraft {
        to: "team@acme.io".to_string(),
        ..ComposeDraft::default()
    };
    assert!(empty.send(&existing, at).is_err());
    Ok(())
}

#[test]
fn test_chat_open_and_send() -> anyhow::Result<()> {
    let at = datetime!(2024-03-15 10:00 UTC);
    let state = ChatState::new(chat::seed());
    assert_eq!(chat::total_unread(state.page().records()), 6);

    // Opening a conversation clears its unread badge
    let state = state.reduce(ChatAction::Open(1));
    let sarah = state
        .conversation()
        .ok_or_else(|| anyhow::anyhow!("conversation not open"))?;
    assert_eq!(sarah.unread_count, 0);
    assert_eq!(chat::total_unread(state.page().records()), 4);

    // Blank drafts are not sent
    let state = state
        .reduce(ChatAction::EditDraft("   ".to_string()))
        .reduce(ChatAction::Send { at });
    assert_eq!(state.conversation().map(|c| c.messages.len()), Some(4));

    let state = state
        .reduce(ChatAction::EditDraft("On my way".to_string()))
        .reduce(ChatAction::Send { at });
    let sarah = state
        .conversation()
        .ok_or_else(|| anyhow::anyhow!("conversation not open"))?;
    assert_eq!(sarah.messages.len(), 5);
    assert_eq!(sarah.last_message, "On my way");
    assert_eq!(sarah.last_active, at);
    assert!(matches!(
        sarah.messages.last().map(|m| m.sender),
        Some(Sender::Me)
    ));
    assert!(state.draft().is_empty());

    // Unknown contacts can't be messaged
    assert!(chat::send_message(state.page().records(), 99, "hello", at).is_none());
    Ok(())
}

#[test]
fn test_chat_filters() -> anyhow::Result<()> {
    let state = ChatState::new(chat::seed()).reduce(ChatAction::Page(PageAction::SetFacet(
        "status".to_string(),
        dashkit::core::CategoryFilter::parse("online"),
    )));
    let online: Vec<u32> = state.page().derive().state.rows().iter().map(|c| c.id).collect();
    assert_eq!(online, vec![1, 3]);

    let state = state.reduce(ChatAction::Page(PageAction::Selection(
        SelectionAction::Select(3),
    )));
    assert_eq!(state.conversation().map(|c| c.name.as_str()), Some("Emily Davis"));
    Ok(())
}

#[test]
fn test_product_and_file_helpers() -> anyhow::Result<()> {
    let products = product::seed();
    let low: Vec<u32> = FilterState::new()
        .with_flag("low_stock")
        .apply(&products)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(low, vec![2, 3, 6, 8, 11]);

    assert_eq!(file::format_size(512), "512 B");
    assert_eq!(file::format_size(1536), "1.5 KB");
    assert_eq!(file::format_size(5 * 1024 * 1024), "5.0 MB");

    let files = file::seed();
    let starred: Vec<u32> = FilterState::new()
        .with_flag("starred")
        .apply(&files)
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(starred, vec![3, 5, 10]);
    Ok(())
}

#[test]
fn test_order_and_product_aggregates() -> anyhow::Result<()> {
    let orders = order::seed();
    // Cancelled-but-paid and unpaid orders are not revenue
    assert_eq!(order::revenue(&orders), Money::from_cents(163_081));
    assert_eq!(order::average_order_value(&orders), Money::from_cents(22_157));
    assert_eq!(order::average_order_value(&[]), Money::ZERO);

    let summary = OrderPage::summary(&orders);
    assert_eq!(summary[0], ("Orders", "11".to_string()));
    assert_eq!(summary[1], ("Revenue", "$1,630.81".to_string()));
    assert_eq!(summary[2], ("Average", "$221.57".to_string()));

    let products = product::seed();
    assert_eq!(products[0].inventory_value(), Money::from_cents(899_955));
    assert_eq!(products[2].inventory_value(), Money::ZERO);
    let summary = ProductPage::summary(&products);
    assert_eq!(summary[1], ("Low stock", "5".to_string()));
    assert_eq!(summary[2], ("Inventory value", "$22,341.91".to_string()));
    Ok(())
}

#[test]
fn test_file_sizes() -> anyhow::Result<()> {
    let files = file::seed();
    assert_eq!(file::storage_used(&files), 953_258_189);
    assert_eq!(
        FilePage::summary(&files)[1],
        ("Storage used", "909.1 MB".to_string())
    );

    assert_eq!(file::format_size(0), "0 B");
    assert_eq!(file::format_size(1023), "1023 B");
    assert_eq!(file::format_size(1024), "1.0 KB");
    assert_eq!(file::format_size(1024 * 1024 * 1024), "1.0 GB");
    // TB is the largest unit
    assert_eq!(file::format_size(2 * 1024u64.pow(5)), "2048.0 TB");
    Ok(())
}

fn apply<P: Page>(state: PageState<P::Record>, name: &str, id: u32) -> PageState<P::Record>
where
    P::Record: Record<Id = u32>,
{
    let action = P::action(name).unwrap_or_else(|| panic!("{} has no {name} action", P::NAME));
    state.reduce(PageAction::Edit(id, action.edit))
}

#[test]
fn test_record_actions() -> anyhow::Result<()> {
    let invoices = apply::<InvoicePage>(PageState::new(invoice::seed()), "mark-paid", 2);
    let totals = invoice::totals_by_status(invoices.records());
    assert_eq!(totals[&InvoiceStatus::Paid], Money::from_cents(1_468_049));
    assert_eq!(invoices.records()[1].status, InvoiceStatus::Paid);

    let tickets = apply::<TicketPage>(PageState::new(ticket::seed()), "resolve", 1);
    assert_eq!(ticket::active_by_priority(tickets.records())[&Priority::Urgent], 1);

    let files = apply::<FilePage>(PageState::new(file::seed()), "share", 2);
    let files = apply::<FilePage>(files, "star", 3);
    let shared: Vec<u32> = FilterState::new()
        .with_flag("shared")
        .apply(files.records())
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(shared, vec![1, 2, 5, 7]);
    assert!(!files.records()[2].starred);

    let emails = apply::<EmailPage>(PageState::new(email::seed()), "mark-read", 1);
    assert_eq!(email::unread_count(emails.records()), 5);

    assert!(OrderPage::actions().is_empty());
    assert!(InvoicePage::action("refund").is_none());
    Ok(())
}

#[test]
fn test_compose_fails_when_ids_are_exhausted() -> anyhow::Result<()> {
    let mut existing = email::seed();
    existing[0].id = u32::MAX;
    let draft = ComposeDraft {
        to: "team@acme.io".to_string(),
        subject: "Hello".to_string(),
        body: String::new(),
    };
    assert!(draft.send(&existing, datetime!(2024-03-16 10:00 UTC)).is_err());
    Ok(())
}
