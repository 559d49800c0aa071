use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use time::{Date, Month, OffsetDateTime, macros::format_description};

use dashkit::{
    DashboardConfig,
    core::{
        CategoryFilter, FilterState, MonthCursor, PageAction, PageState, Record, SortSpec,
        ViewMode,
        events_on,
    },
    data::{
        InMemoryRepository, Page, PageKind, chat, email::EmailPage, event, file::FilePage,
        invoice::InvoicePage, load_page, order::OrderPage, product::ProductPage,
        ticket::TicketPage,
    },
    export::{self, ExportedView},
    logging::{self, Verbosity},
    render,
};

#[derive(Parser)]
#[command(name = "dashkit")]
#[command(about = "Browse the admin dashboard's sample pages from the terminal")]
struct Cli {
    /// JSON config file (base_path, output_dir, items_per_page, today)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pages with their filters, flags and sort keys
    Pages,
    /// Render a page's filtered view
    List(ViewArgs),
    /// Write a page's filtered view to the output directory as JSON
    Export(ViewArgs),
    /// Show a month grid with its events
    Calendar {
        /// Month to show, defaults to the month containing today
        #[arg(long, value_name = "YYYY-MM", value_parser = parse_month)]
        month: Option<MonthCursor>,

        /// Override today's date
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        today: Option<Date>,
    },
    /// Show a conversation, optionally sending a message first
    Chat {
        /// Contact id, as listed by `dashkit list chat`
        contact: u32,

        #[arg(long, value_name = "TEXT")]
        send: Option<String>,
    },
    /// Open the desktop dashboard
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Args)]
struct ViewArgs {
    #[arg(value_enum)]
    page: PageKind,

    /// Case-insensitive search term
    #[arg(short, long, default_value = "")]
    search: String,

    /// Categorical filter, e.g. `status=paid`; `all` disables it
    #[arg(short, long = "filter", value_name = "FACET=VALUE", value_parser = parse_facet)]
    filters: Vec<(String, String)>,

    /// Only show records with this flag set, e.g. `starred`
    #[arg(long = "flag", value_name = "FLAG")]
    flags: Vec<String>,

    /// Sort key with optional direction, e.g. `amount:desc`
    #[arg(long, value_name = "KEY[:asc|desc]")]
    sort: Option<SortSpec>,

    /// 1-based page number; out of range values are clamped
    #[arg(short, long = "page", default_value_t = 1)]
    page_number: usize,

    /// Rows per page, 0 to disable pagination
    #[arg(long)]
    per_page: Option<usize>,

    /// Apply a record action before rendering, e.g. `mark-paid=3`
    #[arg(long, value_name = "ACTION=ID", value_parser = parse_apply)]
    apply: Vec<(String, u32)>,

    /// Render cards instead of a table
    #[arg(long)]
    grid: bool,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Load records from a JSON array instead of the built-in sample data
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
}

fn parse_facet(s: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected FACET=VALUE, got {:?}", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_apply(s: &str) -> anyhow::Result<(String, u32)> {
    let (action, id) = parse_facet(s)?;
    let id = id
        .parse()
        .map_err(|_| anyhow::anyhow!("Expected a numeric record id, got {:?}", id))?;
    Ok((action, id))
}

fn parse_month(s: &str) -> anyhow::Result<MonthCursor> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("Expected YYYY-MM, got {:?}", s))?;
    let month = Month::try_from(month.parse::<u8>()?)?;
    MonthCursor::new(year.parse()?, month)
}

fn parse_date(s: &str) -> anyhow::Result<Date> {
    Ok(Date::parse(s, format_description!("[year]-[month]-[day]"))?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    let config = DashboardConfig::load_or_default(cli.config.as_deref())?;

    #[cfg(feature = "gui")]
    if let Command::Gui = cli.command {
        return dashkit::gui::run(config);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli.command, config))
}

async fn run(command: Command, config: DashboardConfig) -> anyhow::Result<()> {
    match command {
        Command::Pages => {
            for kind in PageKind::ALL {
                println!("{}", describe_kind(*kind));
            }
            Ok(())
        }
        Command::List(args) => view_kind(&args, &config, false).await,
        Command::Export(args) => view_kind(&args, &config, true).await,
        Command::Calendar { month, today } => {
            show_calendar(month, today.unwrap_or_else(|| config.today()));
            Ok(())
        }
        Command::Chat { contact, send } => show_chat(contact, send),
        #[cfg(feature = "gui")]
        Command::Gui => Ok(()),
    }
}

fn describe_kind(kind: PageKind) -> String {
    match kind {
        PageKind::Chat => describe::<chat::ChatPage>(),
        PageKind::Email => describe::<EmailPage>(),
        PageKind::Invoices => describe::<InvoicePage>(),
        PageKind::Orders => describe::<OrderPage>(),
        PageKind::Products => describe::<ProductPage>(),
        PageKind::Tickets => describe::<TicketPage>(),
        PageKind::Files => describe::<FilePage>(),
        PageKind::Calendar => describe::<event::CalendarPage>(),
    }
}

fn describe<P: Page>() -> String {
    let mut lines = vec![format!("{} ({})", P::NAME, P::TITLE)];
    for facet in <P::Record as Record>::FACETS {
        lines.push(format!("  --filter {}=<{}>", facet.name, facet.values.join("|")));
    }
    for flag in <P::Record as Record>::FLAGS {
        lines.push(format!("  --flag {flag}"));
    }
    let sort_keys = <P::Record as Record>::SORT_KEYS;
    if !sort_keys.is_empty() {
        lines.push(format!("  --sort <{}>[:asc|desc]", sort_keys.join("|")));
    }
    let actions: Vec<&str> = P::actions().iter().map(|action| action.name).collect();
    if !actions.is_empty() {
        lines.push(format!("  --apply <{}>=<id>", actions.join("|")));
    }
    lines.join("\n")
}

async fn view_kind(args: &ViewArgs, config: &DashboardConfig, export: bool) -> anyhow::Result<()> {
    match args.page {
        PageKind::Chat => view_page::<chat::ChatPage>(args, config, export).await,
        PageKind::Email => view_page::<EmailPage>(args, config, export).await,
        PageKind::Invoices => view_page::<InvoicePage>(args, config, export).await,
        PageKind::Orders => view_page::<OrderPage>(args, config, export).await,
        PageKind::Products => view_page::<ProductPage>(args, config, export).await,
        PageKind::Tickets => view_page::<TicketPage>(args, config, export).await,
        PageKind::Files => view_page::<FilePage>(args, config, export).await,
        PageKind::Calendar => view_page::<event::CalendarPage>(args, config, export).await,
    }
}

fn build_filter<R: Record>(args: &ViewArgs) -> anyhow::Result<FilterState> {
    let mut filter = FilterState::new().with_search(args.search.as_str());
    for (name, value) in &args.filters {
        let Some(spec) = R::FACETS.iter().find(|spec| spec.name == name.as_str()) else {
            let known: Vec<&str> = R::FACETS.iter().map(|spec| spec.name).collect();
            anyhow::bail!("Unknown filter {:?}; expected one of: {}", name, known.join(", "));
        };
        let category = CategoryFilter::parse(value);
        if let Some(value) = category.value() {
            if !spec.accepts(value) {
                tracing::warn!(
                    "Ignoring {}={}; expected one of: {}",
                    name,
                    value,
                    spec.values.join(", ")
                );
            }
        }
        filter.set_facet(name.as_str(), category);
    }
    for flag in &args.flags {
        if !R::FLAGS.contains(&flag.as_str()) {
            anyhow::bail!("Unknown flag {:?}; expected one of: {}", flag, R::FLAGS.join(", "));
        }
        filter.toggle_flag(flag.as_str());
    }
    Ok(filter)
}

fn apply_actions<P: Page>(
    state: PageState<P::Record>,
    args: &ViewArgs,
) -> anyhow::Result<PageState<P::Record>>
where
    P::Record: Record<Id = u32>,
{
    let mut state = state;
    for (name, id) in &args.apply {
        let Some(action) = P::action(name) else {
            let known: Vec<&str> = P::actions().iter().map(|action| action.name).collect();
            anyhow::bail!(
                "Unknown action {:?} for {}; expected one of: {}",
                name,
                P::NAME,
                known.join(", ")
            );
        };
        if !state.records().iter().any(|record| record.id() == *id) {
            anyhow::bail!("No {} record with id {}", P::NAME, id);
        }
        state = state.reduce(PageAction::Edit(*id, action.edit));
    }
    Ok(state)
}

async fn view_page<P: Page>(
    args: &ViewArgs,
    config: &DashboardConfig,
    export: bool,
) -> anyhow::Result<()>
where
    P::Record: Record<Id = u32>,
{
    let repo = match &args.seed {
        Some(path) => InMemoryRepository::<P::Record>::from_json_file(path)?,
        None => InMemoryRepository::seeded::<P>(),
    };

    let filter = build_filter::<P::Record>(args)?;
    if let Some(sort) = &args.sort {
        if !sort.is_supported_by::<P::Record>() {
            anyhow::bail!(
                "Unknown sort key {:?} for {}; expected one of: {}",
                sort.key,
                P::NAME,
                <P::Record as Record>::SORT_KEYS.join(", ")
            );
        }
    }

    let mode = if args.grid { ViewMode::Grid } else { ViewMode::List };
    let state = apply_actions::<P>(load_page(&repo).await?, args)?
        .with_filter(filter)
        .with_sort(args.sort.clone())
        .with_per_page(args.per_page.unwrap_or(config.items_per_page))
        .reduce(PageAction::GoToPage(args.page_number))
        .reduce(PageAction::SetViewMode(mode));

    if export {
        let path = export::write_view::<P>(config, &state)?;
        println!("Wrote {}", path.display());
    } else if args.json {
        let view = state.derive();
        let exported = ExportedView::new(P::NAME, state.records().len(), &view);
        println!("{}", serde_json::to_string_pretty(&exported)?);
    } else {
        print!("{}", render::page::<P>(&state));
    }
    Ok(())
}

fn show_calendar(month: Option<MonthCursor>, today: Date) {
    let cursor = month.unwrap_or_else(|| MonthCursor::containing(today));
    let events = event::seed();
    let grid = event::month_grid(cursor, today, &events);

    print!("{}", render::calendar_month(&grid));
    println!();
    for cell in grid.cells().iter().filter(|cell| cell.in_month && cell.has_events()) {
        for item in events_on(&events, cell.date) {
            println!("{}  {:<11}  {}", cell.date, item.time_range(), item.title);
        }
    }

    let upcoming = event::upcoming(&events, today, 3);
    if !upcoming.is_empty() {
        println!("\nUpcoming:");
        for item in upcoming {
            println!("  {}  {}", item.date, item.title);
        }
    }
}

fn show_chat(contact_id: u32, send: Option<String>) -> anyhow::Result<()> {
    let mut state = chat::ChatState::new(chat::seed()).reduce(chat::ChatAction::Open(contact_id));
    if state.conversation().is_none() {
        anyhow::bail!("No contact with id {}", contact_id);
    }
    if let Some(text) = send {
        let at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        state = state
            .reduce(chat::ChatAction::EditDraft(text))
            .reduce(chat::ChatAction::Send { at });
    }
    if let Some(contact) = state.conversation() {
        println!("{}", chat::transcript(contact));
    }
    Ok(())
}
