#![forbid(unsafe_code)]

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;

use happyhome_catalog::{Catalog, CategoryFilter, Product, supplies};
use happyhome_core::ProductId;
use happyhome_events::InMemoryEventBus;
use happyhome_infra::{FileKeyValueStore, MailtoSubmitter, QuoteEnvelope, QuoteStore, StoreConfig};
use happyhome_quote::{ContactMethod, QuoteRequest, SubmitError};
use happyhome_view::QuoteViewModel;

use crate::commands::{Commands, QuoteCommand};

#[derive(Debug, Parser)]
#[command(name = "happyhome")]
#[command(about = "Happy Home Care medical supplies quote builder")]
#[command(
    after_help = "Environment:\n  HAPPYHOME_DATA_DIR          Quote storage directory\n  HAPPYHOME_QUOTE_KEY         Storage key of the saved quote\n  HAPPYHOME_QUOTE_RECIPIENT   Mailbox receiving quote requests\n  HAPPYHOME_LOG_FORMAT        json (default) or pretty\n  RUST_LOG                    Log filter"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Overrides HAPPYHOME_DATA_DIR.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Viewport width used to lay out the quote view.
    #[arg(long, global = true, default_value_t = 1280)]
    width: u32,
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    happyhome_observability::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        json,
        data_dir,
        width,
        command,
    } = cli;
    let catalog = supplies();

    match command {
        Commands::Catalog {
            category,
            popular,
            search,
        } => {
            let products = select_products(catalog, &category, popular, search.as_deref());
            output::products(&products, json)
        }
        Commands::Categories => output::categories(&catalog.categories(), json),
        Commands::Quote { command } => run_quote(catalog, command, data_dir, width, json),
    }
}

fn select_products<'a>(
    catalog: &'a Catalog,
    category: &str,
    popular: bool,
    search: Option<&str>,
) -> Vec<&'a Product> {
    let filter = CategoryFilter::parse(category);
    let mut products = match search {
        Some(query) => catalog.search(query),
        None => catalog.filter(&filter),
    };
    if let CategoryFilter::Slug(slug) = &filter {
        products.retain(|p| p.category_slug() == slug);
    }
    if popular {
        products.retain(|p| p.is_popular());
    }
    products
}

fn run_quote(
    catalog: &Catalog,
    command: QuoteCommand,
    data_dir: Option<PathBuf>,
    width: u32,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = StoreConfig::from_env().context("failed to load configuration")?;
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    let storage = FileKeyValueStore::open(&config.data_dir)
        .with_context(|| format!("failed to open quote storage at {:?}", config.data_dir))?;
    let store = QuoteStore::new(storage, InMemoryEventBus::<QuoteEnvelope>::new())
        .with_storage_key(config.storage_key.clone());
    let outcome = store.hydrate();
    tracing::debug!(?outcome, key = %config.storage_key, "quote loaded");

    let vm = QuoteViewModel::with_width(Arc::new(store), width);

    match command {
        QuoteCommand::Show => {}
        QuoteCommand::Add { id } => {
            let id = parse_id(&id)?;
            let product = catalog
                .require(&id)
                .with_context(|| format!("unknown product {id}"))?;
            vm.add(product.clone());
        }
        QuoteCommand::Remove { id } => {
            vm.remove(&parse_id(&id)?);
        }
        QuoteCommand::Set { id, quantity } => {
            vm.store().set_quantity(&parse_id(&id)?, quantity);
        }
        QuoteCommand::Inc { id } => {
            vm.increment(&parse_id(&id)?);
        }
        QuoteCommand::Dec { id } => {
            vm.decrement(&parse_id(&id)?);
        }
        QuoteCommand::Clear => {
            vm.clear();
        }
        QuoteCommand::Request {
            name,
            email,
            phone,
            contact_method,
            notes,
        } => {
            let contact_method: ContactMethod = contact_method
                .parse()
                .context("invalid --contact-method")?;
            let request = QuoteRequest {
                name,
                email,
                phone,
                contact_method,
                notes,
            };
            let submitter = MailtoSubmitter::new(request, config.recipient.clone());

            return match vm.get_quote(&submitter) {
                Ok(receipt) => output::receipt(&receipt, json),
                Err(SubmitError::InvalidRequest(errors)) => {
                    output::field_errors(&errors, json)?;
                    bail!("quote request is invalid")
                }
                Err(err) => Err(err.into()),
            };
        }
    }

    output::quote(&vm.view(), json)
}

fn parse_id(raw: &str) -> anyhow::Result<ProductId> {
    raw.parse::<ProductId>()
        .with_context(|| format!("invalid product id {raw:?}"))
}
