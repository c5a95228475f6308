//! Stopunaise CLI - Storefront from the terminal
//!
//! Browse the catalog, price a selection and place an order against the
//! storefront API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::{QuoteRequest, StorefrontClient};
use config::Config;
use stopunaise::{
    format_amount, CheckoutEvent, CheckoutState, OrderTotals, ZoneClass, ORDER_INCOMPLETE_HINT,
};

#[derive(Parser)]
#[command(name = "stopunaise")]
#[command(about = "Stopunaise CLI - Order Sniper DDVP", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, municipalities and the accessory
    Catalog,

    /// Price a selection without ordering
    Quote {
        /// Product and quantity as ID=QTY (repeatable)
        #[arg(short, long = "item", value_parser = parse_item)]
        items: Vec<(String, u32)>,
        /// Number of dosing kits
        #[arg(short, long, default_value = "0")]
        accessory: u32,
        /// Delivery municipality
        #[arg(short, long)]
        municipality: Option<String>,
    },

    /// Place an order interactively
    Order,

    /// Show current configuration
    Config,

    /// Store the API base URL
    SetUrl {
        /// Base URL of the storefront API
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Catalog => cmd_catalog().await,
        Commands::Quote {
            items,
            accessory,
            municipality,
        } => cmd_quote(items, accessory, municipality).await,
        Commands::Order => cmd_order().await,
        Commands::Config => cmd_config(),
        Commands::SetUrl { url } => cmd_set_url(url).await,
    }
}

// ============================================
// Command Implementations
// ============================================

fn client() -> Result<StorefrontClient> {
    let config = Config::load()?;
    StorefrontClient::new(&config.api_url())
}

async fn cmd_catalog() -> Result<()> {
    let catalog = client()?.catalog().await?;

    println!("{}", "Products:".bold());
    for product in &catalog.products {
        println!(
            "  {} {} {}",
            product.id.dimmed(),
            product.name.cyan().bold(),
            format!("{} CFA", format_amount(product.price)).green()
        );
    }

    println!("\n{}", "Delivery:".bold());
    for group in &catalog.zone_groups {
        println!("  {}", group.label.yellow());
        for zone in &group.zones {
            println!("    {} ({} CFA)", zone.name, format_amount(zone.fee));
        }
    }

    println!("\n{}", "Accessory:".bold());
    println!(
        "  {} {}",
        catalog.accessory.name.cyan(),
        format!("{} CFA", format_amount(catalog.accessory.unit_price)).green()
    );

    println!("\n{} {}", "Image:".dimmed(), catalog.product_image_url.dimmed());
    println!("{} {}", "Logo:".dimmed(), catalog.logo_url.dimmed());

    Ok(())
}

async fn cmd_quote(
    items: Vec<(String, u32)>,
    accessory: u32,
    municipality: Option<String>,
) -> Result<()> {
    if items.is_empty() {
        bail!("No products given. Use --item 100ml=2");
    }

    let quote = client()?
        .quote(&QuoteRequest {
            quantities: merge_items(items),
            accessory_quantity: accessory,
            municipality,
        })
        .await?;

    print_totals(&quote.totals);

    let blocking: Vec<_> = quote
        .issues
        .iter()
        .filter(|i| i.code != "missing_full_name" && i.code != "missing_phone")
        .collect();
    for issue in &blocking {
        println!("{} {}", "!".yellow(), issue.message);
    }

    if quote.valid {
        println!("{}", "Ready to order".green());
    } else if let Some(hint) = &quote.hint {
        println!("{}", hint.dimmed());
    }

    Ok(())
}

/// Sum repeated items per product id
fn merge_items(items: Vec<(String, u32)>) -> HashMap<String, u32> {
    let mut quantities = HashMap::new();
    for (id, quantity) in items {
        let total = quantities.entry(id).or_insert(0u32);
        *total = total.saturating_add(quantity);
    }
    quantities
}

async fn cmd_order() -> Result<()> {
    let client = client()?;
    let catalog = client
        .catalog()
        .await?
        .to_catalog()
        .context("Could not load the catalog")?;

    let mut state = CheckoutState::new(Arc::new(catalog));

    loop {
        if state.is_confirmation_shown() {
            if !Confirm::new()
                .with_prompt("Place another order?")
                .default(false)
                .interact()?
            {
                return Ok(());
            }
            state = state.apply(CheckoutEvent::DismissConfirmation);
        }

        print_form(&state);

        let actions = menu(&state);
        let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
        let choice = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        let event = match &actions[choice].1 {
            Action::Event(event) => event.clone(),
            Action::Municipality => match pick_municipality(&state)? {
                Some(name) => CheckoutEvent::SelectMunicipality(Some(name)),
                None => continue,
            },
            Action::FullName => CheckoutEvent::SetFullName(
                Input::<String>::new()
                    .with_prompt("Nom complet")
                    .with_initial_text(&state.customer().full_name)
                    .allow_empty(true)
                    .interact_text()?,
            ),
            Action::Phone => CheckoutEvent::SetPhone(
                Input::<String>::new()
                    .with_prompt("Téléphone")
                    .with_initial_text(&state.customer().phone)
                    .allow_empty(true)
                    .interact_text()?,
            ),
            Action::Submit => {
                state = submit(&client, state).await;
                continue;
            }
            Action::Quit => return Ok(()),
        };

        state = state.apply(event);
    }
}

async fn submit(client: &StorefrontClient, state: CheckoutState) -> CheckoutState {
    let draft = match state.draft() {
        Ok(draft) => draft,
        Err(_) => {
            println!("{} {}", "!".yellow(), ORDER_INCOMPLETE_HINT);
            return state;
        }
    };

    let state = state.apply(CheckoutEvent::SubmissionStarted);
    if !state.is_in_flight() {
        return state;
    }

    print!("Envoi en cours... ");
    std::io::stdout().flush().ok();
    match client.submit_order(&api::OrderRequest::from(&draft)).await {
        Ok(receipt) => {
            println!("{}", "OK".green());
            println!("\n{}", receipt.confirmation_title.green().bold());
            println!("{}", receipt.confirmation_message);
            println!("\n{}", receipt.summary.dimmed());
            println!("\n{} {}", "WhatsApp:".bold(), receipt.handoff_url.cyan());
            println!("{} {}", "Order:".dimmed(), receipt.order_id.to_string().dimmed());
            state.apply(CheckoutEvent::SubmissionSucceeded)
        }
        Err(e) => {
            println!("{}", "Failed".red());
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            state.apply(CheckoutEvent::SubmissionFailed(e.to_string()))
        }
    }
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    match std::env::var(config::API_URL_ENV) {
        Ok(url) => println!("  {}: {}", config::API_URL_ENV, url.cyan()),
        Err(_) => println!("  {}: {}", config::API_URL_ENV, "Not set".dimmed()),
    }
    println!("  Effective URL: {}", config.api_url().green());

    Ok(())
}

async fn cmd_set_url(url: String) -> Result<()> {
    let mut config = Config::load()?;
    config.set_base_url(&url);

    print!("Testing connection... ");
    std::io::stdout().flush().ok();
    let client = StorefrontClient::new(&config.base_url)?;
    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => println!("{}", "Unreachable (saved anyway)".yellow()),
    }

    config.save()?;
    println!("{} Base URL saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

// ============================================
// Interactive form helpers
// ============================================

enum Action {
    Event(CheckoutEvent),
    Municipality,
    FullName,
    Phone,
    Submit,
    Quit,
}

fn menu(state: &CheckoutState) -> Vec<(String, Action)> {
    let mut actions = Vec::new();

    for line in state.lines() {
        actions.push((
            format!("+ {}", line.product.name),
            Action::Event(CheckoutEvent::IncrementProduct(line.product.id.clone())),
        ));
        if line.is_selected() {
            actions.push((
                format!("- {}", line.product.name),
                Action::Event(CheckoutEvent::DecrementProduct(line.product.id.clone())),
            ));
        }
    }

    let accessory = &state.catalog().accessory.name;
    actions.push((format!("+ {}", accessory), Action::Event(CheckoutEvent::IncrementAccessory)));
    if state.accessory_quantity() > 0 {
        actions.push((format!("- {}", accessory), Action::Event(CheckoutEvent::DecrementAccessory)));
    }

    actions.push(("Commune de livraison".to_string(), Action::Municipality));
    actions.push(("Nom complet".to_string(), Action::FullName));
    actions.push(("Téléphone".to_string(), Action::Phone));
    if state.can_submit() {
        actions.push(("Commander via WhatsApp".to_string(), Action::Submit));
    }
    actions.push(("Quit".to_string(), Action::Quit));

    actions
}

fn pick_municipality(state: &CheckoutState) -> Result<Option<String>> {
    let catalog = state.catalog();
    let zones: Vec<_> = ZoneClass::ALL
        .iter()
        .flat_map(|class| catalog.zones_by_class(*class))
        .collect();
    if zones.is_empty() {
        bail!("The catalog has no delivery municipalities");
    }

    let labels: Vec<String> = zones
        .iter()
        .map(|z| format!("{} ({}, {} CFA)", z.name, z.class.label(), format_amount(z.fee)))
        .collect();

    let choice = Select::new()
        .with_prompt("Commune")
        .items(&labels)
        .interact_opt()?;

    Ok(choice.map(|i| zones[i].name.clone()))
}

fn print_form(state: &CheckoutState) {
    println!();
    for line in state.lines().iter().filter(|l| l.is_selected()) {
        println!(
            "  {} x{}  {} CFA",
            line.product.name.cyan(),
            line.quantity,
            format_amount(line.line_total())
        );
    }
    if state.accessory_quantity() > 0 {
        println!(
            "  {} x{}",
            state.catalog().accessory.name.cyan(),
            state.accessory_quantity()
        );
    }
    if let Some(zone) = state.zone() {
        println!("  {} {}", "Commune:".dimmed(), zone.name);
    }
    let customer = state.customer();
    if customer.has_full_name() || customer.has_phone() {
        println!("  {} {} {}", "Client:".dimmed(), customer.full_name, customer.phone);
    }

    print_totals(&state.totals());

    if let Some(error) = state.last_error() {
        println!("{} {}", "Last attempt failed:".red(), error);
    }
    if !state.is_valid() {
        println!("{}", ORDER_INCOMPLETE_HINT.dimmed());
    }
}

fn print_totals(totals: &OrderTotals) {
    println!("  Sous-total: {} CFA", format_amount(totals.subtotal));
    if totals.accessory_cost > 0 {
        println!("  Accessoires: {} CFA", format_amount(totals.accessory_cost));
    }
    if totals.free_delivery {
        println!("  Livraison: {}", "Gratuite".green());
    } else {
        println!("  Livraison: {} CFA", format_amount(totals.delivery_fee));
    }
    println!("  {} {} CFA", "Total:".bold(), format_amount(totals.total).bold());
}

/// Parse a quote item given as ID=QTY
fn parse_item(s: &str) -> Result<(String, u32), String> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product id in '{}'", s));
    }
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok((id.to_string(), quantity))
}
