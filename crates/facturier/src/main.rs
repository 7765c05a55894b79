//! Facturier - quotation and invoice tool for MAFCI
//!
//! Command-line front end over the workspace crates: client records in
//! SQLite, the static price table, PDF generation, preview rendering,
//! and the quotation history with CSV export.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use devis::{DocumentKind, DocumentRequest, Totals};
use preview::PreviewRenderer;
use registre::{
    export_csv, Client, ClientPreferences, HistoryFilter, QuotationRecord, Store,
    DEFAULT_EXPORT_NAME,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tarif::{format_amount, Category};

#[derive(Parser)]
#[command(name = "facturier")]
#[command(about = "Quotation and invoice tool for MAFCI")]
struct Cli {
    #[arg(long, global = true, env = "FACTURIER_DB", default_value = "clients.db")]
    db: PathBuf,
    #[arg(long, global = true, env = "FACTURIER_LOGO", default_value = "MAFCI.png")]
    logo: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage client records
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },
    /// Manage per-client formatting preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },
    /// List the product catalogue and table prices
    Products {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Generate a quotation or invoice PDF
    Generate {
        #[arg(long)]
        client: String,
        #[arg(long)]
        kind: DocumentKind,
        #[arg(long)]
        number: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        purchase_order: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a generated PDF and print per-page summaries
    Preview {
        pdf: PathBuf,
        #[arg(long, default_value_t = preview::DEFAULT_DPI)]
        dpi: u32,
    },
    /// Show the quotation history, optionally exported as CSV
    History {
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        kind: Option<DocumentKind>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_NAME)]
        export: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ClientCommand {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        nif: String,
        #[arg(long, default_value = "")]
        rc: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        prefs: Option<String>,
    },
    Edit {
        current_name: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        nif: Option<String>,
        #[arg(long)]
        rc: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        prefs: Option<String>,
    },
    Show {
        name: String,
    },
    List {
        #[arg(long)]
        category: Option<Category>,
    },
}

#[derive(Subcommand)]
enum PrefsCommand {
    Set { name: String, json: String },
}

struct GenerateArgs {
    client: String,
    kind: DocumentKind,
    number: String,
    product: String,
    quantity: f64,
    price: Option<f64>,
    purchase_order: Option<String>,
    date: Option<NaiveDate>,
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Client { command } => client_command(&cli.db, command),
        Commands::Prefs { command } => prefs_command(&cli.db, command),
        Commands::Products { category } => {
            products(category);
            Ok(())
        }
        Commands::Generate {
            client,
            kind,
            number,
            product,
            quantity,
            price,
            purchase_order,
            date,
            output,
        } => generate(
            &cli.db,
            &cli.logo,
            GenerateArgs {
                client,
                kind,
                number,
                product,
                quantity,
                price,
                purchase_order,
                date,
                output,
            },
        ),
        Commands::Preview { pdf, dpi } => preview_pdf(&pdf, dpi),
        Commands::History {
            client,
            kind,
            date,
            export,
        } => history(&cli.db, client, kind, date, export),
    }
}

fn client_command(db: &Path, command: ClientCommand) -> Result<()> {
    let store = Store::open(db)?;
    match command {
        ClientCommand::Add {
            name,
            nif,
            rc,
            address,
            category,
            prefs,
        } => {
            let preferences = match prefs {
                Some(json) => parse_preferences(&json)?,
                None => ClientPreferences::default(),
            };
            let client = Client {
                name,
                nif,
                rc,
                address,
                category: Some(category),
                preferences,
            };
            store.add_client(&client)?;
            println!("Added client {}", client.name);
            Ok(())
        }
        ClientCommand::Edit {
            current_name,
            name,
            nif,
            rc,
            address,
            category,
            prefs,
        } => {
            let mut client = store.client_by_name(&current_name)?;
            if let Some(name) = name {
                client.name = name;
            }
            if let Some(nif) = nif {
                client.nif = nif;
            }
            if let Some(rc) = rc {
                client.rc = rc;
            }
            if let Some(address) = address {
                client.address = address;
            }
            if let Some(category) = category {
                client.category = Some(category);
            }
            if let Some(json) = prefs {
                client.preferences = parse_preferences(&json)?;
            }
            store.update_client(&current_name, &client)?;
            println!("Updated client {}", client.name);
            Ok(())
        }
        ClientCommand::Show { name } => {
            let client = store.client_by_name(&name)?;
            println!("Name:     {}", client.name);
            println!("NIF:      {}", client.nif);
            println!("RC:       {}", client.rc);
            println!("Address:  {}", client.address);
            println!("Category: {}", client.category.map_or("-", |c| c.label()));
            println!(
                "Preferences: {}",
                serde_json::to_string_pretty(&client.preferences)?
            );
            Ok(())
        }
        ClientCommand::List { category } => {
            for name in store.client_names(category)? {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn prefs_command(db: &Path, command: PrefsCommand) -> Result<()> {
    let store = Store::open(db)?;
    match command {
        PrefsCommand::Set { name, json } => {
            let preferences = parse_preferences(&json)?;
            store.set_preferences(&name, &preferences)?;
            println!("Updated preferences for {name}");
            Ok(())
        }
    }
}

/// Parse a preferences argument
///
/// Unlike blobs loaded from the database, JSON given on the command
/// line is rejected when malformed instead of silently defaulted.
fn parse_preferences(json: &str) -> Result<ClientPreferences> {
    serde_json::from_str(json).context("Invalid preferences JSON")
}

fn products(category: Option<Category>) {
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        println!("{}:", category.label());
        for product in tarif::products(category) {
            match product.unit_price {
                Some(price) if price > 0.0 => {
                    println!("  {} - {} MRU", product.designation, format_amount(price))
                }
                Some(_) => println!("  {} (price not set)", product.designation),
                None => println!("  {} (manual price)", product.designation),
            }
        }
    }
}

fn generate(db: &Path, logo: &Path, args: GenerateArgs) -> Result<()> {
    let store = Store::open(db)?;
    let client = store.client_by_name(&args.client)?;
    let category = client.category.ok_or_else(|| {
        anyhow!(
            "Client {} has no category; set one with `client edit`",
            client.name
        )
    })?;
    if !tarif::products(category).any(|p| p.designation == args.product) {
        bail!(
            "Product {} is not offered to {} clients",
            args.product,
            category.label()
        );
    }

    let unit_price = match args.price {
        Some(price) => price,
        None => tarif::unit_price(&args.product)
            .filter(|p| *p > 0.0)
            .ok_or_else(|| anyhow!("No table price for {}; pass --price", args.product))?,
    };
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let request = DocumentRequest {
        kind: args.kind,
        number: args.number,
        client_name: client.name.clone(),
        nif: client.nif,
        rc: client.rc,
        address: client.address,
        purchase_order: args.purchase_order,
        product: args.product,
        quantity: args.quantity,
        unit_price,
        date,
        preferences: client.preferences,
        logo_path: logo.to_path_buf(),
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(request.default_file_name()));

    devis::compose(&request, &output)?;

    // The history row is appended only once the file is written
    let record = QuotationRecord {
        kind: request.kind.to_string(),
        number: request.number.clone(),
        product: request.product.clone(),
        quantity: request.quantity,
        unit_price: request.unit_price,
        date: request.date,
        purchase_order: request.purchase_order.clone(),
    };
    store.insert_quotation(&client.name, &record)?;

    let totals = Totals::compute(request.quantity, request.unit_price);
    println!("Generated {}", output.display());
    println!(
        "HT {} / TVA {} / TTC {} MRU",
        format_amount(totals.ht),
        format_amount(totals.tva),
        format_amount(totals.ttc)
    );
    Ok(())
}

fn preview_pdf(pdf: &Path, dpi: u32) -> Result<()> {
    let renderer = PreviewRenderer::new()?;
    let pages = renderer.render_pages(pdf, dpi)?;

    println!("{}: {} page(s) at {} DPI", pdf.display(), pages.len(), dpi);
    for page in &pages {
        println!(
            "  page {}: {:.0} x {:.0} pts, {} bytes PNG",
            page.page_number,
            page.width_pts,
            page.height_pts,
            page.size()
        );
    }
    Ok(())
}

fn history(
    db: &Path,
    client: Option<String>,
    kind: Option<DocumentKind>,
    date: Option<NaiveDate>,
    export: Option<PathBuf>,
) -> Result<()> {
    let store = Store::open(db)?;
    let filter = HistoryFilter {
        client,
        kind: kind.map(|k| k.to_string()),
        date,
    };
    let entries = store.history(&filter)?;

    match export {
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?;
            export_csv(&entries, file)?;
            println!("Exported {} row(s) to {}", entries.len(), path.display());
        }
        None => {
            for entry in &entries {
                println!(
                    "{} | {} {} | {} | {} | {} x {} | {}",
                    entry.date,
                    entry.kind,
                    entry.number,
                    entry.client,
                    entry.product,
                    format_amount(entry.quantity),
                    format_amount(entry.unit_price),
                    entry.purchase_order.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_parses_kind_and_quantity() {
        let cli = Cli::parse_from([
            "facturier",
            "generate",
            "--client",
            "ACME",
            "--kind",
            "facture",
            "--number",
            "2024-001",
            "--product",
            "Béton C20",
            "--quantity",
            "10",
        ]);
        match cli.command {
            Commands::Generate {
                kind,
                quantity,
                price,
                date,
                ..
            } => {
                assert_eq!(kind, DocumentKind::Facture);
                assert_eq!(quantity, 10.0);
                assert_eq!(price, None);
                assert_eq!(date, None);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_history_export_defaults_file_name() {
        let cli = Cli::parse_from(["facturier", "history", "--export"]);
        match cli.command {
            Commands::History { export, .. } => {
                assert_eq!(export, Some(PathBuf::from(DEFAULT_EXPORT_NAME)));
            }
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn test_history_export_accepts_path() {
        let cli =
            Cli::parse_from(["facturier", "history", "--export", "out.csv", "--kind", "devis"]);
        match cli.command {
            Commands::History { export, kind, .. } => {
                assert_eq!(export, Some(PathBuf::from("out.csv")));
                assert_eq!(kind, Some(DocumentKind::Devis));
            }
            _ => panic!("expected history command"),
        }
    }
}
