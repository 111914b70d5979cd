//! Store Service - command line access to the data-access layer.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use store_service_lib::config::StoreServiceConfig;
use store_service_lib::{MigrateAction, ProductQuery};

#[derive(Parser)]
#[command(name = "store-service")]
#[command(about = "Accounts, teams, products and items over SeaORM")]
struct Cli {
    /// Database URL (overrides STORE_DATABASE_URL / DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Populate demo sellers, products, teams, members and items
    Seed,
    /// Run a product query and print the result as JSON
    Products {
        #[command(subcommand)]
        query: ProductCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Every product with its seller
    List,
    /// Fixed page: ids descending, offset 30, limit 10
    Page,
    /// The single product whose name contains NAME
    Search { name: String },
    /// Price sums per type above the threshold
    Sums,
    /// Products fetched together with their sellers
    WithSellers,
    /// Products priced above the average
    AboveAverage,
    /// Distinct product names
    Names,
    /// Product names with seller emails
    SellerEmails,
    /// Raise prices below the ceiling by 10%
    Reprice,
    /// Raise prices of products in cities starting with PREFIX by 10%
    RepriceCity { prefix: String },
    /// Product addresses
    Addresses,
}

impl From<ProductCommands> for ProductQuery {
    fn from(command: ProductCommands) -> Self {
        match command {
            ProductCommands::List => ProductQuery::List,
            ProductCommands::Page => ProductQuery::Page,
            ProductCommands::Search { name } => ProductQuery::Search(name),
            ProductCommands::Sums => ProductQuery::Sums,
            ProductCommands::WithSellers => ProductQuery::WithSellers,
            ProductCommands::AboveAverage => ProductQuery::AboveAverage,
            ProductCommands::Names => ProductQuery::Names,
            ProductCommands::SellerEmails => ProductQuery::SellerEmails,
            ProductCommands::Reprice => ProductQuery::Reprice,
            ProductCommands::RepriceCity { prefix } => ProductQuery::RepriceCity(prefix),
            ProductCommands::Addresses => ProductQuery::Addresses,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = StoreServiceConfig::from_env().with_database_url(cli.database_url);

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            store_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Seed => {
            let summary = store_service_lib::run_seed(&config).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Products { query } => {
            let result = store_service_lib::run_product_query(&config, query.into()).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
