mod cart;
mod catalog;

use clap::{Parser, Subcommand};

use offcat_client::OffClient;

#[derive(Debug, Parser)]
#[command(name = "offcat")]
#[command(about = "Explore the OpenFoodFacts catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search products by name
    Search {
        query: String,
        /// How many pages to fetch (load-more)
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Look up a single product by barcode
    Barcode { code: String },
    /// List products in a category
    Category {
        name: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// The popularity-sorted listing
    Popular {
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show the top category names
    Categories,
    /// Manage the session cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CartCommands {
    /// Fetch a product by barcode and add one unit of it
    Add { code: String },
    /// Set the quantity for a product already in the cart (0 removes it)
    Set { code: String, quantity: u32 },
    /// Remove a product from the cart
    Remove { code: String },
    /// Show the cart contents
    List,
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = offcat_core::load_app_config_from_env()?;
    let cli = Cli::parse();
    let client = OffClient::from_config(&config)?;

    let page_size_or = |requested: Option<u32>| requested.unwrap_or(config.default_page_size);

    match cli.command {
        Commands::Search {
            query,
            pages,
            page_size,
        } => catalog::search(&client, &query, pages, page_size_or(page_size)).await?,
        Commands::Barcode { code } => catalog::barcode(&client, &code).await?,
        Commands::Category {
            name,
            pages,
            page_size,
        } => catalog::category(&client, &name, pages, page_size_or(page_size)).await?,
        Commands::Popular { pages, page_size } => {
            catalog::popular(&client, pages, page_size_or(page_size)).await?;
        }
        Commands::Categories => catalog::categories(&client, config.categories_limit).await?,
        Commands::Cart { command } => match command {
            CartCommands::Add { code } => cart::add(&client, &config.cart_path, &code).await?,
            CartCommands::Set { code, quantity } => {
                cart::set(&config.cart_path, &code, quantity)?;
            }
            CartCommands::Remove { code } => cart::remove(&config.cart_path, &code)?,
            CartCommands::List => cart::list(&config.cart_path)?,
            CartCommands::Clear => cart::clear(&config.cart_path)?,
        },
    }

    Ok(())
}
