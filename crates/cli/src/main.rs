//! Jabuticaba CLI - storefront over a local JSON state file.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! jb-cli product list
//!
//! # Manage the catalog
//! jb-cli product add -n "Bone Jabuticaba" -p 49.90 -i images/bone.png
//! jb-cli product edit 3 --price 39.90
//! jb-cli product remove 3
//!
//! # Shop
//! jb-cli account register -n Maria -e maria@example.com -p segredo
//! jb-cli account login -e maria@example.com -p segredo
//! jb-cli cart add 3
//! jb-cli checkout --freight 12.50
//! jb-cli orders --status processing --search maria
//! ```
//!
//! # Commands
//!
//! - `product` - List and manage catalog products
//! - `cart` - Inspect and mutate the cart
//! - `checkout` - Place an order from the cart
//! - `account` - Register, sign in and out
//! - `orders` - Browse placed orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jb-cli")]
#[command(author, version, about = "Jabuticaba storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and manage catalog products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Freight for this order; defaults to the stored value
        #[arg(short, long)]
        freight: Option<String>,
    },
    /// Register, sign in and out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Browse placed orders
    Orders {
        /// Match against order number, customer name, or email
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (`pending`, `processing`, `shipped`, ...)
        #[arg(long)]
        status: Option<String>,

        /// Orders placed on or after this date (RFC 3339)
        #[arg(long)]
        from: Option<String>,

        /// Orders placed on or before this date (RFC 3339)
        #[arg(long)]
        to: Option<String>,

        /// Show every customer's orders, not just the signed-in one's
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List the current catalog
    List,
    /// Create a local product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price, e.g. `49.90`
        #[arg(short, long)]
        price: String,

        /// Image path
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Edit a product
    Edit {
        /// Product id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<String>,

        /// New image path
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i64,
    },
    /// Set a line's quantity (0 removes it)
    Set {
        /// Product id
        id: i64,

        /// New quantity
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in customer
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::List => commands::product::list(&ctx).await,
            ProductAction::Add { name, price, image } => {
                commands::product::add(&ctx, &name, &price, image).await?;
            }
            ProductAction::Edit {
                id,
                name,
                price,
                image,
            } => commands::product::edit(&ctx, id, name, price.as_deref(), image).await?,
            ProductAction::Remove { id } => commands::product::remove(&ctx, id).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id } => commands::cart::add(&ctx, id).await?,
            CartAction::Set { id, quantity } => commands::cart::set(&ctx, id, quantity),
            CartAction::Remove { id } => commands::cart::remove(&ctx, id),
        },
        Commands::Checkout { freight } => {
            commands::checkout::place(&ctx, freight.as_deref()).await?;
        }
        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => commands::account::register(&ctx, name, email, password)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&ctx, &email, &password)?;
            }
            AccountAction::Logout => commands::account::logout(&ctx),
            AccountAction::Whoami => commands::account::whoami(&ctx),
        },
        Commands::Orders {
            search,
            status,
            from,
            to,
            all,
        } => commands::orders::list(&ctx, search, status.as_deref(), from.as_deref(), to.as_deref(), all)?,
    }
    Ok(())
}
