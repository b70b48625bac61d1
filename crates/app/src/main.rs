//! Storefront CLI

use std::{io, process};

use clap::{Args, Parser, Subcommand};
use storefront_app::{
    config::ClientConfig,
    context::{Stores, StorefrontSession},
    domain::{
        StoreError,
        carts::models::CartItemId,
        products::{ColorId, ProductId, SizeId},
    },
    observability,
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront cart and wishlist CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Load configuration from `.env`, the environment, and CLI arguments.
    fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(CartCommand),
    Wishlist(WishlistCommand),
}

impl Commands {
    /// Stores that must be loaded before the command runs.
    fn stores(&self) -> Stores {
        match self {
            Self::Cart(_) => Stores::Cart,
            Self::Wishlist(WishlistCommand {
                command: WishlistSubcommand::Move { .. } | WishlistSubcommand::MoveAll,
            }) => Stores::Both,
            Self::Wishlist(_) => Stores::Wishlist,
        }
    }
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the cart with totals
    Show,

    /// Add a product
    Add {
        product: u64,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        #[arg(long)]
        color: Option<u64>,

        #[arg(long)]
        size: Option<u64>,
    },

    /// Set the quantity of a cart line
    Update { item: u64, quantity: u32 },

    /// Remove a cart line
    Remove { item: u64 },

    /// Empty the cart
    Clear,

    /// Apply or remove a promo code
    Promo(PromoCommand),
}

#[derive(Debug, Args)]
struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    Apply { code: String },
    Remove,
}

#[derive(Debug, Args)]
struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// List saved products
    Show,
    Add { product: u64 },
    Remove { product: u64 },
    Toggle { product: u64 },

    /// Move a saved product into the cart
    Move { product: u64 },

    /// Move every saved product into the cart
    MoveAll,
    Clear,
}

#[tokio::main]
pub async fn main() {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let mut session = StorefrontSession::connect(&cli.config)
        .map_err(|error| format!("failed to start session: {error}"))?;

    session
        .load(cli.command.stores())
        .await
        .map_err(|error| describe(&error))?;

    let result = match cli.command {
        Commands::Cart(CartCommand { command }) => cart(&mut session, command).await,
        Commands::Wishlist(WishlistCommand { command }) => wishlist(&mut session, command).await,
    };

    session.teardown();

    result
}

async fn cart(session: &mut StorefrontSession, command: CartSubcommand) -> Result<(), String> {
    let store = session.cart_mut();

    let outcome = match command {
        CartSubcommand::Show => Ok(()),
        CartSubcommand::Add {
            product,
            quantity,
            color,
            size,
        } => {
            store
                .add_item(
                    ProductId::new(product),
                    quantity,
                    color.map(ColorId::new),
                    size.map(SizeId::new),
                )
                .await
        }
        CartSubcommand::Update { item, quantity } => {
            store
                .update_quantity(CartItemId::new(item), quantity)
                .await
        }
        CartSubcommand::Remove { item } => store.remove_item(CartItemId::new(item)).await,
        CartSubcommand::Clear => store.clear().await,
        CartSubcommand::Promo(PromoCommand {
            command: PromoSubcommand::Apply { code },
        }) => store.apply_promo_code(&code).await,
        CartSubcommand::Promo(PromoCommand {
            command: PromoSubcommand::Remove,
        }) => store.remove_promo_code().await,
    };

    outcome.map_err(|error| describe(&error))?;

    print_cart(session)
}

async fn wishlist(
    session: &mut StorefrontSession,
    command: WishlistSubcommand,
) -> Result<(), String> {
    match command {
        WishlistSubcommand::Show => {}
        WishlistSubcommand::Add { product } => session
            .wishlist_mut()
            .add(ProductId::new(product))
            .await
            .map_err(|error| describe(&error))?,
        WishlistSubcommand::Remove { product } => session
            .wishlist_mut()
            .remove(ProductId::new(product))
            .await
            .map_err(|error| describe(&error))?,
        WishlistSubcommand::Toggle { product } => {
            let saved = session
                .wishlist_mut()
                .toggle(ProductId::new(product))
                .await
                .map_err(|error| describe(&error))?;

            println!(
                "product {product} {}",
                if saved { "saved" } else { "removed" }
            );
        }
        WishlistSubcommand::Move { product } => {
            let product = session
                .wishlist()
                .entries()
                .iter()
                .find(|entry| entry.product.id.get() == product)
                .map(|entry| entry.product.clone())
                .ok_or_else(|| format!("product {product} is not in the wishlist"))?;

            session
                .transfer()
                .move_to_cart(&product)
                .await
                .map_err(|error| format!("{error}: {}", describe(error.store_error())))?;

            return print_cart(session);
        }
        WishlistSubcommand::MoveAll => {
            let products = session
                .wishlist()
                .entries()
                .iter()
                .map(|entry| entry.product.clone())
                .collect::<Vec<_>>();

            let report = session.transfer().move_all_to_cart(&products).await;

            for product in report.moved() {
                println!("moved product {product}");
            }

            for (product, error) in report.failed() {
                println!(
                    "failed to move product {product}: {error}: {}",
                    describe(error.store_error())
                );
            }

            print_cart(session)?;
        }
        WishlistSubcommand::Clear => session
            .wishlist_mut()
            .clear()
            .await
            .map_err(|error| describe(&error))?,
    }

    print_wishlist(session);

    Ok(())
}

fn print_cart(session: &StorefrontSession) -> Result<(), String> {
    let receipt = session
        .cart()
        .receipt()
        .map_err(|error| format!("failed to price cart: {error}"))?;

    receipt
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print cart: {error}"))
}

fn print_wishlist(session: &StorefrontSession) {
    let wishlist = session.wishlist();

    if wishlist.is_empty() {
        println!("wishlist is empty");
        return;
    }

    for entry in wishlist.entries() {
        let stock = if entry.product.is_in_stock() {
            ""
        } else {
            " (out of stock)"
        };

        println!(
            "{:>6}  {}{stock}",
            entry.product.id, entry.product.name
        );
    }
}

fn describe(error: &StoreError) -> String {
    error.message()
}
