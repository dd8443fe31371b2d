//! Command-line interface definitions.
//!
//! Defines the CLI structure for the storefront using `clap`. Operator
//! commands (catalog, order administration, statistics) act on the database
//! directly; customer commands (cart, wishlist, checkout, reviews) identify
//! the customer through a bearer token.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;
use crate::domain::order::OrderStatus;

/// Storefront catalog, orders and statistics CLI
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Path to the SQLite database file (overrides the config file).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Bearer token for customer and admin commands.
    #[arg(long, global = true, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the storefront CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Month-over-month catalog and order statistics
    #[command(subcommand)]
    Stats(StatsCommand),

    /// Manage the product catalog
    #[command(subcommand)]
    Product(ProductCommand),

    /// Place and manage orders
    #[command(subcommand)]
    Order(OrderCommand),

    /// Manage the customer's cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Manage the customer's wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Accounts and tokens
    #[command(subcommand)]
    User(UserCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run local health checks
    Health,

    /// Answer JSON-lines requests on stdin until EOF
    Serve,
}

/// Subcommands for `storefront stats`.
#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Catalog statistics.
    Products,
    /// Order statistics.
    Orders,
}

/// Product fields shared by `product add` and `product update`.
#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub sub_category: String,
    /// Available size (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,
    /// Image URL (repeatable).
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[arg(long)]
    pub bestseller: bool,
    /// Discount percentage, clamped to 0-100.
    #[arg(long, allow_negative_numbers = true)]
    pub discount: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub stock: Option<i64>,
}

/// Subcommands for `storefront product`.
#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Add a product.
    Add(ProductArgs),
    /// List every product.
    List,
    /// Show one product.
    Show { id: String },
    /// Replace a product's fields.
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Remove a product.
    Remove { id: String },
    /// Review a product as the logged-in customer.
    Review {
        id: String,
        /// Rating from 1 to 5.
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,
        #[arg(long)]
        feedback: Option<String>,
    },
}

/// One `--item` argument: `PRODUCT_ID:SIZE[:QUANTITY]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: String,
    pub size: String,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(product_id), Some(size)) = (parts.next(), parts.next()) else {
            return Err(format!("expected PRODUCT_ID:SIZE[:QUANTITY], got '{s}'"));
        };
        let quantity = match parts.next() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("invalid quantity '{raw}'"))?,
            None => 1,
        };
        if parts.next().is_some() || product_id.is_empty() || size.is_empty() || quantity == 0 {
            return Err(format!("expected PRODUCT_ID:SIZE[:QUANTITY], got '{s}'"));
        }
        Ok(Self {
            product_id: product_id.to_string(),
            size: size.to_string(),
            quantity,
        })
    }
}

/// Delivery address flags.
#[derive(Args, Debug, Clone, Default)]
pub struct AddressArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub zip_code: String,
    #[arg(long, default_value = "")]
    pub country: String,
    #[arg(long, default_value = "")]
    pub phone: String,
}

/// Checkout flags shared by `order place` and `order pay`.
#[derive(Args, Debug, Clone)]
pub struct CheckoutArgs {
    /// Line item as PRODUCT_ID:SIZE[:QUANTITY] (repeatable).
    #[arg(long = "item", required = true)]
    pub items: Vec<ItemSpec>,
    /// Order total including delivery.
    #[arg(long)]
    pub amount: Decimal,
    #[command(flatten)]
    pub address: AddressArgs,
}

/// Subcommands for `storefront order`.
#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Place a cash-on-delivery order.
    Place(CheckoutArgs),
    /// Place an online order and print the gateway order request.
    Pay(CheckoutArgs),
    /// Confirm an online payment with the gateway signature.
    Verify {
        order_id: String,
        #[arg(long)]
        gateway_order_id: String,
        #[arg(long)]
        payment_id: String,
        #[arg(long)]
        signature: String,
    },
    /// List every order, newest first.
    List,
    /// List the logged-in customer's orders.
    Mine,
    /// Set an order's status.
    Status {
        order_id: String,
        /// One of: "Order Placed", "Packing", "Shipped", "Out for Delivery",
        /// "Delivered", "Cancelled".
        status: OrderStatus,
    },
    /// Cancel one of the logged-in customer's orders.
    Cancel { order_id: String },
    /// Delete every order.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

/// Subcommands for `storefront cart`.
#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add one unit of an item in a size.
    Add { item_id: String, size: String },
    /// Set the quantity of an item in a size (0 removes it).
    Update {
        item_id: String,
        size: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart.
    Show,
}

/// Subcommands for `storefront wishlist`.
#[derive(Subcommand, Debug)]
pub enum WishlistCommand {
    /// Add a product.
    Add { product_id: String },
    /// Remove a product.
    Remove { product_id: String },
    /// Show wishlisted products.
    Show,
}

/// Subcommands for `storefront user`.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a customer account and print its token.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log a customer in and print the token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log the admin in and print the token.
    Admin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the logged-in customer's profile.
    Me,
    /// Change the logged-in customer's name.
    Rename { name: String },
}

/// Subcommands for `storefront config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file.
    Init {
        /// Overwrite the file if it already exists.
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--json",
            "-q",
            "-vv",
            "--db",
            "/tmp/shop.db",
            "health",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/shop.db")));
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["storefront", "stats", "orders", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Stats(StatsCommand::Orders)));
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["storefront", "health"]).unwrap();
        assert_eq!(cli.config, paths::default_config());
    }

    #[test]
    fn test_parse_product_add() {
        let cli = Cli::try_parse_from([
            "storefront",
            "product",
            "add",
            "--name",
            "Tee",
            "--description",
            "Cotton",
            "--price",
            "19.99",
            "--category",
            "Men",
            "--sub-category",
            "Topwear",
            "--size",
            "S",
            "--size",
            "M",
            "--discount",
            "-5",
        ])
        .unwrap();
        let Commands::Product(ProductCommand::Add(args)) = cli.command else {
            panic!("expected product add");
        };
        assert_eq!(args.sizes, vec!["S", "M"]);
        assert_eq!(args.discount, Some(-5));
        assert_eq!(args.price.to_string(), "19.99");
    }

    #[test]
    fn test_parse_order_status_label() {
        let cli =
            Cli::try_parse_from(["storefront", "order", "status", "o1", "Out for Delivery"])
                .unwrap();
        let Commands::Order(OrderCommand::Status { status, .. }) = cli.command else {
            panic!("expected order status");
        };
        assert_eq!(status, OrderStatus::OutForDelivery);
        assert!(
            Cli::try_parse_from(["storefront", "order", "status", "o1", "Lost"]).is_err()
        );
    }

    #[test]
    fn test_parse_cart_negative_quantity() {
        let cli =
            Cli::try_parse_from(["storefront", "cart", "update", "p1", "M", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart(CartCommand::Update { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_item_spec_parsing() {
        assert_eq!(
            "p1:M:2".parse::<ItemSpec>().unwrap(),
            ItemSpec {
                product_id: "p1".into(),
                size: "M".into(),
                quantity: 2
            }
        );
        assert_eq!("p1:L".parse::<ItemSpec>().unwrap().quantity, 1);
        assert!("p1".parse::<ItemSpec>().is_err());
        assert!("p1:M:0".parse::<ItemSpec>().is_err());
        assert!("p1:M:x".parse::<ItemSpec>().is_err());
        assert!("p1:M:1:extra".parse::<ItemSpec>().is_err());
    }

    #[test]
    fn test_checkout_requires_items() {
        assert!(Cli::try_parse_from(["storefront", "order", "place", "--amount", "10"]).is_err());
    }
}
