//! Handler for the `product` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::{ProductArgs, ProductCommand};
use crate::adapter::inbound::cli::context::CliContext;
use crate::adapter::inbound::cli::output;
use crate::domain::id::ProductId;
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::error::Result;

impl From<ProductArgs> for NewProduct {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            images: args.images,
            category: args.category,
            sub_category: args.sub_category,
            sizes: args.sizes,
            bestseller: args.bestseller,
            discount: args.discount.unwrap_or(0),
            stock: args.stock.unwrap_or(0),
        }
    }
}

impl From<ProductArgs> for ProductUpdate {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            category: args.category,
            sub_category: args.sub_category,
            sizes: args.sizes,
            bestseller: args.bestseller,
            discount: args.discount,
            images: Some(args.images),
        }
    }
}

/// Execute a `product` subcommand.
pub async fn execute(ctx: &CliContext, command: ProductCommand) -> Result<()> {
    let catalog = &ctx.services.catalog;
    match command {
        ProductCommand::Add(args) => {
            let product = catalog.add_product(args.into()).await?;
            report("product.add", "Product added", &product);
        }
        ProductCommand::List => {
            let products = catalog.list_products().await?;
            print_list(&products);
        }
        ProductCommand::Show { id } => {
            let product = catalog.get_product(&ProductId::new(id)).await?;
            report("product.show", "Product", &product);
        }
        ProductCommand::Update { id, fields } => {
            let product = catalog
                .update_product(&ProductId::new(id), fields.into())
                .await?;
            report("product.update", "Product updated", &product);
        }
        ProductCommand::Remove { id } => {
            let id = ProductId::new(id);
            catalog.remove_product(&id).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "product.remove",
                    "success": true,
                    "id": id,
                }));
            } else {
                output::success(&format!("Removed product {id}"));
            }
        }
        ProductCommand::Review {
            id,
            rating,
            feedback,
        } => {
            let user = ctx.customer()?;
            let id = ProductId::new(id);
            let outcome = catalog.add_review(&id, &user, rating, feedback).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "product.review",
                    "success": true,
                    "outcome": outcome,
                }));
            } else {
                output::success(&format!("Review {outcome:?} for {id}").to_lowercase());
            }
        }
    }
    Ok(())
}

fn report(command: &str, title: &str, product: &Product) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "product": product,
        }));
        return;
    }
    output::section(title);
    output::field("ID", output::highlight(&product.id));
    output::field("Name", &product.name);
    output::field(
        "Category",
        format!("{} / {}", product.category, product.sub_category),
    );
    output::field("Price", product.price);
    if product.is_discounted() {
        output::field(
            "Final price",
            format!("{} (-{}%)", product.final_price().round_dp(2), product.discount),
        );
    }
    output::field("Sizes", product.sizes.join(", "));
    output::field("Stock", product.stock);
    if let Some(rating) = product.average_rating() {
        output::field(
            "Rating",
            format!("{rating:.1} from {} reviews", product.reviews.len()),
        );
    }
}

const LIST_COLUMNS: [(&str, usize); 5] = [
    ("ID", 36),
    ("NAME", 24),
    ("CATEGORY", 12),
    ("PRICE", 10),
    ("DISCOUNT", 8),
];

fn print_list(products: &[Product]) {
    if output::is_json() {
        output::json_output(json!({
            "command": "product.list",
            "success": true,
            "products": products,
        }));
        return;
    }
    if products.is_empty() {
        output::note("No products");
        return;
    }
    let widths: Vec<usize> = LIST_COLUMNS.iter().map(|(_, w)| *w).collect();
    output::table_header(&LIST_COLUMNS);
    output::table_separator(&widths);
    for product in products {
        output::table_row(
            &[
                product.id.to_string(),
                output::truncate(&product.name, 24),
                output::truncate(&product.category, 12),
                product.price.to_string(),
                format!("{}%", product.discount),
            ],
            &widths,
        );
    }
}
