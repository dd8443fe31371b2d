//! JSON-lines request loop behind `storefront serve`.
//!
//! Each input line is one request:
//!
//! ```json
//! {"id": 1, "token": "...", "op": "stats.products", "params": {}}
//! ```
//!
//! and produces exactly one response line carrying the same `id`, either
//! `{"id", "success": true, ...}` or `{"id", "success": false, "message"}`.
//! Statistics replies keep the `{success, stats, source}` envelope. The
//! statistics cache and its sweeper live for the whole session.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::adapter::inbound::cli::context::CliContext;
use crate::application::cache::spawn_sweeper;
use crate::application::orders::PaymentConfirmation;
use crate::application::state::AppServices;
use crate::application::statistics::StatsEnvelope;
use crate::domain::id::{OrderId, ProductId};
use crate::domain::order::{OrderStatus, PlaceOrder};
use crate::domain::product::{NewProduct, ProductUpdate};
use crate::domain::user::Registration;
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// One request line.
#[derive(Debug, Deserialize)]
pub struct ServeRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub token: Option<String>,
    pub op: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Deserialize)]
struct IdParams {
    id: String,
}

#[derive(Deserialize)]
struct ReviewParams {
    product_id: String,
    rating: i64,
    #[serde(default)]
    feedback: Option<String>,
}

#[derive(Deserialize)]
struct OrderIdParams {
    order_id: String,
}

#[derive(Deserialize)]
struct StatusParams {
    order_id: String,
    status: OrderStatus,
}

#[derive(Deserialize)]
struct CartAddParams {
    item_id: String,
    size: String,
}

#[derive(Deserialize)]
struct CartUpdateParams {
    item_id: String,
    size: String,
    quantity: i64,
}

#[derive(Deserialize)]
struct WishlistParams {
    product_id: String,
}

#[derive(Deserialize)]
struct LoginParams {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RenameParams {
    name: String,
}

fn params<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    let value = if value.is_null() {
        Value::Object(Map::new())
    } else {
        value
    };
    Ok(serde_json::from_value(value)?)
}

/// Split `{ "id": ..., rest }` into the id and the remaining object.
fn split_id(mut value: Value) -> Result<(String, Value)> {
    let id = value
        .as_object_mut()
        .and_then(|object| object.remove("id"))
        .ok_or_else(|| Error::Parse("missing params.id".to_string()))?;
    let id = id
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| Error::Parse("params.id must be a string".to_string()))?;
    Ok((id, value))
}

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    }
}

/// Run one operation and return the response fields other than `id` and `success`.
async fn dispatch<S>(
    services: &AppServices<S>,
    token: Option<&str>,
    op: &str,
    raw: Value,
) -> Result<Value>
where
    S: ProductStore + OrderStore + UserStore,
{
    let auth = &services.auth;
    let value = match op {
        "ping" => json!({ "pong": true }),

        "stats.products" => {
            auth.require_admin(token)?;
            let response = services.statistics.product_stats().await?;
            json!(StatsEnvelope::from(Ok(response)))
        }
        "stats.orders" => {
            auth.require_admin(token)?;
            let response = services.statistics.order_stats().await?;
            json!(StatsEnvelope::from(Ok(response)))
        }

        "product.list" => json!({ "products": services.catalog.list_products().await? }),
        "product.get" => {
            let p: IdParams = params(raw)?;
            let product = services.catalog.get_product(&ProductId::new(p.id)).await?;
            json!({ "product": product })
        }
        "product.add" => {
            auth.require_admin(token)?;
            let input: NewProduct = params(raw)?;
            json!({ "product": services.catalog.add_product(input).await? })
        }
        "product.update" => {
            auth.require_admin(token)?;
            let (id, rest) = split_id(raw)?;
            let update: ProductUpdate = params(rest)?;
            let product = services
                .catalog
                .update_product(&ProductId::new(id), update)
                .await?;
            json!({ "product": product })
        }
        "product.remove" => {
            auth.require_admin(token)?;
            let p: IdParams = params(raw)?;
            services.catalog.remove_product(&ProductId::new(p.id)).await?;
            json!({ "message": "product removed" })
        }
        "product.review" => {
            let user = auth.require_customer(token)?;
            let p: ReviewParams = params(raw)?;
            let outcome = services
                .catalog
                .add_review(&ProductId::new(p.product_id), &user, p.rating, p.feedback)
                .await?;
            json!({ "outcome": outcome })
        }

        "order.place" => {
            let user = auth.require_customer(token)?;
            let request: PlaceOrder = params(raw)?;
            json!({ "order": services.orders.place_cod(&user, request).await? })
        }
        "order.pay" => {
            let user = auth.require_customer(token)?;
            let request: PlaceOrder = params(raw)?;
            let checkout = services.orders.place_online(&user, request).await?;
            json!({ "order": checkout.order, "gateway": checkout.request })
        }
        "order.verify" => {
            let user = auth.require_customer(token)?;
            let confirmation: PaymentConfirmation = params(raw)?;
            json!({ "order": services.orders.verify_payment(&user, confirmation).await? })
        }
        "order.mine" => {
            let user = auth.require_customer(token)?;
            json!({ "orders": services.orders.user_orders(&user).await? })
        }
        "order.cancel" => {
            let user = auth.require_customer(token)?;
            let p: OrderIdParams = params(raw)?;
            let order = services
                .orders
                .cancel(&user, &OrderId::new(p.order_id))
                .await?;
            json!({ "order": order })
        }
        "order.list" => {
            auth.require_admin(token)?;
            json!({ "orders": services.orders.all_orders().await? })
        }
        "order.status" => {
            auth.require_admin(token)?;
            let p: StatusParams = params(raw)?;
            let order = services
                .orders
                .update_status(&OrderId::new(p.order_id), p.status)
                .await?;
            json!({ "order": order })
        }
        "order.clear" => {
            auth.require_admin(token)?;
            json!({ "deleted": services.orders.clear_all().await? })
        }

        "cart.add" => {
            let user = auth.require_customer(token)?;
            let p: CartAddParams = params(raw)?;
            let cart = services
                .cart
                .add(&user, &ProductId::new(p.item_id), &p.size)
                .await?;
            json!({ "cart": cart })
        }
        "cart.update" => {
            let user = auth.require_customer(token)?;
            let p: CartUpdateParams = params(raw)?;
            let cart = services
                .cart
                .update(&user, &ProductId::new(p.item_id), &p.size, p.quantity)
                .await?;
            json!({ "cart": cart })
        }
        "cart.get" => {
            let user = auth.require_customer(token)?;
            json!({ "cart": services.cart.get(&user).await? })
        }

        "wishlist.add" => {
            let user = auth.require_customer(token)?;
            let p: WishlistParams = params(raw)?;
            let ids = services
                .wishlist
                .add(&user, &ProductId::new(p.product_id))
                .await?;
            json!({ "wishlist": ids })
        }
        "wishlist.remove" => {
            let user = auth.require_customer(token)?;
            let p: WishlistParams = params(raw)?;
            let ids = services
                .wishlist
                .remove(&user, &ProductId::new(p.product_id))
                .await?;
            json!({ "wishlist": ids })
        }
        "wishlist.get" => {
            let user = auth.require_customer(token)?;
            let wishlist = services.wishlist.list(&user).await?;
            json!({ "wishlist": wishlist.products, "count": wishlist.count })
        }

        "user.register" => {
            let registration: Registration = params(raw)?;
            json!(auth.register(registration).await?)
        }
        "user.login" => {
            let p: LoginParams = params(raw)?;
            json!(auth.login(&p.email, &p.password).await?)
        }
        "user.admin" => {
            let p: LoginParams = params(raw)?;
            json!(auth.admin_login(&p.email, &p.password)?)
        }
        "user.me" => {
            let user = auth.require_customer(token)?;
            json!({ "user": auth.current_user(&user).await? })
        }
        "user.rename" => {
            let user = auth.require_customer(token)?;
            let p: RenameParams = params(raw)?;
            json!({ "user": auth.update_name(&user, &p.name).await? })
        }

        other => return Err(Error::Parse(format!("unknown op: {other}"))),
    };
    Ok(value)
}

/// Answer one request.
pub async fn handle<S>(services: &AppServices<S>, request: ServeRequest) -> Value
where
    S: ProductStore + OrderStore + UserStore,
{
    let ServeRequest {
        id,
        token,
        op,
        params,
    } = request;
    debug!(op = %op, "Request received");

    let mut response = Map::new();
    response.insert("id".to_string(), id);
    match dispatch(services, token.as_deref(), &op, params).await {
        Ok(value) => {
            response.insert("success".to_string(), Value::Bool(true));
            for (key, value) in body(value) {
                response.entry(key).or_insert(value);
            }
        }
        Err(e) => {
            if e.is_store_failure() {
                warn!(op = %op, error = %e, "Request failed");
            } else {
                debug!(op = %op, error = %e, "Request rejected");
            }
            response.insert("success".to_string(), Value::Bool(false));
            response.insert("message".to_string(), Value::String(e.to_string()));
        }
    }
    Value::Object(response)
}

/// Answer one raw input line.
pub async fn handle_line<S>(services: &AppServices<S>, line: &str) -> Value
where
    S: ProductStore + OrderStore + UserStore,
{
    match serde_json::from_str::<ServeRequest>(line) {
        Ok(request) => handle(services, request).await,
        Err(e) => json!({
            "id": Value::Null,
            "success": false,
            "message": format!("invalid request: {e}"),
        }),
    }
}

/// Serve requests from `reader` until EOF, writing one response line each.
///
/// Returns the number of requests answered.
///
/// # Errors
/// Returns an error when reading input or writing output fails.
pub async fn run<S, R, W>(
    services: &AppServices<S>,
    sweep_interval: Duration,
    reader: R,
    mut writer: W,
) -> Result<usize>
where
    S: ProductStore + OrderStore + UserStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let sweeper = spawn_sweeper(services.cache.clone(), sweep_interval);
    let mut lines = reader.lines();
    let mut answered = 0;

    let result = async {
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = handle_line(services, &line).await;
            writer.write_all(response.to_string().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            answered += 1;
        }
        Ok::<(), Error>(())
    }
    .await;

    sweeper.shutdown().await;
    result?;
    Ok(answered)
}

/// Execute `serve` on stdin/stdout.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let interval = ctx.config.cache.sweep_interval();
    info!(
        database = %ctx.database.display(),
        ttl_secs = ctx.config.cache.ttl_secs,
        "Serving JSON-lines requests on stdin"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        result = run(&ctx.services, interval, stdin, stdout) => {
            let answered = result?;
            info!(answered, "Input closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
    Ok(())
}
