//! SQLite record store implementation.
//!
//! Provides persistent storage for products, orders and users using SQLite
//! and Diesel ORM.

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::{checkout, DbPool};
use crate::adapter::outbound::sqlite::database::model::{OrderRow, ProductRow, UserRow};
use crate::adapter::outbound::sqlite::database::schema::{orders, products, users};
use crate::domain::{
    id::OrderId, id::ProductId, id::UserId, order::Order, product::Product, user::User,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// SQLite-backed store for every record type.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db(e: diesel::result::Error) -> Error {
    Error::Database(e.to_string())
}

impl ProductStore for SqliteStore {
    async fn insert_product(&self, product: &Product) -> Result<()> {
        let row = ProductRow::from_domain(product)?;
        let mut conn = checkout(&self.pool)?;
        diesel::insert_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<bool> {
        let row = ProductRow::from_domain(product)?;
        let mut conn = checkout(&self.pool)?;
        let updated = diesel::update(products::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(updated > 0)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool> {
        let mut conn = checkout(&self.pool)?;
        let deleted = diesel::delete(products::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(db)?;
        Ok(deleted > 0)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>> {
        let mut conn = checkout(&self.pool)?;
        let row: Option<ProductRow> = products::table
            .find(id.as_str())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db)?;
        row.map(ProductRow::into_domain).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut conn = checkout(&self.pool)?;
        let rows: Vec<ProductRow> = products::table
            .select(ProductRow::as_select())
            .order(products::created_at.asc())
            .load(&mut conn)
            .map_err(db)?;
        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    async fn get_products(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let mut conn = checkout(&self.pool)?;
        let keys: Vec<&str> = ids.iter().map(ProductId::as_str).collect();
        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(keys))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .map_err(db)?;
        rows.into_iter().map(ProductRow::into_domain).collect()
    }
}

impl OrderStore for SqliteStore {
    async fn insert_order(&self, order: &Order) -> Result<()> {
        let row = OrderRow::from_domain(order)?;
        let mut conn = checkout(&self.pool)?;
        diesel::insert_into(orders::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(())
    }

    async fn update_order(&self, order: &Order) -> Result<bool> {
        let row = OrderRow::from_domain(order)?;
        let mut conn = checkout(&self.pool)?;
        let updated = diesel::update(orders::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(updated > 0)
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>> {
        let mut conn = checkout(&self.pool)?;
        let row: Option<OrderRow> = orders::table
            .find(id.as_str())
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db)?;
        row.map(OrderRow::into_domain).transpose()
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let mut conn = checkout(&self.pool)?;
        let rows: Vec<OrderRow> = orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)
            .map_err(db)?;
        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    async fn list_orders_for_user(&self, user: &UserId) -> Result<Vec<Order>> {
        let mut conn = checkout(&self.pool)?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user.as_str()))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)
            .map_err(db)?;
        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    async fn delete_all_orders(&self) -> Result<usize> {
        let mut conn = checkout(&self.pool)?;
        diesel::delete(orders::table).execute(&mut conn).map_err(db)
    }
}

impl UserStore for SqliteStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let row = UserRow::from_domain(user)?;
        let mut conn = checkout(&self.pool)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        let row = UserRow::from_domain(user)?;
        let mut conn = checkout(&self.pool)?;
        let updated = diesel::update(users::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(db)?;
        Ok(updated > 0)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let mut conn = checkout(&self.pool)?;
        let row: Option<UserRow> = users::table
            .find(id.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db)?;
        row.map(UserRow::into_domain).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = checkout(&self.pool)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db)?;
        row.map(UserRow::into_domain).transpose()
    }
}
