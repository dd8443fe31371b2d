//! Storefront domain types: catalog, carts, orders, accounts and statistics.
//!
//! Nothing in here performs I/O. Validation failures surface as
//! [`error::DomainError`].

pub mod cart;
pub mod error;
pub mod id;
pub mod order;
pub mod product;
pub mod stats;
pub mod user;

pub use cart::Cart;
pub use id::{OrderId, ProductId, UserId};
pub use order::{Address, Order, OrderItem, OrderStatus, PaymentMethod, PlaceOrder};
pub use product::{NewProduct, Product, ProductUpdate, Review, ReviewOutcome};
pub use user::{Registration, User, UserProfile};
