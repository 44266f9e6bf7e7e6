//! Persisted domain shapes.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use order::{Order, OrderItem};
pub use product::{Product, ProductDraft, ProductPatch};
pub use user::{Session, User, UserDraft};
