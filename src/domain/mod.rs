pub mod cart;
pub mod menu;
pub mod money;
pub mod operator;
pub mod session;
pub mod transaction;

pub use cart::{Cart, CartLine, InsufficientPayment};
pub use menu::*;
pub use operator::*;
pub use session::*;
pub use transaction::*;
