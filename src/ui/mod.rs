//! What operators see: callback codec, keyboards and message templates.

pub mod callback;
pub mod keyboards;
pub mod render;

pub use callback::CallbackAction;
pub use render::Reply;
