pub mod context;
pub mod product;

pub use context::{ConversationContext, ExtractedSlots, Slot};
pub use product::{Category, Product, Style};
