pub mod eval;
pub mod loader;
pub mod node;
pub mod subset;
