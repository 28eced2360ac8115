pub mod compiler;
pub mod phrases;
pub mod render;
pub mod segment;
