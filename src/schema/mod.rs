pub mod ability;
pub mod card;
