pub mod events;
pub mod regions;
