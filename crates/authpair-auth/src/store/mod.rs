//! Token store implementations that live alongside the engine.

pub mod memory;

pub use memory::MemoryTokenStore;
