//! Session statistics storage

mod in_memory;

pub use in_memory::InMemorySessionStatsRepository;
