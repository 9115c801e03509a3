//! Setting cache adapters

pub mod memory_cache;
pub mod redis_cache;

pub use memory_cache::MemorySettingCache;
pub use redis_cache::RedisSettingCache;
