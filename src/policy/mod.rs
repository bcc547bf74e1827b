pub mod fifo;
pub mod lru;
