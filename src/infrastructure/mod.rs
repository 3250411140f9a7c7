pub mod asr;
pub mod crawler;
pub mod http_retry;
pub mod observability;
pub mod storage;
