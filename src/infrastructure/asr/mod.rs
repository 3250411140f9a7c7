mod client_config;
mod doubao_engine;
mod engine_factory;
mod qwen_engine;

pub use client_config::AsrClientConfig;
pub use doubao_engine::{
    DOUBAO_DEFAULT_ENDPOINT, DOUBAO_DEFAULT_RESOURCE_ID, DoubaoConfig, DoubaoEngine,
};
pub use engine_factory::{AsrEngineFactory, EngineFactoryError};
pub use qwen_engine::{QWEN_DEFAULT_ENDPOINT, QwenConfig, QwenEngine};
