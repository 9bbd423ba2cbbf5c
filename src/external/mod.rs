pub mod portfolio_store;
pub mod rest_store;
pub mod chat_provider;
pub mod openai_compat;
