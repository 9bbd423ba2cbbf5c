pub mod indicators;
pub mod portfolio_service;
pub mod report_format;
pub mod prompt_builder;
pub mod response_parser;
pub mod analysis_service;
pub mod data_cache;
pub mod refresh_scheduler;
