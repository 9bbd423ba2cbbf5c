pub(crate) mod health;
pub(crate) mod portfolio;
pub(crate) mod analysis;
pub(crate) mod market;
pub(crate) mod cache;
