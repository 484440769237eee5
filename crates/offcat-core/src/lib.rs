pub mod app_config;
pub mod cart;
pub mod config;
pub mod envelope;
pub mod filter;
pub mod product;
pub mod slug;

pub use app_config::{AppConfig, Environment};
pub use cart::{CartEntry, CartError, CartStore};
pub use config::{
    load_app_config, load_app_config_from_env, ConfigError, DEFAULT_UPSTREAM_BASE_URL,
};
pub use envelope::{page_count_for, paginate, PageEnvelope};
pub use filter::FilterState;
pub use product::{Nutriments, Product};
pub use slug::slug;
