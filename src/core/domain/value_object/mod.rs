mod store_key;
mod store_url;

pub use store_key::StoreKey;
pub use store_url::StoreUrl;

pub(crate) use store_url::validate_url;
