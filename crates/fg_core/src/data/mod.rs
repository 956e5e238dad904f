pub mod catalog_cache;
pub mod seed;

pub use catalog_cache::{
    load_catalog, load_index_from_bytes, load_index_from_path, resolve_catalog_path,
    PLAYER_CACHE_ENV,
};
pub use seed::{embedded_catalog, load_seed_json, EMBEDDED_SEED_JSON};
