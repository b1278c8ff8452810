//! Runtime side of the asset bundle: the types generated bundle code
//! instantiates and the lookup a server calls to answer asset requests.

mod asset;
mod bundle;

use once_cell::sync::OnceCell;

pub use asset::{Asset, DecodeError};
pub use bundle::{Bundle, Lookup};

static REGISTRY: OnceCell<&'static Bundle> = OnceCell::new();

/// Installs the bundle served by [`lookup`]. Only the first call takes
/// effect; it returns `false` if a bundle was already registered.
pub fn register(bundle: &'static Bundle) -> bool {
    REGISTRY.set(bundle).is_ok()
}

pub fn registered() -> Option<&'static Bundle> {
    REGISTRY.get().copied()
}

/// Resolves a request path against the registered bundle.
pub fn lookup(path: &str, if_none_match: Option<&str>) -> Lookup {
    match registered() {
        Some(bundle) => bundle.lookup(path, if_none_match),
        None => Lookup::NotFound,
    }
}
