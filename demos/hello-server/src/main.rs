mod assets;

use asset_bundle::Lookup;

/// Resolves each argument as a request path, optionally `path@etag` to
/// send a conditional request.
fn main() {
    assets::register();

    for request in std::env::args().skip(1) {
        let (path, if_none_match) = match request.split_once('@') {
            Some((path, etag)) => (path, Some(etag)),
            None => (request.as_str(), None),
        };
        match asset_bundle::lookup(path, if_none_match) {
            Lookup::Found { etag, body } => {
                println!("200 {path} etag={etag} {} bytes", body.len())
            }
            Lookup::NotModified { etag } => println!("304 {path} etag={etag}"),
            Lookup::NotFound => println!("404 {path}"),
            Lookup::Invalid(err) => println!("500 {path} {err}"),
        }
    }
}
