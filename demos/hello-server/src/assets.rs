include!(concat!(env!("OUT_DIR"), "/assets_bundle.rs"));
