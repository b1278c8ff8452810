use asset_bundle_build::Options;

fn main() -> anyhow::Result<()> {
    asset_bundle_build::generate(Options::cargo_defaults()?)?;
    Ok(())
}
