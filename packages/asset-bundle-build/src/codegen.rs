use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{Options, assets::AssetRecord, config::Settings, error::Error};

pub fn generate(opts: &Options, settings: &Settings, assets: &[AssetRecord]) -> Result<(), Error> {
    let path = &settings.output;
    let mut source = vec![];
    write_bundle(&mut source, &settings.runtime_crate, assets).map_err(|err| {
        Error::OutputWrite {
            path: path.clone(),
            source: err,
        }
    })?;

    if opts.check() {
        if fs::read(path).ok().as_deref() != Some(source.as_slice()) {
            return Err(Error::OutOfDate { path: path.clone() });
        }
        info!("{} is up to date", path.display());
        return Ok(());
    }

    write_file(path, &source).map_err(|err| Error::OutputWrite {
        path: path.clone(),
        source: err,
    })?;
    info!("wrote {} assets to {}", assets.len(), path.display());
    Ok(())
}

/// Writes through a temporary file renamed over `path`.
fn write_file(path: &Path, source: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(source)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    file.persist(path)?;
    Ok(())
}

pub(crate) fn write_bundle(
    file: &mut impl Write,
    runtime: &str,
    assets: &[AssetRecord],
) -> io::Result<()> {
    writeln!(file, "// autogenerated. do not edit!")?;
    writeln!(file)?;
    writeln!(
        file,
        "pub static ASSETS_BUNDLE: {runtime}::Bundle = {runtime}::Bundle::new(&["
    )?;
    for asset in assets {
        writeln!(
            file,
            "    ({:?}, {runtime}::Asset::new(\"{}\", \"{}\")),",
            asset.name, asset.etag, asset.body
        )?;
    }
    writeln!(file, "]);")?;
    writeln!(file)?;
    writeln!(
        file,
        "/// Installs [`ASSETS_BUNDLE`] as the bundle served by `{runtime}::lookup`."
    )?;
    writeln!(file, "pub fn register() -> bool {{")?;
    writeln!(file, "    {runtime}::register(&ASSETS_BUNDLE)")?;
    writeln!(file, "}}")?;
    Ok(())
}
