use std::{
    collections::{BTreeMap, HashSet},
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::Error;

const CONFIG_FILE: &str = "bundle.toml";
const OUTPUT_FILE: &str = "assets_bundle.rs";

pub struct Options {
    config_file: PathBuf,
    explicit_config: bool,
    input_dir: PathBuf,
    output_file: Option<PathBuf>,
    check: bool,
    emit_cargo: bool,
    seen: HashSet<PathBuf>,
}

impl Options {
    /// Options for a build script: assets relative to the package root, the
    /// bundle written to `$OUT_DIR/assets_bundle.rs`.
    pub fn cargo_defaults() -> Result<Self> {
        let out_dir = env::var_os("OUT_DIR").context("OUT_DIR not defined")?;
        Ok(Self {
            output_file: Some(PathBuf::from(out_dir).join(OUTPUT_FILE)),
            emit_cargo: true,
            ..Self::new(env::current_dir()?)
        })
    }

    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            config_file: PathBuf::from(CONFIG_FILE),
            explicit_config: false,
            input_dir,
            output_file: None,
            check: false,
            emit_cargo: false,
            seen: HashSet::new(),
        }
    }

    pub fn with_config_file(self, config_file: PathBuf) -> Self {
        Self {
            config_file,
            explicit_config: true,
            ..self
        }
    }

    pub fn with_output_file(self, output_file: PathBuf) -> Self {
        Self {
            output_file: Some(output_file),
            ..self
        }
    }

    /// Compare against the existing output instead of overwriting it.
    pub fn with_check(self, check: bool) -> Self {
        Self { check, ..self }
    }

    pub(crate) fn check(&self) -> bool {
        self.check
    }

    pub(crate) fn input_path(&mut self, path: &Path) -> PathBuf {
        let result = self.input_dir.join(path);
        self.track(&result);
        result
    }

    pub(crate) fn track(&mut self, path: &Path) {
        if self.emit_cargo && self.seen.insert(path.to_path_buf()) {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    root: PathBuf,
    patterns: Vec<String>,
    shell: PathBuf,
    graphics: PathBuf,
    output: PathBuf,
    runtime_crate: String,
    vars: BTreeMap<String, String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            patterns: [
                "graphicarts/*.svg",
                "graphicarts/*.png",
                "javascripts/*.js",
                "stylesheets/*.css",
                "stylesheets/*.map",
            ]
            .map(String::from)
            .to_vec(),
            shell: PathBuf::from("index.html"),
            graphics: PathBuf::from("graphicarts"),
            output: PathBuf::from("server/src").join(OUTPUT_FILE),
            runtime_crate: String::from("asset_bundle"),
            vars: BTreeMap::new(),
        }
    }
}

/// Fully resolved inputs of one run.
#[derive(Debug)]
pub struct Settings {
    /// Asset root as configured, used for display.
    pub root_display: PathBuf,
    pub root: PathBuf,
    pub patterns: Vec<String>,
    pub shell_display: PathBuf,
    pub shell: PathBuf,
    pub graphics: PathBuf,
    pub output: PathBuf,
    pub runtime_crate: String,
    pub vars: BTreeMap<String, String>,
}

pub fn parse(opts: &mut Options) -> Result<Settings, Error> {
    let path = opts.input_dir.join(&opts.config_file);
    // tracked even when absent so that creating it triggers a rebuild
    opts.track(&path);
    let raw = if opts.explicit_config || path.is_file() {
        let file = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&file).map_err(|source| Error::Config { path, source })?
    } else {
        RawConfig::default()
    };

    let root = opts.input_path(&raw.root);
    Ok(Settings {
        shell: root.join(&raw.shell),
        graphics: root.join(&raw.graphics),
        output: match &opts.output_file {
            Some(output) => opts.input_dir.join(output),
            None => opts.input_dir.join(&raw.output),
        },
        shell_display: raw.shell,
        root_display: raw.root,
        root,
        patterns: raw.patterns,
        runtime_crate: raw.runtime_crate,
        vars: raw.vars,
    })
}
