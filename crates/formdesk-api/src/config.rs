use anyhow::Context;
use std::io::Read;

#[derive(serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bind_address: String,
    pub bind_port: u16,
    pub database: formdesk_db::Config,
    #[serde(default)]
    pub tracing: TracingConfig,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `info,formdesk_db=debug`.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}

fn default_filter() -> String {
    "info".to_owned()
}

fn default_ansi() -> bool {
    true
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let mut configuration = String::with_capacity(4096);
    std::fs::File::open(path)
        .with_context(|| format!("unable to open configuration file {path}"))?
        .read_to_string(&mut configuration)
        .with_context(|| format!("unable to read configuration file {path}"))?;
    parse(&configuration).with_context(|| format!("unable to parse configuration file {path}"))
}

fn parse(configuration: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str::<Config>(configuration)?)
}
