use etcetera::BaseStrategy;
use serde::{Deserialize, Serialize};

use figment::{
    providers::{Env, Format, Toml},
    Figment, Metadata, Provider,
};

lazy_static::lazy_static! {
    /// Provide a lazily instantiated static reference to
    /// a config object parsed from canonical locations
    /// so that the CLI has immutable access to it from
    /// anywhere without ever having to parse the config more
    /// than once.
    pub static ref CONFIG: Config = load_config();
}

fn load_config() -> Config {
    Config::figment().extract().unwrap_or_default()
}

const DEFAULT_PROFILE: &str = "default";
const DEFAULT_METADATA_EXTENSION: &str = ".jsonld";
const DEFAULT_MAX_PROFILE_SIZE: u64 = 1 << 20;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Built-in profile used when none is given on the command line.
    profile: String,
    /// Extension appended to metadata files in the export package.
    metadata_extension: String,
    /// Upper bound, in bytes, on a profile document read from disk.
    max_profile_size: u64,
}

impl Config {
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn metadata_extension(&self) -> &str {
        &self.metadata_extension
    }

    pub fn max_profile_size(&self) -> u64 {
        self.max_profile_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profile: DEFAULT_PROFILE.to_owned(),
            metadata_extension: DEFAULT_METADATA_EXTENSION.to_owned(),
            max_profile_size: DEFAULT_MAX_PROFILE_SIZE,
        }
    }
}

impl Config {
    pub fn from<T: Provider>(provider: T) -> Result<Config, figment::Error> {
        Figment::from(provider).extract()
    }

    pub fn figment() -> Figment {
        let mut fig = Figment::from(Config::default());

        if let Ok(c) = etcetera::choose_base_strategy() {
            let config = c.config_dir().join("bagprof.toml");
            fig = fig.admerge(Toml::file(config));
        }

        fig.admerge(Env::prefixed("BAGPROF_"))
    }
}

impl Provider for Config {
    fn metadata(&self) -> figment::Metadata {
        Metadata::named("bagprof CLI Config")
    }
    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        figment::providers::Serialized::defaults(self).data()
    }
}
