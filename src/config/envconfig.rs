use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "MODELGEN";
    const SEPARATOR: &'static str = "__";
    /// Keys whose values are comma separated lists.
    const LIST_KEYS: &'static [&'static str] = &[];

    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Reads the environment without validating, so callers can layer
    /// further overrides first.
    fn load() -> Result<Self> {
        Self::load_dotenv();

        let mut environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
            .list_separator(",");
        for key in Self::LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let settings = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read environment variables for config")?;

        settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")
    }

    fn from_env() -> Result<Self> {
        let cfg = Self::load()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
