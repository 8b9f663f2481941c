use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory uploaded closet images are written to.
    pub image_folder: String,
    /// Mount point the image folder is served from; stored item URLs start with it.
    pub image_base_url: String,
    /// Length of a loan in days, used to compute checkout due dates.
    pub loan_days: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default())
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings: Settings = Config::builder()
            .set_default("image_folder", "images")?
            .set_default("image_base_url", "/images")?
            .set_default("loan_days", 14_i64)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.image_base_url.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "image_base_url must start with '/', got {:?}",
                self.image_base_url
            )));
        }
        if self.loan_days <= 0 {
            return Err(ConfigError::Message(format!(
                "loan_days must be positive, got {}",
                self.loan_days
            )));
        }
        Ok(())
    }
}
