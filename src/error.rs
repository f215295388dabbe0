use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThermalTrayError {
    /// The external settings channel failed: module missing, path not
    /// found, access denied, or the shell itself could not be spawned.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider returned a string outside the four known profile names.
    #[error("Invalid thermal profile: {0:?}")]
    InvalidProfile(String),

    /// The process is not running with administrative rights.
    #[error("Administrator privileges are required")]
    Privilege,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Autostart error: {0}")]
    Autostart(String),
}

impl From<ThermalTrayError> for String {
    fn from(err: ThermalTrayError) -> Self {
        err.to_string()
    }
}
