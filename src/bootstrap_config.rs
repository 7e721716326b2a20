use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Clone)]
#[command(version, about)]
pub struct BootstrapConfig {
    #[clap(short('c'), long("config"), env("HOMESCOUT_CONFIG"), default_value_os = "config.yaml")]
    pub config_file: String,
    #[clap(short('l'), long("log-level"), env("HOMESCOUT_LOG_LEVEL"), default_value_t, value_enum)]
    pub log_level: LogLevel,
    #[clap(long("listen"), env("HOMESCOUT_LISTEN"), default_value = "0.0.0.0:8080")]
    pub listen: String,
    /// Credential for the commute / geocoding / places provider
    #[clap(long("api-key"), env("GOOGLE_API_KEY"), hide_env_values = true)]
    pub api_key: String,
}

impl BootstrapConfig {
    pub fn read() -> Self {
        BootstrapConfig::parse()
    }
}


#[derive(clap::ValueEnum, Clone, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}
