mod config;
pub use config::Config;

pub mod env {
    /// Environment variable holding the tracing filter directive.
    pub const LOG_DIRECTIVE: &str = "TINI_LOG";
    /// Environment variable holding the config file path.
    pub const CONFIG_PATH: &str = "TINI_CONFIG";
}
