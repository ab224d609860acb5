pub mod toml_config;

pub use toml_config::MapConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::MapConfig;
    use crate::domain::place::PlaceCategory;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_url, Validate};
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "bettiah-maps")]
    #[command(about = "Town map with nearby place search")]
    pub struct CliConfig {
        #[arg(long, help = "TOML map configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Places service base URL")]
        pub endpoint: Option<String>,

        #[arg(long, help = "Places API key (defaults to GOOGLE_MAPS_API_KEY)")]
        pub api_key: Option<String>,

        #[arg(long, value_parser = parse_category, help = "Place type to search, e.g. hospital")]
        pub category: Option<PlaceCategory>,

        #[arg(long, help = "Reset the map after loading it")]
        pub reset: bool,

        #[arg(long, help = "Open the info window of this marker id")]
        pub click: Option<u64>,

        #[arg(long, help = "Print the final map state as JSON")]
        pub json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    fn parse_category(value: &str) -> std::result::Result<PlaceCategory, String> {
        value.parse::<PlaceCategory>().map_err(|_| {
            let known: Vec<&str> = PlaceCategory::ALL.iter().map(|c| c.as_str()).collect();
            format!("unknown place type '{}'; expected one of: {}", value, known.join(", "))
        })
    }

    impl CliConfig {
        /// 載入設定檔（或內建預設值），再套用命令列參數
        pub fn load_map_config(&self) -> Result<MapConfig> {
            let mut config = match &self.config {
                Some(path) => MapConfig::from_file(path)?,
                None => MapConfig::default(),
            };

            if let Some(endpoint) = &self.endpoint {
                config.search.endpoint = endpoint.clone();
            }
            if let Some(api_key) = &self.api_key {
                config.search.api_key = Some(api_key.clone());
            }

            Ok(config)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(endpoint) = &self.endpoint {
                validate_url("--endpoint", endpoint)?;
            }
            Ok(())
        }
    }

}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
