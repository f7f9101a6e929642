use std::collections::BTreeMap;

use installer_client::rpc::SolanaRpcUrl;
use query_api::apis::configuration::Configuration;
use solana_program::pubkey::Pubkey;

use crate::{
    cli::QueryApiArgs,
    errors::ConfigError,
    query_client::RetryConfig,
    settings::{QueryDefinition, Settings},
};

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_PARTITION_PARAM: &str = "date";

/// Effective settings for the query commands. Command line values win over
/// the settings file and environment, which win over defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub query_api: Configuration,
    pub retry_config: RetryConfig,
    pub concurrency: usize,
    pub settings: Settings,
}

impl DashboardConfig {
    pub fn new(args: &QueryApiArgs, settings: Settings) -> Result<Self, ConfigError> {
        let url = args
            .query_api_url
            .clone()
            .or_else(|| settings.query_api_url.clone())
            .ok_or(ConfigError::MissingField {
                field: "query_api_url",
            })?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "query_api_url",
                invalid_value: url,
            });
        }
        let api_key = args.api_key.clone().or_else(|| settings.api_key.clone());
        let query_api = Configuration::new(url).with_api_key(api_key);

        let defaults = RetryConfig::default();
        let retry_config = RetryConfig {
            num_retries: args
                .num_retries
                .or(settings.num_retries)
                .unwrap_or(defaults.num_retries),
            delay_ms: args
                .delay_ms
                .or(settings.delay_ms)
                .unwrap_or(defaults.delay_ms),
            max_delay_ms: args
                .max_delay_ms
                .or(settings.max_delay_ms)
                .unwrap_or(defaults.max_delay_ms),
        };

        let concurrency = settings.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        Ok(Self {
            query_api,
            retry_config,
            concurrency,
            settings,
        })
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(concurrency) = concurrency {
            self.concurrency = concurrency;
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                invalid_value: "0".to_string(),
            });
        }
        Ok(self)
    }

    /// Resolves a catalogue name to its definition. Names not in the
    /// catalogue are used as raw query ids.
    pub fn resolve_query(&self, name: &str) -> QueryDefinition {
        self.settings
            .query(name)
            .cloned()
            .unwrap_or_else(|| QueryDefinition {
                id: name.to_string(),
                ..Default::default()
            })
    }
}

impl QueryDefinition {
    /// Catalogue parameters followed by `extra`; an extra parameter replaces
    /// a catalogue one of the same name.
    pub fn request_params(&self, extra: &[(String, String)]) -> Vec<(String, String)> {
        let mut params: BTreeMap<String, String> = self.params.clone();
        for (name, value) in extra {
            params.insert(name.clone(), value.clone());
        }
        params.into_iter().collect()
    }
}

pub fn resolve_rpc_url(arg: Option<&str>, settings: &Settings) -> SolanaRpcUrl {
    arg.or(settings.rpc_url.as_deref())
        .map(SolanaRpcUrl::from)
        .unwrap_or(SolanaRpcUrl::Mainnet)
}

pub fn resolve_program_id(arg: Option<&str>) -> Result<Pubkey, ConfigError> {
    match arg {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            field: "program_id",
            invalid_value: value.to_string(),
        }),
        None => Ok(installer_client::ID),
    }
}
