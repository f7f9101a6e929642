use url::Url;

use super::Error;

/// Configuration for the query API client.
#[derive(Clone)]
pub struct Configuration {
    pub base_path: String,
    pub api_key: Option<String>,
    /// Query-string parameters from the configured URL, sent with every
    /// request unless the caller passes the same name.
    pub default_params: Vec<(String, String)>,
    pub user_agent: Option<String>,
    pub client: reqwest::Client,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_params", &self.default_params)
            .finish()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_path: "http://127.0.0.1:8080/api/v1".to_string(),
            api_key: None,
            default_params: Vec::new(),
            user_agent: Some(format!("query-api/{}", env!("CARGO_PKG_VERSION"))),
            client: reqwest::Client::new(),
        }
    }
}

impl Configuration {
    /// Create a new configuration from a URL string.
    ///
    /// If the URL contains an `api-key` query parameter, it is extracted
    /// and appended to every request as `?api-key=KEY`. Other query
    /// parameters become [`Configuration::default_params`].
    pub fn new(url: String) -> Self {
        let (base_path, api_key, default_params) = Self::parse_url(&url);
        Self {
            base_path,
            api_key,
            default_params,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }

    /// `{base_path}/{segments..}` with the api key, the default parameters
    /// and `params` in the query string. Segments are percent-encoded.
    pub(crate) fn build_url(
        &self,
        segments: &[&str],
        params: &[(String, String)],
    ) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_path)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_path.clone()))?
            .pop_if_empty()
            .extend(segments);

        let defaults = self
            .default_params
            .iter()
            .filter(|(name, _)| !params.iter().any(|(given, _)| given == name));
        let mut pairs = defaults.chain(params).peekable();
        if self.api_key.is_some() || pairs.peek().is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(key) = &self.api_key {
                query.append_pair("api-key", key);
            }
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    pub(crate) fn parse_url(url: &str) -> (String, Option<String>, Vec<(String, String)>) {
        let mut parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return (url.trim_end_matches('/').to_string(), None, Vec::new()),
        };
        let mut api_key = None;
        let mut params = Vec::new();
        for (name, value) in parsed.query_pairs() {
            if name == "api-key" {
                api_key = Some(value.into_owned());
            } else {
                params.push((name.into_owned(), value.into_owned()));
            }
        }
        parsed.set_query(None);
        parsed.set_fragment(None);
        (
            parsed.as_str().trim_end_matches('/').to_string(),
            api_key,
            params,
        )
    }
}
