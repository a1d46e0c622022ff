use reqwest::Url;
use reqwest::blocking::Client;

use crate::RegenError;
use crate::RegenResult;
use crate::config::FetchConfig;

/// Default `User-Agent` sent with remote include requests.
pub const USER_AGENT: &str = concat!("regen/", env!("CARGO_PKG_VERSION"));

/// Retrieves the full text of a remote document.
///
/// Any failure, including a non-success status, is fatal to the run.
pub trait Fetch {
	fn fetch(&self, url: &str) -> RegenResult<String>;
}

impl<F> Fetch for F
where
	F: Fn(&str) -> RegenResult<String>,
{
	fn fetch(&self, url: &str) -> RegenResult<String> {
		self(url)
	}
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
	client: Client,
}

impl HttpFetcher {
	pub fn new(config: &FetchConfig) -> RegenResult<Self> {
		let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
		let client = Client::builder()
			.user_agent(user_agent)
			.timeout(config.timeout())
			.build()
			.map_err(|e| RegenError::HttpClient(e.to_string()))?;

		Ok(Self { client })
	}
}

impl Fetch for HttpFetcher {
	fn fetch(&self, url: &str) -> RegenResult<String> {
		let parsed = parse_url(url)?;
		tracing::info!(url, "fetching remote include");

		let failure = |reason: String| {
			RegenError::FetchFailure {
				url: url.to_string(),
				reason,
			}
		};

		let response = self
			.client
			.get(parsed)
			.send()
			.map_err(|e| failure(e.to_string()))?;
		let status = response.status();
		if !status.is_success() {
			return Err(failure(format!("server responded with {status}")));
		}

		response.text().map_err(|e| failure(e.to_string()))
	}
}

/// Parse a remote include target, accepting only `http` and `https` urls.
pub fn parse_url(url: &str) -> RegenResult<Url> {
	let parsed = Url::parse(url).map_err(|e| {
		RegenError::InvalidUrl {
			url: url.to_string(),
			reason: e.to_string(),
		}
	})?;

	match parsed.scheme() {
		"http" | "https" => Ok(parsed),
		scheme => {
			Err(RegenError::InvalidUrl {
				url: url.to_string(),
				reason: format!("unsupported scheme `{scheme}`"),
			})
		}
	}
}
