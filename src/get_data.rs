use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::model::{HoleScore, Scorecard, ScorecardId};
use crate::ranking::ResultLimit;

/// Outcome of a failed backend call.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Network response was not ok: HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Malformed data from {url}: {source}")]
    MalformedData {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid backend url: `{0}`")]
    InvalidUrl(String),
}

/// The JSON backend the scorecard page talks to.
#[allow(async_fn_in_trait)]
pub trait ScorecardBackend {
    async fn courses_for_all_players(&self) -> Result<Vec<String>, FetchError>;

    async fn courses_for_player(&self, player: &str) -> Result<Vec<String>, FetchError>;

    async fn layouts_for_course(&self, course: &str) -> Result<Vec<String>, FetchError>;

    async fn players_for_course_and_layout(
        &self,
        course: &str,
        layout: &str,
    ) -> Result<Vec<String>, FetchError>;

    async fn scorecard_data(
        &self,
        player: &str,
        course: &str,
        layout: &str,
        limit: ResultLimit,
    ) -> Result<Vec<Scorecard>, FetchError>;

    async fn hole_scores(&self, scorecard: ScorecardId) -> Result<Vec<HoleScore>, FetchError>;
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base url with `segments` appended, each one percent-encoded.
    fn endpoint<I>(&self, segments: I) -> Result<Url, FetchError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::MalformedData {
                    url: url.to_string(),
                    source: e,
                }
            } else {
                FetchError::Network(e)
            }
        })
    }
}

impl ScorecardBackend for HttpBackend {
    async fn courses_for_all_players(&self) -> Result<Vec<String>, FetchError> {
        // The route is registered with a trailing slash.
        let url = self.endpoint(["courses_for_all_players", ""])?;
        self.get_json(url).await
    }

    async fn courses_for_player(&self, player: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(["courses_for_player", player])?;
        self.get_json(url).await
    }

    async fn layouts_for_course(&self, course: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(["layouts_for_course", course])?;
        self.get_json(url).await
    }

    async fn players_for_course_and_layout(
        &self,
        course: &str,
        layout: &str,
    ) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(["players_for_course_and_layout", course, layout])?;
        self.get_json(url).await
    }

    async fn scorecard_data(
        &self,
        player: &str,
        course: &str,
        layout: &str,
        limit: ResultLimit,
    ) -> Result<Vec<Scorecard>, FetchError> {
        let url = scorecard_data_url(self, player, course, layout, limit)?;
        self.get_json(url).await
    }

    async fn hole_scores(&self, scorecard: ScorecardId) -> Result<Vec<HoleScore>, FetchError> {
        let url = self.endpoint(["hole_scores".to_string(), scorecard.to_string()])?;
        self.get_json(url).await
    }
}

/// The scorecard route always takes a row cap, so `all` asks for one no
/// course will ever reach.
pub const UNCAPPED_LIMIT: u32 = u32::MAX;

fn scorecard_data_url(
    backend: &HttpBackend,
    player: &str,
    course: &str,
    layout: &str,
    limit: ResultLimit,
) -> Result<Url, FetchError> {
    let cap = match limit {
        ResultLimit::Count(count) => count.to_string(),
        ResultLimit::All => UNCAPPED_LIMIT.to_string(),
    };
    backend.endpoint(["scorecard_data", player, course, layout, cap.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base).unwrap()
    }

    #[test]
    fn builds_routes_with_encoded_segments() {
        let backend = backend("http://127.0.0.1:5000");
        let url = backend
            .endpoint(["layouts_for_course", "Tali DGC"])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/layouts_for_course/Tali%20DGC");

        let url = backend
            .endpoint(["players_for_course_and_layout", "Tali", "Main / Long"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/players_for_course_and_layout/Tali/Main%20%2F%20Long"
        );
    }

    #[test]
    fn keeps_base_path_and_trailing_slash_routes() {
        let backend = backend("https://dgs.example/app/");
        let url = backend.endpoint(["courses_for_all_players", ""]).unwrap();
        assert_eq!(url.as_str(), "https://dgs.example/app/courses_for_all_players/");
    }

    #[test]
    fn scorecard_route_always_carries_a_limit() {
        let backend = backend("http://localhost:5000");
        let url =
            scorecard_data_url(&backend, "Aino", "Tali", "Main", ResultLimit::Count(5)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/scorecard_data/Aino/Tali/Main/5");

        let url = scorecard_data_url(&backend, "Aino", "Tali", "Main", ResultLimit::All).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/scorecard_data/Aino/Tali/Main/4294967295"
        );
        assert_eq!(url.path_segments().map(|s| s.count()), Some(5));
    }

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            HttpBackend::new("localhost"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpBackend::new("data:text/plain,hi"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
