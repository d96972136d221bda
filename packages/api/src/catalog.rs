//! # Catalog rows for the landing page
//!
//! The home view shows a hero banner and one horizontal row per [`Category`].
//! Rows come from The Movie Database (TMDB); the `server` feature adds
//! [`TmdbClient`], which the `fetch_row` server function uses. Everything else
//! here is shared with the client.

use serde::{Deserialize, Serialize};

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Maximum overview length shown in the hero banner.
pub const HERO_OVERVIEW_LEN: usize = 150;

/// A row on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Upcoming,
    Popular,
    Trending,
    TopRated,
    Horror,
}

impl Category {
    /// Rows in display order.
    pub const ALL: [Category; 5] = [
        Category::Upcoming,
        Category::Popular,
        Category::Trending,
        Category::TopRated,
        Category::Horror,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Upcoming => "Up Coming",
            Category::Popular => "Popular",
            Category::Trending => "Trending",
            Category::TopRated => "Top Rated",
            Category::Horror => "Horror",
        }
    }

    /// TMDB path and query parameters (besides the API key) for this row.
    pub fn endpoint(self) -> (&'static str, &'static [(&'static str, &'static str)]) {
        const FIRST_PAGE: &[(&str, &str)] = &[("language", "en-US"), ("page", "1")];
        const SECOND_PAGE: &[(&str, &str)] = &[("language", "en-US"), ("page", "2")];
        const HORROR: &[(&str, &str)] = &[
            ("language", "en-US"),
            ("query", "horror"),
            ("page", "1"),
            ("include_adult", "false"),
        ];
        match self {
            Category::Upcoming => ("movie/upcoming", FIRST_PAGE),
            Category::Popular => ("movie/popular", FIRST_PAGE),
            Category::Trending => ("movie/popular", SECOND_PAGE),
            Category::TopRated => ("movie/top_rated", FIRST_PAGE),
            Category::Horror => ("search/movie", HORROR),
        }
    }
}

/// A movie as listed by TMDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
}

impl Show {
    /// Full image URL for the backdrop at `size` (e.g. `"w500"`, `"original"`).
    pub fn backdrop_url(&self, size: &str) -> Option<String> {
        self.backdrop_path
            .as_ref()
            .map(|path| format!("{IMAGE_BASE_URL}/{size}{path}"))
    }
}

/// The show featured in the hero banner: the first one with a backdrop.
pub fn featured(shows: &[Show]) -> Option<&Show> {
    shows.iter().find(|show| show.backdrop_path.is_some())
}

/// Cut `text` to at most `max` characters, appending `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(feature = "server")]
pub use tmdb::{TmdbClient, TmdbConfig};

#[cfg(feature = "server")]
mod tmdb {
    use reqwest::{Client, Url};
    use serde::Deserialize;

    use super::{Category, Show};

    const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";

    /// TMDB settings from environment variables.
    #[derive(Debug, Clone)]
    pub struct TmdbConfig {
        pub api_key: String,
        pub base_url: String,
    }

    impl TmdbConfig {
        pub fn from_env() -> Result<Self, String> {
            dotenvy::dotenv().ok();

            let api_key = std::env::var("TMDB_API_KEY").map_err(|_| "TMDB_API_KEY not set")?;
            let base_url = std::env::var("TMDB_URL")
                .unwrap_or_else(|_| DEFAULT_TMDB_URL.to_string());

            Ok(Self {
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
            })
        }

        /// Request URL for a category row.
        pub fn row_url(&self, category: Category) -> Result<Url, String> {
            let (path, params) = category.endpoint();
            let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
                .map_err(|e| e.to_string())?;
            url.query_pairs_mut()
                .append_pair("api_key", &self.api_key)
                .extend_pairs(params.iter());
            Ok(url)
        }
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        #[serde(default)]
        results: Vec<Show>,
    }

    /// Client for the TMDB listing endpoints.
    pub struct TmdbClient {
        config: TmdbConfig,
        http: Client,
    }

    impl TmdbClient {
        pub fn new() -> Result<Self, String> {
            Ok(Self {
                config: TmdbConfig::from_env()?,
                http: Client::new(),
            })
        }

        pub async fn fetch_row(&self, category: Category) -> Result<Vec<Show>, String> {
            let url = self.config.row_url(category)?;
            let page: Page = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| e.to_string())?
                .error_for_status()
                .map_err(|e| e.to_string())?
                .json()
                .await
                .map_err(|e| e.to_string())?;
            Ok(page.results)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_row_url() {
            let config = TmdbConfig {
                api_key: "k3y".to_string(),
                base_url: DEFAULT_TMDB_URL.to_string(),
            };
            let url = config.row_url(Category::Horror).unwrap();
            assert_eq!(url.path(), "/3/search/movie");
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            assert!(pairs.contains(&("api_key".to_string(), "k3y".to_string())));
            assert!(pairs.contains(&("query".to_string(), "horror".to_string())));
        }

        #[test]
        fn test_page_tolerates_missing_fields() {
            let page: Page = serde_json::from_str(
                r#"{"page":1,"results":[{"id":7,"title":"Alien","backdrop_path":null,"release_date":"1979-05-25"}]}"#,
            )
            .unwrap();
            assert_eq!(page.results.len(), 1);
            assert_eq!(page.results[0].overview, "");
            assert!(page.results[0].backdrop_url("w500").is_none());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u64, backdrop: Option<&str>) -> Show {
        Show {
            id,
            title: format!("Show {id}"),
            overview: String::new(),
            backdrop_path: backdrop.map(str::to_string),
            release_date: None,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("a longer overview", 8), "a longer...");
        // Multi-byte characters are never split
        assert_eq!(truncate("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_featured_skips_shows_without_backdrop() {
        let shows = vec![show(1, None), show(2, Some("/b.jpg")), show(3, Some("/c.jpg"))];
        assert_eq!(featured(&shows).map(|s| s.id), Some(2));
        assert!(featured(&[show(1, None)]).is_none());
    }

    #[test]
    fn test_backdrop_url() {
        assert_eq!(
            show(1, Some("/abc.jpg")).backdrop_url("original").as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc.jpg")
        );
    }

    #[test]
    fn test_category_titles_are_distinct() {
        let mut titles: Vec<&str> = Category::ALL.iter().map(|c| c.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), Category::ALL.len());
    }
}
