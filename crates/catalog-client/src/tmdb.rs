//! TMDB popular-movies client.
//!
//! For each page in a requested range:
//! 1. `GET /movie/popular?page=N` for the page itself
//! 2. `GET /movie/{id}/credits` for every movie on it (concurrently)
//! 3. Resolve `genre_ids` against `GET /genre/movie/list`, fetched once
//!    and cached for the lifetime of the client
//!
//! The director is the first crew member whose job is "Director" (or the
//! "Unknown" sentinel); actors are the first three cast entries.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use data_loader::{MAX_ACTORS, MovieId, MovieRecord, UNKNOWN_DIRECTOR, parser};

use crate::{CatalogFetcher, FetchError, Result};

const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB refuses popular pages past this one
pub const MAX_PAGE: u32 = 500;

/// Pages actually requested for an inclusive range: page 0 and pages past
/// [`MAX_PAGE`] are dropped.
pub fn requested_pages(range_start: u32, range_end: u32) -> RangeInclusive<u32> {
    range_start.max(1)..=range_end.min(MAX_PAGE)
}

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub api_url: String,
    pub language: String,
}

impl TmdbSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

// =============================================================================
// Response payloads
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PopularPage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<PopularMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    pub genres: Vec<GenreEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Build a record from a popular-page entry, the genre list and credits.
///
/// Genres follow genre-list order, not the order of `genre_ids`.
pub fn assemble_record(
    movie: &PopularMovie,
    genres: &[GenreEntry],
    credits: &Credits,
) -> MovieRecord {
    let director = credits
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone())
        .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string());

    let record = MovieRecord::new(movie.id, movie.title.clone())
        .with_overview(movie.overview.clone())
        .with_genres(
            genres
                .iter()
                .filter(|genre| movie.genre_ids.contains(&genre.id))
                .map(|genre| genre.name.clone()),
        )
        .with_director(director)
        .with_actors(credits.cast.iter().take(MAX_ACTORS).map(|actor| actor.name.clone()));

    match &movie.poster_path {
        Some(path) => record.with_poster_path(path.clone()),
        None => record,
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for TMDB's popular movies.
///
/// Cloning is cheap: the HTTP pool and the genre cache are shared.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    settings: Arc<TmdbSettings>,
    genres: Arc<OnceCell<Vec<GenreEntry>>>,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        info!("TMDB client targeting {}", settings.api_url);
        Ok(Self {
            http_client: HttpClient::new(),
            settings: Arc::new(settings),
            genres: Arc::new(OnceCell::new()),
        })
    }

    async fn genre_list(&self) -> Result<&[GenreEntry]> {
        let genres = self
            .genres
            .get_or_try_init(|| async {
                let url = format!("{}/genre/movie/list", self.settings.api_url);
                let list: GenreList =
                    get_json(&self.http_client, &self.settings, &url, None).await?;
                debug!("Cached {} TMDB genres", list.genres.len());
                Ok::<_, FetchError>(list.genres)
            })
            .await?;
        Ok(genres.as_slice())
    }

    async fn popular_page(&self, page: u32) -> Result<PopularPage> {
        let url = format!("{}/movie/popular", self.settings.api_url);
        get_json(&self.http_client, &self.settings, &url, Some(page)).await
    }

    /// Fetch credits for every movie concurrently, returned in input order
    async fn credits_for(&self, movies: &[PopularMovie]) -> Result<Vec<Credits>> {
        let mut tasks = Vec::with_capacity(movies.len());
        for movie in movies {
            let http_client = self.http_client.clone();
            let settings = self.settings.clone();
            let url = format!("{}/movie/{}/credits", settings.api_url, movie.id);
            tasks.push(tokio::spawn(async move {
                get_json::<Credits>(&http_client, &settings, &url, None).await
            }));
        }

        let mut credits = Vec::with_capacity(tasks.len());
        for task in tasks {
            let result = task
                .await
                .map_err(|e| FetchError::Transient(format!("credits task failed: {}", e)))?;
            credits.push(result?);
        }
        Ok(credits)
    }
}

async fn get_json<T: DeserializeOwned>(
    http_client: &HttpClient,
    settings: &TmdbSettings,
    url: &str,
    page: Option<u32>,
) -> Result<T> {
    let mut request = http_client.get(url).query(&[
        ("api_key", settings.api_key.as_str()),
        ("language", settings.language.as_str()),
    ]);
    if let Some(page) = page {
        request = request.query(&[("page", page)]);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        warn!("TMDB returned status {} for {}", status, url);
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Decode(format!("{}: {}", url, e)))
}

#[async_trait]
impl CatalogFetcher for TmdbClient {
    fn name(&self) -> &str {
        "TmdbClient"
    }

    async fn fetch_batch(&self, range_start: u32, range_end: u32) -> Result<Vec<MovieRecord>> {
        let genres = self.genre_list().await?;
        let mut seen = HashSet::new();
        let mut batch = Vec::new();

        for page in requested_pages(range_start, range_end) {
            let popular = self.popular_page(page).await?;
            let credits = self.credits_for(&popular.results).await?;

            for (movie, credits) in popular.results.iter().zip(&credits) {
                // Popularity can shift between page requests
                if !seen.insert(movie.id) {
                    continue;
                }
                let record = assemble_record(movie, genres, credits);
                match parser::validate_record(&record) {
                    Ok(()) => batch.push(record),
                    Err(e) => warn!("Skipping TMDB movie {}: {}", movie.id, e),
                }
            }
        }

        info!(
            "Fetched {} movies from TMDB pages {}..={}",
            batch.len(),
            range_start,
            range_end
        );
        Ok(batch)
    }
}
