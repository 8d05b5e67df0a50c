use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    /// No API read token configured; `cinescope config tmdb` sets one.
    #[error("no TMDB API token configured, run 'config tmdb' first")]
    MissingToken,

    #[error("TMDB rejected the API token")]
    Unauthorized,

    #[error("TMDB has no entry at {0}")]
    NotFound(String),

    #[error("TMDB rate limit exceeded, retry later")]
    RateLimited,

    #[error("media type has no provider endpoint")]
    UnsupportedMediaType,

    #[error("TMDB returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to TMDB failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}
