use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::models::{Movie, RankedMovie};

/// Simulated view counts fall in this range
pub const VIEWS_RANGE: std::ops::Range<u32> = 10_000..1_010_000;
/// Simulated popularity scores fall in this range
pub const POPULARITY_RANGE: std::ops::RangeInclusive<u8> = 1..=100;
/// Number of leading entries flagged as trending
pub const TRENDING_COUNT: usize = 5;

/// Annotates every movie with simulated views and popularity, most viewed first
///
/// The numbers are mock data drawn from `rng`; they are not an analytics
/// signal. Equal view counts keep catalog order.
pub fn rank_by_popularity<R>(movies: &[Movie], rng: &mut R) -> Vec<RankedMovie>
where
    R: Rng,
{
    let mut ranked: Vec<RankedMovie> = movies
        .iter()
        .map(|movie| RankedMovie {
            movie: movie.clone(),
            views: rng.gen_range(VIEWS_RANGE),
            popularity: rng.gen_range(POPULARITY_RANGE),
        })
        .collect();

    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked
}

/// Random source for a ranking pass
///
/// With `session_seed` the ranking repeats until the catalog is reloaded;
/// without it every pass draws fresh numbers.
pub fn ranking_rng(session_seed: Option<u64>) -> StdRng {
    match session_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One row of the most-watched listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MostWatchedEntry {
    pub rank: usize,
    pub trending: bool,
    #[serde(flatten)]
    pub ranked: RankedMovie,
}

/// Top `limit` movies of a ranking pass, numbered from 1
pub fn most_watched<R>(movies: &[Movie], limit: usize, rng: &mut R) -> Vec<MostWatchedEntry>
where
    R: Rng,
{
    rank_by_popularity(movies, rng)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, ranked)| MostWatchedEntry {
            rank: index + 1,
            trending: index < TRENDING_COUNT,
            ranked,
        })
        .collect()
}
