use anyhow::{Context, Result};
use catalog::{Catalog, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use posters::{PosterConfig, PosterResolver};
use recommender::{DEFAULT_RECOMMENDATION_COUNT, Recommendation, RecommendError, Recommender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Movie Recs - similar-movie recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommend similar movies from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory containing movies.json and similarity.txt
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Title to get recommendations for (case-insensitive exact match)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_COUNT)]
        count: usize,
    },

    /// List the titles in the catalog
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of titles to show
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Resolve the poster URL of a single movie
    Poster {
        /// Metadata-service id of the movie
        #[arg(long)]
        movie_id: MovieId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { title, count } => {
            let catalog = load_catalog(&cli.data_dir)?;
            handle_recommend(catalog, &title, count, build_resolver).await?
        }
        Commands::Titles { search, limit } => {
            let catalog = load_catalog(&cli.data_dir)?;
            handle_titles(&catalog, search.as_deref(), limit)
        }
        Commands::Poster { movie_id } => handle_poster(movie_id).await?,
    }

    Ok(())
}

fn load_catalog(data_dir: &Path) -> Result<Arc<Catalog>> {
    println!("Loading catalog from {}...", data_dir.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_dir(data_dir).context("Failed to load movie catalog")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(Arc::new(catalog))
}

fn build_resolver() -> Result<PosterResolver> {
    let config = PosterConfig::from_env().context("Set TMDB_API_KEY to fetch posters")?;
    info!(
        "Using metadata service at {} ({} attempts per poster)",
        config.api_base_url, config.max_retries
    );
    PosterResolver::from_config(&config).context("Failed to create metadata client")
}

/// Handle the 'recommend' command
///
/// The title is checked before `make_resolver` runs, so an unknown title
/// is reported even when the metadata service isn't configured.
async fn handle_recommend<F>(
    catalog: Arc<Catalog>,
    title: &str,
    count: usize,
    make_resolver: F,
) -> Result<()>
where
    F: FnOnce() -> Result<PosterResolver>,
{
    if catalog.find_by_title(title).is_none() {
        println!("{}", RecommendError::NotFound(title.to_string()).to_string().red());
        return Ok(());
    }

    let recommender = Recommender::new(catalog, make_resolver()?);

    match recommender.recommend(title, count).await {
        Ok(recommendations) => print_recommendations(title, &recommendations),
        Err(e @ RecommendError::NotFound(_)) => println!("{}", e.to_string().red()),
    }
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(catalog: &Catalog, search: Option<&str>, limit: usize) {
    let titles: Vec<&str> = match search {
        Some(fragment) => catalog
            .search(fragment)
            .into_iter()
            .map(|e| e.title.as_str())
            .collect(),
        None => catalog.all_titles(),
    };

    println!("{}", format!("{} titles:", titles.len()).bold().blue());
    for title in titles.iter().take(limit) {
        println!("  {}", title);
    }
    if titles.len() > limit {
        println!("  ... and {} more", titles.len() - limit);
    }
}

/// Handle the 'poster' command
async fn handle_poster(movie_id: MovieId) -> Result<()> {
    let resolver = build_resolver()?;
    let url = resolver.resolve(movie_id).await;
    println!("{}: {}", movie_id, url);
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[Recommendation]) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    if recommendations.is_empty() {
        println!("  (no other movies in the catalog)");
    }
    for (idx, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Similarity: {:.3}",
            (idx + 1).to_string().green(),
            rec.title,
            rec.score
        );
        println!("   Poster: {}", rec.poster_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::SimilarityMatrix;

    fn sample_catalog() -> Arc<Catalog> {
        let similarity =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.4], vec![0.4, 1.0]]).unwrap();
        let catalog = Catalog::from_movies(
            vec![(19995, "Avatar".to_string()), (597, "Titanic".to_string())],
            similarity,
        )
        .unwrap();
        Arc::new(catalog)
    }

    #[tokio::test]
    async fn test_unknown_title_does_not_need_metadata_config() {
        let result = handle_recommend(sample_catalog(), "Nonexistent Movie", 5, || {
            Err(anyhow::anyhow!("TMDB_API_KEY is not set"))
        })
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_known_title_requires_metadata_config() {
        let result = handle_recommend(sample_catalog(), "avatar", 5, || {
            Err(anyhow::anyhow!("TMDB_API_KEY is not set"))
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("TMDB_API_KEY"));
    }
}
