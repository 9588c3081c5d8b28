use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use facefit_core::{FilterCriteria, FrameColor, FrameShape, Prescription, Product};
use facefit_engine::{load_catalog, Config, Engine};
use facefit_vision::{ImageSource, LandmarkProvider, StaticLandmarkProvider};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facefit", about = "Face-shape classification and frame recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog frames for the face in a photo
    Recommend {
        #[command(flatten)]
        input: InputArgs,
        /// Catalog export (JSON array of products)
        #[arg(short, long)]
        catalog: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Only print the best N matches
        #[arg(long)]
        top: Option<usize>,
    },
    /// Classify the face shape in a photo
    Classify {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the face/frame affinity table in effect
    Affinity,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Photo on disk
    #[arg(long)]
    image: Option<PathBuf>,
    /// Photo URL, fetched by the landmark provider
    #[arg(long)]
    url: Option<String>,
    /// File holding a `data:image/...;base64,` webcam capture
    #[arg(long)]
    data_url: Option<PathBuf>,
    /// Previously detected landmarks (JSON); skips the landmark provider
    #[arg(long)]
    landmarks: Option<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    /// Storefront filter JSON; flags below are applied on top
    #[arg(long)]
    filters: Option<PathBuf>,
    /// Only prescription-capable frames
    #[arg(long)]
    prescription: bool,
    /// Allowed frame shape (repeatable)
    #[arg(long = "shape")]
    shapes: Vec<FrameShape>,
    /// Allowed frame colour (repeatable)
    #[arg(long = "color")]
    colors: Vec<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// Minimum shopper rating (0-5)
    #[arg(long)]
    min_rating: Option<f64>,
}

impl FilterArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = match &self.filters {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading filters {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing filters {}", path.display()))?
            }
            None => FilterCriteria::default(),
        };

        if self.prescription {
            criteria.prescription = Prescription::Required;
        }
        criteria.shapes.extend(self.shapes.iter().copied());
        criteria
            .colors
            .extend(self.colors.iter().map(|c| FrameColor::new(c)));
        if self.min_price.is_some() {
            criteria.price_min = self.min_price;
        }
        if self.max_price.is_some() {
            criteria.price_max = self.max_price;
        }
        if self.min_rating.is_some() {
            criteria.min_rating = self.min_rating;
        }
        Ok(criteria)
    }
}

impl InputArgs {
    fn source(&self) -> Result<ImageSource> {
        if let Some(path) = &self.image {
            return ImageSource::from_path(path)
                .with_context(|| format!("reading image {}", path.display()));
        }
        if let Some(url) = &self.url {
            return Ok(ImageSource::Url(url.clone()));
        }
        if let Some(path) = &self.data_url {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading data URL {}", path.display()))?;
            return Ok(ImageSource::from_data_url(&raw)?);
        }
        // Landmark files bypass the provider; the source is never inspected.
        Ok(ImageSource::Bytes(Vec::new()))
    }
}

async fn recommend<P: LandmarkProvider>(
    engine: &Engine<P>,
    source: &ImageSource,
    criteria: &FilterCriteria,
    catalog: &[Product],
    top: Option<usize>,
) -> Result<()> {
    let cancel = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let result = engine
        .recommend_until(source, criteria, catalog, cancel)
        .await?;

    if result.is_empty() {
        tracing::info!(face_shape = %result.face_shape, "no frames match the current filters");
    }

    let shown = top.map_or(&result.recommendations[..], |n| result.top(n));
    let out = serde_json::json!({
        "face_shape": result.face_shape,
        "total_matches": result.len(),
        "recommendations": shown,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn classify<P: LandmarkProvider>(engine: &Engine<P>, source: &ImageSource) -> Result<()> {
    let analysis = engine.classify(source).await?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Recommend {
            input,
            catalog,
            filters,
            top,
        } => {
            let criteria = filters.criteria()?;
            let catalog = load_catalog(&catalog)
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            let source = input.source()?;

            match &input.landmarks {
                Some(path) => {
                    let engine = Engine::new(
                        StaticLandmarkProvider::from_json_file(path)?,
                        config.load_tuning()?,
                        config.detect_timeout(),
                    );
                    recommend(&engine, &source, &criteria, &catalog, top).await?;
                }
                None => {
                    let engine = config.http_engine()?;
                    recommend(&engine, &source, &criteria, &catalog, top).await?;
                }
            }
        }
        Commands::Classify { input } => {
            let source = input.source()?;
            match &input.landmarks {
                Some(path) => {
                    let engine = Engine::new(
                        StaticLandmarkProvider::from_json_file(path)?,
                        config.load_tuning()?,
                        config.detect_timeout(),
                    );
                    classify(&engine, &source).await?;
                }
                None => {
                    let engine = config.http_engine()?;
                    classify(&engine, &source).await?;
                }
            }
        }
        Commands::Affinity => {
            let tuning = config.load_tuning()?;
            println!("{}", serde_json::to_string_pretty(&tuning.affinity)?);
        }
    }

    Ok(())
}
