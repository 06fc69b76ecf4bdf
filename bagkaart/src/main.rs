use std::{path::PathBuf, process::ExitCode};

use bag::{config::DEFAULT_API_URL, ApiConfig, BoundingBox, Collection, HttpPageSource, PandenFilter};
use clap::{Parser, Subcommand};
use kaart::{actions, Alert, ViewerConfig, Viewport};
use rd::{LatLon, RdPoint};

mod shell;

#[derive(Debug, Parser)]
#[command(name = "bagkaart", about = "Browse and download BAG buildings by area or filter")]
struct Cli {
    /// Root of the BAG API, the collections live below it
    #[arg(long, env = "BAG_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Features per request when downloading
    #[arg(long, env = "BAG_PAGE_SIZE", default_value_t = bag::config::DOWNLOAD_PAGE_SIZE)]
    page_size: usize,

    /// Directory downloads are written to
    #[arg(long, env = "BAG_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download panden (buildings) as GeoJSON
    Panden {
        /// Municipality (woonplaats)
        #[arg(long, default_value = "")]
        gemeente: String,
        /// Four digit postcode
        #[arg(long, default_value = "")]
        postcode: String,
        /// xmin,ymin,xmax,ymax in RD
        #[arg(long)]
        bbox: Option<BoundingBox>,
        /// south,west,north,east in degrees, used when no other filter is given
        #[arg(long, default_value_t = Viewport::initial())]
        view: Viewport,
    },
    /// Download the verblijfsobjecten of one pand as GeoJSON
    Vbo { pand_id: String },
    /// Convert a single coordinate
    #[command(subcommand)]
    Convert(Convert),
    /// Interactive map session
    Shell,
}

#[derive(Debug, Subcommand)]
enum Convert {
    /// WGS84 to RD New
    ToRd { lat: f64, lon: f64 },
    /// RD New to WGS84
    ToWgs84 { x: f64, y: f64 },
}

impl Cli {
    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            api: ApiConfig {
                download_page_size: self.page_size,
                ..ApiConfig::default().with_base_url(&self.api_url)
            },
            out_dir: self.out_dir.clone(),
            ..ViewerConfig::default()
        }
    }
}

async fn run(cli: Cli) -> Result<String, Alert> {
    let config = cli.viewer_config();
    let transform = rd::default_transform().map_err(|e| Alert(e.to_string()))?;
    let source = HttpPageSource::new();

    match cli.command {
        Command::Panden {
            gemeente,
            postcode,
            bbox,
            view,
        } => {
            let filter = PandenFilter::new(&gemeente, &postcode, bbox);
            let outcome = actions::download_panden(
                &source,
                &config.api,
                &filter,
                || view.visible_bounds(transform.as_ref()),
                &config.out_dir,
            )
            .await;
            finish(outcome, &config.api, Collection::Panden)
        }
        Command::Vbo { pand_id } => {
            let outcome =
                actions::download_vbo(&source, &config.api, &pand_id, &config.out_dir).await;
            finish(outcome, &config.api, Collection::Verblijfsobjecten)
        }
        Command::Convert(Convert::ToRd { lat, lon }) => transform
            .geo_to_grid(LatLon::new(lat, lon))
            .map(|p| format!("{} {}", bag::bbox::round2(p.x), bag::bbox::round2(p.y)))
            .map_err(|e| Alert(e.to_string())),
        Command::Convert(Convert::ToWgs84 { x, y }) => transform
            .grid_to_geo(RdPoint::new(x, y))
            .map(|p| format!("{:.7} {:.7}", p.lat, p.lon))
            .map_err(|e| Alert(e.to_string())),
        Command::Shell => {
            shell::run(config, transform, source).await;
            Ok(String::new())
        }
    }
}

fn finish(
    outcome: Result<kaart::DownloadReport, kaart::ActionError>,
    api: &ApiConfig,
    collection: Collection,
) -> Result<String, Alert> {
    match outcome {
        Ok(report) => {
            log::info!("saved {}", report.path.display());
            Ok(Alert::downloaded(&report).0)
        }
        Err(e) => {
            log::error!("Download failed: {e}");
            Err(Alert::from_error(&e, api, collection))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match run(Cli::parse()).await {
        Ok(message) => {
            if !message.is_empty() {
                println!("{message}");
            }
            ExitCode::SUCCESS
        }
        Err(alert) => {
            eprintln!("{alert}");
            ExitCode::FAILURE
        }
    }
}
