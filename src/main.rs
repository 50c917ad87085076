use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use profit_chart::config::Settings;
use profit_chart::models::{ChartOptions, ChartPayload};
use profit_chart::render::OutputFormat;
use profit_chart::services::{chart_service, payload_service};
use profit_chart::utils::ChartError;

/// Read the payload from a URL/fragment argument, a JSON file, or stdin (`-` or no argument)
fn read_payload(input: Option<&str>) -> Result<ChartPayload, ChartError> {
    match input {
        None | Some("-") => {
            debug!("Reading chart JSON from stdin");
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            payload_service::parse_payload(&json)
        }
        Some(arg) if Path::new(arg).is_file() => {
            debug!("Reading chart JSON from {}", arg);
            payload_service::parse_payload(&fs::read_to_string(arg)?)
        }
        Some(arg) => payload_service::decode_fragment(payload_service::fragment_of(arg)),
    }
}

/// `<botName or baseAsset>.<ext>` with path-unsafe characters replaced
fn default_output_path(payload: &ChartPayload, format: OutputFormat) -> PathBuf {
    let name = payload.bot_name.as_deref().unwrap_or(&payload.base_asset);
    let safe: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    let stem = if safe.trim_matches('.').is_empty() { "profit_chart".to_string() } else { safe };
    PathBuf::from(format!("{}.{}", stem, format.extension()))
}

fn run() -> Result<PathBuf, ChartError> {
    let settings = Settings::from_env()?;
    let input = std::env::args().nth(1);
    let payload = read_payload(input.as_deref())?;

    let options = ChartOptions {
        shadow_color: settings.shadow_color,
        ..ChartOptions::default()
    };
    let output = chart_service::render_chart_with_options(&payload, &settings.target, options)?;

    let path = settings
        .output
        .unwrap_or_else(|| default_output_path(&payload, settings.target.format));
    fs::write(&path, &output.bytes)?;
    Ok(path)
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("profit_chart=debug".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting profit-chart...");
    match run() {
        Ok(path) => {
            info!("Profit chart written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render profit chart: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(bot_name: Option<&str>) -> ChartPayload {
        ChartPayload {
            base_asset: "USDT".to_string(),
            chart_data: Vec::new(),
            bot_name: bot_name.map(str::to_string),
        }
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(&payload(None), OutputFormat::Png),
            PathBuf::from("USDT.png")
        );
        assert_eq!(
            default_output_path(&payload(Some("hummingbot/HateGhoster 2")), OutputFormat::Svg),
            PathBuf::from("hummingbot_HateGhoster_2.svg")
        );
        assert_eq!(
            default_output_path(&payload(Some("..")), OutputFormat::Png),
            PathBuf::from("profit_chart.png")
        );
    }

    #[test]
    fn test_read_payload_from_url_argument() {
        let url = "http://localhost:8080#%7B%22baseAsset%22%3A%22BTC%22%2C%22chartData%22%3A%5B%5D%7D";
        let payload = read_payload(Some(url)).unwrap();
        assert_eq!(payload.base_asset, "BTC");
        assert!(payload.chart_data.is_empty());
    }

    #[test]
    fn test_read_payload_from_file() {
        let path = std::env::temp_dir().join(format!("profit_chart_test_{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"baseAsset":"SOL","chartData":[{"timestamp":1,"profit":"2"}]}"#).unwrap();
        let payload = read_payload(path.to_str());
        let _ = fs::remove_file(&path);
        assert_eq!(payload.unwrap().base_asset, "SOL");
    }
}
