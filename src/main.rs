use std::sync::Arc;

use clap::Parser;

use wayphrase_core::place::{Coordinate, PlaceSeed};
use wayphrase_core::security::ApiKey;
use wayphrase_engine::AppController;
use wayphrase_llm::{GeminiProvider, TextGenProvider};
use wayphrase_telemetry::{init_telemetry, TelemetryConfig};

/// Command-line driver for the phrase pipeline. Stands in for the browser
/// shell: places arrive as arguments instead of map clicks, results go to
/// stdout instead of cards.
#[derive(Parser)]
#[command(name = "wayphrase", about = "Generate AI travel phrases for selected places")]
struct Cli {
    /// Gemini API key. Held in memory only; sent nowhere but the Gemini API.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Gemini model to call.
    #[arg(long, default_value = "gemini-2.5-flash")]
    model: String,

    /// Emit JSON logs instead of the human-readable format.
    #[arg(long)]
    json_logs: bool,

    /// Places as NAME@LAT,LNG[,COUNTRY], e.g. "Blue Bottle Shibuya@35.66,139.70,JP".
    #[arg(required = true, value_name = "PLACE")]
    places: Vec<String>,
}

fn parse_place(raw: &str) -> Result<PlaceSeed, String> {
    let (name, rest) = raw
        .rsplit_once('@')
        .ok_or_else(|| "expected NAME@LAT,LNG[,COUNTRY]".to_string())?;
    if name.is_empty() {
        return Err("place name is empty".into());
    }

    let mut fields = rest.split(',');
    let lat = fields
        .next()
        .ok_or_else(|| "missing latitude".to_string())?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad latitude: {e}"))?;
    let lng = fields
        .next()
        .ok_or_else(|| "missing longitude".to_string())?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad longitude: {e}"))?;
    let country_code = fields.next().unwrap_or("").trim().to_string();
    if fields.next().is_some() {
        return Err("too many fields after the coordinate".into());
    }

    Ok(PlaceSeed {
        name: name.to_string(),
        address: String::new(),
        location: Coordinate { lat, lng },
        country_code,
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_telemetry(TelemetryConfig {
        json_output: cli.json_logs,
        ..TelemetryConfig::default()
    });

    let mut seeds = Vec::new();
    for raw in &cli.places {
        match parse_place(raw) {
            Ok(seed) => seeds.push(seed),
            Err(err) => {
                eprintln!("invalid place '{raw}': {err}");
                std::process::exit(2);
            }
        }
    }

    let model = cli.model.clone();
    let controller = AppController::new(Box::new(move |key| {
        Arc::new(GeminiProvider::with_model(key, &model)) as Arc<dyn TextGenProvider>
    }));

    if controller.set_credential(ApiKey::new(cli.api_key)).is_err() {
        eprintln!("a non-empty Gemini API key is required (--api-key or GEMINI_API_KEY)");
        std::process::exit(2);
    }

    for seed in seeds {
        let place = controller.add_place(seed);
        tracing::info!(id = %place.id, name = %place.name, "place selected");
    }

    if let Err(err) = controller.generate().await {
        eprintln!("generation failed: {err}");
        std::process::exit(1);
    }

    let snapshot = controller.snapshot();

    // Render in selection order, successes only; failed places appear in
    // the aggregate error instead.
    let results: Vec<serde_json::Value> = snapshot
        .places
        .iter()
        .filter_map(|place| {
            snapshot.phrases.get(&place.id).map(|phrases| {
                serde_json::json!({
                    "id": place.id,
                    "name": place.name,
                    "country_code": place.country_code,
                    "phrases": phrases,
                })
            })
        })
        .collect();

    let report = serde_json::json!({
        "places": results,
        "error": snapshot.error,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );

    if snapshot.error.is_some() && snapshot.phrases.is_empty() {
        std::process::exit(1);
    }
}
