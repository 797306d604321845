use std::fs;
use std::path::PathBuf;

use chartboard::core::Snapshot;
use chartboard::render::SvgRenderer;
use chartboard::{ChartKind, Dashboard, DashboardConfig};

const DEFAULT_OUTPUT_ROOT: &str = "target/chartboard_svgs";

struct CliArgs {
    snapshot_path: PathBuf,
    metric: String,
    config_path: Option<PathBuf>,
    output_root: PathBuf,
}

fn main() {
    let _ = chartboard::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    let raw = fs::read_to_string(&args.snapshot_path).map_err(|err| {
        format!(
            "failed to read snapshot `{}`: {err}",
            args.snapshot_path.display()
        )
    })?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse snapshot json: {err}"))?;

    let mut dashboard = Dashboard::new(config).map_err(|err| err.to_string())?;
    // Failed boards are skipped; the drawn ones are still written.
    if let Err(err) = dashboard.process(Some(snapshot), Some(&args.metric), ChartKind::TimeSeries)
    {
        eprintln!("warning: {err}");
    }
    if let Err(err) = dashboard.process(None, None, ChartKind::Instant) {
        eprintln!("warning: {err}");
    }

    fs::create_dir_all(&args.output_root).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.output_root.display()
        )
    })?;

    let boards: Vec<String> = dashboard.board_names().map(str::to_owned).collect();
    for board in &boards {
        let exports = dashboard.exports(board).map_err(|err| err.to_string())?;
        let frame = dashboard
            .settled_frame(board)
            .map_err(|err| err.to_string())?;
        let document = SvgRenderer::serialize(&frame).map_err(|err| err.to_string())?;
        let path = args.output_root.join(&exports.svg_file_name);
        fs::write(&path, document)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
        println!("wrote {}", path.display());
    }

    println!("done: rendered {} board(s)", boards.len());
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut snapshot_path: Option<PathBuf> = None;
    let mut metric: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut output_root = PathBuf::from(DEFAULT_OUTPUT_ROOT);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--snapshot" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --snapshot".to_owned())?;
                snapshot_path = Some(PathBuf::from(value));
            }
            "--metric" => {
                metric = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --metric".to_owned())?,
                );
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output-root" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-root".to_owned())?;
                output_root = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        snapshot_path: snapshot_path
            .ok_or_else(|| format!("--snapshot is required\n\n{}", usage_message()))?,
        metric: metric.ok_or_else(|| format!("--metric is required\n\n{}", usage_message()))?,
        config_path,
        output_root,
    })
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --bin render_snapshot_svgs -- --snapshot <path> --metric <name> [options]\n\nOptions:\n  --snapshot <path>      Snapshot JSON: board -> metric -> series list\n  --metric <name>        Metric to draw on every board\n  --config <path>        Dashboard config JSON (default: built-in)\n  --output-root <path>   Directory for the .svg files (default: {DEFAULT_OUTPUT_ROOT})\n  -h, --help             Show this message"
    )
}
