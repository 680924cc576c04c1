mod cli;
mod scan_cmd;
mod shared;
mod strip_cmd;

use clap::Parser;
use cli::Cli;
use tablines_detect::RasterSettings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Scan {
            ref image,
            ref text_free,
            dpi,
            threshold,
            min_horizontal,
            min_vertical,
            canonical,
            snap_x,
            snap_y,
            ref overlay,
            ref format,
        } => {
            let settings = RasterSettings {
                intensity_threshold: threshold,
                min_horizontal_length: min_horizontal,
                min_vertical_length: min_vertical,
            };
            let canonical = canonical.then_some(scan_cmd::Canonicalize { snap_x, snap_y });
            scan_cmd::run(
                image,
                text_free.as_deref(),
                dpi,
                &settings,
                canonical,
                overlay.as_deref(),
                format,
            )
        }
        cli::Commands::StripText {
            ref file,
            page,
            ref output,
        } => strip_cmd::run(file, page, output),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
