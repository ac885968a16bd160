mod app;
mod chart;
mod color;
mod config;
mod data;
mod pipeline;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use chart::{render_errorbar_chart, Output};
use config::ViewerConfig;
use data::loader;
use pipeline::PlotSettings;
use state::AppState;

const USAGE: &str = "usage: lightcurve-viewer [<light-curve file> [<config.json>]]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let data_path = args.next().map(PathBuf::from);
    if data_path
        .as_deref()
        .is_some_and(|p| p == Path::new("-h") || p == Path::new("--help"))
    {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match args.next() {
        Some(path) => ViewerConfig::from_file(Path::new(&path))?,
        None => ViewerConfig::default(),
    };
    let settings = PlotSettings::from(&config);

    let output = resolve_output(data_path.as_deref(), &config)?;
    let Some(data_path) = data_path else {
        log::info!("No light curve given, opening an empty viewer");
        return run_window(AppState::new(settings));
    };

    let table = loader::load(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;

    match output {
        Output::File(_) => {
            let (cols, style) = pipeline::prepare(&table, &settings);
            render_errorbar_chart(
                &cols.time,
                &cols.magnitude,
                &cols.magnitude_error,
                &style,
                &output,
            )?;
            Ok(())
        }
        // Window output opens the full viewer with the table loaded.
        Output::Window => {
            let mut state = AppState::new(settings);
            state.set_table(table);
            run_window(state)
        }
    }
}

/// File output when the config names one, otherwise the window. A file
/// output needs a light curve to draw.
fn resolve_output(data_path: Option<&Path>, config: &ViewerConfig) -> Result<Output> {
    match (&config.output, data_path) {
        (Some(out), None) => bail!(
            "config sets output {} but no light curve was given\n{USAGE}",
            out.display()
        ),
        (Some(out), Some(_)) => Ok(Output::File(out.clone())),
        (None, _) => Ok(Output::Window),
    }
}

fn run_window(state: AppState) -> Result<()> {
    app::run(state).map_err(|e| anyhow!("viewer window: {e}"))
}
