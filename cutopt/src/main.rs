use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use cutopt::config::CutOptConfig;
use cutopt::io::cli::{Cli, ProblemVariant};
use cutopt::io::output::{BarOutput, PlaneOutput};
use cutopt::run::{run_bar, run_plane};
use cutopt::{EPOCH, io};
use cutstock::io::svg::{bars_to_svg, layout_to_svg};
use cutstock::probs::bar::io::ext_repr::ExtBarRequest;
use cutstock::probs::plane::io::ext_repr::ExtPlaneRequest;
use log::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CutOptConfig::default()
        }
        Some(config_file) => {
            io::read_json(&config_file).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed CutOptConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no usable name")?
        .to_string();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).context(format!(
            "could not create solution folder: {:?}",
            args.solution_folder
        ))?;
    }

    match args.prob_var {
        ProblemVariant::Bar => {
            let request = io::read_json(args.input_file.as_path())?;
            main_bar(request, config, &input_file_stem, args.solution_folder)
        }
        ProblemVariant::Plane => {
            let request = io::read_json(args.input_file.as_path())?;
            main_plane(request, config, &input_file_stem, args.solution_folder)
        }
    }
}

fn main_bar(
    request: ExtBarRequest,
    config: CutOptConfig,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    let run = run_bar(&request, &config)?;

    {
        let svg_path = output_folder.join(format!("sol_{input_stem}.svg"));
        let svg = bars_to_svg(
            &run.solution.bars,
            &run.instance,
            config.svg_draw_options,
            input_stem,
        )?;

        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    {
        let output = BarOutput {
            request,
            solution: run.ext_solution,
            config,
        };

        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    info!(
        "[MAIN] finished in {:.3}s",
        EPOCH.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main_plane(
    request: ExtPlaneRequest,
    config: CutOptConfig,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    let run = run_plane(&request, &config)?;

    for (i, layout) in run.solution.layouts.iter().enumerate() {
        let svg_path = output_folder.join(format!("sol_{input_stem}_{i}.svg"));
        let title = format!("{input_stem} | bin {i} | {}", run.strategy);
        let svg = layout_to_svg(layout, &run.instance, config.svg_draw_options, &title);

        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    {
        let output = PlaneOutput {
            request,
            solution: run.ext_solution,
            config,
        };

        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    info!(
        "[MAIN] finished in {:.3}s",
        EPOCH.elapsed().as_secs_f64()
    );
    Ok(())
}
