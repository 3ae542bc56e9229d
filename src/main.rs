//! Command line front end: `octoplot <json_file> <limit>`.
//!
//! Loads an octree file, plots it to `octree_plot.png` and opens the image.
//! Whatever happens, the number of points visited is printed last.

use clap::Parser;
use octoplot::{
    load_tree, open_image, plot_tree, render_until, PlotSettings, Point, RecordingCanvas, RenderError,
    DEFAULT_DPI, DEFAULT_OUTPUT,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Plots the bounding boxes and points of a serialized octree.
#[derive(Parser, Debug)]
#[command(name = "octoplot", version)]
struct Args {
    /// Octree JSON file: a node object, or `null` for an empty tree.
    json_file: PathBuf,

    /// Every axis spans [-limit, +limit]; must be positive.
    #[arg(allow_negative_numbers = true)]
    limit: f64,

    /// Output image path.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output resolution in dots per inch.
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// Do not open the image after saving it.
    #[arg(long)]
    no_show: bool,

    /// Leave out axis panels, grid and tick labels.
    #[arg(long)]
    no_axes: bool,

    /// Walk the tree without drawing an image.
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn settings(&self) -> PlotSettings {
        PlotSettings {
            limit: self.limit,
            dpi: self.dpi,
            output: self.output.clone(),
            show_axes: !self.no_axes,
            ..PlotSettings::default()
        }
    }
}

/// Owns the visited points and prints their count when dropped.
#[derive(Default)]
struct PointReport {
    visited: Vec<Point>,
}

impl Drop for PointReport {
    fn drop(&mut self) {
        println!("Number of points: {}", self.visited.len());
    }
}

fn run(args: &Args, visited: &mut Vec<Point>, interrupt: &AtomicBool) -> Result<(), RenderError> {
    let settings = args.settings();
    settings.validate()?;

    let tree = load_tree(&args.json_file)?;
    if let Some(root) = &tree {
        log::debug!("{:?}", root.stats());
        root.validate()?;
    }

    if args.dry_run {
        let mut canvas = RecordingCanvas::new();
        render_until(tree.as_ref(), &mut canvas, visited, interrupt)?;
        println!("{} boxes, {} point markers", canvas.count_boxes(), canvas.count_points());
        return Ok(());
    }

    let path = plot_tree(tree.as_ref(), &settings, visited, interrupt)?;
    println!("Saved {}", path.display());

    if interrupt.load(Ordering::SeqCst) {
        return Err(RenderError::Interrupted);
    }
    if !args.no_show {
        open_image(&path)?;
    }
    Ok(())
}

fn execute(visited: &mut Vec<Point>) -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(2) } else { ExitCode::SUCCESS };
        }
    };

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("cannot install interrupt handler: {}", e);
    }

    match run(&args, visited, &interrupt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RenderError::Interrupted) => {
            println!("Interrupted by user");
            ExitCode::from(130)
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Created before argument parsing so the count is reported on every path.
    let mut report = PointReport::default();
    let code = execute(&mut report.visited);
    drop(report);
    code
}
