use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Request to solve, as it would be posted to `/cut/bar` or `/cut/plane`
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    #[arg(value_enum)]
    pub prob_var: ProblemVariant,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum ProblemVariant {
    /// One-dimensional cutting of lengths from bars
    Bar,
    /// Two-dimensional packing of rectangles onto sheets
    Plane,
}
