//! Command-line interface for the SMOTE oversampler.
//!
//! The `run` command reads a JSON array of coordinate arrays or a GeoJSON
//! `FeatureCollection` and writes synthetic points in the same shape.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, InputFormat, RunCommand, render_summary, run_cli,
    write_summary,
};
