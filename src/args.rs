use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Models that can be scheduled for a run.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// SEIR-C epidemic from a fixed initial state, reports I.
    Epidemic,
    /// SEIR-C epidemic from a randomly drawn initial state, reports (I, E).
    EpidemicRandom,
    /// Two-colony honeybee and mite model, reports both mite populations.
    Apiary,
    /// Laub-Loomis oscillator, reports (x1, x2).
    Oscillator,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, name = "stepwise")]
pub struct Args {
    /// Path to settings (yaml file).
    #[clap(long)]
    pub settings: Option<String>,

    /// Path to a run schedule (csv file, `model;steps`).
    #[clap(long)]
    pub schedule: Option<String>,

    /// Models to run; replaces the schedule from settings.
    #[clap(long, short, value_enum)]
    pub model: Vec<ModelKind>,

    /// Step counts for the selected models (comma separated).
    #[clap(long, short, value_delimiter = ',')]
    pub steps: Vec<usize>,

    /// Seed for the random number generator.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Output format.
    #[clap(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to log file. Logs to stderr if omitted.
    #[clap(long)]
    pub log_file: Option<String>,

    /// Verbosity of the logger.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
