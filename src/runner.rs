use anyhow::Result;

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

use crate::args::{Args, OutputFormat};
use crate::config::{Schedule, Settings};
use crate::models::Outcome;
use crate::readwrite::{CsvReportWriter, ReportWriter, TextReportWriter};

pub struct Runner {
    settings: Settings,
    format: OutputFormat,
    rng: StdRng,
}

impl Runner {
    pub fn new(args: &Args) -> Result<Runner> {
        let settings = Self::merge_settings(args)?;
        log::info!("Running with settings\n{}", settings);
        Ok(Self::from_settings(settings, args.format))
    }

    /// Combine the settings file with the command line.
    ///
    /// `--schedule` replaces the schedule of the settings file, `--model` replaces either, and
    /// `--seed` replaces the seed. `--steps` only applies together with `--model`.
    fn merge_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.settings {
            Some(path) => Self::load_settings(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &args.schedule {
            settings.schedule = Schedule::read(path)?;
        }
        if !args.model.is_empty() {
            settings.schedule = Schedule::for_models(&args.model, &args.steps);
        } else if !args.steps.is_empty() {
            log::warn!("Ignoring --steps without --model.");
        }
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        Ok(settings)
    }

    pub fn from_settings(settings: Settings, format: OutputFormat) -> Runner {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            settings,
            format,
            rng,
        }
    }

    /// Evaluate the schedule and report to stdout.
    pub fn start(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut writer: Box<dyn ReportWriter> = match self.format {
            OutputFormat::Text => Box::new(TextReportWriter::new(stdout.lock())),
            OutputFormat::Csv => Box::new(CsvReportWriter::new(stdout.lock())?),
        };
        self.run(writer.as_mut())?;
        writer.finish()?;
        log::info!("Finished {} runs.", self.settings.schedule.len());
        Ok(())
    }

    /// Evaluate every scheduled run in order, passing each outcome to `writer`.
    pub fn run(&mut self, writer: &mut dyn ReportWriter) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(self.settings.schedule.len());
        let mut described = Vec::new();

        for record in self.settings.schedule.iter() {
            if !described.contains(&record.model) {
                log::debug!("Parameters of {}:\n{}", record.model, record.model.describe());
                described.push(record.model);
            }

            let outcome = record.model.evaluate(record.steps, &mut self.rng)?;
            log::info!(
                "model={} steps={} values={:?}",
                outcome.model,
                outcome.steps,
                outcome.values
            );
            writer.write(&outcome)?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Setup logging level and file
    pub fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        match &args.log_file {
            Some(log_file) => {
                simple_logging::log_to_file(log_file.as_str(), log_level).unwrap_or_else(|_| {
                    eprintln!("Unable to open log file.");
                    std::process::exit(1);
                })
            }
            None => simple_logging::log_to_stderr(log_level),
        }
    }

    /// Load settings from file
    fn load_settings(path: &str) -> Result<Settings> {
        let settings: Settings = Settings::read_from_file(path)?;
        log::info!("Loaded settings from {}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ModelKind;
    use crate::config::ScheduleRecord;
    use crate::models::{Apiary, Epidemic, LaubLoomis};
    use clap::Parser;
    use std::fs;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("stepwise").chain(arguments.iter().copied())).unwrap()
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("stepwise-runner-{}-{name}", std::process::id()))
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn no_arguments_use_default_settings() {
        let settings = Runner::merge_settings(&parse(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn model_replaces_schedule_with_default_steps() {
        let settings = Runner::merge_settings(&parse(&["--model", "oscillator"])).unwrap();
        assert_eq!(
            settings.schedule,
            Schedule::from_vec(vec![ScheduleRecord::new(ModelKind::Oscillator, 200)])
        );
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn model_with_steps_and_seed() {
        let args = parse(&[
            "--model",
            "apiary",
            "--model",
            "epidemic-random",
            "--steps",
            "3,7",
            "--seed",
            "11",
        ]);
        let settings = Runner::merge_settings(&args).unwrap();
        assert_eq!(
            settings.schedule,
            Schedule::from_vec(vec![
                ScheduleRecord::new(ModelKind::Apiary, 3),
                ScheduleRecord::new(ModelKind::Apiary, 7),
                ScheduleRecord::new(ModelKind::EpidemicRandom, 3),
                ScheduleRecord::new(ModelKind::EpidemicRandom, 7),
            ])
        );
        assert_eq!(settings.seed, Some(11));
    }

    #[test]
    fn steps_without_model_are_ignored() {
        let settings = Runner::merge_settings(&parse(&["--steps", "1,2"])).unwrap();
        assert_eq!(settings.schedule, Schedule::default());
    }

    #[test]
    fn schedule_file_replaces_settings_schedule() {
        let settings_path = temp_path("settings.yaml");
        let schedule_path = temp_path("schedule.csv");
        Settings {
            seed: Some(5),
            schedule: Schedule::for_models(&[ModelKind::Apiary], &[1]),
        }
        .write_to_file(&settings_path)
        .unwrap();
        fs::write(&schedule_path, "model;steps\nepidemic;2\n").unwrap();

        let settings = Runner::merge_settings(&parse(&[
            "--settings",
            &settings_path,
            "--schedule",
            &schedule_path,
        ]))
        .unwrap();
        assert_eq!(
            settings.schedule,
            Schedule::from_vec(vec![ScheduleRecord::new(ModelKind::Epidemic, 2)])
        );
        assert_eq!(settings.seed, Some(5));

        // --model and --seed take precedence over both files
        let settings = Runner::merge_settings(&parse(&[
            "--settings",
            &settings_path,
            "--schedule",
            &schedule_path,
            "--model",
            "oscillator",
            "--steps",
            "4",
            "--seed",
            "6",
        ]))
        .unwrap();
        assert_eq!(
            settings.schedule,
            Schedule::from_vec(vec![ScheduleRecord::new(ModelKind::Oscillator, 4)])
        );
        assert_eq!(settings.seed, Some(6));

        fs::remove_file(&settings_path).unwrap();
        fs::remove_file(&schedule_path).unwrap();
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        assert!(Runner::merge_settings(&parse(&["--settings", "/nonexistent/settings.yaml"])).is_err());
    }

    #[test]
    fn new_uses_format_from_arguments() {
        let runner = Runner::new(&parse(&["--format", "csv", "--seed", "1"])).unwrap();
        assert_eq!(runner.format, OutputFormat::Csv);
        assert_eq!(runner.settings.seed, Some(1));
    }

    #[test]
    fn default_schedule_reproduces_driver_output() {
        let mut runner = Runner::from_settings(Settings::default(), OutputFormat::Text);
        let mut writer = TextReportWriter::new(Vec::new());
        let outcomes = runner.run(&mut writer).unwrap();

        assert_eq!(outcomes.len(), 11);
        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(
            lines[0],
            format!("epidemic 5 {}", Epidemic::run_deterministic(5))
        );
        let (z1, z2) = Apiary::reference().run(20);
        assert_eq!(lines[5], format!("apiary 20 ({z1}, {z2})"));
        let (x1, x2) = LaubLoomis::reference().run(200);
        assert_eq!(lines[10], format!("oscillator 200 ({x1}, {x2})"));
    }

    #[test]
    fn seeded_random_runs_are_reproducible() {
        let settings = Settings {
            seed: Some(1234),
            schedule: Schedule::for_models(&[ModelKind::EpidemicRandom], &[]),
        };
        let run = |settings: Settings| {
            let mut runner = Runner::from_settings(settings, OutputFormat::Csv);
            let mut writer = CsvReportWriter::new(Vec::new()).unwrap();
            runner.run(&mut writer).unwrap()
        };
        let first = run(settings.clone());
        let second = run(settings);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|outcome| outcome.values.len() == 2));
    }

    #[test]
    fn runs_follow_schedule_order() {
        let settings = Settings {
            seed: Some(0),
            schedule: Schedule::from_vec(vec![
                ScheduleRecord::new(ModelKind::Oscillator, 0),
                ScheduleRecord::new(ModelKind::Epidemic, 0),
            ]),
        };
        let mut runner = Runner::from_settings(settings, OutputFormat::Text);
        let mut writer = TextReportWriter::new(Vec::new());
        let outcomes = runner.run(&mut writer).unwrap();
        assert_eq!(outcomes[0].values, vec![("x1", 1.1), ("x2", 0.95)]);
        assert_eq!(outcomes[1].values, vec![("I", 0.02)]);
    }
}
