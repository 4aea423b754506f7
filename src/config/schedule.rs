use csv;
use phf::phf_map;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::BufReader;

use crate::args::ModelKind;

/// Step counts evaluated for each model when none are given.
pub static DEFAULT_STEPS: phf::Map<&'static str, &[usize]> = phf_map! {
    "epidemic" => EPIDEMIC_STEPS,
    "epidemic-random" => EPIDEMIC_STEPS,
    "apiary" => APIARY_STEPS,
    "oscillator" => OSCILLATOR_STEPS,
};

const EPIDEMIC_STEPS: &[usize] = &[5, 10, 15, 25, 30];
const APIARY_STEPS: &[usize] = &[20, 40, 60, 80, 100];
const OSCILLATOR_STEPS: &[usize] = &[200];

/// Models run by the default schedule, in order.
const DEFAULT_MODELS: &[ModelKind] = &[ModelKind::Epidemic, ModelKind::Apiary, ModelKind::Oscillator];

pub fn default_steps(model: ModelKind) -> &'static [usize] {
    DEFAULT_STEPS
        .get(model.as_str())
        .copied()
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScheduleRecord {
    pub model: ModelKind,
    pub steps: usize,
}

impl ScheduleRecord {
    pub fn new(model: ModelKind, steps: usize) -> Self {
        Self { model, steps }
    }
}

/// Ordered list of runs to evaluate.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    table: Vec<ScheduleRecord>,
}

#[derive(Debug)]
pub enum ScheduleError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl std::error::Error for ScheduleError {}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::IoError(error) => write!(formatter, "IO error: {}", error),
            ScheduleError::CsvError(error) => write!(formatter, "CSV error: {}", error),
        }
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.table.len()))?;
        for record in &self.table {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let table: Vec<ScheduleRecord> = Vec::<ScheduleRecord>::deserialize(deserializer)?;
        Ok(Self::from_vec(table))
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::for_models(DEFAULT_MODELS, &[])
    }
}

impl Schedule {
    pub fn read(filename: &str) -> Result<Self, ScheduleError> {
        let mut reader = BufReader::new(File::open(filename).map_err(ScheduleError::IoError)?);
        Schedule::from_reader(&mut reader)
    }

    pub fn from_reader(reader: &mut dyn std::io::Read) -> Result<Self, ScheduleError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let table: Vec<ScheduleRecord> = reader
            .deserialize()
            .collect::<Result<Vec<ScheduleRecord>, csv::Error>>()
            .map_err(ScheduleError::CsvError)?;

        Ok(Self::from_vec(table))
    }

    pub fn from_vec(table: Vec<ScheduleRecord>) -> Self {
        Self { table }
    }

    /// Schedule every model in `models` at `steps`, or at its default step counts if `steps` is
    /// empty.
    pub fn for_models(models: &[ModelKind], steps: &[usize]) -> Self {
        let table = models
            .iter()
            .flat_map(|&model| {
                let steps = if steps.is_empty() {
                    default_steps(model)
                } else {
                    steps
                };
                steps.iter().map(move |&n| ScheduleRecord::new(model, n))
            })
            .collect();
        Self { table }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleRecord> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_driver() {
        let schedule = Schedule::default();
        let records: Vec<(ModelKind, usize)> =
            schedule.iter().map(|r| (r.model, r.steps)).collect();
        assert_eq!(
            records,
            vec![
                (ModelKind::Epidemic, 5),
                (ModelKind::Epidemic, 10),
                (ModelKind::Epidemic, 15),
                (ModelKind::Epidemic, 25),
                (ModelKind::Epidemic, 30),
                (ModelKind::Apiary, 20),
                (ModelKind::Apiary, 40),
                (ModelKind::Apiary, 60),
                (ModelKind::Apiary, 80),
                (ModelKind::Apiary, 100),
                (ModelKind::Oscillator, 200),
            ]
        );
    }

    #[test]
    fn every_model_has_default_steps() {
        for model in ModelKind::ALL {
            assert!(!default_steps(model).is_empty(), "{model}");
        }
    }

    #[test]
    fn explicit_steps_override_defaults() {
        let schedule = Schedule::for_models(&[ModelKind::Oscillator, ModelKind::Apiary], &[1, 2]);
        assert_eq!(
            schedule,
            Schedule::from_vec(vec![
                ScheduleRecord::new(ModelKind::Oscillator, 1),
                ScheduleRecord::new(ModelKind::Oscillator, 2),
                ScheduleRecord::new(ModelKind::Apiary, 1),
                ScheduleRecord::new(ModelKind::Apiary, 2),
            ])
        );
    }

    #[test]
    fn read_csv() {
        let input = "model;steps\nepidemic-random; 10\noscillator;200\n";
        let schedule = Schedule::from_reader(&mut input.as_bytes()).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule.iter().next(),
            Some(&ScheduleRecord::new(ModelKind::EpidemicRandom, 10))
        );
    }

    #[test]
    fn read_csv_rejects_unknown_model() {
        let input = "model;steps\nlorenz;10\n";
        assert!(matches!(
            Schedule::from_reader(&mut input.as_bytes()),
            Err(ScheduleError::CsvError(_))
        ));
    }

    #[test]
    fn read_missing_file() {
        assert!(matches!(
            Schedule::read("/nonexistent/schedule.csv"),
            Err(ScheduleError::IoError(_))
        ));
    }
}
