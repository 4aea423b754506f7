use itertools::Itertools;
use std::io;

use crate::models::Outcome;

pub trait ReportWriter {
    fn write(&mut self, outcome: &Outcome) -> Result<(), io::Error>;

    /// Flush buffered output. Called once after the last outcome.
    fn finish(&mut self) -> Result<(), io::Error>;
}

/// Plain text, one line per outcome: `<model> <steps> <values>`.
///
/// A single observable is printed bare, several are printed as a tuple.
pub struct TextReportWriter<W: io::Write> {
    writer: W,
}

impl<W: io::Write> TextReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ReportWriter for TextReportWriter<W> {
    fn write(&mut self, outcome: &Outcome) -> Result<(), io::Error> {
        let values = match outcome.values.as_slice() {
            [(_, value)] => format!("{value}"),
            values => format!("({})", values.iter().map(|(_, value)| value).join(", ")),
        };
        writeln!(self.writer, "{} {} {}", outcome.model, outcome.steps, values)
    }

    fn finish(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }
}

/// Long-format csv with the columns `model,steps,observable,value`.
pub struct CsvReportWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvReportWriter<W> {
    pub fn new(writer: W) -> Result<Self, io::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(["model", "steps", "observable", "value"])?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

impl<W: io::Write> ReportWriter for CsvReportWriter<W> {
    fn write(&mut self, outcome: &Outcome) -> Result<(), io::Error> {
        let model = outcome.model.as_str();
        let steps = outcome.steps.to_string();
        for (observable, value) in &outcome.values {
            self.writer
                .write_record([model, steps.as_str(), *observable, value.to_string().as_str()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }
}
