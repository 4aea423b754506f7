use clap::Parser;
use stepwise::args::Args;
use stepwise::runner::Runner;

fn main() {
    let args = Args::parse();
    Runner::setup_logger(&args);
    let result = Runner::new(&args).and_then(|mut runner| runner.start());
    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
