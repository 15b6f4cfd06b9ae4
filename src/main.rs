use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time::Instant,
};

use log::info;

use tsp_lab_core::{
    logging, parse_tsp_file, parse_tsp_reader, run_algorithm, tour_metrics, Result, SolverOptions,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    let instance = if options.input.is_empty() {
        parse_tsp_reader(io::stdin().lock())?
    } else {
        parse_tsp_file(&options.input)?
    };

    info!(
        "input: name={} n={} large={}",
        instance.name(),
        instance.dimension(),
        instance.is_large()
    );

    let report = run_algorithm(options.algorithm, &instance, &options.search_budget())?;

    write_tour(&options.output, &report.solution.tour)?;

    info!(
        "output: algorithm={} cost={:.2} time={:.2}s",
        report.algorithm.as_str(),
        report.solution.cost,
        now.elapsed().as_secs_f32()
    );

    tour_metrics(&instance, &report.solution.tour);

    Ok(())
}

fn write_tour(output: &str, tour: &[usize]) -> Result<()> {
    if output.is_empty() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for point in tour {
            writeln!(out, "{point}")?;
        }
    } else {
        let mut out = BufWriter::new(File::create(output)?);
        for point in tour {
            writeln!(out, "{point}")?;
        }
    }
    Ok(())
}
