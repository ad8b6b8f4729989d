use std::path::PathBuf;
use std::process::ExitCode;

use bluequee_reports::{init_tracing, run, ReportKind};

const USAGE: &str = "usage: bluequee-reports <clinical|compliance|snapshot> <input> <output.pdf>";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [kind, input, output] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let kind: ReportKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(kind, &PathBuf::from(input), &PathBuf::from(output)) {
        Ok(pages) => {
            println!("{output}: {pages} page(s)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Report generation failed");
            ExitCode::FAILURE
        }
    }
}
