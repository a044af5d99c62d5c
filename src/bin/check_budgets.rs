use budget_probe::cli::run_cli;

fn main() {
    std::process::exit(run_cli());
}
