use gitline::app;
use gitline::cli::Cli;
use gitline::terminal::TerminalCheck;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let code = app::run(
        &cli,
        TerminalCheck::detect(),
        io::stdin().lock(),
        &mut io::stdout().lock(),
    );
    ExitCode::from(code)
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_env("GITLINE_LOG")
        .format_timestamp(None)
        .init();
}
