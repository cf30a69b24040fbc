use std::{io, process::exit};

use clap::Parser;

use money_pro::{
    AppConfig, Error, Ledger,
    cli::{Args, run},
    setup_logging,
    stores::SQLiteStore,
};

fn main() {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        print_error(format!("could not set up logging: {error}"));
        exit(1);
    }

    if let Err(error) = run_command(args) {
        print_error(error);
        exit(1);
    }
}

fn run_command(args: Args) -> Result<(), Error> {
    let config = AppConfig::new(&args.db_path, &args.timezone)?.currency_symbol(&args.currency);

    let store = SQLiteStore::open(&config.db_path)?;
    let mut ledger = Ledger::open(store)?;

    let mut stdout = io::stdout().lock();
    run(args.command, &mut ledger, &config, &mut stdout)
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
