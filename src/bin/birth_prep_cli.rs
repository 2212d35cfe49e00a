use birth_prep_core::{
    cli::{output, run_cli, CliError, USAGE},
    init,
};

fn main() {
    init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run_cli(args) {
        match &err {
            CliError::Reported => {}
            CliError::UnknownCommand { suggestion, .. } => {
                eprintln!("Error: {err}");
                if let Some(name) = suggestion {
                    eprintln!("Did you mean `{name}`?");
                }
                eprintln!("{USAGE}");
            }
            CliError::Usage(_) => {
                eprintln!("Error: {err}");
                eprintln!("{USAGE}");
            }
            _ => output::error(&err),
        }
        std::process::exit(1);
    }
}
