use clap::Parser;
use lokus_cli::Cli;

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    }
}
