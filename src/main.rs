use std::io;

use anyhow::{Context, Result, bail};
use tracing::info;

use gambit_cli::Session;
use gambit_core::{Game, divide};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            info!("gambit starting");
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            Session::new().run(stdin.lock(), &mut stdout)?;
        }
        Some("perft") => {
            let depth: usize = args
                .get(1)
                .context("usage: gambit perft <depth>")?
                .parse()
                .context("depth must be a non-negative integer")?;
            let results = divide(&Game::new(), depth);
            let total: u64 = results.iter().map(|(_, n)| n).sum();
            for (mv, nodes) in &results {
                println!("{mv}: {nodes}");
            }
            println!("\nnodes {total}");
        }
        Some(other) => bail!("unknown argument: {other}"),
    }
    Ok(())
}
