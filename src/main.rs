use std::process::ExitCode;

use log::LevelFilter;

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let Some(facelets) = std::env::args().nth(1) else {
        eprintln!("usage: twophase <54-character facelet string>");
        eprintln!("       faces in U R F D L B order, each row-major from the top left");
        return ExitCode::FAILURE;
    };

    match twophase::solve(&facelets) {
        Ok(solution) => {
            println!("{solution}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
