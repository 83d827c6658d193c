use std::process::exit;

fn main() {
    if let Err(ref error) = pocketplan::run() {
        eprintln!("Error: {}", error);
        for cause in error.iter().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }
        if let Some(backtrace) = error.backtrace() {
            eprintln!("{:?}", backtrace);
        }
        exit(1);
    }
}
