use patch_locate::args::{Args, ParseOutcome};
use patch_locate::batch::run_batch;
use patch_locate::decode::collect_image_paths;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Args::parse() {
        ParseOutcome::Run(args) => args,
        ParseOutcome::Handled => return ExitCode::SUCCESS,
        ParseOutcome::Invalid => return ExitCode::FAILURE,
    };

    let default_level = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::debug!("Search configuration: {:?}", args.config);

    let patterns = match collect_image_paths(&args.pattern) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };
    let sources = match collect_image_paths(&args.source) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_batch(&patterns, &sources, &args.config, |report| println!("{report}")) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
