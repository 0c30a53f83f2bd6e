use crate::search::{OverlapPolicy, SearchConfig, create_exact_config, create_lossy_config};
use std::env;
use std::path::PathBuf;

/// Result of reading the command line
#[derive(Debug)]
pub enum ParseOutcome {
    /// Flags are valid, run the search
    Run(Args),
    /// Help or version was printed, nothing left to do
    Handled,
    /// The problem was already reported on stderr
    Invalid,
}

#[derive(Debug)]
pub struct Args {
    pub pattern: PathBuf,
    pub source: PathBuf,
    pub config: SearchConfig,
    pub debug_mode: bool,
}

impl Args {
    pub fn parse() -> ParseOutcome {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse flags (program name already stripped). Help, version and
    /// argument errors are printed here.
    pub fn parse_from<I>(args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let mut pattern: Option<PathBuf> = None;
        let mut source: Option<PathBuf> = None;
        let mut preset: Option<SearchConfig> = None;
        let mut screen_tolerance: Option<u64> = None;
        let mut pixel_tolerance: Option<u64> = None;
        let mut report_overlaps = false;
        let mut debug_mode = false;

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                print_help();
                return ParseOutcome::Handled;
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "patch-locate v{} ({})",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return ParseOutcome::Handled;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--report-overlaps" {
                report_overlaps = true;
            } else if arg == "-p" || arg == "-s" {
                let Some(value) = args.next() else {
                    eprintln!("❌ Missing path after {}", arg);
                    return ParseOutcome::Invalid;
                };
                if arg == "-p" {
                    pattern = Some(PathBuf::from(value));
                } else {
                    source = Some(PathBuf::from(value));
                }
            } else if let Some(value) = arg.strip_prefix("--pattern=") {
                pattern = Some(PathBuf::from(value));
            } else if let Some(value) = arg.strip_prefix("--source=") {
                source = Some(PathBuf::from(value));
            } else if let Some(value) = arg.strip_prefix("--preset=") {
                preset = Some(match value {
                    "default" => SearchConfig::default(),
                    "exact" => create_exact_config(),
                    "lossy" => create_lossy_config(),
                    other => {
                        eprintln!(
                            "❌ Unknown preset '{}', expected default, exact or lossy",
                            other
                        );
                        return ParseOutcome::Invalid;
                    }
                });
            } else if let Some(value) = arg.strip_prefix("--screen-tolerance=") {
                let Some(tolerance) = parse_tolerance(value) else {
                    return ParseOutcome::Invalid;
                };
                screen_tolerance = Some(tolerance);
            } else if let Some(value) = arg.strip_prefix("--pixel-tolerance=") {
                let Some(tolerance) = parse_tolerance(value) else {
                    return ParseOutcome::Invalid;
                };
                pixel_tolerance = Some(tolerance);
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return ParseOutcome::Invalid;
            }
        }

        let (Some(pattern), Some(source)) = (pattern, source) else {
            eprintln!("❌ Both a pattern (-p) and a source (-s) are required");
            print_help();
            return ParseOutcome::Invalid;
        };

        // Individual flags win over the preset regardless of order
        let mut config = preset.unwrap_or_default();
        if let Some(tolerance) = screen_tolerance {
            config.screen_tolerance = tolerance;
        }
        if let Some(tolerance) = pixel_tolerance {
            config.pixel_tolerance = tolerance;
        }
        if report_overlaps {
            config.overlap = OverlapPolicy::ReportAll;
        }

        ParseOutcome::Run(Args {
            pattern,
            source,
            config,
            debug_mode,
        })
    }
}

fn parse_tolerance(value: &str) -> Option<u64> {
    match value.parse::<u64>() {
        Ok(tolerance) => Some(tolerance),
        Err(_) => {
            eprintln!("❌ Invalid tolerance value: {}", value);
            None
        }
    }
}

fn print_help() {
    println!("🔎 Patch Locate - find a pattern image inside source images");
    println!();
    println!("USAGE:");
    println!("    patch-locate -p <pattern> -s <source> [FLAGS]");
    println!();
    println!("    <pattern> and <source> may each be an image file or a directory of images.");
    println!("    Every pattern is searched for in every source.");
    println!();
    println!("FLAGS:");
    println!("    -p <path>, --pattern=<path>   Pattern image or directory");
    println!("    -s <path>, --source=<path>    Source image or directory");
    println!("    --preset=<name>               Tolerance preset: default, exact, lossy");
    println!("    --screen-tolerance=N          Max row fingerprint distance for screening");
    println!("    --pixel-tolerance=N           Max per-pixel distance for verification");
    println!("    --report-overlaps             Report overlapping matches too");
    println!("    --debug                       Enable debug logging");
    println!("    --help, -h                    Show this help message");
    println!("    --version, -v                 Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    patch-locate -p icon.png -s screenshot.jpg");
    println!("    patch-locate -p patterns/ -s screens/ --preset=lossy");
    println!("    patch-locate -p icon.png -s shot.png --preset=exact --report-overlaps");
}
