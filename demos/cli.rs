//! Command-line interface for hsv_census
//!
//! Prints the color report of one image, or the similarity of two

use hsv_census::{AnalysisConfig, ColorAnalyzer, ColorError, ColorReport, TargetSize};
use std::{env, path::Path, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut target_size = None;
    let mut workers = None;
    let mut image_paths: Vec<String> = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config_path = Some(required_value(&args, i, "--config"));
                i += 1;
            }
            "--fit" => {
                let value = required_value(&args, i, "--fit");
                target_size = Some(parse_size(&value).unwrap_or_else(|| {
                    eprintln!("Error: --fit expects WIDTHxHEIGHT, got '{}'", value);
                    process::exit(1);
                }));
                i += 1;
            }
            "--workers" => {
                let value = required_value(&args, i, "--workers");
                workers = Some(value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: --workers expects a number, got '{}'", value);
                    process::exit(1);
                }));
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_paths.len() == 2 {
                    eprintln!("Error: At most two image paths can be given");
                    process::exit(1);
                }
                image_paths.push(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if image_paths.is_empty() {
        print_help(&args[0]);
        process::exit(1);
    }

    for path in &image_paths {
        if !Path::new(path).exists() {
            eprintln!("Error: File '{}' does not exist", path);
            process::exit(1);
        }
    }

    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_json_file(Path::new(&path)).unwrap_or_else(|e| fail(e)),
        None => AnalysisConfig::default(),
    };
    if target_size.is_some() {
        config.target_size = target_size;
    }
    if workers.is_some() {
        config.workers = workers;
    }

    let analyzer = ColorAnalyzer::new(config).unwrap_or_else(|e| fail(e));

    let result = match image_paths.as_slice() {
        [first, second] => compare(&analyzer, Path::new(first), Path::new(second)),
        [single, ..] => analyze(&analyzer, Path::new(single)),
        [] => Ok(()),
    };

    if let Err(error) = result {
        fail(error);
    }
}

fn analyze(analyzer: &ColorAnalyzer, path: &Path) -> hsv_census::Result<()> {
    let buffer = analyzer.load(path)?;
    let report = analyzer.report(&buffer)?;
    print_report(&report);
    Ok(())
}

fn compare(analyzer: &ColorAnalyzer, first: &Path, second: &Path) -> hsv_census::Result<()> {
    let a = analyzer.load(first)?;
    let b = analyzer.load(second)?;
    let distance = analyzer.compare(&a, &b)?;

    println!(
        "{}",
        serde_json::json!({
            "first": first.display().to_string(),
            "second": second.display().to_string(),
            "correlation": distance,
        })
    );

    eprintln!();
    eprintln!("Similarity Summary:");
    eprintln!("  Distance: {:.4} (0 = same most common color, 1 = opposite)", distance);
    Ok(())
}

fn fail(error: ColorError) -> ! {
    eprintln!("Analysis failed: {}", error);
    if error.is_recoverable() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn required_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn parse_size(value: &str) -> Option<TargetSize> {
    let (width, height) = value.split_once('x')?;
    Some(TargetSize {
        width: width.parse().ok()?,
        height: height.parse().ok()?,
    })
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image> [other_image]", program_name);
    eprintln!();
    eprintln!("Report the color distribution of an image, or compare two images.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Load analysis settings from a JSON file");
    eprintln!("  --fit WxH        Scale images to fit inside WxH before analysis");
    eprintln!("  --workers N      Number of partitions to count pixels in");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} photo.jpg", program_name);
    eprintln!("  {} --fit 800x600 photo.jpg", program_name);
    eprintln!("  {} before.png after.png", program_name);
}

fn print_report(report: &ColorReport) {
    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }

    // Print summary to stderr for human reading
    eprintln!();
    eprintln!("Color Analysis Summary:");
    eprintln!("  Size: {}x{} ({} pixels)", report.width, report.height, report.pixel_count);
    match &report.dominant_color {
        Some(color) => eprintln!("  Dominant Color: {} ({})", color.hex, color.hsv),
        None => eprintln!("  Dominant Color: none (image is mostly gray)"),
    }
    eprintln!(
        "  Most Common: {} ({})",
        report.most_common_color.hex, report.most_common_color.hsv
    );
    if let Some(hue) = report.hue_distribution.dominant_hue {
        eprintln!("  Peak Hue: {:.1}°", hue);
    }
}
