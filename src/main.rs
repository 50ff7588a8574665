/// Terminal front end for the rainfall prediction client.
///
/// Usage: rainfall_predictor [--config <path>]
///
/// Prompts once per feature, submits the form to the prediction backend and
/// prints the result panel. Blank or non-numeric answers count as 0.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rainfall_predictor::config::ClientConfig;
use rainfall_predictor::features::find_feature;
use rainfall_predictor::logging::{self, Component};
use rainfall_predictor::predict::{FormEvent, HttpTransport, Predictor};
use rainfall_predictor::render::{result_panel, submit_control};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_args()?;
    let config = ClientConfig::load(config_path.as_deref())?;

    logging::init_logger(
        config.log_level,
        config.log_file.as_deref(),
        config.console_timestamps,
    );
    for name in config.features.names() {
        if find_feature(name).is_none() {
            logging::warn(
                Component::Config,
                Some(name.as_str()),
                "Feature is not in the registry; sending it without metadata",
            );
        }
    }

    let transport = HttpTransport::new(&config.endpoint)?;
    logging::info(
        Component::System,
        None,
        &format!("Using prediction endpoint {}", transport.endpoint()),
    );
    let mut predictor = Predictor::new(config.features.clone(), Arc::new(transport));

    println!("💧 Rainfall Prediction");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let fields = predictor.state().form().input_fields(predictor.features());
    for field in fields {
        let hint = find_feature(&field.name)
            .map(|f| format!(" ({}, {})", f.description, f.unit))
            .unwrap_or_default();
        print!("{}{} [{}] ", field.label, hint, field.placeholder);
        io::stdout().flush()?;

        let raw = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        predictor.handle_event(FormEvent::Edit {
            name: field.name,
            raw,
        });
    }

    println!();
    println!("[{}]", submit_control(predictor.state()).label);
    predictor.handle_event(FormEvent::Submit);

    print!("{}", submit_control(predictor.state()).label);
    io::stdout().flush()?;
    while !predictor.poll() {
        std::thread::sleep(Duration::from_millis(250));
        print!(".");
        io::stdout().flush()?;
    }
    println!();
    println!();

    println!("{}", result_panel(predictor.state()));
    Ok(())
}

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("Usage: rainfall_predictor [--config <path>]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(config_path)
}
