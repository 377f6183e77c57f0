#![forbid(unsafe_code)]

//! stylelens demo entry point.
//!
//! On wasm32 this mounts the demo page. Natively it inspects one demo
//! element against the simulated host and prints the panel.

#[cfg(target_arch = "wasm32")]
fn main() {
    use stylelens_demo::console::BrowserConsoleLayer;
    use tracing_subscriber::prelude::*;

    #[cfg(target_os = "unknown")]
    console_error_panic_hook::set_once();

    let subscriber =
        tracing_subscriber::registry().with(BrowserConsoleLayer::new(tracing::Level::DEBUG));
    let _ = tracing::subscriber::set_global_default(subscriber);

    leptos::mount::mount_to_body(stylelens_demo::app::DemoApp);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process;

    use stylelens_demo::cli::{self, Command, Opts};
    use stylelens_demo::scenario;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = match Opts::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("stylelens-demo {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    let scenario = match opts
        .inspector_config(|key| std::env::var(key).ok())
        .and_then(|config| opts.scenario(config))
    {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    match scenario::run(&scenario) {
        Ok(report) => print!("{}", report.to_text()),
        Err(e) => {
            eprintln!("Inspection failed: {e}");
            process::exit(1);
        }
    }
}
