//! Scenario replay entry point (native).

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(scenario_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: dialkit-replay <scenario.json> [out.svg]");
        return ExitCode::from(2);
    };
    let svg_path = args.next().map(PathBuf::from);
    log::info!("Replaying {}", scenario_path.display());

    let run = || -> Result<(), dialkit_app::ScriptError> {
        let scenario = dialkit_app::Scenario::load(&scenario_path)?;
        let report = dialkit_app::replay(&scenario)?;
        println!("{}", report.to_json()?);
        if let Some(path) = &svg_path {
            report.write_svg(std::fs::File::create(path)?)?;
            log::info!("Wrote final frame to {}", path.display());
        }
        Ok(())
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
