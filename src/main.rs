use {clap::Parser, perp_metrics::Cli, std::panic};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Info)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("perp_metrics"), my_code_level)
        .parse_default_env() // RUST_LOG wins over the defaults above
        .init();

    let args = Cli::parse();
    perp_metrics::run(args).await
}
