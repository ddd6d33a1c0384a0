use tini::{
    cli::{self, TiniCommand},
    config,
};

fn init_tracing() {
    use tracing_subscriber::{
        filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _, Registry,
    };

    Registry::default()
        .with(
            fmt::Layer::new()
                .with_ansi(true)
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_env(config::env::LOG_DIRECTIVE)
                .or_else(|_| EnvFilter::try_new("warn"))
                .unwrap(),
        )
        .init();
}

fn main() {
    init_tracing();

    let TiniCommand { options, command } = cli::parse();

    if let Err(err) = command.run(&options, std::io::stdout().lock()) {
        let code = if err.is_not_found() { 2 } else { 1 };
        eprintln!("{}", err);
        std::process::exit(code);
    }
}
