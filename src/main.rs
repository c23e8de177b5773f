use gamequery_cli::utils::logger;
use gamequery_cli::{app, ProbeDetector, ProcessEnv};

// One probe per invocation; a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    logger::init_cli_logger();

    let code = app::run(
        std::env::args_os(),
        &ProcessEnv,
        ProbeDetector::default(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;

    std::process::exit(code);
}
