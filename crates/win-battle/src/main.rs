use clap::Parser;

#[tokio::main]
async fn main() {
    let args = win_battle::arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.observe_config());
    tracing::info!("running win-battle with validated arguments:\n{}", args);

    let result = win_battle::start(args).await;
    std::process::exit(win_battle::finish(result, &mut std::io::stderr()));
}
