use booking_predict::app_state::{AppConfig, AppState};
use booking_predict::server::startup;
use clap::Parser;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(
        long,
        default_value = "127.0.0.1",
        help = "Host address to bind the server to"
    )]
    host: String,

    #[arg(long, default_value_t = 8080, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        default_value = "rf_clf.json",
        help = "Path to the serialized classifier artifact"
    )]
    model_path: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig {
        host: args.host,
        port: args.port,
        model_path: args.model_path,
    };
    let state = AppState::new(&config)?;

    let ret: anyhow::Result<()> = actix_web::rt::System::new().block_on(async move {
        tokio::select! {
            res = startup(config, state) => {
                res?;
                Ok(())
            }
            _ = signal::ctrl_c() => {
                println!("Received Ctrl+C, shutting down");
                Ok(())
            }
        }
    });
    ret
}
