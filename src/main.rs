use std::error::Error;
use timeweaver::config::{get_config, initialize_config};
use timeweaver::gateway::GeminiClient;
use timeweaver::ui::run_ui;
use timeweaver::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    if let Err(e) = initialize_config() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    flexi_logger::Logger::try_with_str(get_config().log_level)?
        .log_to_file(flexi_logger::FileSpec::default().directory("logs"))
        .start()?;

    let client = GeminiClient::from_config();
    let app = App::new();

    run_ui(app, client).await
}
