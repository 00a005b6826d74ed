mod error;
mod question_response;
mod routes;

use std::sync::Arc;

use routes::AppState;
use ta_services::{OcrService, QaService, Settings};

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let qa = QaService::new(&settings);
    let ocr = OcrService::new(&settings);

    let state = AppState {
        qa: Arc::new(qa),
        ocr: Arc::new(ocr),
        settings: Arc::new(settings),
    };

    let bind_addr = state.settings.bind_addr.clone();
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    println!("TDS Virtual TA listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
