use reqwest::multipart;
use reqwest::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = std::env::var("TA_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    println!("Health Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;

    println!("Status: {}", health_response.status());
    let health_json: serde_json::Value = health_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&health_json)?);

    println!("\nQuestion:");
    let form = multipart::Form::new().text("question", "What is regression?");

    let answer_response = client
        .post(format!("{}/api/", base_url))
        .multipart(form)
        .send()
        .await?;

    println!("Status: {}", answer_response.status());
    let answer_json: serde_json::Value = answer_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&answer_json)?);

    println!("\nStats:");
    let stats_response = client.get(format!("{}/stats", base_url)).send().await?;

    println!("Status: {}", stats_response.status());
    let stats_json: serde_json::Value = stats_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&stats_json)?);

    Ok(())
}
