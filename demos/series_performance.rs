use std::time::Duration;

use vlr_performance::VlrClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let series_id = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(542210);

    let client = VlrClient::new();
    if !client.check_status(None).await {
        eprintln!("vlr.gg is not reachable");
        return;
    }

    let maps = client
        .get_series_performance(series_id, None, Some(Duration::from_secs(10)))
        .await;
    println!("Found {} maps for series {series_id}", maps.len());
    println!("{}", serde_json::to_string_pretty(&maps).unwrap());
}
