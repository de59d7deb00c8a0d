use dotenvy::dotenv;
use frame_art_runner::ArtController;
use frame_art_sdk::samsung::{SamsungTv, SamsungTvOptions};
use std::sync::Arc;

/// Removes every image earlier runs uploaded and reports what is on screen.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    let host = std::env::var("TV_IP_ADDRESS")
        .expect("TV_IP_ADDRESS environment variable must be set");
    let tv = SamsungTv::new(
        host,
        SamsungTvOptions {
            token: std::env::var("TV_TOKEN").ok(),
            ..Default::default()
        },
    );
    let controller = ArtController::new(Arc::new(tv));

    if !controller.check_art_mode_support().await {
        println!("art mode is not supported");
        return;
    }

    let deleted = controller
        .clean_old_art()
        .await
        .expect("controller.clean_old_art failed");
    println!("deleted {deleted} images");

    let current = controller
        .get_current_art_content_id()
        .await
        .expect("controller.get_current_art_content_id failed");
    println!("current: {current:?}");
}
