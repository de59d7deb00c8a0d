use dotenvy::dotenv;
use frame_art_sdk::{
    samsung::{SamsungTv, SamsungTvOptions},
    ArtClient,
};

#[tokio::main]
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

    println!(
        "art mode supported: {}",
        tv.supported().await.expect("tv.supported failed")
    );

    let items = tv.available().await.expect("tv.available failed");
    for item in &items {
        let owner = if item.is_script_owned() { "mine" } else { "tv" };
        println!("{:<16} {owner}", item.content_id);
    }

    let current = tv.get_current().await.expect("tv.get_current failed");
    println!("current: {:?}", current.content_id);
}
