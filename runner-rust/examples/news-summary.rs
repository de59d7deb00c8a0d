use chrono::Local;
use dotenvy::dotenv;
use frame_art_runner::{daily_headlines_question, NewsFetcher, DEFAULT_NEWS_MODEL};
use frame_art_sdk::perplexity::{PerplexityChatModel, PerplexityChatModelOptions};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    let model = PerplexityChatModel::new(
        DEFAULT_NEWS_MODEL,
        PerplexityChatModelOptions {
            api_key: std::env::var("PPX_API_KEY")
                .expect("PPX_API_KEY environment variable must be set"),
            ..Default::default()
        },
    );
    let news = NewsFetcher::new(Arc::new(model));

    let question = daily_headlines_question(Local::now().date_naive());
    println!("{question}");

    let summary = news
        .fetch_summary(&question)
        .await
        .expect("news.fetch_summary failed");
    println!("{summary}");
}
