use dotenvy::dotenv;
use frame_art_sdk::{
    openai::{OpenAIImageModel, OpenAIImageModelOptions},
    ImageGenerationInput, ImageModel,
};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = OpenAIImageModel::new(
        "dall-e-3",
        OpenAIImageModelOptions {
            api_key: std::env::var("OPENAI_API_KEY")
                .expect("OPENAI_API_KEY environment variable must be set"),
            ..Default::default()
        },
    );

    let response = model
        .generate(ImageGenerationInput::hd(
            "A lighthouse on a cliff at dusk, painted in the style of Turner",
        ))
        .await
        .expect("model.generate failed");

    for image in response.images {
        println!("{}", image.url);
        if let Some(revised_prompt) = image.revised_prompt {
            println!("revised prompt: {revised_prompt}");
        }
    }
}
