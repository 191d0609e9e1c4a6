use std::env;
use std::io::Read;

use log::warn;
use recipe_clipper::settings::Settings;
use recipe_clipper::{sanitize_instructions, MetadataExtractor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // `recipe-clipper --sanitize < instructions.txt` cleans pasted text
    if args.get(1).map(String::as_str) == Some("--sanitize") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        println!("{}", sanitize_instructions(&input));
        return Ok(());
    }

    let url = args.get(1).ok_or("Please provide a URL as an argument")?;

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("falling back to default settings: {e}");
        Settings::default()
    });

    let metadata = MetadataExtractor::from_settings(&settings)?
        .extract(url)
        .await?;
    if metadata.is_soft_failure() {
        warn!("page fetched but no usable title or description was found");
    }
    println!("{}", serde_json::to_string_pretty(&metadata)?);

    Ok(())
}
