use blogsmith::{pipeline, Config, Services};
use std::env;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    blogsmith::logger::init_with_config(
        blogsmith::logger::LoggerConfig::development()
            .with_level(blogsmith::logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking API environment...");

    match env::var("HORDE_API_KEY") {
        Ok(key) => {
            log::info!("✅ Horde API key found in environment");
            log::debug!("Key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  No HORDE_API_KEY set, submitting jobs anonymously");
        }
    }

    match env::var("HF_API_TOKEN") {
        Ok(token) => {
            log::info!("✅ Hugging Face token found in environment");
            log::debug!("Token length: {}", token.len());
        }
        Err(_) => {
            log::warn!("⚠️  No HF_API_TOKEN set, text generation will likely be rejected");
        }
    }

    let config = Config::from_env();
    log::info!("⚙️  Topics configured:");
    for topic in &config.topics {
        log::info!("   {} - {}", topic.name, topic.feed_url);
    }

    log::info!("🔄 Creating service clients...");
    let services = match Services::new(&config) {
        Ok(services) => {
            log::info!("✅ Service clients initialized successfully");
            services
        }
        Err(e) => {
            log::error!("❌ Failed to initialize service clients: {}", e);
            return Err(e.into());
        }
    };

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("⚠️  Interrupt received, cancelling after the current step");
            cancel_on_signal.cancel();
        }
    });

    let results = pipeline::run_all(&services, &config, &cancel).await?;

    let mut failed = 0;
    for (topic, result) in &results {
        match result {
            Ok(output) => {
                log::info!("✅ [{}] post: {}", topic, output.post_path.display());
                log::info!(
                    "   image: {} ({} bytes)",
                    output.asset.local_path.display(),
                    output.asset.bytes_written
                );
            }
            Err(e) => {
                log::error!("❌ [{}] failed: {}", topic, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} topics failed", failed, results.len()).into());
    }

    log::info!("🎉 All topics completed!");
    Ok(())
}
