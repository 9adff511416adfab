use crate::config::AppConfig;
use crate::server;

pub async fn run(port: u16, enable_password_stub: bool) {
    println!("🚀 Starting tradearena-api server on port {}", port);

    let config = match AppConfig::from_env(port, enable_password_stub) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   Set FINNHUB_API_KEY to a valid Finnhub API key and retry.");
            std::process::exit(1);
        }
    };

    if config.enable_password_stub {
        println!("⚠️  Password-change stub ENABLED: /api/change-password accepts requests");
        println!("   but performs NO credential verification or storage.");
    }

    if let Err(e) = server::serve(config).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
