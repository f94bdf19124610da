use anyhow::Context;
use clap::Parser;
use country_selector::app::{apply_preset, run_session, Preset};
use country_selector::core::ConfigProvider;
use country_selector::utils::{logger, validation::Validate};
use country_selector::{build_http_form, CliConfig, OutputFormat, SelectorError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting country-selector");

    let provider: Box<dyn ConfigProvider> = match &config.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            exit_on_invalid(&file_config);
            Box::new(file_config)
        }
        None => {
            exit_on_invalid(&config);
            Box::new(config.clone())
        }
    };

    if provider.exchange_rate_api_key().is_none() {
        tracing::warn!("⚠️ No exchange rate API key configured; rate lookups will likely fail");
    }

    let mut form = build_http_form(provider.as_ref());
    form.mount().await;

    if config.is_preset() {
        let preset = Preset {
            country: config.country.clone(),
            state: config.state.clone(),
            city: config.city.clone(),
        };
        if let Err(e) = apply_preset(&mut form, &preset).await {
            report_and_exit(&e);
        }

        match config.format {
            OutputFormat::Text => println!("{}", form.render()),
            OutputFormat::Json => match form.snapshot_json() {
                Ok(snapshot) => println!("{}", snapshot),
                Err(e) => report_and_exit(&e),
            },
        }
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    if let Err(e) = run_session(&mut form, stdin, &mut stdout).await {
        report_and_exit(&e);
    }

    tracing::info!("👋 Bye");
    Ok(())
}

fn exit_on_invalid<V: Validate>(config: &V) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_and_exit(&e);
    }
}

fn report_and_exit(e: &SelectorError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}
