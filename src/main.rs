use bettiah_maps::domain::model::MarkerId;
use bettiah_maps::utils::error::ErrorSeverity;
use bettiah_maps::utils::logger;
use bettiah_maps::utils::validation::{validate_required_field, Validate};
use bettiah_maps::{
    CliConfig, GooglePlacesClient, MapController, MapError, RecordingSurface, SearchOutcome,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting bettiah-maps CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.validate().and_then(|_| cli.load_map_config()) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    if let Err(e) = config.validate() {
        fail(e);
    }

    // 只有搜尋時才需要 API key
    let api_key = config.api_key();
    let api_key = if cli.category.is_some() {
        match validate_required_field("search.api_key", &api_key) {
            Ok(key) => key.clone(),
            Err(e) => fail(e),
        }
    } else {
        api_key.unwrap_or_default()
    };

    let places = GooglePlacesClient::new(config.endpoint(), api_key)?;
    let surface = RecordingSurface::new()
        .with_canvas(config.canvas())
        .with_echo(!cli.json);
    let mut controller = MapController::new(config.to_settings(), places, surface);

    controller.initialize();
    if cli.reset {
        controller.reset();
    }

    if let Some(category) = cli.category {
        match controller.search_by_category(category).await {
            Ok(SearchOutcome::Populated { markers }) => {
                tracing::info!("✅ Found {} {} places", markers, category);
            }
            Ok(outcome) => tracing::info!("Search finished: {:?}", outcome),
            Err(e) => report(&e),
        }
    }

    if let Some(id) = cli.click {
        if let Err(e) = controller.click_marker(MarkerId(id)) {
            report(&e);
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    } else {
        let viewport = controller.viewport();
        println!(
            "📍 {} @ {} (zoom {})",
            controller.settings().area_name,
            viewport.center,
            viewport.zoom
        );
        for marker in controller.markers() {
            println!(
                "  [{}] {} ({}) {}",
                marker.id,
                marker.title,
                marker.position,
                marker.icon.url().unwrap_or("")
            );
        }
    }

    Ok(())
}

fn report(e: &MapError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn fail(e: MapError) -> ! {
    report(&e);
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
