use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dialdesk::call::{render_prompt, CallForm, CallPlan, TranscriptRole};
use dialdesk::config::LoggingConfig;
use dialdesk::prompt::{placeholders, CustomParam, CustomerOverrides};
use dialdesk::{create_app, AppState, CallOrchestrator, Config, Credentials, UseCaseCatalog};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dialdesk", version, about = "Configure and place AI-voice outbound calls")]
struct Cli {
    /// Service configuration file (extension optional)
    #[arg(short, long, global = true, default_value = "config/dialdesk")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP control panel
    Serve,
    /// List configured use cases
    UseCases,
    /// Show which secrets are configured
    Status,
    /// Print the formatted prompt for a use case
    Preview {
        #[arg(long)]
        use_case: String,
        /// Extra template parameter, repeatable
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<CustomParam>,
    },
    /// Place a single call from the terminal
    Call {
        #[arg(long)]
        use_case: String,
        /// Destination number (defaults to the use case's phone_number)
        #[arg(long)]
        to: Option<String>,
        /// Caller number (defaults to the use case's twilio_phone_number)
        #[arg(long)]
        from: Option<String>,
        /// Customer name override
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<CustomParam>,
        /// Wait for the call to end and print its transcript
        #[arg(long)]
        wait: bool,
    },
}

fn parse_param(raw: &str) -> Result<CustomParam, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    CustomParam::new(key, value).ok_or_else(|| "parameter key and value must be non-empty".to_string())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    init_tracing(&cfg.logging);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let catalog = UseCaseCatalog::load(&cfg.use_cases.path)?;
    let credentials = Credentials::load(cfg.secrets.path.as_deref())?;

    match cli.command {
        Command::Serve => serve(cfg, catalog, credentials).await,
        Command::UseCases => {
            for summary in catalog.summaries() {
                println!("{:<20} {:<30} {}", summary.id, summary.name, summary.description);
            }
            Ok(())
        }
        Command::Status => {
            let missing = credentials.missing_required();
            let optional = credentials.missing_optional();
            if missing.is_empty() {
                println!("Required API keys: all configured");
            } else {
                println!("Required API keys missing: {}", missing.join(", "));
            }
            if !optional.is_empty() {
                println!("Optional API keys not configured: {}", optional.join(", "));
            }
            Ok(())
        }
        Command::Preview { use_case, params } => {
            let use_case = catalog
                .get(&use_case)
                .with_context(|| format!("Unknown use case: {}", use_case))?;
            let prompt = render_prompt(
                use_case,
                &use_case.ai_prompt,
                &CustomerOverrides::default(),
                &[],
                &params,
            );
            println!("{}", prompt);
            let unresolved = placeholders(&prompt);
            if !unresolved.is_empty() {
                eprintln!("Unresolved placeholders: {}", unresolved.join(", "));
            }
            Ok(())
        }
        Command::Call {
            use_case,
            to,
            from,
            name,
            params,
            wait,
        } => {
            let form = CallForm {
                use_case_id: use_case,
                destination_phone: to,
                from_phone: from,
                customer: CustomerOverrides {
                    name,
                    ..Default::default()
                },
                custom_params: params,
                ..Default::default()
            };
            place_call(&cfg, &catalog, credentials, form, wait).await
        }
    }
}

async fn serve(cfg: Config, catalog: UseCaseCatalog, credentials: Credentials) -> Result<()> {
    let missing = credentials.missing_required();
    if !missing.is_empty() {
        info!("Calls will be refused until configured: {}", missing.join(", "));
    }

    let orchestrator = CallOrchestrator::from_config(&cfg, credentials);
    let state = AppState::new(catalog, orchestrator);
    let cleanup = state.start_cleanup_task(cfg.sessions.idle_timeout(), cfg.sessions.sweep_interval());
    let app = create_app(state, &cfg.service.static_dir);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Control panel listening on http://{}", addr);
    axum::serve(listener, app).await.context("HTTP server error")?;

    let _ = cleanup.send(true);
    Ok(())
}

async fn place_call(
    cfg: &Config,
    catalog: &UseCaseCatalog,
    credentials: Credentials,
    form: CallForm,
    wait: bool,
) -> Result<()> {
    let Some(use_case) = catalog.get(&form.use_case_id) else {
        bail!("Unknown use case: {}", form.use_case_id);
    };

    let orchestrator = CallOrchestrator::from_config(cfg, credentials);
    let plan = CallPlan::resolve(use_case, &form, &[], orchestrator.default_model())?;
    println!("{}", plan.summary());

    let record = orchestrator.initiate_call(&plan).await?;
    println!(
        "Call initiated successfully! Twilio SID: {} (session {})",
        record.telephony_call_id, record.session_id
    );

    if wait {
        let outcome = orchestrator.fetch_transcript(&record.session_id).await?;
        if let Some(reason) = &outcome.end_reason {
            println!("End reason: {}", reason);
        }
        for entry in &outcome.transcript {
            let speaker = match entry.role {
                TranscriptRole::User => "Customer",
                TranscriptRole::Agent => "AI Agent",
            };
            println!("[{}] {}: {}", entry.timestamp.format("%H:%M:%S"), speaker, entry.text);
        }
    }

    Ok(())
}
