//! `potaful` -- command-line companion for Potaful smart pots.
//!
//! Signs in through the pot service, lists pots and their hydration,
//! shows classified sensor reports, triggers watering, asks the
//! recommendation workflow for plants and looks up the local weather.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                          | Description                      |
//! |-----------------------|----------|----------------------------------|----------------------------------|
//! | `POTAFUL_API_URL`     | no       | `https://api.lutfialvarop.cloud` | Pot service base URL             |
//! | `POTAFUL_WEBHOOK_URL` | no       | `https://potaful2.app.n8n.cloud` | Recommendation workflow host     |
//! | `OPENWEATHER_API_URL` | no       | `https://api.openweathermap.org` | Weather service base URL         |
//! | `OPENWEATHER_API_KEY` | no       | --                               | Enables the `weather` command    |
//! | `HTTP_TIMEOUT_SECS`   | no       | `30`                             | Per-request timeout              |
//! | `POTAFUL_PREFS_PATH`  | no       | `potaful_prefs.json`             | Local session/preferences file   |

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use potaful_client::ClientConfig;
use potaful_core::SensorKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "potaful=info,potaful_client=info,potaful_store=info";

#[derive(Parser, Debug)]
#[command(name = "potaful", version, about = "Monitor and water Potaful smart pots")]
struct Cli {
    /// Preferences file (overrides POTAFUL_PREFS_PATH)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL that starts Google sign-in
    LoginUrl,

    /// Finish sign-in from the redirect URI the browser landed on
    Login {
        /// Callback URI carrying `token=...` or `status=FAILED`
        callback_uri: String,
    },

    /// Forget the signed-in user
    Logout,

    /// Show the stored profile and refresh it from the server
    Profile,

    /// List registered pots
    Pots,

    /// Show hydration urgency for every pot
    Hydration,

    /// Fetch a pot's sensor data and classify every reading
    Status {
        /// Pot identifier, e.g. t8NTt3FhUZ
        pot_id: String,
    },

    /// Register a pot with this account
    AddPot {
        /// Identifier printed on the pot
        pot_id: String,
    },

    /// Ask a pot to water itself
    Water {
        /// Pot identifier
        pot_id: String,
    },

    /// Ask for plant recommendations and store them
    Recommend {
        #[arg(long)]
        location: String,

        /// e.g. beginner, intermediate, expert
        #[arg(long)]
        skill_level: String,

        /// How often you are at home
        #[arg(long)]
        home_frequency: String,

        /// Kind of plant you would like
        #[arg(long)]
        preference: String,
    },

    /// Current weather (defaults to the stored location)
    Weather {
        #[arg(long)]
        city: Option<String>,
    },

    /// Classify a single sensor reading without contacting any service
    Classify {
        /// ph, moisture, soil_humidity, nitrogen, phosphorus, potassium,
        /// conductivity, temperature or salinity
        kind: SensorKind,

        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Offline: needs neither config, HTTP clients nor the preferences file.
    let command = match cli.command {
        Command::Classify { kind, value } => return commands::classify(kind, value, cli.json),
        other => other,
    };

    let mut config = ClientConfig::from_env()?;
    if let Some(path) = cli.prefs {
        config.prefs_path = path;
    }

    let mut ctx = commands::Context::new(&config, cli.json)?;
    tracing::debug!(prefs = %config.prefs_path.display(), api = %config.api_url, "Context ready");

    match command {
        Command::LoginUrl => ctx.login_url().await,
        Command::Login { callback_uri } => ctx.login(&callback_uri).await,
        Command::Logout => ctx.logout(),
        Command::Profile => ctx.profile().await,
        Command::Pots => ctx.pots().await,
        Command::Hydration => ctx.hydration().await,
        Command::Status { pot_id } => ctx.status(&pot_id).await,
        Command::AddPot { pot_id } => ctx.add_pot(&pot_id).await,
        Command::Water { pot_id } => ctx.water(&pot_id).await,
        Command::Recommend {
            location,
            skill_level,
            home_frequency,
            preference,
        } => {
            ctx.recommend(potaful_client::recommendation::RecommendationRequest {
                location,
                skill_level,
                home_frequency,
                preference,
            })
            .await
        }
        Command::Weather { city } => ctx.weather(city.as_deref()).await,
        // Dispatched above, before any service is built.
        Command::Classify { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recommend_flags() {
        let cli = Cli::parse_from([
            "potaful",
            "recommend",
            "--location",
            "Bandung",
            "--skill-level",
            "beginner",
            "--home-frequency",
            "often",
            "--preference",
            "herbs",
        ]);
        match cli.command {
            Command::Recommend { location, skill_level, .. } => {
                assert_eq!(location, "Bandung");
                assert_eq!(skill_level, "beginner");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_classify_kind_aliases() {
        let cli = Cli::parse_from(["potaful", "--json", "classify", "ec", "1.5"]);
        assert!(cli.json);
        match cli.command {
            Command::Classify { kind, value } => {
                assert_eq!(kind, SensorKind::Conductivity);
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn classify_ignores_unreadable_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        std::fs::write(&prefs, "{ not json").unwrap();

        let cli = Cli::parse_from([
            "potaful",
            "--prefs",
            prefs.to_str().unwrap(),
            "classify",
            "ph",
            "6.0",
        ]);
        assert!(run(cli).await.is_ok());
    }

    #[tokio::test]
    async fn networked_commands_still_open_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        std::fs::write(&prefs, "{ not json").unwrap();

        let cli = Cli::parse_from(["potaful", "--prefs", prefs.to_str().unwrap(), "logout"]);
        assert!(run(cli).await.is_err());
    }

    #[test]
    fn default_filter_covers_every_crate() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        let directives: Vec<_> = DEFAULT_LOG_FILTER.split(',').collect();
        for target in ["potaful=info", "potaful_client=info", "potaful_store=info"] {
            assert!(directives.contains(&target), "{target} missing");
        }
    }

    #[test]
    fn unknown_sensor_kind_is_a_usage_error() {
        assert!(Cli::try_parse_from(["potaful", "classify", "sunlight", "3"]).is_err());
    }
}
