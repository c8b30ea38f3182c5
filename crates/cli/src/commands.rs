//! Command handlers.
//!
//! Every handler prints either a plain-text table or, with `--json`, the
//! serialized result on stdout. Logs go to stderr.

use anyhow::{bail, Context as _};
use potaful_client::auth::{self, AuthCallback};
use potaful_client::recommendation::{suggestions, RecommendationRequest};
use potaful_client::{ClientConfig, Services};
use potaful_core::health::BandDisplay;
use potaful_core::hydration::HydrationCondition;
use potaful_core::report::{format_fixed, PotStatusReport};
use potaful_core::SensorKind;
use potaful_store::PreferenceStore;
use serde::Serialize;

/// Services plus the local store, shared by all networked commands.
pub struct Context {
    services: Services,
    store: PreferenceStore,
    json: bool,
}

impl Context {
    pub fn new(config: &ClientConfig, json: bool) -> anyhow::Result<Self> {
        let services = Services::from_config(config).context("Failed to build HTTP clients")?;
        let store = PreferenceStore::open(&config.prefs_path).with_context(|| {
            format!("Failed to open preferences at {}", config.prefs_path.display())
        })?;
        Ok(Self {
            services,
            store,
            json,
        })
    }

    fn token(&self) -> anyhow::Result<String> {
        match self.store.session().token() {
            Some(token) => Ok(token.to_string()),
            None => bail!("Not logged in. Run `potaful login-url` and then `potaful login <callback-uri>`."),
        }
    }

    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }

    // ---- authentication ----

    pub async fn login_url(&mut self) -> anyhow::Result<()> {
        let url = self.services.pots.google_auth_url().await?;
        println!("{url}");
        Ok(())
    }

    pub async fn login(&mut self, callback_uri: &str) -> anyhow::Result<()> {
        let token = match auth::parse_auth_callback(callback_uri)? {
            AuthCallback::Token(token) => token,
            AuthCallback::Failed(message) => bail!(message),
            AuthCallback::MissingToken => bail!("Token not found in callback URI"),
        };

        let outcome = auth::complete_login(&self.services.pots, &mut self.store, &token).await?;
        match &outcome.profile {
            Some(profile) => println!("Logged in as {} <{}>", profile.full_name(), profile.email),
            None => println!("Logged in (profile unavailable, run `potaful profile` later)"),
        }
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.store.clear_user_data()?;
        println!("Logged out");
        Ok(())
    }

    pub async fn profile(&mut self) -> anyhow::Result<()> {
        let token = self.token()?;

        match self.services.pots.user_profile(&token).await {
            Ok(profile) => auth::save_profile(&mut self.store, &profile)?,
            Err(e) => tracing::warn!(error = %e, "Showing cached profile"),
        }

        let session = self.store.session();
        let value = serde_json::json!({
            "user_id": session.user_id,
            "name": session.name,
            "email": session.email,
            "photo": session.photo,
            "location": session.location,
            "onboarding_completed": session.onboarding_completed,
        });
        self.emit(&value, || {
            println!("Name:     {}", session.display_name().unwrap_or("-"));
            println!("Email:    {}", session.email.as_deref().unwrap_or("-"));
            println!("User ID:  {}", session.user_id.as_deref().unwrap_or("-"));
            println!("Location: {}", session.location.as_deref().unwrap_or("-"));
        })
    }

    // ---- pots ----

    pub async fn pots(&mut self) -> anyhow::Result<()> {
        let token = self.token()?;
        let list = self.services.pots.my_pots(&token).await?;
        self.emit(&list, || {
            if list.pots.is_empty() {
                println!("No pots registered. Add one with `potaful add-pot <pot-id>`.");
                return;
            }
            println!("{:<14} {:<22} {:>9} {:>11}  LAST UPDATE", "POT", "TYPE", "MAX WATER", "SOIL HEALTH");
            for pot in &list.pots {
                println!(
                    "{:<14} {:<22} {:>8}L {:>10}%  {}",
                    pot.pot_id,
                    pot.type_name,
                    pot.max_water,
                    format_fixed(pot.soil_health, 1),
                    pot.last_update
                );
            }
            println!("{} pot(s)", list.total);
        })
    }

    pub async fn hydration(&mut self) -> anyhow::Result<()> {
        let token = self.token()?;
        let mut list = self.services.pots.hydration_summary(&token).await?;
        list.pots.sort_by_key(|p| p.condition().urgency_rank());

        self.emit(&list, || {
            for pot in &list.pots {
                let condition = pot.condition();
                let hydration = pot
                    .soil_hydration
                    .map(|h| format!("{}%", format_fixed(h, 1)))
                    .unwrap_or_else(|| "-".to_string());
                let hint = if condition.needs_watering() { "  (water soon)" } else { "" };
                println!(
                    "{:<14} {:<22} {:<8} {:>7}{hint}",
                    pot.id.as_deref().unwrap_or("-"),
                    pot.display_name(),
                    condition.label(),
                    hydration
                );
            }
            let urgent = list
                .pots
                .iter()
                .filter(|p| p.condition() == HydrationCondition::Urgent)
                .count();
            println!("{} pot(s), {urgent} urgent", list.pots.len());
        })
    }

    pub async fn status(&mut self, pot_id: &str) -> anyhow::Result<()> {
        let token = self.token()?;
        let detail = self.services.pots.pot_detail(&token, pot_id).await?;
        let report = PotStatusReport::from_sensor_data(&detail.sensor_data);

        self.emit(&report, || {
            println!("{} ({}) at {}", detail.pot_id, detail.type_name, detail.timestamp);
            for param in &report.parameters {
                println!(
                    "  {:<14} {:>8} {:<6} {}",
                    param.kind.label(),
                    param.display_value,
                    param.kind.unit(),
                    param.band
                );
            }
            println!("  Water level    {}", report.water_level);
            println!("  Soil health    {}%", format_fixed(report.soil_health, 1));
            println!("Overall: {}", report.worst_band());
        })
    }

    pub async fn add_pot(&mut self, pot_id: &str) -> anyhow::Result<()> {
        let token = self.token()?;
        let added = self.services.pots.add_pot(&token, pot_id).await?;
        self.emit(&added, || {
            println!("Added {} ({}, {}L reservoir)", added.pot_id, added.type_name, added.max_water);
        })
    }

    pub async fn water(&mut self, pot_id: &str) -> anyhow::Result<()> {
        let token = self.token()?;
        let ack = self.services.pots.water_pot(&token, pot_id).await?;
        self.emit(&ack, || println!("Watering {}: {}", ack.pot_id, ack.status))
    }

    // ---- onboarding ----

    pub async fn recommend(&mut self, request: RecommendationRequest) -> anyhow::Result<()> {
        let recommendations = self.services.recommendations.recommend(&request).await?;

        self.store
            .save_plant_recommendation(&serde_json::to_string(&recommendations)?)?;
        self.store.save_user_location(request.location.trim())?;
        self.store.set_onboarding_completed(true)?;

        let flat = suggestions(&recommendations);
        self.emit(&flat, || {
            for (i, s) in flat.iter().enumerate() {
                match &s.reason {
                    Some(reason) => println!("{}. {} - {reason}", i + 1, s.plant),
                    None => println!("{}. {}", i + 1, s.plant),
                }
            }
        })
    }

    pub async fn weather(&mut self, city: Option<&str>) -> anyhow::Result<()> {
        let Some(client) = &self.services.weather else {
            bail!("Weather is not configured; set OPENWEATHER_API_KEY");
        };
        let city = match city.or(self.store.user_location()) {
            Some(city) => city.to_string(),
            None => bail!("No city given and no stored location; pass --city"),
        };

        let summary = client.current(&city).await?.summary();
        self.emit(&summary, || {
            println!(
                "{}: {}, {} ({}), humidity {}%",
                summary.city,
                summary.condition,
                summary.temperature,
                summary.icon.label(),
                summary.humidity
            );
        })
    }
}

#[derive(Serialize)]
struct Classification {
    kind: SensorKind,
    value: f64,
    band: BandDisplay,
}

/// Classify one reading locally.
pub fn classify(kind: SensorKind, value: f64, json: bool) -> anyhow::Result<()> {
    let band = potaful_core::classify(kind, value);
    if json {
        let out = Classification {
            kind,
            value,
            band: band.display(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} {value} {}: {band}", kind.label(), kind.unit());
    }
    Ok(())
}
