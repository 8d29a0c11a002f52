//! Duel client binary.
//!
//! Composition root: loads content, assembles a [`CombatService`] and lets
//! the [`Pilot`] play one encounter for the configured character.
//!
//! ```bash
//! DUEL_SEED=7 cargo run -p duel-client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use duel_client::logging::setup_logging;
use duel_client::{ClientConfig, Pilot};
use game_content::ContentFactory;
use game_core::{CombatStatus, CombatView};
use runtime::{CombatService, Encounter, InMemoryRewardSink, RuntimeConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let client = ClientConfig::from_env();
    let _log_guard = setup_logging(&client.log_dir)?;

    let defaults = RuntimeConfig::from_env();
    let bundle = ContentFactory::new(&defaults.data_dir)
        .load_bundle()
        .with_context(|| format!("Failed to load content from {}", defaults.data_dir.display()))?;
    info!(
        spells = bundle.spells.len(),
        monsters = bundle.monsters.len(),
        items = bundle.loot.len(),
        "Content loaded"
    );

    // File values first, then environment overrides on top.
    let config = RuntimeConfig {
        combat: bundle.config.clone(),
        ..defaults
    }
    .with_env_overrides();

    let rewards = Arc::new(InMemoryRewardSink::new());
    let service = CombatService::builder()
        .config(config)
        .content(&bundle)
        .rewards(rewards.clone())
        .build()?;

    let view = play(&service, &client).await?;

    if let Some(result) = &view.result {
        info!(
            winner = %result.winner,
            delivered = result.reward_delivered,
            gold = rewards.gold_for(&client.character_id).await,
            "Duel over"
        );
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn play(service: &CombatService, client: &ClientConfig) -> Result<CombatView> {
    let principal = client.principal.as_str();
    let mut view = match service
        .create_encounter(principal, &client.character_id)
        .await?
    {
        Encounter::Created(view) => *view,
        Encounter::Existing(existing) => {
            info!(combat = %existing.id, round = existing.round, "Resuming combat");
            service.get_combat(existing.id, principal).await?
        }
    };

    let pilot = Pilot::default();
    for _ in 0..client.max_actions {
        if view.status == CombatStatus::Finished {
            break;
        }
        let Some(request) = pilot.choose(&view) else {
            anyhow::bail!("No action available in round {}", view.round);
        };
        view = service.submit_action(view.id, principal, request).await?;
    }

    if view.status != CombatStatus::Finished {
        warn!(combat = %view.id, round = view.round, "Action budget exhausted");
    }
    if view.result.as_ref().is_some_and(|result| result.reward_pending()) {
        view = service.reconcile_reward(view.id, principal).await?;
    }
    Ok(view)
}
