//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Principal the client acts as.
    pub principal: String,
    pub character_id: String,
    pub log_dir: PathBuf,
    /// Upper bound on submitted actions before giving up.
    pub max_actions: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            principal: "alice".into(),
            character_id: "char-ayla".into(),
            log_dir: PathBuf::from("logs"),
            max_actions: 200,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_PRINCIPAL` - Acting principal (default: `alice`)
    /// - `DUEL_CHARACTER` - Character to fight with (default: `char-ayla`)
    /// - `DUEL_LOG_DIR` - Log directory (default: `logs`)
    /// - `DUEL_MAX_ACTIONS` - Action budget for one duel (default: 200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(principal) = env::var("DUEL_PRINCIPAL") {
            config.principal = principal;
        }
        if let Ok(character) = env::var("DUEL_CHARACTER") {
            config.character_id = character;
        }
        if let Some(dir) = env::var_os("DUEL_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(max) = read_env::<u32>("DUEL_MAX_ACTIONS") {
            config.max_actions = max.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
