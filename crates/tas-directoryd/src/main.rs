use std::{
    collections::BTreeMap,
    io::{BufWriter, Write},
    sync::Arc,
};

use anyhow::{Context, anyhow, bail};
use serde::Serialize;
use tracing::{debug, info};

use tas_core::{
    ExtractorRef, ExtractorRegistry, TaskSkillsExtractor, UserSystemCatalog, UserSystemService,
};
use tas_model::{LabelValues, User};
use tas_observe::{LoggerConfig, init_local_offset, init_logger};
use tas_prometheus::{PrometheusMetrics, TextEncoder};
use tas_userdb::{
    DbUserSkillsExtractor, DbUserSystemConfig, DbUserSystemService, default_initializers, schema,
};

/// Environment variable selecting the user system by name.
const ENV_USER_SYSTEM: &str = "TAS_USER_SYSTEM";

const USAGE: &str = "usage: tas-directoryd [list | user <id> | init-schema]";

/// One output line: the user plus every label computed for it.
#[derive(Serialize)]
struct DirectoryEntry<'a> {
    #[serde(flatten)]
    user: &'a User,
    labels: BTreeMap<String, LabelValues>,
}

fn main() -> anyhow::Result<()> {
    // 1) logger
    init_local_offset();
    init_logger(&LoggerConfig::from_env()?)?;

    let config = DbUserSystemConfig::from_env();
    let mut args = std::env::args().skip(1);
    let command = args.next();

    // 2) schema bootstrap, the only path allowed to create the database
    if command.as_deref() == Some("init-schema") {
        let conn = rusqlite::Connection::open(&config.data_source)
            .with_context(|| format!("opening {}", config.data_source))?;
        schema::create_schema(&conn)?;
        info!(locator = %config.data_source, "directory schema ready");
        return Ok(());
    }

    // 3) user system
    let metrics = PrometheusMetrics::new()?;
    let service = DbUserSystemService::new(config.clone())
        .with_initializers(default_initializers(&config))
        .with_metrics(Arc::new(metrics.clone()));
    let mut catalog = UserSystemCatalog::new([Box::new(service) as Box<dyn UserSystemService>])?;

    let name = std::env::var(ENV_USER_SYSTEM).unwrap_or_else(|_| DbUserSystemService::NAME.into());
    let users_system = catalog
        .start(&name)?
        .ok_or_else(|| anyhow!("user system '{name}' is not available"))?;
    users_system.health_check()?;

    // 4) labels
    let registry = ExtractorRegistry::with_defaults([
        Arc::new(DbUserSkillsExtractor) as ExtractorRef,
        Arc::new(TaskSkillsExtractor) as ExtractorRef,
    ])?;
    debug!(?registry, "extractor registry resolved");

    // 5) query
    let users = match command.as_deref() {
        None | Some("list") => users_system.find_all_users()?,
        Some("user") => {
            let id = args.next().context(USAGE)?;
            let user = users_system.find_user(&id)?;
            if user.is_none() {
                info!(user_id = %id, "user not found");
            }
            user.into_iter().collect()
        }
        Some(other) => bail!("unknown command '{other}'\n{USAGE}"),
    };

    let mut out = BufWriter::new(std::io::stdout().lock());
    for user in &users {
        let entry = DirectoryEntry {
            user,
            labels: registry.labels_for(user),
        };
        serde_json::to_writer(&mut out, &entry)?;
        writeln!(out)?;
    }
    out.flush()?;

    let exposition = TextEncoder::new().encode_to_string(&metrics.gather())?;
    debug!(metrics = %exposition, "directory metrics");
    Ok(())
}
