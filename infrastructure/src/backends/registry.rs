//! Backend availability registry
//!
//! Decides once per run which catalog entries are usable, either from the
//! JSON cache or by probing each CLI, and then answers availability
//! queries from memory.

use super::cache::AvailabilityCache;
use super::catalog::{BackendCatalog, BackendSpec};
use super::error::RegistryError;
use debate_application::AvailabilityRegistry;
use debate_domain::BackendId;
use std::collections::BTreeSet;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Output fragments that mean the account cannot generate anything
const BILLING_ERRORS: &[&str] = &[
    "doesn't have any credits",
    "purchase credits",
    "no credits",
    "credit balance",
    "billing",
    "payment required",
];

/// How hard to check each backend
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Bound on the `--version` style probe
    pub timeout: Duration,
    /// Also make a tiny generation call and look for billing errors
    pub deep_probe: bool,
    /// Bound on the generation call of a deep probe
    pub deep_probe_timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            deep_probe: false,
            deep_probe_timeout: Duration::from_secs(10),
        }
    }
}

/// Availability registry backed by CLI probing and a JSON cache
#[derive(Debug, Clone)]
pub struct CliBackendRegistry {
    catalog: BackendCatalog,
    available: BTreeSet<BackendId>,
}

impl CliBackendRegistry {
    /// Build the registry from the cache, or by probing when the cache is
    /// missing, invalid or `force_refresh` is set.
    pub async fn initialize(
        catalog: BackendCatalog,
        cache_path: &Path,
        settings: &ProbeSettings,
        force_refresh: bool,
    ) -> Result<Self, RegistryError> {
        if !force_refresh && let Some(cache) = AvailabilityCache::load(cache_path) {
            let available = Self::known(&catalog, &cache.available_models);
            if !available.is_empty() {
                info!(
                    "Using cached backend availability from {} ({})",
                    cache.timestamp,
                    join(&available)
                );
                return Ok(Self { catalog, available });
            }
            warn!("Cached backend list names no known backend, probing again");
        }

        let available = probe_all(&catalog, settings).await;
        if available.is_empty() {
            return Err(RegistryError::NoBackendsAvailable {
                hint: catalog.installation_guide(),
            });
        }

        let cache = AvailabilityCache::new(available.iter().map(BackendId::to_string));
        if let Err(e) = cache.save(cache_path) {
            warn!("{}", e);
        }
        info!("Available backends: {}", join(&available));
        Ok(Self { catalog, available })
    }

    /// Registry with a fixed available set, skipping cache and probes
    pub fn with_available(catalog: BackendCatalog, available: BTreeSet<BackendId>) -> Self {
        let available = available
            .into_iter()
            .filter(|id| catalog.contains(id))
            .collect();
        Self { catalog, available }
    }

    pub fn catalog(&self) -> &BackendCatalog {
        &self.catalog
    }

    /// Specs of the available backends, in catalog order
    pub fn available_specs(&self) -> Vec<&BackendSpec> {
        self.catalog
            .specs()
            .iter()
            .filter(|s| self.available.contains(&s.id))
            .collect()
    }

    fn known(catalog: &BackendCatalog, ids: &[String]) -> BTreeSet<BackendId> {
        ids.iter()
            .filter_map(|id| BackendId::new(id).ok())
            .filter(|id| catalog.contains(id))
            .collect()
    }
}

impl AvailabilityRegistry for CliBackendRegistry {
    fn available_backends(&self) -> BTreeSet<BackendId> {
        self.available.clone()
    }

    fn is_available(&self, backend: &BackendId) -> bool {
        self.available.contains(backend)
    }

    fn display_name(&self, backend: &BackendId) -> String {
        self.catalog
            .get(backend)
            .map_or_else(|| backend.to_string(), |s| s.display_name.clone())
    }
}

fn join(ids: &BTreeSet<BackendId>) -> String {
    ids.iter().map(BackendId::as_str).collect::<Vec<_>>().join(", ")
}

/// Probe every catalog entry concurrently
async fn probe_all(catalog: &BackendCatalog, settings: &ProbeSettings) -> BTreeSet<BackendId> {
    info!("Checking {} backends", catalog.specs().len());
    let mut join_set = JoinSet::new();
    for spec in catalog.specs() {
        let spec = spec.clone();
        let settings = settings.clone();
        join_set.spawn(async move {
            let ok = probe_backend(&spec, &settings).await;
            (spec.id, ok)
        });
    }

    let mut available = BTreeSet::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((id, true)) => {
                debug!("Backend {} is available", id);
                available.insert(id);
            }
            Ok((id, false)) => debug!("Backend {} is not available", id),
            Err(e) => warn!("Probe task failed: {}", e),
        }
    }
    available
}

/// Check one backend.
///
/// The program must be on `PATH` and its probe must exit with status 0 or 1
/// (a slow probe still counts as installed). With `deep_probe`, a billing or
/// credit error from a tiny generation call marks it unavailable.
pub async fn probe_backend(spec: &BackendSpec, settings: &ProbeSettings) -> bool {
    let probe = spec.probe_command();
    let Some((program, args)) = probe.split_first() else {
        return false;
    };
    if which::which(program).is_err() {
        debug!("{}: '{}' not found on PATH", spec.id, program);
        return false;
    }

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(settings.timeout, cmd.status()).await {
        Ok(Ok(status)) if matches!(status.code(), Some(0) | Some(1)) => {}
        Ok(Ok(status)) => {
            debug!("{}: probe exited with {}", spec.id, status);
            return false;
        }
        Ok(Err(e)) => {
            debug!("{}: probe failed to start: {}", spec.id, e);
            return false;
        }
        Err(_) => debug!("{}: probe timed out, treating as installed", spec.id),
    }

    if settings.deep_probe {
        return deep_probe(spec, settings.deep_probe_timeout).await;
    }
    true
}

async fn deep_probe(spec: &BackendSpec, timeout: Duration) -> bool {
    let Some((program, args)) = spec.command.split_first() else {
        return false;
    };
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let Ok(mut child) = cmd.spawn() else {
        return false;
    };
    if let Some(mut stdin) = child.stdin.take() {
        // a child that ignores stdin closes the pipe early; that is fine here
        let _ = stdin.write_all(b"ok").await;
    }

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let text = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )
            .to_lowercase();
            if let Some(error) = BILLING_ERRORS.iter().find(|e| text.contains(*e)) {
                warn!("{}: unusable ({})", spec.display_name, error);
                return false;
            }
            true
        }
        // installed but slow or misconfigured: leave it to the real call
        Ok(Err(_)) | Err(_) => true,
    }
}
