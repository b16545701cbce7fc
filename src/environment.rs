//! Local client environment: config file, session file and auth file.
//!
//! The working collection is kept per shell in a session file named after
//! the parent process id, next to the config file. Lookup falls back from
//! the session file to the config file and finally to the user's home
//! collection.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const ENV_CONFIG_FILE: &str = "IRODS_ENVIRONMENT_FILE";
pub const ENV_AUTH_FILE: &str = "IRODS_AUTHENTICATION_FILE";
pub const CWD_KEY: &str = "irods_cwd";
pub const REQUIRED_FIELDS: [&str; 4] = [
    "irods_host",
    "irods_port",
    "irods_user_name",
    "irods_zone_name",
];

const DEFAULT_CONFIG_DIR: &str = ".irods";
const DEFAULT_CONFIG_NAME: &str = "irods_environment.json";
const DEFAULT_AUTH_NAME: &str = ".irodsA";

/// Locations of the client's on-disk state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentPaths {
    pub config_file: PathBuf,
    pub auth_file: PathBuf,
    pub session_file: PathBuf,
}

impl EnvironmentPaths {
    /// Resolve paths from the environment variables, defaulting to `~/.irods`.
    pub fn discover() -> Result<Self> {
        let config_file = match env::var_os(ENV_CONFIG_FILE) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => home_dir()?.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_NAME),
        };
        let auth_file = match env::var_os(ENV_AUTH_FILE) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => home_dir()?.join(DEFAULT_CONFIG_DIR).join(DEFAULT_AUTH_NAME),
        };
        Ok(Self::with_session_id(
            config_file,
            auth_file,
            std::os::unix::process::parent_id(),
        ))
    }

    /// Derive the session file as `<config file>.<session id>`.
    pub fn with_session_id(config_file: PathBuf, auth_file: PathBuf, session_id: u32) -> Self {
        let mut session = config_file.clone().into_os_string();
        session.push(format!(".{session_id}"));
        Self {
            config_file,
            auth_file,
            session_file: PathBuf::from(session),
        }
    }
}

fn home_dir() -> Result<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("HOME is not set; cannot locate the iRODS environment"))
}

/// Connection settings from a verified config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub user_name: String,
    pub zone_name: String,
    pub home: Option<String>,
    pub cwd: Option<String>,
    raw: Map<String, Value>,
}

impl EnvironmentConfig {
    /// Validate an already-parsed config document.
    pub fn from_json(value: Value) -> Result<Self, EnvironmentProblems> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(EnvironmentProblems(vec![
                "configuration must be a JSON object".to_string(),
            ])),
        }
    }

    fn from_map(raw: Map<String, Value>) -> Result<Self, EnvironmentProblems> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !raw.contains_key(**field))
            .map(|field| format!("configuration is missing entry for {field}"))
            .collect();
        if !missing.is_empty() {
            return Err(EnvironmentProblems(missing));
        }

        let mut problems = Vec::new();
        let host = string_field(&raw, "irods_host", &mut problems);
        let user_name = string_field(&raw, "irods_user_name", &mut problems);
        let zone_name = string_field(&raw, "irods_zone_name", &mut problems);
        let port = match raw.get("irods_port") {
            Some(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        if port.is_none() {
            problems.push("configuration entry irods_port is not a valid port".to_string());
        }
        if !problems.is_empty() {
            return Err(EnvironmentProblems(problems));
        }

        Ok(Self {
            host,
            port: port.unwrap_or_default(),
            user_name,
            zone_name,
            home: optional_string(&raw, "irods_home"),
            cwd: optional_string(&raw, CWD_KEY),
            raw,
        })
    }

    /// Home collection: `irods_home` or `/<zone>/home/<user>`.
    pub fn home_collection(&self) -> String {
        match &self.home {
            Some(home) => home.clone(),
            None => format!("/{}/home/{}", self.zone_name, self.user_name),
        }
    }

    /// Any other string entry of the config file.
    pub fn extra(&self, key: &str) -> Option<String> {
        optional_string(&self.raw, key)
    }
}

fn string_field(raw: &Map<String, Value>, key: &str, problems: &mut Vec<String>) -> String {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => {
            problems.push(format!("configuration entry {key} must be a non-empty string"));
            String::new()
        }
    }
}

fn optional_string(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Every problem found while verifying the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentProblems(pub Vec<String>);

impl fmt::Display for EnvironmentProblems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot execute command because of problem(s) with environment:"
        )?;
        for problem in &self.0 {
            write!(f, "\n - {problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EnvironmentProblems {}

/// Check the config file (and, with `check_auth`, the auth file), collecting
/// every problem instead of stopping at the first.
pub fn verify_environment(
    paths: &EnvironmentPaths,
    check_auth: bool,
) -> Result<EnvironmentConfig, EnvironmentProblems> {
    if !paths.config_file.is_file() {
        return Err(EnvironmentProblems(vec![
            "iRODS configuration file not found.".to_string(),
        ]));
    }
    let raw = read_json_object(&paths.config_file)
        .map_err(|err| EnvironmentProblems(vec![format!("{err:#}")]))?;
    let config = EnvironmentConfig::from_map(raw)?;

    if check_auth && !paths.auth_file.is_file() {
        return Err(EnvironmentProblems(vec![
            "Please use iinit to log in to iRODS first".to_string(),
        ]));
    }
    Ok(config)
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))? {
        Value::Object(map) => Ok(map),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

/// Where the working collection is kept between invocations.
pub trait CwdStore {
    fn get(&self) -> Result<String>;
    fn set(&self, collection: &str) -> Result<()>;
}

/// Session-file backed store with config and home fallbacks.
pub struct SessionCwdStore<'a> {
    paths: &'a EnvironmentPaths,
    config: &'a EnvironmentConfig,
}

impl<'a> SessionCwdStore<'a> {
    pub fn new(paths: &'a EnvironmentPaths, config: &'a EnvironmentConfig) -> Self {
        Self { paths, config }
    }
}

impl CwdStore for SessionCwdStore<'_> {
    fn get(&self) -> Result<String> {
        let session_file = &self.paths.session_file;
        if session_file.is_file() {
            debug!("Session file exists. Looking up CWD in session file.");
            let session = read_json_object(session_file)?;
            if let Some(cwd) = session.get(CWD_KEY).and_then(Value::as_str) {
                return Ok(cwd.to_string());
            }
            debug!("CWD not found in session file. Falling back to config.");
        } else {
            debug!("No session file found. Retrieving CWD from config file.");
        }

        if let Some(cwd) = &self.config.cwd {
            debug!("CWD retrieved from config file.");
            return Ok(cwd.clone());
        }
        debug!("CWD not found in config file. Falling back to home collection.");
        Ok(self.config.home_collection())
    }

    fn set(&self, collection: &str) -> Result<()> {
        let session_file = &self.paths.session_file;
        let mut session = if session_file.is_file() {
            debug!("Storing CWD in existing session file {}", session_file.display());
            read_json_object(session_file)?
        } else {
            debug!("Storing CWD in new session file {}", session_file.display());
            Map::new()
        };
        session.insert(CWD_KEY.to_string(), Value::String(collection.to_string()));
        write_json_atomic(session_file, &Value::Object(session))
            .context("IO error during reading or writing CWD data.")
    }
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    serde_json::to_writer(&mut tmp, value)?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Fixed in-memory store.
#[derive(Debug, Default)]
pub struct MemoryCwdStore {
    cwd: RefCell<String>,
}

impl MemoryCwdStore {
    pub fn new(cwd: &str) -> Self {
        Self {
            cwd: RefCell::new(cwd.to_string()),
        }
    }
}

impl CwdStore for MemoryCwdStore {
    fn get(&self) -> Result<String> {
        Ok(self.cwd.borrow().clone())
    }

    fn set(&self, collection: &str) -> Result<()> {
        *self.cwd.borrow_mut() = collection.to_string();
        Ok(())
    }
}
