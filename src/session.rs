//! Connection setup: credential loading and catalog backend selection.

use crate::catalog::SnapshotCatalog;
use crate::environment::{EnvironmentConfig, EnvironmentPaths};
use crate::interrupt;
use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const ENV_CATALOG_PATH: &str = "II_CATALOG_PATH";
pub const CONFIG_CATALOG_PATH: &str = "ii_catalog_path";

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Contents of the auth file, still scrambled.
    Scrambled(String),
    /// Typed at the prompt.
    Entered(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Scrambled(_) => f.write_str("Credential::Scrambled(..)"),
            Credential::Entered(_) => f.write_str("Credential::Entered(..)"),
        }
    }
}

impl Credential {
    pub fn source(&self) -> &'static str {
        match self {
            Credential::Scrambled(_) => "auth file",
            Credential::Entered(_) => "prompt",
        }
    }
}

/// Read the auth file, prompting on the terminal when it is unreadable.
pub fn load_credential(paths: &EnvironmentPaths) -> Result<Credential> {
    match fs::read_to_string(&paths.auth_file) {
        Ok(contents) => Ok(Credential::Scrambled(contents.trim().to_string())),
        Err(err) => {
            warn!("Could not open {} ({err}).", paths.auth_file.display());
            let password = prompt_password("Please provide your irods password:")?;
            Ok(Credential::Entered(password))
        }
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} ")?;
    stderr.flush()?;

    let _echo = if stdin.is_terminal() {
        Some(EchoGuard::disable())
    } else {
        None
    };
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;
    writeln!(stderr)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Turns terminal echo off until dropped.
struct EchoGuard {
    original: Option<libc::termios>,
}

impl EchoGuard {
    fn disable() -> Self {
        let fd = libc::STDIN_FILENO;
        let mut term = std::mem::MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr fills `term` on success; we only read it afterwards.
        let original = unsafe {
            if libc::tcgetattr(fd, term.as_mut_ptr()) != 0 {
                return Self { original: None };
            }
            term.assume_init()
        };
        interrupt::remember_terminal(original);
        let mut silent = original;
        silent.c_lflag &= !libc::ECHO;
        // SAFETY: `silent` is a valid termios derived from the current settings.
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &silent);
        }
        Self {
            original: Some(original),
        }
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original {
            // SAFETY: restores the settings captured in `disable`.
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &original);
            }
            interrupt::forget_terminal();
        }
    }
}

/// An open connection to the catalog.
pub struct Session {
    pub credential: Credential,
    pub catalog: SnapshotCatalog,
}

/// Locate the snapshot backing the catalog: `$II_CATALOG_PATH`, then the
/// `ii_catalog_path` config entry.
pub fn catalog_source(config: &EnvironmentConfig) -> Result<PathBuf> {
    if let Some(path) = env::var_os(ENV_CATALOG_PATH).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.extra(CONFIG_CATALOG_PATH).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    bail!(
        "no catalog backend available for {}:{}; set {ENV_CATALOG_PATH} (or '{CONFIG_CATALOG_PATH}' in the configuration) to a catalog snapshot",
        config.host,
        config.port
    )
}

/// Open a session for the verified environment.
pub fn connect(paths: &EnvironmentPaths, config: &EnvironmentConfig) -> Result<Session> {
    let credential = load_credential(paths)?;
    debug!("Using credential from {}.", credential.source());
    let source = catalog_source(config)?;
    let catalog = SnapshotCatalog::load(&source)?;
    debug!(
        "Connected to {}:{} as {}#{} ({} collections, {} data objects).",
        config.host,
        config.port,
        config.user_name,
        config.zone_name,
        catalog.collection_count(),
        catalog.data_object_count()
    );
    Ok(Session {
        credential,
        catalog,
    })
}
