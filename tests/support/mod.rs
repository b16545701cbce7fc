#![allow(dead_code)]

use anyhow::{Context, Result};
use ii_catalog::catalog::snapshot::SnapshotDocument;
use ii_catalog::{EnvironmentPaths, SnapshotCatalog};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const HOME: &str = "/zone/home/alice";

// Catalog shared by the pipeline and binary tests:
//
// /zone/home/alice
//   data.dat       R1 1024, R2 1024
//   notes.txt      R1 3
//   sub1/
//     a.dat        R1 2048
//     sub2/
//       b.dat      R2 2 MiB (stale)
//   empty/
pub fn snapshot_json() -> Value {
    let coll = |path: &str, id: u64, owner: &str| {
        json!({"path": path, "id": id, "owner_name": owner, "owner_zone": "zone", "modify_time": 1_700_000_000})
    };
    let replica = |number: u32, status: &str, resource: &str, size: u64, path: &str| {
        json!({
            "number": number,
            "status": status,
            "resource": resource,
            "size": size,
            "modify_time": 1_700_000_000,
            "checksum": null,
            "physical_path": format!("/vault/{resource}{path}")
        })
    };
    let object = |collection: &str, name: &str, id: u64, replicas: Vec<Value>| {
        json!({
            "collection": collection,
            "name": name,
            "id": id,
            "owner_name": "alice",
            "owner_zone": "zone",
            "replicas": replicas
        })
    };

    json!({
        "collections": [
            coll("/", 1, "rods"),
            coll("/zone", 2, "rods"),
            coll("/zone/home", 3, "rods"),
            coll(HOME, 4, "alice"),
            coll("/zone/home/alice/sub1", 5, "alice"),
            coll("/zone/home/alice/sub1/sub2", 6, "alice"),
            coll("/zone/home/alice/empty", 7, "alice")
        ],
        "data_objects": [
            object(HOME, "data.dat", 10, vec![
                replica(0, "1", "R1", 1024, "/zone/home/alice/data.dat"),
                replica(1, "1", "R2", 1024, "/zone/home/alice/data.dat"),
            ]),
            object(HOME, "notes.txt", 11, vec![
                replica(0, "1", "R1", 3, "/zone/home/alice/notes.txt"),
            ]),
            object("/zone/home/alice/sub1", "a.dat", 12, vec![
                replica(0, "1", "R1", 2048, "/zone/home/alice/sub1/a.dat"),
            ]),
            object("/zone/home/alice/sub1/sub2", "b.dat", 13, vec![
                replica(0, "0", "R2", 2 * 1024 * 1024, "/zone/home/alice/sub1/sub2/b.dat"),
            ]),
        ]
    })
}

pub fn snapshot_catalog() -> Result<SnapshotCatalog> {
    let document: SnapshotDocument = serde_json::from_value(snapshot_json())?;
    SnapshotCatalog::from_document(document)
}

/// Throwaway client environment: config, auth file and catalog snapshot.
pub struct Workspace {
    pub dir: TempDir,
    pub config_file: PathBuf,
    pub auth_file: PathBuf,
    pub catalog_file: PathBuf,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Self::with_config(json!({
            "irods_host": "catalog.example.org",
            "irods_port": 1247,
            "irods_user_name": "alice",
            "irods_zone_name": "zone"
        }))
    }

    pub fn with_config(config: Value) -> Result<Self> {
        let dir = TempDir::new().context("creating temp workspace")?;
        let config_file = dir.path().join("irods_environment.json");
        let auth_file = dir.path().join(".irodsA");
        let catalog_file = dir.path().join("catalog.json");
        fs::write(&config_file, serde_json::to_string_pretty(&config)?)?;
        fs::write(&auth_file, "scrambled-password\n")?;
        fs::write(&catalog_file, serde_json::to_string(&snapshot_json())?)?;
        Ok(Self {
            dir,
            config_file,
            auth_file,
            catalog_file,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Paths as the binary will derive them: its parent is this test process.
    pub fn environment_paths(&self) -> EnvironmentPaths {
        EnvironmentPaths::with_session_id(
            self.config_file.clone(),
            self.auth_file.clone(),
            std::process::id(),
        )
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ii"));
        cmd.args(args)
            .env("IRODS_ENVIRONMENT_FILE", &self.config_file)
            .env("IRODS_AUTHENTICATION_FILE", &self.auth_file)
            .env("II_CATALOG_PATH", &self.catalog_file)
            .env("HOME", self.path())
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command(args)
            .output()
            .with_context(|| format!("failed to run ii {}", args.join(" ")))
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
