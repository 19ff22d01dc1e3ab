//! Build script for papers-api
//!
//! Embeds build identification for the startup log and `/api/buildinfo`:
//! - GIT_HASH: short commit hash, `PAPERS_GIT_HASH` when set (source
//!   tarballs have no `.git`), else "unknown"
//! - BUILD_TIMESTAMP: RFC 3339, seconds precision
//! - BUILD_PROFILE: cargo profile

use std::path::Path;
use std::process::Command;

const GIT_HASH_OVERRIDE: &str = "PAPERS_GIT_HASH";

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed={}", GIT_HASH_OVERRIDE);
    // new commits change HEAD (or the ref it points to)
    for head in ["../.git/HEAD", "../.git/refs/heads"] {
        if Path::new(head).exists() {
            println!("cargo:rerun-if-changed={}", head);
        }
    }

    let git_hash = std::env::var(GIT_HASH_OVERRIDE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
