use chrono::{DateTime, Utc};
use std::process::Command;

fn git_describe() -> Option<String> {
    let output =
        Command::new("git").args(["describe", "--tags", "--always", "--dirty"]).output().ok()?;
    let version = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (output.status.success() && !version.is_empty()).then_some(version)
}

/// Honors `SOURCE_DATE_EPOCH` so packaged builds are reproducible.
fn build_time() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn main() {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/tags");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let version = git_describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=GIT_VERSION={version}");
    println!("cargo:rustc-env=BUILD_TIME={}", build_time().format("%Y-%m-%dT%H:%M:%SZ"));
}
