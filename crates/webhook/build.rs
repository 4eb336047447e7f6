//! Build script for the webhook crate.
//!
//! `sqlx::migrate!` embeds the migration files at compile time, but Cargo does
//! not know about them. Rebuild whenever a migration is added or edited.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
