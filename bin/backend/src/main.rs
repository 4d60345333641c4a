//! Chess Backend Binary
//!
//! Auth, profiles, matchmaking, and tournament hosting in one server.
//! Runs on BIND_ADDR (defaults to 0.0.0.0:3000).

#[tokio::main]
async fn main() {
    arb_core::log();
    arb_core::halt();
    arb_server::run().await.unwrap();
}
