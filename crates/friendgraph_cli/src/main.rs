//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `friendgraph_core` linkage and print the core version.
//! - When `FRIENDGRAPH_API_BASE_URL` is set, run one fetch-and-layout cycle
//!   against the live graph store and print the positioned graph.

use friendgraph_core::{
    core_version, init_logging, GraphService, HttpGraphRemote, LogConfig, RemoteConfig,
};
use log::warn;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    println!("friendgraph_core version={}", core_version());

    if let Ok(log_config) = LogConfig::from_env() {
        if let Err(err) = init_logging(&log_config) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match RemoteConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("remote probe skipped: {err}");
            return ExitCode::SUCCESS;
        }
    };

    let remote = match HttpGraphRemote::new(&config) {
        Ok(remote) => remote,
        Err(err) => {
            eprintln!("failed to build client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = GraphService::new(remote);
    if let Err(err) = service.fetch_data().await {
        warn!("event=cli_probe module=cli status=error");
        eprintln!("fetch failed: {err}");
        return ExitCode::FAILURE;
    }

    let state = service.state();
    println!(
        "graph users={} friendships={}",
        state.users().len(),
        state.friendships().len()
    );
    for user in state.users() {
        println!(
            "user id={} x={} y={} tier={} hobbies={}",
            user.id,
            user.position.x,
            user.position.y,
            user.tier().template_name(),
            user.data.hobbies.len()
        );
    }
    for edge in state.renderable_friendships() {
        println!("friendship id={} {} -> {}", edge.id, edge.source, edge.target);
    }
    ExitCode::SUCCESS
}
