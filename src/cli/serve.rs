// src/cli/serve.rs — API server command

use crate::api::{self, ApiState};
use crate::cli;
use crate::infra::config::Config;
use crate::learning::server::spawn_engine_server;

pub async fn run_serve(config: &Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let engine = cli::open_engine(config)?;
    let (handle, _join) = spawn_engine_server(engine);

    let state = ApiState {
        engine: handle,
        token: config.api.token.clone(),
    };

    let port = port_override.unwrap_or(config.api.port);
    api::start_server(port, state).await
}
