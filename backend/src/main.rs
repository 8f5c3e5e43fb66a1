//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use ortho_config::OrthoConfig;
use rand::RngCore;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use safegas_backend::config::ServerSettings;
use safegas_backend::domain::TokenSigner;
use safegas_backend::inbound::http::state::AppState;
use safegas_backend::server::create_server;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("configuration load failed: {e}")))?;

    let secret = match &settings.token_secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            if cfg!(debug_assertions) {
                warn!("using ephemeral token secret (dev only); tokens die with the process");
                let mut bytes = vec![0_u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                bytes
            } else {
                return Err(std::io::Error::other(
                    "SAFEGAS_TOKEN_SECRET must be set in release builds",
                ));
            }
        }
    };

    if settings.allow_any_credentials {
        warn!("credential checks disabled; any well-formed login will succeed");
    }

    let state = AppState::new(
        TokenSigner::new(secret, settings.token_ttl_secs()),
        settings.allow_any_credentials,
    );

    let bind_addr = settings.bind_addr().to_owned();
    info!(addr = %bind_addr, "starting server");
    create_server(state, &bind_addr)?.await
}
