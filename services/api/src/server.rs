//! HTTP server

use std::net::SocketAddr;

use bestiary_config::ServiceConfig;
use tracing::info;
use warp::Filter;

use crate::error::{ApiError, Result};
use crate::routes::routes;
use crate::state::AppState;

pub struct ApiServer {
    config: ServiceConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::from_config(&config);
        Self { config, state }
    }

    /// Serve with an existing state, e.g. one shared with a test harness
    pub fn with_state(config: ServiceConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.config
            .server
            .socket_addr()
            .parse()
            .map_err(|e| ApiError::Configuration {
                message: format!("Invalid bind address: {}", e),
            })
    }

    /// Bind and serve until the future is dropped
    pub async fn start(&self) -> Result<()> {
        let addr = self.bind_addr()?;
        let routes = routes(self.state.clone());

        if self.config.server.enable_cors {
            let cors = warp::cors()
                .allow_any_origin()
                .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allow_header("content-type");
            let (bound, server) = warp::serve(routes.with(cors)).try_bind_ephemeral(addr)?;
            info!("Bestiary API listening on {} (CORS enabled)", bound);
            server.await;
        } else {
            let (bound, server) = warp::serve(routes).try_bind_ephemeral(addr)?;
            info!("Bestiary API listening on {}", bound);
            server.await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let server = ApiServer::new(ServiceConfig::default());
        assert_eq!(server.bind_addr().unwrap().port(), 3000);
        assert!(server.state().db.enemies.is_empty());

        let mut config = ServiceConfig::default();
        config.server.bind_address = "not an address".into();
        let err = ApiServer::new(config).bind_addr().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
