//! The responder every provisioned container runs. Hitting any path on it
//! tells you which service and branch lane answered.

use crate::utils::error::Result;
use crate::utils::validation::parse_port;
use axum::{extract::State, Router};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplierIdentity {
    pub name: String,
    pub branch: String,
    pub port: String,
}

impl ReplierIdentity {
    pub fn new(name: &str, branch: &str, port: &str) -> Self {
        Self {
            name: name.to_string(),
            branch: branch.to_string(),
            port: port.to_string(),
        }
    }

    pub fn greeting(&self) -> String {
        format!(
            "I am {}:{} listening on port {} \n",
            self.name, self.branch, self.port
        )
    }
}

async fn reply(State(identity): State<Arc<ReplierIdentity>>) -> String {
    identity.greeting()
}

pub fn router(identity: ReplierIdentity) -> Router {
    let state = Arc::new(identity);
    // Every method and path gets the same answer.
    Router::new().fallback(reply).with_state(state)
}

/// Serves the greeting until the process is stopped. An empty port means
/// there is nothing to serve and returns immediately.
pub async fn serve(identity: ReplierIdentity) -> Result<()> {
    if identity.port.trim().is_empty() {
        info!("Port empty");
        return Ok(());
    }

    let port = parse_port("port", &identity.port)?;

    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await?;
    info!("Listening on port: {}", identity.port);
    serve_on(listener, identity).await
}

pub async fn serve_on(listener: TcpListener, identity: ReplierIdentity) -> Result<()> {
    axum::serve(listener, router(identity)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_text() {
        let identity = ReplierIdentity::new("service2", "integration", "2222");
        assert_eq!(
            identity.greeting(),
            "I am service2:integration listening on port 2222 \n"
        );
    }

    #[tokio::test]
    async fn test_empty_port_returns_without_serving() {
        let identity = ReplierIdentity::new("service1", "master", "");
        assert!(serve(identity).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_port_is_rejected() {
        let identity = ReplierIdentity::new("service1", "master", "99999");
        assert!(serve(identity).await.is_err());
    }
}
