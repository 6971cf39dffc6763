//! [`EmailRelay`] backed by an HTTPS JSON endpoint (rustls + ring).

use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use rustls::ClientConfig;
use rustls::pki_types::ServerName;
use serde::Serialize;
use termfolio_types::config::RelayConfig;
use termfolio_types::error::{Result, TermfolioError};

use crate::http::{self, Endpoint};
use crate::{ContactMessage, EmailRelay};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const IO_TIMEOUT: Duration = Duration::from_secs(15);

/// Request body understood by the relay service.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

/// Posts contact messages to the configured relay over TLS.
pub struct HttpsRelay {
    config: RelayConfig,
    endpoint: Endpoint,
    tls: Arc<ClientConfig>,
}

impl HttpsRelay {
    /// Build a relay client trusting Mozilla's root CA bundle.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let endpoint = Endpoint::parse(&config.endpoint)?;
        let root_store =
            rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        Ok(Self {
            config,
            endpoint,
            tls: Arc::new(tls),
        })
    }

    /// JSON body for `msg`.
    pub fn request_body(&self, msg: &ContactMessage) -> Result<String> {
        let req = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: msg,
        };
        Ok(serde_json::to_string(&req)?)
    }

    fn connect(&self) -> Result<rustls::StreamOwned<rustls::ClientConnection, TcpStream>> {
        let Endpoint { host, port, .. } = &self.endpoint;
        let addr = format!("{host}:{port}")
            .to_socket_addrs()
            .map_err(|e| TermfolioError::Net(format!("DNS resolution failed: {e}")))?
            .next()
            .ok_or_else(|| TermfolioError::Net(format!("no addresses for {host}:{port}")))?;

        let tcp = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
            .map_err(|e| TermfolioError::Net(format!("TCP connect failed: {e}")))?;
        tcp.set_read_timeout(Some(IO_TIMEOUT))?;
        tcp.set_write_timeout(Some(IO_TIMEOUT))?;

        let sni = ServerName::try_from(host.clone())
            .map_err(|e| TermfolioError::Net(format!("invalid server name: {e}")))?;
        let conn = rustls::ClientConnection::new(Arc::clone(&self.tls), sni)
            .map_err(|e| TermfolioError::Net(format!("TLS init: {e}")))?;
        Ok(rustls::StreamOwned::new(conn, tcp))
    }
}

impl EmailRelay for HttpsRelay {
    fn send(&self, msg: &ContactMessage) -> Result<()> {
        let body = self.request_body(msg)?;
        let request = http::build_post(&self.endpoint, &body);
        log::debug!(
            "Posting contact message to {}{}",
            self.endpoint.host,
            self.endpoint.path
        );

        let mut stream = self.connect()?;
        let status = http::exchange(&mut stream, &request)?;
        if !(200..300).contains(&status) {
            return Err(TermfolioError::Net(format!(
                "relay responded with HTTP {status}"
            )));
        }
        log::info!("Contact message accepted by relay (HTTP {status})");
        Ok(())
    }
}
