//! TLS client configuration shared by every HTTPS connection the process makes.

use once_cell::sync::OnceCell;
use rustls::{ClientConfig, RootCertStore};
use std::sync::Arc;

static TLS_CONFIG: OnceCell<Arc<ClientConfig>> = OnceCell::new();

/// Get the shared TLS client configuration, building it on first use.
///
/// Server certificates are verified against the webpki root store. The
/// `ring` provider is passed explicitly, so no process-wide default provider
/// has to be installed first.
pub fn shared_tls_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    TLS_CONFIG
        .get_or_try_init(|| {
            let mut root_cert_store = RootCertStore::empty();
            root_cert_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

            let config = ClientConfig::builder_with_provider(Arc::new(
                rustls::crypto::ring::default_provider(),
            ))
            .with_safe_default_protocol_versions()?
            .with_root_certificates(root_cert_store)
            .with_no_client_auth();

            Ok::<_, rustls::Error>(Arc::new(config))
        })
        .cloned()
}
