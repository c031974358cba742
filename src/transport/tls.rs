//! TLS client configuration for collector connections.
//!
//! Secure by default: server certificates verify against the system webpki
//! root set. The `insecure_skip_verify` escape hatch exists for lab
//! deployments fronted by self-signed collectors and disables verification
//! entirely.

use std::sync::Arc;

use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, RootCertStore};

use crate::error::{HepError, Result};

/// Create the TLS client configuration for the collector connection.
pub(crate) fn client_config(insecure_skip_verify: bool) -> ClientConfig {
    if insecure_skip_verify {
        tracing::warn!("TLS certificate verification disabled - DO NOT USE IN PRODUCTION");

        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        ClientConfig::builder().with_root_certificates(root_store).with_no_client_auth()
    }
}

/// Resolve the SNI name for the collector host (DNS name or IP literal).
pub(crate) fn server_name(host: &str) -> Result<ServerName<'static>> {
    ServerName::try_from(host.to_string())
        .map_err(|e| HepError::Tls { reason: format!("invalid TLS server name '{host}': {e}") })
}

/// Certificate verifier that accepts everything. Development only.
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_name_accepts_dns_and_ip_literals() {
        assert!(server_name("collector.example.org").is_ok());
        assert!(server_name("192.168.1.10").is_ok());
        assert!(server_name("2001:db8::1").is_ok());
    }

    #[test]
    fn server_name_rejects_garbage() {
        let err = server_name("not a hostname").unwrap_err();
        assert!(matches!(err, HepError::Tls { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn both_configurations_build() {
        let _ = client_config(false);
        let _ = client_config(true);
    }
}
