//! Shared helpers for integration tests.

#![allow(dead_code)]

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::x509::{X509Builder, X509NameBuilder};
use std::path::{Path, PathBuf};

pub const SUBSCRIPTION_ID: &str = "0b1f6471-1bf0-4dda-aec3-cb9272f09590";

pub const OPERATION_SUCCEEDED: &str = r#"<Operation xmlns="http://schemas.microsoft.com/windowsazure"><ID>op</ID><Status>Succeeded</Status><HttpStatusCode>200</HttpStatusCode></Operation>"#;

pub const OPERATION_IN_PROGRESS: &str = r#"<Operation xmlns="http://schemas.microsoft.com/windowsazure"><ID>op</ID><Status>InProgress</Status></Operation>"#;

/// Writes a self-signed management certificate (cert + key PEM) into `dir`.
pub fn write_management_certificate(dir: &Path) -> PathBuf {
    let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "integration-test-publisher").unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&pkey).unwrap();
    let serial = BigNum::from_u32(42).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    builder.set_not_after(&Asn1Time::days_from_now(30).unwrap()).unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();
    let cert = builder.build();

    let mut pem = cert.to_pem().unwrap();
    pem.extend(pkey.private_key_to_pem_pkcs8().unwrap());

    let path = dir.join("management.pem");
    std::fs::write(&path, pem).unwrap();
    path
}

pub fn operation_failed(code: &str, message: &str) -> String {
    format!(
        r#"<Operation xmlns="http://schemas.microsoft.com/windowsazure"><ID>op</ID><Status>Failed</Status><HttpStatusCode>400</HttpStatusCode><Error><Code>{}</Code><Message>{}</Message></Error></Operation>"#,
        code, message
    )
}

pub fn service_error(code: &str, message: &str) -> String {
    format!(
        r#"<Error xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance"><Code>{}</Code><Message>{}</Message></Error>"#,
        code, message
    )
}
