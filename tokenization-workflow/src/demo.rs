//! Sample payload: a card number, its security code and a social security number.

use vault_core::{AliasFormat, AliasRequest, AliasUpdate, StorageMode};

pub const CARD_NUMBER: &str = "4111111111111111";
pub const CARD_SECURITY_CODE: &str = "123";
pub const SOCIAL_SECURITY_NUMBER: &str = "078-05-1120";

/// Three values tokenized in a single request.
pub fn batch() -> Vec<AliasRequest> {
    vec![
        AliasRequest::new(AliasFormat::Pfpt, CARD_NUMBER)
            .with_classifiers(["credit-card", "number"])
            .with_storage(StorageMode::Persistent),
        // Volatile storage keeps the security code out of persistent storage.
        AliasRequest::new(AliasFormat::Uuid, CARD_SECURITY_CODE)
            .with_classifiers(["credit-card", "csc"])
            .with_storage(StorageMode::Volatile),
        AliasRequest::new(AliasFormat::Uuid, SOCIAL_SECURITY_NUMBER).with_classifiers(["pii", "ssn"]),
    ]
}

/// Reclassification applied to the first alias.
pub fn reclassification() -> AliasUpdate {
    AliasUpdate::classifiers(["bank-account", "test-tag"])
}
