//! In-memory account and emergency-contact stores.
//!
//! The mock backend keeps no durable state: accounts and contacts live in
//! process memory behind `RwLock`s and vanish on restart. The lock scope is
//! kept to single operations; handlers never hold a guard across an await.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};

use safegas_types::models::{EmergencyContact, NewEmergencyContact, ProfileData, ProfileUpdate};
use zeroize::Zeroizing;

use super::credentials::{LoginCredentials, Registration};
use super::error::DomainError;

/// One registered account.
#[derive(Debug)]
struct UserRecord {
    username: String,
    email: String,
    password: Zeroizing<String>,
    device_unique_code: String,
    phone_number: Option<String>,
    profile_image: Option<String>,
}

/// Registered accounts, keyed by email.
#[derive(Default)]
pub struct UserRegistry {
    inner: RwLock<HashMap<String, UserRecord>>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account; duplicate emails conflict.
    pub fn register(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("user registry lock poisoned"))?;
        if users.contains_key(registration.email()) {
            return Err(DomainError::conflict("A user with this email already exists."));
        }
        users.insert(
            registration.email().to_owned(),
            UserRecord {
                username: registration.username().to_owned(),
                email: registration.email().to_owned(),
                password: Zeroizing::new(registration.password().to_owned()),
                device_unique_code: registration.device_unique_code().to_owned(),
                phone_number: None,
                profile_image: None,
            },
        );
        Ok(())
    }

    /// Check login credentials against the registry.
    ///
    /// With `allow_any_credentials` set the check is skipped entirely; that
    /// restores the original development-stub behaviour and is only enabled
    /// explicitly through configuration.
    pub fn verify_login(
        &self,
        credentials: &LoginCredentials,
        allow_any_credentials: bool,
    ) -> Result<(), DomainError> {
        if allow_any_credentials {
            tracing::warn!(email = %credentials.email(), "credential check skipped (any-credentials mode)");
            return Ok(());
        }
        let users = self
            .inner
            .read()
            .map_err(|_| DomainError::internal("user registry lock poisoned"))?;
        let matches = users
            .get(credentials.email())
            .is_some_and(|record| record.password.as_str() == credentials.password());
        if matches {
            Ok(())
        } else {
            Err(DomainError::unauthorized("Invalid email or password."))
        }
    }

    /// Profile view for an account.
    ///
    /// Accounts minted through any-credentials mode have no stored record, so
    /// the view is fabricated from the email the way the original service
    /// fell back to a `DEV_`-prefixed device code.
    pub fn profile(&self, email: &str) -> Result<ProfileData, DomainError> {
        let users = self
            .inner
            .read()
            .map_err(|_| DomainError::internal("user registry lock poisoned"))?;
        Ok(users.get(email).map_or_else(
            || ProfileData {
                username: email.split('@').next().unwrap_or(email).to_owned(),
                email: email.to_owned(),
                phone_number: None,
                profile_image: None,
                device_unique_code: format!("DEV_{}", email.len()),
            },
            |record| ProfileData {
                username: record.username.clone(),
                email: record.email.clone(),
                phone_number: record.phone_number.clone(),
                profile_image: record.profile_image.clone(),
                device_unique_code: record.device_unique_code.clone(),
            },
        ))
    }

    /// Apply a sparse profile update; absent fields stay untouched.
    pub fn update_profile(&self, email: &str, update: &ProfileUpdate) -> Result<(), DomainError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("user registry lock poisoned"))?;
        let record = users
            .get_mut(email)
            .ok_or_else(|| DomainError::not_found("No such account."))?;
        if let Some(username) = &update.username {
            record.username = username.clone();
        }
        if let Some(new_email) = &update.email {
            record.email = new_email.clone();
        }
        if let Some(phone) = &update.phone_number {
            record.phone_number = Some(phone.clone());
        }
        Ok(())
    }

    /// Record the URL of an uploaded profile image.
    pub fn set_profile_image(&self, email: &str, url: &str) -> Result<(), DomainError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("user registry lock poisoned"))?;
        if let Some(record) = users.get_mut(email) {
            record.profile_image = Some(url.to_owned());
        }
        Ok(())
    }
}

/// Per-account emergency contacts.
///
/// Each account starts with the two fixture contacts the original service
/// shipped, then supports adds and deletes for the session's lifetime.
pub struct ContactDirectory {
    inner: RwLock<HashMap<String, Vec<EmergencyContact>>>,
    next_id: AtomicU32,
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            // Seeded contacts take ids 1 and 2.
            next_id: AtomicU32::new(100),
        }
    }
}

impl ContactDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn seeded() -> Vec<EmergencyContact> {
        vec![
            EmergencyContact {
                id: 1,
                name: "Emergency Services".to_owned(),
                phone_number: "911".to_owned(),
                relationship: "Emergency Service".to_owned(),
                is_primary: true,
            },
            EmergencyContact {
                id: 2,
                name: "John Doe".to_owned(),
                phone_number: "+1234567890".to_owned(),
                relationship: "Family".to_owned(),
                is_primary: false,
            },
        ]
    }

    /// All contacts for an account.
    pub fn list(&self, email: &str) -> Result<Vec<EmergencyContact>, DomainError> {
        let mut contacts = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("contact directory lock poisoned"))?;
        Ok(contacts
            .entry(email.to_owned())
            .or_insert_with(Self::seeded)
            .clone())
    }

    /// Store a new contact and return it with its assigned id.
    pub fn add(
        &self,
        email: &str,
        new_contact: NewEmergencyContact,
    ) -> Result<EmergencyContact, DomainError> {
        let mut contacts = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("contact directory lock poisoned"))?;
        let contact = EmergencyContact {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: new_contact.name,
            phone_number: new_contact.phone_number,
            relationship: new_contact.relationship,
            is_primary: new_contact.is_primary,
        };
        contacts
            .entry(email.to_owned())
            .or_insert_with(Self::seeded)
            .push(contact.clone());
        Ok(contact)
    }

    /// Delete a contact by id.
    pub fn delete(&self, email: &str, id: u32) -> Result<(), DomainError> {
        let mut contacts = self
            .inner
            .write()
            .map_err(|_| DomainError::internal("contact directory lock poisoned"))?;
        let list = contacts
            .entry(email.to_owned())
            .or_insert_with(Self::seeded);
        let before = list.len();
        list.retain(|contact| contact.id != id);
        if list.len() == before {
            return Err(DomainError::not_found("No such contact."));
        }
        Ok(())
    }
}
