use chrono::{DateTime, Utc};
use uuid::Uuid;

/// State carried from phone verification to email registration.
///
/// Lives for the lifetime of one flow; the verified phone is overwritten by
/// every successful lookup and is never cleared.
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    verified_phone: Option<String>,
    verified_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            verified_phone: None,
            verified_at: None,
        }
    }

    /// Identifier used to correlate log lines of one flow
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record a phone number the registration service has found
    pub fn verify(&mut self, phone: impl Into<String>) {
        self.verified_phone = Some(phone.into());
        self.verified_at = Some(Utc::now());
    }

    pub fn verified_phone(&self) -> Option<&str> {
        self.verified_phone.as_deref()
    }

    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
