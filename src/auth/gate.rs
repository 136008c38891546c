use subtle::ConstantTimeEq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Proof that the admin gate was unlocked. Store mutations take one, so code
/// holding a locked gate has no way to add, edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    _private: (),
}

impl AdminSession {
    /// For credentials already verified elsewhere (a signed session cookie).
    pub(crate) fn verified() -> Self {
        Self { _private: () }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    WrongPassword,
    Locked,
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateError::WrongPassword => write!(f, "Incorrect password"),
            GateError::Locked => write!(f, "Admin area is locked"),
        }
    }
}

/// Shared-secret gate in front of the admin mutations. Starts locked.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
    state: GateState,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            state: GateState::Locked,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Unlock when `attempt` equals the secret exactly. A mismatch leaves the
    /// gate locked.
    pub fn unlock(&mut self, attempt: &str) -> Result<AdminSession, GateError> {
        if secret_matches(attempt, &self.secret) {
            self.state = GateState::Unlocked;
            Ok(AdminSession::verified())
        } else {
            self.state = GateState::Locked;
            Err(GateError::WrongPassword)
        }
    }

    pub fn lock(&mut self) {
        self.state = GateState::Locked;
    }

    pub fn session(&self) -> Result<AdminSession, GateError> {
        match self.state {
            GateState::Unlocked => Ok(AdminSession::verified()),
            GateState::Locked => Err(GateError::Locked),
        }
    }
}

/// Constant-time comparison. An empty secret never matches.
pub fn secret_matches(attempt: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    attempt.as_bytes().ct_eq(secret.as_bytes()).into()
}
