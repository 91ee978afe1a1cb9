use thiserror::Error;

use crate::codec::{self, ParseError, MAX_NAME_LEN, MAX_PIN};
use crate::gist_api::{RemoteStore, TransportError};

/// An authenticated working copy of one account record. Owned by one
/// interactive flow; nothing here is shared or persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    account_id: String,
    pin: u16,
    name: String,
    balance: i64,
}

impl Session {
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pure read of the working copy; never touches the remote store.
    pub fn balance(&self) -> i64 {
        self.balance
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no account with this id")]
    NotFound,

    #[error("incorrect PIN")]
    WrongPin,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("ledger is corrupt: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(i64),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("PIN must be between 0 and {MAX_PIN}, got {0}")]
    InvalidPin(i64),

    #[error("account no longer present in the remote ledger")]
    AccountMissing,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("ledger is corrupt: {0}")]
    Parse(#[from] ParseError),
}

/// The fetch → authenticate → mutate → persist core. All mutating
/// operations update the [`Session`] in memory first and then run
/// [`Self::persist`]; if persisting fails the in-memory change is NOT
/// rolled back, and the returned error is the caller's only signal that
/// the remote ledger may not reflect it.
///
/// Concurrent sessions editing the same account race; the last
/// `replace()` wins. This core does no locking or versioning.
pub struct LedgerService<S: RemoteStore> {
    store: S,
}

impl<S: RemoteStore> LedgerService<S> {
    pub fn new(store: S) -> LedgerService<S> {
        LedgerService { store }
    }

    /// Fetches the ledger and looks the account up by exact id match.
    /// If ids are duplicated (they shouldn't be, but nothing enforces
    /// it) the first match wins.
    pub async fn authenticate(&self, id: &str, pin: u16) -> Result<Session, AuthError> {
        log::info!("Authenticating account {id}...");

        let blob = self.store.fetch().await?;
        let records = codec::parse_ledger(&blob)?;
        let record = records
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(AuthError::NotFound)?;
        if record.pin != pin {
            return Err(AuthError::WrongPin);
        }

        log::info!("Authenticating account {id}...done");
        Ok(Session {
            account_id: record.id,
            pin: record.pin,
            name: record.name,
            balance: record.balance,
        })
    }

    pub async fn withdraw(&self, session: &mut Session, amount: i64) -> Result<(), OperationError> {
        if amount <= 0 {
            return Err(OperationError::InvalidAmount(amount));
        }
        if amount > session.balance {
            return Err(OperationError::InsufficientFunds {
                requested: amount,
                available: session.balance,
            });
        }
        session.balance -= amount;
        self.persist(session).await
    }

    pub async fn deposit(&self, session: &mut Session, amount: i64) -> Result<(), OperationError> {
        if amount <= 0 {
            return Err(OperationError::InvalidAmount(amount));
        }
        session.balance += amount;
        self.persist(session).await
    }

    pub async fn rename_account(
        &self,
        session: &mut Session,
        new_name: &str,
    ) -> Result<(), OperationError> {
        if new_name.is_empty() {
            return Err(OperationError::InvalidName("name is empty".to_string()));
        }
        if new_name.chars().count() > MAX_NAME_LEN {
            return Err(OperationError::InvalidName(format!(
                "name is longer than {MAX_NAME_LEN} chars"
            )));
        }
        if new_name.contains([',', '\n', '\r']) {
            return Err(OperationError::InvalidName(
                "name must not contain commas or line breaks".to_string(),
            ));
        }
        session.name = new_name.to_string();
        self.persist(session).await
    }

    /// Changes the login credential for future `authenticate` calls.
    /// The current session keeps running on its in-memory copy.
    pub async fn change_pin(&self, session: &mut Session, new_pin: i64) -> Result<(), OperationError> {
        if !(0..=i64::from(MAX_PIN)).contains(&new_pin) {
            return Err(OperationError::InvalidPin(new_pin));
        }
        session.pin = new_pin as u16;
        self.persist(session).await
    }

    /// Re-fetches the ledger (never reuses the copy read at
    /// authentication), overwrites the session's record in place and
    /// uploads the whole blob. Every other record round-trips through
    /// parse-then-serialize byte-identically, in its original position.
    async fn persist(&self, session: &Session) -> Result<(), OperationError> {
        let blob = self.store.fetch().await?;
        let mut records = codec::parse_ledger(&blob)?;
        let record = records
            .iter_mut()
            .find(|record| record.id == session.account_id)
            .ok_or(OperationError::AccountMissing)?;
        record.pin = session.pin;
        record.name = session.name.clone();
        record.balance = session.balance;
        self.store.replace(&codec::serialize_ledger(&records)).await?;
        Ok(())
    }
}
