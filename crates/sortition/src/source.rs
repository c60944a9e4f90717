use crate::roster::{Roster, RosterError};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SheetUrl(String);

crate::impl_string_newtype!(SheetUrl);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("roster request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("roster payload rejected: {0}")]
    Malformed(#[from] RosterError),
}

/// Where the draw roster comes from. Injectable so the pool and presenter
/// can be exercised without any network.
#[allow(async_fn_in_trait)]
pub trait RosterSource {
    async fn load(&self) -> Result<Roster, SourceError>;
}

/// A spreadsheet-backed endpoint returning a JSON array of rows. One GET at
/// startup, no retry, no auth, whatever timeout the transport defaults to.
#[derive(Debug, Clone)]
pub struct SheetSource {
    url: SheetUrl,
}

impl SheetSource {
    pub fn new(url: SheetUrl) -> Self {
        Self { url }
    }
}

impl RosterSource for SheetSource {
    async fn load(&self) -> Result<Roster, SourceError> {
        let payload = reqwest::get(self.url.as_str())
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(Roster::from_json_slice(&payload)?)
    }
}

/// A roster already in memory, for tests and the terminal draw.
#[derive(Debug, Clone, Default)]
pub struct FixedRoster(Roster);

impl FixedRoster {
    pub fn new(roster: Roster) -> Self {
        Self(roster)
    }
}

impl RosterSource for FixedRoster {
    async fn load(&self) -> Result<Roster, SourceError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Row;

    #[test]
    fn fixed_roster_loads_its_rows() {
        let roster = Roster::new(vec![Row::new(vec!["id".into(), "Alice".into()])]);
        let source = FixedRoster::new(roster.clone());

        let rt = tokio::runtime::Runtime::new().unwrap();
        assert_eq!(rt.block_on(source.load()).unwrap(), roster);
    }
}
