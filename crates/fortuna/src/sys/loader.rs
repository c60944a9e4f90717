use crate::events::AppEvent;
use async_channel::Sender;
use sortition::source::RosterSource;

/// Fetches the roster once and hands it to the GUI. On failure the pool is
/// left unloaded: the trigger stays disabled for the session and there is no
/// retry short of restarting.
pub async fn run_loader<S: RosterSource>(tx: Sender<AppEvent>, source: S) {
    match source.load().await {
        Ok(roster) => {
            log::info!("Loaded draw roster ({} rows)", roster.len());
            if tx.send(AppEvent::RosterLoaded(roster)).await.is_err() {
                log::warn!("GUI went away before the roster arrived");
            }
        }
        Err(e) => log::error!("Failed to load draw roster: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortition::roster::{Roster, RosterError, Row};
    use sortition::source::{FixedRoster, SourceError};

    struct BrokenSource;

    impl RosterSource for BrokenSource {
        async fn load(&self) -> Result<Roster, SourceError> {
            Err(SourceError::Malformed(RosterError::NotAnArray))
        }
    }

    #[tokio::test]
    async fn delivers_the_loaded_roster() {
        let roster = Roster::new(vec![Row::new(vec!["id".into(), "Alice".into()])]);
        let (tx, rx) = async_channel::bounded(1);

        run_loader(tx, FixedRoster::new(roster.clone())).await;

        let AppEvent::RosterLoaded(delivered) = rx.recv().await.unwrap();
        assert_eq!(delivered, roster);
    }

    #[tokio::test]
    async fn failure_sends_nothing() {
        let (tx, rx) = async_channel::bounded(1);

        run_loader(tx, BrokenSource).await;

        assert!(rx.is_empty());
    }
}
