use sortition::roster::Roster;

#[derive(Debug, Clone)]
pub enum AppEvent {
    RosterLoaded(Roster),
}
