//! Row types mapped straight from the four tables, plus the insert payloads
//! and the field-presence patches used by partial updates.
//!
//! Detail rows carry the joined names the API responses embed, so read paths
//! run one query instead of chasing foreign keys per row.

use sqlx::FromRow;
use time::OffsetDateTime;

/// A franchise entry for one season of one league.
#[derive(Debug, Clone, FromRow)]
pub struct TeamRow {
    /// Primary key.
    pub id: i64,
    /// Franchise name, unique per `(season, league)`.
    pub name: String,
    /// Season the row belongs to.
    pub season: i64,
    /// League label.
    pub league: String,
    /// Win counter.
    pub wins: i64,
    /// Loss counter.
    pub losses: i64,
    /// Tie counter.
    pub ties: i64,
    /// Optimistic-concurrency counter, starts at 1.
    pub version: i64,
    /// False when soft-deleted or season-deactivated.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Insert payload for a team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    /// Franchise name.
    pub name: String,
    /// Season number.
    pub season: i64,
    /// League label.
    pub league: String,
    /// Initial win counter.
    pub wins: i64,
    /// Initial loss counter.
    pub losses: i64,
    /// Initial tie counter.
    pub ties: i64,
    /// Initial visibility.
    pub active: bool,
}

/// Field-presence patch for a team update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    /// New franchise name.
    pub name: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New league label.
    pub league: Option<String>,
    /// New win counter.
    pub wins: Option<i64>,
    /// New loss counter.
    pub losses: Option<i64>,
    /// New tie counter.
    pub ties: Option<i64>,
    /// New visibility flag.
    pub active: Option<bool>,
}

impl TeamPatch {
    /// Merge the supplied fields into `row`, leaving the rest as loaded.
    pub fn apply(&self, row: &mut TeamRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(season) = self.season {
            row.season = season;
        }
        if let Some(league) = &self.league {
            row.league = league.clone();
        }
        if let Some(wins) = self.wins {
            row.wins = wins;
        }
        if let Some(losses) = self.losses {
            row.losses = losses;
        }
        if let Some(ties) = self.ties {
            row.ties = ties;
        }
        if let Some(active) = self.active {
            row.active = active;
        }
    }
}

/// One player's roster entry for a single season.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerRow {
    /// Primary key.
    pub id: i64,
    /// Player name; multiple rows share a name across seasons.
    pub name: String,
    /// Season the roster entry belongs to.
    pub season: i64,
    /// Owning team.
    pub team_id: i64,
    /// Optional jersey label.
    pub jersey_number: Option<String>,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted or season-deactivated.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Player row joined with its team name for API projections.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerDetailRow {
    /// Primary key.
    pub id: i64,
    /// Player name.
    pub name: String,
    /// Season the roster entry belongs to.
    pub season: i64,
    /// Owning team.
    pub team_id: i64,
    /// Owning team's name.
    pub team_name: String,
    /// Optional jersey label.
    pub jersey_number: Option<String>,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted or season-deactivated.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Insert payload for a player.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    /// Player name.
    pub name: String,
    /// Season number.
    pub season: i64,
    /// Owning team id.
    pub team_id: i64,
    /// Optional jersey label.
    pub jersey_number: Option<String>,
    /// Initial visibility.
    pub active: bool,
}

/// Field-presence patch for a player update.
///
/// `jersey_number` is doubly optional: the outer `None` means "leave alone",
/// `Some(None)` clears the label.
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    /// New player name.
    pub name: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New owning team id.
    pub team_id: Option<i64>,
    /// New jersey label (`Some(None)` clears it).
    pub jersey_number: Option<Option<String>>,
    /// New visibility flag.
    pub active: Option<bool>,
}

impl PlayerPatch {
    /// Merge the supplied fields into `row`.
    pub fn apply(&self, row: &mut PlayerRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(season) = self.season {
            row.season = season;
        }
        if let Some(team_id) = self.team_id {
            row.team_id = team_id;
        }
        if let Some(jersey) = &self.jersey_number {
            row.jersey_number = jersey.clone();
        }
        if let Some(active) = self.active {
            row.active = active;
        }
    }
}

/// A scheduled or played game between two teams.
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    /// Primary key.
    pub id: i64,
    /// Week number within the season.
    pub week: i64,
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// First participant; null once the team is hard-deleted.
    pub team1_id: Option<i64>,
    /// First participant's score.
    pub team1_score: i64,
    /// Second participant.
    pub team2_id: Option<i64>,
    /// Second participant's score.
    pub team2_score: i64,
    /// Winner, when recorded; must be one of the two participants.
    pub winning_team_id: Option<i64>,
    /// Completed games reject further stat mutations.
    pub completed: bool,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Game row joined with participant and winner names.
#[derive(Debug, Clone, FromRow)]
pub struct GameDetailRow {
    /// Primary key.
    pub id: i64,
    /// Week number within the season.
    pub week: i64,
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// First participant.
    pub team1_id: Option<i64>,
    /// First participant's name.
    pub team1_name: Option<String>,
    /// First participant's score.
    pub team1_score: i64,
    /// Second participant.
    pub team2_id: Option<i64>,
    /// Second participant's name.
    pub team2_name: Option<String>,
    /// Second participant's score.
    pub team2_score: i64,
    /// Winner, when recorded.
    pub winning_team_id: Option<i64>,
    /// Winner's name, when recorded.
    pub winning_team_name: Option<String>,
    /// Completed games reject further stat mutations.
    pub completed: bool,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Insert payload for a game.
#[derive(Debug, Clone)]
pub struct NewGame {
    /// Week number.
    pub week: i64,
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// First participant id.
    pub team1_id: i64,
    /// First participant's score.
    pub team1_score: i64,
    /// Second participant id.
    pub team2_id: i64,
    /// Second participant's score.
    pub team2_score: i64,
    /// Winner id, when already known.
    pub winning_team_id: Option<i64>,
}

/// Field-presence patch for a game update.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    /// New week number.
    pub week: Option<i64>,
    /// New league label.
    pub league: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New first participant id.
    pub team1_id: Option<i64>,
    /// New first participant score.
    pub team1_score: Option<i64>,
    /// New second participant id.
    pub team2_id: Option<i64>,
    /// New second participant score.
    pub team2_score: Option<i64>,
    /// New winner id (`Some(None)` clears it).
    pub winning_team_id: Option<Option<i64>>,
    /// New completion flag.
    pub completed: Option<bool>,
}

impl GamePatch {
    /// Merge the supplied fields into `row`.
    pub fn apply(&self, row: &mut GameRow) {
        if let Some(week) = self.week {
            row.week = week;
        }
        if let Some(league) = &self.league {
            row.league = league.clone();
        }
        if let Some(season) = self.season {
            row.season = season;
        }
        if let Some(team1_id) = self.team1_id {
            row.team1_id = Some(team1_id);
        }
        if let Some(score) = self.team1_score {
            row.team1_score = score;
        }
        if let Some(team2_id) = self.team2_id {
            row.team2_id = Some(team2_id);
        }
        if let Some(score) = self.team2_score {
            row.team2_score = score;
        }
        if let Some(winner) = self.winning_team_id {
            row.winning_team_id = winner;
        }
        if let Some(completed) = self.completed {
            row.completed = completed;
        }
    }
}

/// Per-player counters recorded for one game.
#[derive(Debug, Clone, FromRow)]
pub struct StatLineRow {
    /// Primary key.
    pub id: i64,
    /// Player the line belongs to.
    pub player_id: i64,
    /// Game the line was recorded in.
    pub game_id: i64,
    /// Counter columns.
    #[sqlx(flatten)]
    pub counters: StatCounters,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// Stat line joined with player, game, and team context.
#[derive(Debug, Clone, FromRow)]
pub struct StatDetailRow {
    /// Primary key.
    pub id: i64,
    /// Player the line belongs to.
    pub player_id: i64,
    /// Player's name.
    pub player_name: String,
    /// Game the line was recorded in.
    pub game_id: i64,
    /// The game's week number.
    pub game_week: i64,
    /// The game's season number.
    pub game_season: i64,
    /// The game's league.
    pub league: String,
    /// First participant's name.
    pub team1_name: Option<String>,
    /// Second participant's name.
    pub team2_name: Option<String>,
    /// Counter columns.
    #[sqlx(flatten)]
    pub counters: StatCounters,
    /// Optimistic-concurrency counter.
    pub version: i64,
    /// False when soft-deleted.
    pub active: bool,
    /// Row creation time.
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    pub updated_at: OffsetDateTime,
    /// Set when the row was soft-deleted.
    pub deleted_at: Option<OffsetDateTime>,
}

/// The seventeen numeric counters tracked per player per game.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct StatCounters {
    /// Passing touchdowns thrown.
    pub passing_tds: i64,
    /// Completed passes.
    pub passes_completed: i64,
    /// Attempted passes.
    pub passes_attempted: i64,
    /// Interceptions thrown.
    pub interceptions_thrown: i64,
    /// Rushing touchdowns scored as the passer.
    pub qb_rushing_tds: i64,
    /// Receptions.
    pub receptions: i64,
    /// Targets.
    pub targets: i64,
    /// Receiving touchdowns.
    pub receiving_tds: i64,
    /// Dropped passes.
    pub drops: i64,
    /// First downs gained.
    pub first_downs: i64,
    /// Rushing touchdowns.
    pub rushing_tds: i64,
    /// Rush attempts.
    pub rush_attempts: i64,
    /// Flag pulls made on defense.
    pub flag_pulls: i64,
    /// Interceptions caught on defense.
    pub interceptions: i64,
    /// Sacks.
    pub sacks: i64,
    /// Pass breakups.
    pub pass_breakups: i64,
    /// Defensive touchdowns.
    pub def_td: i64,
}

impl StatCounters {
    /// True when every counter is zero.
    pub fn is_empty(&self) -> bool {
        *self == StatCounters::default()
    }

    /// Add another line's counters into this one.
    pub fn accumulate(&mut self, other: &StatCounters) {
        self.passing_tds += other.passing_tds;
        self.passes_completed += other.passes_completed;
        self.passes_attempted += other.passes_attempted;
        self.interceptions_thrown += other.interceptions_thrown;
        self.qb_rushing_tds += other.qb_rushing_tds;
        self.receptions += other.receptions;
        self.targets += other.targets;
        self.receiving_tds += other.receiving_tds;
        self.drops += other.drops;
        self.first_downs += other.first_downs;
        self.rushing_tds += other.rushing_tds;
        self.rush_attempts += other.rush_attempts;
        self.flag_pulls += other.flag_pulls;
        self.interceptions += other.interceptions;
        self.sacks += other.sacks;
        self.pass_breakups += other.pass_breakups;
        self.def_td += other.def_td;
    }
}

/// Insert payload for a stat line.
#[derive(Debug, Clone)]
pub struct NewStatLine {
    /// Player the line belongs to.
    pub player_id: i64,
    /// Game the line was recorded in.
    pub game_id: i64,
    /// Counter values.
    pub counters: StatCounters,
}

/// Field-presence patch for a stat-line update; only counters are mutable.
#[derive(Debug, Clone, Default)]
pub struct StatPatch {
    /// New passing touchdown count.
    pub passing_tds: Option<i64>,
    /// New completed-pass count.
    pub passes_completed: Option<i64>,
    /// New attempted-pass count.
    pub passes_attempted: Option<i64>,
    /// New interceptions-thrown count.
    pub interceptions_thrown: Option<i64>,
    /// New QB rushing touchdown count.
    pub qb_rushing_tds: Option<i64>,
    /// New reception count.
    pub receptions: Option<i64>,
    /// New target count.
    pub targets: Option<i64>,
    /// New receiving touchdown count.
    pub receiving_tds: Option<i64>,
    /// New drop count.
    pub drops: Option<i64>,
    /// New first-down count.
    pub first_downs: Option<i64>,
    /// New rushing touchdown count.
    pub rushing_tds: Option<i64>,
    /// New rush-attempt count.
    pub rush_attempts: Option<i64>,
    /// New flag-pull count.
    pub flag_pulls: Option<i64>,
    /// New defensive interception count.
    pub interceptions: Option<i64>,
    /// New sack count.
    pub sacks: Option<i64>,
    /// New pass-breakup count.
    pub pass_breakups: Option<i64>,
    /// New defensive touchdown count.
    pub def_td: Option<i64>,
}

impl StatPatch {
    /// Merge the supplied counters into `counters`.
    pub fn apply(&self, counters: &mut StatCounters) {
        if let Some(v) = self.passing_tds {
            counters.passing_tds = v;
        }
        if let Some(v) = self.passes_completed {
            counters.passes_completed = v;
        }
        if let Some(v) = self.passes_attempted {
            counters.passes_attempted = v;
        }
        if let Some(v) = self.interceptions_thrown {
            counters.interceptions_thrown = v;
        }
        if let Some(v) = self.qb_rushing_tds {
            counters.qb_rushing_tds = v;
        }
        if let Some(v) = self.receptions {
            counters.receptions = v;
        }
        if let Some(v) = self.targets {
            counters.targets = v;
        }
        if let Some(v) = self.receiving_tds {
            counters.receiving_tds = v;
        }
        if let Some(v) = self.drops {
            counters.drops = v;
        }
        if let Some(v) = self.first_downs {
            counters.first_downs = v;
        }
        if let Some(v) = self.rushing_tds {
            counters.rushing_tds = v;
        }
        if let Some(v) = self.rush_attempts {
            counters.rush_attempts = v;
        }
        if let Some(v) = self.flag_pulls {
            counters.flag_pulls = v;
        }
        if let Some(v) = self.interceptions {
            counters.interceptions = v;
        }
        if let Some(v) = self.sacks {
            counters.sacks = v;
        }
        if let Some(v) = self.pass_breakups {
            counters.pass_breakups = v;
        }
        if let Some(v) = self.def_td {
            counters.def_td = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn team_fixture() -> TeamRow {
        TeamRow {
            id: 1,
            name: "Eagles".into(),
            season: 1,
            league: "A".into(),
            wins: 2,
            losses: 1,
            ties: 0,
            version: 3,
            active: true,
            created_at: datetime!(2025-09-01 12:00 UTC),
            updated_at: datetime!(2025-09-08 12:00 UTC),
            deleted_at: None,
        }
    }

    #[test]
    fn empty_patch_leaves_row_untouched() {
        let mut row = team_fixture();
        TeamPatch::default().apply(&mut row);
        assert_eq!(row.name, "Eagles");
        assert_eq!(row.wins, 2);
        assert!(row.active);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut row = team_fixture();
        let patch = TeamPatch {
            wins: Some(3),
            active: Some(false),
            ..TeamPatch::default()
        };
        patch.apply(&mut row);
        assert_eq!(row.wins, 3);
        assert!(!row.active);
        assert_eq!(row.losses, 1);
        assert_eq!(row.name, "Eagles");
    }

    #[test]
    fn player_patch_clears_jersey_with_explicit_null() {
        let mut row = PlayerRow {
            id: 1,
            name: "Jon".into(),
            season: 1,
            team_id: 1,
            jersey_number: Some("12".into()),
            version: 1,
            active: true,
            created_at: datetime!(2025-09-01 12:00 UTC),
            updated_at: datetime!(2025-09-01 12:00 UTC),
            deleted_at: None,
        };

        PlayerPatch {
            jersey_number: Some(None),
            ..PlayerPatch::default()
        }
        .apply(&mut row);
        assert_eq!(row.jersey_number, None);

        // Absent field leaves the label alone.
        row.jersey_number = Some("12".into());
        PlayerPatch::default().apply(&mut row);
        assert_eq!(row.jersey_number.as_deref(), Some("12"));
    }

    #[test]
    fn game_patch_clears_winner() {
        let mut row = GameRow {
            id: 1,
            week: 1,
            league: "A".into(),
            season: 1,
            team1_id: Some(1),
            team1_score: 21,
            team2_id: Some(2),
            team2_score: 14,
            winning_team_id: Some(1),
            completed: false,
            version: 1,
            active: true,
            created_at: datetime!(2025-09-01 12:00 UTC),
            updated_at: datetime!(2025-09-01 12:00 UTC),
            deleted_at: None,
        };

        GamePatch {
            winning_team_id: Some(None),
            ..GamePatch::default()
        }
        .apply(&mut row);
        assert_eq!(row.winning_team_id, None);
        assert_eq!(row.team1_score, 21);
    }

    #[test]
    fn counters_accumulate_and_report_empty() {
        let mut total = StatCounters::default();
        assert!(total.is_empty());

        let line = StatCounters {
            passing_tds: 3,
            passes_attempted: 10,
            ..StatCounters::default()
        };
        total.accumulate(&line);
        total.accumulate(&line);
        assert_eq!(total.passing_tds, 6);
        assert_eq!(total.passes_attempted, 20);
        assert!(!total.is_empty());
    }
}
