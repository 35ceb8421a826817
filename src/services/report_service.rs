//! Standings and leaderboard computation.
//!
//! Both reports are pure functions over rows fetched in one query, fronted by
//! the TTL caches in the shared state.

use indexmap::IndexMap;

use crate::{
    dao::{
        models::{StatCounters, StatDetailRow, TeamRow},
        sqlite::StatQuery,
    },
    dto::reports::{
        DefenseLeader, LeaderboardParams, LeaderboardReport, LeaderboardScope, PassingLeader,
        ReceivingLeader, RushingLeader, StandingsEntry, StandingsGroup, StandingsParams,
    },
    error::ServiceError,
    state::SharedState,
};

/// Standings for every requested league/season pairing, cached per query.
pub async fn standings(
    state: &SharedState,
    params: StandingsParams,
) -> Result<Vec<StandingsGroup>, ServiceError> {
    let key = (params.season, params.league.clone());
    if let Some(cached) = state.standings_cache().get(&key).await {
        return Ok(cached);
    }

    let teams = state
        .store()
        .list_active_teams(params.season, params.league.as_deref())
        .await?;
    let groups = compute_standings(teams);

    state.standings_cache().insert(key, groups.clone()).await;
    Ok(groups)
}

/// The four leaderboard sections for one season slice, cached per query.
pub async fn leaderboard(
    state: &SharedState,
    params: LeaderboardParams,
) -> Result<LeaderboardReport, ServiceError> {
    let key = (params.season, params.scope);
    if let Some(cached) = state.leaderboard_cache().get(&key).await {
        return Ok(cached);
    }

    let rows = state
        .store()
        .query_stats(StatQuery {
            season: Some(params.season),
            ..StatQuery::default()
        })
        .await?;
    let in_scope = rows
        .into_iter()
        .filter(|row| scope_allows(params.scope, state.config().is_playoff_week(row.game_week)))
        .collect();
    let report = build_leaderboard(params.season, params.scope, in_scope);

    state.leaderboard_cache().insert(key, report.clone()).await;
    Ok(report)
}

/// Whether a game's stats belong to the requested slice of the season.
fn scope_allows(scope: LeaderboardScope, is_playoff_week: bool) -> bool {
    match scope {
        LeaderboardScope::Regular => !is_playoff_week,
        LeaderboardScope::Playoffs => is_playoff_week,
        LeaderboardScope::Full => true,
    }
}

/// Sort key for a team's record: win percentage (ties weighted half), then
/// wins, then fewest losses.
fn record_key(team: &TeamRow) -> (f64, i64, i64) {
    let games_played = team.wins + team.losses + team.ties;
    let win_pct = if games_played > 0 {
        (team.wins as f64 + 0.5 * team.ties as f64) / games_played as f64
    } else {
        0.0
    };
    (win_pct, team.wins, -team.losses)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Group active teams by league/season and rank each group.
///
/// Groups are ordered season-descending then league; inside a group, teams
/// with an identical record share a dense `T-n` rank and keep their insertion
/// order, and the next distinct team's rank accounts for the tie group size.
pub fn compute_standings(teams: Vec<TeamRow>) -> Vec<StandingsGroup> {
    let mut by_group: IndexMap<(String, i64), Vec<TeamRow>> = IndexMap::new();
    for team in teams {
        by_group
            .entry((team.league.clone(), team.season))
            .or_default()
            .push(team);
    }

    let mut groups: Vec<((String, i64), Vec<TeamRow>)> = by_group.into_iter().collect();
    groups.sort_by(|((league_a, season_a), _), ((league_b, season_b), _)| {
        season_b.cmp(season_a).then_with(|| league_a.cmp(league_b))
    });

    groups
        .into_iter()
        .map(|((league, season), mut group)| {
            // Stable sort keeps insertion order among equal records.
            group.sort_by(|a, b| {
                let (key_a, key_b) = (record_key(a), record_key(b));
                key_b
                    .0
                    .total_cmp(&key_a.0)
                    .then_with(|| key_b.1.cmp(&key_a.1))
                    .then_with(|| key_b.2.cmp(&key_a.2))
            });

            let keys: Vec<(f64, i64, i64)> = group.iter().map(record_key).collect();
            let mut entries = Vec::with_capacity(group.len());
            let mut start = 0;
            while start < group.len() {
                let mut end = start + 1;
                while end < group.len() && keys[end] == keys[start] {
                    end += 1;
                }
                let rank = start + 1;
                let tied = end - start > 1;
                for team in &group[start..end] {
                    let games_played = team.wins + team.losses + team.ties;
                    entries.push(StandingsEntry {
                        rank: if tied {
                            format!("T-{rank}")
                        } else {
                            rank.to_string()
                        },
                        team: team.name.clone(),
                        wins: team.wins,
                        losses: team.losses,
                        ties: team.ties,
                        win_pct: round3(record_key(team).0),
                        games_played,
                    });
                }
                start = end;
            }

            StandingsGroup {
                league,
                season,
                entries,
            }
        })
        .collect()
}

/// Sum each player's counters and build the four sections. Grouping is by
/// player name, in first-appearance order; rows whose section counters are
/// all zero are dropped from that section.
pub fn build_leaderboard(
    season: i64,
    scope: LeaderboardScope,
    rows: Vec<StatDetailRow>,
) -> LeaderboardReport {
    let mut totals: IndexMap<String, StatCounters> = IndexMap::new();
    for row in rows {
        totals
            .entry(row.player_name)
            .or_default()
            .accumulate(&row.counters);
    }

    let mut passing: Vec<PassingLeader> = totals
        .iter()
        .filter(|(_, c)| {
            c.passing_tds != 0
                || c.passes_completed != 0
                || c.passes_attempted != 0
                || c.interceptions_thrown != 0
                || c.qb_rushing_tds != 0
        })
        .map(|(player, c)| PassingLeader {
            player: player.clone(),
            passes_completed: c.passes_completed,
            passes_attempted: c.passes_attempted,
            completion_pct: completion_pct(c.passes_completed, c.passes_attempted),
            passing_tds: c.passing_tds,
            qb_rushing_tds: c.qb_rushing_tds,
            interceptions_thrown: c.interceptions_thrown,
        })
        .collect();
    passing.sort_by(|a, b| {
        (b.passing_tds, b.qb_rushing_tds).cmp(&(a.passing_tds, a.qb_rushing_tds))
    });

    let mut rushing: Vec<RushingLeader> = totals
        .iter()
        .filter(|(_, c)| c.rush_attempts > 0)
        .map(|(player, c)| RushingLeader {
            player: player.clone(),
            rush_attempts: c.rush_attempts,
            rushing_tds: c.rushing_tds,
            first_downs: c.first_downs,
        })
        .collect();
    rushing.sort_by(|a, b| b.rushing_tds.cmp(&a.rushing_tds));

    let mut receiving: Vec<ReceivingLeader> = totals
        .iter()
        .filter(|(_, c)| {
            c.receptions != 0
                || c.targets != 0
                || c.receiving_tds != 0
                || c.drops != 0
                || c.first_downs != 0
        })
        .map(|(player, c)| ReceivingLeader {
            player: player.clone(),
            receptions: c.receptions,
            targets: c.targets,
            receiving_tds: c.receiving_tds,
            drops: c.drops,
            first_downs: c.first_downs,
        })
        .collect();
    receiving.sort_by(|a, b| b.receptions.cmp(&a.receptions));

    let mut defense: Vec<DefenseLeader> = totals
        .iter()
        .filter(|(_, c)| {
            c.interceptions != 0
                || c.sacks != 0
                || c.def_td != 0
                || c.flag_pulls != 0
                || c.pass_breakups != 0
        })
        .map(|(player, c)| DefenseLeader {
            player: player.clone(),
            interceptions: c.interceptions,
            sacks: c.sacks,
            def_td: c.def_td,
            flag_pulls: c.flag_pulls,
            pass_breakups: c.pass_breakups,
        })
        .collect();
    defense.sort_by(|a, b| b.flag_pulls.cmp(&a.flag_pulls));

    LeaderboardReport {
        season,
        scope,
        passing,
        rushing,
        receiving,
        defense,
    }
}

/// Completion percentage rounded to one decimal; 0.0 with no attempts.
fn completion_pct(completed: i64, attempted: i64) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    round1(completed as f64 / attempted as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn team(name: &str, wins: i64, losses: i64, ties: i64) -> TeamRow {
        TeamRow {
            id: 0,
            name: name.into(),
            season: 1,
            league: "A".into(),
            wins,
            losses,
            ties,
            version: 1,
            active: true,
            created_at: datetime!(2025-09-01 12:00 UTC),
            updated_at: datetime!(2025-09-01 12:00 UTC),
            deleted_at: None,
        }
    }

    fn stat_row(player: &str, week: i64, counters: StatCounters) -> StatDetailRow {
        StatDetailRow {
            id: 0,
            player_id: 0,
            player_name: player.into(),
            game_id: 0,
            game_week: week,
            game_season: 1,
            league: "A".into(),
            team1_name: Some("Eagles".into()),
            team2_name: Some("Hawks".into()),
            counters,
            version: 1,
            active: true,
            created_at: datetime!(2025-09-01 12:00 UTC),
            updated_at: datetime!(2025-09-01 12:00 UTC),
            deleted_at: None,
        }
    }

    #[test]
    fn zero_games_means_zero_win_pct() {
        let groups = compute_standings(vec![team("Eagles", 0, 0, 0)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries[0].win_pct, 0.0);
        assert_eq!(groups[0].entries[0].games_played, 0);
        assert_eq!(groups[0].entries[0].rank, "1");
    }

    #[test]
    fn ties_weigh_half_a_win() {
        let groups = compute_standings(vec![team("Eagles", 2, 1, 1)]);
        // (2 + 0.5) / 4 = 0.625
        assert_eq!(groups[0].entries[0].win_pct, 0.625);
    }

    #[test]
    fn tied_teams_share_a_rank_and_the_next_rank_skips() {
        let groups = compute_standings(vec![
            team("Eagles", 3, 1, 0),
            team("Hawks", 3, 1, 0),
            team("Sharks", 1, 3, 0),
        ]);
        let entries = &groups[0].entries;
        assert_eq!(entries[0].rank, "T-1");
        assert_eq!(entries[1].rank, "T-1");
        assert_eq!(entries[2].rank, "3");
        // Stable order within the tie group.
        assert_eq!(entries[0].team, "Eagles");
        assert_eq!(entries[1].team, "Hawks");
    }

    #[test]
    fn groups_split_by_league_and_sort_by_season() {
        let mut division_b = team("Sharks", 0, 0, 0);
        division_b.league = "B".into();
        let mut next_season = team("Eagles", 0, 0, 0);
        next_season.season = 2;

        let groups = compute_standings(vec![team("Eagles", 0, 0, 0), division_b, next_season]);
        assert_eq!(groups.len(), 3);
        // Newest season first, then league order.
        assert_eq!((groups[0].league.as_str(), groups[0].season), ("A", 2));
        assert_eq!((groups[1].league.as_str(), groups[1].season), ("A", 1));
        assert_eq!((groups[2].league.as_str(), groups[2].season), ("B", 1));
    }

    #[test]
    fn leaderboard_sums_across_games() {
        let passing = |tds: i64, completed: i64, attempted: i64| StatCounters {
            passing_tds: tds,
            passes_completed: completed,
            passes_attempted: attempted,
            ..StatCounters::default()
        };
        let report = build_leaderboard(
            1,
            LeaderboardScope::Full,
            vec![
                stat_row("Jon", 1, passing(3, 10, 15)),
                stat_row("Jon", 2, passing(2, 5, 10)),
                stat_row("Ana", 1, passing(4, 8, 8)),
            ],
        );

        assert_eq!(report.passing.len(), 2);
        // Ana leads on touchdowns.
        assert_eq!(report.passing[0].player, "Ana");
        assert_eq!(report.passing[0].completion_pct, 100.0);
        assert_eq!(report.passing[1].player, "Jon");
        assert_eq!(report.passing[1].passing_tds, 5);
        assert_eq!(report.passing[1].passes_completed, 15);
        assert_eq!(report.passing[1].completion_pct, 60.0);
        // No one rushed or received.
        assert!(report.rushing.is_empty());
        assert!(report.receiving.is_empty());
    }

    #[test]
    fn completion_pct_handles_zero_attempts_and_rounds() {
        assert_eq!(completion_pct(0, 0), 0.0);
        assert_eq!(completion_pct(2, 3), 66.7);
    }

    #[test]
    fn all_zero_rows_are_dropped() {
        let report = build_leaderboard(
            1,
            LeaderboardScope::Full,
            vec![stat_row("Ghost", 1, StatCounters::default())],
        );
        assert!(report.passing.is_empty());
        assert!(report.rushing.is_empty());
        assert!(report.receiving.is_empty());
        assert!(report.defense.is_empty());
    }

    #[test]
    fn scope_splits_regular_and_playoff_weeks() {
        assert!(scope_allows(LeaderboardScope::Regular, false));
        assert!(!scope_allows(LeaderboardScope::Regular, true));
        assert!(scope_allows(LeaderboardScope::Playoffs, true));
        assert!(!scope_allows(LeaderboardScope::Playoffs, false));
        assert!(scope_allows(LeaderboardScope::Full, true));
        assert!(scope_allows(LeaderboardScope::Full, false));
    }
}
