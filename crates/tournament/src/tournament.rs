use super::*;
use arb_auth::Identity;
use arb_auth::Member;
use arb_core::Arbitrary;
use arb_core::DRAW;
use arb_core::ID;
use arb_core::MIN_ENTRANTS;
use arb_core::REMATCH_FLOOR;
use arb_core::ROUNDS_LARGE;
use arb_core::ROUNDS_SMALL;
use arb_core::SMALL_FIELD;
use arb_core::Tourney;
use arb_core::Unique;
use arb_core::WIN;
use arb_rules::Color;
use arb_session::Directory;
use arb_session::GameSession;
use arb_session::Origin;
use arb_session::Outbox;
use arb_session::Outcome;
use arb_session::Report;
use arb_session::Seat;
use arb_session::ServerMessage;
use arb_session::Standing;
use arb_session::TournamentState;
use std::collections::HashSet;
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Waiting,
    Running,
    Finished,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// A Swiss-style event over a fixed number of rounds.
///
/// The roster vector preserves registration order, which doubles as the
/// stable tie order everywhere scores are ranked. Games live in the shared
/// [`Directory`]; the tournament tracks their ids in `active` and settles
/// rounds as completion reports drain it.
pub struct Tournament {
    id: ID<Tourney>,
    name: String,
    status: Status,
    roster: Vec<Entrant>,
    rounds: Vec<Round>,
    current: usize,
    total: usize,
    active: HashSet<ID<GameSession>>,
    reports: UnboundedSender<Report>,
    ticks: UnboundedSender<ID<Tourney>>,
    breaker: Breaker,
}

impl Unique<Tourney> for Tournament {
    fn id(&self) -> ID<Tourney> {
        self.id
    }
}

impl Tournament {
    pub fn new(
        name: &str,
        reports: UnboundedSender<Report>,
        ticks: UnboundedSender<ID<Tourney>>,
    ) -> Self {
        let id = ID::default();
        log::info!("[tournament {}] \"{}\" open for registration", id, name);
        Self {
            id,
            name: name.to_string(),
            status: Status::Waiting,
            roster: vec![],
            rounds: vec![],
            current: 0,
            total: 0,
            active: HashSet::new(),
            reports,
            ticks,
            breaker: Breaker::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn registered(&self, who: ID<Member>) -> bool {
        self.roster
            .iter()
            .any(|entrant| entrant.identity().id == who)
    }

    /// Add a player while Waiting. Registering again is a reconnect: the
    /// entrant keeps their record and only the connection is replaced.
    pub fn register(&mut self, identity: Identity, outbox: Outbox) -> Result<(), TournamentError> {
        if self.status != Status::Waiting {
            return Err(TournamentError::Closed);
        }
        let id = self.id;
        match self.entrant_mut(identity.id) {
            Some(entrant) => {
                log::debug!("[tournament {}] {} rebound", id, identity);
                entrant.rebind(outbox);
            }
            None => {
                log::info!("[tournament {}] {} registered", self.id, identity);
                self.roster.push(Entrant::new(identity, outbox));
            }
        }
        self.broadcast_state();
        Ok(())
    }

    /// Drop a player from the roster at any stage. Completed rounds keep
    /// their records; only future pairings stop considering the player.
    pub fn remove(&mut self, who: ID<Member>) -> bool {
        let before = self.roster.len();
        self.roster.retain(|entrant| entrant.identity().id != who);
        if self.roster.len() == before {
            return false;
        }
        log::info!("[tournament {}] {} left", self.id, who);
        self.broadcast_state();
        true
    }

    pub fn start(&mut self, directory: &mut Directory) -> Result<(), TournamentError> {
        if self.status != Status::Waiting {
            return Err(TournamentError::NotWaiting);
        }
        if self.roster.len() < MIN_ENTRANTS {
            return Err(TournamentError::TooFewPlayers);
        }
        self.status = Status::Running;
        self.total = match self.roster.len() {
            n if n <= SMALL_FIELD => ROUNDS_SMALL,
            _ => ROUNDS_LARGE,
        };
        log::info!(
            "[tournament {}] starting: {} players, {} rounds",
            self.id,
            self.roster.len(),
            self.total
        );
        self.next_round(directory);
        Ok(())
    }

    /// The inter-round break elapsed. Ticks can outlive the state that
    /// scheduled them, so Running is re-checked before pairing.
    pub fn on_break(&mut self, directory: &mut Directory) {
        if self.status != Status::Running {
            log::debug!("[tournament {}] stale tick ignored", self.id);
            return;
        }
        self.next_round(directory);
    }

    /// Fold a finished game back into the standings. Reports for games not
    /// in the active set (already settled, or never ours) are dropped, which
    /// makes duplicate delivery harmless.
    pub fn handle_completion(&mut self, report: &Report) {
        if !self.active.remove(&report.game) {
            log::debug!(
                "[tournament {}] report for game {} ignored",
                self.id,
                report.game
            );
            return;
        }
        log::info!(
            "[tournament {}] game {} settled by {}",
            self.id,
            report.game,
            report.reason
        );
        self.award(&report.outcome);
        if let Some(record) = self
            .rounds
            .iter_mut()
            .rev()
            .flat_map(|round| round.matches.iter_mut())
            .find(|record| record.game == report.game)
        {
            record.result = Some(report.outcome.clone());
        }
        self.broadcast_state();
        self.check_round();
    }

    /// Read-only projection used for broadcasts and targeted state queries.
    pub fn state(&self) -> TournamentState {
        TournamentState {
            id: self.id,
            name: self.name.clone(),
            state: self.status.to_string(),
            current_round: self.current,
            total_rounds: self.total,
            players: self.standings(),
            rounds: self.rounds.iter().map(Round::record).collect(),
        }
    }

    pub fn broadcast(&self, message: ServerMessage) {
        for entrant in &self.roster {
            entrant.send(message.clone());
        }
    }

    fn broadcast_state(&self) {
        self.broadcast(ServerMessage::update(self.state()));
    }

    fn next_round(&mut self, directory: &mut Directory) {
        if self.roster.len() < MIN_ENTRANTS {
            log::info!(
                "[tournament {}] field shrank to {}, finishing early",
                self.id,
                self.roster.len()
            );
            return self.finish();
        }
        self.current += 1;
        log::info!(
            "[tournament {}] round {} of {}",
            self.id,
            self.current,
            self.total
        );
        let (matches, byes) = self.pair(directory);
        self.rounds.push(Round {
            number: self.current,
            matches,
            byes,
        });
        self.broadcast_state();
        if self.active.is_empty() {
            self.check_round();
        }
    }

    /// Swiss pairing pass: walk players by descending score (ties keep
    /// registration order), pair each with the first unpaired candidate they
    /// have not faced, and bye whoever is left without an opponent. The
    /// no-repeat rule relaxes once the field is too small to honor it.
    /// Players mid-game elsewhere are passed over entirely this round.
    fn pair(&mut self, directory: &mut Directory) -> (Vec<Match>, Vec<Identity>) {
        let mut ranked: Vec<usize> = (0..self.roster.len()).collect();
        ranked.sort_by(|&a, &b| self.roster[b].points().cmp(&self.roster[a].points()));
        let eligible: Vec<usize> = ranked
            .into_iter()
            .filter(|&i| !directory.playing(self.roster[i].identity().id))
            .collect();
        let relaxed = self.roster.len() < REMATCH_FLOOR;
        let mut taken: HashSet<usize> = HashSet::new();
        let mut matches = vec![];
        let mut byes = vec![];
        for (slot, &i) in eligible.iter().enumerate() {
            if taken.contains(&i) {
                continue;
            }
            taken.insert(i);
            let opponent = eligible[slot + 1..].iter().copied().find(|&j| {
                !taken.contains(&j)
                    && (relaxed || !self.roster[i].has_met(self.roster[j].identity().id))
            });
            match opponent {
                Some(j) => {
                    taken.insert(j);
                    if let Some(formed) = self.seat(i, j, directory) {
                        matches.push(formed);
                    }
                }
                None => {
                    self.roster[i].bye();
                    byes.push(self.roster[i].identity().clone());
                    log::info!(
                        "[tournament {}] {} receives a bye",
                        self.id,
                        self.roster[i].identity()
                    );
                }
            }
        }
        (matches, byes)
    }

    /// Open a game for a formed pair, coin-flipping colors, and hand it to
    /// the directory. A refused insert voids the pairing for this round.
    fn seat(&mut self, i: usize, j: usize, directory: &mut Directory) -> Option<Match> {
        let (wi, bi) = match Color::random() {
            Color::White => (i, j),
            Color::Black => (j, i),
        };
        let white = self.roster[wi].identity().clone();
        let black = self.roster[bi].identity().clone();
        let session = GameSession::new(
            Seat::new(white.clone(), self.roster[wi].outbox()),
            Seat::new(black.clone(), self.roster[bi].outbox()),
            Origin::Tournament(self.id),
            self.reports.clone(),
        );
        let game = session.id();
        if let Err(e) = directory.insert(session) {
            log::error!(
                "[tournament {}] could not seat {} vs {}: {}",
                self.id,
                white,
                black,
                e
            );
            return None;
        }
        self.active.insert(game);
        self.roster[wi].met(black.id);
        self.roster[bi].met(white.id);
        self.roster[wi].send(ServerMessage::game_created(game));
        self.roster[bi].send(ServerMessage::game_created(game));
        Some(Match {
            game,
            white,
            black,
            result: None,
        })
    }

    fn award(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Decisive { winner, .. } => {
                if let Some(entrant) = self.entrant_mut(winner.id) {
                    entrant.award(WIN);
                }
            }
            Outcome::Draw { players } => {
                for player in players {
                    if let Some(entrant) = self.entrant_mut(player.id) {
                        entrant.award(DRAW);
                    }
                }
            }
            Outcome::Bye { player } => {
                if let Some(entrant) = self.entrant_mut(player.id) {
                    entrant.bye();
                }
            }
        }
    }

    fn check_round(&mut self) {
        if !self.active.is_empty() {
            return;
        }
        if self.current >= self.total {
            self.finish();
        } else {
            log::info!(
                "[tournament {}] round {} complete, scheduling break",
                self.id,
                self.current
            );
            self.breaker.schedule(self.ticks.clone(), self.id);
        }
    }

    /// Terminal transition. The winner is the best score, byes breaking
    /// ties downward, earlier registration breaking what remains.
    fn finish(&mut self) {
        self.status = Status::Finished;
        self.breaker.cancel();
        let mut ranked: Vec<&Entrant> = self.roster.iter().collect();
        ranked.sort_by(|a, b| b.points().cmp(&a.points()).then(a.byes().cmp(&b.byes())));
        let winner = ranked.first().map(|entrant| entrant.identity().clone());
        match &winner {
            Some(champion) => log::info!("[tournament {}] finished, {} wins", self.id, champion),
            None => log::info!("[tournament {}] finished with an empty field", self.id),
        }
        let standings = self.standings();
        self.broadcast(ServerMessage::finished(winner.as_ref(), standings));
        self.broadcast_state();
    }

    fn standings(&self) -> Vec<Standing> {
        let mut ranked: Vec<&Entrant> = self.roster.iter().collect();
        ranked.sort_by(|a, b| b.points().cmp(&a.points()));
        ranked
            .iter()
            .map(|entrant| Standing {
                id: entrant.identity().id,
                username: entrant.identity().username.clone(),
                score: entrant.points() as f32 / 2.0,
            })
            .collect()
    }

    fn entrant_mut(&mut self, who: ID<Member>) -> Option<&mut Entrant> {
        self.roster
            .iter_mut()
            .find(|entrant| entrant.identity().id == who)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arb_session::Reason;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    struct Rig {
        tournament: Tournament,
        directory: Directory,
        ticks: UnboundedReceiver<ID<Tourney>>,
    }

    fn rig() -> Rig {
        let (report_tx, _reports) = unbounded_channel();
        let (tick_tx, ticks) = unbounded_channel();
        Rig {
            tournament: Tournament::new("Test Open", report_tx, tick_tx),
            directory: Directory::new(),
            ticks,
        }
    }

    fn join(tournament: &mut Tournament) -> (Identity, UnboundedReceiver<ServerMessage>) {
        let identity = Identity::random();
        let (tx, rx) = unbounded_channel();
        tournament.register(identity.clone(), tx).unwrap();
        (identity, rx)
    }

    fn decisive(rig: &Rig, game: ID<GameSession>, winner: &Identity, loser: &Identity) -> Report {
        Report {
            game,
            origin: Origin::Tournament(rig.tournament.id),
            reason: Reason::Resignation,
            outcome: Outcome::Decisive {
                winner: winner.clone(),
                loser: loser.clone(),
            },
        }
    }

    fn settle(rig: &mut Rig, report: Report) {
        rig.directory.remove(report.game);
        rig.tournament.handle_completion(&report);
    }

    fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut seen = vec![];
        while let Ok(message) = rx.try_recv() {
            seen.push(message);
        }
        seen
    }

    #[tokio::test]
    async fn four_players_get_two_matches_and_three_rounds() {
        let mut rig = rig();
        for _ in 0..4 {
            join(&mut rig.tournament);
        }
        rig.tournament.start(&mut rig.directory).unwrap();
        let state = rig.tournament.state();
        assert_eq!(state.state, "running");
        assert_eq!(state.current_round, 1);
        assert_eq!(state.total_rounds, 3);
        assert_eq!(state.rounds[0].games.len(), 2);
        assert!(state.rounds[0].byes.is_empty());
        assert_eq!(rig.directory.len(), 2);
    }

    #[tokio::test]
    async fn big_fields_play_five_rounds() {
        let mut rig = rig();
        for _ in 0..5 {
            join(&mut rig.tournament);
        }
        rig.tournament.start(&mut rig.directory).unwrap();
        assert_eq!(rig.tournament.state().total_rounds, 5);
    }

    #[tokio::test]
    async fn odd_fields_bye_the_leftover_player() {
        let mut rig = rig();
        let (_a, _) = join(&mut rig.tournament);
        let (_b, _) = join(&mut rig.tournament);
        let (c, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let state = rig.tournament.state();
        assert_eq!(state.rounds[0].games.len(), 1);
        assert_eq!(state.rounds[0].byes, vec![c.id]);
        let standing = state.players.iter().find(|p| p.id == c.id).unwrap();
        assert_eq!(standing.score, 1.0);
    }

    #[tokio::test]
    async fn registration_closes_once_running() {
        let mut rig = rig();
        for _ in 0..2 {
            join(&mut rig.tournament);
        }
        rig.tournament.start(&mut rig.directory).unwrap();
        let (tx, _rx) = unbounded_channel();
        let err = rig.tournament.register(Identity::random(), tx).unwrap_err();
        assert_eq!(err, TournamentError::Closed);
    }

    #[test]
    fn reregistration_rebinds_without_duplicating() {
        let (report_tx, _reports) = unbounded_channel();
        let (tick_tx, _ticks) = unbounded_channel();
        let mut tournament = Tournament::new("Test Open", report_tx, tick_tx);
        let (who, mut old_rx) = join(&mut tournament);
        let (tx, mut new_rx) = unbounded_channel();
        tournament.register(who.clone(), tx).unwrap();
        assert_eq!(tournament.roster.len(), 1);
        drain(&mut old_rx);
        drain(&mut new_rx);
        tournament.broadcast(ServerMessage::game_created(ID::default()));
        assert!(drain(&mut old_rx).is_empty());
        assert_eq!(drain(&mut new_rx).len(), 1);
    }

    #[tokio::test]
    async fn start_preconditions_are_enforced() {
        let mut rig = rig();
        join(&mut rig.tournament);
        assert_eq!(
            rig.tournament.start(&mut rig.directory).unwrap_err(),
            TournamentError::TooFewPlayers
        );
        join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        assert_eq!(
            rig.tournament.start(&mut rig.directory).unwrap_err(),
            TournamentError::NotWaiting
        );
    }

    #[tokio::test(start_paused = true)]
    async fn completion_scores_the_winner_and_schedules_the_break() {
        let mut rig = rig();
        let (a, _) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let game = *rig.tournament.active.iter().next().unwrap();
        let report = decisive(&rig, game, &a, &b);
        settle(&mut rig, report);
        assert!(rig.tournament.active.is_empty());
        let state = rig.tournament.state();
        let standing = state.players.iter().find(|p| p.id == a.id).unwrap();
        assert_eq!(standing.score, 1.0);
        tokio::time::advance(arb_core::ROUND_BREAK).await;
        tokio::task::yield_now().await;
        assert_eq!(rig.ticks.try_recv().ok(), Some(rig.tournament.id));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_reports_change_nothing() {
        let mut rig = rig();
        let (a, _) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let game = *rig.tournament.active.iter().next().unwrap();
        let report = decisive(&rig, game, &a, &b);
        settle(&mut rig, report);
        let repeat = decisive(&rig, game, &b, &a);
        rig.tournament.handle_completion(&repeat);
        let state = rig.tournament.state();
        assert_eq!(state.players.iter().find(|p| p.id == a.id).unwrap().score, 1.0);
        assert_eq!(state.players.iter().find(|p| p.id == b.id).unwrap().score, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn draws_split_the_point() {
        let mut rig = rig();
        let (a, _) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let game = *rig.tournament.active.iter().next().unwrap();
        let report = Report {
            game,
            origin: Origin::Tournament(rig.tournament.id),
            reason: Reason::Stalemate,
            outcome: Outcome::Draw {
                players: [a.clone(), b.clone()],
            },
        };
        settle(&mut rig, report);
        let state = rig.tournament.state();
        assert!(state.players.iter().all(|p| p.score == 0.5));
        assert_eq!(state.rounds[0].games[0].result.as_deref(), Some("1/2-1/2"));
    }

    #[tokio::test(start_paused = true)]
    async fn two_players_may_meet_again() {
        let mut rig = rig();
        let (a, _) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let game = *rig.tournament.active.iter().next().unwrap();
        let report = decisive(&rig, game, &a, &b);
        settle(&mut rig, report);
        rig.tournament.on_break(&mut rig.directory);
        let state = rig.tournament.state();
        assert_eq!(state.current_round, 2);
        assert_eq!(state.rounds[1].games.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pairing_avoids_rematches_while_it_can() {
        let mut rig = rig();
        for _ in 0..4 {
            join(&mut rig.tournament);
        }
        rig.tournament.start(&mut rig.directory).unwrap();
        let first: Vec<[ID<Member>; 2]> = rig.tournament.state().rounds[0]
            .games
            .iter()
            .map(|game| game.players)
            .collect();
        // drawing both games leaves everyone tied, so a naive second pass
        // would recreate round one
        let reports: Vec<Report> = rig.tournament.rounds[0]
            .matches
            .iter()
            .map(|m| Report {
                game: m.game,
                origin: Origin::Tournament(rig.tournament.id),
                reason: Reason::Stalemate,
                outcome: Outcome::Draw {
                    players: [m.white.clone(), m.black.clone()],
                },
            })
            .collect();
        for report in reports {
            settle(&mut rig, report);
        }
        rig.tournament.on_break(&mut rig.directory);
        let second: Vec<[ID<Member>; 2]> = rig.tournament.state().rounds[1]
            .games
            .iter()
            .map(|game| game.players)
            .collect();
        assert_eq!(second.len(), 2);
        for pair in &second {
            let repeated = first.iter().any(|earlier| {
                let same = earlier == pair;
                let flipped = earlier[0] == pair[1] && earlier[1] == pair[0];
                same || flipped
            });
            assert!(!repeated, "round two repeated a round-one pairing");
        }
    }

    #[tokio::test]
    async fn busy_players_sit_out_the_round() {
        let mut rig = rig();
        let (_a, _) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        let (_c, _) = join(&mut rig.tournament);
        // b is mid-game elsewhere when the first round forms
        let (tx, _rx) = unbounded_channel();
        let (report_tx, _reports) = unbounded_channel();
        let stranger = Identity::random();
        rig.directory
            .insert(GameSession::new(
                Seat::new(b.clone(), tx.clone()),
                Seat::new(stranger, tx),
                Origin::Casual,
                report_tx,
            ))
            .unwrap();
        rig.tournament.start(&mut rig.directory).unwrap();
        let state = rig.tournament.state();
        assert_eq!(state.rounds[0].games.len(), 1);
        assert!(state.rounds[0].byes.is_empty());
        assert!(!state.rounds[0].games[0].players.contains(&b.id));
        assert_eq!(state.players.iter().find(|p| p.id == b.id).unwrap().score, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn shrunken_field_finishes_early() {
        let mut rig = rig();
        let (a, mut rx) = join(&mut rig.tournament);
        let (b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        assert!(rig.tournament.remove(b.id));
        let game = *rig.tournament.active.iter().next().unwrap();
        let report = decisive(&rig, game, &a, &b);
        settle(&mut rig, report);
        rig.tournament.on_break(&mut rig.directory);
        assert_eq!(rig.tournament.status(), Status::Finished);
        let finished = drain(&mut rx).into_iter().find_map(|message| match message {
            ServerMessage::TournamentFinished { winner, .. } => Some(winner),
            _ => None,
        });
        assert_eq!(finished.unwrap().unwrap().id, a.id);
    }

    #[tokio::test(start_paused = true)]
    async fn match_records_fill_with_chess_notation() {
        let mut rig = rig();
        let (_a, _) = join(&mut rig.tournament);
        let (_b, _) = join(&mut rig.tournament);
        rig.tournament.start(&mut rig.directory).unwrap();
        let (game, white, black) = {
            let m = &rig.tournament.rounds[0].matches[0];
            (m.game, m.white.clone(), m.black.clone())
        };
        let report = decisive(&rig, game, &white, &black);
        settle(&mut rig, report);
        let state = rig.tournament.state();
        assert_eq!(state.rounds[0].games[0].result.as_deref(), Some("1-0"));
    }

    #[test]
    fn tiebreak_prefers_earned_points_over_byes() {
        let (report_tx, _reports) = unbounded_channel();
        let (tick_tx, _ticks) = unbounded_channel();
        let mut tournament = Tournament::new("Test Open", report_tx, tick_tx);
        let (a, mut rx) = join(&mut tournament);
        let (_b, _) = join(&mut tournament);
        let (_c, _) = join(&mut tournament);
        tournament.roster[0].award(WIN);
        tournament.roster[1].bye();
        tournament.finish();
        let finished = drain(&mut rx).into_iter().find_map(|message| match message {
            ServerMessage::TournamentFinished { winner, .. } => Some(winner),
            _ => None,
        });
        assert_eq!(finished.unwrap().unwrap().id, a.id);
    }

    #[test]
    fn full_ties_fall_back_to_registration_order() {
        let (report_tx, _reports) = unbounded_channel();
        let (tick_tx, _ticks) = unbounded_channel();
        let mut tournament = Tournament::new("Test Open", report_tx, tick_tx);
        let (a, mut rx) = join(&mut tournament);
        let (_b, _) = join(&mut tournament);
        tournament.finish();
        let finished = drain(&mut rx).into_iter().find_map(|message| match message {
            ServerMessage::TournamentFinished { winner, .. } => Some(winner),
            _ => None,
        });
        assert_eq!(finished.unwrap().unwrap().id, a.id);
    }

    #[test]
    fn leaving_is_a_noop_for_strangers() {
        let (report_tx, _reports) = unbounded_channel();
        let (tick_tx, _ticks) = unbounded_channel();
        let mut tournament = Tournament::new("Test Open", report_tx, tick_tx);
        let (a, _) = join(&mut tournament);
        assert!(!tournament.remove(Identity::random().id));
        assert!(tournament.remove(a.id));
        assert!(tournament.state().players.is_empty());
    }
}
