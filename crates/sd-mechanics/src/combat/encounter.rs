//! Sequencing one brawl between two characters.
//!
//! A round is one exchange: the initiating side attacks with the kind it
//! chose, then, if nobody is down, the other side answers with a punch or a
//! grapple picked at random. The encounter ends at the first knockout and
//! rejects every round after that.

use chrono::{DateTime, TimeDelta, Utc};

use sd_core::Character;

use super::sink::{CombatSink, GameUpdate};
use super::state::{self, CombatMessage, CombatRoundState, LogEntry, LogKind};
use super::Side;
use crate::brawling::{self, AttackKind, BrawlingOutcome};
use crate::config::BrawlConfig;
use crate::dice::{RandomSource, SeededRandom};
use crate::error::{MechError, MechResult};
use crate::knockout::{self, CombatEnd};
use crate::ledger;

/// One attack made during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRecord {
    /// Who attacked.
    pub side: Side,
    /// Punch or grapple.
    pub kind: AttackKind,
    /// What the attack did.
    pub outcome: BrawlingOutcome,
}

/// How a call to [`Encounter::process_round`] finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResult {
    /// Both sides attacked and nobody went down.
    Completed {
        /// The round that just finished.
        round: u8,
    },
    /// An attack knocked a side out.
    Knockout(CombatEnd),
    /// The encounter had already ended; nothing happened.
    Rejected,
}

/// The attacks a round produced and how it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Attacks in the order they were made.
    pub attacks: Vec<AttackRecord>,
    /// How the round finished.
    pub result: RoundResult,
}

impl RoundReport {
    fn rejected() -> Self {
        Self {
            attacks: Vec::new(),
            result: RoundResult::Rejected,
        }
    }
}

/// A brawl between a player character and an opponent.
pub struct Encounter<R, S> {
    player: Character,
    opponent: Character,
    state: CombatRoundState,
    config: BrawlConfig,
    source: R,
    sink: S,
    ended: bool,
    processing: bool,
}

impl<S: CombatSink> Encounter<SeededRandom, S> {
    /// Start a fresh encounter with dice seeded from the config.
    pub fn new(player: Character, opponent: Character, config: BrawlConfig, sink: S) -> Self {
        let source = SeededRandom::new(config.seed);
        Self::with_source(player, opponent, config, source, sink)
    }
}

impl<R: RandomSource, S: CombatSink> Encounter<R, S> {
    /// Start a fresh encounter with an explicit randomness source.
    pub fn with_source(
        player: Character,
        opponent: Character,
        config: BrawlConfig,
        source: R,
        sink: S,
    ) -> Self {
        let state = CombatRoundState::new(player.id, opponent.id);
        Self {
            player,
            opponent,
            state,
            config,
            source,
            sink,
            ended: false,
            processing: false,
        }
    }

    /// Pick up an encounter from a saved state.
    ///
    /// The state's character ids must match the records supplied. The state
    /// itself is validated when the next round starts.
    pub fn resume(
        state: CombatRoundState,
        player: Character,
        opponent: Character,
        config: BrawlConfig,
        source: R,
        sink: S,
    ) -> MechResult<Self> {
        if state.player_character_id != player.id || state.opponent_character_id != opponent.id {
            return Err(MechError::InvalidCombatState(
                "character ids do not match the saved state".to_string(),
            ));
        }
        Ok(Self {
            player,
            opponent,
            state,
            config,
            source,
            sink,
            ended: false,
            processing: false,
        })
    }

    /// Current round state.
    pub fn state(&self) -> &CombatRoundState {
        &self.state
    }

    /// The player's character record as of the last applied update.
    pub fn player(&self) -> &Character {
        &self.player
    }

    /// The opponent's character record as of the last applied update.
    pub fn opponent(&self) -> &Character {
        &self.opponent
    }

    /// The character fighting on `side`.
    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Returns true once a knockout has ended the encounter.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns true while a round is being processed.
    ///
    /// Dropping a round future mid-await leaves this set and the encounter
    /// refuses further rounds.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The sink updates are published to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the encounter and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Play one round, `initiator` attacking first with `kind`.
    ///
    /// Returns [`RoundResult::Rejected`] without touching anything once the
    /// encounter has ended, and [`MechError::RoundInProgress`] if another
    /// round has not finished.
    pub async fn process_round(
        &mut self,
        initiator: Side,
        kind: AttackKind,
    ) -> MechResult<RoundReport> {
        if self.ended {
            tracing::warn!(%initiator, "round rejected: encounter already ended");
            return Ok(RoundReport::rejected());
        }
        if self.processing {
            tracing::warn!(%initiator, "round rejected: another round in progress");
            return Err(MechError::RoundInProgress);
        }

        self.processing = true;
        let result = self.play_round(initiator, kind).await;
        self.processing = false;
        result
    }

    /// Play rounds until a knockout or until `max_rounds` have been played.
    ///
    /// The player initiates every round with `kind`.
    pub async fn run(&mut self, kind: AttackKind, max_rounds: u32) -> MechResult<Option<CombatEnd>> {
        self.run_from(Side::Player, kind, max_rounds).await
    }

    /// Like [`Encounter::run`], with `initiator` opening every round.
    pub async fn run_from(
        &mut self,
        initiator: Side,
        kind: AttackKind,
        max_rounds: u32,
    ) -> MechResult<Option<CombatEnd>> {
        for _ in 0..max_rounds {
            let report = self.process_round(initiator, kind).await?;
            match report.result {
                RoundResult::Completed { .. } => {}
                RoundResult::Knockout(end) => return Ok(Some(end)),
                RoundResult::Rejected => return Ok(None),
            }
        }
        Ok(None)
    }

    async fn play_round(&mut self, initiator: Side, kind: AttackKind) -> MechResult<RoundReport> {
        state::validate(&self.state)?;

        let mut attacks = Vec::with_capacity(2);

        if let Some(end) = self.attack(initiator, kind, &mut attacks)? {
            return Ok(RoundReport {
                attacks,
                result: RoundResult::Knockout(end),
            });
        }

        if !self.config.pacing_delay.is_zero() {
            tokio::time::sleep(self.config.pacing_delay).await;
        }

        let responder = initiator.other();
        let response = if self.source.chance(self.config.punch_chance) {
            AttackKind::Punch
        } else {
            AttackKind::Grapple
        };
        if let Some(end) = self.attack(responder, response, &mut attacks)? {
            return Ok(RoundReport {
                attacks,
                result: RoundResult::Knockout(end),
            });
        }

        let round = self.state.round;
        self.dispatch(CombatMessage::AddLogEntry {
            entry: LogEntry::at(
                format!("Round {round} complete"),
                LogKind::Info,
                self.log_time(),
            ),
        });
        self.dispatch(CombatMessage::EndRound);
        tracing::info!(
            round,
            player = self.player.current_strength(),
            opponent = self.opponent.current_strength(),
            "round complete"
        );

        Ok(RoundReport {
            attacks,
            result: RoundResult::Completed { round },
        })
    }

    /// One side attacks the other. Returns the end of combat on a knockout.
    fn attack(
        &mut self,
        side: Side,
        kind: AttackKind,
        attacks: &mut Vec<AttackRecord>,
    ) -> MechResult<Option<CombatEnd>> {
        let modifier = self.state.modifier(side);
        let outcome = brawling::resolve_round(modifier, kind, None, &mut self.source);
        attacks.push(AttackRecord {
            side,
            kind,
            outcome,
        });

        let text = brawling::format_message(&self.character(side).name, &outcome, kind);
        tracing::debug!(
            %side,
            %kind,
            roll = outcome.roll,
            modifier,
            damage = outcome.damage,
            location = %outcome.location,
            "attack resolved"
        );
        let log_kind = if outcome.is_hit() {
            LogKind::Hit
        } else {
            LogKind::Miss
        };
        self.dispatch(CombatMessage::AddLogEntry {
            entry: LogEntry::at(text, log_kind, self.log_time()),
        });

        if !outcome.is_hit() {
            return Ok(None);
        }

        let target = side.other();
        let applied = ledger::apply_damage(
            self.character(target),
            outcome.damage,
            outcome.location,
            Utc::now(),
        );
        self.dispatch(CombatMessage::ApplyDamage {
            target,
            damage: outcome.damage,
            location: outcome.location,
        });
        let update = applied.to_update(self.character(target));
        self.character_mut(target).apply_update(&update)?;
        self.sink.emit(GameUpdate::Character(update));

        let (player, opponent) = match side {
            Side::Player => (Some(outcome.next_round_modifier), None),
            Side::Opponent => (None, Some(outcome.next_round_modifier)),
        };
        self.dispatch(CombatMessage::UpdateModifiers { player, opponent });

        if !knockout::is_knockout(applied.new_strength) {
            return Ok(None);
        }

        let end = knockout::declare_knockout(
            side,
            self.character(side),
            self.character(target),
            kind,
            outcome.location,
        );
        self.dispatch(CombatMessage::EndCombat {
            winner: end.winner,
            summary: end.summary.clone(),
            at: self.log_time(),
        });
        self.ended = true;
        tracing::info!(winner = %end.winner, summary = %end.summary, "knockout");
        self.sink.combat_ended(&end);
        Ok(Some(end))
    }

    /// Stamp for the next log entry: now, or just after the last entry if
    /// the log already runs ahead of the clock.
    fn log_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.state.round_log.last() {
            Some(last) if last.timestamp >= now => last.timestamp + TimeDelta::microseconds(1),
            _ => now,
        }
    }

    fn dispatch(&mut self, message: CombatMessage) {
        tracing::debug!(?message, "dispatch");
        self.state = state::reduce(self.state.clone(), &message);
        self.sink.emit(GameUpdate::CombatState(self.state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::RecordingSink;
    use crate::dice::ScriptedRandom;
    use sd_core::{Attributes, BodyLocation, CharacterId};
    use std::time::Duration;

    fn fighter(name: &str, strength: u32) -> Character {
        Character::new(name, Attributes::with_strength(strength))
    }

    fn scripted(
        player: u32,
        opponent: u32,
        rolls: impl IntoIterator<Item = u32>,
        choices: impl IntoIterator<Item = bool>,
    ) -> Encounter<ScriptedRandom, RecordingSink> {
        Encounter::with_source(
            fighter("Wyatt", player),
            fighter("Ike", opponent),
            BrawlConfig::default(),
            ScriptedRandom::new().with_rolls(rolls).with_choices(choices),
            RecordingSink::new(),
        )
    }

    fn texts(enc: &Encounter<ScriptedRandom, RecordingSink>) -> Vec<&str> {
        enc.state().round_log.iter().map(|e| e.text.as_str()).collect()
    }

    #[tokio::test]
    async fn solid_hits_round_one() {
        let mut enc = scripted(12, 12, [4, 4], [true]);
        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();

        assert_eq!(report.result, RoundResult::Completed { round: 1 });
        assert_eq!(report.attacks.len(), 2);
        assert_eq!(report.attacks[0].side, Side::Player);
        assert_eq!(report.attacks[1].side, Side::Opponent);
        assert_eq!(report.attacks[1].kind, AttackKind::Punch);

        assert_eq!(enc.player().current_strength(), 10);
        assert_eq!(enc.opponent().current_strength(), 10);
        assert_eq!(enc.opponent().wounds.len(), 1);
        assert_eq!(enc.opponent().wounds[0].location, BodyLocation::Chest);
        assert_eq!(enc.state().round, 2);
        assert_eq!(
            texts(&enc),
            vec![
                "Wyatt punches with Solid Hit (Roll: 4) dealing 2 damage to chest",
                "Ike punches with Solid Hit (Roll: 4) dealing 2 damage to chest",
                "Round 1 complete",
            ]
        );
        assert_eq!(enc.sink().character_updates().count(), 2);
        assert_eq!(enc.sink().latest_state(), Some(enc.state()));
        assert!(!enc.is_ended());
    }

    #[tokio::test]
    async fn second_round_stays_in_round_two() {
        let mut enc = scripted(12, 12, [4, 4, 4, 4], [true, true]);
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();

        assert_eq!(report.result, RoundResult::Completed { round: 2 });
        assert_eq!(enc.state().round, 2);
        assert_eq!(enc.state().round_log.len(), 6);
        assert_eq!(texts(&enc)[5], "Round 2 complete");
        assert_eq!(enc.player().current_strength(), 8);
        assert_eq!(enc.opponent().current_strength(), 8);
        assert_eq!(enc.opponent().strength_history.damage_count(), 2);
    }

    #[tokio::test]
    async fn knockout_skips_the_response() {
        let mut enc = scripted(12, 2, [4, 6], [true]);
        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();

        let RoundResult::Knockout(end) = report.result else {
            panic!("expected a knockout, got {:?}", report.result);
        };
        assert_eq!(end.winner, Side::Player);
        assert_eq!(end.winner_id, enc.player().id);
        assert_eq!(end.summary, "Wyatt knocks Ike out cold with a punch to the chest!");
        assert_eq!(report.attacks.len(), 1);

        assert!(enc.is_ended());
        assert!(enc.opponent().is_unconscious);
        assert_eq!(enc.opponent().current_strength(), 0);
        assert_eq!(enc.player().current_strength(), 12);
        assert_eq!(enc.state().round, 1);
        assert_eq!(texts(&enc).last().copied(), Some(end.summary.as_str()));
        assert_eq!(enc.sink().ended, vec![end]);
    }

    #[tokio::test]
    async fn rounds_after_knockout_are_rejected() {
        let mut enc = scripted(12, 2, [4, 6, 6], [true]);
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        let log_len = enc.state().round_log.len();
        let updates = enc.sink().updates.len();

        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert_eq!(report.result, RoundResult::Rejected);
        assert!(report.attacks.is_empty());
        assert_eq!(enc.state().round_log.len(), log_len);
        assert_eq!(enc.sink().updates.len(), updates);
        assert_eq!(enc.sink().ended.len(), 1);
    }

    #[tokio::test]
    async fn responder_can_win() {
        // Player misses, opponent grapples with a bear hug.
        let mut enc = scripted(3, 12, [2, 6], [false]);
        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();

        let RoundResult::Knockout(end) = report.result else {
            panic!("expected a knockout");
        };
        assert_eq!(end.winner, Side::Opponent);
        assert_eq!(report.attacks[1].kind, AttackKind::Grapple);
        assert!(enc.player().is_unconscious);
        assert!(end.summary.contains("grapple to the abdomen"));
    }

    #[tokio::test]
    async fn opponent_initiated_round() {
        let mut enc = scripted(12, 12, [3, 2], [true]);
        let report = enc.process_round(Side::Opponent, AttackKind::Grapple).await.unwrap();

        assert_eq!(report.attacks[0].side, Side::Opponent);
        assert_eq!(report.attacks[0].kind, AttackKind::Grapple);
        assert_eq!(report.attacks[1].side, Side::Player);
        assert_eq!(enc.player().current_strength(), 11);
        assert_eq!(enc.opponent().current_strength(), 12);
        assert_eq!(enc.state().round_log[1].kind, LogKind::Miss);
    }

    #[tokio::test]
    async fn hit_carries_modifier_into_next_roll() {
        // Body blow (+1) then a base 5 clamps to a critical hit.
        let mut enc = scripted(20, 20, [5, 2, 5, 2], [true, true]);
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert_eq!(enc.state().player_modifier, 1);
        assert_eq!(enc.state().opponent_modifier, 0);

        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert_eq!(report.attacks[0].outcome.roll, 6);
        assert_eq!(report.attacks[0].outcome.descriptor, "Critical Hit");
        assert_eq!(enc.state().player_modifier, 1);
    }

    #[tokio::test]
    async fn miss_leaves_modifier_alone() {
        let mut enc = scripted(20, 20, [5, 2, 1, 2], [true, true]);
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        // Base 1 + 1 = 2 is a miss; the carried +1 is not reset.
        let report = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert!(!report.attacks[0].outcome.is_hit());
        assert_eq!(enc.state().player_modifier, 1);
    }

    #[tokio::test]
    async fn invalid_resumed_state_fails_and_clears_flag() {
        let player = fighter("Wyatt", 12);
        let opponent = fighter("Ike", 12);
        let mut saved = CombatRoundState::new(player.id, opponent.id);
        saved.round = 3;
        let mut enc = Encounter::resume(
            saved,
            player,
            opponent,
            BrawlConfig::default(),
            ScriptedRandom::new().with_rolls([4, 4]),
            RecordingSink::new(),
        )
        .unwrap();

        let err = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap_err();
        assert!(matches!(err, MechError::InvalidCombatState(_)));
        assert!(!enc.is_processing());
        assert!(enc.sink().updates.is_empty());

        let again = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap_err();
        assert!(matches!(again, MechError::InvalidCombatState(_)));
    }

    #[test]
    fn resume_rejects_mismatched_ids() {
        let saved = CombatRoundState::new(CharacterId::new(), CharacterId::new());
        let result = Encounter::resume(
            saved,
            fighter("Wyatt", 12),
            fighter("Ike", 12),
            BrawlConfig::default(),
            ScriptedRandom::new(),
            RecordingSink::new(),
        );
        assert!(matches!(result, Err(MechError::InvalidCombatState(_))));
    }

    #[tokio::test]
    async fn resumed_encounter_continues_log() {
        let mut first = scripted(12, 12, [4, 4], [true]);
        first.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        let saved = first.state().clone();

        let mut resumed = Encounter::resume(
            saved,
            first.player().clone(),
            first.opponent().clone(),
            BrawlConfig::default(),
            ScriptedRandom::new().with_rolls([3, 3]).with_choices([true]),
            RecordingSink::new(),
        )
        .unwrap();
        let report = resumed.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert_eq!(report.result, RoundResult::Completed { round: 2 });
        assert_eq!(resumed.state().round_log.len(), 6);
        assert_eq!(resumed.opponent().current_strength(), 9);
    }

    #[tokio::test]
    async fn log_written_ahead_of_the_clock_stays_ordered() {
        let player = fighter("Wyatt", 12);
        let opponent = fighter("Ike", 12);
        let ahead = Utc::now() + TimeDelta::hours(1);
        let mut saved = CombatRoundState::new(player.id, opponent.id);
        saved.round_log.push(LogEntry::at("Round 1 complete", LogKind::Info, ahead));
        saved.round = 2;
        let mut enc = Encounter::resume(
            saved,
            player,
            opponent,
            BrawlConfig::default(),
            ScriptedRandom::new().with_rolls([1, 1]).with_choices([true]),
            RecordingSink::new(),
        )
        .unwrap();

        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();

        state::validate(enc.state()).unwrap();
        let log = &enc.state().round_log;
        assert_eq!(log.len(), 7);
        assert!(log[1..].iter().all(|e| e.timestamp > ahead));
    }

    #[tokio::test]
    async fn dropped_round_leaves_encounter_busy() {
        let mut enc = Encounter::with_source(
            fighter("Wyatt", 12),
            fighter("Ike", 12),
            BrawlConfig::default().with_pacing_delay(Duration::from_secs(5)),
            ScriptedRandom::new().with_rolls([4, 4]),
            RecordingSink::new(),
        );
        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            enc.process_round(Side::Player, AttackKind::Punch),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(enc.is_processing());

        let err = enc.process_round(Side::Player, AttackKind::Punch).await.unwrap_err();
        assert!(matches!(err, MechError::RoundInProgress));
    }

    #[tokio::test]
    async fn pacing_delay_is_waited() {
        let mut enc = Encounter::with_source(
            fighter("Wyatt", 12),
            fighter("Ike", 12),
            BrawlConfig::default().with_pacing_delay(Duration::from_millis(20)),
            ScriptedRandom::new().with_rolls([3, 3]),
            RecordingSink::new(),
        );
        let started = std::time::Instant::now();
        enc.process_round(Side::Player, AttackKind::Punch).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn seeded_run_reaches_knockout() {
        let mut enc = Encounter::new(
            fighter("Wyatt", 8),
            fighter("Ike", 8),
            BrawlConfig::default().with_seed(7),
            RecordingSink::new(),
        );
        let end = enc.run(AttackKind::Punch, 100).await.unwrap();
        let end = end.expect("someone goes down within 100 rounds");
        assert!(enc.is_ended());
        assert!(enc.character(end.loser).is_unconscious);
        assert!(!enc.character(end.winner).is_unconscious);
        assert!(state::is_valid_state(enc.state()));

        let sink = enc.into_sink();
        assert_eq!(sink.ended.len(), 1);
    }

    #[tokio::test]
    async fn run_stops_at_round_limit() {
        let mut enc = scripted(50, 50, [2; 8], [true; 4]);
        let end = enc.run(AttackKind::Punch, 4).await.unwrap();
        assert!(end.is_none());
        assert!(!enc.is_ended());
        assert_eq!(enc.state().round_log.len(), 12);
    }
}
