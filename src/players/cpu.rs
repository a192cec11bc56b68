//! Automated checkers player.
//!
//! A turn has two phases separated by configurable delays so a presentation
//! layer can animate them:
//!
//! 1. pick the playable piece with the most candidate moves (first one wins
//!    ties, in board order) and lift it;
//! 2. after `lift_delay`, put it down on a uniformly random candidate (the
//!    cancel move included);
//! 3. after `place_delay`, settle the piece and hand the turn back.
//!
//! The turn is an explicit state machine (`CpuTurn`) advanced by `poll`
//! against an external clock. `Cpu::take_turn` drives it on the calling
//! thread; `spawn_turn` drives it on a background thread over shared state.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::board::board::Board;
use crate::board::checkers_types::{Coordinate, PieceId, Player};
use crate::errors::{CheckersError, CheckersResult};
use crate::moves::available_moves::AvailableMoves;
use crate::moves::checkers_move::Move;
use crate::players::cpu_config::CpuConfig;
use crate::players::turn_clock::{SystemTurnClock, TurnCancelToken, TurnClock};

const MAX_LOG_LINES: usize = 256;

/// Outcome of one automated turn, handed to the end-of-turn callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub player: String,
    pub piece: PieceId,
    pub origin: Coordinate,
    pub candidate_count: usize,
    pub chosen: Option<Move>,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub info_lines: Vec<String>,
}

/// Result of the piece-selection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSelection {
    pub piece: PieceId,
    pub move_count: usize,
    pub playable_pieces: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingPlacement { deadline: Instant },
    AwaitingEnd { deadline: Instant },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPoll {
    Pending { deadline: Instant },
    Finished(TurnReport),
}

pub struct Cpu {
    player: Player,
    config: CpuConfig,
    rng: StdRng,
    string_log: VecDeque<String>,
}

impl Cpu {
    pub fn new(player: Player, config: CpuConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            player,
            config,
            rng,
            string_log: VecDeque::new(),
        }
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    pub fn pop_next_log_line(&mut self) -> Option<String> {
        self.string_log.pop_front()
    }

    fn log(&mut self, line: &str) {
        if self.string_log.len() >= MAX_LOG_LINES {
            self.string_log.pop_front();
        }
        self.string_log.push_back(line.to_owned());
    }

    /// Recompute moves of every playable piece and keep the one with the
    /// strictly greatest count.
    pub fn select_piece(&self, board: &mut Board) -> CheckersResult<PieceSelection> {
        let playable: Vec<PieceId> = board
            .pieces()
            .filter(|(id, _)| board.can_be_played_by(*id, &self.player))
            .map(|(id, _)| id)
            .collect();

        let mut best: Option<(PieceId, usize)> = None;
        for id in playable.iter().copied() {
            board.calc_available_moves(id)?;
            let count = board.available_moves(id)?.len();
            if best.map_or(true, |(_, most)| count > most) {
                best = Some((id, count));
            }
        }

        let (piece, move_count) =
            best.ok_or_else(|| CheckersError::NoUsablePieces(self.player.name.clone()))?;
        Ok(PieceSelection {
            piece,
            move_count,
            playable_pieces: playable.len(),
        })
    }

    /// Select and lift a piece, returning the in-flight turn.
    pub fn begin_turn(
        &mut self,
        board: &mut Board,
        now: Instant,
        cancel: TurnCancelToken,
    ) -> CheckersResult<CpuTurn> {
        let started_at = Utc::now();
        let selection = self.select_piece(board)?;
        board.lift(selection.piece)?;

        let origin = board.piece(selection.piece)?.coordinate();
        let candidate_count = board.available_moves(selection.piece)?.len();
        let line = format!(
            "info string cpu {} lifted {} at {} candidates {} playable {}",
            self.player.name, selection.piece, origin, candidate_count, selection.playable_pieces
        );
        self.log(&line);

        Ok(CpuTurn {
            piece: selection.piece,
            phase: TurnPhase::AwaitingPlacement {
                deadline: now + self.config.lift_delay,
            },
            cancel,
            report: Some(TurnReport {
                player: self.player.name.clone(),
                piece: selection.piece,
                origin,
                candidate_count,
                chosen: None,
                cancelled: false,
                started_at,
                finished_at: started_at,
                info_lines: vec![line],
            }),
        })
    }

    /// Run a whole turn in real time on this thread. `on_end_turn` is called
    /// exactly once when the turn completes.
    pub fn take_turn<F>(&mut self, on_end_turn: F, board: &mut Board) -> CheckersResult<()>
    where
        F: FnOnce(TurnReport),
    {
        self.take_turn_with_clock(on_end_turn, board, &SystemTurnClock, &TurnCancelToken::new())
    }

    pub fn take_turn_with_clock<F, C>(
        &mut self,
        on_end_turn: F,
        board: &mut Board,
        clock: &C,
        cancel: &TurnCancelToken,
    ) -> CheckersResult<()>
    where
        F: FnOnce(TurnReport),
        C: TurnClock,
    {
        let mut turn = self.begin_turn(board, clock.now(), cancel.clone())?;
        loop {
            match turn.poll(self, board, clock.now())? {
                TurnPoll::Pending { deadline } => clock.sleep_until(deadline, cancel),
                TurnPoll::Finished(report) => {
                    on_end_turn(report);
                    return Ok(());
                }
            }
        }
    }

    fn choose_target(&mut self, moves: &AvailableMoves) -> CheckersResult<Coordinate> {
        let keys: Vec<Coordinate> = moves.keys().collect();
        keys.as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| {
                CheckersError::InvariantViolated("lifted piece has no candidate moves".to_owned())
            })
    }
}

/// A turn between lifting and handing back control.
#[derive(Debug)]
pub struct CpuTurn {
    piece: PieceId,
    phase: TurnPhase,
    cancel: TurnCancelToken,
    report: Option<TurnReport>,
}

impl CpuTurn {
    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            TurnPhase::AwaitingPlacement { deadline } | TurnPhase::AwaitingEnd { deadline } => {
                Some(deadline)
            }
            TurnPhase::Finished => None,
        }
    }

    fn record(&mut self, cpu: &mut Cpu, line: String) {
        cpu.log(&line);
        if let Some(report) = self.report.as_mut() {
            report.info_lines.push(line);
        }
    }

    /// Advance the turn as far as `now` allows.
    ///
    /// Once cancelled, the piece is put back with its cancel move and the
    /// remaining delays are skipped; the turn still finishes normally.
    pub fn poll(
        &mut self,
        cpu: &mut Cpu,
        board: &mut Board,
        now: Instant,
    ) -> CheckersResult<TurnPoll> {
        loop {
            match self.phase {
                TurnPhase::AwaitingPlacement { deadline } => {
                    let cancelled = self.cancel.is_cancelled();
                    if !cancelled && now < deadline {
                        return Ok(TurnPoll::Pending { deadline });
                    }

                    let target = if cancelled {
                        board.piece(self.piece)?.coordinate()
                    } else {
                        cpu.choose_target(board.available_moves(self.piece)?)?
                    };
                    let mv = board.place(self.piece, target)?;

                    if let Some(report) = self.report.as_mut() {
                        report.chosen = Some(mv);
                        report.cancelled = cancelled;
                    }
                    let line = if cancelled {
                        format!(
                            "info string cpu {} cancelled, {} put back",
                            cpu.player.name, self.piece
                        )
                    } else {
                        format!(
                            "info string cpu {} placed {} {}",
                            cpu.player.name, self.piece, mv
                        )
                    };
                    self.record(cpu, line);

                    let deadline = if cancelled {
                        now
                    } else {
                        now + cpu.config.place_delay
                    };
                    self.phase = TurnPhase::AwaitingEnd { deadline };
                }
                TurnPhase::AwaitingEnd { deadline } => {
                    if !self.cancel.is_cancelled() && now < deadline {
                        return Ok(TurnPoll::Pending { deadline });
                    }

                    board.settle(self.piece)?;
                    self.phase = TurnPhase::Finished;
                    let line = format!("info string cpu {} end of turn", cpu.player.name);
                    self.record(cpu, line);

                    let mut report = self.report.take().ok_or_else(|| {
                        CheckersError::InvariantViolated(
                            "turn report already handed out".to_owned(),
                        )
                    })?;
                    report.finished_at = Utc::now();
                    return Ok(TurnPoll::Finished(report));
                }
                TurnPhase::Finished => {
                    return Err(CheckersError::InvariantViolated(
                        "polled a finished turn".to_owned(),
                    ));
                }
            }
        }
    }
}

/// Run a turn on a background thread. Locks are held only while the turn
/// mutates state, never across a delay.
pub fn spawn_turn<F>(
    cpu: Arc<Mutex<Cpu>>,
    board: Arc<Mutex<Board>>,
    cancel: TurnCancelToken,
    on_end_turn: F,
) -> JoinHandle<CheckersResult<()>>
where
    F: FnOnce(TurnReport) + Send + 'static,
{
    thread::spawn(move || {
        let clock = SystemTurnClock;
        let mut turn = {
            let mut cpu_guard = lock(&cpu, "cpu")?;
            let mut board_guard = lock(&board, "board")?;
            cpu_guard.begin_turn(&mut board_guard, clock.now(), cancel.clone())?
        };

        loop {
            let poll = {
                let mut cpu_guard = lock(&cpu, "cpu")?;
                let mut board_guard = lock(&board, "board")?;
                turn.poll(&mut cpu_guard, &mut board_guard, clock.now())?
            };

            match poll {
                TurnPoll::Pending { deadline } => clock.sleep_until(deadline, &cancel),
                TurnPoll::Finished(report) => {
                    on_end_turn(report);
                    return Ok(());
                }
            }
        }
    })
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &'static str) -> CheckersResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| CheckersError::LockPoisoned(what))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::mpsc::channel;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::board::checkers_types::{PieceKind, PlayerSide};
    use crate::pieces::piece_state::PieceState;
    use crate::players::turn_clock::SteppedTurnClock;

    fn c(file: i8, rank: i8) -> Coordinate {
        Coordinate::new(file, rank)
    }

    fn white() -> Player {
        Player::new("white", PlayerSide::White)
    }

    fn black() -> Player {
        Player::new("black", PlayerSide::Black)
    }

    fn boxed_in_board() -> Board {
        let mut board = Board::new(4, 4);
        board
            .add_piece(white(), PieceKind::Pawn, c(0, 0))
            .expect("free square");
        board
            .add_piece(black(), PieceKind::Pawn, c(1, 1))
            .expect("free square");
        board
            .add_piece(black(), PieceKind::Pawn, c(2, 2))
            .expect("free square");
        board
    }

    #[test]
    fn selects_first_piece_with_most_moves() {
        let mut board = Board::standard(&white(), &black());
        let cpu = Cpu::new(white(), CpuConfig::default().with_seed(1));
        let selection = cpu.select_piece(&mut board).expect("white has pieces");

        assert_eq!(selection.playable_pieces, 12);
        assert_eq!(selection.move_count, 3);
        assert_eq!(
            board.piece(selection.piece).expect("on board").coordinate(),
            c(3, 1)
        );

        for (id, _) in board.pieces() {
            if board.can_be_played_by(id, &white()) {
                let count = board.available_moves(id).expect("on board").len();
                assert!(selection.move_count >= count);
            }
        }
    }

    #[test]
    fn no_playable_piece_is_a_game_rule_error() {
        let mut board = Board::new(4, 4);
        board
            .add_piece(black(), PieceKind::Pawn, c(1, 1))
            .expect("free square");
        let mut cpu = Cpu::new(white(), CpuConfig::instant().with_seed(3));
        let called = Cell::new(0);

        let result = cpu.take_turn_with_clock(
            |_| called.set(called.get() + 1),
            &mut board,
            &SteppedTurnClock::new(),
            &TurnCancelToken::new(),
        );
        assert_eq!(result, Err(CheckersError::NoUsablePieces("white".to_owned())));
        assert_eq!(called.get(), 0);
    }

    #[test]
    fn single_candidate_is_chosen_deterministically() {
        let mut board = boxed_in_board();
        let mut cpu = Cpu::new(white(), CpuConfig::default());
        let clock = SteppedTurnClock::new();
        let mut reports = Vec::new();

        cpu.take_turn_with_clock(|r| reports.push(r), &mut board, &clock, &TurnCancelToken::new())
            .expect("turn completes");

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.candidate_count, 1);
        assert_eq!(report.chosen, Some(Move::Cancel { origin_square: c(0, 0) }));
        assert!(!report.cancelled);
        let id = board.piece_id_at(c(0, 0)).expect("piece stayed");
        assert_eq!(board.piece(id).expect("on board").state(), PieceState::NotLifted);
    }

    #[test]
    fn full_turn_waits_both_delays_and_ends_once() {
        let mut board = Board::standard(&white(), &black());
        let mut cpu = Cpu::new(white(), CpuConfig::default().with_seed(11));
        let clock = SteppedTurnClock::new();
        let start = clock.now();
        let called = Cell::new(0);
        let mut chosen = None;

        cpu.take_turn_with_clock(
            |report| {
                called.set(called.get() + 1);
                chosen = report.chosen;
                assert!(report.finished_at >= report.started_at);
                assert_eq!(report.info_lines.len(), 3);
            },
            &mut board,
            &clock,
            &TurnCancelToken::new(),
        )
        .expect("turn completes");

        assert_eq!(called.get(), 1);
        assert_eq!(clock.now() - start, Duration::from_millis(1000));
        assert!(chosen.is_some());
        assert!(board.pieces().all(|(_, p)| p.state() == PieceState::NotLifted));
        assert_eq!(board.piece_count(), 24);

        let first = cpu.pop_next_log_line().expect("lift was logged");
        assert!(first.starts_with("info string cpu white lifted"));
    }

    #[test]
    fn poll_walks_through_both_phases() {
        let mut board = Board::standard(&white(), &black());
        let mut cpu = Cpu::new(white(), CpuConfig::default().with_seed(5));
        let t0 = Instant::now();
        let mut turn = cpu
            .begin_turn(&mut board, t0, TurnCancelToken::new())
            .expect("white has pieces");
        let piece = turn.piece();
        assert_eq!(board.piece(piece).expect("on board").state(), PieceState::Lifted);
        assert_eq!(turn.next_deadline(), Some(t0 + Duration::from_millis(500)));

        let early = turn
            .poll(&mut cpu, &mut board, t0 + Duration::from_millis(100))
            .expect("poll succeeds");
        assert_eq!(
            early,
            TurnPoll::Pending {
                deadline: t0 + Duration::from_millis(500)
            }
        );

        let placed_at = t0 + Duration::from_millis(500);
        let mid = turn
            .poll(&mut cpu, &mut board, placed_at)
            .expect("poll succeeds");
        assert_eq!(
            mid,
            TurnPoll::Pending {
                deadline: placed_at + Duration::from_millis(500)
            }
        );
        assert_eq!(board.piece(piece).expect("on board").state(), PieceState::Placed);

        let done = turn
            .poll(&mut cpu, &mut board, placed_at + Duration::from_millis(500))
            .expect("poll succeeds");
        assert!(matches!(done, TurnPoll::Finished(ref r) if r.piece == piece));
        assert_eq!(turn.phase(), TurnPhase::Finished);
        assert_eq!(board.piece(piece).expect("on board").state(), PieceState::NotLifted);

        assert!(matches!(
            turn.poll(&mut cpu, &mut board, placed_at + Duration::from_secs(5)),
            Err(CheckersError::InvariantViolated(_))
        ));
    }

    #[test]
    fn cancelled_turn_puts_the_piece_back_and_still_ends() {
        let mut board = Board::standard(&white(), &black());
        let mut cpu = Cpu::new(white(), CpuConfig::default().with_seed(9));
        let token = TurnCancelToken::new();
        let t0 = Instant::now();
        let mut turn = cpu
            .begin_turn(&mut board, t0, token.clone())
            .expect("white has pieces");
        let origin = board.piece(turn.piece()).expect("on board").coordinate();

        token.cancel();
        let done = turn.poll(&mut cpu, &mut board, t0).expect("poll succeeds");
        let TurnPoll::Finished(report) = done else {
            panic!("cancelled turn should finish immediately");
        };
        assert!(report.cancelled);
        assert_eq!(report.chosen, Some(Move::Cancel { origin_square: origin }));
        assert_eq!(board.piece_id_at(origin), Some(turn.piece()));
        assert_eq!(
            board.piece(turn.piece()).expect("on board").state(),
            PieceState::NotLifted
        );
    }

    #[test]
    fn seeded_cpus_make_the_same_choice() {
        let run = |seed: u64| {
            let mut board = Board::standard(&white(), &black());
            let mut cpu = Cpu::new(white(), CpuConfig::instant().with_seed(seed));
            let mut chosen = None;
            cpu.take_turn_with_clock(
                |r| chosen = r.chosen,
                &mut board,
                &SteppedTurnClock::new(),
                &TurnCancelToken::new(),
            )
            .expect("turn completes");
            chosen
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn spawned_turn_reports_through_the_callback() {
        let board = Arc::new(Mutex::new(Board::standard(&white(), &black())));
        let cpu = Arc::new(Mutex::new(Cpu::new(
            black(),
            CpuConfig::instant().with_seed(21),
        )));
        let (tx, rx) = channel();

        let handle = spawn_turn(cpu, board.clone(), TurnCancelToken::new(), move |report| {
            let _ = tx.send(report);
        });
        handle
            .join()
            .expect("turn thread should not panic")
            .expect("turn completes");

        let report = rx.recv().expect("callback sent a report");
        assert_eq!(report.player, "black");
        assert!(rx.try_recv().is_err());
        let board = board.lock().expect("board lock");
        assert!(board.pieces().all(|(_, p)| p.state() == PieceState::NotLifted));
    }
}
