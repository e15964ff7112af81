//! Headless computer-vs-computer games.

use tictac::{GameStatus, Mode, MoveOracle, Player, RandomSource, Session};
use tracing::{debug, info, instrument};

/// Results of a run of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} drawn",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays one game where the oracle moves for both sides.
pub fn play_one<R: RandomSource + ?Sized>(
    oracle: &MoveOracle,
    starting_player: Player,
    rng: &mut R,
) -> Session {
    let mut session = Session::restart(starting_player, Mode::PvP, Player::X);
    while session.status() == GameStatus::InProgress {
        let index = oracle.choose_move(session.board(), session.to_move(), rng);
        session = match session.apply_move(index) {
            Ok(next) => next,
            Err(reason) => unreachable!("oracle chose an illegal move: {reason}"),
        };
    }
    session
}

/// Plays `games` games, alternating who starts.
#[instrument(skip(rng))]
pub fn run_duel<R: RandomSource + ?Sized>(games: u32, rng: &mut R) -> Tally {
    let oracle = MoveOracle::new();
    let mut tally = Tally::default();
    let mut starting_player = Player::X;

    for game in 0..games {
        let session = play_one(&oracle, starting_player, rng);
        debug!(game, status = ?session.status(), "Game finished");
        tally.record(session.status());
        starting_player = starting_player.opponent();
    }

    info!(%tally, "Duel finished");
    tally
}
