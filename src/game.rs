use crate::board::{Board, Direction, GameError, Position};
use crate::pieces::{Colour, PieceSet};
use crate::rules::{self, CaptureKind};
use serde::Serialize;

/// A destination that captures both by approach and by withdrawal. The
/// move is held back until the player names a square from one of the two
/// victim lists; the other interpretation is then discarded entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    pub dest: Position,
    pub approach_victims: Vec<Position>,
    pub withdrawal_victims: Vec<Position>,
}

/// One live piece, as exposed to renderers and bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub position: Position,
    pub colour: Colour,
}

/// Read-only view of everything the outside world may observe: the live
/// pieces, whose turn it is, the selected piece and its query sets, any
/// pending ambiguity, and the winner if the game has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub pieces: Vec<PieceView>,
    pub turn: Colour,
    pub round: u32,
    pub selected: Option<Position>,
    pub legal_targets: Vec<Position>,
    pub approach_captures: Vec<Position>,
    pub withdrawal_captures: Vec<Position>,
    pub capture_eligible: Vec<Position>,
    pub ambiguity: Option<Ambiguity>,
    pub winner: Option<Colour>,
}

/// The Fanorona turn/round state machine. All mutation of the piece set
/// funnels through the inbound operations below; every query is a pure
/// function of the current state.
///
/// Illegal player input (wrong colour, off-list destination, skipping a
/// forced capture) is absorbed as a no-op, the way a UI ignores clicks
/// that correspond to no legal action. The only raised errors are the
/// construction-time dimension check and the capture-query adjacency
/// contract in [`rules`].
#[derive(Debug, Clone)]
pub struct Fanorona {
    board: Board,
    pieces: PieceSet,
    turn: Colour,
    round: u32,
    selected: Option<Position>,
    possibilities: Vec<Position>,
    approach_moves: Vec<Position>,
    withdrawal_moves: Vec<Position>,
    visited: Vec<Position>,
    last_direction: Option<Direction>,
    chaining: bool,
    ambiguity: Option<Ambiguity>,
}

impl Fanorona {
    /// Create a game on a `rows` x `cols` board. Both dimensions must be
    /// odd; anything else is a fatal configuration error.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::new(rows, cols)?))
    }

    /// The traditional 5x9 game.
    pub fn standard() -> Self {
        Self::with_board(Board::standard())
    }

    /// The 3x3 variant: paika moves only, win by three in a row.
    pub fn three_by_three() -> Self {
        Self::with_board(Board::three_by_three())
    }

    fn with_board(board: Board) -> Self {
        Fanorona {
            board,
            pieces: PieceSet::starting_positions(&board),
            turn: Colour::White,
            round: 1,
            selected: None,
            possibilities: Vec::new(),
            approach_moves: Vec::new(),
            withdrawal_moves: Vec::new(),
            visited: Vec::new(),
            last_direction: None,
            chaining: false,
            ambiguity: None,
        }
    }

    /// Restore the starting state for the same board dimensions.
    pub fn reset(&mut self) {
        *self = Self::with_board(self.board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_set(&self) -> &PieceSet {
        &self.pieces
    }

    #[cfg(test)]
    pub(crate) fn piece_set_mut(&mut self) -> &mut PieceSet {
        &mut self.pieces
    }

    pub fn pieces(&self) -> Vec<PieceView> {
        self.pieces
            .iter()
            .map(|(position, colour)| PieceView { position, colour })
            .collect()
    }

    pub fn turn(&self) -> Colour {
        self.turn
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Plain targets of the selected piece (empty adjacent squares minus
    /// the direction-repeat filter). Empty when nothing is selected.
    pub fn legal_targets(&self) -> &[Position] {
        &self.possibilities
    }

    /// Destinations that capture by approach for the selected piece.
    pub fn approach_captures(&self) -> &[Position] {
        &self.approach_moves
    }

    /// Destinations that capture by withdrawal for the selected piece.
    pub fn withdrawal_captures(&self) -> &[Position] {
        &self.withdrawal_moves
    }

    pub fn ambiguity(&self) -> Option<&Ambiguity> {
        self.ambiguity.as_ref()
    }

    /// Whether the selected piece is mid-chain and must keep capturing.
    pub fn chain_in_progress(&self) -> bool {
        self.chaining
    }

    /// The capture machinery is switched off on the 3x3 variant.
    pub fn captures_enabled(&self) -> bool {
        !self.board.is_three_by_three()
    }

    /// Pieces of the moving colour that have a capture available. While
    /// this set is non-empty, only one of these pieces may be selected.
    /// Recomputed on every call; empty once a piece is selected.
    pub fn capture_eligible(&self) -> Vec<Position> {
        if self.selected.is_some() {
            return Vec::new();
        }
        self.eligible_now()
    }

    fn eligible_now(&self) -> Vec<Position> {
        if !self.captures_enabled() {
            return Vec::new();
        }
        self.pieces
            .positions_of(self.turn)
            .filter(|&pos| rules::can_capture(&self.board, &self.pieces, pos))
            .collect()
    }

    /// Capture preview for the selected piece moving to `dest` by
    /// approach. Subject to the adjacency contract of
    /// [`rules::capture_by_approach`]; empty when nothing is selected.
    pub fn approach_captures_at(&self, dest: Position) -> Result<Vec<Position>, GameError> {
        match self.selected {
            Some(from) => rules::capture_by_approach(&self.board, &self.pieces, from, dest),
            None => Ok(Vec::new()),
        }
    }

    /// Withdrawal counterpart of [`Fanorona::approach_captures_at`].
    pub fn withdrawal_captures_at(&self, dest: Position) -> Result<Vec<Position>, GameError> {
        match self.selected {
            Some(from) => rules::capture_by_withdrawal(&self.board, &self.pieces, from, dest),
            None => Ok(Vec::new()),
        }
    }

    /// Non-3x3 boards: a colour with no pieces left loses. 3x3: any full
    /// row, column, or main diagonal of one colour wins.
    pub fn winner(&self) -> Option<Colour> {
        if self.board.is_three_by_three() {
            return self.three_in_a_row();
        }
        if self.pieces.count(Colour::Black) == 0 {
            Some(Colour::White)
        } else if self.pieces.count(Colour::White) == 0 {
            Some(Colour::Black)
        } else {
            None
        }
    }

    fn three_in_a_row(&self) -> Option<Colour> {
        const LINES: [[(usize, usize); 3]; 8] = [
            [(1, 1), (1, 2), (1, 3)],
            [(2, 1), (2, 2), (2, 3)],
            [(3, 1), (3, 2), (3, 3)],
            [(1, 1), (2, 1), (3, 1)],
            [(1, 2), (2, 2), (3, 2)],
            [(1, 3), (2, 3), (3, 3)],
            [(1, 1), (2, 2), (3, 3)],
            [(1, 3), (2, 2), (3, 1)],
        ];
        for line in LINES {
            let mut colours = line
                .iter()
                .map(|&(row, col)| self.pieces.colour_at(Position::new(row, col)));
            if let (Some(Some(a)), Some(Some(b)), Some(Some(c))) =
                (colours.next(), colours.next(), colours.next())
            {
                if a == b && b == c {
                    return Some(a);
                }
            }
        }
        None
    }

    /// Select the piece at `pos` for the moving colour. Refused silently
    /// mid-chain, during a pending ambiguity, after the game has ended,
    /// for the wrong colour, or when the forced-capture rule demands a
    /// different piece.
    pub fn select_piece(&mut self, pos: Position) {
        if self.winner().is_some() || self.ambiguity.is_some() || self.chaining {
            return;
        }
        if self.pieces.colour_at(pos) != Some(self.turn) {
            return;
        }
        let eligible = self.eligible_now();
        if !eligible.is_empty() && !eligible.contains(&pos) {
            return;
        }
        self.selected = Some(pos);
        self.refresh_queries();
    }

    /// Commit the selected piece to `dest`. A destination in exactly one
    /// capture set applies that capture; in both, the game enters the
    /// ambiguity state and waits for [`Fanorona::resolve_ambiguity`]; in
    /// neither, the move is a paika — legal only while no capture is
    /// available, and always ending the round. Anything else is a no-op.
    pub fn commit_move(&mut self, dest: Position) {
        if self.winner().is_some() || self.ambiguity.is_some() {
            return;
        }
        let Some(from) = self.selected else {
            return;
        };
        let approaches = self.approach_moves.contains(&dest);
        let withdraws = self.withdrawal_moves.contains(&dest);
        match (approaches, withdraws) {
            (true, true) => self.enter_ambiguity(from, dest),
            (true, false) => self.apply_capture(from, dest, CaptureKind::Approach),
            (false, true) => self.apply_capture(from, dest, CaptureKind::Withdrawal),
            (false, false) => {
                let any_capture =
                    !self.approach_moves.is_empty() || !self.withdrawal_moves.is_empty();
                if !any_capture && self.possibilities.contains(&dest) {
                    self.pieces.move_piece(from, dest);
                    self.end_round();
                }
            }
        }
    }

    /// Resolve a pending ambiguity by naming one of the would-be captured
    /// squares. The interpretation containing the square is applied as an
    /// ordinary capture; the other side's pieces survive. A square in
    /// neither list is ignored.
    pub fn resolve_ambiguity(&mut self, square: Position) {
        if self.winner().is_some() {
            return;
        }
        let Some(ambiguity) = self.ambiguity.as_ref() else {
            return;
        };
        let kind = if ambiguity.withdrawal_victims.contains(&square) {
            CaptureKind::Withdrawal
        } else if ambiguity.approach_victims.contains(&square) {
            CaptureKind::Approach
        } else {
            return;
        };
        let dest = ambiguity.dest;
        let Some(from) = self.selected else {
            self.ambiguity = None;
            return;
        };
        self.ambiguity = None;
        self.apply_capture(from, dest, kind);
    }

    /// During round 1, before anything is selected, the first mover may
    /// hand the first move to the opponent. The round counter stays at 1.
    pub fn forfeit_first_move(&mut self) {
        if self.winner().is_some()
            || self.round != 1
            || self.selected.is_some()
            || self.ambiguity.is_some()
        {
            return;
        }
        self.turn = self.turn.opponent();
    }

    fn enter_ambiguity(&mut self, from: Position, dest: Position) {
        let approach_victims: Vec<Position> =
            rules::approach_run(&self.board, &self.pieces, from, dest)
                .into_iter()
                .filter(|victim| !self.visited.contains(victim))
                .collect();
        let withdrawal_victims: Vec<Position> =
            rules::withdrawal_run(&self.board, &self.pieces, from, dest)
                .into_iter()
                .filter(|victim| !self.visited.contains(victim))
                .collect();
        self.ambiguity = Some(Ambiguity {
            dest,
            approach_victims,
            withdrawal_victims,
        });
    }

    fn apply_capture(&mut self, from: Position, dest: Position, kind: CaptureKind) {
        let captured = match kind {
            CaptureKind::Approach => rules::approach_run(&self.board, &self.pieces, from, dest),
            CaptureKind::Withdrawal => {
                rules::withdrawal_run(&self.board, &self.pieces, from, dest)
            }
        };

        if !self.visited.contains(&from) {
            self.visited.push(from);
        }
        self.last_direction = Direction::between(from, dest);
        for &square in &captured {
            self.pieces.remove(square);
        }
        self.pieces.move_piece(from, dest);
        self.visited.push(dest);
        self.selected = Some(dest);
        self.chaining = true;
        self.refresh_queries();

        let chain_exhausted =
            self.approach_moves.is_empty() && self.withdrawal_moves.is_empty();
        // Rounds 1 and 2 truncate every chain to a single capture.
        if chain_exhausted || self.round <= 2 {
            self.end_round();
        }
    }

    fn refresh_queries(&mut self) {
        let Some(from) = self.selected else {
            self.possibilities.clear();
            self.approach_moves.clear();
            self.withdrawal_moves.clear();
            return;
        };
        self.possibilities =
            rules::legal_targets(&self.board, &self.pieces, from, self.last_direction);
        if !self.captures_enabled() {
            self.approach_moves.clear();
            self.withdrawal_moves.clear();
            return;
        }
        let approach =
            rules::approach_candidates(&self.board, &self.pieces, from, &self.possibilities);
        let withdrawal =
            rules::withdrawal_candidates(&self.board, &self.pieces, from, &self.possibilities);
        // No capture may land on a square the piece already occupied this
        // round.
        self.approach_moves = approach
            .into_iter()
            .filter(|dest| !self.visited.contains(dest))
            .collect();
        self.withdrawal_moves = withdrawal
            .into_iter()
            .filter(|dest| !self.visited.contains(dest))
            .collect();
    }

    fn end_round(&mut self) {
        self.selected = None;
        self.possibilities.clear();
        self.approach_moves.clear();
        self.withdrawal_moves.clear();
        self.visited.clear();
        self.last_direction = None;
        self.chaining = false;
        self.round += 1;
        self.turn = self.turn.opponent();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            pieces: self.pieces(),
            turn: self.turn,
            round: self.round,
            selected: self.selected,
            legal_targets: self.possibilities.clone(),
            approach_captures: self.approach_moves.clone(),
            withdrawal_captures: self.withdrawal_moves.clone(),
            capture_eligible: self.capture_eligible(),
            ambiguity: self.ambiguity.clone(),
            winner: self.winner(),
        }
    }

    /// ASCII dump of the position for driver logs and demos.
    pub fn display_board(&self) -> String {
        let mut result = String::new();
        result.push_str("   ");
        for col in 1..=self.board.cols() {
            result.push_str(&format!("{:2} ", col));
        }
        result.push('\n');
        for row in 1..=self.board.rows() {
            result.push_str(&format!("{:2} ", row));
            for col in 1..=self.board.cols() {
                let c = match self.pieces.colour_at(Position::new(row, col)) {
                    Some(Colour::White) => 'W',
                    Some(Colour::Black) => 'B',
                    None => '.',
                };
                result.push_str(&format!(" {} ", c));
            }
            result.push('\n');
        }
        result
    }
}

impl Default for Fanorona {
    fn default() -> Self {
        Self::standard()
    }
}
