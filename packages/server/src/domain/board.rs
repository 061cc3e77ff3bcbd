//! 盤面評価ロジック（Board Engine）
//!
//! 9 マスの盤面と着手を受け取り、新しい盤面と結果（継続・勝利・引き分け）を
//! 返す純粋なルール評価器。I/O も共有状態も持たないため、複数セッションから
//! 並行に呼び出しても安全です。

/// The 8 canonical winning triples, checked in fixed order:
/// 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // middle column
    [2, 5, 8], // right column
    [0, 4, 8], // diagonal \
    [2, 4, 6], // diagonal /
];

/// プレイヤーに紐づくマーク
///
/// プレイヤー 1 は常に `A`、プレイヤー 2 は常に `B`（セッション中不変）。
/// ワイヤ上の見た目（X/O など）はプレゼンテーション層の関心事であり、
/// ここでは数値エンコード（1/2）のみを扱います。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    A,
    B,
}

impl Mark {
    /// ワイヤエンコード用の数字（'1' / '2'）
    pub fn digit(&self) -> char {
        match self {
            Mark::A => '1',
            Mark::B => '2',
        }
    }
}

/// 一手を適用した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// ゲーム継続
    Continue,
    /// 勝利（揃ったラインのマス番号）
    Win([usize; 3]),
    /// 引き分け（空きマスなし、勝者なし）
    Draw,
}

/// 9 マスの盤面
///
/// マスは行優先（row-major）で 0..9 の番号を持ちます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Mark>; 9],
}

impl Board {
    /// 空の盤面を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定マスのマークを取得
    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells[index]
    }

    /// 指定マスが空かどうか
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.cells[index].is_none()
    }

    /// 着手を適用し、新しい盤面と結果を返す
    ///
    /// 事前条件（呼び出し側＝ GameSession が保証）:
    /// - `index < 9`
    /// - `self.is_empty_at(index)`
    ///
    /// 勝利判定は `WIN_LINES` を固定順に走査し、最初に揃ったラインを
    /// 報告します（1 手で 2 ライン揃う稀なケースも決定的に 1 本を返す）。
    pub fn place(&self, index: usize, mark: Mark) -> (Board, MoveOutcome) {
        debug_assert!(index < 9);
        debug_assert!(self.cells[index].is_none());

        let mut next = *self;
        next.cells[index] = Some(mark);

        let outcome = match next.winning_line() {
            Some(line) => MoveOutcome::Win(line),
            None if next.is_full() => MoveOutcome::Draw,
            None => MoveOutcome::Continue,
        };
        (next, outcome)
    }

    /// ワイヤエンコード: 9 文字の位置文字列
    ///
    /// `0` = 空、`1` = プレイヤー 1、`2` = プレイヤー 2。
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or('0', |mark| mark.digit()))
            .collect()
    }

    fn winning_line(&self) -> Option<[usize; 3]> {
        WIN_LINES.iter().copied().find(|&[a, b, c]| {
            self.cells[a].is_some() && self.cells[a] == self.cells[b] && self.cells[b] == self.cells[c]
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(moves: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(index, mark) in moves {
            let (next, _) = board.place(index, mark);
            board = next;
        }
        board
    }

    #[test]
    fn test_place_on_empty_board_continues() {
        // テスト項目: 空の盤面への最初の一手はゲーム継続となる
        // given (前提条件):
        let board = Board::new();

        // when (操作):
        let (next, outcome) = board.place(4, Mark::A);

        // then (期待する結果):
        assert_eq!(outcome, MoveOutcome::Continue);
        assert_eq!(next.cell(4), Some(Mark::A));
        // 元の盤面は変更されない（純粋関数）
        assert!(board.is_empty_at(4));
    }

    #[test]
    fn test_all_eight_winning_lines_are_detected() {
        // テスト項目: 8 本の勝利ラインすべてが正しく検出される
        for &line in WIN_LINES.iter() {
            // given (前提条件): ラインの 2 マスが埋まった盤面
            let board = board_from(&[(line[0], Mark::A), (line[1], Mark::A)]);

            // when (操作): 3 マス目を埋める
            let (_, outcome) = board.place(line[2], Mark::A);

            // then (期待する結果): ちょうどそのラインで勝利
            assert_eq!(outcome, MoveOutcome::Win(line));
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // テスト項目: ラインが揃わず盤面が埋まった場合は引き分け
        // given (前提条件): 引き分けとなる盤面
        //   A B A
        //   A B B
        //   B A A  (最後の一手は 8)
        let board = board_from(&[
            (0, Mark::A),
            (1, Mark::B),
            (2, Mark::A),
            (3, Mark::A),
            (4, Mark::B),
            (5, Mark::B),
            (6, Mark::B),
            (7, Mark::A),
        ]);

        // when (操作):
        let (next, outcome) = board.place(8, Mark::A);

        // then (期待する結果):
        assert_eq!(outcome, MoveOutcome::Draw);
        assert_eq!(next.encode(), "121122211");
    }

    #[test]
    fn test_double_line_reports_first_in_fixed_order() {
        // テスト項目: 1 手で 2 ライン揃う場合、固定順で最初のラインが返る
        // given (前提条件):
        //   A B A
        //   B . B
        //   A B A  → 4 に置くと [0,4,8] と [2,4,6] が同時に揃う
        let board = board_from(&[
            (0, Mark::A),
            (1, Mark::B),
            (2, Mark::A),
            (3, Mark::B),
            (6, Mark::A),
            (5, Mark::B),
            (8, Mark::A),
            (7, Mark::B),
        ]);

        // when (操作):
        let (_, outcome) = board.place(4, Mark::A);

        // then (期待する結果): WIN_LINES 内で先に並ぶ [0,4,8] が報告される
        assert_eq!(outcome, MoveOutcome::Win([0, 4, 8]));
    }

    #[test]
    fn test_encode_empty_and_partial_board() {
        // テスト項目: 盤面のワイヤエンコードが位置文字列になる
        // given (前提条件):
        let empty = Board::new();
        let partial = board_from(&[(0, Mark::A), (4, Mark::B), (8, Mark::A)]);

        // when / then (期待する結果):
        assert_eq!(empty.encode(), "000000000");
        assert_eq!(partial.encode(), "100020001");
    }
}
