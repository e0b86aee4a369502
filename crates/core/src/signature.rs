//! マジックバイト・シグネチャの定義。
//!
//! オフセットが負の場合はバッファ末尾からの位置として解決する。

use std::ops::Range;

/// 既知の位置に現れるべき固定バイト列（ヘッダまたはトレーラ）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// 0以上: 先頭から、負: 末尾から（`buffer.len() + offset`）
    pub offset: isize,
    /// 期待するバイト列（空であってはならない）
    pub bytes: &'static [u8],
}

impl Signature {
    /// コンパイル時テーブル用のコンストラクタ。
    pub const fn new(offset: isize, bytes: &'static [u8]) -> Self {
        Self { offset, bytes }
    }

    /// 長さ `buffer_len` のバッファ上でこのシグネチャが占める範囲を返す。
    ///
    /// 範囲がバッファに完全に収まらない場合は `None`。
    pub fn window(&self, buffer_len: usize) -> Option<Range<usize>> {
        let start = if self.offset < 0 {
            buffer_len.checked_sub(self.offset.unsigned_abs())?
        } else {
            self.offset.unsigned_abs()
        };
        let end = start.checked_add(self.bytes.len())?;
        (end <= buffer_len).then_some(start..end)
    }

    /// ウィンドウ内の全バイトが期待値と一致するか。
    pub fn matches(&self, buffer: &[u8]) -> bool {
        if self.bytes.is_empty() {
            return false;
        }
        self.window(buffer.len())
            .and_then(|range| buffer.get(range))
            .is_some_and(|window| window == self.bytes)
    }
}
