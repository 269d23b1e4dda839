/// エラー分類
///
/// 解決エラー（DLL・エントリポイントが見つからない）と
/// 構造エラー（番兵が無い・イメージ範囲外）の2系統のみ。
/// どちらも致命的で、部分出力はしない。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReverseError {
    /// レイアウトDLLまたはエントリポイントの解決に失敗
    #[error("cannot resolve keyboard layout: {0}")]
    Resolution(String),

    /// レイアウトテーブルの構造が壊れている（フィールド名を必ず含める）
    #[error("malformed layout structure in {field}: {detail}")]
    Structural { field: String, detail: String },
}

impl ReverseError {
    pub fn resolution(detail: impl Into<String>) -> Self {
        ReverseError::Resolution(detail.into())
    }

    pub fn structural(field: impl Into<String>, detail: impl Into<String>) -> Self {
        ReverseError::Structural {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReverseError>;
