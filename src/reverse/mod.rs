/// レイアウトテーブル逆生成コア
///
/// パイプライン: image（スナップショット読み取り）→ layout（構造デコード）
/// → walker（番兵終端ウォーク）→ format/symbols（シンボル化）
/// → extent（範囲照合）→ grid/driver（Cソース出力）

pub mod driver;
pub mod error;
pub mod extent;
pub mod format;
pub mod grid;
pub mod image;
pub mod layout;
pub mod symbols;
pub mod walker;

pub use driver::{GenOptions, SourceGenerator};
pub use error::{ReverseError, Result};
pub use extent::{Extent, ExtentList};
pub use format::ValueFormatter;
pub use grid::Grid;
pub use image::MemoryImage;
pub use layout::{KbdTables, ENTRY_POINT};
pub use symbols::SymbolTable;
pub use walker::{walk_descriptors, walk_run, WalkOutcome, MAX_RECORDS};
