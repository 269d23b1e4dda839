/// エクステント追跡
///
/// 発見した全サブ構造の (名前, 開始, 長さ) を蓄積し、照合パスで
/// アドレス順に整列・同名隣接の併合・隙間の分類を行って、
/// 連続領域の完全な記述に仕上げる。照合は冪等で決定的。

use serde::{Deserialize, Serialize};

use crate::reverse::image::MemoryImage;

/// 1つの名前付きバイト範囲
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub name: String,
    pub start: u64,
    pub len: u64,
}

impl Extent {
    pub fn new(name: impl Into<String>, start: u64, len: u64) -> Self {
        Self { name: name.into(), start, len }
    }

    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// エクステントの蓄積と照合
#[derive(Debug, Default)]
pub struct ExtentList {
    items: Vec<Extent>,
    reconciled: bool,
}

impl ExtentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, e: Extent) {
        self.items.push(e);
        self.reconciled = false;
    }

    pub fn items(&self) -> &[Extent] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 整列・併合・隙間分類。
    /// 1. 開始アドレス昇順に安定整列（同値は投入順維持）
    /// 2. 隣接ペアを走査：
    ///    - 同名で、接しているか間が全てゼロ → 併合して同じ位置から再走査
    ///    - 隙間あり → ゼロなら"Padding"、非ゼロなら"Unreferenced"を合成
    ///    - 異名で接触・重複 → 何もしない
    pub fn reconcile(&mut self, image: &MemoryImage) {
        self.items.sort_by_key(|e| e.start);

        let mut i = 1;
        while i < self.items.len() {
            let prev_end = self.items[i - 1].end();
            let cur_start = self.items[i].start;
            let inter_zero = image.is_zero(prev_end, cur_start);
            let same_name = self.items[i - 1].name == self.items[i].name;

            if same_name && (prev_end >= cur_start || inter_zero) {
                // 併合：prevをcurの終端まで広げる（包含時は縮めない）
                let new_end = self.items[i].end().max(prev_end);
                self.items[i - 1].len = new_end - self.items[i - 1].start;
                self.items.remove(i);
                // iを進めず、広がったprevと次の要素を再比較する
            } else {
                if prev_end < cur_start {
                    let gap_name = if inter_zero { "Padding" } else { "Unreferenced" };
                    self.items.insert(i, Extent::new(gap_name, prev_end, cur_start - prev_end));
                    i += 1; // 合成した隙間を飛ばしてcurへ
                }
                i += 1;
            }
        }
        self.reconciled = true;
    }

    pub fn is_reconciled(&self) -> bool {
        self.reconciled
    }
}

/// 1エクステントの注釈付き16進ダンプを追記する。
/// イメージ外にはみ出す範囲（ページ余白など）はイメージ境界に切り詰める。
pub fn dump_hex(out: &mut String, image: &MemoryImage, e: &Extent) {
    let header = format!("{} ({} bytes)", e.name, e.len);
    out.push_str("//\n");
    out.push_str(&format!("// {}\n", header));
    out.push_str(&format!("// {}\n", "-".repeat(header.len())));

    let start = e.start.max(image.base());
    let end = e.end().min(image.end());
    let mut addr = start;
    while addr < end {
        let row_len = ((end - addr) as usize).min(16);
        let bytes = image
            .slice(addr, row_len, &e.name)
            .expect("clamped range is inside the image");
        let mut hex = String::new();
        let mut ascii = String::new();
        for (i, &b) in bytes.iter().enumerate() {
            if i == 8 {
                hex.push(' ');
            }
            hex.push_str(&format!("{:02X} ", b));
            ascii.push(if (0x20..0x7F).contains(&b) { b as char } else { '.' });
        }
        // 8バイト区切りの空白ぶんも含めて揃える
        out.push_str(&format!("// 0x{:016X}  {:<49} |{}|\n", addr, hex, ascii));
        addr += row_len as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_image(base: u64, len: usize) -> MemoryImage {
        MemoryImage::from_parts(base, vec![0; len], 8)
    }

    #[test]
    fn test_same_name_zero_gap_merges() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("Strings in key_names", 0x10, 0x08));
        list.push(Extent::new("Strings in key_names", 0x20, 0x08));
        list.reconcile(&img);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0], Extent::new("Strings in key_names", 0x10, 0x18));
    }

    #[test]
    fn test_nonzero_gap_becomes_unreferenced() {
        let mut bytes = vec![0u8; 0x100];
        bytes[0x1C] = 0xFF; // 隙間の中の非ゼロバイト
        let img = MemoryImage::from_parts(0, bytes, 8);
        let mut list = ExtentList::new();
        list.push(Extent::new("a", 0x10, 0x08));
        list.push(Extent::new("a", 0x20, 0x08));
        list.reconcile(&img);
        // 同名でも間に非ゼロがあれば併合せず、隙間が実体化する
        assert_eq!(list.items().len(), 3);
        assert_eq!(list.items()[1], Extent::new("Unreferenced", 0x18, 0x08));
    }

    #[test]
    fn test_zero_gap_between_different_names_is_padding() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("a", 0x10, 0x08));
        list.push(Extent::new("b", 0x20, 0x08));
        list.reconcile(&img);
        assert_eq!(list.items().len(), 3);
        assert_eq!(list.items()[1], Extent::new("Padding", 0x18, 0x08));
    }

    #[test]
    fn test_touching_different_names_untouched() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("a", 0x10, 0x10));
        list.push(Extent::new("b", 0x20, 0x10));
        list.reconcile(&img);
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("b", 0x40, 0x08));
        list.push(Extent::new("a", 0x10, 0x08));
        list.push(Extent::new("a", 0x20, 0x08));
        list.reconcile(&img);
        let first: Vec<Extent> = list.items().to_vec();
        list.reconcile(&img);
        assert_eq!(list.items(), &first[..]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("first", 0x10, 0x08));
        list.push(Extent::new("second", 0x10, 0x04));
        list.reconcile(&img);
        assert_eq!(list.items()[0].name, "first");
        assert_eq!(list.items()[1].name, "second");
    }

    #[test]
    fn test_multi_way_overlap_is_pairwise_only() {
        // 同一アドレスに3つ重なる場合の優先順位は未定義：
        // 安定整列後の隣接ペア併合以上のことはしない、をここで固定する
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("x", 0x10, 0x08));
        list.push(Extent::new("y", 0x10, 0x10));
        list.push(Extent::new("z", 0x10, 0x04));
        list.reconcile(&img);
        let names: Vec<&str> = list.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_chain_merge_rescans_extended_prev() {
        let img = zero_image(0, 0x100);
        let mut list = ExtentList::new();
        list.push(Extent::new("s", 0x10, 0x08));
        list.push(Extent::new("s", 0x18, 0x08));
        list.push(Extent::new("s", 0x28, 0x08)); // ゼロ隙間越し
        list.reconcile(&img);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0], Extent::new("s", 0x10, 0x20));
    }

    #[test]
    fn test_dump_hex_row_shape() {
        let img = MemoryImage::from_parts(0x1000, (0u8..32).collect(), 8);
        let e = Extent::new("sample", 0x1000, 20);
        let mut out = String::new();
        dump_hex(&mut out, &img, &e);
        println!("{}", out);
        assert!(out.contains("// sample (20 bytes)"));
        assert!(out.contains("0x0000000000001000"));
        // 2行目は残り4バイト
        assert_eq!(out.lines().count(), 3 + 2);
    }
}
