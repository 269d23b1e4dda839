/// 可変ストライドテーブルウォーカー
///
/// 番兵終端の連続レコード列を列挙する。要素のバイト幅と
/// ペイロード数は実行時にしか分からない（外部から与えられる）ため、
/// 次レコードへは常に与えられたストライドを加算して進む。
/// 番兵が見つからない場合は上限で打ち切り構造エラーにする。

use crate::reverse::error::{ReverseError, Result};
use crate::reverse::extent::Extent;
use crate::reverse::image::MemoryImage;
use crate::reverse::layout::{wchar_table_desc_stride, WcharTableDesc};

/// 1回のウォークで許すレコード数の上限。実在のレイアウトは
/// 高々数百レコードなので、これを超えたら終端の無い配列とみなす。
pub const MAX_RECORDS: usize = 4096;

/// 1回のウォーク結果：デコード済みレコード列と占有範囲（番兵含む）
#[derive(Debug)]
pub struct WalkOutcome<R> {
    pub records: Vec<R>,
    pub span: Extent,
}

/// 番兵終端の連続レコード列を列挙する。
/// decodeは1レコードを読み、番兵ならNoneを返す。
/// 占有範囲 [start, end) には番兵レコード自身を含む。
pub fn walk_run<R>(
    image: &MemoryImage,
    name: &str,
    field: &str,
    start: u64,
    stride: usize,
    mut decode: impl FnMut(&MemoryImage, u64) -> Result<Option<R>>,
) -> Result<WalkOutcome<R>> {
    if stride == 0 {
        return Err(ReverseError::structural(field, "record stride is zero"));
    }
    let mut records = Vec::new();
    let mut addr = start;
    for _ in 0..MAX_RECORDS {
        match decode(image, addr)? {
            Some(r) => {
                records.push(r);
                addr += stride as u64;
            }
            None => {
                let end = addr + stride as u64;
                return Ok(WalkOutcome {
                    records,
                    span: Extent::new(name, start, end - start),
                });
            }
        }
    }
    Err(ReverseError::structural(
        field,
        format!("no sentinel record within {} entries", MAX_RECORDS),
    ))
}

/// 「テーブルのテーブル」モード：記述子配列（nullポインタ番兵）を列挙する。
/// 各記述子が1つのレコードファミリ（ポインタ・スロット数・ストライド）を指す。
pub fn walk_descriptors(
    image: &MemoryImage,
    name: &str,
    field: &str,
    start: u64,
) -> Result<WalkOutcome<WcharTableDesc>> {
    let stride = wchar_table_desc_stride(image.ptr_width());
    walk_run(image, name, field, start, stride, |img, addr| {
        let d = WcharTableDesc::read(img, addr, field)?;
        Ok((d.table != 0).then_some(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_of(base: u64, bytes: Vec<u8>) -> MemoryImage {
        MemoryImage::from_parts(base, bytes, 8)
    }

    #[test]
    fn test_walk_stops_at_sentinel() {
        // [{1,'x'},{2,'y'},{0,0}] ストライド2
        let img = image_of(0x100, vec![1, b'x', 2, b'y', 0, 0, 0xEE, 0xEE]);
        let out = walk_run(&img, "t", "t", 0x100, 2, |img, addr| {
            let key = img.read_u8(addr, "t")?;
            let payload = img.read_u8(addr + 1, "t")?;
            Ok((key != 0).then_some((key, payload)))
        })
        .unwrap();
        // データレコードは2件のみ、番兵の先は読まない
        assert_eq!(out.records, vec![(1, b'x'), (2, b'y')]);
        assert_eq!(out.span.start, 0x100);
        assert_eq!(out.span.len, 6); // 番兵を含む3レコード分
    }

    #[test]
    fn test_missing_sentinel_is_structural() {
        let img = image_of(0, vec![1u8; 64]);
        let err = walk_run(&img, "t", "pVSCtoVK_E0", 0, 2, |img, addr| {
            // イメージ末尾に達した時点で範囲外エラーになるが、
            // それも構造エラーとして表面化する
            let key = img.read_u8(addr, "pVSCtoVK_E0")?;
            Ok((key != 0).then_some(key))
        })
        .unwrap_err();
        assert!(format!("{}", err).contains("pVSCtoVK_E0"));
    }

    #[test]
    fn test_iteration_cap() {
        // 番兵の無い巨大イメージ：上限で構造エラー
        let img = image_of(0, vec![1u8; (MAX_RECORDS + 8) * 2]);
        let err = walk_run(&img, "t", "pDeadKey", 0, 2, |img, addr| {
            let key = img.read_u8(addr, "pDeadKey")?;
            Ok((key != 0).then_some(key))
        })
        .unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("pDeadKey"));
        assert!(msg.contains("sentinel"));
    }

    #[test]
    fn test_variable_stride() {
        // ストライド4でキーは先頭バイトのみ
        let img = image_of(0, vec![7, 0, 0xAA, 0xBB, 9, 0, 0xCC, 0xDD, 0, 0, 0, 0]);
        let out = walk_run(&img, "t", "t", 0, 4, |img, addr| {
            let key = img.read_u8(addr, "t")?;
            Ok((key != 0).then_some(key))
        })
        .unwrap();
        assert_eq!(out.records, vec![7, 9]);
        assert_eq!(out.span.len, 12);
    }

    #[test]
    fn test_descriptor_walk() {
        // 64bit記述子2個 + null番兵
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x5000u64.to_le_bytes());
        bytes.push(3); // nModifications
        bytes.push(8); // cbSize
        bytes.extend_from_slice(&[0u8; 6]);
        bytes.extend_from_slice(&0x6000u64.to_le_bytes());
        bytes.push(1);
        bytes.push(4);
        bytes.extend_from_slice(&[0u8; 6]);
        bytes.extend_from_slice(&[0u8; 16]); // 番兵
        let img = image_of(0x400, bytes);

        let out = walk_descriptors(&img, "vk_to_wchar", "pVkToWcharTable", 0x400).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].table, 0x5000);
        assert_eq!(out.records[0].slots, 3);
        assert_eq!(out.records[0].stride, 8);
        assert_eq!(out.records[1].slots, 1);
        assert_eq!(out.span.len, 48);
    }
}
