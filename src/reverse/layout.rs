/// レイアウトテーブルの物理構造
///
/// ルートヘッダ（KBDTABLES）と各レコードファミリのデコード。
/// フィールド順・アライメントはC構造体定義に一致させ、
/// ポインタ幅4/8の両方に対応する。値のコピーのみでソースメモリは不変。

use serde::{Deserialize, Serialize};

use crate::reverse::error::{ReverseError, Result};
use crate::reverse::image::MemoryImage;

/// レイアウトDLLの公開エントリポイント名
pub const ENTRY_POINT: &str = "KbdLayerDescriptor";

/// dwTypeの妥当範囲上限とフォールバック値（古いDLLはゴミ値を持つ）
pub const KBD_TYPE_LIMIT: u32 = 48;
pub const KBD_TYPE_FALLBACK: u32 = 4;

/// VSC_VKレコードのバイト幅（BYTE + パディング + USHORT）
pub const VSC_VK_STRIDE: usize = 4;

/// DEADKEYレコードのバイト幅（DWORD + WCHAR + USHORT）
pub const DEADKEY_STRIDE: usize = 8;

/// VK_TO_BITレコードのバイト幅（BYTE + BYTE）
pub const VK_TO_BIT_STRIDE: usize = 2;

/// VSC_LPWSTRレコードのバイト幅（BYTE + パディング + ポインタ）
pub fn vsc_lpwstr_stride(ptr_width: usize) -> usize {
    ptr_width * 2
}

/// VK_TO_WCHAR_TABLE記述子のバイト幅（ポインタ + BYTE + BYTE + パディング）
pub fn wchar_table_desc_stride(ptr_width: usize) -> usize {
    ptr_width * 2
}

/// アライメントを守りながらフィールドを順に読むカーソル
struct FieldCursor<'a> {
    image: &'a MemoryImage,
    addr: u64,
    field: &'static str,
}

impl<'a> FieldCursor<'a> {
    fn new(image: &'a MemoryImage, addr: u64, field: &'static str) -> Self {
        Self { image, addr, field }
    }

    fn align(&mut self, n: u64) {
        let rem = self.addr % n;
        if rem != 0 {
            self.addr += n - rem;
        }
    }

    fn u8(&mut self) -> Result<u8> {
        let v = self.image.read_u8(self.addr, self.field)?;
        self.addr += 1;
        Ok(v)
    }

    fn u16(&mut self) -> Result<u16> {
        self.align(2);
        let v = self.image.read_u16(self.addr, self.field)?;
        self.addr += 2;
        Ok(v)
    }

    fn u32(&mut self) -> Result<u32> {
        self.align(4);
        let v = self.image.read_u32(self.addr, self.field)?;
        self.addr += 4;
        Ok(v)
    }

    fn ptr(&mut self) -> Result<u64> {
        let w = self.image.ptr_width() as u64;
        self.align(w);
        let v = self.image.read_ptr(self.addr, self.field)?;
        self.addr += w;
        Ok(v)
    }
}

/// ルートヘッダのコピーアウト。フィールドは宣言順。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbdTables {
    pub char_modifiers: u64,
    pub vk_to_wchar_table: u64,
    pub dead_key: u64,
    pub key_names: u64,
    pub key_names_ext: u64,
    pub key_names_dead: u64,
    pub vsc_to_vk: u64,
    pub max_vsc_to_vk: u8,
    pub vsc_to_vk_e0: u64,
    pub vsc_to_vk_e1: u64,
    pub locale_flags: u32,
    pub lg_max: u8,
    pub lg_entry_size: u8,
    pub ligatures: u64,
    pub kbd_type: u32,
    pub kbd_subtype: u32,
    /// ヘッダ自身のアドレスとバイト数（エクステント登録用）
    pub addr: u64,
    pub byte_len: u64,
}

impl KbdTables {
    pub fn read(image: &MemoryImage, addr: u64) -> Result<Self> {
        if addr == 0 {
            return Err(ReverseError::structural("KBDTABLES", "null root pointer"));
        }
        let mut c = FieldCursor::new(image, addr, "KBDTABLES");
        let char_modifiers = c.ptr()?;
        let vk_to_wchar_table = c.ptr()?;
        let dead_key = c.ptr()?;
        let key_names = c.ptr()?;
        let key_names_ext = c.ptr()?;
        let key_names_dead = c.ptr()?;
        let vsc_to_vk = c.ptr()?;
        let max_vsc_to_vk = c.u8()?;
        let vsc_to_vk_e0 = c.ptr()?;
        let vsc_to_vk_e1 = c.ptr()?;
        let locale_flags = c.u32()?;
        let lg_max = c.u8()?;
        let lg_entry_size = c.u8()?;
        let ligatures = c.ptr()?;
        let kbd_type = c.u32()?;
        let kbd_subtype = c.u32()?;
        // 構造体末尾のパディング
        c.align(image.ptr_width() as u64);
        Ok(Self {
            char_modifiers,
            vk_to_wchar_table,
            dead_key,
            key_names,
            key_names_ext,
            key_names_dead,
            vsc_to_vk,
            max_vsc_to_vk,
            vsc_to_vk_e0,
            vsc_to_vk_e1,
            locale_flags,
            lg_max,
            lg_entry_size,
            ligatures,
            kbd_type,
            kbd_subtype,
            addr,
            byte_len: c.addr - addr,
        })
    }

    /// 妥当なキーボード種別（指定 > 妥当なdwType > フォールバック4）
    pub fn plausible_type(&self, override_type: u32) -> u32 {
        if override_type > 0 {
            override_type
        } else if self.kbd_type > 0 && self.kbd_type < KBD_TYPE_LIMIT {
            self.kbd_type
        } else {
            KBD_TYPE_FALLBACK
        }
    }
}

/// 仮想キー → 修飾ビット
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkToBit {
    pub vk: u8,
    pub mod_bits: u8,
}

impl VkToBit {
    pub fn read(image: &MemoryImage, addr: u64, field: &str) -> Result<Self> {
        Ok(Self {
            vk: image.read_u8(addr, field)?,
            mod_bits: image.read_u8(addr + 1, field)?,
        })
    }
}

/// MODIFIERS：vk_to_bits配列へのポインタ + ModNumber表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifiers {
    pub vk_to_bit: u64,
    pub max_mod_bits: u16,
    pub mod_numbers: Vec<u8>,
    pub addr: u64,
    pub byte_len: u64,
}

impl Modifiers {
    pub fn read(image: &MemoryImage, addr: u64) -> Result<Self> {
        let field = "pCharModifiers";
        let w = image.ptr_width() as u64;
        let vk_to_bit = image.read_ptr(addr, field)?;
        let max_mod_bits = image.read_u16(addr + w, field)?;
        // wMaxModBitsは最大値なので要素数は+1
        let count = max_mod_bits as usize + 1;
        let numbers_at = addr + w + 2;
        let mod_numbers = image.slice(numbers_at, count, field)?.to_vec();
        Ok(Self {
            vk_to_bit,
            max_mod_bits,
            mod_numbers,
            addr,
            byte_len: numbers_at + count as u64 - addr,
        })
    }
}

/// VK_TO_WCHARSx：キー + 属性 + シフト状態ごとの文字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkToWchars {
    pub vk: u8,
    pub attributes: u8,
    pub chars: Vec<u16>,
}

impl VkToWchars {
    pub fn read(image: &MemoryImage, addr: u64, slots: usize, field: &str) -> Result<Self> {
        let vk = image.read_u8(addr, field)?;
        let attributes = image.read_u8(addr + 1, field)?;
        let mut chars = Vec::with_capacity(slots);
        for i in 0..slots {
            chars.push(image.read_u16(addr + 2 + 2 * i as u64, field)?);
        }
        Ok(Self { vk, attributes, chars })
    }
}

/// VK_TO_WCHAR_TABLE記述子：レコードファミリ1種を指す
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WcharTableDesc {
    pub table: u64,
    pub slots: usize,
    pub stride: usize,
}

impl WcharTableDesc {
    pub fn read(image: &MemoryImage, addr: u64, field: &str) -> Result<Self> {
        let w = image.ptr_width() as u64;
        Ok(Self {
            table: image.read_ptr(addr, field)?,
            slots: image.read_u8(addr + w, field)? as usize,
            stride: image.read_u8(addr + w + 1, field)? as usize,
        })
    }
}

/// LIGATUREx：キー + 変換番号 + 出力文字列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ligature {
    pub vk: u8,
    pub mod_number: u8,
    pub chars: Vec<u16>,
}

impl Ligature {
    pub fn read(image: &MemoryImage, addr: u64, slots: usize, field: &str) -> Result<Self> {
        let vk = image.read_u8(addr, field)?;
        let mod_number = image.read_u8(addr + 1, field)?;
        let mut chars = Vec::with_capacity(slots);
        for i in 0..slots {
            chars.push(image.read_u16(addr + 2 + 2 * i as u64, field)?);
        }
        Ok(Self { vk, mod_number, chars })
    }
}

/// DEADKEY：基底+結合文字の合成語 + 合成結果 + フラグ
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeadKey {
    pub both: u32,
    pub composed: u16,
    pub flags: u16,
}

impl DeadKey {
    pub fn read(image: &MemoryImage, addr: u64, field: &str) -> Result<Self> {
        Ok(Self {
            both: image.read_u32(addr, field)?,
            composed: image.read_u16(addr + 4, field)?,
            flags: image.read_u16(addr + 6, field)?,
        })
    }

    /// 入力文字（下位ワード）
    pub fn character(&self) -> u16 {
        (self.both & 0xFFFF) as u16
    }

    /// デッドキー文字（上位ワード）
    pub fn dead_char(&self) -> u16 {
        (self.both >> 16) as u16
    }
}

/// VSC_LPWSTR：スキャンコード + キー名文字列ポインタ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VscString {
    pub vsc: u8,
    pub text_ptr: u64,
}

impl VscString {
    pub fn read(image: &MemoryImage, addr: u64, field: &str) -> Result<Self> {
        let w = image.ptr_width() as u64;
        Ok(Self {
            vsc: image.read_u8(addr, field)?,
            text_ptr: image.read_ptr(addr + w, field)?,
        })
    }
}

/// VSC_VK：プレフィックス付きスキャンコード + VK値
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VscVk {
    pub vsc: u8,
    pub vk: u16,
}

impl VscVk {
    pub fn read(image: &MemoryImage, addr: u64, field: &str) -> Result<Self> {
        Ok(Self {
            vsc: image.read_u8(addr, field)?,
            vk: image.read_u16(addr + 2, field)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_layout_64bit() {
        // 0x68バイトの64bitヘッダを組み立てる
        let mut bytes = vec![0u8; 0x68];
        bytes[0x00..0x08].copy_from_slice(&0x2000u64.to_le_bytes()); // pCharModifiers
        bytes[0x38] = 0x7F; // bMaxVSCtoVK
        bytes[0x50..0x54].copy_from_slice(&0x0001_0001u32.to_le_bytes()); // fLocaleFlags
        bytes[0x54] = 5; // nLgMax
        bytes[0x55] = 12; // cbLgEntry
        bytes[0x60..0x64].copy_from_slice(&4u32.to_le_bytes()); // dwType
        let image = MemoryImage::from_parts(0x1000, bytes, 8);

        let t = KbdTables::read(&image, 0x1000).unwrap();
        assert_eq!(t.char_modifiers, 0x2000);
        assert_eq!(t.max_vsc_to_vk, 0x7F);
        assert_eq!(t.locale_flags, 0x0001_0001);
        assert_eq!(t.lg_max, 5);
        assert_eq!(t.lg_entry_size, 12);
        assert_eq!(t.kbd_type, 4);
        assert_eq!(t.byte_len, 0x68);
    }

    #[test]
    fn test_root_layout_32bit() {
        let mut bytes = vec![0u8; 0x3C];
        bytes[0x00..0x04].copy_from_slice(&0x2000u32.to_le_bytes());
        bytes[0x1C] = 0x7F; // bMaxVSCtoVK
        bytes[0x28..0x2C].copy_from_slice(&0x0001_0000u32.to_le_bytes());
        bytes[0x34..0x38].copy_from_slice(&7u32.to_le_bytes()); // dwType
        bytes[0x38..0x3C].copy_from_slice(&3u32.to_le_bytes()); // dwSubType
        let image = MemoryImage::from_parts(0x1000, bytes, 4);

        let t = KbdTables::read(&image, 0x1000).unwrap();
        assert_eq!(t.char_modifiers, 0x2000);
        assert_eq!(t.max_vsc_to_vk, 0x7F);
        assert_eq!(t.kbd_type, 7);
        assert_eq!(t.kbd_subtype, 3);
        assert_eq!(t.byte_len, 0x3C);
    }

    #[test]
    fn test_null_root_is_structural() {
        let image = MemoryImage::from_parts(0x1000, vec![0; 16], 8);
        let err = KbdTables::read(&image, 0).unwrap_err();
        assert!(format!("{}", err).contains("KBDTABLES"));
    }

    #[test]
    fn test_plausible_type() {
        let mut bytes = vec![0u8; 0x68];
        bytes[0x60..0x64].copy_from_slice(&9999u32.to_le_bytes()); // ゴミ値
        let image = MemoryImage::from_parts(0, bytes, 8);
        let t = KbdTables::read(&image, 0).err();
        assert!(t.is_some()); // アドレス0はnull扱い

        let image = MemoryImage::from_parts(0x10, {
            let mut b = vec![0u8; 0x68];
            b[0x60..0x64].copy_from_slice(&9999u32.to_le_bytes());
            b
        }, 8);
        let t = KbdTables::read(&image, 0x10).unwrap();
        assert_eq!(t.plausible_type(0), KBD_TYPE_FALLBACK);
        assert_eq!(t.plausible_type(6), 6);
    }

    #[test]
    fn test_dead_key_words() {
        // MAKELONG('a', 0x0301)：aにアキュートを合成
        let dk = DeadKey { both: 0x0301_0061, composed: 0x00E1, flags: 0 };
        assert_eq!(dk.character(), 0x0061);
        assert_eq!(dk.dead_char(), 0x0301);
    }
}
