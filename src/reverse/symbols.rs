/// シンボルカタログ
///
/// 数値 → ニックネームの静的対応表。ドメインごとに独立した
/// 不変インスタンスを持つ。完全一致のみ（前方一致等はしない）。
/// ビットマスク分解はテーブルの宣言順に試すため IndexMap を使う。

use std::sync::OnceLock;

use indexmap::IndexMap;

/// 宣言順を保持する数値→シンボル対応表
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    map: IndexMap<u64, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { map: IndexMap::new() }
    }

    /// 登録。重複キーは先勝ち。
    pub fn insert(&mut self, value: u64, name: impl Into<String>) {
        self.map.entry(value).or_insert_with(|| name.into());
    }

    pub fn from_pairs(pairs: &[(u64, &str)]) -> Self {
        let mut t = Self::new();
        for &(v, n) in pairs {
            t.insert(v, n);
        }
        t
    }

    pub fn lookup(&self, value: u64) -> Option<&str> {
        self.map.get(&value).map(|s| s.as_str())
    }

    /// 宣言順の列挙
    pub fn entries(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.map.iter().map(|(&v, n)| (v, n.as_str()))
    }

    /// 全キーのOR（属性マスク計算用）
    pub fn key_mask(&self) -> u64 {
        self.map.keys().fold(0, |m, &k| m | k)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// MODIFIERS構造体のModNumber行コメント（ビット組み合わせの説明）
pub const MODIFIER_COMMENTS: [&str; 8] = [
    "000 = <none>",
    "001 = Shift",
    "010 = Control",
    "011 = Shift Control",
    "100 = Alt",
    "101 = Shift Alt",
    "110 = Control Alt (AltGr)",
    "111 = Shift Control Alt",
];

/// VK_TO_WCHARSx の列見出し
pub const MODIFIER_HEADERS: [&str; 8] = [
    "",
    "Shift",
    "Ctrl",
    "Shift/Ctrl",
    "Alt",
    "Shift/Alt",
    "Ctrl/Alt",
    "Shift/Ctrl/Alt",
];

/// シフト状態ビット
pub fn shift_state_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x00, "KBDBASE"),
            (0x01, "KBDSHIFT"),
            (0x02, "KBDCTRL"),
            (0x04, "KBDALT"),
            (0x08, "KBDKANA"),
            (0x10, "KBDROYA"),
            (0x20, "KBDLOYA"),
            (0x80, "KBDGRPSELTAP"),
        ])
    })
}

/// スキャンコード→VK変換値の上位フラグビット
pub fn vk_flag_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x0100, "KBDEXT"),
            (0x0200, "KBDMULTIVK"),
            (0x0400, "KBDSPECIAL"),
            (0x0800, "KBDNUMPAD"),
            (0x1000, "KBDUNICODE"),
            (0x2000, "KBDINJECTEDVK"),
            (0x4000, "KBDMAPPEDVK"),
            (0x8000, "KBDBREAK"),
        ])
    })
}

/// VK_TO_WCHARSx の属性ビット
pub fn vk_attr_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x01, "CAPLOK"),
            (0x02, "SGCAPS"),
            (0x04, "CAPLOKALTGR"),
            (0x08, "KANALOK"),
            (0x80, "GRPSELTAP"),
        ])
    })
}

/// ロケールフラグ下位ワードのビット
pub fn locale_flag_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x0001, "KLLF_ALTGR"),
            (0x0002, "KLLF_SHIFTLOCK"),
            (0x0004, "KLLF_LRM_RLM"),
        ])
    })
}

/// ロケールフラグ上位ワード（バージョン）
pub fn kbd_version_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| SymbolTable::from_pairs(&[(0x0001, "KBD_VERSION")]))
}

/// MODIFIERS.ModNumber の無効スロット
pub fn shift_invalid_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| SymbolTable::from_pairs(&[(0x0F, "SHFT_INVALID")]))
}

/// デッドキーフラグ
pub fn dead_key_flag_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| SymbolTable::from_pairs(&[(0x0001, "DKF_DEAD")]))
}

/// WCHAR一文字の完全シンボル（文字リテラルとしてそのまま出力できる形）
pub fn wchar_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x0009, "L'\\t'"),
            (0x000A, "L'\\n'"),
            (0x000D, "L'\\r'"),
            (0x0027, "L'\\''"),
            (0x005C, "L'\\\\'"),
            (0xF000, "WCH_NONE"),
            (0xF001, "WCH_DEAD"),
            (0xF002, "WCH_LGTR"),
        ])
    })
}

/// 文字列リテラル中でのWCHARエスケープ表現
pub fn wchar_literals() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x0009, "\\t"),
            (0x000A, "\\n"),
            (0x000D, "\\r"),
            (0x0022, "\\\""),
            (0x005C, "\\\\"),
        ])
    })
}

/// 仮想キーコード
pub fn vk_symbols() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        let mut t = SymbolTable::from_pairs(&[
            (0x01, "VK_LBUTTON"),
            (0x02, "VK_RBUTTON"),
            (0x03, "VK_CANCEL"),
            (0x04, "VK_MBUTTON"),
            (0x05, "VK_XBUTTON1"),
            (0x06, "VK_XBUTTON2"),
            (0x08, "VK_BACK"),
            (0x09, "VK_TAB"),
            (0x0C, "VK_CLEAR"),
            (0x0D, "VK_RETURN"),
            (0x10, "VK_SHIFT"),
            (0x11, "VK_CONTROL"),
            (0x12, "VK_MENU"),
            (0x13, "VK_PAUSE"),
            (0x14, "VK_CAPITAL"),
            (0x15, "VK_KANA"),
            (0x16, "VK_IME_ON"),
            (0x17, "VK_JUNJA"),
            (0x18, "VK_FINAL"),
            (0x19, "VK_HANJA"),
            (0x19, "VK_KANJI"), // 先勝ちでVK_HANJAが残る
            (0x1A, "VK_IME_OFF"),
            (0x1B, "VK_ESCAPE"),
            (0x1C, "VK_CONVERT"),
            (0x1D, "VK_NONCONVERT"),
            (0x1E, "VK_ACCEPT"),
            (0x1F, "VK_MODECHANGE"),
            (0x20, "VK_SPACE"),
            (0x21, "VK_PRIOR"),
            (0x22, "VK_NEXT"),
            (0x23, "VK_END"),
            (0x24, "VK_HOME"),
            (0x25, "VK_LEFT"),
            (0x26, "VK_UP"),
            (0x27, "VK_RIGHT"),
            (0x28, "VK_DOWN"),
            (0x29, "VK_SELECT"),
            (0x2A, "VK_PRINT"),
            (0x2B, "VK_EXECUTE"),
            (0x2C, "VK_SNAPSHOT"),
            (0x2D, "VK_INSERT"),
            (0x2E, "VK_DELETE"),
            (0x2F, "VK_HELP"),
        ]);
        // '0'..'9', 'A'..'Z' は文字リテラルのまま出力する
        for c in ('0'..='9').chain('A'..='Z') {
            t.insert(c as u64, format!("'{}'", c));
        }
        for &(v, n) in &[
            (0x5Bu64, "VK_LWIN"),
            (0x5C, "VK_RWIN"),
            (0x5D, "VK_APPS"),
            (0x5F, "VK_SLEEP"),
            (0x60, "VK_NUMPAD0"),
            (0x61, "VK_NUMPAD1"),
            (0x62, "VK_NUMPAD2"),
            (0x63, "VK_NUMPAD3"),
            (0x64, "VK_NUMPAD4"),
            (0x65, "VK_NUMPAD5"),
            (0x66, "VK_NUMPAD6"),
            (0x67, "VK_NUMPAD7"),
            (0x68, "VK_NUMPAD8"),
            (0x69, "VK_NUMPAD9"),
            (0x6A, "VK_MULTIPLY"),
            (0x6B, "VK_ADD"),
            (0x6C, "VK_SEPARATOR"),
            (0x6D, "VK_SUBTRACT"),
            (0x6E, "VK_DECIMAL"),
            (0x6F, "VK_DIVIDE"),
            (0x70, "VK_F1"),
            (0x71, "VK_F2"),
            (0x72, "VK_F3"),
            (0x73, "VK_F4"),
            (0x74, "VK_F5"),
            (0x75, "VK_F6"),
            (0x76, "VK_F7"),
            (0x77, "VK_F8"),
            (0x78, "VK_F9"),
            (0x79, "VK_F10"),
            (0x7A, "VK_F11"),
            (0x7B, "VK_F12"),
            (0x7C, "VK_F13"),
            (0x7D, "VK_F14"),
            (0x7E, "VK_F15"),
            (0x7F, "VK_F16"),
            (0x80, "VK_F17"),
            (0x81, "VK_F18"),
            (0x82, "VK_F19"),
            (0x83, "VK_F20"),
            (0x84, "VK_F21"),
            (0x85, "VK_F22"),
            (0x86, "VK_F23"),
            (0x87, "VK_F24"),
            (0x88, "VK_NAVIGATION_VIEW"),
            (0x89, "VK_NAVIGATION_MENU"),
            (0x8A, "VK_NAVIGATION_UP"),
            (0x8B, "VK_NAVIGATION_DOWN"),
            (0x8C, "VK_NAVIGATION_LEFT"),
            (0x8D, "VK_NAVIGATION_RIGHT"),
            (0x8E, "VK_NAVIGATION_ACCEPT"),
            (0x8F, "VK_NAVIGATION_CANCEL"),
            (0x90, "VK_NUMLOCK"),
            (0x91, "VK_SCROLL"),
            (0x92, "VK_OEM_NEC_EQUAL"),
            (0x92, "VK_OEM_FJ_JISHO"), // 先勝ち
            (0x93, "VK_OEM_FJ_MASSHOU"),
            (0x94, "VK_OEM_FJ_TOUROKU"),
            (0x95, "VK_OEM_FJ_LOYA"),
            (0x96, "VK_OEM_FJ_ROYA"),
            (0xA0, "VK_LSHIFT"),
            (0xA1, "VK_RSHIFT"),
            (0xA2, "VK_LCONTROL"),
            (0xA3, "VK_RCONTROL"),
            (0xA4, "VK_LMENU"),
            (0xA5, "VK_RMENU"),
            (0xA6, "VK_BROWSER_BACK"),
            (0xA7, "VK_BROWSER_FORWARD"),
            (0xA8, "VK_BROWSER_REFRESH"),
            (0xA9, "VK_BROWSER_STOP"),
            (0xAA, "VK_BROWSER_SEARCH"),
            (0xAB, "VK_BROWSER_FAVORITES"),
            (0xAC, "VK_BROWSER_HOME"),
            (0xAD, "VK_VOLUME_MUTE"),
            (0xAE, "VK_VOLUME_DOWN"),
            (0xAF, "VK_VOLUME_UP"),
            (0xB0, "VK_MEDIA_NEXT_TRACK"),
            (0xB1, "VK_MEDIA_PREV_TRACK"),
            (0xB2, "VK_MEDIA_STOP"),
            (0xB3, "VK_MEDIA_PLAY_PAUSE"),
            (0xB4, "VK_LAUNCH_MAIL"),
            (0xB5, "VK_LAUNCH_MEDIA_SELECT"),
            (0xB6, "VK_LAUNCH_APP1"),
            (0xB7, "VK_LAUNCH_APP2"),
            (0xBA, "VK_OEM_1"),
            (0xBB, "VK_OEM_PLUS"),
            (0xBC, "VK_OEM_COMMA"),
            (0xBD, "VK_OEM_MINUS"),
            (0xBE, "VK_OEM_PERIOD"),
            (0xBF, "VK_OEM_2"),
            (0xC0, "VK_OEM_3"),
            (0xC3, "VK_GAMEPAD_A"),
            (0xC4, "VK_GAMEPAD_B"),
            (0xC5, "VK_GAMEPAD_X"),
            (0xC6, "VK_GAMEPAD_Y"),
            (0xC7, "VK_GAMEPAD_RIGHT_SHOULDER"),
            (0xC8, "VK_GAMEPAD_LEFT_SHOULDER"),
            (0xC9, "VK_GAMEPAD_LEFT_TRIGGER"),
            (0xCA, "VK_GAMEPAD_RIGHT_TRIGGER"),
            (0xCB, "VK_GAMEPAD_DPAD_UP"),
            (0xCC, "VK_GAMEPAD_DPAD_DOWN"),
            (0xCD, "VK_GAMEPAD_DPAD_LEFT"),
            (0xCE, "VK_GAMEPAD_DPAD_RIGHT"),
            (0xCF, "VK_GAMEPAD_MENU"),
            (0xD0, "VK_GAMEPAD_VIEW"),
            (0xD1, "VK_GAMEPAD_LEFT_THUMBSTICK_BUTTON"),
            (0xD2, "VK_GAMEPAD_RIGHT_THUMBSTICK_BUTTON"),
            (0xD3, "VK_GAMEPAD_LEFT_THUMBSTICK_UP"),
            (0xD4, "VK_GAMEPAD_LEFT_THUMBSTICK_DOWN"),
            (0xD5, "VK_GAMEPAD_LEFT_THUMBSTICK_RIGHT"),
            (0xD6, "VK_GAMEPAD_LEFT_THUMBSTICK_LEFT"),
            (0xD7, "VK_GAMEPAD_RIGHT_THUMBSTICK_UP"),
            (0xD8, "VK_GAMEPAD_RIGHT_THUMBSTICK_DOWN"),
            (0xD9, "VK_GAMEPAD_RIGHT_THUMBSTICK_RIGHT"),
            (0xDA, "VK_GAMEPAD_RIGHT_THUMBSTICK_LEFT"),
            (0xDB, "VK_OEM_4"),
            (0xDC, "VK_OEM_5"),
            (0xDD, "VK_OEM_6"),
            (0xDE, "VK_OEM_7"),
            (0xDF, "VK_OEM_8"),
            (0xE1, "VK_OEM_AX"),
            (0xE2, "VK_OEM_102"),
            (0xE3, "VK_ICO_HELP"),
            (0xE4, "VK_ICO_00"),
            (0xE5, "VK_PROCESSKEY"),
            (0xE6, "VK_ICO_CLEAR"),
            (0xE7, "VK_PACKET"),
            (0xE9, "VK_OEM_RESET"),
            (0xEA, "VK_OEM_JUMP"),
            (0xEB, "VK_OEM_PA1"),
            (0xEC, "VK_OEM_PA2"),
            (0xED, "VK_OEM_PA3"),
            (0xEE, "VK_OEM_WSCTRL"),
            (0xEF, "VK_OEM_CUSEL"),
            (0xF0, "VK_OEM_ATTN"),
            (0xF1, "VK_OEM_FINISH"),
            (0xF2, "VK_OEM_COPY"),
            (0xF3, "VK_OEM_AUTO"),
            (0xF4, "VK_OEM_ENLW"),
            (0xF5, "VK_OEM_BACKTAB"),
            (0xF6, "VK_ATTN"),
            (0xF7, "VK_CRSEL"),
            (0xF8, "VK_EXSEL"),
            (0xF9, "VK_EREOF"),
            (0xFA, "VK_PLAY"),
            (0xFB, "VK_ZOOM"),
            (0xFC, "VK_NONAME"),
            (0xFD, "VK_PA1"),
            (0xFE, "VK_OEM_CLEAR"),
            (0xFF, "VK__none_"),
        ] {
            t.insert(v, n);
        }
        t
    })
}

/// 非ASCII WCHARの人間向け説明（末尾コメント用）
pub fn wchar_descriptions() -> &'static SymbolTable {
    static T: OnceLock<SymbolTable> = OnceLock::new();
    T.get_or_init(|| {
        SymbolTable::from_pairs(&[
            (0x0008, "BS"),
            (0x0009, "TAB"),
            (0x000A, "LF"),
            (0x000B, "VT"),
            (0x000C, "FF"),
            (0x000D, "CR"),
            (0x001B, "ESC"),
            (0x007F, "DEL"),
            (0x00A0, "Nbrk space"),
            (0x00A1, "Inv !"),
            (0x00A2, "Cent"),
            (0x00A3, "Pound"),
            (0x00A4, "Currency"),
            (0x00A5, "Yen"),
            (0x00A6, "Broken bar"),
            (0x00A7, "Section"),
            (0x00A8, "Diaeresis"),
            (0x00A9, "Copyright"),
            (0x00AA, "Fem ord"),
            (0x00AB, "<<"),
            (0x00AC, "Not"),
            (0x00AD, "Soft hyphen"),
            (0x00AE, "Registered"),
            (0x00AF, "Macron"),
            (0x00B0, "Degree"),
            (0x00B1, "+/-"),
            (0x00B2, "Superscr two"),
            (0x00B3, "Superscr three"),
            (0x00B4, "Acute"),
            (0x00B5, "Micro"),
            (0x00B6, "Pilcrow"),
            (0x00B7, "Middle dot"),
            (0x00B8, "Cedilla"),
            (0x00B9, "Superscr one"),
            (0x00BA, "Masc ord"),
            (0x00BB, ">>"),
            (0x00BC, "1/4"),
            (0x00BD, "1/2"),
            (0x00BE, "3/4"),
            (0x00BF, "Inv ?"),
            (0x00C0, "A grave"),
            (0x00C1, "A acute"),
            (0x00C2, "A circumflex"),
            (0x00C3, "A tilde"),
            (0x00C4, "A diaeresis"),
            (0x00C5, "A ring above"),
            (0x00C6, "AE"),
            (0x00C7, "C cedilla"),
            (0x00C8, "E grave"),
            (0x00C9, "E acute"),
            (0x00CA, "E circumflex"),
            (0x00CB, "E diaeresis"),
            (0x00CC, "I grave"),
            (0x00CD, "I acute"),
            (0x00CE, "I circumflex"),
            (0x00CF, "I diaeresis"),
            (0x00D0, "ETH"),
            (0x00D1, "N tilde"),
            (0x00D2, "O grave"),
            (0x00D3, "O acute"),
            (0x00D4, "O circumflex"),
            (0x00D5, "O tilde"),
            (0x00D6, "O diaeresis"),
            (0x00D7, "Multiplication"),
            (0x00D8, "O stroke"),
            (0x00D9, "U grave"),
            (0x00DA, "U acute"),
            (0x00DB, "U circumflex"),
            (0x00DC, "U diaeresis"),
            (0x00DD, "Y acute"),
            (0x00DE, "THORN"),
            (0x00DF, "sharp S"),
            (0x00E0, "a grave"),
            (0x00E1, "a acute"),
            (0x00E2, "a circumflex"),
            (0x00E3, "a tilde"),
            (0x00E4, "a diaeresis"),
            (0x00E5, "a ring above"),
            (0x00E6, "ae"),
            (0x00E7, "c cedilla"),
            (0x00E8, "e grave"),
            (0x00E9, "e acute"),
            (0x00EA, "e circumflex"),
            (0x00EB, "e diaeresis"),
            (0x00EC, "i grave"),
            (0x00ED, "i acute"),
            (0x00EE, "i circumflex"),
            (0x00EF, "i diaeresis"),
            (0x00F0, "eth"),
            (0x00F1, "n tilde"),
            (0x00F2, "o grave"),
            (0x00F3, "o acute"),
            (0x00F4, "o circumflex"),
            (0x00F5, "o tilde"),
            (0x00F6, "o diaeresis"),
            (0x00F7, "Division"),
            (0x00F8, "o stroke"),
            (0x00F9, "u grave"),
            (0x00FA, "u acute"),
            (0x00FB, "u circumflex"),
            (0x00FC, "u diaeresis"),
            (0x00FD, "y acute"),
            (0x00FE, "thorn"),
            (0x00FF, "y diaeresis"),
            (0x0100, "A macron"),
            (0x0101, "a macron"),
            (0x0102, "A breve"),
            (0x0103, "a breve"),
            (0x0104, "A ogonek"),
            (0x0105, "a ogonek"),
            (0x0106, "C acute"),
            (0x0107, "c acute"),
            (0x0108, "C circumflex"),
            (0x0109, "c circumflex"),
            (0x010A, "C dot above"),
            (0x010B, "c dot above"),
            (0x010C, "C caron"),
            (0x010D, "c caron"),
            (0x010E, "D caron"),
            (0x010F, "d caron"),
            (0x0110, "D stroke"),
            (0x0111, "d stroke"),
            (0x0112, "E macron"),
            (0x0113, "e macron"),
            (0x0116, "E dot above"),
            (0x0117, "e dot above"),
            (0x0118, "E ogonek"),
            (0x0119, "e ogonek"),
            (0x011A, "E caron"),
            (0x011B, "e caron"),
            (0x011C, "G circumflex"),
            (0x011D, "g circumflex"),
            (0x011E, "G breve"),
            (0x011F, "g breve"),
            (0x0120, "G dot above"),
            (0x0121, "g dot above"),
            (0x0122, "G cedilla"),
            (0x0123, "g cedilla"),
            (0x0124, "H circumflex"),
            (0x0125, "h circumflex"),
            (0x0126, "H stroke"),
            (0x0127, "h stroke"),
            (0x0128, "I tilde"),
            (0x0129, "i tilde"),
            (0x012A, "I macron"),
            (0x012B, "i macron"),
            (0x012E, "I ogonek"),
            (0x012F, "i ogonek"),
            (0x0130, "I dot above"),
            (0x0131, "Dotless I"),
            (0x0134, "J circumflex"),
            (0x0135, "j circumflex"),
            (0x0136, "K cedilla"),
            (0x0137, "k cedilla"),
            (0x0138, "kra"),
            (0x0139, "L acute"),
            (0x013A, "l acute"),
            (0x013B, "L cedilla"),
            (0x013C, "l cedilla"),
            (0x013D, "L caron"),
            (0x013E, "l caron"),
            (0x0141, "L stroke"),
            (0x0142, "l stroke"),
            (0x0143, "N acute"),
            (0x0144, "n acute"),
            (0x0145, "N cedilla"),
            (0x0146, "n cedilla"),
            (0x0147, "N caron"),
            (0x0148, "n caron"),
            (0x014A, "ENG"),
            (0x014B, "eng"),
            (0x014C, "O macron"),
            (0x014D, "o macron"),
            (0x0150, "O double acute"),
            (0x0151, "o double acute"),
            (0x0152, "OE"),
            (0x0153, "oe"),
            (0x0154, "R acute"),
            (0x0155, "r acute"),
            (0x0156, "R cedilla"),
            (0x0157, "r cedilla"),
            (0x0158, "R caron"),
            (0x0159, "r caron"),
            (0x015A, "S acute"),
            (0x015B, "s acute"),
            (0x015C, "S circumflex"),
            (0x015D, "s circumflex"),
            (0x015E, "S cedilla"),
            (0x015F, "s cedilla"),
            (0x0160, "S caron"),
            (0x0161, "s caron"),
            (0x0162, "T cedilla"),
            (0x0163, "t cedilla"),
            (0x0164, "T caron"),
            (0x0165, "t caron"),
            (0x0166, "T stroke"),
            (0x0167, "t stroke"),
            (0x0168, "U tilde"),
            (0x0169, "u tilde"),
            (0x016A, "U macron"),
            (0x016B, "u macron"),
            (0x016C, "U breve"),
            (0x016D, "u breve"),
            (0x016E, "U ring above"),
            (0x016F, "u ring above"),
            (0x0170, "U double acute"),
            (0x0171, "u double acute"),
            (0x0172, "U ogonek"),
            (0x0173, "u ogonek"),
            (0x0174, "W circumflex"),
            (0x0175, "w circumflex"),
            (0x0176, "Y circumflex"),
            (0x0177, "y circumflex"),
            (0x0178, "Y diaeresis"),
            (0x0179, "Z acute"),
            (0x017A, "z acute"),
            (0x017B, "Z dot above"),
            (0x017C, "z dot above"),
            (0x017D, "Z caron"),
            (0x017E, "z caron"),
            (0x0192, "f HOOK"),
            (0x0218, "S comma below"),
            (0x0219, "s comma below"),
            (0x021A, "T comma below"),
            (0x021B, "t comma below"),
            (0x02C6, "Circumflex"),
            (0x02C7, "Caron"),
            (0x02D8, "Breve"),
            (0x02D9, "Dot above"),
            (0x02DB, "Ogonek"),
            (0x02DC, "Small tilde"),
            (0x02DD, "Double acute"),
        ])
    })
}
