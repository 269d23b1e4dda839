/// デコンパイルドライバ
///
/// ルートヘッダのポインタフィールドを宣言順に辿り、各テーブルを
/// ウォーカー/フォーマッタでデコードしてC宣言として出力し、
/// 発見した範囲をエクステントに記録する。最後にルート構造体自身と
/// エントリポイント関数を出力する。nullフィールドはNULLとして
/// 明示する（エラーにも黙殺にもしない）。

use tracing::debug;

use crate::reverse::error::Result;
use crate::reverse::extent::{dump_hex, Extent, ExtentList};
use crate::reverse::format::ValueFormatter;
use crate::reverse::grid::Grid;
use crate::reverse::image::MemoryImage;
use crate::reverse::layout::{
    vsc_lpwstr_stride, DeadKey, KbdTables, Ligature, Modifiers, VkToBit, VkToWchars, VscString,
    VscVk, WcharTableDesc, DEADKEY_STRIDE, ENTRY_POINT, VK_TO_BIT_STRIDE, VSC_VK_STRIDE,
};
use crate::reverse::symbols::{
    dead_key_flag_symbols, shift_invalid_symbols, shift_state_symbols, vk_attr_symbols,
    vk_flag_symbols, vk_symbols, MODIFIER_COMMENTS, MODIFIER_HEADERS,
};
use crate::reverse::walker::{walk_descriptors, walk_run};

/// 生成オプション
#[derive(Debug, Clone)]
pub struct GenOptions {
    /// ヘッダコメント行
    pub comment: String,
    /// 「generated from」に載せる入力名
    pub input_name: String,
    /// 全値を素の数値で出す劣化モード
    pub num_only: bool,
    /// 末尾に16進ダンプを付ける
    pub hex_dump: bool,
    /// キーボード種別の明示指定（0=自動）
    pub kbd_type: u32,
    /// ダンプ余白のページサイズ
    pub page_size: u64,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            comment: "kbdrev".to_string(),
            input_name: String::new(),
            num_only: false,
            hex_dump: false,
            kbd_type: 0,
            page_size: 4096,
        }
    }
}

/// Cソース生成器。1パスで使い切り。
pub struct SourceGenerator<'a> {
    image: &'a MemoryImage,
    opts: GenOptions,
    fmt: ValueFormatter,
    extents: ExtentList,
    out: String,
    dashed: String,
}

impl<'a> SourceGenerator<'a> {
    pub fn new(image: &'a MemoryImage, opts: GenOptions) -> Self {
        let fmt = ValueFormatter::new(opts.num_only);
        Self {
            image,
            opts,
            fmt,
            extents: ExtentList::new(),
            out: String::new(),
            dashed: "-".repeat(75),
        }
    }

    /// ルートポインタからCソース全文を生成する
    pub fn generate(mut self, root: u64) -> Result<String> {
        let tables = KbdTables::read(self.image, root)?;
        debug!(root, "decompiling keyboard layout tables");

        let kbd_type = tables.plausible_type(self.opts.kbd_type);
        self.out.push_str(&format!("//{}\n", self.dashed));
        self.out.push_str(&format!("// {}\n", self.opts.comment));
        self.out
            .push_str(&format!("// Automatically generated from {}\n", self.opts.input_name));
        self.out.push_str(&format!("//{}\n\n", self.dashed));
        self.out.push_str(&format!("#define KBD_TYPE {}\n\n", kbd_type));
        self.out.push_str("#include <windows.h>\n#include <kbd.h>\n#include <dontuse.h>\n\n");

        let char_modifiers_name = "char_modifiers";
        let mut modifiers = None;
        if tables.char_modifiers != 0 {
            let mods = Modifiers::read(self.image, tables.char_modifiers)?;
            self.gen_char_modifiers(&mods, char_modifiers_name)?;
            modifiers = Some(mods);
        }

        let vk_to_wchar_name = "vk_to_wchar";
        if tables.vk_to_wchar_table != 0 {
            self.gen_vk_to_wchar(tables.vk_to_wchar_table, vk_to_wchar_name, modifiers.as_ref())?;
        }

        let dead_keys_name = "dead_keys";
        if tables.dead_key != 0 {
            self.gen_dead_keys(tables.dead_key, dead_keys_name)?;
        }

        let key_names_name = "key_names";
        if tables.key_names != 0 {
            self.gen_vsc_to_string(tables.key_names, key_names_name, "pKeyNames", "")?;
        }

        let key_names_ext_name = "key_names_ext";
        if tables.key_names_ext != 0 {
            self.gen_vsc_to_string(
                tables.key_names_ext,
                key_names_ext_name,
                "pKeyNamesExt",
                " (extended keypad)",
            )?;
        }

        let key_names_dead_name = "key_names_dead";
        if tables.key_names_dead != 0 {
            self.gen_key_names_dead(tables.key_names_dead, key_names_dead_name)?;
        }

        let scancode_to_vk_name = "scancode_to_vk";
        if tables.vsc_to_vk != 0 {
            self.gen_scan_to_vk(tables.vsc_to_vk, tables.max_vsc_to_vk as usize, scancode_to_vk_name)?;
        }

        let scancode_to_vk_e0_name = "scancode_to_vk_e0";
        if tables.vsc_to_vk_e0 != 0 {
            self.gen_vsc_to_vk(
                tables.vsc_to_vk_e0,
                scancode_to_vk_e0_name,
                "pVSCtoVK_E0",
                " (scancodes with E0 prefix)",
            )?;
        }

        let scancode_to_vk_e1_name = "scancode_to_vk_e1";
        if tables.vsc_to_vk_e1 != 0 {
            self.gen_vsc_to_vk(
                tables.vsc_to_vk_e1,
                scancode_to_vk_e1_name,
                "pVSCtoVK_E1",
                " (scancodes with E1 prefix)",
            )?;
        }

        let ligatures_name = "ligatures";
        if tables.ligatures != 0 {
            self.gen_ligatures(
                tables.ligatures,
                tables.lg_max as usize,
                tables.lg_entry_size as usize,
                ligatures_name,
            )?;
        }

        // ルート構造体
        let kbd_table_name = "kbd_tables";
        self.extents.push(Extent::new(kbd_table_name, tables.addr, tables.byte_len));
        self.section("Main keyboard layout structure, point to all tables");
        self.out.push_str(&format!("static KBDTABLES {} = {{\n", kbd_table_name));
        self.push_root_field(
            ".pCharModifiers  =",
            self.fmt.pointer(tables.char_modifiers, &format!("&{}", char_modifiers_name)),
        );
        self.push_root_field(
            ".pVkToWcharTable =",
            self.fmt.pointer(tables.vk_to_wchar_table, vk_to_wchar_name),
        );
        self.push_root_field(".pDeadKey        =", self.fmt.pointer(tables.dead_key, dead_keys_name));
        self.push_root_field(".pKeyNames       =", self.fmt.pointer(tables.key_names, key_names_name));
        self.push_root_field(
            ".pKeyNamesExt    =",
            self.fmt.pointer(tables.key_names_ext, key_names_ext_name),
        );
        self.push_root_field(
            ".pKeyNamesDead   =",
            self.fmt.pointer(tables.key_names_dead, key_names_dead_name),
        );
        self.push_root_field(".pusVSCtoVK      =", self.fmt.pointer(tables.vsc_to_vk, scancode_to_vk_name));
        let max_vsc = if tables.vsc_to_vk == 0 {
            "0".to_string()
        } else {
            format!("ARRAYSIZE({})", scancode_to_vk_name)
        };
        self.push_root_field(".bMaxVSCtoVK     =", max_vsc);
        self.push_root_field(
            ".pVSCtoVK_E0     =",
            self.fmt.pointer(tables.vsc_to_vk_e0, scancode_to_vk_e0_name),
        );
        self.push_root_field(
            ".pVSCtoVK_E1     =",
            self.fmt.pointer(tables.vsc_to_vk_e1, scancode_to_vk_e1_name),
        );
        self.push_root_field(".fLocaleFlags    =", self.fmt.locale_flags(tables.locale_flags));
        self.push_root_field(".nLgMax          =", format!("{}", tables.lg_max));
        let lg_entry = if tables.ligatures == 0 {
            "0".to_string()
        } else {
            format!("sizeof({}[0])", ligatures_name)
        };
        self.push_root_field(".cbLgEntry       =", lg_entry);
        self.push_root_field(
            ".pLigature       =",
            self.fmt.pointer(tables.ligatures, &format!("(PLIGATURE1){}", ligatures_name)),
        );
        self.push_root_field(".dwType          =", format!("{}", tables.kbd_type));
        self.push_root_field(".dwSubType       =", format!("{}", tables.kbd_subtype));
        self.out.push_str("};\n\n");

        self.section("Keyboard layout entry point");
        self.out.push_str(&format!(
            "__declspec(dllexport) PKBDTABLES {}(void)\n{{\n    return &{};\n}}\n",
            ENTRY_POINT, kbd_table_name
        ));

        if self.opts.hex_dump {
            self.gen_hex_dump();
        }

        Ok(self.out)
    }

    fn section(&mut self, title: &str) {
        self.out.push_str(&format!("//{}\n// {}\n//{}\n\n", self.dashed, title, self.dashed));
    }

    fn push_root_field(&mut self, label: &str, value: String) {
        self.out.push_str(&format!("    {} {},\n", label, value));
    }

    fn gen_vk_to_bits(&mut self, addr: u64, name: &str) -> Result<()> {
        let field = "pVkToBit";
        let walk = walk_run(self.image, name, field, addr, VK_TO_BIT_STRIDE, |img, a| {
            let r = VkToBit::read(img, a, field)?;
            Ok((r.vk != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), "vk to modifier bits");

        let mut grid = Grid::new();
        for r in &walk.records {
            grid.add_line(vec![
                format!("{{{},", self.fmt.symbol(vk_symbols(), r.vk as u64, 2)),
                format!("{}}},", self.fmt.bit_mask(shift_state_symbols(), r.mod_bits as u64, 4)),
            ]);
        }
        grid.add_line(vec!["{0,".to_string(), "0}".to_string()]);
        self.extents.push(walk.span);

        self.section("Associate a virtual key with a modifier bitmask");
        self.out.push_str(&format!("static VK_TO_BIT {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_char_modifiers(&mut self, mods: &Modifiers, name: &str) -> Result<()> {
        let vk_to_bits_name = "vk_to_bits";
        if mods.vk_to_bit != 0 {
            self.gen_vk_to_bits(mods.vk_to_bit, vk_to_bits_name)?;
        }

        let mut grid = Grid::new();
        for (i, &n) in mods.mod_numbers.iter().enumerate() {
            grid.add_line(vec![format!("{},", self.fmt.symbol(shift_invalid_symbols(), n as u64, 0))]);
            if !self.fmt.num_only() && i < MODIFIER_COMMENTS.len() {
                grid.add_column(format!("// {}", MODIFIER_COMMENTS[i]));
            }
        }
        self.extents.push(Extent::new(name, mods.addr, mods.byte_len));

        self.section("Map character modifier bits to modification number");
        self.out.push_str(&format!("static MODIFIERS {} = {{\n", name));
        self.out.push_str(&format!(
            "    .pVkToBit    = {},\n",
            if mods.vk_to_bit != 0 { vk_to_bits_name } else { "NULL" }
        ));
        self.out.push_str(&format!("    .wMaxModBits = {},\n", mods.max_mod_bits));
        self.out.push_str("    .ModNumber   = {\n");
        grid.set_margin(8);
        grid.print(&mut self.out);
        self.out.push_str("    }\n};\n\n");
        Ok(())
    }

    fn gen_sub_vk_to_wchar(
        &mut self,
        desc: &WcharTableDesc,
        name: &str,
        mods: Option<&Modifiers>,
    ) -> Result<()> {
        let field = "pVkToWcharTable";

        // 各列のシフト状態見出し（ModNumber経由で列位置へ写像）
        let mut header: Vec<String> = vec!["//".to_string(), String::new()];
        header.resize(2 + desc.slots, String::new());
        let mut has_header = false;
        if let Some(m) = mods {
            for (i, &modnum) in m.mod_numbers.iter().enumerate() {
                if i >= MODIFIER_HEADERS.len() {
                    break;
                }
                let column = 2 + modnum as usize;
                if column < header.len() {
                    header[column] = MODIFIER_HEADERS[i].to_string();
                    has_header = has_header || !MODIFIER_HEADERS[i].is_empty();
                }
            }
        }

        let mut grid = Grid::new();
        if has_header && !self.fmt.num_only() {
            grid.add_line(header);
            grid.add_underlines(vec!["//".to_string()]);
        }

        let slots = desc.slots;
        let walk = walk_run(self.image, name, field, desc.table, desc.stride, |img, a| {
            let r = VkToWchars::read(img, a, slots, field)?;
            Ok((r.vk != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), slots, stride = desc.stride, "vk to wchar");

        for r in &walk.records {
            grid.add_line(vec![
                format!("{{{},", self.fmt.symbol(vk_symbols(), r.vk as u64, 2)),
                format!("{},", self.fmt.bit_mask(vk_attr_symbols(), r.attributes as u64, 2)),
            ]);
            let mut comments = Vec::new();
            for (i, &c) in r.chars.iter().enumerate() {
                let (mut text, desc_text) = self.fmt.wchar(c);
                if let Some(d) = desc_text {
                    comments.push(d);
                }
                if i == 0 {
                    text.insert(0, '{');
                }
                if i == r.chars.len() - 1 {
                    text.push_str("}},");
                } else {
                    text.push(',');
                }
                grid.add_column(text);
            }
            if !comments.is_empty() {
                grid.add_column(format!("// {}", comments.join(", ")));
            }
        }

        let mut sentinel = vec!["{0,".to_string()];
        sentinel.resize(1 + desc.slots, "0,".to_string());
        sentinel.push("0}".to_string());
        grid.add_line(sentinel);
        self.extents.push(walk.span);

        self.section(&format!("Virtual Key to WCHAR translations for {} shift states", desc.slots));
        self.out.push_str(&format!("static VK_TO_WCHARS{} {}[] = {{\n", desc.slots, name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_vk_to_wchar(&mut self, addr: u64, name: &str, mods: Option<&Modifiers>) -> Result<()> {
        let walk = walk_descriptors(self.image, name, "pVkToWcharTable", addr)?;

        let mut grid = Grid::new();
        for desc in &walk.records {
            let sub_name = format!("vk_to_wchar{}", desc.slots);
            self.gen_sub_vk_to_wchar(desc, &sub_name, mods)?;
            grid.add_line(vec![
                format!("{{(PVK_TO_WCHARS1){},", sub_name),
                format!("{},", desc.slots),
                format!("sizeof({}[0])}},", sub_name),
            ]);
        }
        grid.add_line(vec!["{NULL,".to_string(), "0,".to_string(), "0}".to_string()]);
        self.extents.push(walk.span);

        self.section("Virtual Key to WCHAR translations with shift states");
        self.out.push_str(&format!("static VK_TO_WCHAR_TABLE {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_ligatures(&mut self, addr: u64, slots: usize, stride: usize, name: &str) -> Result<()> {
        let field = "pLigature";
        let walk = walk_run(self.image, name, field, addr, stride, |img, a| {
            let r = Ligature::read(img, a, slots, field)?;
            Ok((r.vk != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), "ligatures");

        let mut grid = Grid::new();
        for r in &walk.records {
            grid.add_line(vec![
                format!("{{{},", self.fmt.symbol(vk_symbols(), r.vk as u64, 2)),
                format!("{},", r.mod_number),
            ]);
            let mut comments = Vec::new();
            for (i, &c) in r.chars.iter().enumerate() {
                let (mut text, desc_text) = self.fmt.wchar(c);
                if let Some(d) = desc_text {
                    comments.push(d);
                }
                if i == 0 {
                    text.insert(0, '{');
                }
                if i == r.chars.len() - 1 {
                    text.push_str("}},");
                } else {
                    text.push(',');
                }
                grid.add_column(text);
            }
            if !comments.is_empty() {
                grid.add_column(format!("// {}", comments.join(", ")));
            }
        }
        let mut sentinel = vec!["{0,".to_string()];
        sentinel.resize(slots.max(1), "0,".to_string());
        sentinel.push("0}".to_string());
        grid.add_line(sentinel);
        self.extents.push(walk.span);

        self.section("Ligatures to WCHAR translations");
        self.out.push_str(&format!("static LIGATURE{} {}[] = {{\n", slots, name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_dead_keys(&mut self, addr: u64, name: &str) -> Result<()> {
        let field = "pDeadKey";
        let walk = walk_run(self.image, name, field, addr, DEADKEY_STRIDE, |img, a| {
            let r = DeadKey::read(img, a, field)?;
            Ok((r.both != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), "dead keys");

        let mut grid = Grid::new();
        for r in &walk.records {
            let mut comments = Vec::new();
            let cell = |value: u16, comments: &mut Vec<String>| {
                let (text, desc_text) = self.fmt.wchar(value);
                if let Some(d) = desc_text {
                    comments.push(d);
                }
                text
            };
            grid.add_line(vec![
                format!("DEADTRANS({},", cell(r.character(), &mut comments)),
                format!("{},", cell(r.dead_char(), &mut comments)),
                format!("{},", cell(r.composed, &mut comments)),
                format!("{}),", self.fmt.bit_mask(dead_key_flag_symbols(), r.flags as u64, 4)),
            ]);
            if !comments.is_empty() {
                grid.add_column(format!("// {}", comments.join(", ")));
            }
        }
        self.extents.push(walk.span);

        self.section("Dead keys sequences translations");
        self.out.push_str(&format!("static DEADKEY {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("    {0, 0, 0}\n};\n\n");
        Ok(())
    }

    fn gen_vsc_to_string(&mut self, addr: u64, name: &str, field: &'static str, comment: &str) -> Result<()> {
        let stride = vsc_lpwstr_stride(self.image.ptr_width());
        let walk = walk_run(self.image, name, field, addr, stride, |img, a| {
            let r = VscString::read(img, a, field)?;
            Ok((r.vsc != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), "scan code key names");

        let mut grid = Grid::new();
        for r in &walk.records {
            let text = if r.text_ptr != 0 {
                Some(self.image.read_wide_string(r.text_ptr, field)?)
            } else {
                None
            };
            grid.add_line(vec![
                format!("{{0x{:02X},", r.vsc),
                format!("{}}},", self.fmt.wstring(text.as_deref())),
            ]);
            if let Some(t) = &text {
                // 指された文字列自身の範囲（NUL終端込み）も記録する
                self.extents
                    .push(Extent::new(format!("Strings in {}", name), r.text_ptr, (t.len() as u64 + 1) * 2));
            }
        }
        grid.add_line(vec!["{0x00,".to_string(), "NULL}".to_string()]);
        self.extents.push(walk.span);

        self.section(&format!("Scan codes to key names{}", comment));
        self.out.push_str(&format!("static VSC_LPWSTR {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_key_names_dead(&mut self, addr: u64, name: &str) -> Result<()> {
        let field = "pKeyNamesDead";
        let stride = self.image.ptr_width();
        let walk = walk_run(self.image, name, field, addr, stride, |img, a| {
            let p = img.read_ptr(a, field)?;
            Ok((p != 0).then_some(p))
        })?;
        debug!(name, records = walk.records.len(), "dead key names");

        let mut grid = Grid::new();
        for &p in &walk.records {
            let text = self.image.read_wide_string(p, field)?;
            if let Some((&dead_char, label)) = text.split_first() {
                // 先頭文字がデッドキー、残りが表示名
                grid.add_line(vec![
                    self.fmt.wstring(Some(&[dead_char])),
                    format!("{},", self.fmt.wstring(Some(label))),
                ]);
                self.extents
                    .push(Extent::new(format!("Strings in {}", name), p, (text.len() as u64 + 1) * 2));
            }
        }
        self.extents.push(walk.span);

        self.section("Names of dead keys");
        self.out.push_str(&format!("static DEADKEY_LPWSTR {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("    NULL\n};\n\n");
        Ok(())
    }

    fn gen_scan_to_vk(&mut self, addr: u64, count: usize, name: &str) -> Result<()> {
        let field = "pusVSCtoVK";
        self.extents.push(Extent::new(name, addr, count as u64 * 2));
        debug!(name, count, "scan code to vk");

        self.section("Scan code to virtual key conversion table");
        self.out.push_str(&format!("static USHORT {}[] = {{\n", name));
        for i in 0..count {
            let v = self.image.read_u16(addr + 2 * i as u64, field)?;
            self.out.push_str(&format!(
                "    /* {:02X} */ {},\n",
                i,
                self.fmt.attributes(vk_symbols(), vk_flag_symbols(), v as u64, 4)
            ));
        }
        self.out.push_str("};\n\n");
        Ok(())
    }

    fn gen_vsc_to_vk(&mut self, addr: u64, name: &str, field: &'static str, comment: &str) -> Result<()> {
        let walk = walk_run(self.image, name, field, addr, VSC_VK_STRIDE, |img, a| {
            let r = VscVk::read(img, a, field)?;
            Ok((r.vsc != 0).then_some(r))
        })?;
        debug!(name, records = walk.records.len(), "prefixed scan code to vk");

        let mut grid = Grid::new();
        for r in &walk.records {
            grid.add_line(vec![
                format!("{{0x{:02X},", r.vsc),
                format!("{}}},", self.fmt.attributes(vk_symbols(), vk_flag_symbols(), r.vk as u64, 4)),
            ]);
        }
        grid.add_line(vec!["{0x00,".to_string(), "0x0000}".to_string()]);
        self.extents.push(walk.span);

        self.section(&format!("Scan code to virtual key conversion table{}", comment));
        self.out.push_str(&format!("static VSC_VK {}[] = {{\n", name));
        grid.set_margin(4);
        grid.print(&mut self.out);
        self.out.push_str("};\n\n");
        Ok(())
    }

    /// 照合済みエクステント一覧の注釈付き16進ダンプ。
    /// 先頭と末尾はページ境界まで広げる。
    fn gen_hex_dump(&mut self) {
        self.extents.reconcile(self.image);
        if self.extents.is_empty() {
            return;
        }
        let page = self.opts.page_size.max(1);
        let first = self.extents.items().first().map(|e| e.start).unwrap_or(0);
        let last = self.extents.items().last().map(|e| e.end()).unwrap_or(0);
        let first_page = first - first % page;
        let last_page = last + (page - last % page) % page;

        self.out.push('\n');
        self.out.push_str(&format!("//{}\n// Data structures dump\n//{}\n//\n", self.dashed, self.dashed));
        self.out.push_str(&format!(
            "// Total size: {} bytes ({} pages)\n",
            last_page - first_page,
            (last_page - first_page) / page
        ));
        self.out.push_str(&format!("// Base: 0x{:08X}\n", first_page));
        self.out.push_str(&format!("// End:  0x{:08X}\n", last_page));

        if first_page < first {
            let margin = Extent::new(
                "Start of memory page before first data structure",
                first_page,
                first - first_page,
            );
            dump_hex(&mut self.out, self.image, &margin);
        }
        for e in self.extents.items() {
            dump_hex(&mut self.out, self.image, e);
        }
        if last < last_page {
            let margin = Extent::new("End of memory page after last data structure", last, last_page - last);
            dump_hex(&mut self.out, self.image, &margin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// テスト用の合成レイアウトイメージ組み立て
    struct ImageBuilder {
        base: u64,
        bytes: Vec<u8>,
    }

    impl ImageBuilder {
        fn new(base: u64, size: usize) -> Self {
            Self { base, bytes: vec![0; size] }
        }

        fn put(&mut self, off: usize, data: &[u8]) {
            self.bytes[off..off + data.len()].copy_from_slice(data);
        }

        fn u8(&mut self, off: usize, v: u8) {
            self.bytes[off] = v;
        }

        fn u16(&mut self, off: usize, v: u16) {
            self.put(off, &v.to_le_bytes());
        }

        fn u32(&mut self, off: usize, v: u32) {
            self.put(off, &v.to_le_bytes());
        }

        fn ptr(&mut self, off: usize, target_off: u64) {
            let v = if target_off == 0 { 0 } else { self.base + target_off };
            self.put(off, &v.to_le_bytes());
        }

        fn wstr(&mut self, off: usize, s: &str) {
            let mut at = off;
            for c in s.encode_utf16() {
                self.u16(at, c);
                at += 2;
            }
            self.u16(at, 0);
        }

        fn build(self) -> MemoryImage {
            MemoryImage::from_parts(self.base, self.bytes, 8)
        }
    }

    /// 全テーブル入りの64bit合成レイアウト
    fn sample_image() -> (MemoryImage, u64) {
        let base = 0x10000u64;
        let mut b = ImageBuilder::new(base, 0x180);

        // KBDTABLES @0x000
        b.ptr(0x00, 0x080); // pCharModifiers
        b.ptr(0x08, 0x0C0); // pVkToWcharTable
        b.ptr(0x10, 0x0E0); // pDeadKey
        b.ptr(0x18, 0x0F0); // pKeyNames
        b.ptr(0x20, 0); // pKeyNamesExt
        b.ptr(0x28, 0x120); // pKeyNamesDead
        b.ptr(0x30, 0x140); // pusVSCtoVK
        b.u8(0x38, 4); // bMaxVSCtoVK
        b.ptr(0x40, 0x150); // pVSCtoVK_E0
        b.ptr(0x48, 0x160); // pVSCtoVK_E1
        b.u32(0x50, 0x0001_0001); // fLocaleFlags: KLLF_ALTGR + version 1
        b.u8(0x54, 2); // nLgMax
        b.u8(0x55, 6); // cbLgEntry
        b.ptr(0x58, 0x170); // pLigature
        b.u32(0x60, 4); // dwType
        b.u32(0x64, 0); // dwSubType

        // VK_TO_BIT @0x070
        b.put(0x070, &[0x10, 0x01, 0x11, 0x02, 0x12, 0x04, 0, 0]);

        // MODIFIERS @0x080
        b.ptr(0x080, 0x070);
        b.u16(0x088, 7);
        b.put(0x08A, &[0, 1, 2, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F]);

        // VK_TO_WCHARS2 @0x0A0（ストライド8）
        b.u8(0x0A0, 0x41); // 'A'
        b.u8(0x0A1, 0x01); // CAPLOK
        b.u16(0x0A2, 'a' as u16);
        b.u16(0x0A4, 'A' as u16);
        b.u8(0x0A8, 0x30); // '0'
        b.u16(0x0AA, '0' as u16);
        b.u16(0x0AC, ')' as u16);
        // 番兵 @0x0B0 はゼロのまま

        // VK_TO_WCHAR_TABLE @0x0C0
        b.ptr(0x0C0, 0x0A0);
        b.u8(0x0C8, 2); // nModifications
        b.u8(0x0C9, 8); // cbSize

        // DEADKEY @0x0E0: 'a' + U+0301 → U+00E1
        b.u32(0x0E0, 0x0301_0061);
        b.u16(0x0E4, 0x00E1);
        b.u16(0x0E6, 0x0001); // DKF_DEAD

        // VSC_LPWSTR @0x0F0
        b.u8(0x0F0, 0x01);
        b.ptr(0x0F8, 0x110);
        b.wstr(0x110, "Esc");

        // DEADKEY_LPWSTR @0x120
        b.ptr(0x120, 0x130);
        b.u16(0x130, 0x0301);
        b.wstr(0x132, "ACUTE");

        // USHORT scancode→VK @0x140
        b.u16(0x140, 0x00FF); // VK__none_
        b.u16(0x142, 0x001B); // VK_ESCAPE
        b.u16(0x144, 0x0031); // '1'
        b.u16(0x146, 0x01A1); // VK_RSHIFT | KBDEXT

        // VSC_VK E0 @0x150, E1 @0x160
        b.u8(0x150, 0x1D);
        b.u16(0x152, 0x01A3); // VK_RCONTROL | KBDEXT
        b.u8(0x160, 0x1D);
        b.u16(0x162, 0x0013); // VK_PAUSE

        // LIGATURE2 @0x170（ストライド6）
        b.u8(0x170, 0x42); // 'B'
        b.u16(0x172, 'z' as u16);
        b.u16(0x174, 'w' as u16);

        (b.build(), base)
    }

    fn generate(opts: GenOptions) -> String {
        let (image, root) = sample_image();
        SourceGenerator::new(&image, opts).generate(root).unwrap()
    }

    #[test]
    fn test_symbolic_generation() {
        let src = generate(GenOptions::default());
        println!("{}", src);

        assert!(src.contains("#define KBD_TYPE 4"));
        assert!(src.contains("static VK_TO_BIT vk_to_bits[] = {"));
        assert!(src.contains("{VK_SHIFT,"));
        assert!(src.contains("KBDSHIFT},"));
        assert!(src.contains("static MODIFIERS char_modifiers = {"));
        assert!(src.contains(".pVkToBit    = vk_to_bits,"));
        assert!(src.contains(".wMaxModBits = 7,"));
        assert!(src.contains("// 000 = <none>"));
        assert!(src.contains("static VK_TO_WCHARS2 vk_to_wchar2[] = {"));
        assert!(src.contains("Shift"));
        assert!(src.contains("CAPLOK,"));
        assert!(src.contains("{L'a',"));
        assert!(src.contains("static VK_TO_WCHAR_TABLE vk_to_wchar[] = {"));
        assert!(src.contains("{(PVK_TO_WCHARS1)vk_to_wchar2,"));
        assert!(src.contains("sizeof(vk_to_wchar2[0])},"));
        assert!(src.contains("DEADTRANS(L'a',"));
        assert!(src.contains("DKF_DEAD),"));
        assert!(src.contains("L\"Esc\"},"));
        assert!(src.contains("static DEADKEY_LPWSTR key_names_dead[] = {"));
        assert!(src.contains("L\"\\x0301\""));
        assert!(src.contains("L\"ACUTE\","));
        assert!(src.contains("/* 00 */ VK__none_,"));
        assert!(src.contains("/* 02 */ '1',"));
        assert!(src.contains("/* 03 */ VK_RSHIFT | KBDEXT,"));
        assert!(src.contains("VK_RCONTROL | KBDEXT},"));
        assert!(src.contains("static LIGATURE2 ligatures[] = {"));
        assert!(src.contains("__declspec(dllexport) PKBDTABLES KbdLayerDescriptor(void)"));
        assert!(src.contains("return &kbd_tables;"));
    }

    #[test]
    fn test_null_fields_are_explicit() {
        let src = generate(GenOptions::default());
        // 欠けているテーブルはNULLとして明示され、黙って飛ばされない
        assert!(src.contains(".pKeyNamesExt    = NULL,"));
        assert!(!src.contains("key_names_ext[]"));
    }

    #[test]
    fn test_root_scalars_round_trip() {
        // 合成イメージに植えた値が根構造体リテラルにそのまま現れる
        let src = generate(GenOptions::default());
        assert!(src.contains(".bMaxVSCtoVK     = ARRAYSIZE(scancode_to_vk),"));
        assert!(src.contains(".fLocaleFlags    = MAKELONG(KLLF_ALTGR, KBD_VERSION),"));
        assert!(src.contains(".nLgMax          = 2,"));
        assert!(src.contains(".cbLgEntry       = sizeof(ligatures[0]),"));
        assert!(src.contains(".pLigature       = (PLIGATURE1)ligatures,"));
        assert!(src.contains(".dwType          = 4,"));
        assert!(src.contains(".dwSubType       = 0,"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(GenOptions::default());
        let b = generate(GenOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_num_only_mode() {
        let src = generate(GenOptions { num_only: true, ..GenOptions::default() });
        assert!(!src.contains("VK_SHIFT"));
        assert!(!src.contains("MAKELONG"));
        assert!(src.contains("0x00010001"));
    }

    #[test]
    fn test_kbd_type_override() {
        let src = generate(GenOptions { kbd_type: 7, ..GenOptions::default() });
        assert!(src.contains("#define KBD_TYPE 7"));
        // ルートリテラルには生の値が残る
        assert!(src.contains(".dwType          = 4,"));
    }

    #[test]
    fn test_hex_dump_mode() {
        let src = generate(GenOptions { hex_dump: true, ..GenOptions::default() });
        println!("{}", src);
        assert!(src.contains("// Data structures dump"));
        assert!(src.contains("// Total size: 4096 bytes (1 pages)"));
        // 構造の合間のゼロ領域が分類されている
        assert!(src.contains("// Padding"));
        // ページ余白セクション
        assert!(src.contains("End of memory page after last data structure"));
    }

    #[test]
    fn test_null_root_is_fatal() {
        let (image, _) = sample_image();
        let err = SourceGenerator::new(&image, GenOptions::default()).generate(0).unwrap_err();
        assert!(format!("{}", err).contains("KBDTABLES"));
    }

    #[test]
    fn test_unterminated_table_is_fatal_and_names_field() {
        let (image, root) = sample_image();
        // pDeadKeyを番兵の無い領域（scancode表の途中）に向ける
        let mut bytes = image.slice(image.base(), image.len(), "t").unwrap().to_vec();
        bytes[0x10..0x18].copy_from_slice(&(image.base() + 0x140).to_le_bytes());
        // 0x140以降をすべて非ゼロで埋めて番兵を消す
        for b in bytes[0x140..].iter_mut() {
            *b = 0x11;
        }
        let image = MemoryImage::from_parts(image.base(), bytes, 8);
        let err = SourceGenerator::new(&image, GenOptions::default()).generate(root).unwrap_err();
        assert!(format!("{}", err).contains("pDeadKey"));
    }
}
