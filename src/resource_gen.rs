/// リソース断片生成（レジストリ参照）
///
/// インストール済みレイアウト一覧（レジストリ）からDLL名に一致する
/// エントリを探し、表示名と4桁16進の地域コードを#define行として出す。
/// 同じDLLが複数登録されている場合は最短の説明を本命とみなし、
/// 残りをコメントで併記する。

use std::path::Path;

use anyhow::Result;

/// 発見したレイアウト情報
#[derive(Debug, Clone)]
pub struct ResourceInfo {
    /// 表示名
    pub text: String,
    /// 4桁16進の基本言語コード
    pub lang: String,
    /// その他の一致エントリ（レイアウトID, 表示名）
    pub alternates: Vec<(String, String)>,
}

/// #define断片の本文を組み立てる
pub fn emit(info: &ResourceInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("#define KBD_LAYOUT_TEXT \"{}\"\n", info.text));
    out.push_str(&format!("#define KBD_LAYOUT_LANG \"{}\"\n", info.lang));
    if info.alternates.len() > 1 {
        out.push_str("\n// Other possible matching entries:\n");
        for (id, text) in &info.alternates {
            out.push_str(&format!("// {}: \"{}\"\n", id, text));
        }
    }
    out
}

#[cfg(windows)]
mod imp {
    use std::path::Path;

    use anyhow::{bail, Context, Result};
    use tracing::debug;
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::System::Registry::{
        RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE,
        KEY_READ, REG_VALUE_TYPE,
    };

    use crate::reverse::ReverseError;

    use super::ResourceInfo;

    const LAYOUT_KEY: &str = "SYSTEM\\CurrentControlSet\\Control\\Keyboard Layouts";
    const VALUE_FILE: &str = "Layout File";
    const VALUE_DISPLAY: &str = "Layout Display Name";
    const VALUE_TEXT: &str = "Layout Text";

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(Some(0)).collect()
    }

    fn open_key(path: &str) -> Result<HKEY> {
        let wide = to_wide(path);
        let mut key = HKEY::default();
        unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, PCWSTR(wide.as_ptr()), 0, KEY_READ, &mut key) }
            .ok()
            .with_context(|| format!("cannot open registry key {}", path))?;
        Ok(key)
    }

    fn sub_keys(key: HKEY) -> Vec<String> {
        let mut names = Vec::new();
        let mut index = 0u32;
        loop {
            let mut buf = [0u16; 256];
            let mut len = buf.len() as u32;
            let status = unsafe {
                RegEnumKeyExW(key, index, PWSTR(buf.as_mut_ptr()), &mut len, None, PWSTR::null(), None, None)
            };
            if status.is_err() {
                break;
            }
            names.push(String::from_utf16_lossy(&buf[..len as usize]));
            index += 1;
        }
        names
    }

    fn string_value(key: HKEY, name: &str) -> Option<String> {
        let wide = to_wide(name);
        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        unsafe {
            RegQueryValueExW(key, PCWSTR(wide.as_ptr()), None, Some(&mut kind), None, Some(&mut size))
        }
        .ok()
        .ok()?;
        let mut buf = vec![0u8; size as usize];
        unsafe {
            RegQueryValueExW(
                key,
                PCWSTR(wide.as_ptr()),
                None,
                Some(&mut kind),
                Some(buf.as_mut_ptr()),
                Some(&mut size),
            )
        }
        .ok()
        .ok()?;
        let chars: Vec<u16> = buf
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&c| c != 0)
            .collect();
        Some(String::from_utf16_lossy(&chars))
    }

    /// レジストリからDLLに対応する表示名と言語コードを探す
    pub fn discover(dll_path: &Path) -> Result<ResourceInfo> {
        let dll_name = dll_path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let root = open_key(LAYOUT_KEY)?;
        let ids = sub_keys(root);
        unsafe {
            let _ = RegCloseKey(root);
        }

        let mut matches: Vec<(String, String)> = Vec::new();
        for id in ids {
            // 基本言語はレイアウトID末尾の4桁16進
            if id.len() < 4 {
                continue;
            }
            let sub = match open_key(&format!("{}\\{}", LAYOUT_KEY, id)) {
                Ok(k) => k,
                Err(_) => continue,
            };
            let file = string_value(sub, VALUE_FILE).unwrap_or_default();
            if file.to_lowercase() == dll_name {
                let text = string_value(sub, VALUE_DISPLAY)
                    .filter(|t| !t.is_empty())
                    .or_else(|| string_value(sub, VALUE_TEXT))
                    .unwrap_or_default();
                matches.push((id.clone(), text));
            }
            unsafe {
                let _ = RegCloseKey(sub);
            }
        }
        debug!(dll = %dll_name, matches = matches.len(), "registry layout entries");

        if matches.is_empty() {
            bail!(ReverseError::resolution(format!(
                "unable to identify the base language for {}",
                dll_path.display()
            )));
        }

        // 複数一致時は最短の説明が基本エントリであることが多い
        let mut best = 0;
        let mut best_len = usize::MAX;
        for (i, (_, text)) in matches.iter().enumerate() {
            if !text.is_empty() && text.len() < best_len {
                best = i;
                best_len = text.len();
            }
        }
        let (id, text) = matches[best].clone();
        Ok(ResourceInfo {
            text,
            lang: id[id.len() - 4..].to_string(),
            alternates: matches,
        })
    }
}

#[cfg(not(windows))]
mod imp {
    use std::path::Path;

    use anyhow::{bail, Result};

    use super::ResourceInfo;

    pub fn discover(_dll_path: &Path) -> Result<ResourceInfo> {
        bail!("resource generation requires the Windows registry");
    }
}

pub fn discover(dll_path: &Path) -> Result<ResourceInfo> {
    imp::discover(dll_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_defines() {
        let info = ResourceInfo {
            text: "French".to_string(),
            lang: "040c".to_string(),
            alternates: vec![],
        };
        let out = emit(&info);
        assert_eq!(
            out,
            "#define KBD_LAYOUT_TEXT \"French\"\n#define KBD_LAYOUT_LANG \"040c\"\n"
        );
    }

    #[test]
    fn test_emit_lists_alternates() {
        let info = ResourceInfo {
            text: "French".to_string(),
            lang: "040c".to_string(),
            alternates: vec![
                ("0000040c".to_string(), "French".to_string()),
                ("0001040c".to_string(), "French (Legacy)".to_string()),
            ],
        };
        let out = emit(&info);
        assert!(out.contains("// Other possible matching entries:"));
        assert!(out.contains("// 0001040c: \"French (Legacy)\""));
    }
}
