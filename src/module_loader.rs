/// レイアウトDLLローダー
///
/// キーボードレイアウトDLLを自プロセスにロードし、エントリポイント
/// KbdLayerDescriptorを呼んでルートポインタを取得、モジュール全体を
/// スナップショットして読み取り専用イメージにする。
/// スナップショット後はDLLを解放してよい（パスはコピー上で走る）。

use std::path::{Path, PathBuf};

use crate::reverse::MemoryImage;

/// ロード済みレイアウト：イメージとルートポインタ
#[derive(Debug)]
pub struct LoadedLayout {
    pub image: MemoryImage,
    pub root: u64,
    pub dll_path: PathBuf,
}

/// 入力をDLLパスに解決する。
/// パス区切りや拡張子を含まない裸の名前は
/// %SystemRoot%\System32\kbd<name>.dll とみなす。
pub fn resolve_layout_path(input: &str) -> PathBuf {
    let bare = !input.contains(['/', '\\', ':', '.']);
    if bare {
        let system_root = std::env::var("SystemRoot").unwrap_or_else(|_| "C:\\Windows".to_string());
        PathBuf::from(format!("{}\\System32\\kbd{}.dll", system_root, input))
    } else {
        PathBuf::from(input)
    }
}

#[cfg(windows)]
mod imp {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use anyhow::{bail, Context, Result};
    use tracing::{debug, info};
    use windows::core::{PCSTR, PCWSTR};
    use windows::Win32::Foundation::{FreeLibrary, HMODULE};
    use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
    use windows::Win32::System::ProcessStatus::{GetModuleInformation, MODULEINFO};
    use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
    use windows::Win32::System::Threading::GetCurrentProcess;

    use crate::reverse::{layout::ENTRY_POINT, MemoryImage, ReverseError};

    use super::LoadedLayout;

    /// DLLをロードしてスナップショットを取る
    pub fn load_layout(dll_path: &Path) -> Result<LoadedLayout> {
        let wide: Vec<u16> = dll_path.as_os_str().encode_wide().chain(Some(0)).collect();

        let module: HMODULE = unsafe { LoadLibraryW(PCWSTR(wide.as_ptr())) }
            .map_err(|e| ReverseError::resolution(format!("error opening {}: {}", dll_path.display(), e)))?;
        debug!(path = %dll_path.display(), "layout DLL loaded");

        let result = snapshot(module, dll_path);
        unsafe {
            let _ = FreeLibrary(module);
        }
        result
    }

    fn snapshot(module: HMODULE, dll_path: &Path) -> Result<LoadedLayout> {
        // エントリポイントを解決して呼ぶ。プロファイルは引数なしで
        // KBDTABLESへのポインタを返す。
        let entry_name = format!("{}\0", ENTRY_POINT);
        let proc = unsafe { GetProcAddress(module, PCSTR(entry_name.as_ptr())) };
        let Some(proc) = proc else {
            bail!(ReverseError::resolution(format!(
                "cannot find {} in {}",
                ENTRY_POINT,
                dll_path.display()
            )));
        };
        let entry: unsafe extern "system" fn() -> *const c_void =
            unsafe { std::mem::transmute(proc) };
        let root = unsafe { entry() } as u64;
        if root == 0 {
            bail!(ReverseError::resolution(format!(
                "{}() returned null in {}",
                ENTRY_POINT,
                dll_path.display()
            )));
        }

        // モジュール全体をコピーする
        let mut info = MODULEINFO::default();
        unsafe {
            GetModuleInformation(
                GetCurrentProcess(),
                module,
                &mut info,
                std::mem::size_of::<MODULEINFO>() as u32,
            )
        }
        .context("GetModuleInformation failed")?;

        let base = info.lpBaseOfDll as u64;
        let size = info.SizeOfImage as usize;
        let mut bytes = vec![0u8; size];
        unsafe {
            std::ptr::copy_nonoverlapping(info.lpBaseOfDll as *const u8, bytes.as_mut_ptr(), size);
        }
        info!(
            path = %dll_path.display(),
            base = format_args!("0x{:X}", base),
            size,
            "module snapshot taken"
        );

        Ok(LoadedLayout {
            image: MemoryImage::from_parts(base, bytes, std::mem::size_of::<usize>()),
            root,
            dll_path: dll_path.to_path_buf(),
        })
    }

    /// システムのメモリページサイズ
    pub fn system_page_size() -> u64 {
        let mut info = SYSTEM_INFO::default();
        unsafe { GetSystemInfo(&mut info) };
        info.dwPageSize as u64
    }
}

#[cfg(not(windows))]
mod imp {
    use std::path::Path;

    use anyhow::{bail, Result};

    use super::LoadedLayout;

    pub fn load_layout(_dll_path: &Path) -> Result<LoadedLayout> {
        bail!("keyboard layout DLLs can only be loaded on Windows");
    }

    pub fn system_page_size() -> u64 {
        4096
    }
}

pub fn load_layout(dll_path: &Path) -> anyhow::Result<LoadedLayout> {
    imp::load_layout(dll_path)
}

pub fn system_page_size() -> u64 {
    imp::system_page_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_resolves_to_system32() {
        let p = resolve_layout_path("fr");
        let s = p.to_string_lossy();
        assert!(s.ends_with("\\System32\\kbdfr.dll"));
    }

    #[test]
    fn test_paths_pass_through() {
        assert_eq!(resolve_layout_path("kbdus.dll"), PathBuf::from("kbdus.dll"));
        assert_eq!(
            resolve_layout_path("C:\\Windows\\System32\\kbdfr.dll"),
            PathBuf::from("C:\\Windows\\System32\\kbdfr.dll")
        );
        assert_eq!(resolve_layout_path("./local"), PathBuf::from("./local"));
    }
}
