/// kbdrev - キーボードレイアウトDLL逆生成ツール
///
/// Usage:
///   kbdrev fr                   （C:\Windows\System32\kbdfr.dll を解析）
///   kbdrev kbdus.dll -o kbdus.c
///   kbdrev de -d -c "my layouts"

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kbdrev::module_loader::{load_layout, resolve_layout_path, system_page_size};
use kbdrev::resource_gen;
use kbdrev::reverse::{GenOptions, SourceGenerator};

#[derive(Parser)]
#[command(name = "kbdrev")]
#[command(about = "Decompile an installed keyboard layout DLL into a C source file", long_about = None)]
struct Cli {
    /// Keyboard layout DLL path, or a bare layout name
    /// (e.g. "fr" for C:\Windows\System32\kbdfr.dll)
    input: String,

    /// Output file name (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Comment string for the generated header
    #[arg(short, long, default_value = "kbdrev")]
    comment: String,

    /// Numerical output only, do not translate values to symbols
    #[arg(short, long)]
    num_only: bool,

    /// Append an annotated hexadecimal dump of the data structures
    #[arg(short = 'd', long)]
    hex_dump: bool,

    /// Generate a resource fragment instead of a C source file
    #[arg(short = 'r', long)]
    resources: bool,

    /// Keyboard type (default: dwType from the kbd table, or 4)
    #[arg(short = 't', long, default_value_t = 0)]
    kbd_type: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        // 致命的エラーは1行で報告して非ゼロ終了
        eprintln!("kbdrev: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let dll_path = resolve_layout_path(&cli.input);
    info!(path = %dll_path.display(), "analyzing keyboard layout");

    let layout = load_layout(&dll_path)?;

    let text = if cli.resources {
        let info = resource_gen::discover(&layout.dll_path)?;
        resource_gen::emit(&info)
    } else {
        let input_name = layout
            .dll_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| cli.input.clone());
        let opts = GenOptions {
            comment: cli.comment.clone(),
            input_name,
            num_only: cli.num_only,
            hex_dump: cli.hex_dump,
            kbd_type: cli.kbd_type,
            page_size: system_page_size(),
        };
        SourceGenerator::new(&layout.image, opts).generate(layout.root)?
    };

    write_output(cli.output.as_deref(), &text)
}

/// ファイルにはBOM付きUTF-16LE、標準出力にはUTF-8で書く
fn write_output(path: Option<&std::path::Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut bytes = vec![0xFF, 0xFE];
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_le_bytes());
            }
            std::fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}
