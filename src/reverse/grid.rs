/// 桁揃えグリッド
///
/// 宣言の各行をセル列として貯め、列幅を揃えて出力する。
/// 列幅は全行の最大セル長。

#[derive(Debug, Default)]
pub struct Grid {
    lines: Vec<Vec<String>>,
    margin: usize,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, cells: Vec<String>) {
        self.lines.push(cells);
    }

    /// 直前の行の末尾にセルを足す
    pub fn add_column(&mut self, cell: impl Into<String>) {
        if let Some(last) = self.lines.last_mut() {
            last.push(cell.into());
        } else {
            self.lines.push(vec![cell.into()]);
        }
    }

    /// 直前の行に対応する下線行を足す。
    /// prefixのセルはそのまま、以降は上のセルと同じ長さのダッシュ。
    pub fn add_underlines(&mut self, prefix: Vec<String>) {
        let Some(last) = self.lines.last() else {
            return;
        };
        let mut row = prefix.clone();
        for cell in last.iter().skip(prefix.len()) {
            if cell.is_empty() {
                row.push(String::new());
            } else {
                row.push("-".repeat(cell.len()));
            }
        }
        self.lines.push(row);
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn print(&self, out: &mut String) {
        let columns = self.lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for line in &self.lines {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }
        for line in &self.lines {
            let mut text = " ".repeat(self.margin);
            for (i, cell) in line.iter().enumerate() {
                if i + 1 < line.len() {
                    text.push_str(&format!("{:<width$} ", cell, width = widths[i]));
                } else {
                    text.push_str(cell);
                }
            }
            while text.ends_with(' ') {
                text.pop();
            }
            out.push_str(&text);
            out.push('\n');
        }
    }
}
