use std::cell::Cell;

use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "latmap::print";
const TREE_KEY_WIDTH: usize = 8;

thread_local! {
    static GLOBAL_KEY_WIDTH: Cell<usize> = const { Cell::new(0) }
}

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ LATMAP v{} ⟧", env!("CARGO_PKG_VERSION"));
    let (side, _) = padding(UnicodeWidthStr::width(title.as_str()));
    let sep: ColoredString = "═".repeat(side).bright_black();
    print(&format!("{sep}{}{sep}", title.bright_green().bold()));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let (left, right) = padding(UnicodeWidthStr::width(title.as_str()));
    let rule = |n: usize| "─".repeat(n).bright_black();
    print(&format!("{}{}{}", rule(left), title.bright_green(), rule(right)));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

/// Splits what is left of [`TOTAL_WIDTH`] after `used` columns into left and right fill.
fn padding(used: usize) -> (usize, usize) {
    let fill: usize = TOTAL_WIDTH.saturating_sub(used);
    (fill / 2, fill - fill / 2)
}

/// `key` followed by dot leaders and a colon, `width` columns wide before the colon.
fn dotted_key(key: &str, width: usize, key_color: Color) -> String {
    let dots: String = ".".repeat(width.saturating_sub(UnicodeWidthStr::width(key)));
    format!("{}{}", key.color(key_color), format!("{dots}:").color(colors::SEPARATOR))
}

/// Aligns the colons of subsequent [`aligned_line`]s to the longest of `keys`.
pub fn set_key_width(keys: &[&str]) {
    let width: usize = keys.iter().map(|k| UnicodeWidthStr::width(*k)).max().unwrap_or(0);
    GLOBAL_KEY_WIDTH.set(width);
}

pub fn aligned_line(key: &str, value: ColoredString) {
    let key: String = dotted_key(key, GLOBAL_KEY_WIDTH.get() + 1, colors::PRIMARY);
    print_status(format!("{key} {value}"));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    let last: usize = details.len().saturating_sub(1);
    for (i, (key, value)) in details.into_iter().enumerate() {
        let branch: ColoredString = (if i == last { "└─" } else { "├─" }).bright_black();
        let key: String = dotted_key(&key, TREE_KEY_WIDTH, colors::TEXT_DEFAULT);
        print(&format!(" {branch} {key} {value}"));
    }
}

pub fn centerln(msg: &str) {
    let (left, _) = padding(console::measure_text_width(msg));
    let space: String = " ".repeat(left);
    print(&format!("{space}{msg}{space}"));
}

const NO_RESULTS: &str = r#"
         _   _  ___    ____  _____ ____  _   _ _   _____ ____
        | \ | |/ _ \  |  _ \| ____/ ___|| | | | | |_   _/ ___|
        |  \| | | | | | |_) |  _| \___ \| | | | |   | | \___ \
        | |\  | |_| | |  _ <| |___ ___) | |_| | |___| |  ___) |
        |_| \_|\___/  |_| \_\_____|____/ \___/|_____|_| |____/
"#;

pub fn no_results() {
    print(&NO_RESULTS.red().bold().to_string());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
