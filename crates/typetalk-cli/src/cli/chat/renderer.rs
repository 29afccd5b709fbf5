//! Terminal rendering of bot replies.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced
//! code blocks. The skin's bold text and headers take the accent color of
//! the reply's personality label.

use crossterm::style::{Color, Stylize};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use typetalk_types::personality::{AccentColor, PersonalityInfo};

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn skin(accent: Option<AccentColor>) -> MadSkin {
        let mut skin = MadSkin::default_dark();
        if let Some(color) = accent {
            let tc = termimad::crossterm::style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            };
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        skin
    }

    /// Render a complete markdown reply.
    ///
    /// Code fences are highlighted via syntect; everything else goes through
    /// termimad.
    pub fn render(&self, markdown: &str, accent: Option<AccentColor>) -> String {
        let skin = Self::skin(accent);
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Header line above a reply: author plus the personality badge.
    pub fn reply_header(&self, label: Option<&str>) -> String {
        let author = "AI Assistant".bold();
        match label {
            Some(label) => {
                let info = PersonalityInfo::lookup(label);
                format!("  {author}  {}", badge(label, &info))
            }
            None => format!("  {author}"),
        }
    }

    /// Footer after a resolved reply.
    ///
    /// Format: "| {name} . {time}s . {n} exchanges"
    pub fn stats_footer(&self, label: Option<&str>, response_ms: u64, exchanges: u32) -> String {
        let seconds = response_ms as f64 / 1000.0;
        let name = label
            .map(|l| PersonalityInfo::lookup(l).name)
            .unwrap_or("Unknown");
        let noun = if exchanges == 1 { "exchange" } else { "exchanges" };
        format!(
            "  {} {} {} {:.1}s {} {} {}",
            console::style("|").dim(),
            console::style(name).dim(),
            console::style("\u{00b7}").dim(),
            console::style(seconds).dim(),
            console::style("\u{00b7}").dim(),
            console::style(exchanges).dim(),
            console::style(noun).dim(),
        )
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

/// `[* CODE . Name]` badge in the label's accent color.
fn badge(label: &str, info: &PersonalityInfo) -> String {
    let color = Color::Rgb {
        r: info.color.r,
        g: info.color.g,
        b: info.color.b,
    };
    let code = label.trim().to_uppercase();
    format!("[\u{2726} {code} \u{00b7} {}]", info.name)
        .with(color)
        .bold()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_text_keeps_content() {
        let renderer = ChatRenderer::new();
        let out = renderer.render("Hi there!", None);
        assert!(out.contains("Hi there!"));
    }

    #[test]
    fn test_render_code_block_gets_header() {
        let renderer = ChatRenderer::new();
        let out = renderer.render("Try:\n```rust\nfn main() {}\n```", None);
        assert!(out.contains("--- rust ---"));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_reply_header_badge() {
        let renderer = ChatRenderer::new();
        let header = renderer.reply_header(Some("infp"));
        assert!(header.contains("INFP"));
        assert!(header.contains("The Mediator"));

        let unknown = renderer.reply_header(Some("QQQQ"));
        assert!(unknown.contains("Unknown"));

        let plain = renderer.reply_header(None);
        assert!(plain.contains("AI Assistant"));
        assert!(!plain.contains('\u{2726}'));
    }

    #[test]
    fn test_stats_footer_pluralizes() {
        let renderer = ChatRenderer::new();
        assert!(renderer.stats_footer(Some("ENTJ"), 1200, 1).contains("exchange"));
        assert!(renderer.stats_footer(Some("ENTJ"), 1200, 1).contains("The Commander"));
        assert!(renderer.stats_footer(None, 0, 3).contains("exchanges"));
    }
}
