//! Personality type reference commands (`typetalk types`, `/types`, `/type`).

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use typetalk_types::personality::{AccentColor, PersonalityCode, PersonalityInfo};

fn table_color(color: AccentColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Build the reference table of all 16 personality codes.
pub fn types_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Code").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Accent").fg(Color::White),
    ]);

    for code in PersonalityCode::ALL {
        let accent = code.accent();
        table.add_row(vec![
            Cell::new(code.as_str()).fg(table_color(accent)),
            Cell::new(code.display_name()),
            Cell::new(accent.to_string()).fg(table_color(accent)),
        ]);
    }

    table
}

/// Print every personality code, as a table or as JSON.
pub fn list_types(json: bool) -> Result<()> {
    if json {
        let entries: Vec<serde_json::Value> = PersonalityCode::ALL
            .iter()
            .map(|code| {
                serde_json::json!({
                    "code": code.as_str(),
                    "name": code.display_name(),
                    "color": code.accent().to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    println!("{}", types_table());
    println!();
    Ok(())
}

/// Print the detail card for one code. Unknown codes get a notice instead.
pub fn print_type_detail(raw: &str) {
    let info = PersonalityInfo::lookup(raw);
    let Some(code) = info.code else {
        println!(
            "\n  {} Unknown personality type: {}. Type /types to list them.\n",
            style("?").yellow().bold(),
            style(raw.trim()).dim()
        );
        return;
    };

    let accent = console::Color::Color256(nearest_ansi256(info.color));
    println!();
    println!("  {}", style(code.as_str()).fg(accent).bold());
    println!("  {}", style(info.name).bold());
    println!("  {}  {}", style("Accent:").dim(), style(info.color).fg(accent));
    println!();
}

/// Map a 24-bit color onto the xterm 6x6x6 color cube.
fn nearest_ansi256(color: AccentColor) -> u8 {
    let level = |c: u8| -> u8 {
        match c {
            0..=47 => 0,
            48..=114 => 1,
            _ => (c - 35) / 40,
        }
    };
    16 + 36 * level(color.r) + 6 * level(color.g) + level(color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_table_lists_every_code() {
        let rendered = types_table().to_string();
        for code in PersonalityCode::ALL {
            assert!(rendered.contains(code.as_str()), "missing {code}");
            assert!(rendered.contains(code.display_name()));
        }
    }

    #[test]
    fn test_nearest_ansi256_bounds() {
        assert_eq!(nearest_ansi256(AccentColor::from_hex(0x000000)), 16);
        assert_eq!(nearest_ansi256(AccentColor::from_hex(0xffffff)), 231);
        assert_eq!(nearest_ansi256(AccentColor::from_hex(0xff0000)), 196);
    }
}
