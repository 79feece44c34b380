//! Tagged-section parser for popup text.
//!
//! Popup cells hold one text blob: blocks separated by a blank line, the
//! first block is the title, the second the description, and a block headed
//! by `Kelebihan:` or `Kekurangan:` lists advantages or disadvantages one
//! per line.

const TITLE_FALLBACK: &str = "Judul Tidak Ditemukan";
pub const ADVANTAGES_LABEL: &str = "Kelebihan:";
pub const DISADVANTAGES_LABEL: &str = "Kekurangan:";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sections {
    pub title: String,
    pub description: String,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
}

enum Block<'a> {
    Advantages(Vec<&'a str>),
    Disadvantages(Vec<&'a str>),
    Other,
}

fn classify(block: &str) -> Block<'_> {
    let head = block.lines().next().unwrap_or_default().trim();
    let items = || {
        block
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    };
    match head {
        ADVANTAGES_LABEL => Block::Advantages(items()),
        DISADVANTAGES_LABEL => Block::Disadvantages(items()),
        _ => Block::Other,
    }
}

/// Parses a popup blob. Missing blocks degrade to empty values.
pub fn parse_sections(raw: &str) -> Sections {
    let normalized = raw.replace("\r\n", "\n");
    let blocks: Vec<&str> = normalized.split("\n\n").collect();

    let title = blocks
        .first()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .unwrap_or(TITLE_FALLBACK)
        .to_string();
    let description = blocks
        .get(1)
        .map(|b| b.trim().to_string())
        .unwrap_or_default();

    let mut sections = Sections {
        title,
        description,
        ..Default::default()
    };

    // First tagged block of each kind wins.
    for block in &blocks {
        match classify(block) {
            Block::Advantages(items) if sections.advantages.is_empty() => {
                sections.advantages = items.into_iter().map(String::from).collect();
            }
            Block::Disadvantages(items) if sections.disadvantages.is_empty() => {
                sections.disadvantages = items.into_iter().map(String::from).collect();
            }
            _ => {}
        }
    }

    sections
}
