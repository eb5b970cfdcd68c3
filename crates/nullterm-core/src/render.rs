//! Turns file content into a backend-agnostic [`Document`].
//!
//! Every [`FileContent`] variant has exactly one template here. Templates are
//! pure: the same node always yields an equal document, so re-selecting a
//! file is idempotent. Terminal drawing lives in the cli crate.

use serde::Deserialize;
use serde::Serialize;

use crate::content::AboutEec;
use crate::content::AboutNullEec;
use crate::content::CallToAction;
use crate::content::ContactUs;
use crate::content::ContentStore;
use crate::content::Dashboard;
use crate::content::Event;
use crate::content::FileContent;
use crate::content::FileNode;
use crate::content::GettingStarted;
use crate::content::Hero;
use crate::content::InfoCard;
use crate::content::NavCard;
use crate::content::PastEvents;
use crate::content::PhotoCollage;
use crate::content::PhotoSize;
use crate::content::Section;
use crate::content::Stat;
use crate::content::TeamMember;
use crate::markup::classify_line;
use crate::markup::parse_inline;
use crate::markup::Inline;
use crate::markup::MarkupLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub icon: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Hero {
        title: String,
        subtitle: String,
        description: String,
        tagline: Option<String>,
    },
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(Vec<Inline>),
    Bullet {
        label: Option<String>,
        text: String,
    },
    Numbered {
        number: u32,
        text: String,
    },
    Rule,
    Code {
        lang: String,
        lines: Vec<String>,
    },
    Spacer,
    Card(Card),
    Stats(Vec<StatCell>),
    Carousel(Vec<Slide>),
    Quote {
        text: String,
        author: String,
        detail: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    pub icon: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Vec<String>,
    pub tags: Vec<String>,
    /// File id this card navigates to, if any.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCell {
    pub icon: Option<String>,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub caption: String,
    pub detail: Vec<String>,
}

impl Document {
    fn new(icon: &str, title: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn carousel_len(&self) -> usize {
        self.blocks
            .iter()
            .find_map(|block| match block {
                Block::Carousel(slides) => Some(slides.len()),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// File ids of the cards that link elsewhere, in reading order.
    pub fn link_targets(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Card(card) => card.target.as_deref(),
                _ => None,
            })
            .collect()
    }

    /// Flattened text rendering; carousels list every slide.
    pub fn plain_lines(&self) -> Vec<String> {
        let mut out = vec![format!("{} {}", self.icon, self.title), String::new()];
        for block in &self.blocks {
            match block {
                Block::Hero {
                    title,
                    subtitle,
                    description,
                    tagline,
                } => {
                    out.push(title.to_uppercase());
                    out.push(subtitle.clone());
                    out.push(description.clone());
                    if let Some(tagline) = tagline {
                        out.push(format!("\"{tagline}\""));
                    }
                    out.push(String::new());
                }
                Block::Heading { level, text } => {
                    out.push(format!("{} {text}", "#".repeat(usize::from(*level))));
                }
                Block::Paragraph(spans) => {
                    out.push(spans.iter().map(Inline::text).collect());
                }
                Block::Bullet { label, text } => match label {
                    Some(label) => out.push(format!("  • {label}: {text}")),
                    None => out.push(format!("  • {text}")),
                },
                Block::Numbered { number, text } => out.push(format!("  {number}. {text}")),
                Block::Rule => out.push("─".repeat(40)),
                Block::Code { lines, .. } => {
                    out.extend(lines.iter().map(|line| format!("    {line}")));
                }
                Block::Spacer => out.push(String::new()),
                Block::Card(card) => {
                    let mut head = format!("[{} {}]", card.icon, card.title);
                    if let Some(subtitle) = &card.subtitle {
                        head.push_str(&format!(" {subtitle}"));
                    }
                    out.push(head);
                    out.extend(card.body.iter().map(|line| format!("  {line}")));
                    if !card.tags.is_empty() {
                        out.push(format!("  {}", card.tags.join(" · ")));
                    }
                }
                Block::Stats(cells) => {
                    let row: Vec<String> = cells
                        .iter()
                        .map(|cell| format!("{} {}", cell.value, cell.label))
                        .collect();
                    out.push(row.join(" | "));
                }
                Block::Carousel(slides) => {
                    for (index, slide) in slides.iter().enumerate() {
                        out.push(format!("  ({}/{}) {}", index + 1, slides.len(), slide.title));
                        if !slide.caption.is_empty() {
                            out.push(format!("      {}", slide.caption));
                        }
                    }
                }
                Block::Quote {
                    text,
                    author,
                    detail,
                } => {
                    out.push(format!("  \"{text}\""));
                    out.push(format!("    - {author}, {detail}"));
                }
            }
        }
        out
    }
}

/// `None` when the file has no content. Dispatch is on the content tag alone.
pub fn render_file(file: &FileNode) -> Option<Document> {
    let content = file.content.as_ref()?;
    let mut doc = Document::new(&file.icon, &file.display_name);
    match content {
        FileContent::Markup { text } => render_markup(&mut doc.blocks, text),
        FileContent::GettingStarted(page) => render_getting_started(&mut doc.blocks, page),
        FileContent::AboutNullEec(page) => render_about_null(&mut doc.blocks, page),
        FileContent::AboutEec(page) => render_about_eec(&mut doc.blocks, page),
        FileContent::PastEventsRedesigned(page) => render_past_events(&mut doc.blocks, page),
        FileContent::PhotoCollage(gallery) => render_gallery(&mut doc.blocks, gallery),
        FileContent::ContactUs(page) => render_contact(&mut doc.blocks, page),
        FileContent::EventList { events } => render_events(&mut doc.blocks, events),
        FileContent::TeamRoster { members } => render_team(&mut doc.blocks, members),
    }
    Some(doc)
}

/// Number of slides in the carousel the file's template would show.
pub fn carousel_len(file: &FileNode) -> usize {
    match &file.content {
        Some(FileContent::PhotoCollage(gallery)) => gallery.photos.len(),
        Some(FileContent::PastEventsRedesigned(page)) => page.featured.items.len(),
        _ => 0,
    }
}

/// View shown while nothing is selected.
pub fn render_dashboard(dashboard: &Dashboard, store: &ContentStore) -> Document {
    let mut doc = Document::new("🖥️", &dashboard.title);
    render_markup(&mut doc.blocks, &dashboard.intro);
    doc.blocks.push(Block::Spacer);
    doc.blocks.push(stats(&dashboard.stats));
    if !dashboard.quick_links.is_empty() {
        doc.blocks.push(Block::Heading {
            level: 3,
            text: "Quick start".to_string(),
        });
        doc.blocks.extend(dashboard.quick_links.iter().map(nav_card));
    }
    doc.blocks.push(Block::Heading {
        level: 3,
        text: "Try these commands".to_string(),
    });
    for quick in &dashboard.quick_commands {
        doc.blocks.push(Block::Bullet {
            label: Some(quick.command.clone()),
            text: quick.description.clone(),
        });
    }
    doc.blocks.push(Block::Heading {
        level: 3,
        text: "Files".to_string(),
    });
    for file in store.iter() {
        doc.blocks.push(Block::Bullet {
            label: Some(format!("{} {}", file.icon, file.name)),
            text: file.tooltip.clone(),
        });
    }
    doc
}

pub fn render_markup(blocks: &mut Vec<Block>, text: &str) {
    let mut fence: Option<(String, Vec<String>)> = None;
    for line in text.lines() {
        if let Some((lang, lines)) = fence.as_mut() {
            if line.starts_with("```") {
                blocks.push(Block::Code {
                    lang: std::mem::take(lang),
                    lines: std::mem::take(lines),
                });
                fence = None;
            } else {
                lines.push(line.to_string());
            }
            continue;
        }
        let block = match classify_line(line) {
            MarkupLine::Heading { level, text } => Block::Heading { level, text },
            MarkupLine::Bold(text) => Block::Paragraph(vec![Inline::Strong(text)]),
            MarkupLine::LabelledBullet { label, text } => Block::Bullet {
                label: Some(label),
                text,
            },
            MarkupLine::Bullet(text) => Block::Bullet { label: None, text },
            MarkupLine::Numbered { number, text } => Block::Numbered { number, text },
            MarkupLine::Rule => Block::Rule,
            MarkupLine::CodeFence(lang) => {
                fence = Some((lang, Vec::new()));
                continue;
            }
            MarkupLine::InlineCode(text) => Block::Paragraph(parse_inline(&text)),
            MarkupLine::Paragraph(text) => Block::Paragraph(vec![Inline::Text(text)]),
            MarkupLine::Spacer => Block::Spacer,
        };
        blocks.push(block);
    }
    if let Some((lang, lines)) = fence {
        blocks.push(Block::Code { lang, lines });
    }
}

fn hero(hero: &Hero) -> Block {
    Block::Hero {
        title: hero.title.clone(),
        subtitle: hero.subtitle.clone(),
        description: hero.description.clone(),
        tagline: hero.tagline.clone(),
    }
}

fn heading(text: &str) -> Block {
    Block::Heading {
        level: 2,
        text: text.to_string(),
    }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph(parse_inline(text))
}

fn stats(stats: &[Stat]) -> Block {
    Block::Stats(
        stats
            .iter()
            .map(|stat| StatCell {
                icon: stat.icon.clone(),
                value: stat.value.clone(),
                label: stat.label.clone(),
            })
            .collect(),
    )
}

fn section_head<T>(blocks: &mut Vec<Block>, section: &Section<T>) {
    blocks.push(heading(&section.title));
    if let Some(description) = &section.description {
        blocks.push(paragraph(description));
    }
}

fn info_card(card: &InfoCard) -> Block {
    let body = if card.description.is_empty() {
        Vec::new()
    } else {
        vec![card.description.clone()]
    };
    Block::Card(Card {
        icon: card.icon.clone(),
        title: card.title.clone(),
        subtitle: card.subtitle.clone(),
        body,
        tags: card.highlights.clone(),
        target: None,
    })
}

fn card_section(blocks: &mut Vec<Block>, section: &Section<InfoCard>) {
    section_head(blocks, section);
    blocks.extend(section.items.iter().map(info_card));
}

fn call_to_action(blocks: &mut Vec<Block>, cta: &CallToAction) {
    blocks.push(Block::Rule);
    blocks.push(heading(&cta.title));
    blocks.push(paragraph(&cta.description));
    for item in &cta.items {
        blocks.push(Block::Bullet {
            label: None,
            text: item.clone(),
        });
    }
    if let Some(closing) = &cta.closing {
        blocks.push(Block::Paragraph(vec![Inline::Strong(closing.clone())]));
    }
}

fn nav_card(card: &NavCard) -> Block {
    Block::Card(Card {
        icon: card.icon.clone(),
        title: card.title.clone(),
        subtitle: None,
        body: vec![card.description.clone()],
        tags: card.highlights.clone(),
        target: Some(card.target.clone()),
    })
}

fn render_getting_started(blocks: &mut Vec<Block>, page: &GettingStarted) {
    blocks.push(hero(&page.hero));
    card_section(blocks, &page.quick_start);

    section_head(blocks, &page.navigation);
    blocks.extend(page.navigation.items.iter().map(nav_card));

    card_section(blocks, &page.features);

    section_head(blocks, &page.tips);
    for tip in &page.tips.items {
        blocks.push(Block::Bullet {
            label: Some(tip.icon.clone()),
            text: tip.text.clone(),
        });
    }

    section_head(blocks, &page.pathways);
    for path in &page.pathways.items {
        blocks.push(Block::Card(Card {
            icon: path.icon.clone(),
            title: path.title.clone(),
            subtitle: Some(path.description.clone()),
            body: path
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("{}. {step}", index + 1))
                .collect(),
            tags: Vec::new(),
            target: None,
        }));
    }

    blocks.push(stats(&page.stats));
}

fn render_about_null(blocks: &mut Vec<Block>, page: &AboutNullEec) {
    blocks.push(hero(&page.hero));
    card_section(blocks, &page.mission);

    section_head(blocks, &page.activities);
    for group in &page.activities.items {
        blocks.push(Block::Heading {
            level: 3,
            text: format!("{} {}", group.icon, group.title),
        });
        blocks.push(paragraph(&group.description));
        for activity in &group.items {
            blocks.push(Block::Card(Card {
                icon: "▸".to_string(),
                title: activity.name.clone(),
                subtitle: None,
                body: vec![activity.description.clone()],
                tags: activity.skills.clone(),
                target: None,
            }));
        }
    }

    card_section(blocks, &page.philosophy);
    card_section(blocks, &page.features);
    call_to_action(blocks, &page.cta);
}

fn render_about_eec(blocks: &mut Vec<Block>, page: &AboutEec) {
    blocks.push(hero(&page.hero));
    section_head(blocks, &page.stats);
    blocks.push(stats(&page.stats.items));
    card_section(blocks, &page.departments);
    card_section(blocks, &page.accreditations);
    card_section(blocks, &page.clubs);

    section_head(blocks, &page.placements);
    for group in &page.placements.items {
        blocks.push(Block::Card(Card {
            icon: group.icon.clone(),
            title: group.title.clone(),
            subtitle: None,
            body: vec![group.companies.join(", ")],
            tags: Vec::new(),
            target: None,
        }));
    }

    blocks.push(heading(&page.contact.title));
    for line in &page.contact.address {
        blocks.push(paragraph(line));
    }
    for channel in &page.contact.channels {
        blocks.push(Block::Bullet {
            label: Some(format!("{} {}", channel.icon, channel.label)),
            text: channel.value.clone(),
        });
    }

    call_to_action(blocks, &page.vision);
}

fn render_past_events(blocks: &mut Vec<Block>, page: &PastEvents) {
    blocks.push(hero(&page.hero));
    section_head(blocks, &page.stats);
    blocks.push(stats(&page.stats.items));
    card_section(blocks, &page.categories);

    section_head(blocks, &page.featured);
    blocks.push(Block::Carousel(
        page.featured
            .items
            .iter()
            .map(|event| {
                let mut detail = vec![
                    format!("📅 {}  ·  {}", event.date, event.category),
                    format!(
                        "👥 {}  ⏱ {}  🏆 {}",
                        event.participants, event.duration, event.prize_pool
                    ),
                    event.description.clone(),
                ];
                detail.extend(event.achievements.iter().map(|item| format!("✓ {item}")));
                detail.push(event.topics.join(" · "));
                Slide {
                    title: format!("{} {}", event.icon, event.title),
                    caption: event.subtitle.clone(),
                    detail,
                }
            })
            .collect(),
    ));

    section_head(blocks, &page.metrics);
    for group in &page.metrics.items {
        blocks.push(Block::Heading {
            level: 3,
            text: format!("{} {}", group.icon, group.title),
        });
        blocks.push(stats(&group.stats));
    }

    section_head(blocks, &page.testimonials);
    for voice in &page.testimonials.items {
        blocks.push(Block::Quote {
            text: voice.quote.clone(),
            author: voice.name.clone(),
            detail: format!("{} · {} · {}", voice.role, voice.event, voice.achievement),
        });
    }

    section_head(blocks, &page.timeline);
    for milestone in &page.timeline.items {
        blocks.push(Block::Card(Card {
            icon: "◆".to_string(),
            title: format!("{} {} {}", milestone.year, milestone.quarter, milestone.title),
            subtitle: Some(format!("{} participants", milestone.participants)),
            body: milestone.events.clone(),
            tags: vec![milestone.impact.clone()],
            target: None,
        }));
    }

    card_section(blocks, &page.upcoming);
}

fn render_gallery(blocks: &mut Vec<Block>, gallery: &PhotoCollage) {
    blocks.push(Block::Hero {
        title: gallery.title.clone(),
        subtitle: gallery.subtitle.clone(),
        description: gallery.description.clone(),
        tagline: None,
    });
    blocks.push(stats(&gallery.stats));
    blocks.push(Block::Carousel(
        gallery
            .photos
            .iter()
            .map(|photo| Slide {
                title: photo.caption.clone(),
                caption: photo.event.clone(),
                detail: vec![
                    photo.category.clone(),
                    format!("{} · {}", size_label(photo.size), photo.url),
                ],
            })
            .collect(),
    ));

    blocks.push(heading("Albums"));
    let mut categories: Vec<(&str, usize)> = Vec::new();
    for photo in &gallery.photos {
        match categories
            .iter_mut()
            .find(|(name, _)| *name == photo.category.as_str())
        {
            Some((_, count)) => *count += 1,
            None => categories.push((photo.category.as_str(), 1)),
        }
    }
    for (name, count) in categories {
        blocks.push(Block::Bullet {
            label: Some(name.to_string()),
            text: format!("{count} photos"),
        });
    }
}

fn size_label(size: PhotoSize) -> &'static str {
    match size {
        PhotoSize::Small => "small",
        PhotoSize::Medium => "medium",
        PhotoSize::Large => "large",
    }
}

fn render_contact(blocks: &mut Vec<Block>, page: &ContactUs) {
    blocks.push(hero(&page.hero));

    section_head(blocks, &page.quick_connect);
    for channel in &page.quick_connect.items {
        blocks.push(Block::Card(Card {
            icon: channel.icon.clone(),
            title: channel.title.clone(),
            subtitle: Some(format!("response: {}", channel.response_time)),
            body: vec![channel.description.clone()],
            tags: channel.links.clone(),
            target: None,
        }));
    }

    section_head(blocks, &page.categories);
    for category in &page.categories.items {
        blocks.push(Block::Card(Card {
            icon: category.icon.clone(),
            title: category.title.clone(),
            subtitle: Some(category.email.clone()),
            body: vec![
                category.description.clone(),
                format!("Response time: {}", category.response_time),
            ],
            tags: Vec::new(),
            target: None,
        }));
    }

    section_head(blocks, &page.leadership);
    for lead in &page.leadership.items {
        blocks.push(Block::Bullet {
            label: Some(format!("{} {}", lead.icon, lead.title)),
            text: format!("{} ({})", lead.phone, lead.availability),
        });
    }

    let location = &page.location;
    blocks.push(heading(&location.title));
    blocks.push(Block::Paragraph(vec![Inline::Strong(location.place.clone())]));
    for line in &location.address {
        blocks.push(paragraph(line));
    }
    blocks.push(Block::Code {
        lang: String::new(),
        lines: vec![location.coordinates.clone()],
    });
    for schedule in &location.hours {
        blocks.push(Block::Card(Card {
            icon: schedule.icon.clone(),
            title: schedule.title.clone(),
            subtitle: None,
            body: schedule.slots.clone(),
            tags: Vec::new(),
            target: None,
        }));
    }

    section_head(blocks, &page.faq);
    for group in &page.faq.items {
        blocks.push(Block::Heading {
            level: 3,
            text: format!("{} {}", group.icon, group.title),
        });
        for (index, entry) in group.entries.iter().enumerate() {
            blocks.push(Block::Numbered {
                number: index as u32 + 1,
                text: entry.question.clone(),
            });
            blocks.push(Block::Bullet {
                label: None,
                text: entry.answer.clone(),
            });
        }
    }

    call_to_action(blocks, &page.cta);
}

fn render_events(blocks: &mut Vec<Block>, events: &[Event]) {
    blocks.push(heading(&format!("{} upcoming", events.len())));
    for event in events {
        blocks.push(Block::Card(Card {
            icon: "📅".to_string(),
            title: event.title.clone(),
            subtitle: Some(format!("{} · {}", event.date, event.time)),
            body: vec![
                format!("📍 {}", event.venue),
                format!("🎤 {}", event.speaker),
                event.description.clone(),
            ],
            tags: event.tags.clone(),
            target: None,
        }));
    }
}

fn render_team(blocks: &mut Vec<Block>, members: &[TeamMember]) {
    blocks.push(heading(&format!("{} core members", members.len())));
    for member in members {
        let mut body = vec![member.bio.clone()];
        if let Some(github) = &member.github {
            body.push(format!("GitHub: {github}"));
        }
        if let Some(linkedin) = &member.linkedin {
            body.push(format!("LinkedIn: {linkedin}"));
        }
        blocks.push(Block::Card(Card {
            icon: "👤".to_string(),
            title: member.name.clone(),
            subtitle: Some(format!(
                "{} · {} · {}",
                member.role, member.department, member.year
            )),
            body,
            tags: member.skills.clone(),
            target: None,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::content::NodeKind;

    fn store() -> ContentStore {
        ContentStore::embedded().expect("embedded asset")
    }

    fn markup_node(text: &str) -> FileNode {
        FileNode {
            id: "notes".to_string(),
            name: "notes.md".to_string(),
            display_name: "Notes".to_string(),
            kind: NodeKind::File,
            tooltip: String::new(),
            icon: "📝".to_string(),
            content: Some(FileContent::Markup {
                text: text.to_string(),
            }),
        }
    }

    #[test]
    fn every_embedded_file_renders() {
        let store = store();
        for file in store.iter() {
            let doc = render_file(file).expect("content present");
            assert_eq!(doc.title, file.display_name);
            assert!(!doc.blocks.is_empty(), "{} rendered nothing", file.id);
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let store = store();
        for file in store.iter() {
            assert_eq!(render_file(file), render_file(file));
        }
    }

    #[test]
    fn missing_content_renders_nothing() {
        let mut node = markup_node("");
        node.content = None;
        assert_eq!(render_file(&node), None);
    }

    #[test]
    fn carousel_len_matches_rendered_carousel() {
        let store = store();
        for file in store.iter() {
            let doc = render_file(file).expect("content present");
            assert_eq!(doc.carousel_len(), carousel_len(file), "{}", file.id);
        }
        let photos = store.get("past-photos").expect("gallery");
        assert_eq!(carousel_len(photos), 26);
        let past = store.get("past-events").expect("past events");
        assert_eq!(carousel_len(past), 6);
        assert_eq!(carousel_len(store.get("team").expect("team")), 0);
    }

    #[test]
    fn getting_started_cards_navigate_to_existing_files() {
        let store = store();
        let doc = render_file(store.get("readme").expect("readme")).expect("doc");
        let targets: Vec<&str> = doc
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Card(card) => card.target.as_deref(),
                _ => None,
            })
            .collect();
        assert_eq!(targets.len(), 6);
        assert!(targets.iter().all(|target| store.get(target).is_some()));
    }

    #[test]
    fn markup_lines_become_blocks() {
        let node = markup_node(
            "# Title\n- **Lead:** Nanda\n1. first\n\n```\nls -la\n```\n---\nrun `help`",
        );
        let doc = render_file(&node).expect("doc");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Bullet {
                    label: Some("Lead:".to_string()),
                    text: "Nanda".to_string()
                },
                Block::Numbered {
                    number: 1,
                    text: "first".to_string()
                },
                Block::Spacer,
                Block::Code {
                    lang: String::new(),
                    lines: vec!["ls -la".to_string()]
                },
                Block::Rule,
                Block::Paragraph(vec![
                    Inline::Text("run ".to_string()),
                    Inline::Code("help".to_string())
                ]),
            ]
        );
    }

    #[test]
    fn only_inline_code_lines_get_spans() {
        let node = markup_node("`ls` first\nplain **text**\n-----");
        let doc = render_file(&node).expect("doc");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph(vec![Inline::Text("`ls` first".to_string())]),
                Block::Paragraph(vec![Inline::Text("plain **text**".to_string())]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn unterminated_fence_keeps_its_lines() {
        let node = markup_node("```sh\necho hi");
        let doc = render_file(&node).expect("doc");
        assert_eq!(
            doc.blocks,
            vec![Block::Code {
                lang: "sh".to_string(),
                lines: vec!["echo hi".to_string()]
            }]
        );
    }

    #[test]
    fn dashboard_links_lead_to_files() {
        let store = store();
        let doc = render_dashboard(store.dashboard(), &store);
        assert_eq!(doc.link_targets(), vec!["about-null", "upcoming-events", "team"]);
    }

    #[test]
    fn dashboard_lists_stats_and_files() {
        let store = store();
        let doc = render_dashboard(store.dashboard(), &store);
        let text = doc.plain_lines().join("\n");
        for needle in [
            "150+ Active Members",
            "25+ Events Completed",
            "12 CTF Wins",
            "2+ Years Active",
            "📧 contact.txt",
        ] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn plain_lines_include_template_details() {
        let store = store();
        let contact = render_file(store.get("contact").expect("contact")).expect("doc");
        let text = contact.plain_lines().join("\n");
        assert!(text.starts_with("📧 Contact Us"));
        assert!(text.contains("discord.gg/null-eec"));
        assert!(text.contains("Is there any membership fee?"));

        let team = render_file(store.get("team").expect("team")).expect("doc");
        assert!(team
            .plain_lines()
            .iter()
            .any(|line| line == "  GitHub: https://github.com/CSivakesav"));
    }
}
